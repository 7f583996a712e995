//! Reference data behind the cascading dropdowns: which greenhouses belong to a
//! location and which cultivars belong to a crop.

use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{domain::LocationCode, error::CatalogError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// May be empty: the crop then needs no cultivar choice.
    #[serde(default)]
    pub cultivars: Vec<String>,
}

impl CropEntry {
    pub fn new(name: &str, cultivars: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            cultivars: cultivars.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub code: LocationCode,
    pub greenhouses: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    location: Vec<LocationEntry>,
    #[serde(default)]
    crop: Vec<CropEntry>,
}

/// Immutable GreenhouseTable + CropTable. Every [`LocationCode`] is guaranteed
/// a non-empty greenhouse list once a catalog exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    greenhouses: [Vec<String>; LocationCode::COUNT],
    crops: Vec<CropEntry>,
}

impl Catalog {
    pub fn new(
        locations: Vec<LocationEntry>,
        crops: Vec<CropEntry>,
    ) -> Result<Self, CatalogError> {
        let mut greenhouses: [Option<Vec<String>>; LocationCode::COUNT] = Default::default();

        for entry in locations {
            let slot = &mut greenhouses[entry.code.index()];
            if slot.is_some() {
                return Err(CatalogError::DuplicateLocation(entry.code));
            }
            check_location(entry.code, &entry.greenhouses)?;
            *slot = Some(entry.greenhouses);
        }

        let mut resolved: [Vec<String>; LocationCode::COUNT] = Default::default();
        for code in LocationCode::ALL {
            resolved[code.index()] = greenhouses[code.index()]
                .take()
                .ok_or(CatalogError::MissingLocation(code))?;
        }

        check_crops(&crops)?;

        Ok(Self {
            greenhouses: resolved,
            crops,
        })
    }

    /// Tables used by the greenhouse team's paper form.
    pub fn builtin() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            greenhouses: [
                strings(&["2+3", "4", "5", "6", "7"]),
                strings(&["19", "20", "21", "22", "23", "31", "32", "33", "34"]),
            ],
            crops: vec![
                CropEntry::new(
                    "dattelcherry",
                    &[
                        "SG Adorelle",
                        "Prodelle",
                        "SG Sweetelle",
                        "RZ Parisetto Sanaterra",
                        "EZ Icaria",
                        "SG Sweetelle Sanaterra",
                        "RZ Parisetto",
                    ],
                ),
                CropEntry::new(
                    "rispentomaten",
                    &[
                        "Dunk",
                        "Climundo",
                        "RZ Parisetto",
                        "Dunk Sanaterra",
                        "Cibello",
                        "RZ Parisetto Sanaterra",
                        "Dunk T2",
                        "RZ 72-IM6752 (22K952609)",
                        "Bronski",
                        "EZ 3250",
                    ],
                ),
                CropEntry::new(
                    "gurken",
                    &[
                        "Georgia",
                        "Verdon",
                        "Sakata Mackay F1",
                        "RZ Blueheaven",
                        "RZ Blueheaven 2.5 Pfl/m2",
                        "Blueray",
                    ],
                ),
                CropEntry::new("aubergine", &[]),
            ],
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::new(file.location, file.crop)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn greenhouses(&self, location: LocationCode) -> &[String] {
        &self.greenhouses[location.index()]
    }

    /// `None` for a crop the table does not know.
    pub fn cultivars(&self, crop: &str) -> Option<&[String]> {
        self.crop(crop).map(|entry| entry.cultivars.as_slice())
    }

    pub fn crops(&self) -> &[CropEntry] {
        &self.crops
    }

    pub fn crop(&self, crop: &str) -> Option<&CropEntry> {
        self.crops.iter().find(|entry| entry.name == crop)
    }

    pub fn locations(&self) -> impl Iterator<Item = LocationEntry> + '_ {
        LocationCode::ALL.into_iter().map(|code| LocationEntry {
            code,
            greenhouses: self.greenhouses(code).to_vec(),
        })
    }
}

fn check_location(code: LocationCode, greenhouses: &[String]) -> Result<(), CatalogError> {
    if greenhouses.is_empty() {
        return Err(CatalogError::EmptyLocation(code));
    }
    let mut seen = HashSet::new();
    for haus in greenhouses {
        if haus.trim().is_empty() {
            return Err(CatalogError::EmptyIdentifier("greenhouse list"));
        }
        if !seen.insert(haus.as_str()) {
            return Err(CatalogError::DuplicateGreenhouse {
                location: code,
                haus: haus.clone(),
            });
        }
    }
    Ok(())
}

fn check_crops(crops: &[CropEntry]) -> Result<(), CatalogError> {
    let mut names = HashSet::new();
    for crop in crops {
        if crop.name.trim().is_empty() {
            return Err(CatalogError::EmptyIdentifier("crop list"));
        }
        if !names.insert(crop.name.as_str()) {
            return Err(CatalogError::DuplicateCrop(crop.name.clone()));
        }

        let mut cultivars = HashSet::new();
        for sorte in &crop.cultivars {
            if sorte.trim().is_empty() {
                return Err(CatalogError::EmptyIdentifier("cultivar list"));
            }
            if !cultivars.insert(sorte.as_str()) {
                return Err(CatalogError::DuplicateCultivar {
                    kultur: crop.name.clone(),
                    sorte: sorte.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
