use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::{
    catalog::Catalog,
    domain::{default_entry_fields, FieldSpec, LEAF_COUNT_FIELD, PLANT_ID_FIELD},
    error::CatalogError,
};
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "entry.toml";

/// Record keys filled by the selection state, the selectors or the typed fields.
const RESERVED_RECORD_KEYS: [&str; 6] =
    ["location", "haus", "kultur", "sorte", "plant_id", "leaf_count"];

/// The only form names allowed to produce a reserved record key.
const TYPED_FIELD_NAMES: [&str; 2] = [PLANT_ID_FIELD, LEAF_COUNT_FIELD];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("entry field '{0}' clashes with a built-in form field")]
    ReservedField(String),
    #[error("entry field '{0}' maps to a record key that is already in use")]
    DuplicateField(String),
    #[error("entry field with an empty name")]
    EmptyFieldName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub catalog_path: Option<PathBuf>,
    pub log_filter: String,
    pub entry_fields: Vec<FieldSpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: None,
            log_filter: "info".into(),
            entry_fields: default_entry_fields(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    catalog_path: Option<PathBuf>,
    log_filter: Option<String>,
    entry_fields: Option<Vec<FieldSpec>>,
}

impl Settings {
    /// Loads `explicit` if given, otherwise `entry.toml` from the working
    /// directory when present, then applies `APP__*` environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = Settings::default();

        let file = match explicit {
            Some(path) => Some(read_settings_file(path)?),
            None => {
                let implicit = Path::new(DEFAULT_SETTINGS_FILE);
                if implicit.exists() {
                    Some(read_settings_file(implicit)?)
                } else {
                    None
                }
            }
        };

        if let Some(file) = file {
            settings.apply_file(file);
        }
        settings.apply_env(|name| std::env::var(name).ok());
        settings.normalize_fields();
        settings.check_fields()?;
        Ok(settings)
    }

    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path),
            None => Ok(Catalog::builtin()),
        }
    }

    fn apply_file(&mut self, file: SettingsFile) {
        if let Some(v) = file.catalog_path {
            self.catalog_path = Some(v);
        }
        if let Some(v) = file.log_filter {
            self.log_filter = v;
        }
        if let Some(v) = file.entry_fields {
            self.entry_fields = v;
        }
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("APP__CATALOG_PATH").filter(|v| !v.trim().is_empty()) {
            self.catalog_path = Some(PathBuf::from(v));
        }
        if let Some(v) = var("APP__LOG_FILTER").filter(|v| !v.trim().is_empty()) {
            self.log_filter = v;
        }
    }

    fn normalize_fields(&mut self) {
        for field in &mut self.entry_fields {
            field.name = field.name.trim().to_string();
        }
    }

    /// Every field must land on its own record key.
    fn check_fields(&self) -> Result<(), SettingsError> {
        let mut keys = HashSet::new();
        for field in &self.entry_fields {
            let name = field.name.as_str();
            if name.trim().is_empty() {
                return Err(SettingsError::EmptyFieldName);
            }
            let key = field.record_key();
            if RESERVED_RECORD_KEYS.contains(&key.as_str()) && !TYPED_FIELD_NAMES.contains(&name) {
                return Err(SettingsError::ReservedField(name.to_string()));
            }
            if !keys.insert(key) {
                return Err(SettingsError::DuplicateField(name.to_string()));
            }
        }
        Ok(())
    }
}

fn read_settings_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
