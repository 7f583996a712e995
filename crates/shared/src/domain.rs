use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseLocationError;

/// Physical site grouping a set of greenhouses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocationCode {
    #[serde(rename = "TGW")]
    Tgw,
    #[serde(rename = "ELN")]
    Eln,
}

impl LocationCode {
    /// Button order on the location step.
    pub const ALL: [LocationCode; Self::COUNT] = [LocationCode::Tgw, LocationCode::Eln];
    pub(crate) const COUNT: usize = 2;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tgw => "TGW",
            Self::Eln => "ELN",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Tgw => 0,
            Self::Eln => 1,
        }
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationCode {
    type Err = ParseLocationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        LocationCode::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| ParseLocationError(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Step {
    #[default]
    Location,
    Greenhouse,
    Entry,
}

impl Step {
    pub fn title(self) -> &'static str {
        match self {
            Self::Location => "Standort wählen",
            Self::Greenhouse => "Haus wählen",
            Self::Entry => "Daten erfassen",
        }
    }
}

/// One entry of a dropdown control. The placeholder carries an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::new(String::new(), label)
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// Form names whose values fill the typed `plant_id` / `leaf_count` record fields.
pub const PLANT_ID_FIELD: &str = "plant-id";
pub const LEAF_COUNT_FIELD: &str = "leaf-count";

/// Free-form field of the entry form, addressed by its form name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Record key for this field: form names use `-`, record keys use `_`.
    pub fn record_key(&self) -> String {
        self.name.replace('-', "_")
    }
}

pub fn default_entry_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(PLANT_ID_FIELD, "Pflanzen-ID").with_hint("z.B. 12"),
        FieldSpec::new(LEAF_COUNT_FIELD, "Blattanzahl").with_hint("z.B. 18"),
    ]
}
