use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::LocationCode;

/// Flat observation record handed to the ingestion collaborator on submit.
///
/// Values are passed through as entered. `None` means the form never defined
/// the field, an empty string means it was left blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalRecord {
    pub location: Option<LocationCode>,
    pub haus: Option<String>,
    pub kultur: String,
    pub sorte: String,
    pub plant_id: Option<String>,
    pub leaf_count: Option<String>,
    /// Any further entry-form fields, keyed by record key.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl FinalRecord {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
