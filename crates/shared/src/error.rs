use std::path::PathBuf;

use thiserror::Error;

use crate::domain::LocationCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown location code '{0}'")]
pub struct ParseLocationError(pub String);

/// Reference data that cannot back the form. Always fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("location {0} has no greenhouse entry")]
    MissingLocation(LocationCode),
    #[error("location {0} is listed more than once")]
    DuplicateLocation(LocationCode),
    #[error("location {0} has an empty greenhouse list")]
    EmptyLocation(LocationCode),
    #[error("greenhouse '{haus}' is listed twice for location {location}")]
    DuplicateGreenhouse { location: LocationCode, haus: String },
    #[error("crop '{0}' is listed more than once")]
    DuplicateCrop(String),
    #[error("cultivar '{sorte}' is listed twice for crop '{kultur}'")]
    DuplicateCultivar { kultur: String, sorte: String },
    #[error("empty identifier in {0}")]
    EmptyIdentifier(&'static str),
}

/// Failure reported by the persistence collaborator.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write record: {0}")]
    Io(#[from] std::io::Error),
}
