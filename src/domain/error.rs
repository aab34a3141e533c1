use thiserror::Error;

/// Errors raised while detecting keyboard presence.
#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("Device inventory query failed: {0}")]
    InventoryQueryFailure(String),

    #[error("Keyboard record {index} is missing the {field} field")]
    MalformedDeviceRecord { index: usize, field: &'static str },

    #[error("Presence probe did not complete: {0}")]
    ProbeFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DetectionError {
    fn from(err: std::io::Error) -> Self {
        DetectionError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for DetectionError {
    fn from(err: toml::de::Error) -> Self {
        DetectionError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DetectionError {
    fn from(err: toml::ser::Error) -> Self {
        DetectionError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for DetectionError {
    fn from(err: serde_json::Error) -> Self {
        DetectionError::Serialization(err.to_string())
    }
}
