use thiserror::Error;

#[derive(Debug, Error)]
pub enum FirmRoiError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Unknown profile field: {0}")]
    UnknownField(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FirmRoiError {
    fn from(e: serde_json::Error) -> Self {
        FirmRoiError::SerializationError(e.to_string())
    }
}
