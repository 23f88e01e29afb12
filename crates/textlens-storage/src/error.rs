use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("missing required setting: {name}")]
    MissingSetting { name: &'static str },

    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cosmos DB returned {status}: {message}")]
    Service { status: u16, message: String },
}

impl StorageError {
    /// True for failures caused by local configuration rather than the service.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            StorageError::MissingSetting { .. } | StorageError::InvalidConnectionString(_)
        )
    }
}
