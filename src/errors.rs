use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CreatorHubError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Creator not found: {0}")]
    CreatorNotFound(Uuid),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Custom error: {0}")]
    Custom(String),
}

pub type Result<T> = std::result::Result<T, CreatorHubError>;
