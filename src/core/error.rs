use thiserror::Error;

#[derive(Error, Debug)]
pub enum RbacError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid matcher config: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Invalid subject at index {index}: {reason}")]
    InvalidSubject { index: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, RbacError>;
