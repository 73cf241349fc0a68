use thiserror::Error;

#[derive(Error, Debug)]
pub enum OddsError {
    #[error("Unknown reroll policy: {0:?}")]
    UnknownRerollPolicy(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Simulation cancelled after {completed} of {requested} trials")]
    Cancelled { completed: u32, requested: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, OddsError>;
