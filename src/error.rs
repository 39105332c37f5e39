use thiserror::Error;

/// Errors surfaced by the game, its storage and its host.
#[derive(Error, Debug)]
pub enum FlapsError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file parsed but describes an impossible playfield.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("balance storage: {0}")]
    Storage(String),

    #[error("audio unavailable: {0}")]
    Audio(String),
}

impl From<serde_json::Error> for FlapsError {
    fn from(e: serde_json::Error) -> Self {
        FlapsError::Storage(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FlapsError>;
