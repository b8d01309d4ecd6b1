use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Creep not found: {0:?}")]
    CreepNotFound(crate::core::types::CreepId),

    #[error("Sprite sheet unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
