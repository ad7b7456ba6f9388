use thiserror::Error;

use crate::core::types::CreatureId;

#[derive(Error, Debug)]
pub enum EldoriaError {
    #[error("Creature not found in catalog: {0}")]
    CreatureNotFound(CreatureId),

    #[error("Invalid stack size: {0}")]
    InvalidCount(u32),

    #[error("Invalid creature {id}: {reason}")]
    InvalidCreature { id: CreatureId, reason: String },

    #[error("Creature {0} is defined more than once")]
    DuplicateCreature(CreatureId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown creature name: {0}")]
    UnknownCreatureName(String),

    #[error("Battle has already finished")]
    BattleFinished,

    #[error("Battle has not finished yet")]
    BattleNotFinished,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EldoriaError>;
