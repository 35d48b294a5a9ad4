use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RswError {
    #[error("dataset not found: {}", .0.display())]
    DatasetNotFound(PathBuf),

    #[error("dataset has no '{0}' phase")]
    PhaseMissing(String),

    #[error("phase '{phase}' has no '{day}' workout")]
    DayMissing { phase: String, day: String },

    #[error("phase '{phase}' day '{day}' repeats exercise key '{key}'")]
    DuplicateExercise {
        phase: String,
        day: String,
        key: String,
    },

    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("bash not found on PATH")]
    ShellNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RswError>;
