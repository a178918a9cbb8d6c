use thiserror::Error;

use crate::models::ModeId;

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("unknown mode `{0}`")]
    UnknownMode(String),

    #[error("{mode} is locked: {needed} more completions needed in the previous tier")]
    Locked { mode: ModeId, needed: u32 },

    #[error("invalid config for {mode}: {reason}")]
    InvalidConfig { mode: ModeId, reason: String },
}

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("malformed progress data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("progress count for `{mode}` is not a non-negative integer")]
    BadCount { mode: String },

    #[error("failed to serialize progress: {0}")]
    Serialize(serde_json::Error),
}
