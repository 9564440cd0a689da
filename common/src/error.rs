use std::io;

use thiserror::Error;

use crate::maze::{MAX_SIZE, MIN_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("Size must be an odd number between {} and {}, got {size}.", MIN_SIZE, MAX_SIZE)]
    InvalidSize { size: usize },
    #[error("No entrance found on the left border.")]
    MissingEntrance,
    #[error("No exit found on the right border.")]
    MissingExit,
    #[error("The exit can't be reached from the entrance.")]
    Unreachable,
    #[error("No maze has been created yet.")]
    NotBuilt,
}

impl MazeError {
    /// Whether the error points at a damaged layout rather than bad input.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            MazeError::MissingEntrance | MazeError::MissingExit | MazeError::Unreachable
        )
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode maze: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("failed to decode maze: {0}")]
    Decode(#[from] bincode::error::DecodeError),
    #[error("saved maze is malformed: {reason}")]
    Layout { reason: String },
    #[error("no saved maze named '{name}'")]
    NotFound { name: String },
    #[error("invalid maze name '{name}'")]
    InvalidName { name: String },
}
