pub mod config;
pub mod error;
pub mod maze;
pub mod store;

pub use error::{MazeError, StoreError};
pub use maze::Maze;
