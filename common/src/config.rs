use std::{env, path::PathBuf};

use tracing::warn;

use crate::maze::maker;

pub const SAVE_DIR_VAR: &str = "MAZE_SAVE_DIR";
pub const DEFAULT_SIZE_VAR: &str = "MAZE_DEFAULT_SIZE";
pub const SEED_VAR: &str = "MAZE_SEED";

pub const DEFAULT_SIZE: usize = 21;
const APP_DIR: &str = "maze-escape";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub save_dir: PathBuf,
    pub default_size: usize,
    pub seed: Option<u64>,
}

impl Settings {
    /// Read settings from the process environment, after loading `.env` if
    /// one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let save_dir = lookup(SAVE_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_save_dir);

        let default_size = match lookup(DEFAULT_SIZE_VAR) {
            Some(raw) => match raw.trim().parse().map(maker::validate_size) {
                Ok(Ok(size)) => size,
                _ => {
                    warn!(value = %raw, "ignoring {DEFAULT_SIZE_VAR}; using {DEFAULT_SIZE}");
                    DEFAULT_SIZE
                }
            },
            None => DEFAULT_SIZE,
        };

        let seed = lookup(SEED_VAR).and_then(|raw| match raw.trim().parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!(value = %raw, "ignoring {SEED_VAR}: not an unsigned integer");
                None
            }
        });

        Settings {
            save_dir,
            default_size,
            seed,
        }
    }
}

fn default_save_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("mazes"))
}
