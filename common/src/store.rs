use std::{
    fs, io,
    path::{Path, PathBuf},
};

use bincode::{
    config::standard,
    serde::{decode_from_slice, encode_to_vec},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::StoreError,
    maze::{
        Maze,
        grid::{CellGrid, Coord, Kind},
        maker,
    },
};

pub const FORMAT_VERSION: u8 = 1;
pub const EXTENSION: &str = "maze";
pub const MAX_NAME_LENGTH: usize = 32;

const WALL: u8 = 1;
const PATH: u8 = 0;

/// On-disk form: the wall/path layout only, `1` for wall and `0` for path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMaze {
    pub version: u8,
    pub size: u8,
    pub grid: Vec<Vec<u8>>,
}

impl SavedMaze {
    pub fn from_maze(maze: &Maze) -> Self {
        let grid = maze
            .grid()
            .grid_rows()
            .map(|row| {
                row.iter()
                    .map(|cell| if cell.is_wall() { WALL } else { PATH })
                    .collect()
            })
            .collect();

        SavedMaze {
            version: FORMAT_VERSION,
            size: maze.size() as u8,
            grid,
        }
    }

    pub fn into_maze(self) -> Result<Maze, StoreError> {
        if self.version != FORMAT_VERSION {
            return Err(layout(format!("unsupported format version {}", self.version)));
        }

        let size = self.size as usize;
        maker::validate_size(size).map_err(|e| layout(e.to_string()))?;

        if self.grid.len() != size || self.grid.iter().any(|row| row.len() != size) {
            return Err(layout(format!("grid is not {size}x{size}")));
        }

        let mut grid = CellGrid::new(size, size);
        for (row, values) in self.grid.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                let kind = match value {
                    WALL => Kind::Wall,
                    PATH => Kind::Path,
                    other => return Err(layout(format!("unknown cell value {other}"))),
                };
                grid.set_kind(Coord::new(row, col), kind);
            }
        }

        check_layout(&grid)?;

        Maze::from_grid(grid).map_err(|e| layout(e.to_string()))
    }
}

fn layout(reason: String) -> StoreError {
    StoreError::Layout { reason }
}

fn check_layout(grid: &CellGrid) -> Result<(), StoreError> {
    let last = grid.rows() - 1;

    if let Some(cell) = grid
        .cells()
        .find(|cell| cell.is_path() && cell.coord().is_pillar())
    {
        let Coord { row, col } = cell.coord();
        return Err(layout(format!("pillar at ({row}, {col}) is open")));
    }

    for col in 0..grid.cols() {
        if grid.is_path(Coord::new(0, col)) || grid.is_path(Coord::new(last, col)) {
            return Err(layout(format!("top or bottom border is open at column {col}")));
        }
    }

    for (col, side) in [(0, "left"), (last, "right")] {
        let openings = (0..grid.rows())
            .filter(|&row| grid.is_path(Coord::new(row, col)))
            .count();
        if openings != 1 {
            return Err(layout(format!(
                "{side} border has {openings} openings, expected 1"
            )));
        }
    }

    Ok(())
}

/// Serialize an unmarked copy of `maze`.
pub fn encode(maze: &Maze) -> Result<Vec<u8>, StoreError> {
    let saved = SavedMaze::from_maze(&maze.snapshot());
    Ok(encode_to_vec(&saved, standard())?)
}

pub fn decode(bytes: &[u8]) -> Result<Maze, StoreError> {
    let (saved, _) = decode_from_slice::<SavedMaze, _>(bytes, standard())?;
    saved.into_maze()
}

pub fn sanitize_name(input: &str) -> Result<String, StoreError> {
    let trimmed = input.trim();

    let is_valid = !trimmed.is_empty()
        && trimmed.chars().count() <= MAX_NAME_LENGTH
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');

    if !is_valid {
        return Err(StoreError::InvalidName {
            name: input.to_string(),
        });
    }

    Ok(trimmed.to_string())
}

/// A directory of saved mazes, one `<name>.maze` file each.
#[derive(Debug, Clone)]
pub struct MazeStore {
    dir: PathBuf,
}

impl MazeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        let name = sanitize_name(name)?;
        Ok(self.dir.join(format!("{name}.{EXTENSION}")))
    }

    pub fn save(&self, name: &str, maze: &Maze) -> Result<PathBuf, StoreError> {
        let path = self.path_for(name)?;
        let bytes = encode(maze)?;

        fs::create_dir_all(&self.dir)?;
        fs::write(&path, bytes)?;
        info!(path = %path.display(), "maze saved");

        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<Maze, StoreError> {
        let path = self.path_for(name)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    name: name.trim().to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), len = bytes.len(), "maze read");

        decode(&bytes)
    }

    /// Sorted names of saved mazes. A missing directory just means nothing
    /// has been saved yet.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn seeded(size: usize, seed: u64) -> Maze {
        let mut rng = StdRng::seed_from_u64(seed);
        Maze::create_with_rng(size, &mut rng).expect("size should be valid")
    }

    fn saved(rows: &[&str]) -> SavedMaze {
        SavedMaze {
            version: FORMAT_VERSION,
            size: rows.len() as u8,
            grid: rows
                .iter()
                .map(|row| row.chars().map(|ch| if ch == '#' { WALL } else { PATH }).collect())
                .collect(),
        }
    }

    const VALID: [&str; 9] = [
        "#########",
        "........#",
        "#######.#",
        "#.......#",
        "#.#######",
        "#.......#",
        "#######.#",
        "#........",
        "#########",
    ];

    #[test]
    fn encoded_maze_decodes_to_the_same_layout() {
        let mut maze = seeded(23, 1);
        maze.escape().expect("built maze should be solvable");

        let decoded = decode(&encode(&maze).expect("encode")).expect("decode");

        assert_eq!(decoded, maze.snapshot());
        assert!(!decoded.is_marked());
    }

    #[test]
    fn escape_marks_are_never_written() {
        let mut maze = seeded(9, 2);
        let unmarked = encode(&maze).expect("encode");
        maze.escape().expect("built maze should be solvable");

        assert_eq!(encode(&maze).expect("encode"), unmarked);
    }

    #[test]
    fn rejects_unknown_versions() {
        let mut file = SavedMaze::from_maze(&seeded(9, 3));
        file.version = 9;

        assert!(matches!(file.into_maze(), Err(StoreError::Layout { .. })));
    }

    #[test]
    fn rejects_grids_that_do_not_match_their_size() {
        let mut file = SavedMaze::from_maze(&seeded(9, 4));
        file.grid.pop();

        assert!(matches!(file.into_maze(), Err(StoreError::Layout { .. })));
    }

    #[test]
    fn rejects_an_open_pillar() {
        let mut file = saved(&VALID);
        file.grid[2][2] = PATH;

        let Err(StoreError::Layout { reason }) = file.into_maze() else {
            panic!("expected a layout error");
        };
        assert!(reason.contains("pillar"));
    }

    #[test]
    fn rejects_a_second_exit() {
        let mut file = saved(&VALID);
        file.grid[3][8] = PATH;

        let Err(StoreError::Layout { reason }) = file.into_maze() else {
            panic!("expected a layout error");
        };
        assert!(reason.contains("right border has 2 openings"));
    }

    #[test]
    fn hand_written_layout_loads() {
        let maze = saved(&VALID).into_maze().expect("layout should be valid");

        assert_eq!(maze.size(), 9);
        assert_eq!(maze.grid().entrance(), Some(Coord::new(1, 0)));
        assert_eq!(maze.grid().exit(), Some(Coord::new(7, 8)));
    }

    #[test]
    fn rejects_an_open_bottom_border() {
        let mut file = saved(&VALID);
        file.grid[8][1] = PATH;

        let Err(StoreError::Layout { reason }) = file.into_maze() else {
            panic!("expected a layout error");
        };
        assert!(reason.contains("bottom border"));
    }

    #[test]
    fn rejects_garbage_bytes() {
        assert!(decode(&[0xff, 0xff, 0xff]).is_err());
    }

    #[test]
    fn names_are_restricted_to_safe_characters() {
        assert_eq!(sanitize_name("  level-1_b ").expect("valid"), "level-1_b");
        assert!(sanitize_name("").is_err());
        assert!(sanitize_name("../etc").is_err());
        assert!(sanitize_name(&"a".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn store_saves_lists_and_loads() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MazeStore::new(dir.path().join("mazes"));
        let maze = seeded(11, 5);

        assert!(store.list().expect("list").is_empty());

        store.save("beta", &maze).expect("save");
        store.save("alpha", &maze).expect("save");
        fs::write(dir.path().join("mazes").join("notes.txt"), "ignored").expect("write");

        assert_eq!(store.list().expect("list"), vec!["alpha", "beta"]);
        assert_eq!(store.load("alpha").expect("load"), maze);
    }

    #[test]
    fn loading_a_missing_maze_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MazeStore::new(dir.path());

        assert!(matches!(
            store.load("nothing"),
            Err(StoreError::NotFound { name }) if name == "nothing"
        ));
    }
}
