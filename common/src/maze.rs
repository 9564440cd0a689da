pub mod grid;
pub mod maker;
pub mod render;
pub mod solver;

use std::fmt;

use rand::Rng;

use crate::error::MazeError;
use grid::CellGrid;

pub const MIN_SIZE: usize = 9;
pub const MAX_SIZE: usize = 49;

/// A square perfect maze. The wall/path layout is fixed once built; only the
/// escape marks change afterwards.
///
/// `Clone` copies every cell into a fresh arena, so solving or unmarking one
/// copy never shows through in the other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: CellGrid,
}

impl Maze {
    pub fn create(size: usize) -> Result<Self, MazeError> {
        let grid = maker::build(size)?;
        Ok(Self { grid })
    }

    pub fn create_with_rng<R: Rng>(size: usize, rng: &mut R) -> Result<Self, MazeError> {
        let grid = maker::build_with_rng(size, rng)?;
        Ok(Self { grid })
    }

    /// Wrap an existing grid, for mazes laid out by hand or read back from
    /// disk. Only the dimensions are checked here.
    pub fn from_grid(grid: CellGrid) -> Result<Self, MazeError> {
        if grid.rows() != grid.cols() {
            return Err(MazeError::InvalidSize { size: grid.rows() });
        }
        maker::validate_size(grid.rows())?;

        Ok(Self { grid })
    }

    pub fn size(&self) -> usize {
        self.grid.rows()
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn escape(&mut self) -> Result<(), MazeError> {
        solver::escape(&mut self.grid)
    }

    pub fn escape_with_rng<R: Rng>(&mut self, rng: &mut R) -> Result<(), MazeError> {
        solver::escape_with_rng(&mut self.grid, rng)
    }

    pub fn unmark_escape(&mut self) {
        self.grid.unmark_escape();
    }

    pub fn is_marked(&self) -> bool {
        self.grid.cells().any(|cell| cell.is_on_escape_path())
    }

    /// A copy with no escape marks or solver scratch, safe to persist.
    pub fn snapshot(&self) -> Maze {
        let mut copy = self.clone();
        copy.grid.reset_solver_state();
        copy
    }

    pub fn render(&self) -> Vec<String> {
        render::rows(&self.grid)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render().join("\n"))
    }
}
