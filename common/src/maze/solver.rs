use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, warn};

use super::grid::{CellGrid, Coord};
use crate::error::MazeError;

/// Mark the path from the entrance to the exit using the thread-local
/// generator to choose between branches.
pub fn escape(grid: &mut CellGrid) -> Result<(), MazeError> {
    escape_with_rng(grid, &mut rand::rng())
}

pub fn escape_with_rng<R: Rng>(grid: &mut CellGrid, rng: &mut R) -> Result<(), MazeError> {
    // Locate both ends before touching any marks, so a failed call leaves the
    // grid as it found it.
    let Some(entrance) = grid.entrance() else {
        warn!("escape requested on a maze without an entrance");
        return Err(MazeError::MissingEntrance);
    };
    let Some(exit) = grid.exit() else {
        warn!("escape requested on a maze without an exit");
        return Err(MazeError::MissingExit);
    };

    grid.reset_solver_state();

    let mut solver = Solver {
        grid,
        path: Vec::new(),
        crossroads: Vec::new(),
        backtracks: 0,
    };

    match solver.run(entrance, exit, rng) {
        Ok(length) => {
            debug!(length, backtracks = solver.backtracks, "escape found");
            Ok(())
        }
        Err(error) => {
            warn!("{error}");
            solver.grid.reset_solver_state();
            Err(error)
        }
    }
}

struct Solver<'a> {
    grid: &'a mut CellGrid,
    path: Vec<Coord>,       // Trail of committed cells, in walking order.
    crossroads: Vec<Coord>, // Cells on `path` that still had a branch untried.
    backtracks: usize,
}

impl Solver<'_> {
    fn run<R: Rng>(
        &mut self,
        entrance: Coord,
        exit: Coord,
        rng: &mut R,
    ) -> Result<usize, MazeError> {
        let mut current = entrance;
        self.visit(current);
        self.mark(current, true);

        while current != exit {
            let candidates = self.unvisited_paths(current);

            match candidates.as_slice() {
                [] => {
                    if self.crossroads.last() == Some(&current) {
                        self.crossroads.pop();
                    }
                    self.mark(current, false);
                    current = self.backtrack()?;
                }
                [next] => {
                    if self.crossroads.last() == Some(&current) {
                        self.crossroads.pop();
                    }
                    current = self.advance(current, *next);
                }
                _ => {
                    if self.crossroads.last() != Some(&current) {
                        self.crossroads.push(current);
                    }

                    let next = if candidates.contains(&exit) {
                        exit
                    } else {
                        *candidates
                            .choose(rng)
                            .ok_or(MazeError::Unreachable)?
                    };
                    current = self.advance(current, next);
                }
            }
        }

        self.mark(exit, true);
        self.path.push(exit);

        Ok(self.path.len())
    }

    fn unvisited_paths(&self, coord: Coord) -> Vec<Coord> {
        self.grid
            .path_neighbors(coord)
            .filter(|&n| self.grid.cell(n).is_some_and(|cell| !cell.is_visited()))
            .collect()
    }

    fn advance(&mut self, from: Coord, to: Coord) -> Coord {
        self.mark(from, true);
        self.path.push(from);
        self.visit(to);
        to
    }

    /// Unwind the trail to the most recent crossroad. Every cell popped on
    /// the way loses its mark; the crossroad is marked again when the walk
    /// leaves it through another branch.
    fn backtrack(&mut self) -> Result<Coord, MazeError> {
        let crossroad = *self.crossroads.last().ok_or(MazeError::Unreachable)?;
        self.backtracks += 1;

        while let Some(popped) = self.path.pop() {
            self.mark(popped, false);
            if popped == crossroad {
                return Ok(crossroad);
            }
        }

        Err(MazeError::Unreachable)
    }

    fn visit(&mut self, coord: Coord) {
        if let Some(cell) = self.grid.cell_mut(coord) {
            cell.set_visited(true);
        }
    }

    fn mark(&mut self, coord: Coord, on_escape_path: bool) {
        if let Some(cell) = self.grid.cell_mut(coord) {
            cell.set_on_escape_path(on_escape_path);
        }
    }
}
