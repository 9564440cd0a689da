use rand::Rng;
use tracing::debug;

use super::grid::{CellGrid, Coord, Direction, Kind};
use super::{MAX_SIZE, MIN_SIZE};
use crate::error::MazeError;

pub fn validate_size(size: usize) -> Result<usize, MazeError> {
    if size % 2 == 0 || !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(MazeError::InvalidSize { size });
    }

    Ok(size)
}

/// Build a perfect maze of `size` x `size` cells using the thread-local
/// generator.
pub fn build(size: usize) -> Result<CellGrid, MazeError> {
    build_with_rng(size, &mut rand::rng())
}

pub fn build_with_rng<R: Rng>(size: usize, rng: &mut R) -> Result<CellGrid, MazeError> {
    let size = validate_size(size)?;

    let mut maker = MazeMaker::new(size, rng);
    maker.carve();

    debug!(
        size,
        entrance = ?maker.grid.entrance(),
        exit = ?maker.grid.exit(),
        paths = maker.grid.path_cell_count(),
        "maze built"
    );

    Ok(maker.grid)
}

// Builder-only bookkeeping, kept beside the grid and dropped with the builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Fixed, // Border or pillar.
    Open,
    Queued,
    Path,
    Rejected,
}

struct MazeMaker<'a, R: Rng> {
    grid: CellGrid,
    rng: &'a mut R,
    size: usize,
    slots: Vec<Slot>,
    frontier: Vec<Coord>,
}

impl<'a, R: Rng> MazeMaker<'a, R> {
    fn new(size: usize, rng: &'a mut R) -> Self {
        let grid = CellGrid::new(size, size);
        let mut slots = Vec::with_capacity(size * size);

        for row in 0..size {
            for col in 0..size {
                let coord = Coord::new(row, col);
                // The right-hand column stays open so the carving can break
                // through it once; the other three sides are sealed from the
                // start, apart from the entrance picked below.
                let fixed = row == 0 || row == size - 1 || col == 0 || coord.is_pillar();
                slots.push(if fixed { Slot::Fixed } else { Slot::Open });
            }
        }

        MazeMaker {
            grid,
            rng,
            size,
            slots,
            frontier: Vec::new(),
        }
    }

    fn carve(&mut self) {
        let entrance = self.pick_entrance();
        self.set_slot(entrance, Slot::Queued);
        self.frontier.push(entrance);

        while let Some(candidate) = self.frontier.pop() {
            // Sealed after it was queued: another cell became the exit.
            if self.slot(candidate) != Slot::Queued {
                continue;
            }

            if self.would_join_segments(candidate) {
                self.set_slot(candidate, Slot::Rejected);
                continue;
            }

            self.commit(candidate);
            if candidate.col == self.size - 1 {
                self.seal_exit_column(candidate);
            }

            let first_new = self.frontier.len();
            for neighbor in self.open_neighbors(candidate) {
                if self.has_other_path_neighbor(neighbor, candidate) {
                    self.set_slot(neighbor, Slot::Rejected);
                } else {
                    self.set_slot(neighbor, Slot::Queued);
                    self.frontier.push(neighbor);
                }
            }

            self.promote_random(first_new);
        }
    }

    /// Entrance rows are odd so the entrance never sits on a pillar.
    fn pick_entrance(&mut self) -> Coord {
        let odd_rows = (self.size - 1) / 2;
        let row = 2 * self.rng.random_range(0..odd_rows) + 1;
        Coord::new(row, 0)
    }

    fn slot(&self, coord: Coord) -> Slot {
        self.slots[coord.row * self.size + coord.col]
    }

    fn set_slot(&mut self, coord: Coord, slot: Slot) {
        self.slots[coord.row * self.size + coord.col] = slot;
    }

    fn commit(&mut self, coord: Coord) {
        self.set_slot(coord, Slot::Path);
        self.grid.set_kind(coord, Kind::Path);
    }

    fn is_path_towards(&self, coord: Coord, direction: Direction) -> bool {
        self.grid
            .neighbor(coord, direction)
            .is_some_and(|n| self.grid.is_path(n))
    }

    /// Opening `coord` would link two paths that are already connected
    /// through the rest of the maze.
    fn would_join_segments(&self, coord: Coord) -> bool {
        let horizontal = self.is_path_towards(coord, Direction::Left)
            && self.is_path_towards(coord, Direction::Right);
        let vertical = self.is_path_towards(coord, Direction::Up)
            && self.is_path_towards(coord, Direction::Down);

        horizontal || vertical
    }

    fn has_other_path_neighbor(&self, coord: Coord, from: Coord) -> bool {
        self.grid.path_neighbors(coord).any(|n| n != from)
    }

    fn open_neighbors(&self, coord: Coord) -> Vec<Coord> {
        self.grid
            .neighbors(coord)
            .filter(|&n| self.slot(n) == Slot::Open)
            .collect()
    }

    fn seal_exit_column(&mut self, exit: Coord) {
        let col = self.size - 1;
        for row in 0..self.size {
            let coord = Coord::new(row, col);
            if coord != exit && self.slot(coord) != Slot::Fixed {
                self.set_slot(coord, Slot::Rejected);
            }
        }
    }

    /// Move one of the candidates pushed since `first_new` to the top of the
    /// frontier, so the carving continues down a random branch and the rest
    /// wait underneath for backtracking.
    fn promote_random(&mut self, first_new: usize) {
        let added = self.frontier.len() - first_new;
        if added < 2 {
            return;
        }

        let i = first_new + self.rng.random_range(0..added);
        let chosen = self.frontier.remove(i);
        self.frontier.push(chosen);
    }
}
