use strum::{EnumIter, IntoEnumIterator};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    /// Both coordinates even: part of the fixed lattice of walls that keeps
    /// every passage one cell wide.
    pub fn is_pillar(&self) -> bool {
        self.row % 2 == 0 && self.col % 2 == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Wall,
    Path,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    kind: Kind,
    visited: bool, // Solver scratch, reset at the start of every solve.
    on_escape_path: bool,
}

impl Cell {
    fn new(coord: Coord) -> Self {
        Cell {
            coord,
            kind: Kind::Wall,
            visited: false,
            on_escape_path: false,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_path(&self) -> bool {
        self.kind == Kind::Path
    }

    pub fn is_wall(&self) -> bool {
        self.kind == Kind::Wall
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn is_on_escape_path(&self) -> bool {
        self.on_escape_path
    }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub(crate) fn set_on_escape_path(&mut self, on_escape_path: bool) {
        self.on_escape_path = on_escape_path;
    }
}

/// Flat, row-major arena of cells. Cells never point at each other: every
/// adjacency question goes through the grid by coordinate, and anything off
/// the edge is simply absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// A grid where every cell starts as a wall.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(Coord::new(row, col)));
            }
        }

        CellGrid { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord).then(|| coord.row * self.cols + coord.col)
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).map(|i| &self.cells[i])
    }

    pub(crate) fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.index(coord).map(|i| &mut self.cells[i])
    }

    pub fn kind(&self, coord: Coord) -> Option<Kind> {
        self.cell(coord).map(Cell::kind)
    }

    /// `false` for walls and for coordinates outside the grid.
    pub fn is_path(&self, coord: Coord) -> bool {
        self.kind(coord) == Some(Kind::Path)
    }

    /// Returns `false` if `coord` is outside the grid.
    pub fn set_kind(&mut self, coord: Coord, kind: Kind) -> bool {
        match self.cell_mut(coord) {
            Some(cell) => {
                cell.kind = kind;
                true
            }
            None => false,
        }
    }

    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let (dr, dc) = direction.offset();
        let row = coord.row.checked_add_signed(dr)?;
        let col = coord.col.checked_add_signed(dc)?;
        let neighbor = Coord::new(row, col);

        self.contains(neighbor).then_some(neighbor)
    }

    /// In-bounds neighbors in the order up, down, left, right.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::iter().filter_map(move |direction| self.neighbor(coord, direction))
    }

    pub fn path_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.neighbors(coord).filter(move |&n| self.is_path(n))
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn grid_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1))
    }

    fn column_paths(&self, col: usize) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows)
            .map(move |row| Coord::new(row, col))
            .filter(move |&coord| self.is_path(coord))
    }

    /// First path cell on the leftmost column.
    pub fn entrance(&self) -> Option<Coord> {
        self.column_paths(0).next()
    }

    /// First path cell on the rightmost column.
    pub fn exit(&self) -> Option<Coord> {
        let last = self.cols.checked_sub(1)?;
        self.column_paths(last).next()
    }

    pub fn path_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_path()).count()
    }

    /// Number of adjacent path-path pairs, each counted once.
    pub fn path_edge_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.is_path())
            .map(|cell| {
                [Direction::Down, Direction::Right]
                    .into_iter()
                    .filter_map(|direction| self.neighbor(cell.coord, direction))
                    .filter(|&n| self.is_path(n))
                    .count()
            })
            .sum()
    }

    pub fn escape_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .filter(|cell| cell.on_escape_path)
            .map(Cell::coord)
            .collect()
    }

    pub fn unmark_escape(&mut self) {
        for cell in &mut self.cells {
            cell.on_escape_path = false;
        }
    }

    pub(crate) fn reset_solver_state(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
            cell.on_escape_path = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_walls_with_fixed_coordinates() {
        let grid = CellGrid::new(3, 4);

        assert_eq!(grid.cells().count(), 12);
        assert!(grid.cells().all(Cell::is_wall));
        assert_eq!(
            grid.cell(Coord::new(2, 3)).map(Cell::coord),
            Some(Coord::new(2, 3))
        );
    }

    #[test]
    fn lookups_outside_the_grid_are_absent() {
        let grid = CellGrid::new(5, 5);

        assert!(grid.cell(Coord::new(5, 0)).is_none());
        assert!(grid.neighbor(Coord::new(0, 0), Direction::Up).is_none());
        assert!(grid.neighbor(Coord::new(0, 0), Direction::Left).is_none());
        assert!(grid.neighbor(Coord::new(4, 4), Direction::Right).is_none());
        assert!(!grid.is_path(Coord::new(9, 9)));
    }

    #[test]
    fn corner_has_two_neighbors_and_center_has_four() {
        let grid = CellGrid::new(5, 5);

        assert_eq!(grid.neighbors(Coord::new(0, 0)).count(), 2);
        assert_eq!(grid.neighbors(Coord::new(2, 2)).count(), 4);
        assert_eq!(
            grid.neighbors(Coord::new(2, 2)).collect::<Vec<_>>(),
            vec![
                Coord::new(1, 2),
                Coord::new(3, 2),
                Coord::new(2, 1),
                Coord::new(2, 3)
            ]
        );
    }

    #[test]
    fn set_kind_outside_the_grid_is_rejected() {
        let mut grid = CellGrid::new(3, 3);

        assert!(!grid.set_kind(Coord::new(3, 1), Kind::Path));
        assert!(grid.set_kind(Coord::new(1, 1), Kind::Path));
        assert!(grid.is_path(Coord::new(1, 1)));
    }

    #[test]
    fn edges_are_counted_once_per_adjacent_pair() {
        let mut grid = CellGrid::new(3, 3);
        for col in 0..3 {
            grid.set_kind(Coord::new(1, col), Kind::Path);
        }
        grid.set_kind(Coord::new(2, 1), Kind::Path);

        assert_eq!(grid.path_cell_count(), 4);
        assert_eq!(grid.path_edge_count(), 3);
    }

    #[test]
    fn entrance_and_exit_are_found_on_the_side_columns() {
        let mut grid = CellGrid::new(5, 5);
        grid.set_kind(Coord::new(3, 0), Kind::Path);
        grid.set_kind(Coord::new(1, 4), Kind::Path);

        assert_eq!(grid.entrance(), Some(Coord::new(3, 0)));
        assert_eq!(grid.exit(), Some(Coord::new(1, 4)));
    }

    #[test]
    fn cloned_grid_owns_its_cells() {
        let mut original = CellGrid::new(3, 3);
        let mut copy = original.clone();

        copy.set_kind(Coord::new(1, 1), Kind::Path);
        if let Some(cell) = copy.cell_mut(Coord::new(1, 1)) {
            cell.set_on_escape_path(true);
        }

        assert!(original.cell(Coord::new(1, 1)).is_some_and(Cell::is_wall));
        assert!(original.escape_cells().is_empty());

        original.set_kind(Coord::new(0, 0), Kind::Path);
        assert!(!copy.is_path(Coord::new(0, 0)));
    }

    #[test]
    fn pillars_have_two_even_coordinates() {
        assert!(Coord::new(0, 0).is_pillar());
        assert!(Coord::new(4, 2).is_pillar());
        assert!(!Coord::new(1, 2).is_pillar());
        assert!(!Coord::new(3, 3).is_pillar());
    }
}
