use super::grid::{Cell, CellGrid};

pub const WALL: &str = "██";
pub const PATH: &str = "  ";
pub const ESCAPE: &str = "░░";

pub fn glyph(cell: &Cell) -> &'static str {
    if cell.is_wall() {
        WALL
    } else if cell.is_on_escape_path() {
        ESCAPE
    } else {
        PATH
    }
}

pub fn rows(grid: &CellGrid) -> Vec<String> {
    grid.grid_rows()
        .map(|row| row.iter().map(glyph).collect::<String>())
        .collect()
}
