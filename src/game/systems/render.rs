//! Text rendering of the grid.
//!
//! Draws each cell with the glyph of its looked-up style. Used by the demo
//! binary as the rendering-layer consumer of visual notifications.

use crate::game::state::GridState;
use crate::game::types::GridIndex;

const EMPTY_GLYPH: char = '.';
const UNSTYLED_GLYPH: char = '?';

/// Renders `rows` x `cols` cells, row 0 first, one line per row.
pub fn render_grid(grid: &GridState, cols: i32, rows: i32) -> String {
    let mut out = String::with_capacity((cols.max(0) * 2 * rows.max(0)) as usize);
    for row in 0..rows {
        let line: Vec<String> = (0..cols)
            .map(|col| cell_glyph(grid, GridIndex::new(col, row)).to_string())
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

fn cell_glyph(grid: &GridState, index: GridIndex) -> char {
    match grid.get_cell_state(index) {
        Some(cell) if cell.is_rendered() => grid
            .lookup_style(cell.kind, cell.activity)
            .map(|style| style.glyph)
            .unwrap_or(UNSTYLED_GLYPH),
        _ => EMPTY_GLYPH,
    }
}

pub fn print_grid(grid: &GridState, cols: i32, rows: i32) {
    print!("{}", render_grid(grid, cols, rows));
    println!();
}
