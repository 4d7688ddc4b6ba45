use std::fmt::Write;

use crate::{
    board::{Cell, Grid},
    common::{Coord, Outcome, ShotReport},
    config::BOARD_SIZE,
};

/// Column letter and 1-based row, e.g. `(0, 2)` is `C1`.
pub fn coord_to_string(r: usize, c: usize) -> String {
    let col = (b'A' + c as u8) as char;
    format!("{}{}", col, r + 1)
}

/// Parse a coordinate such as `A5` or `i9` into `(row, col)`.
pub fn parse_coord(input: &str) -> Result<Coord, String> {
    let last_col = (b'A' + BOARD_SIZE as u8 - 1) as char;
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("No column letter")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-{}", col_ch, last_col));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-{}", col_ch, last_col));
    }
    let row_str: String = chars.collect();
    if row_str.is_empty() {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-{}", row_str, BOARD_SIZE))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, BOARD_SIZE));
    }
    Ok((row - 1, col))
}

fn glyph(cell: Cell, reveal: bool) -> String {
    match cell {
        Cell::Unknown => "~".to_string(),
        Cell::Ship(kind) if reveal => kind.symbol().to_string(),
        Cell::Ship(_) => "~".to_string(),
        Cell::Miss => "O".to_string(),
        Cell::Hit(kind) => format!("{}X", kind.symbol()),
    }
}

/// Render a grid with column letters and row numbers. Live ship segments
/// are only shown when `reveal` is set.
pub fn render_grid(grid: &Grid, reveal: bool) -> String {
    let mut out = String::from("   ");
    for c in 0..BOARD_SIZE {
        let _ = write!(out, " {:<3}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for r in 0..BOARD_SIZE {
        let _ = write!(out, "{:2} ", r + 1);
        for c in 0..BOARD_SIZE {
            let cell = grid.get(r, c).unwrap_or_default();
            let _ = write!(out, " {:<3}", glyph(cell, reveal));
        }
        out.push('\n');
    }
    out
}

/// One-line description of an attack result.
pub fn describe_shot(coord: Coord, report: ShotReport) -> String {
    let at = coord_to_string(coord.0, coord.1);
    match report.outcome {
        Outcome::Miss => format!("{}: Miss.", at),
        Outcome::Hit(kind) if report.sunk => format!("{}: Hit and sunk the {}!", at, kind),
        Outcome::Hit(kind) => format!("{}: Hit a {}!", at, kind),
    }
}
