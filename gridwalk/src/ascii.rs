//! Plain-text rendering of a board, one character per cell.
//!
//! `S` start, `G` goal, `#` wall, `o` path, `*` visited, `.` open.

use std::fmt::Write;

use gridwalk_core::{Board, Coord};

fn glyph(board: &Board, p: Coord) -> char {
    if p == board.start() {
        return 'S';
    }
    if p == board.goal() {
        return 'G';
    }
    let s = board.at(p);
    match (s.wall, s.on_path, s.visited) {
        (true, _, _) => '#',
        (_, true, _) => 'o',
        (_, _, true) => '*',
        _ => '.',
    }
}

pub fn render(board: &Board) -> String {
    let b = board.bounds();
    let mut out = String::with_capacity(b.len() + b.rows as usize);
    for r in 0..b.rows {
        for c in 0..b.cols {
            out.push(glyph(board, Coord::new(r, c)));
        }
        out.push('\n');
    }
    let _ = write!(
        out,
        "visited {}  path {}",
        board.visited_count(),
        board.path_count()
    );
    out
}
