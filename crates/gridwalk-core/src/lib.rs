//! **gridwalk-core**: grid model for the gridwalk search visualizer.
//!
//! This crate provides the types shared across the *gridwalk* workspace:
//! coordinates and bounds, the immutable blocked-flag [`Grid`] the search
//! engine consumes, and the editable [`Board`] the user paints on.

pub mod board;
pub mod geom;
pub mod grid;

pub use board::{Board, BoardConfig, CellState, Placement};
pub use geom::{Bounds, BoundsIter, Coord, CoordParseError};
pub use grid::{Grid, GridError};
