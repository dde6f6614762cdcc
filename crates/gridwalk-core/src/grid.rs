//! The [`Grid`] type: an immutable snapshot of blocked flags.
//!
//! This is what the search engine receives: a rectangular matrix of
//! open/blocked cells, independent of start/goal markers or any
//! presentation state.

use std::fmt;
use std::str::FromStr;

use crate::geom::{Bounds, Coord};

/// A rectangular matrix of blocked flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    bounds: Bounds,
    blocked: Vec<bool>,
}

impl Grid {
    /// Create a grid with every cell open.
    pub fn open(rows: i32, cols: i32) -> Self {
        let bounds = Bounds::new(rows, cols);
        Self {
            bounds,
            blocked: vec![false; bounds.len()],
        }
    }

    /// Build a grid from rows of 0/1 flags. Any non-zero value is blocked.
    ///
    /// All rows must have the same length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut blocked = Vec::with_capacity(rows.len() * width);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
            blocked.extend(row.iter().map(|&v| v != 0));
        }
        let rows = i32::try_from(rows.len()).map_err(|_| GridError::TooLarge)?;
        let cols = i32::try_from(width).map_err(|_| GridError::TooLarge)?;
        let bounds = Bounds::new(rows, if rows == 0 { 0 } else { cols });
        blocked.truncate(bounds.len());
        Ok(Self { bounds, blocked })
    }

    /// Return a copy with the given coordinates blocked. Out-of-bounds
    /// coordinates are ignored.
    pub fn with_blocked(mut self, coords: impl IntoIterator<Item = Coord>) -> Self {
        for p in coords {
            if let Some(i) = self.bounds.idx(p) {
                self.blocked[i] = true;
            }
        }
        self
    }

    /// Dimensions of the grid.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Coord) -> bool {
        self.bounds.contains(p)
    }

    /// Whether `p` is a wall. Out-of-bounds coordinates report `false`.
    #[inline]
    pub fn is_blocked(&self, p: Coord) -> bool {
        self.bounds.idx(p).is_some_and(|i| self.blocked[i])
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_open(&self, p: Coord) -> bool {
        self.bounds.idx(p).is_some_and(|i| !self.blocked[i])
    }

    /// Number of open cells.
    pub fn open_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| !b).count()
    }

    /// Back to the 0/1 row form.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        let cols = self.bounds.cols.max(0) as usize;
        if cols == 0 {
            return vec![Vec::new(); self.bounds.rows.max(0) as usize];
        }
        self.blocked
            .chunks(cols)
            .map(|row| row.iter().map(|&b| u8::from(b)).collect())
            .collect()
    }
}

/// `#` for walls, `.` for open cells, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.bounds.rows {
            for c in 0..self.bounds.cols {
                let ch = if self.is_blocked(Coord::new(r, c)) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the [`Display`](fmt::Display) form. Blank lines and surrounding
/// whitespace are ignored; any character other than `#` is open.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<u8>> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().map(|ch| u8::from(ch == '#')).collect())
            .collect();
        Self::from_rows(&rows)
    }
}

/// Errors that can occur when building a grid or board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Dimensions do not fit in an `i32`.
    TooLarge,
    /// A marker lies outside the grid.
    OutOfBounds { what: &'static str, coord: Coord },
    /// Start and goal were given the same cell.
    MarkersCollide(Coord),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::TooLarge => f.write_str("grid: dimensions too large"),
            Self::OutOfBounds { what, coord } => {
                write!(f, "grid: {what} ({coord}) is outside the grid")
            }
            Self::MarkersCollide(p) => write!(f, "grid: start and goal both at ({p})"),
        }
    }
}

impl std::error::Error for GridError {}
