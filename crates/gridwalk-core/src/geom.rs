//! Geometry primitives: [`Coord`] and [`Bounds`].
//!
//! Coordinates are `(row, column)` pairs, 0-indexed, with rows growing
//! downwards. A [`Bounds`] is the half-open rectangle `[0, rows) × [0, cols)`
//! of a grid and owns the flat-index mapping used by every per-cell table.

use std::fmt;
use std::num::ParseIntError;
use std::ops::{Add, Sub};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A grid coordinate. Two coordinates are the same node iff both `r` and `c`
/// are equal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub r: i32,
    pub c: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { r: 0, c: 0 };

    /// Orthogonal moves in expansion order: down, up, right, left.
    ///
    /// The order decides BFS tie-breaks and which branch DFS commits to.
    pub const DIRS: [Coord; 4] = [
        Coord::new(1, 0),
        Coord::new(-1, 0),
        Coord::new(0, 1),
        Coord::new(0, -1),
    ];

    /// Create a new coordinate.
    #[inline]
    pub const fn new(r: i32, c: i32) -> Self {
        Self { r, c }
    }

    /// Return a coordinate shifted by (dr, dc).
    #[inline]
    pub const fn shift(self, dr: i32, dc: i32) -> Self {
        Self {
            r: self.r + dr,
            c: self.c + dc,
        }
    }

    /// The four orthogonal neighbours in [`DIRS`](Self::DIRS) order. Some of
    /// them may lie outside any particular grid.
    #[inline]
    pub fn neighbors_4(self) -> [Coord; 4] {
        Self::DIRS.map(|d| self + d)
    }

    /// Whether `other` is one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        (self.r - other.r).abs() + (self.c - other.c).abs() == 1
    }
}

// --- trait impls for Coord ---

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.r.cmp(&other.r).then(self.c.cmp(&other.c))
    }
}

/// Canonical key form `"r,c"`.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.r, self.c)
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((r, c)) = s.split_once(',') else {
            return Err(CoordParseError::MissingComma(s.to_string()));
        };
        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|source| CoordParseError::BadInteger {
                    input: s.to_string(),
                    source,
                })
        };
        Ok(Self::new(parse(r)?, parse(c)?))
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.c + rhs.c)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.r - rhs.r, self.c - rhs.c)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((r, c): (i32, i32)) -> Self {
        Self::new(r, c)
    }
}

/// Errors from parsing the `"r,c"` key form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    MissingComma(String),
    BadInteger {
        input: String,
        source: ParseIntError,
    },
}

impl fmt::Display for CoordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingComma(s) => write!(f, "coordinate key \u{201c}{s}\u{201d} has no comma"),
            Self::BadInteger { input, source } => {
                write!(f, "coordinate key \u{201c}{input}\u{201d}: {source}")
            }
        }
    }
}

impl std::error::Error for CoordParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BadInteger { source, .. } => Some(source),
            Self::MissingComma(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Dimensions of a grid: the half-open rectangle `[0, rows) × [0, cols)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub rows: i32,
    pub cols: i32,
}

impl Bounds {
    /// Create new bounds. Negative dimensions are clamped to zero.
    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: if rows < 0 { 0 } else { rows },
            cols: if cols < 0 { 0 } else { cols },
        }
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether the bounds have zero area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `p` lies inside.
    #[inline]
    pub fn contains(self, p: Coord) -> bool {
        p.r >= 0 && p.r < self.rows && p.c >= 0 && p.c < self.cols
    }

    /// Flat row-major index `r * cols + c`. Returns `None` if out of bounds.
    #[inline]
    pub fn idx(self, p: Coord) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.r as usize * self.cols as usize + p.c as usize)
    }

    /// Convert a flat index back to a `Coord`.
    #[inline]
    pub fn coord(self, idx: usize) -> Coord {
        let cols = self.cols.max(1) as usize;
        Coord::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Row-major iterator over every coordinate.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            next: 0,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Coord;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

// ---------------------------------------------------------------------------
// BoundsIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the coordinates in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    next: usize,
}

impl Iterator for BoundsIter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.next >= self.bounds.len() {
            return None;
        }
        let p = self.bounds.coord(self.next);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bounds.len().saturating_sub(self.next);
        (n, Some(n))
    }
}

impl ExactSizeIterator for BoundsIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_arithmetic() {
        let a = Coord::new(1, 2);
        let b = Coord::new(3, 4);
        assert_eq!(a + b, Coord::new(4, 6));
        assert_eq!(b - a, Coord::new(2, 2));
        assert_eq!(a.shift(-1, 1), Coord::new(0, 3));
    }

    #[test]
    fn neighbors_follow_down_up_right_left() {
        let n = Coord::new(5, 5).neighbors_4();
        assert_eq!(
            n,
            [
                Coord::new(6, 5),
                Coord::new(4, 5),
                Coord::new(5, 6),
                Coord::new(5, 4),
            ]
        );
        assert!(n.iter().all(|&p| p.is_adjacent(Coord::new(5, 5))));
    }

    #[test]
    fn key_form_round_trips() {
        let p = Coord::new(12, 18);
        assert_eq!(p.to_string(), "12,18");
        assert_eq!("12,18".parse::<Coord>().unwrap(), p);
        assert_eq!(" 3 , -4 ".parse::<Coord>().unwrap(), Coord::new(3, -4));
    }

    #[test]
    fn key_form_rejects_garbage() {
        assert!(matches!(
            "12".parse::<Coord>(),
            Err(CoordParseError::MissingComma(_))
        ));
        assert!(matches!(
            "a,1".parse::<Coord>(),
            Err(CoordParseError::BadInteger { .. })
        ));
        assert!("1,2,3".parse::<Coord>().is_err());
    }

    #[test]
    fn coord_order_is_row_major() {
        let mut v = vec![Coord::new(1, 0), Coord::new(0, 2), Coord::new(0, 1)];
        v.sort();
        assert_eq!(v, vec![Coord::new(0, 1), Coord::new(0, 2), Coord::new(1, 0)]);
    }

    #[test]
    fn bounds_index_round_trip() {
        let b = Bounds::new(3, 4);
        assert_eq!(b.len(), 12);
        assert_eq!(b.idx(Coord::new(2, 3)), Some(11));
        assert_eq!(b.coord(11), Coord::new(2, 3));
        assert_eq!(b.idx(Coord::new(3, 0)), None);
        assert_eq!(b.idx(Coord::new(0, -1)), None);
    }

    #[test]
    fn bounds_iter_is_row_major() {
        let b = Bounds::new(2, 2);
        let v: Vec<_> = b.iter().collect();
        assert_eq!(
            v,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 1),
            ]
        );
        assert_eq!(b.iter().len(), 4);
    }

    #[test]
    fn empty_bounds() {
        let b = Bounds::new(0, 5);
        assert!(b.is_empty());
        assert_eq!(b.iter().count(), 0);
        assert!(!b.contains(Coord::ZERO));
        assert_eq!(Bounds::new(-2, 3), Bounds::new(0, 3));
    }
}
