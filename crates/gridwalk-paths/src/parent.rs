//! The search tree as a flat parent table.

use std::collections::BTreeMap;
use std::fmt;

use gridwalk_core::{Bounds, Coord, CoordParseError};

/// Sentinel meaning "no parent" (undiscovered, or the search root).
const NO_PARENT: usize = usize::MAX;

/// Per-node record of which node first discovered it.
///
/// Stored as a flat array indexed by `r * cols + c`. Each node gets at most
/// one entry and the first discoverer wins; the start node never has one.
#[derive(Clone, PartialEq, Eq)]
pub struct ParentMap {
    bounds: Bounds,
    parent: Vec<usize>,
    len: usize,
}

impl ParentMap {
    /// Create an empty map for a grid of the given dimensions.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            parent: vec![NO_PARENT; bounds.len()],
            len: 0,
        }
    }

    /// Dimensions of the underlying grid.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Record `parent` as the discoverer of `child`.
    ///
    /// Returns `false` (and changes nothing) if `child` already has a parent
    /// or either coordinate is outside the grid.
    pub fn insert(&mut self, child: Coord, parent: Coord) -> bool {
        let (Some(ci), Some(pi)) = (self.bounds.idx(child), self.bounds.idx(parent)) else {
            return false;
        };
        self.insert_idx(ci, pi)
    }

    #[inline]
    pub(crate) fn insert_idx(&mut self, child: usize, parent: usize) -> bool {
        if self.parent[child] != NO_PARENT {
            return false;
        }
        self.parent[child] = parent;
        self.len += 1;
        true
    }

    /// The node that discovered `child`, if any.
    pub fn get(&self, child: Coord) -> Option<Coord> {
        let i = self.bounds.idx(child)?;
        match self.parent[i] {
            NO_PARENT => None,
            pi => Some(self.bounds.coord(pi)),
        }
    }

    /// Whether `child` has an entry.
    #[inline]
    pub fn contains(&self, child: Coord) -> bool {
        self.get(child).is_some()
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `(child, parent)` pairs in row-major order of the child.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p != NO_PARENT)
            .map(|(c, &p)| (self.bounds.coord(c), self.bounds.coord(p)))
    }

    /// The wire form: `"r,c"` keys mapped to `"r,c"` values.
    pub fn to_keyed(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(child, parent)| (child.to_string(), parent.to_string()))
            .collect()
    }

    /// Rebuild a map from its wire form.
    pub fn from_keyed<'a, I>(bounds: Bounds, entries: I) -> Result<Self, ParentMapError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut map = Self::new(bounds);
        for (k, v) in entries {
            let child: Coord = k.parse().map_err(ParentMapError::Key)?;
            let parent: Coord = v.parse().map_err(ParentMapError::Key)?;
            for p in [child, parent] {
                if !bounds.contains(p) {
                    return Err(ParentMapError::OutOfBounds(p));
                }
            }
            if !map.insert(child, parent) {
                return Err(ParentMapError::Duplicate(child));
            }
        }
        Ok(map)
    }
}

impl fmt::Debug for ParentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(c, p)| (c.to_string(), p.to_string())))
            .finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ParentMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_keyed(), serializer)
    }
}

/// Errors from rebuilding a [`ParentMap`] out of its wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentMapError {
    Key(CoordParseError),
    OutOfBounds(Coord),
    /// Two keys named the same node.
    Duplicate(Coord),
}

impl fmt::Display for ParentMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(e) => write!(f, "parent map: {e}"),
            Self::OutOfBounds(p) => write!(f, "parent map: ({p}) is outside the grid"),
            Self::Duplicate(p) => write!(f, "parent map: ({p}) listed twice"),
        }
    }
}

impl std::error::Error for ParentMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Key(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_discoverer_wins() {
        let mut m = ParentMap::new(Bounds::new(3, 3));
        assert!(m.insert(Coord::new(1, 1), Coord::new(0, 1)));
        assert!(!m.insert(Coord::new(1, 1), Coord::new(1, 0)));
        assert_eq!(m.get(Coord::new(1, 1)), Some(Coord::new(0, 1)));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn outside_is_ignored() {
        let mut m = ParentMap::new(Bounds::new(2, 2));
        assert!(!m.insert(Coord::new(2, 0), Coord::new(1, 0)));
        assert!(m.is_empty());
        assert_eq!(m.get(Coord::new(-1, 0)), None);
    }

    #[test]
    fn keyed_form() {
        let mut m = ParentMap::new(Bounds::new(3, 3));
        m.insert(Coord::new(1, 0), Coord::new(0, 0));
        m.insert(Coord::new(0, 1), Coord::new(0, 0));
        let keyed = m.to_keyed();
        assert_eq!(keyed.get("1,0").map(String::as_str), Some("0,0"));
        assert_eq!(keyed.get("0,1").map(String::as_str), Some("0,0"));

        let back = ParentMap::from_keyed(
            m.bounds(),
            keyed.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
        .unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn from_keyed_rejects_bad_entries() {
        let b = Bounds::new(2, 2);
        assert!(matches!(
            ParentMap::from_keyed(b, [("x", "0,0")]),
            Err(ParentMapError::Key(_))
        ));
        assert_eq!(
            ParentMap::from_keyed(b, [("0,1", "5,5")]),
            Err(ParentMapError::OutOfBounds(Coord::new(5, 5)))
        );
        assert_eq!(
            ParentMap::from_keyed(b, [("0,1", "0,0"), ("0, 1", "1,1")]),
            Err(ParentMapError::Duplicate(Coord::new(0, 1)))
        );
    }
}
