use std::collections::VecDeque;

use gridwalk_core::{Bounds, Coord, Grid};

use crate::neighbors::Neighbors;

/// Sentinel value meaning "unreachable" in a [`DistanceMap`].
pub const UNREACHABLE: i32 = i32::MAX;

/// Manhattan (L1) distance between two coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.r - b.r).abs() + (a.c - b.c).abs()
}

/// Unweighted shortest-path distances from one source over open cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceMap {
    bounds: Bounds,
    dist: Vec<i32>,
}

impl DistanceMap {
    /// Distance to `p`, or [`UNREACHABLE`].
    pub fn at(&self, p: Coord) -> i32 {
        self.bounds
            .idx(p)
            .map_or(UNREACHABLE, |i| self.dist[i])
    }

    /// Whether `p` was reached.
    pub fn reaches(&self, p: Coord) -> bool {
        self.at(p) != UNREACHABLE
    }

    /// Number of reached cells, the source included.
    pub fn reached(&self) -> usize {
        self.dist.iter().filter(|&&d| d != UNREACHABLE).count()
    }
}

/// Compute a breadth-first distance map from `source`.
///
/// Each step has cost 1 and only open cells are entered; the source itself
/// is at distance 0 whatever its flag. An out-of-bounds source reaches
/// nothing.
pub fn distance_map(grid: &Grid, source: Coord) -> DistanceMap {
    let bounds = grid.bounds();
    let mut dist = vec![UNREACHABLE; bounds.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();

    if let Some(si) = bounds.idx(source) {
        dist[si] = 0;
        queue.push_back(si);
    }

    let mut nbuf = Neighbors::new();
    while let Some(ci) = queue.pop_front() {
        let nd = dist[ci] + 1;
        for &np in nbuf.cardinal(bounds.coord(ci), |p| grid.is_open(p)) {
            let Some(ni) = bounds.idx(np) else {
                continue;
            };
            if dist[ni] != UNREACHABLE {
                continue;
            }
            dist[ni] = nd;
            queue.push_back(ni);
        }
    }

    DistanceMap { bounds, dist }
}
