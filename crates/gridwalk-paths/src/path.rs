//! Path reconstruction by walking parent pointers back from the goal.

use gridwalk_core::Coord;

use crate::parent::ParentMap;

/// A start-to-goal path, inclusive of both endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path(Vec<Coord>);

impl Path {
    /// All coordinates, start first.
    #[inline]
    pub fn coords(&self) -> &[Coord] {
        &self.0
    }

    /// Number of nodes (edges + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: a path holds at least its start.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of moves.
    #[inline]
    pub fn edges(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn start(&self) -> Coord {
        self.0[0]
    }

    pub fn goal(&self) -> Coord {
        self.0[self.0.len() - 1]
    }

    /// The cells strictly between start and goal.
    pub fn interior(&self) -> &[Coord] {
        if self.0.len() <= 2 {
            return &[];
        }
        &self.0[1..self.0.len() - 1]
    }

    pub fn contains(&self, p: Coord) -> bool {
        self.0.contains(&p)
    }

    pub fn into_vec(self) -> Vec<Coord> {
        self.0
    }
}

/// Result of [`reconstruct_path`]. An unreachable goal is a normal outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathOutcome {
    Found(Path),
    Unreachable,
}

impl PathOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::Unreachable => None,
        }
    }
}

/// Walk `parent` back from `goal` to `start`.
///
/// `start == goal` yields the one-node path `[start]`. A goal without a
/// parent entry is [`Unreachable`](PathOutcome::Unreachable), as is a chain
/// that ends or loops before reaching `start` (only possible with a map
/// that did not come from a search).
pub fn reconstruct_path(parent: &ParentMap, start: Coord, goal: Coord) -> PathOutcome {
    if start == goal {
        return PathOutcome::Found(Path(vec![start]));
    }
    if !parent.contains(goal) {
        return PathOutcome::Unreachable;
    }

    let limit = parent.len() + 1;
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        let Some(p) = parent.get(cur) else {
            log::warn!("parent chain from {goal} ends at {cur} before reaching {start}");
            return PathOutcome::Unreachable;
        };
        path.push(p);
        if path.len() > limit {
            log::warn!("parent chain from {goal} loops without reaching {start}");
            return PathOutcome::Unreachable;
        }
        cur = p;
    }
    path.reverse();
    PathOutcome::Found(Path(path))
}
