use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use gridwalk_core::{Bounds, Coord, Grid};

use crate::neighbors::Neighbors;
use crate::parent::ParentMap;
use crate::path::{PathOutcome, reconstruct_path};
use crate::traits::Frontier;

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// Which frontier discipline to search with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// Breadth-first: FIFO frontier, shortest paths.
    #[default]
    Bfs,
    /// Depth-first: LIFO frontier.
    Dfs,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
        })
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// A strategy name other than `bfs` or `dfs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown search strategy \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for UnknownStrategy {}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

/// Everything one search produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Traversal {
    pub strategy: Strategy,
    pub start: Coord,
    pub goal: Coord,
    /// Nodes in the order they were taken off the frontier.
    pub visited_order: Vec<Coord>,
    pub parent: ParentMap,
    /// Whether the last visited node is the goal.
    pub reached_goal: bool,
}

impl Traversal {
    /// Reconstruct the start-to-goal path from the parent map.
    pub fn path(&self) -> PathOutcome {
        reconstruct_path(&self.parent, self.start, self.goal)
    }
}

// ---------------------------------------------------------------------------
// SearchError
// ---------------------------------------------------------------------------

/// Which endpoint a [`SearchError`] is about.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Goal => "goal",
        })
    }
}

/// Caller contract violations detected before searching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    OutOfBounds {
        endpoint: Endpoint,
        coord: Coord,
        bounds: Bounds,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                endpoint,
                coord,
                bounds,
            } => write!(f, "{endpoint} ({coord}) is outside the {bounds} grid"),
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Runs traversals, reusing its scratch buffers between calls.
///
/// Reuse never affects results: the same grid, endpoints and strategy
/// always produce the same [`Traversal`].
pub struct Searcher {
    // seen stamps, valid when equal to `generation`
    seen: Vec<u32>,
    generation: u32,
    queue: VecDeque<usize>,
    stack: Vec<usize>,
    nbuf: Neighbors,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    pub fn new() -> Self {
        Self {
            seen: Vec::new(),
            generation: 0,
            queue: VecDeque::new(),
            stack: Vec::new(),
            nbuf: Neighbors::new(),
        }
    }

    /// Search `grid` from `start` until `goal` is taken off the frontier or
    /// the frontier runs dry.
    ///
    /// `start` is always visited and expanded, even if it is a wall. Both
    /// endpoints must lie inside the grid.
    pub fn traverse(
        &mut self,
        grid: &Grid,
        start: Coord,
        goal: Coord,
        strategy: Strategy,
    ) -> Result<Traversal, SearchError> {
        let bounds = grid.bounds();
        for (endpoint, coord) in [(Endpoint::Start, start), (Endpoint::Goal, goal)] {
            if !bounds.contains(coord) {
                return Err(SearchError::OutOfBounds {
                    endpoint,
                    coord,
                    bounds,
                });
            }
        }

        self.prepare(bounds);

        let t = match strategy {
            Strategy::Bfs => {
                let mut queue = std::mem::take(&mut self.queue);
                let t = self.run(&mut queue, grid, start, goal, strategy);
                self.queue = queue;
                t
            }
            Strategy::Dfs => {
                let mut stack = std::mem::take(&mut self.stack);
                let t = self.run(&mut stack, grid, start, goal, strategy);
                self.stack = stack;
                t
            }
        };

        log::debug!(
            "{strategy} {start} -> {goal} on {bounds}: visited {}, discovered {}, goal {}",
            t.visited_order.len(),
            t.parent.len(),
            if t.reached_goal { "reached" } else { "unreachable" },
        );
        Ok(t)
    }

    /// Bump the generation so stale seen stamps are ignored, growing the
    /// stamp table if needed.
    fn prepare(&mut self, bounds: Bounds) {
        if self.seen.len() < bounds.len() {
            self.seen.resize(bounds.len(), 0);
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.seen.fill(0);
            self.generation = 1;
        }
    }

    fn run<F: Frontier>(
        &mut self,
        frontier: &mut F,
        grid: &Grid,
        start: Coord,
        goal: Coord,
        strategy: Strategy,
    ) -> Traversal {
        let bounds = grid.bounds();
        let cur_gen = self.generation;
        let mut parent = ParentMap::new(bounds);
        let mut visited_order = Vec::new();
        let mut reached_goal = false;

        // Bounds were checked by the caller.
        let (Some(si), Some(gi)) = (bounds.idx(start), bounds.idx(goal)) else {
            return Traversal {
                strategy,
                start,
                goal,
                visited_order,
                parent,
                reached_goal,
            };
        };

        frontier.clear();
        frontier.push(si);
        self.seen[si] = cur_gen;

        while let Some(ui) = frontier.pop() {
            let u = bounds.coord(ui);
            visited_order.push(u);
            if ui == gi {
                reached_goal = true;
                break;
            }

            for &v in self.nbuf.cardinal(u, |p| grid.is_open(p)) {
                let Some(vi) = bounds.idx(v) else {
                    continue;
                };
                if self.seen[vi] == cur_gen {
                    continue;
                }
                self.seen[vi] = cur_gen;
                parent.insert_idx(vi, ui);
                frontier.push(vi);
            }
        }

        Traversal {
            strategy,
            start,
            goal,
            visited_order,
            parent,
            reached_goal,
        }
    }
}

/// One-shot traversal with a fresh [`Searcher`].
pub fn traverse(
    grid: &Grid,
    start: Coord,
    goal: Coord,
    strategy: Strategy,
) -> Result<Traversal, SearchError> {
    Searcher::new().traverse(grid, start, goal, strategy)
}
