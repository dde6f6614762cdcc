//! Grid search for the gridwalk visualizer.
//!
//! This crate implements the two traversals the visualizer animates, both
//! over a 4-connected [`Grid`](gridwalk_core::Grid) of open/blocked cells:
//!
//! - **Breadth-first search**: FIFO frontier, shortest paths
//! - **Depth-first search**: LIFO frontier
//!
//! Both share one loop ([`Searcher::traverse`]) generic over a
//! [`Frontier`]; neighbours are always expanded down, up, right, left, so
//! results are fully deterministic. A search yields a [`Traversal`]: the
//! visitation order plus a [`ParentMap`] from which
//! [`reconstruct_path`] derives the start-to-goal [`Path`].
//!
//! [`distance_map`] provides plain BFS distances, useful as an independent
//! shortest-path oracle.

mod distance;
mod neighbors;
mod parent;
mod path;
mod search;
mod traits;

pub use distance::{DistanceMap, UNREACHABLE, distance_map, manhattan};
pub use neighbors::Neighbors;
pub use parent::{ParentMap, ParentMapError};
pub use path::{Path, PathOutcome, reconstruct_path};
pub use search::{
    Endpoint, SearchError, Searcher, Strategy, Traversal, UnknownStrategy, traverse,
};
pub use traits::Frontier;
