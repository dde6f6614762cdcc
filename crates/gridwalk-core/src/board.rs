//! The editor's in-memory model: walls, markers and playback flags.
//!
//! A [`Board`] is what the user paints on and what playback effects are
//! applied to. The search engine never sees it directly, only the
//! [`Grid`] produced by [`Board::snapshot`].

use crate::geom::{Bounds, Coord};
use crate::grid::{Grid, GridError};

/// Presentation flags of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellState {
    pub wall: bool,
    pub visited: bool,
    pub on_path: bool,
}

/// Configuration for creating a [`Board`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub rows: i32,
    pub cols: i32,
    pub start: Coord,
    pub goal: Coord,
}

impl BoardConfig {
    /// A `rows × cols` board with the markers on the middle row, a quarter
    /// of the width in from either side.
    pub fn with_size(rows: i32, cols: i32) -> Self {
        let mid = rows / 2;
        let inset = cols / 4;
        Self {
            rows,
            cols,
            start: Coord::new(mid, inset),
            goal: Coord::new(mid, cols - 1 - inset),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::with_size(25, 25)
    }
}

/// What a placement attempt did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    Moved,
    /// The target is outside the board or holds the other marker.
    Rejected,
}

/// Editable grid with exactly one start and one goal.
///
/// Invariants: start != goal, and neither marker sits on a wall. Boards
/// built with [`Board::replay`] hold neither.
#[derive(Clone, Debug)]
pub struct Board {
    bounds: Bounds,
    cells: Vec<CellState>,
    start: Coord,
    goal: Coord,
}

impl Board {
    /// Create an empty board with the configured markers.
    pub fn new(config: BoardConfig) -> Result<Self, GridError> {
        let bounds = Bounds::new(config.rows, config.cols);
        for (what, coord) in [("start", config.start), ("goal", config.goal)] {
            if !bounds.contains(coord) {
                return Err(GridError::OutOfBounds { what, coord });
            }
        }
        if config.start == config.goal {
            return Err(GridError::MarkersCollide(config.start));
        }
        Ok(Self {
            bounds,
            cells: vec![CellState::default(); bounds.len()],
            start: config.start,
            goal: config.goal,
        })
    }

    /// A board mirroring a search request exactly as the engine sees it.
    ///
    /// Unlike [`Board::new`], start may equal goal and markers may sit on
    /// walls. Only the endpoints' bounds are checked.
    pub fn replay(grid: &Grid, start: Coord, goal: Coord) -> Result<Self, GridError> {
        let bounds = grid.bounds();
        for (what, coord) in [("start", start), ("goal", goal)] {
            if !bounds.contains(coord) {
                return Err(GridError::OutOfBounds { what, coord });
            }
        }
        let cells = bounds
            .iter()
            .map(|p| CellState {
                wall: grid.is_blocked(p),
                ..CellState::default()
            })
            .collect();
        Ok(Self {
            bounds,
            cells,
            start,
            goal,
        })
    }

    /// Dimensions of the board.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Current start marker.
    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    /// Current goal marker.
    #[inline]
    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// Flags at `p`, or the default state outside the board.
    pub fn at(&self, p: Coord) -> CellState {
        self.bounds
            .idx(p)
            .map(|i| self.cells[i])
            .unwrap_or_default()
    }

    /// Whether `p` holds either marker.
    #[inline]
    pub fn is_marker(&self, p: Coord) -> bool {
        p == self.start || p == self.goal
    }

    /// Move the start marker to `p`. A wall under `p` is removed.
    pub fn place_start(&mut self, p: Coord) -> Placement {
        if p == self.goal {
            return Placement::Rejected;
        }
        let Some(i) = self.bounds.idx(p) else {
            return Placement::Rejected;
        };
        self.cells[i].wall = false;
        self.start = p;
        Placement::Moved
    }

    /// Move the goal marker to `p`. A wall under `p` is removed.
    pub fn place_goal(&mut self, p: Coord) -> Placement {
        if p == self.start {
            return Placement::Rejected;
        }
        let Some(i) = self.bounds.idx(p) else {
            return Placement::Rejected;
        };
        self.cells[i].wall = false;
        self.goal = p;
        Placement::Moved
    }

    /// Flip the wall flag at `p`. Markers are never walled. Returns the new
    /// flag, or `None` if nothing changed.
    pub fn toggle_wall(&mut self, p: Coord) -> Option<bool> {
        let on = !self.at(p).wall;
        self.paint_wall(p, on).then_some(on)
    }

    /// Set the wall flag at `p` while dragging. Returns whether the cell
    /// changed.
    pub fn paint_wall(&mut self, p: Coord, on: bool) -> bool {
        if self.is_marker(p) {
            return false;
        }
        let Some(i) = self.bounds.idx(p) else {
            return false;
        };
        let cell = &mut self.cells[i];
        if cell.wall == on {
            return false;
        }
        cell.wall = on;
        if on {
            cell.visited = false;
            cell.on_path = false;
        }
        true
    }

    /// The blocked-flag matrix handed to the search engine.
    pub fn snapshot(&self) -> Grid {
        let walls = self
            .bounds
            .iter()
            .zip(&self.cells)
            .filter(|(_, s)| s.wall)
            .map(|(p, _)| p);
        Grid::open(self.bounds.rows, self.bounds.cols).with_blocked(walls)
    }

    /// Flag `p` as visited. Markers and walls are left alone.
    pub fn mark_visited(&mut self, p: Coord) -> bool {
        if self.is_marker(p) {
            return false;
        }
        match self.bounds.idx(p) {
            Some(i) if !self.cells[i].wall => {
                self.cells[i].visited = true;
                true
            }
            _ => false,
        }
    }

    /// Flag every cell in `path` as on-path. Markers and walls are left
    /// alone. Returns the number of cells flagged.
    pub fn mark_path(&mut self, path: &[Coord]) -> usize {
        let mut n = 0;
        for &p in path {
            if self.is_marker(p) {
                continue;
            }
            if let Some(i) = self.bounds.idx(p) {
                if !self.cells[i].wall {
                    self.cells[i].on_path = true;
                    n += 1;
                }
            }
        }
        n
    }

    /// Clear visited and on-path flags, keeping walls and markers.
    pub fn reset_visited(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
            cell.on_path = false;
        }
    }

    /// Clear walls and flags. The markers stay where they are.
    pub fn hard_reset(&mut self) {
        self.cells.fill(CellState::default());
    }

    /// Number of cells flagged visited.
    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|s| s.visited).count()
    }

    /// Number of cells flagged on-path.
    pub fn path_count(&self) -> usize {
        self.cells.iter().filter(|s| s.on_path).count()
    }

    /// Number of walls.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|s| s.wall).count()
    }
}
