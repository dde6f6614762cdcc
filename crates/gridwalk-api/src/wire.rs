//! Request and response bodies.

use std::collections::BTreeMap;

use gridwalk_core::{Bounds, Coord, Grid};
use gridwalk_paths::{ParentMap, ParentMapError, Strategy, Traversal};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A search request: a 0/1 matrix (1 = blocked), two endpoints and the
/// strategy, which defaults to `bfs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub grid: Vec<Vec<u8>>,
    pub start: Coord,
    pub goal: Coord,
    #[serde(default)]
    pub strategy: Strategy,
}

impl SearchRequest {
    /// Check the matrix and turn it into a [`Grid`].
    ///
    /// The grid must be non-empty and rectangular, and every cell must be
    /// 0 or 1. Endpoint bounds are left to the search itself.
    pub fn to_grid(&self) -> Result<Grid, ApiError> {
        if self.grid.is_empty() {
            return Err(ApiError::InvalidRequest("grid is empty".into()));
        }
        if self.grid[0].is_empty() {
            return Err(ApiError::InvalidRequest("grid has no columns".into()));
        }
        for (r, row) in self.grid.iter().enumerate() {
            if let Some((c, v)) = row.iter().enumerate().find(|&(_, &v)| v > 1) {
                return Err(ApiError::InvalidRequest(format!(
                    "grid[{r}][{c}] must be 0 or 1, got {v}"
                )));
            }
        }
        Ok(Grid::from_rows(&self.grid)?)
    }
}

/// Lenient shape used for decoding, so absent and `null` fields can be
/// told apart from badly typed ones.
#[derive(Deserialize)]
pub(crate) struct RawRequest {
    grid: Option<Vec<Vec<i64>>>,
    start: Option<Coord>,
    goal: Option<Coord>,
    #[serde(default)]
    strategy: Option<Strategy>,
}

impl RawRequest {
    pub(crate) fn into_request(self) -> Result<SearchRequest, ApiError> {
        let (Some(grid), Some(start), Some(goal)) = (self.grid, self.start, self.goal) else {
            return Err(ApiError::InvalidRequest("Missing grid/start/goal".into()));
        };
        let mut rows = Vec::with_capacity(grid.len());
        for (r, row) in grid.into_iter().enumerate() {
            let mut out = Vec::with_capacity(row.len());
            for (c, v) in row.into_iter().enumerate() {
                match v {
                    0 | 1 => out.push(v as u8),
                    _ => {
                        return Err(ApiError::InvalidRequest(format!(
                            "grid[{r}][{c}] must be 0 or 1, got {v}"
                        )));
                    }
                }
            }
            rows.push(out);
        }
        Ok(SearchRequest {
            grid: rows,
            start,
            goal,
            strategy: self.strategy.unwrap_or_default(),
        })
    }
}

/// A search result as sent on the wire.
///
/// `parent` uses the canonical `"r,c"` form for both keys and values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub visited_order: Vec<Coord>,
    pub parent: BTreeMap<String, String>,
}

impl SearchResponse {
    /// Rebuild the parent map for a grid of the given size.
    pub fn parent_map(&self, bounds: Bounds) -> Result<ParentMap, ParentMapError> {
        ParentMap::from_keyed(
            bounds,
            self.parent.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }
}

impl From<&Traversal> for SearchResponse {
    fn from(t: &Traversal) -> Self {
        Self {
            visited_order: t.visited_order.clone(),
            parent: t.parent.to_keyed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn strategy_defaults_to_bfs() {
        let req = raw(r#"{"grid":[[0]],"start":{"r":0,"c":0},"goal":{"r":0,"c":0}}"#)
            .into_request()
            .unwrap();
        assert_eq!(req.strategy, Strategy::Bfs);
    }

    #[test]
    fn null_fields_count_as_missing() {
        let err = raw(r#"{"grid":null,"start":{"r":0,"c":0},"goal":{"r":0,"c":0}}"#)
            .into_request()
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing grid/start/goal");
    }

    #[test]
    fn rejects_cells_outside_zero_one() {
        let err = raw(r#"{"grid":[[0,-1]],"start":{"r":0,"c":0},"goal":{"r":0,"c":1}}"#)
            .into_request()
            .unwrap_err();
        assert_eq!(err.to_string(), "grid[0][1] must be 0 or 1, got -1");
    }

    #[test]
    fn to_grid_checks_shape() {
        let mut req = SearchRequest {
            grid: vec![],
            start: Coord::ZERO,
            goal: Coord::ZERO,
            strategy: Strategy::Dfs,
        };
        assert!(req.to_grid().is_err());
        req.grid = vec![vec![]];
        assert!(req.to_grid().is_err());
        req.grid = vec![vec![0, 0], vec![0]];
        assert!(req.to_grid().unwrap_err().to_string().contains("row 1"));
        req.grid = vec![vec![0, 1], vec![0, 0]];
        let g = req.to_grid().unwrap();
        assert!(g.is_blocked(Coord::new(0, 1)));
    }
}
