use std::fmt;

use gridwalk_core::GridError;
use gridwalk_paths::SearchError;

/// Why a request was not answered with a search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed body or a grid/endpoint the engine cannot accept.
    InvalidRequest(String),
    MethodNotAllowed,
    /// The engine failed unexpectedly. Details are only logged.
    Internal,
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::MethodNotAllowed => 405,
            Self::Internal => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(reason) => f.write_str(reason),
            Self::MethodNotAllowed => f.write_str("Method not allowed"),
            Self::Internal => f.write_str("Internal error"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<GridError> for ApiError {
    fn from(e: GridError) -> Self {
        Self::InvalidRequest(e.to_string())
    }
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        Self::InvalidRequest(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::{Bounds, Coord};
    use gridwalk_paths::Endpoint;

    #[test]
    fn statuses() {
        assert_eq!(ApiError::InvalidRequest("x".into()).status(), 400);
        assert_eq!(ApiError::MethodNotAllowed.status(), 405);
        assert_eq!(ApiError::Internal.status(), 500);
    }

    #[test]
    fn engine_errors_become_bad_requests() {
        let e: ApiError = SearchError::OutOfBounds {
            endpoint: Endpoint::Goal,
            coord: Coord::new(9, 9),
            bounds: Bounds::new(3, 3),
        }
        .into();
        assert_eq!(e.status(), 400);
        assert!(e.to_string().starts_with("goal (9,9)"));
    }
}
