use std::panic;

use gridwalk_paths::Searcher;

use crate::error::ApiError;
use crate::wire::{RawRequest, SearchRequest, SearchResponse};

/// Status code and JSON body of a handled request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn error(e: &ApiError) -> Self {
        Self {
            status: e.status(),
            body: serde_json::json!({ "error": e.to_string() }).to_string(),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Run a search for an already decoded request.
pub fn solve(req: &SearchRequest) -> Result<SearchResponse, ApiError> {
    let grid = req.to_grid()?;
    let t = Searcher::new().traverse(&grid, req.start, req.goal, req.strategy)?;
    Ok(SearchResponse::from(&t))
}

/// Decode a JSON body into a request. An empty body or `null` is treated
/// as an object with every field missing.
pub fn decode(body: &str) -> Result<SearchRequest, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Missing grid/start/goal".into()));
    }
    let raw: Option<RawRequest> = serde_json::from_str(body)
        .map_err(|e| ApiError::InvalidRequest(format!("invalid JSON body: {e}")))?;
    match raw {
        Some(raw) => raw.into_request(),
        None => Err(ApiError::InvalidRequest("Missing grid/start/goal".into())),
    }
}

/// Handle one request the way the HTTP endpoint does.
///
/// Only `POST` is accepted. Bad input is answered with 400 before the
/// engine runs; a panic inside the engine is answered with 500 and does not
/// escape this call.
pub fn handle(method: &str, body: &str) -> ApiResponse {
    match respond(method, body) {
        Ok(body) => ApiResponse { status: 200, body },
        Err(e) => ApiResponse::error(&e),
    }
}

fn respond(method: &str, body: &str) -> Result<String, ApiError> {
    if method != "POST" {
        log::warn!("rejected {method} request");
        return Err(ApiError::MethodNotAllowed);
    }
    let req = decode(body).inspect_err(|e| log::warn!("bad request: {e}"))?;

    let resp = panic::catch_unwind(panic::AssertUnwindSafe(|| solve(&req)))
        .map_err(|payload| {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::error!("search panicked: {msg}");
            ApiError::Internal
        })?
        .inspect_err(|e| log::warn!("bad request: {e}"))?;

    serde_json::to_string(&resp).map_err(|e| {
        log::error!("encoding response failed: {e}");
        ApiError::Internal
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_shape() {
        let r = ApiResponse::error(&ApiError::MethodNotAllowed);
        assert_eq!(r.status, 405);
        assert_eq!(r.body, r#"{"error":"Method not allowed"}"#);
        assert!(!r.is_success());
    }

    #[test]
    fn empty_and_null_bodies_are_missing_fields() {
        for body in ["", "  ", "null", "{}"] {
            let e = decode(body).unwrap_err();
            assert_eq!(e.to_string(), "Missing grid/start/goal", "body {body:?}");
        }
    }

    #[test]
    fn garbage_is_invalid_json() {
        let e = decode("{grid:").unwrap_err();
        assert!(e.to_string().starts_with("invalid JSON body"));
        assert_eq!(e.status(), 400);
    }
}
