//! JSON request boundary for the gridwalk search engine.
//!
//! The engine itself never sees malformed input: [`handle`] validates the
//! method and body, runs the search, and maps every failure to a status
//! code with an `{"error": ...}` body.
//!
//! ```text
//! POST {"grid":[[0,0],[1,0]],"start":{"r":0,"c":0},"goal":{"r":1,"c":1},"strategy":"bfs"}
//! 200  {"visitedOrder":[{"r":0,"c":0},...],"parent":{"0,1":"0,0",...}}
//! ```

mod error;
mod handler;
mod wire;

pub use error::ApiError;
pub use handler::{ApiResponse, decode, handle, solve};
pub use wire::{SearchRequest, SearchResponse};
