//! Walking-route computation with a deterministic fallback
//!
//! This module provides the router abstraction and its implementations:
//! an OSRM-backed remote router and the local direct-line router. Route
//! computation never fails outward; every failure mode (network error,
//! non-success status, malformed payload, no route, timeout) resolves to
//! the straight-line fallback timed at average walking pace.

mod fallback;
mod http;
mod osrm;
mod types;

pub use fallback::{direct_line_route, DirectRouter, WALK_SPEED_MPS};
pub use http::{AsyncHttpClient, ReqwestHttpClient};
pub use osrm::OsrmRouter;
pub use types::{Route, RouteSource, RouteStep, Router, RouterError};

#[cfg(test)]
pub use http::tests::{MockAsyncHttpClient, PendingHttpClient};
