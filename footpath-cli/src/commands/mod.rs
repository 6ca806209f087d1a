//! CLI command implementations.

mod common;
pub mod guide;
pub mod route;

pub use guide::GuideArgs;
pub use route::RouteArgs;
