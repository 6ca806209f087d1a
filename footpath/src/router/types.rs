//! Route data model and the router abstraction.

use std::future::Future;

use thiserror::Error;

use crate::geo::Coordinate;

/// One instruction along a route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    /// Human-readable maneuver instruction.
    pub instruction: String,
    /// Distance covered by this step in meters.
    pub distance_m: f64,
    /// Expected duration of this step in seconds.
    pub duration_s: f64,
    /// Where along the route this step applies.
    pub at: Coordinate,
}

/// Where a route came from.
///
/// Presentation uses this to tell the user when guidance is approximate:
/// a direct-line route ignores the street network entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSource {
    /// Obtained from the remote routing service.
    Remote,
    /// Synthesized locally as a straight line between the endpoints.
    DirectLine,
}

impl std::fmt::Display for RouteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteSource::Remote => write!(f, "remote"),
            RouteSource::DirectLine => write!(f, "direct line"),
        }
    }
}

/// A walking route between two coordinates.
///
/// `path` holds at least two points, the first at the origin and the last
/// at the destination (within fix tolerance). A direct-line route has
/// exactly those two points and one synthetic step.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Ordered path geometry from origin to destination.
    pub path: Vec<Coordinate>,
    /// Total route length in meters.
    pub total_distance_m: f64,
    /// Total expected duration in seconds.
    pub total_duration_s: f64,
    /// Ordered maneuver instructions.
    pub steps: Vec<RouteStep>,
    /// Whether the route is remote or locally synthesized.
    pub source: RouteSource,
}

impl Route {
    /// True when this route was synthesized locally instead of routed.
    pub fn is_fallback(&self) -> bool {
        self.source == RouteSource::DirectLine
    }
}

/// Computes a walking route between two coordinates.
///
/// Implementations never fail outward: any network, format, or no-route
/// condition resolves to the deterministic direct-line fallback. The trait
/// is the injection seam that lets tests substitute a deterministic fake
/// for the remote service.
pub trait Router: Send + Sync {
    /// Resolves to a route from `origin` to `destination`, always.
    fn compute_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> impl Future<Output = Route> + Send;
}

/// Errors inside the routing layer.
///
/// These never escape [`Router::compute_route`]; they are logged and then
/// recovered by substituting the direct-line fallback.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouterError {
    /// The HTTP request could not be performed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The routing service answered with a non-success status.
    #[error("routing service returned HTTP {0}")]
    Status(u16),

    /// The response body did not match the expected schema.
    #[error("malformed routing response: {0}")]
    Malformed(String),

    /// The service answered but found no route between the endpoints.
    #[error("routing service found no route")]
    NoRoute,
}
