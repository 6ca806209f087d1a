//! OSRM-backed walking route computation.
//!
//! Requests a foot-profile route from an OSRM-style HTTP service and
//! validates the response strictly: any missing or malformed field routes
//! to the direct-line fallback instead of surfacing an error.
//!
//! # URL Pattern
//!
//! `{base}/route/v1/foot/{lon},{lat};{lon},{lat}?overview=full&geometries=geojson&steps=true`
//!
//! - Coordinates are `longitude,latitude` pairs, per the OSRM convention
//! - `geometries=geojson` yields the path as an ordered coordinate list
//! - `steps=true` yields per-maneuver instructions

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::geo::Coordinate;

use super::fallback::direct_line_route;
use super::http::AsyncHttpClient;
use super::types::{Route, RouteSource, RouteStep, Router, RouterError};

/// Public OSRM demo server. Fine for development; production deployments
/// should point at their own instance.
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default bound on the whole route request. The fallback must be able to
/// complete even when the service hangs, so the request is never left
/// pending past this.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Instruction substituted when the service omits one on a step.
const DEFAULT_STEP_INSTRUCTION: &str = "Continue straight";

/// Walking-route router backed by an OSRM-style service.
///
/// Generic over the HTTP client so tests can inject canned responses.
/// Never fails outward: every error path resolves to the direct-line
/// fallback route.
pub struct OsrmRouter<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
    timeout: Duration,
}

impl<C: AsyncHttpClient> OsrmRouter<C> {
    /// Creates a router against the public OSRM demo server.
    pub fn new(http_client: C) -> Self {
        Self {
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Points the router at a different OSRM instance.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Bounds the whole route request; on expiry the fallback substitutes.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the route request URL for the given endpoints.
    fn route_url(&self, origin: Coordinate, destination: Coordinate) -> String {
        format!(
            "{}/route/v1/foot/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson&steps=true",
            self.base_url,
            origin.longitude(),
            origin.latitude(),
            destination.longitude(),
            destination.latitude(),
        )
    }

    /// Fetches and validates a remote route.
    async fn fetch_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Route, RouterError> {
        let url = self.route_url(origin, destination);
        let body = self.http_client.get(&url).await?;
        parse_route(&body)
    }
}

impl<C: AsyncHttpClient> Router for OsrmRouter<C> {
    async fn compute_route(&self, origin: Coordinate, destination: Coordinate) -> Route {
        match tokio::time::timeout(self.timeout, self.fetch_route(origin, destination)).await {
            Ok(Ok(route)) => {
                debug!(
                    distance_m = route.total_distance_m,
                    steps = route.steps.len(),
                    "Remote route obtained"
                );
                route
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Routing failed, substituting direct-line route");
                direct_line_route(origin, destination)
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "Routing request timed out, substituting direct-line route"
                );
                direct_line_route(origin, destination)
            }
        }
    }
}

// Response schema. Every field is optional so that validation, not
// deserialization, decides what is missing.

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: Option<String>,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: Option<OsrmGeometry>,
    distance: Option<f64>,
    duration: Option<f64>,
    legs: Option<Vec<OsrmLeg>>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    steps: Option<Vec<OsrmStep>>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    distance: Option<f64>,
    duration: Option<f64>,
    maneuver: Option<OsrmManeuver>,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    instruction: Option<String>,
    location: Option<Vec<f64>>,
}

/// Validates an OSRM response body into a [`Route`].
///
/// Strict by design: the service's loosely-shaped JSON is held to the full
/// schema, and any absence routes to the fallback rather than raising an
/// unchecked error downstream.
fn parse_route(body: &[u8]) -> Result<Route, RouterError> {
    let response: OsrmResponse = serde_json::from_slice(body)
        .map_err(|e| RouterError::Malformed(format!("JSON decode: {}", e)))?;

    if let Some(code) = &response.code {
        if code != "Ok" {
            return Err(RouterError::NoRoute);
        }
    }

    let routes = response
        .routes
        .ok_or_else(|| RouterError::Malformed("missing routes".to_string()))?;
    let route = routes.into_iter().next().ok_or(RouterError::NoRoute)?;

    let path = route
        .geometry
        .and_then(|g| g.coordinates)
        .ok_or_else(|| RouterError::Malformed("missing geometry coordinates".to_string()))?
        .into_iter()
        .map(|position| parse_position(&position))
        .collect::<Result<Vec<_>, _>>()?;

    if path.len() < 2 {
        return Err(RouterError::Malformed(format!(
            "geometry has {} points, need at least 2",
            path.len()
        )));
    }

    let total_distance_m = parse_quantity(route.distance, "distance")?;
    let total_duration_s = parse_quantity(route.duration, "duration")?;

    let legs = route
        .legs
        .ok_or_else(|| RouterError::Malformed("missing legs".to_string()))?;
    let first_leg = legs
        .into_iter()
        .next()
        .ok_or_else(|| RouterError::Malformed("empty legs".to_string()))?;
    let raw_steps = first_leg
        .steps
        .ok_or_else(|| RouterError::Malformed("missing steps".to_string()))?;

    let steps = raw_steps
        .into_iter()
        .map(parse_step)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Route {
        path,
        total_distance_m,
        total_duration_s,
        steps,
        source: RouteSource::Remote,
    })
}

/// Validates one maneuver step.
fn parse_step(step: OsrmStep) -> Result<RouteStep, RouterError> {
    let maneuver = step
        .maneuver
        .ok_or_else(|| RouterError::Malformed("step missing maneuver".to_string()))?;
    let location = maneuver
        .location
        .ok_or_else(|| RouterError::Malformed("maneuver missing location".to_string()))?;

    Ok(RouteStep {
        instruction: maneuver
            .instruction
            .unwrap_or_else(|| DEFAULT_STEP_INSTRUCTION.to_string()),
        distance_m: parse_quantity(step.distance, "step distance")?,
        duration_s: parse_quantity(step.duration, "step duration")?,
        at: parse_position(&location)?,
    })
}

/// Validates a `[longitude, latitude]` position array.
fn parse_position(position: &[f64]) -> Result<Coordinate, RouterError> {
    if position.len() < 2 {
        return Err(RouterError::Malformed(format!(
            "position has {} components, need 2",
            position.len()
        )));
    }

    // OSRM positions are [lon, lat].
    Coordinate::new(position[1], position[0])
        .map_err(|e| RouterError::Malformed(format!("position out of range: {}", e)))
}

/// Validates a required non-negative finite quantity.
fn parse_quantity(value: Option<f64>, field: &str) -> Result<f64, RouterError> {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(v) => Err(RouterError::Malformed(format!("{} invalid: {}", field, v))),
        None => Err(RouterError::Malformed(format!("missing {}", field))),
    }
}
