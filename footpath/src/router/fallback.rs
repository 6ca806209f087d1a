//! Deterministic direct-line fallback routing.
//!
//! When the remote routing service is unreachable, times out, or answers
//! with anything unusable, the router substitutes a straight line between
//! origin and destination, timed at average walking pace. The substitution
//! is pure: the same endpoints always produce the same route.

use crate::geo::{distance_meters, Coordinate};

use super::types::{Route, RouteSource, RouteStep, Router};

/// Average walking speed used to time the fallback route, in m/s.
pub const WALK_SPEED_MPS: f64 = 1.4;

/// Instruction text on the fallback route's single synthetic step.
const FALLBACK_INSTRUCTION: &str = "Head towards destination";

/// Builds the direct-line route between two coordinates.
///
/// The path is exactly `[origin, destination]`, the distance is the
/// great-circle distance, and the duration assumes [`WALK_SPEED_MPS`].
/// The single synthetic step points at the destination.
pub fn direct_line_route(origin: Coordinate, destination: Coordinate) -> Route {
    let total_distance_m = distance_meters(origin, destination);
    let total_duration_s = total_distance_m / WALK_SPEED_MPS;

    Route {
        path: vec![origin, destination],
        total_distance_m,
        total_duration_s,
        steps: vec![RouteStep {
            instruction: FALLBACK_INSTRUCTION.to_string(),
            distance_m: total_distance_m,
            duration_s: total_duration_s,
            at: destination,
        }],
        source: RouteSource::DirectLine,
    }
}

/// A router that never contacts the network.
///
/// Always answers with the direct-line route. Used for offline operation
/// and as a deterministic substitute in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectRouter;

impl Router for DirectRouter {
    async fn compute_route(&self, origin: Coordinate, destination: Coordinate) -> Route {
        direct_line_route(origin, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_path_is_origin_destination() {
        let origin = Coordinate::new_unchecked(0.0, 0.0);
        let destination = Coordinate::new_unchecked(0.0, 1.0);

        let route = direct_line_route(origin, destination);
        assert_eq!(route.path, vec![origin, destination]);
        assert_eq!(route.source, RouteSource::DirectLine);
    }

    #[test]
    fn test_fallback_duration_is_distance_over_walk_speed() {
        let origin = Coordinate::new_unchecked(0.0, 0.0);
        let destination = Coordinate::new_unchecked(0.0, 1.0);

        let route = direct_line_route(origin, destination);
        assert_eq!(
            route.total_duration_s,
            route.total_distance_m / WALK_SPEED_MPS
        );
    }

    #[test]
    fn test_fallback_has_one_synthetic_step() {
        let origin = Coordinate::new_unchecked(10.0, 10.0);
        let destination = Coordinate::new_unchecked(11.0, 10.0);

        let route = direct_line_route(origin, destination);
        assert_eq!(route.steps.len(), 1);

        let step = &route.steps[0];
        assert_eq!(step.instruction, "Head towards destination");
        assert_eq!(step.distance_m, route.total_distance_m);
        assert_eq!(step.duration_s, route.total_duration_s);
        assert_eq!(step.at, destination);
    }

    #[test]
    fn test_fallback_idempotent() {
        let origin = Coordinate::new_unchecked(53.5511, 9.9937);
        let destination = Coordinate::new_unchecked(53.5530, 9.9920);

        let first = direct_line_route(origin, destination);
        let second = direct_line_route(origin, destination);
        assert_eq!(first, second);
    }

    #[test]
    fn test_fallback_degenerate_endpoints() {
        let spot = Coordinate::new_unchecked(10.0, 10.0);

        let route = direct_line_route(spot, spot);
        assert_eq!(route.path.len(), 2);
        assert_eq!(route.path[0], route.path[1]);
        assert_eq!(route.total_distance_m, 0.0);
        assert_eq!(route.total_duration_s, 0.0);
    }

    #[tokio::test]
    async fn test_direct_router_answers_with_fallback() {
        let origin = Coordinate::new_unchecked(0.0, 0.0);
        let destination = Coordinate::new_unchecked(1.0, 0.0);

        let route = DirectRouter.compute_route(origin, destination).await;
        assert!(route.is_fallback());
        assert_eq!(route, direct_line_route(origin, destination));
    }
}
