//! Session phases and the read-only navigation snapshot.

use crate::fix::FixFailure;
use crate::geo::Coordinate;
use crate::router::{Route, RouteStep};

/// Phase of a navigation session.
///
/// The engine moves through these in order: a session starts computing a
/// route, navigates once the route resolves (the router never fails
/// outward, so that transition is unconditional), and arrives once within
/// the arrival threshold. Only an explicit dismissal leaves `Arrived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No active session.
    #[default]
    Idle,

    /// Session started; the route request is in flight.
    RouteComputing,

    /// Route available; guidance updates on every fix.
    Navigating,

    /// Within the arrival threshold; waiting for dismissal.
    Arrived,
}

impl SessionPhase {
    /// Get a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "no active session",
            SessionPhase::RouteComputing => "computing route",
            SessionPhase::Navigating => "navigating",
            SessionPhase::Arrived => "arrived at destination",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "idle"),
            SessionPhase::RouteComputing => write!(f, "route-computing"),
            SessionPhase::Navigating => write!(f, "navigating"),
            SessionPhase::Arrived => write!(f, "arrived"),
        }
    }
}

/// Point-in-time copy of the navigation state.
///
/// The engine exclusively owns the mutable aggregate; presentation reads
/// these snapshots and never mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationSnapshot {
    /// Current session phase.
    pub phase: SessionPhase,
    /// Destination of the active session, if any.
    pub destination: Option<Coordinate>,
    /// Last known position, if any fix has been applied.
    pub current_position: Option<Coordinate>,
    /// Last known compass heading in degrees; 0 until the first sample.
    pub heading_degrees: f64,
    /// Great-circle distance to the destination, once a position exists.
    pub distance_to_destination_m: Option<f64>,
    /// The active route, once resolved.
    pub route: Option<Route>,
    /// Index of the displayed step. Stays 0; step progression is not
    /// part of this engine.
    pub active_step_index: usize,
    /// Whether the session has arrived. Monotonic within a session.
    pub arrived: bool,
    /// Advisory: why the location provider cannot deliver fixes, if it
    /// signalled so.
    pub fix_failure: Option<FixFailure>,
}

impl NavigationSnapshot {
    /// True when guidance follows a locally synthesized direct line.
    pub fn route_is_fallback(&self) -> bool {
        self.route.as_ref().is_some_and(|r| r.is_fallback())
    }

    /// The step currently shown to the user, once a route exists.
    pub fn active_step(&self) -> Option<&RouteStep> {
        self.route.as_ref()?.steps.get(self.active_step_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display() {
        assert_eq!(format!("{}", SessionPhase::Idle), "idle");
        assert_eq!(format!("{}", SessionPhase::RouteComputing), "route-computing");
        assert_eq!(format!("{}", SessionPhase::Navigating), "navigating");
        assert_eq!(format!("{}", SessionPhase::Arrived), "arrived");
    }

    #[test]
    fn test_phase_description() {
        assert_eq!(SessionPhase::Idle.description(), "no active session");
        assert_eq!(SessionPhase::Arrived.description(), "arrived at destination");
    }

    #[test]
    fn test_default_phase_is_idle() {
        assert_eq!(SessionPhase::default(), SessionPhase::Idle);
    }
}
