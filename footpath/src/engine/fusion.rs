//! Navigation fusion: sensor events in, coherent navigation state out.
//!
//! The [`FusionEngine`] exclusively owns the mutable navigation aggregate.
//! Position and heading events apply immediately and independently of
//! route status; the route resolution re-enters tagged with the session
//! generation it was started under, so a resolution from a restarted or
//! ended session is ignored rather than applied to the wrong session.
//!
//! # Arrival
//!
//! Arrival is one-shot: the first recomputation in `Navigating` that puts
//! the distance below the threshold transitions to `Arrived`, and the flag
//! never reverts while the session is active. Distance keeps updating in
//! `Arrived` so the display stays live; only an explicit dismissal or
//! session end leaves the phase.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::fix::{FixFailure, HeadingSample, PositionFix};
use crate::geo::{distance_meters, Coordinate};
use crate::router::Route;

use super::state::{NavigationSnapshot, SessionPhase};

/// Distance below which the session is considered complete, in meters.
pub const ARRIVAL_THRESHOLD_M: f64 = 10.0;

/// Event-driven owner of the navigation state.
///
/// All mutation goes through the methods below; readers take
/// [`NavigationSnapshot`]s. The engine is synchronous - the async shell
/// around it serializes event application.
#[derive(Debug, Default)]
pub struct FusionEngine {
    /// Current session phase.
    phase: SessionPhase,

    /// Session counter; tags in-flight route computations so stale
    /// resolutions can be recognized and dropped.
    generation: u64,

    /// Destination of the active session.
    destination: Option<Coordinate>,

    /// Last known position.
    current_position: Option<Coordinate>,

    /// Last known heading in degrees; 0 until the first sample.
    heading_degrees: f64,

    /// Resolved route, remote or fallback.
    route: Option<Route>,

    /// Distance to the destination, recomputed on every applied fix.
    distance_to_destination_m: Option<f64>,

    /// Displayed step index. Never advances.
    active_step_index: usize,

    /// One-shot arrival flag.
    arrived: bool,

    /// Advisory from the location provider.
    fix_failure: Option<FixFailure>,

    /// Timestamp of the last applied fix, for the monotonic guard.
    last_fix_at: Option<DateTime<Utc>>,
}

impl FusionEngine {
    /// Creates an idle engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Current session generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Takes a read-only snapshot for presentation.
    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            phase: self.phase,
            destination: self.destination,
            current_position: self.current_position,
            heading_degrees: self.heading_degrees,
            distance_to_destination_m: self.distance_to_destination_m,
            route: self.route.clone(),
            active_step_index: self.active_step_index,
            arrived: self.arrived,
            fix_failure: self.fix_failure,
        }
    }

    /// Starts a navigation session from a known origin.
    ///
    /// Any active session is discarded first - its pending route
    /// resolution, if one is in flight, becomes stale and will be
    /// ignored. Returns the generation to tag the route computation with.
    pub fn start_session(&mut self, origin: Coordinate, destination: Coordinate) -> u64 {
        if self.phase != SessionPhase::Idle {
            info!(phase = %self.phase, "Discarding active session for restart");
        }

        self.clear_session();
        self.generation = self.generation.wrapping_add(1);
        self.destination = Some(destination);
        self.current_position = Some(origin);
        self.distance_to_destination_m = Some(distance_meters(origin, destination));
        self.transition(SessionPhase::RouteComputing);

        info!(
            generation = self.generation,
            origin = %origin,
            destination = %destination,
            "Navigation session started"
        );

        self.generation
    }

    /// Accepts a resolved route for the given session generation.
    ///
    /// A stale generation (the session was restarted or ended while the
    /// route was in flight) is dropped. The transition to `Navigating` is
    /// otherwise unconditional: the router never fails outward.
    pub fn on_route_resolved(&mut self, generation: u64, route: Route) {
        if generation != self.generation || self.phase != SessionPhase::RouteComputing {
            debug!(
                resolved_generation = generation,
                current_generation = self.generation,
                phase = %self.phase,
                "Ignoring stale route resolution"
            );
            return;
        }

        info!(
            source = %route.source,
            distance_m = route.total_distance_m,
            "Route resolved"
        );
        self.route = Some(route);
        self.transition(SessionPhase::Navigating);
        self.recompute();
    }

    /// Applies a position fix.
    ///
    /// Fixes update position and distance immediately, independently of
    /// route status. A fix with out-of-range coordinates is rejected, as
    /// is one timestamped earlier than the last applied fix (equal
    /// timestamps are accepted, last-wins).
    pub fn apply_fix(&mut self, fix: PositionFix) {
        if self.phase == SessionPhase::Idle {
            debug!("Ignoring fix outside a session");
            return;
        }

        let position = match fix.coordinate() {
            Ok(position) => position,
            Err(e) => {
                warn!(error = %e, "Rejecting fix with invalid coordinates");
                return;
            }
        };

        if let Some(last) = self.last_fix_at {
            if fix.timestamp < last {
                debug!(
                    fix_at = %fix.timestamp,
                    last_at = %last,
                    "Rejecting backdated fix"
                );
                return;
            }
        }

        self.current_position = Some(position);
        self.last_fix_at = Some(fix.timestamp);
        self.fix_failure = None;
        self.recompute();
    }

    /// Applies a compass heading sample.
    pub fn apply_heading(&mut self, sample: HeadingSample) {
        if self.phase == SessionPhase::Idle {
            debug!("Ignoring heading outside a session");
            return;
        }
        if !sample.degrees().is_finite() {
            debug!(degrees = sample.degrees(), "Rejecting non-finite heading");
            return;
        }

        self.heading_degrees = sample.degrees();
        self.recompute();
    }

    /// Records that the location provider cannot deliver fixes.
    ///
    /// Advisory only: the last known position is retained and guidance
    /// continues from it. The advisory clears on the next applied fix.
    pub fn on_fix_unavailable(&mut self, failure: FixFailure) {
        if self.phase == SessionPhase::Idle {
            return;
        }

        warn!(%failure, "Location provider unavailable");
        self.fix_failure = Some(failure);
    }

    /// Dismisses the arrival state. The only way out of `Arrived`.
    pub fn dismiss_arrival(&mut self) {
        if self.phase != SessionPhase::Arrived {
            debug!(phase = %self.phase, "Dismiss ignored outside Arrived");
            return;
        }

        self.transition(SessionPhase::Idle);
        self.clear_session();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Ends the session from any phase, discarding all state.
    ///
    /// An in-flight route computation becomes stale and will be ignored
    /// when it resolves.
    pub fn end_session(&mut self) {
        if self.phase == SessionPhase::Idle {
            return;
        }

        self.transition(SessionPhase::Idle);
        self.clear_session();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Recomputes the distance and checks the arrival threshold.
    fn recompute(&mut self) {
        let (Some(position), Some(destination)) = (self.current_position, self.destination)
        else {
            return;
        };

        let distance = distance_meters(position, destination);
        self.distance_to_destination_m = Some(distance);

        if self.phase == SessionPhase::Navigating && !self.arrived && distance < ARRIVAL_THRESHOLD_M
        {
            self.arrived = true;
            info!(distance_m = distance, "Arrived at destination");
            self.transition(SessionPhase::Arrived);
        }
    }

    /// Moves to a new phase with a transition log.
    fn transition(&mut self, to: SessionPhase) {
        let from = self.phase;
        self.phase = to;
        info!(from = %from, to = %to, "Navigation phase transition");
    }

    /// Clears everything but the generation counter.
    fn clear_session(&mut self) {
        self.destination = None;
        self.current_position = None;
        self.heading_degrees = 0.0;
        self.route = None;
        self.distance_to_destination_m = None;
        self.active_step_index = 0;
        self.arrived = false;
        self.fix_failure = None;
        self.last_fix_at = None;
        self.phase = SessionPhase::Idle;
    }
}
