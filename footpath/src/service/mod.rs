//! Navigation session service
//!
//! `NavigationService` is the async shell around the fusion engine. It
//! owns the engine behind a lock, spawns the one-shot route computation
//! when a session starts, and pumps fix feeds into the engine until the
//! session ends.
//!
//! # Concurrency
//!
//! A single logical thread of control: every mutation goes through the
//! engine's lock and is applied in arrival order; readers get cloned
//! snapshots. The route computation is the only suspension point. It
//! re-enters the engine tagged with the generation it was started under,
//! so a resolution arriving after a restart or end is recognized as stale
//! and dropped by the engine.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::engine::{FusionEngine, NavigationSnapshot, SessionPhase};
use crate::fix::{FixEvent, FixFailure, FixReceiver, HeadingSample, PositionFix};
use crate::geo::Coordinate;
use crate::router::Router;

/// Drives navigation sessions: routing, sensor fusion, snapshots.
///
/// Generic over the router so tests and offline operation can substitute
/// a deterministic implementation. Methods that spawn work
/// (`start_session`, `attach_feed`) must be called within a Tokio
/// runtime.
pub struct NavigationService<R: Router + 'static> {
    /// The engine, exclusively mutated through this lock.
    engine: Arc<RwLock<FusionEngine>>,

    /// Injected route computation.
    router: Arc<R>,

    /// Cancels the current session's feed pumps and route task.
    session_cancel: Mutex<CancellationToken>,
}

impl<R: Router + 'static> NavigationService<R> {
    /// Creates a service around the given router.
    pub fn new(router: R) -> Self {
        Self {
            engine: Arc::new(RwLock::new(FusionEngine::new())),
            router: Arc::new(router),
            session_cancel: Mutex::new(CancellationToken::new()),
        }
    }

    /// Starts a session from a known origin and spawns the route
    /// computation.
    ///
    /// Restarting while a previous route is in flight is safe: the old
    /// task is cancelled, and even a resolution that slips through is
    /// dropped by the engine's generation guard.
    pub fn start_session(&self, origin: Coordinate, destination: Coordinate) {
        let token = self.replace_session_token();
        let generation = self.engine.write().start_session(origin, destination);

        let engine = Arc::clone(&self.engine);
        let router = Arc::clone(&self.router);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(generation, "Route computation cancelled");
                }
                route = router.compute_route(origin, destination) => {
                    engine.write().on_route_resolved(generation, route);
                }
            }
        });
    }

    /// Applies a position fix.
    pub fn on_fix(&self, fix: PositionFix) {
        self.engine.write().apply_fix(fix);
    }

    /// Applies a heading sample.
    pub fn on_heading(&self, sample: HeadingSample) {
        self.engine.write().apply_heading(sample);
    }

    /// Records provider unavailability.
    pub fn on_unavailable(&self, failure: FixFailure) {
        self.engine.write().on_fix_unavailable(failure);
    }

    /// Pumps a fix feed into the engine until the feed ends or the
    /// session is torn down.
    pub fn attach_feed(&self, mut receiver: FixReceiver) {
        let token = self.session_cancel.lock().clone();
        let engine = Arc::clone(&self.engine);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!("Fix feed torn down");
                        break;
                    }
                    event = receiver.recv() => {
                        match event {
                            Some(FixEvent::Position(fix)) => engine.write().apply_fix(fix),
                            Some(FixEvent::Heading(sample)) => {
                                engine.write().apply_heading(sample)
                            }
                            Some(FixEvent::Unavailable(failure)) => {
                                engine.write().on_fix_unavailable(failure)
                            }
                            None => {
                                debug!("Fix feed ended");
                                break;
                            }
                        }
                    }
                }
            }
        });
    }

    /// Dismisses the arrival state.
    pub fn dismiss_arrival(&self) {
        self.engine.write().dismiss_arrival();
    }

    /// Ends the session, tearing down feeds and discarding all state.
    pub fn end_session(&self) {
        self.session_cancel.lock().cancel();
        self.engine.write().end_session();
    }

    /// Current session phase.
    pub fn phase(&self) -> SessionPhase {
        self.engine.read().phase()
    }

    /// Takes a read-only snapshot for presentation.
    pub fn snapshot(&self) -> NavigationSnapshot {
        self.engine.read().snapshot()
    }

    /// Cancels the previous session's tasks and installs a fresh token.
    fn replace_session_token(&self) -> CancellationToken {
        let mut guard = self.session_cancel.lock();
        guard.cancel();
        *guard = CancellationToken::new();
        guard.clone()
    }
}
