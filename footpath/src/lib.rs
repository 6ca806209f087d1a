//! Footpath - pedestrian navigation fusion and routing
//!
//! This library guides a user on foot toward a geographic destination. It
//! fuses live position fixes and compass headings into a coherent
//! navigation state, obtains a walking route from an OSRM-style service
//! (or deterministically synthesizes a direct line when the service is
//! unreachable), and recomputes bearing, distance, and arrival on every
//! sensor event.
//!
//! # Architecture
//!
//! ```text
//! fix feed ──► NavigationService ──► FusionEngine ──► NavigationSnapshot
//!                     │                    ▲
//!                     └── Router (one-shot, never fails outward)
//! ```
//!
//! - [`geo`] - great-circle distance and bearing on coordinates
//! - [`fix`] - position/heading event shapes and the feed channel
//! - [`router`] - OSRM-backed routing with the direct-line fallback
//! - [`engine`] - the fusion state machine owning the navigation state
//! - [`guidance`] - arrow rotation and distance/ETA formatting
//! - [`service`] - async session wiring around the engine

pub mod engine;
pub mod fix;
pub mod geo;
pub mod guidance;
pub mod router;
pub mod service;

pub use engine::{FusionEngine, NavigationSnapshot, SessionPhase, ARRIVAL_THRESHOLD_M};
pub use fix::{FixEvent, FixFailure, HeadingSample, PositionFix};
pub use geo::{Coordinate, GeoError};
pub use router::{DirectRouter, OsrmRouter, ReqwestHttpClient, Route, RouteStep, Router};
pub use service::NavigationService;
