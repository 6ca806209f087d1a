//! Position and heading events from a platform location source.
//!
//! A location provider (GPS watch, device orientation listener) delivers an
//! unbounded stream of [`FixEvent`]s until explicitly torn down. The engine
//! consumes them one at a time; this module only defines the event shapes
//! and a channel wrapper for delivering them.
//!
//! # Design
//!
//! - Position and heading are independent streams folded into one event enum
//! - Heading samples are normalized into [0, 360) on construction
//! - Provider unavailability (no permission, no signal) is an advisory event,
//!   never an error: navigation proceeds with whatever is known

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::geo::{Coordinate, GeoError};

/// A single reported position from the location sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    /// Latitude in degrees as reported, unvalidated.
    pub latitude: f64,
    /// Longitude in degrees as reported, unvalidated.
    pub longitude: f64,
    /// Reported horizontal accuracy in meters, when the sensor provides one.
    pub accuracy_m: Option<f64>,
    /// When this fix was recorded.
    pub timestamp: DateTime<Utc>,
}

impl PositionFix {
    /// Creates a fix stamped with the current time.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: None,
            timestamp: Utc::now(),
        }
    }

    /// Creates a fix with an explicit timestamp.
    pub fn with_timestamp(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: None,
            timestamp,
        }
    }

    /// Sets the reported accuracy.
    pub fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.accuracy_m = Some(accuracy_m);
        self
    }

    /// Validates the raw sensor values into a [`Coordinate`].
    pub fn coordinate(&self) -> Result<Coordinate, GeoError> {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A compass heading sample in degrees, [0, 360), 0 = north.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingSample {
    degrees: f64,
}

impl HeadingSample {
    /// Creates a heading sample, wrapping the input into [0, 360).
    ///
    /// Inputs like 450° or -90° are folded onto the compass rose; a
    /// non-finite input is preserved and rejected downstream by the engine.
    pub fn new(degrees: f64) -> Self {
        let degrees = if degrees.is_finite() {
            degrees.rem_euclid(360.0)
        } else {
            degrees
        };
        Self { degrees }
    }

    /// Heading in degrees, [0, 360) for finite inputs.
    pub fn degrees(&self) -> f64 {
        self.degrees
    }
}

/// Why the location provider cannot deliver fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixFailure {
    /// The user denied the location permission.
    PermissionDenied,
    /// No position could be acquired within the provider's timeout.
    NoSignal,
}

impl std::fmt::Display for FixFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixFailure::PermissionDenied => write!(f, "location permission denied"),
            FixFailure::NoSignal => write!(f, "no position signal"),
        }
    }
}

/// One event from the location provider.
#[derive(Debug, Clone, PartialEq)]
pub enum FixEvent {
    /// A new position fix.
    Position(PositionFix),
    /// A new compass heading sample.
    Heading(HeadingSample),
    /// The provider signalled that it cannot deliver fixes.
    Unavailable(FixFailure),
}

/// Creates a fix feed: an unbounded channel of [`FixEvent`]s.
///
/// The sender side lives with the platform adapter; the receiver is handed
/// to the navigation service, which pumps it into the engine. Dropping the
/// sender ends the stream.
pub fn channel() -> (FixSender, FixReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (FixSender { tx }, FixReceiver { rx })
}

/// Sending half of a fix feed.
#[derive(Debug, Clone)]
pub struct FixSender {
    tx: mpsc::UnboundedSender<FixEvent>,
}

impl FixSender {
    /// Sends a position fix. Returns false if the receiver is gone.
    pub fn send_position(&self, fix: PositionFix) -> bool {
        self.tx.send(FixEvent::Position(fix)).is_ok()
    }

    /// Sends a heading sample. Returns false if the receiver is gone.
    pub fn send_heading(&self, sample: HeadingSample) -> bool {
        self.tx.send(FixEvent::Heading(sample)).is_ok()
    }

    /// Signals provider unavailability. Returns false if the receiver is gone.
    pub fn send_unavailable(&self, failure: FixFailure) -> bool {
        self.tx.send(FixEvent::Unavailable(failure)).is_ok()
    }
}

/// Receiving half of a fix feed.
#[derive(Debug)]
pub struct FixReceiver {
    rx: mpsc::UnboundedReceiver<FixEvent>,
}

impl FixReceiver {
    /// Receives the next event, or None once all senders are dropped.
    pub async fn recv(&mut self) -> Option<FixEvent> {
        self.rx.recv().await
    }
}
