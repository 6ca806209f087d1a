//! Navigation fusion engine
//!
//! Turns raw, asynchronous position and heading samples plus a one-shot
//! route resolution into a single coherent navigation state, and decides
//! via a small phase machine when the user has arrived.

mod fusion;
mod state;

pub use fusion::{FusionEngine, ARRIVAL_THRESHOLD_M};
pub use state::{NavigationSnapshot, SessionPhase};
