#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Session configuration.
pub mod config;

/// Error types for the tracking module.
pub mod error;

/// The tracking provider interface.
pub mod provider;

/// The measurement frame loop.
pub mod session;

/// A deterministic provider for demos and tests.
pub mod simulated;

pub use config::{ClipPlanes, SessionConfig};
pub use error::TrackingError;
pub use provider::{select_hit, TrackingProvider};
pub use session::{MeasureSession, TickOutcome};
pub use simulated::{SimulatedConfig, SimulatedProvider};
