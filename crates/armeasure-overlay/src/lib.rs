#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # armeasure overlay
//!
//! Turns the tracking state of a frame into an ordered list of 2D drawing primitives:
//! the plane outline around the live hit, the feature point cloud, lines and distance
//! labels between consecutive anchors, the live measurement towards the screen center,
//! anchor markers, the crosshair and the status line.
//!
//! Commands are emitted back to front, a host draws them in order.

/// RGBA colors.
pub mod color;

/// Drawing primitives.
pub mod command;

/// Error types for the overlay module.
pub mod error;

/// Overlay generation.
pub mod renderer;

/// Overlay appearance configuration.
pub mod style;

pub use color::Color;
pub use command::{CircleStyle, DashPattern, DrawCommand, Shadow, TextAlign};
pub use error::ConfigError;
pub use renderer::{render, status_message, OverlayRenderer};
pub use style::OverlayStyle;
