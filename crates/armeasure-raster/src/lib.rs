#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Draws overlay commands into an RGBA pixel buffer so a frame's overlay can be
//! inspected or saved without a GPU. Text is not typeset: labels and the status line
//! are drawn as their approximate bounding boxes.

/// RGBA canvas over a kornia image.
pub mod canvas;

/// Low level drawing primitives.
pub mod draw;

/// Error types for the raster module.
pub mod error;

/// PNG import and export.
pub mod io;

/// Draw command rasterization.
pub mod rasterize;

pub use canvas::{viewport_size, Canvas};
pub use error::CanvasError;
pub use io::{read_canvas_png, write_canvas_png};
pub use rasterize::{rasterize, rasterize_to_canvas};
