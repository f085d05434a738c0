#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use armeasure_geometry as geometry;

#[doc(inline)]
pub use armeasure_anchor as anchor;

#[doc(inline)]
pub use armeasure_overlay as overlay;

#[doc(inline)]
pub use armeasure_raster as raster;

#[doc(inline)]
pub use armeasure_tracking as tracking;
