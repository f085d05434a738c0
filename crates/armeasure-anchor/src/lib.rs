#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Anchors are user confirmed measurement endpoints. The store keeps them in the order
//! they were confirmed, since lines and distances connect consecutive anchors.
//!
//! ## Example
//!
//! ```rust
//! use armeasure_anchor::AnchorStore;
//! use armeasure_geometry::Pose;
//!
//! let mut store = AnchorStore::new();
//! store.append(Pose::from_xyz(0.0, 0.0, 0.0));
//! store.append(Pose::from_xyz(1.0, 0.0, 0.0));
//! assert_eq!(store.active_anchors().count(), 2);
//!
//! store.clear();
//! assert_eq!(store.active_anchors().count(), 0);
//! ```

/// Anchor types.
pub mod anchor;

/// Single threaded anchor store.
pub mod store;

/// Anchor store shared between an input and a render thread.
pub mod shared;

pub use anchor::{Anchor, AnchorId};
pub use shared::{AnchorSnapshot, SharedAnchorStore};
pub use store::AnchorStore;
