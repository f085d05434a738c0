#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # armeasure geometry
//!
//! The math shared by every other crate of the workspace: rigid poses, camera frames
//! as reported by a tracking provider, the world-to-screen projector and the distance
//! calculator used for measurement labels.
//!
//! ## Example
//!
//! ```rust
//! use armeasure_geometry::{distance, format_distance_cm, Pose};
//!
//! let a = Pose::from_xyz(0.0, 0.0, 0.0);
//! let b = Pose::from_xyz(0.0, 0.0, 1.0);
//! assert_eq!(format_distance_cm(distance(&a, &b)), "100.0 cm");
//! ```

/// Camera frames, viewports and tracking status.
pub mod camera;

/// Distance calculation and label formatting.
pub mod distance;

/// Error types for the geometry module.
pub mod error;

/// Hit-test results reported by the tracking provider.
pub mod hit;

/// Point clouds reported by the tracking provider.
pub mod pointcloud;

/// Rigid body poses.
pub mod pose;

/// World to screen projection.
pub mod projection;

/// Rays cast from screen points into the scene.
pub mod ray;

pub use camera::{perspective_projection, view_matrix, CameraFrame, TrackingState, Viewport};
pub use distance::{distance, format_distance_cm};
pub use error::GeometryError;
pub use hit::{HitKind, HitResult};
pub use pointcloud::{PointCloud, PointCloudSample};
pub use pose::Pose;
pub use projection::{ndc_to_screen, project, project_point, ScreenPoint};
pub use ray::Ray;

pub use glam::{Mat4, Quat, Vec3, Vec4};
