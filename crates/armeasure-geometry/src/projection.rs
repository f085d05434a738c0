use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::{camera::Viewport, pose::Pose};

/// A position on the screen in pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// Horizontal coordinate, growing to the right.
    pub x: f32,
    /// Vertical coordinate, growing downwards.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The point halfway between `self` and `other`.
    pub fn midpoint(&self, other: &ScreenPoint) -> ScreenPoint {
        ScreenPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// The point shifted by the given offset.
    pub fn offset(&self, dx: f32, dy: f32) -> ScreenPoint {
        ScreenPoint::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance in pixels.
    pub fn distance(&self, other: &ScreenPoint) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Project the position of a pose into screen coordinates.
///
/// # Arguments
///
/// * `pose` - The pose to project, in world coordinates.
/// * `view` - The world to camera transform.
/// * `projection` - The camera to clip space transform.
/// * `viewport` - The size of the screen in pixels.
///
/// # Returns
///
/// The screen position, or `None` when the point lies behind or on the camera plane.
/// Points outside the viewport are returned unclamped.
///
/// # Example
///
/// ```
/// use armeasure_geometry::{project, Mat4, Pose, Viewport};
///
/// let viewport = Viewport::new(1080, 2400)?;
/// let view = Mat4::from_translation([0.0, 0.0, -1.0].into());
/// let screen = project(&Pose::IDENTITY, &view, &Mat4::IDENTITY, viewport);
/// # Ok::<(), armeasure_geometry::GeometryError>(())
/// ```
pub fn project(
    pose: &Pose,
    view: &Mat4,
    projection: &Mat4,
    viewport: Viewport,
) -> Option<ScreenPoint> {
    project_point(pose.translation(), view, projection, viewport)
}

/// Project a world point into screen coordinates, see [`project`].
pub fn project_point(
    point: Vec3,
    view: &Mat4,
    projection: &Mat4,
    viewport: Viewport,
) -> Option<ScreenPoint> {
    let clip = *projection * (*view * point.extend(1.0));

    // behind or on the camera plane, NaN included
    if !(clip.w > 0.0) {
        return None;
    }

    Some(ndc_to_screen(clip.x / clip.w, clip.y / clip.w, viewport))
}

/// Map normalized device coordinates to screen pixels.
///
/// NDC has its origin at the center with Y up, the screen has its origin at the
/// top-left corner with Y down.
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, viewport: Viewport) -> ScreenPoint {
    ScreenPoint::new(
        (ndc_x + 1.0) * viewport.width() as f32 / 2.0,
        (1.0 - ndc_y) * viewport.height() as f32 / 2.0,
    )
}

/// Map screen pixels to normalized device coordinates, the inverse of [`ndc_to_screen`].
#[inline]
pub fn screen_to_ndc(screen: ScreenPoint, viewport: Viewport) -> (f32, f32) {
    (
        2.0 * screen.x / viewport.width() as f32 - 1.0,
        1.0 - 2.0 * screen.y / viewport.height() as f32,
    )
}
