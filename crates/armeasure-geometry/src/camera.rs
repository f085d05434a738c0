use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::{
    error::GeometryError,
    pose::Pose,
    projection::{self, ScreenPoint},
    ray::Ray,
};

/// Size of the rendering surface in pixels.
///
/// # Examples
///
/// ```
/// use armeasure_geometry::Viewport;
///
/// let viewport = Viewport::new(1080, 2400)?;
/// assert_eq!(viewport.width(), 1080);
/// assert_eq!(viewport.height(), 2400);
/// # Ok::<(), armeasure_geometry::GeometryError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Create a new viewport.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidViewport`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::InvalidViewport(width, height));
        }
        Ok(Self { width, height })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width over height.
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// The center of the viewport, where the live hit test is aimed.
    #[inline]
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Tracking status of the camera or of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrackingState {
    /// Tracking has not started or has been lost for good.
    #[default]
    NotTracking,
    /// Pose is being tracked and can be used.
    Tracking,
    /// Tracking is temporarily suspended and may resume.
    Paused,
}

/// The camera state of a single tracked frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// World to camera transform.
    pub view: Mat4,
    /// Camera to clip space transform.
    pub projection: Mat4,
    /// Tracking status of the camera for this frame.
    pub tracking: TrackingState,
    /// Size of the rendering surface.
    pub viewport: Viewport,
}

impl CameraFrame {
    /// Create a new camera frame.
    pub fn new(view: Mat4, projection: Mat4, tracking: TrackingState, viewport: Viewport) -> Self {
        Self {
            view,
            projection,
            tracking,
            viewport,
        }
    }

    /// Create a camera frame from the camera's pose in world coordinates.
    pub fn from_camera_pose(
        camera_pose: &Pose,
        projection: Mat4,
        tracking: TrackingState,
        viewport: Viewport,
    ) -> Self {
        Self::new(view_matrix(camera_pose), projection, tracking, viewport)
    }

    /// Whether the camera is tracking in this frame.
    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.tracking == TrackingState::Tracking
    }

    /// The center of the viewport.
    #[inline]
    pub fn screen_center(&self) -> ScreenPoint {
        self.viewport.center()
    }

    /// Project a pose into screen coordinates, see [`projection::project`].
    #[inline]
    pub fn project(&self, pose: &Pose) -> Option<ScreenPoint> {
        projection::project(pose, &self.view, &self.projection, self.viewport)
    }

    /// Project a world point into screen coordinates, see [`projection::project_point`].
    #[inline]
    pub fn project_point(&self, point: Vec3) -> Option<ScreenPoint> {
        projection::project_point(point, &self.view, &self.projection, self.viewport)
    }

    /// Cast a ray from a screen point into the scene.
    pub fn ray_from_screen(&self, screen: ScreenPoint) -> Option<Ray> {
        Ray::from_screen(screen, &self.view, &self.projection, self.viewport)
    }
}

/// Build a right-handed OpenGL-style perspective projection matrix.
///
/// # Arguments
///
/// * `fov_y` - The vertical field of view in radians.
/// * `aspect_ratio` - The viewport width over height.
/// * `near` - The distance to the near clipping plane.
/// * `far` - The distance to the far clipping plane.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidPerspective`] if the parameters do not describe a
/// valid frustum.
pub fn perspective_projection(
    fov_y: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
) -> Result<Mat4, GeometryError> {
    if !(fov_y > 0.0 && fov_y < std::f32::consts::PI) {
        return Err(GeometryError::InvalidPerspective(format!(
            "vertical field of view must be in (0, pi), got {fov_y}"
        )));
    }
    if !(aspect_ratio > 0.0) {
        return Err(GeometryError::InvalidPerspective(format!(
            "aspect ratio must be positive, got {aspect_ratio}"
        )));
    }
    if !(near > 0.0 && far > near) {
        return Err(GeometryError::InvalidPerspective(format!(
            "clip planes must satisfy 0 < near < far, got near={near} far={far}"
        )));
    }
    Ok(Mat4::perspective_rh_gl(fov_y, aspect_ratio, near, far))
}

/// The view matrix of a camera, i.e. the inverse of its world transform.
pub fn view_matrix(camera_pose: &Pose) -> Mat4 {
    camera_pose.inverse().as_matrix()
}
