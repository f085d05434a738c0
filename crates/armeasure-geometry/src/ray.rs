use glam::{Mat4, Vec3};

use crate::{
    camera::Viewport,
    projection::{screen_to_ndc, ScreenPoint},
};

/// A half line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start of the ray.
    pub origin: Vec3,
    /// Unit direction of the ray.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction.
    ///
    /// Returns `None` if the direction has zero length.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        Some(Self {
            origin,
            direction: direction.try_normalize()?,
        })
    }

    /// Cast a ray through a screen point by unprojecting it onto the near and far
    /// clipping planes.
    ///
    /// Returns `None` when the combined view-projection matrix is not invertible.
    pub fn from_screen(
        screen: ScreenPoint,
        view: &Mat4,
        projection: &Mat4,
        viewport: Viewport,
    ) -> Option<Self> {
        let clip_from_world = *projection * *view;
        if clip_from_world.determinant().abs() <= f32::EPSILON {
            return None;
        }
        let world_from_clip = clip_from_world.inverse();

        let (ndc_x, ndc_y) = screen_to_ndc(screen, viewport);
        let near = world_from_clip.project_point3(Vec3::new(ndc_x, ndc_y, -1.0));
        let far = world_from_clip.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Self::new(near, far - near)
    }

    /// The point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersect the ray with a plane given by a point and a normal.
    ///
    /// Returns the distance along the ray, or `None` if the plane is parallel to the
    /// ray or lies behind its origin.
    pub fn intersect_plane(&self, plane_point: Vec3, plane_normal: Vec3) -> Option<f32> {
        let denom = plane_normal.dot(self.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = plane_normal.dot(plane_point - self.origin) / denom;
        (t > 0.0).then_some(t)
    }
}
