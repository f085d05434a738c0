use glam::{Mat3, Mat4, Quat, Vec3, Vec4};

use crate::error::GeometryError;

/// A rigid body transform made of a position and a unit quaternion orientation.
///
/// Poses are immutable values. `a.compose(&b)` maps points expressed in the local
/// frame of `b` into the frame `a` is expressed in, so composing a world pose with a
/// local offset yields the offset's world pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    translation: Vec3,
    rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// The identity pose, located at the origin with no rotation.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Create a new pose from a translation and a rotation.
    ///
    /// The rotation is normalized before being stored.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateRotation`] if the quaternion has zero length.
    pub fn new(translation: Vec3, rotation: Quat) -> Result<Self, GeometryError> {
        let rotation = Vec4::from(rotation)
            .try_normalize()
            .map(Quat::from_vec4)
            .ok_or(GeometryError::DegenerateRotation)?;
        Ok(Self {
            translation,
            rotation,
        })
    }

    /// Create a pure translation pose.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Create a pure translation pose from its components.
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::from_translation(Vec3::new(x, y, z))
    }

    /// Create the pose of a camera placed at `eye` and looking at `target`.
    ///
    /// The camera looks down its local -Z axis with +Y up.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateLookAt`] when `eye` and `target` coincide or
    /// when the viewing direction is parallel to `up`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Result<Self, GeometryError> {
        let degenerate = || GeometryError::DegenerateLookAt(eye.to_array(), target.to_array());

        let forward = (target - eye).try_normalize().ok_or_else(degenerate)?;
        let right = forward.cross(up).try_normalize().ok_or_else(degenerate)?;
        let camera_up = right.cross(forward);

        let rotation = Quat::from_mat3(&Mat3::from_cols(right, camera_up, -forward));
        Self::new(eye, rotation)
    }

    /// The position of the pose.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// The orientation of the pose as a unit quaternion.
    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// The x component of the position.
    #[inline]
    pub fn tx(&self) -> f32 {
        self.translation.x
    }

    /// The y component of the position.
    #[inline]
    pub fn ty(&self) -> f32 {
        self.translation.y
    }

    /// The z component of the position.
    #[inline]
    pub fn tz(&self) -> f32 {
        self.translation.z
    }

    /// Compose this pose with `other`, returning `self ∘ other`.
    pub fn compose(&self, other: &Pose) -> Pose {
        Pose {
            translation: self.translation + self.rotation * other.translation,
            rotation: (self.rotation * other.rotation).normalize(),
        }
    }

    /// The inverse transform.
    pub fn inverse(&self) -> Pose {
        let rotation = self.rotation.inverse();
        Pose {
            translation: -(rotation * self.translation),
            rotation,
        }
    }

    /// Transform a point expressed in the local frame of the pose.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.translation
    }

    /// The pose as a homogeneous 4x4 matrix.
    pub fn as_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }
}
