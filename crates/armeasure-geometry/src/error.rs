/// An error type for the geometry module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GeometryError {
    /// Error when a viewport has a zero dimension.
    #[error("Invalid viewport size ({0}x{1})")]
    InvalidViewport(u32, u32),

    /// Error when a rotation quaternion cannot be normalized.
    #[error("Rotation quaternion has zero length")]
    DegenerateRotation,

    /// Error when the perspective parameters do not describe a valid frustum.
    #[error("Invalid perspective parameters: {0}")]
    InvalidPerspective(String),

    /// Error when a look-at transform has no well defined orientation.
    #[error("Cannot orient a camera looking from {0:?} to {1:?}")]
    DegenerateLookAt([f32; 3], [f32; 3]),
}
