use armeasure_geometry::GeometryError;

/// An error type for the tracking module.
#[derive(thiserror::Error, Debug)]
pub enum TrackingError {
    /// Error when the provider is used before `start` or after `stop`.
    #[error("The tracking session is not running")]
    NotRunning,

    /// Error when the provider could not deliver the current frame.
    #[error("Camera frame unavailable: {0}")]
    FrameUnavailable(String),

    /// Error when the provider refused to create an anchor.
    #[error("Anchor rejected: {0}")]
    AnchorRejected(String),

    /// Error when the provider built invalid camera geometry.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
