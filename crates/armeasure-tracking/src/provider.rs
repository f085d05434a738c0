use armeasure_anchor::{Anchor, AnchorId};
use armeasure_geometry::{CameraFrame, HitKind, HitResult, PointCloud, Pose, TrackingState};

use crate::{config::ClipPlanes, error::TrackingError};

/// The source of camera frames, hit tests and anchors for a measurement session.
///
/// Implementations wrap an AR runtime; the session drives them once per display frame
/// from a single thread.
pub trait TrackingProvider {
    /// Begin tracking. Calling `start` on a running provider is a no-op.
    fn start(&mut self) -> Result<(), TrackingError>;

    /// Stop tracking and release the camera.
    fn stop(&mut self);

    /// Whether the provider is between `start` and `stop`.
    fn is_running(&self) -> bool;

    /// Acquire the latest camera frame.
    ///
    /// Returns `Ok(None)` when no new frame arrived since the previous call.
    ///
    /// # Arguments
    ///
    /// * `clip` - The clipping planes of the projection matrix.
    fn current_frame(&mut self, clip: &ClipPlanes) -> Result<Option<CameraFrame>, TrackingError>;

    /// Cast a ray through a screen point of the latest frame.
    ///
    /// Results are ordered by the provider, nearest first.
    fn hit_test(&self, x: f32, y: f32) -> Vec<HitResult>;

    /// Create a tracked anchor at a pose.
    ///
    /// The provider keeps its native anchor under `id`, later tracking queries name the
    /// anchor by that id. Returns the anchor at the pose the runtime settled it at.
    ///
    /// # Arguments
    ///
    /// * `id` - The id reserved for the anchor in the session's store.
    /// * `pose` - The pose of the selected hit.
    fn create_anchor(&mut self, id: AnchorId, pose: &Pose) -> Result<Anchor, TrackingError>;

    /// The feature points observed in the latest frame.
    fn point_cloud(&self) -> Option<PointCloud>;

    /// The current tracking status of an anchor created by this provider.
    ///
    /// Anchors are matched by id, an unknown id is not tracking.
    fn anchor_tracking_state(&self, anchor: &Anchor) -> TrackingState;
}

/// Pick the hit to measure to: the first plane hit, else the first estimated point.
///
/// # Example
///
/// ```
/// use armeasure_geometry::{HitKind, HitResult, Pose};
/// use armeasure_tracking::select_hit;
///
/// let hits = [
///     HitResult::new(Pose::from_xyz(0.0, 0.0, -1.0), HitKind::EstimatedPoint),
///     HitResult::new(Pose::from_xyz(0.0, 0.0, -2.0), HitKind::Plane),
/// ];
/// assert_eq!(select_hit(&hits).map(|h| h.kind), Some(HitKind::Plane));
/// ```
pub fn select_hit(hits: &[HitResult]) -> Option<HitResult> {
    hits.iter()
        .find(|h| h.kind == HitKind::Plane)
        .or_else(|| hits.iter().find(|h| h.kind == HitKind::EstimatedPoint))
        .copied()
}
