use armeasure_geometry::{Pose, TrackingState};

/// Identifier of an anchor, unique within the store that issued it.
///
/// Identifiers are never reused, not even after the store is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

impl std::fmt::Display for AnchorId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

/// A user confirmed measurement endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Identifier issued by the store.
    pub id: AnchorId,
    /// Pose of the anchor in world coordinates.
    pub pose: Pose,
    /// Current tracking status of the anchor.
    pub tracking: TrackingState,
}

impl Anchor {
    /// Create a new anchor in tracking state.
    pub fn new(id: AnchorId, pose: Pose) -> Self {
        Self {
            id,
            pose,
            tracking: TrackingState::Tracking,
        }
    }

    /// Whether the anchor takes part in measurement.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.tracking == TrackingState::Tracking
    }
}
