use crate::pose::Pose;

/// Classification of what a hit-test ray intersected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitKind {
    /// A detected plane.
    Plane,
    /// A feature point with an estimated surface normal.
    EstimatedPoint,
    /// Anything else the provider reports.
    None,
}

/// A single intersection of a screen ray with the tracked scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Pose of the intersection in world coordinates.
    pub pose: Pose,
    /// What the ray intersected.
    pub kind: HitKind,
}

impl HitResult {
    /// Create a new hit result.
    pub fn new(pose: Pose, kind: HitKind) -> Self {
        Self { pose, kind }
    }

    /// Whether the hit lies on a detected plane.
    #[inline]
    pub fn is_plane(&self) -> bool {
        self.kind == HitKind::Plane
    }
}
