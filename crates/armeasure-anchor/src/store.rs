use std::sync::Arc;

use armeasure_geometry::{Pose, TrackingState};

use crate::anchor::{Anchor, AnchorId};

/// An ordered, versioned sequence of anchors.
///
/// Anchors are kept in insertion order. Every mutation bumps the version so callers
/// can cheaply tell whether the content changed since they last looked.
///
/// The anchor list is stored behind an [`Arc`] and copied on write, which makes
/// [`AnchorStore::snapshot_anchors`] free and keeps snapshots immutable.
#[derive(Debug, Clone, Default)]
pub struct AnchorStore {
    anchors: Arc<Vec<Anchor>>,
    next_id: u64,
    version: u64,
}

impl AnchorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new anchor at the end of the sequence.
    ///
    /// The anchor starts in [`TrackingState::Tracking`].
    pub fn append(&mut self, pose: Pose) -> AnchorId {
        let id = self.reserve_id();
        self.insert(Anchor::new(id, pose));
        id
    }

    /// Issue a fresh id without adding an anchor.
    ///
    /// Used when an external runtime has to know the id before the anchor exists.
    /// An id that is reserved but never inserted is simply skipped.
    pub fn reserve_id(&mut self) -> AnchorId {
        let id = AnchorId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an anchor built around an id from [`AnchorStore::reserve_id`] at the end of
    /// the sequence.
    pub fn insert(&mut self, anchor: Anchor) {
        Arc::make_mut(&mut self.anchors).push(anchor);
        self.version += 1;
        log::debug!("appended {} at {:?}", anchor.id, anchor.pose.translation());
    }

    /// Remove every anchor.
    pub fn clear(&mut self) {
        // swap in a fresh list so outstanding snapshots keep the old one intact
        self.anchors = Arc::new(Vec::new());
        self.version += 1;
    }

    /// Update the tracking status of an anchor.
    ///
    /// Returns `false` if no anchor has the given id. The version only changes when
    /// the status actually changes.
    pub fn set_tracking(&mut self, id: AnchorId, tracking: TrackingState) -> bool {
        let Some(index) = self.anchors.iter().position(|a| a.id == id) else {
            return false;
        };
        if self.anchors[index].tracking != tracking {
            Arc::make_mut(&mut self.anchors)[index].tracking = tracking;
            self.version += 1;
            log::debug!("{id} is now {tracking:?}");
        }
        true
    }

    /// Get an anchor by id.
    pub fn get(&self, id: AnchorId) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.id == id)
    }

    /// All anchors in insertion order, whatever their tracking status.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// The anchors currently in tracking state, in insertion order.
    ///
    /// The view is lazy and re-filters the current content on every call.
    pub fn active_anchors(&self) -> impl Iterator<Item = &Anchor> + Clone + '_ {
        self.anchors.iter().filter(|a| a.is_active())
    }

    /// A shared handle to the current anchor list.
    pub fn snapshot_anchors(&self) -> Arc<Vec<Anchor>> {
        Arc::clone(&self.anchors)
    }

    /// Number of anchors, tracked or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether the store holds no anchor.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Monotonic counter incremented on every mutation.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }
}
