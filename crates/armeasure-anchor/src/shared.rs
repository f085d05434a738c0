use std::sync::{Arc, PoisonError, RwLock};

use armeasure_geometry::{Pose, TrackingState};

use crate::{
    anchor::{Anchor, AnchorId},
    store::AnchorStore,
};

/// An immutable view of the anchors at a given store version.
#[derive(Debug, Clone)]
pub struct AnchorSnapshot {
    anchors: Arc<Vec<Anchor>>,
    version: u64,
}

impl AnchorSnapshot {
    /// All anchors in insertion order.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// The anchors in tracking state, in insertion order.
    pub fn active_anchors(&self) -> impl Iterator<Item = &Anchor> + Clone + '_ {
        self.anchors.iter().filter(|a| a.is_active())
    }

    /// The store version this snapshot was taken at.
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// A thread safe handle to an [`AnchorStore`].
///
/// Writers take a short exclusive lock; readers take a snapshot which is a reference
/// counted pointer to a fully built list, so a reader never sees a partial entry and
/// never holds the lock while rendering.
#[derive(Debug, Clone, Default)]
pub struct SharedAnchorStore {
    inner: Arc<RwLock<AnchorStore>>,
}

impl SharedAnchorStore {
    /// Create an empty shared store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new anchor, see [`AnchorStore::append`].
    pub fn append(&self, pose: Pose) -> AnchorId {
        self.write(|store| store.append(pose))
    }

    /// Issue a fresh id, see [`AnchorStore::reserve_id`].
    pub fn reserve_id(&self) -> AnchorId {
        self.write(|store| store.reserve_id())
    }

    /// Add an anchor built around a reserved id, see [`AnchorStore::insert`].
    pub fn insert(&self, anchor: Anchor) {
        self.write(|store| store.insert(anchor))
    }

    /// Remove every anchor, see [`AnchorStore::clear`].
    pub fn clear(&self) {
        self.write(|store| store.clear())
    }

    /// Update the tracking status of an anchor, see [`AnchorStore::set_tracking`].
    pub fn set_tracking(&self, id: AnchorId, tracking: TrackingState) -> bool {
        self.write(|store| store.set_tracking(id, tracking))
    }

    /// Take a consistent snapshot of the current anchors.
    pub fn snapshot(&self) -> AnchorSnapshot {
        // a panicking writer cannot leave a half written list behind, the list is
        // swapped or copied as a whole
        let store = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        AnchorSnapshot {
            anchors: store.snapshot_anchors(),
            version: store.version(),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut AnchorStore) -> R) -> R {
        let mut store = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}

impl From<AnchorStore> for SharedAnchorStore {
    fn from(store: AnchorStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }
}
