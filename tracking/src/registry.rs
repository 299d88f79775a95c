//! Live planes keyed by anchor id.

use std::collections::HashMap;

use hiddenbox_core::math::Bounds3;

use crate::event::{AnchorTransform, PlaneAlignment, PlaneClassification, PlaneId};
use crate::scene::EntityHandle;

/// Lifecycle state of a plane id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneState {
    /// No record; the plane was never added or has been removed.
    Absent,
    /// Exactly one record with attached entities.
    Present,
}

/// What the registry knows about one live plane.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneRecord {
    pub plane: PlaneId,
    /// Visual mesh entity in the scene.
    pub mesh_entity: EntityHandle,
    /// Collision entity, if collision is enabled.
    pub collision_entity: Option<EntityHandle>,
    pub transform: AnchorTransform,
    pub classification: PlaneClassification,
    pub alignment: PlaneAlignment,
    /// Bounds of the plane geometry in anchor space.
    pub bounds: Bounds3,
    /// Number of successful updates since the plane was added.
    pub revision: u32,
    /// Sequence number of the event that added the plane.
    pub first_seen: u64,
}

/// Registry of live planes. Mutated only by
/// [`PlaneTrackingManager`](crate::PlaneTrackingManager).
#[derive(Debug, Default)]
pub struct PlaneRegistry {
    records: HashMap<PlaneId, PlaneRecord>,
}

impl PlaneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, plane: PlaneId) -> Option<&PlaneRecord> {
        self.records.get(&plane)
    }

    pub fn contains(&self, plane: PlaneId) -> bool {
        self.records.contains_key(&plane)
    }

    pub fn state(&self, plane: PlaneId) -> PlaneState {
        if self.contains(plane) {
            PlaneState::Present
        } else {
            PlaneState::Absent
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over live records in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &PlaneRecord> {
        self.records.values()
    }

    /// Copy of every live record, oldest first.
    pub fn snapshot(&self) -> Vec<PlaneRecord> {
        let mut records: Vec<PlaneRecord> = self.records.values().cloned().collect();
        records.sort_by_key(|r| (r.first_seen, r.plane));
        records
    }

    pub(crate) fn insert(&mut self, record: PlaneRecord) -> Option<PlaneRecord> {
        self.records.insert(record.plane, record)
    }

    pub(crate) fn remove(&mut self, plane: PlaneId) -> Option<PlaneRecord> {
        self.records.remove(&plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(plane: u128, first_seen: u64) -> PlaneRecord {
        PlaneRecord {
            plane: PlaneId(plane),
            mesh_entity: EntityHandle(plane as u64 * 2),
            collision_entity: None,
            transform: AnchorTransform::IDENTITY,
            classification: PlaneClassification::Table,
            alignment: PlaneAlignment::Horizontal,
            bounds: Bounds3 {
                min: [-0.5, 0.0, -0.5],
                max: [0.5, 0.0, 0.5],
            },
            revision: 0,
            first_seen,
        }
    }

    #[test]
    fn test_insert_and_remove() {
        let mut registry = PlaneRegistry::new();
        assert_eq!(registry.state(PlaneId(1)), PlaneState::Absent);

        assert!(registry.insert(record(1, 1)).is_none());
        assert_eq!(registry.state(PlaneId(1)), PlaneState::Present);
        assert_eq!(registry.len(), 1);

        // Re-inserting replaces, never duplicates.
        assert!(registry.insert(record(1, 1)).is_some());
        assert_eq!(registry.len(), 1);

        assert!(registry.remove(PlaneId(1)).is_some());
        assert!(registry.remove(PlaneId(1)).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_snapshot_is_oldest_first() {
        let mut registry = PlaneRegistry::new();
        registry.insert(record(3, 7));
        registry.insert(record(1, 9));
        registry.insert(record(2, 2));

        let order: Vec<u64> = registry.snapshot().iter().map(|r| r.first_seen).collect();
        assert_eq!(order, vec![2, 7, 9]);
    }
}
