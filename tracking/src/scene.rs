//! The scene side of plane tracking: where meshes and collision shapes go.
//!
//! [`PlaneScene`] is the seam between the tracking core and whatever renders
//! and simulates the planes. [`PhysicsScene`] is the in-process
//! implementation: it keeps mesh descriptors in a table and inserts real
//! rapier colliders into a [`ColliderSet`].

use std::collections::HashMap;

use hiddenbox_core::mesh::MeshDescriptor;
use rapier3d::prelude::*;

use crate::collision::StaticCollisionShape;
use crate::event::{AnchorTransform, PlaneId};

/// Handle to an entity attached to a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(pub(crate) u64);

impl EntityHandle {
    /// Create a handle from a raw id (for custom scene implementations).
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw id.
    pub const fn id(&self) -> u64 {
        self.0
    }
}

/// Receives plane representations from the tracking manager.
///
/// Implementations are only ever driven from the manager's single event
/// loop.
pub trait PlaneScene {
    /// Attach a visual mesh for `plane` at `transform`.
    fn attach_mesh(
        &mut self,
        plane: PlaneId,
        mesh: MeshDescriptor,
        transform: &AnchorTransform,
    ) -> EntityHandle;

    /// Attach a static collision shape for `plane` at `transform`.
    fn attach_collision(
        &mut self,
        plane: PlaneId,
        shape: &StaticCollisionShape,
        transform: &AnchorTransform,
    ) -> EntityHandle;

    /// Detach and discard an entity. Unknown handles are ignored.
    fn detach(&mut self, entity: EntityHandle);
}

/// A mesh attached to a [`PhysicsScene`].
#[derive(Debug, Clone)]
pub struct SceneMesh {
    pub plane: PlaneId,
    pub mesh: MeshDescriptor,
    pub transform: AnchorTransform,
}

/// In-process scene holding mesh descriptors and rapier colliders.
pub struct PhysicsScene {
    next_entity: u64,
    meshes: HashMap<EntityHandle, SceneMesh>,
    collider_handles: HashMap<EntityHandle, (PlaneId, ColliderHandle)>,
    pub colliders: ColliderSet,
    pub bodies: RigidBodySet,
    pub island_manager: IslandManager,
}

impl Default for PhysicsScene {
    fn default() -> Self {
        Self {
            next_entity: 1,
            meshes: HashMap::new(),
            collider_handles: HashMap::new(),
            colliders: ColliderSet::new(),
            bodies: RigidBodySet::new(),
            island_manager: IslandManager::new(),
        }
    }
}

impl PhysicsScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> EntityHandle {
        let entity = EntityHandle(self.next_entity);
        self.next_entity += 1;
        entity
    }

    /// The mesh attached as `entity`, if any.
    pub fn mesh(&self, entity: EntityHandle) -> Option<&SceneMesh> {
        self.meshes.get(&entity)
    }

    /// The rapier collider attached as `entity`, if any.
    pub fn collider(&self, entity: EntityHandle) -> Option<&Collider> {
        let (_, handle) = self.collider_handles.get(&entity)?;
        self.colliders.get(*handle)
    }

    /// Number of attached meshes.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Number of attached colliders.
    pub fn collider_count(&self) -> usize {
        self.collider_handles.len()
    }

    /// Number of meshes attached for `plane`.
    pub fn meshes_for(&self, plane: PlaneId) -> usize {
        self.meshes.values().filter(|m| m.plane == plane).count()
    }

    /// Number of colliders attached for `plane`.
    pub fn colliders_for(&self, plane: PlaneId) -> usize {
        self.collider_handles
            .values()
            .filter(|(p, _)| *p == plane)
            .count()
    }
}

impl PlaneScene for PhysicsScene {
    fn attach_mesh(
        &mut self,
        plane: PlaneId,
        mesh: MeshDescriptor,
        transform: &AnchorTransform,
    ) -> EntityHandle {
        let entity = self.allocate();
        self.meshes.insert(
            entity,
            SceneMesh {
                plane,
                mesh,
                transform: *transform,
            },
        );
        entity
    }

    fn attach_collision(
        &mut self,
        plane: PlaneId,
        shape: &StaticCollisionShape,
        transform: &AnchorTransform,
    ) -> EntityHandle {
        let entity = self.allocate();
        let handle = self.colliders.insert(shape.to_collider(transform));
        self.collider_handles.insert(entity, (plane, handle));
        entity
    }

    fn detach(&mut self, entity: EntityHandle) {
        if self.meshes.remove(&entity).is_some() {
            return;
        }
        if let Some((_, handle)) = self.collider_handles.remove(&entity) {
            self.colliders
                .remove(handle, &mut self.island_manager, &mut self.bodies, false);
        }
    }
}
