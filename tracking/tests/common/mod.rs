//! Shared fixtures for the tracking integration tests.

#![allow(dead_code)]

use hiddenbox_core::buffer::VertexFormat;
use hiddenbox_core::mesh::generators::generate_plane_geometry;
use hiddenbox_tracking::{
    AnchorTransform, PhysicsScene, PlaneAnchor, PlaneClassification, PlaneTrackingManager,
    TrackingConfig,
};

pub fn manager() -> PlaneTrackingManager<PhysicsScene> {
    PlaneTrackingManager::new(TrackingConfig::default(), PhysicsScene::new())
}

/// A horizontal table of `half` x `half` half-extents at `translation`.
pub fn table(half: f32, translation: [f32; 3]) -> PlaneAnchor {
    PlaneAnchor::new(generate_plane_geometry(half, half, 2, VertexFormat::Float32x3))
        .with_transform(AnchorTransform::IDENTITY.with_translation(translation))
        .with_classification(PlaneClassification::Table)
}

pub fn floor() -> PlaneAnchor {
    PlaneAnchor::new(generate_plane_geometry(2.0, 2.0, 1, VertexFormat::Float32x3Aligned))
        .with_classification(PlaneClassification::Floor)
}

/// SIMD-aligned vertex bytes mislabelled as packed: fails with a layout
/// mismatch.
pub fn bad_layout() -> PlaneAnchor {
    let mut geometry = generate_plane_geometry(0.5, 0.5, 1, VertexFormat::Float32x3Aligned);
    geometry.vertices.format = VertexFormat::Float32x3;
    PlaneAnchor::new(geometry).with_classification(PlaneClassification::Table)
}
