//! Anchoring the hidden box on a detected table.

use crate::event::{PlaneAlignment, PlaneClassification, PlaneId};
use crate::registry::{PlaneRecord, PlaneRegistry};

/// Where to put the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxAnchor {
    /// The table plane the box sits on.
    pub plane: PlaneId,
    /// Session-space position of the table's bounds centre.
    pub translation: [f32; 3],
    /// Rotation of the table anchor, quaternion [x, y, z, w].
    pub rotation: [f32; 4],
    /// Extent of the table surface (x, z) in anchor space.
    pub surface_size: [f32; 2],
}

/// Pick the earliest-seen horizontal table whose surface can hold a box of
/// `footprint` (x, z) in either orientation.
pub fn find_box_anchor(registry: &PlaneRegistry, footprint: [f32; 2]) -> Option<BoxAnchor> {
    registry
        .iter()
        .filter(|r| {
            r.classification == PlaneClassification::Table
                && r.alignment == PlaneAlignment::Horizontal
        })
        .filter(|r| fits(surface_size(r), footprint))
        .min_by_key(|r| (r.first_seen, r.plane))
        .map(|r| BoxAnchor {
            plane: r.plane,
            translation: r.transform.apply(r.bounds.center()),
            rotation: r.transform.rotation,
            surface_size: surface_size(r),
        })
}

fn surface_size(record: &PlaneRecord) -> [f32; 2] {
    let [x, _, z] = record.bounds.size();
    [x, z]
}

fn fits(surface: [f32; 2], footprint: [f32; 2]) -> bool {
    let [sx, sz] = surface;
    let [fx, fz] = footprint;
    (sx >= fx && sz >= fz) || (sx >= fz && sz >= fx)
}
