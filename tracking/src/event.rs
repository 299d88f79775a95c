//! Events delivered by the tracking session.

use std::fmt;

use hiddenbox_core::buffer::GeometrySnapshot;
use hiddenbox_core::math::transform_point;

/// Stable identifier of a plane anchor.
///
/// Displayed in the hyphenated UUID form the tracking provider uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaneId(pub u128);

impl PlaneId {
    /// Create an id from its 128-bit value.
    pub const fn from_u128(value: u128) -> Self {
        Self(value)
    }

    /// The 128-bit value.
    pub const fn as_u128(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for PlaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            (v >> 96) as u32,
            (v >> 80) as u16,
            (v >> 64) as u16,
            (v >> 48) as u16,
            v & 0xffff_ffff_ffff
        )
    }
}

/// Anchor pose: origin-from-anchor translation and rotation.
///
/// Uses plain arrays; rotation is a quaternion `[x, y, z, w]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorTransform {
    /// Translation [x, y, z].
    pub translation: [f32; 3],
    /// Rotation quaternion [x, y, z, w].
    pub rotation: [f32; 4],
}

impl AnchorTransform {
    /// Identity pose at the session origin.
    pub const IDENTITY: Self = Self {
        translation: [0.0, 0.0, 0.0],
        rotation: [0.0, 0.0, 0.0, 1.0],
    };

    /// Returns this transform with a different translation.
    #[must_use]
    pub const fn with_translation(mut self, translation: [f32; 3]) -> Self {
        self.translation = translation;
        self
    }

    /// Returns this transform with a different rotation.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: [f32; 4]) -> Self {
        self.rotation = rotation;
        self
    }

    /// Map a point from anchor space to session space.
    pub fn apply(&self, point: [f32; 3]) -> [f32; 3] {
        transform_point(self.translation, self.rotation, point)
    }
}

impl Default for AnchorTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Semantic class the provider assigned to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaneClassification {
    Table,
    Floor,
    Wall,
    Ceiling,
    Seat,
    Window,
    Door,
    #[default]
    Unknown,
}

/// Orientation of a plane relative to gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaneAlignment {
    #[default]
    Horizontal,
    Vertical,
}

/// Payload of a plane add/update event.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneAnchor {
    pub transform: AnchorTransform,
    pub classification: PlaneClassification,
    pub alignment: PlaneAlignment,
    pub geometry: GeometrySnapshot,
}

impl PlaneAnchor {
    /// Create a horizontal, unclassified anchor at the identity pose.
    pub fn new(geometry: GeometrySnapshot) -> Self {
        Self {
            transform: AnchorTransform::IDENTITY,
            classification: PlaneClassification::Unknown,
            alignment: PlaneAlignment::Horizontal,
            geometry,
        }
    }

    /// Set the anchor pose.
    #[must_use]
    pub fn with_transform(mut self, transform: AnchorTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the classification.
    #[must_use]
    pub fn with_classification(mut self, classification: PlaneClassification) -> Self {
        self.classification = classification;
        self
    }

    /// Set the alignment.
    #[must_use]
    pub fn with_alignment(mut self, alignment: PlaneAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// What happened to a plane anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneEventKind {
    Added,
    Updated,
    Removed,
}

/// A single plane anchor notification.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneEvent {
    pub plane: PlaneId,
    pub kind: PlaneEventKind,
    /// Present for add/update, absent for remove.
    pub anchor: Option<PlaneAnchor>,
}

impl PlaneEvent {
    /// A plane was detected.
    pub fn added(plane: PlaneId, anchor: PlaneAnchor) -> Self {
        Self {
            plane,
            kind: PlaneEventKind::Added,
            anchor: Some(anchor),
        }
    }

    /// A plane's pose or geometry changed.
    pub fn updated(plane: PlaneId, anchor: PlaneAnchor) -> Self {
        Self {
            plane,
            kind: PlaneEventKind::Updated,
            anchor: Some(anchor),
        }
    }

    /// A plane is no longer tracked.
    pub fn removed(plane: PlaneId) -> Self {
        Self {
            plane,
            kind: PlaneEventKind::Removed,
            anchor: None,
        }
    }
}

/// User authorization state for a tracking capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    Allowed,
    Denied,
    NotDetermined,
}

/// Lifecycle state of the tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initialized,
    Running,
    Paused,
    Stopped,
}

/// Session-level notifications. Logged, never applied to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    AuthorizationChanged {
        capability: String,
        status: AuthorizationStatus,
    },
    StateChanged(SessionState),
    ProviderError(String),
}

/// Everything the tracking session can deliver.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    Plane(PlaneEvent),
    Session(SessionEvent),
}

impl From<PlaneEvent> for TrackingEvent {
    fn from(event: PlaneEvent) -> Self {
        Self::Plane(event)
    }
}

impl From<SessionEvent> for TrackingEvent {
    fn from(event: SessionEvent) -> Self {
        Self::Session(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_id_display() {
        let id = PlaneId::from_u128(0x0123_4567_89ab_cdef_0011_2233_4455_6677);
        assert_eq!(id.to_string(), "01234567-89ab-cdef-0011-223344556677");
        assert_eq!(PlaneId(1).to_string(), "00000000-0000-0000-0000-000000000001");
    }

    #[test]
    fn test_anchor_transform_apply() {
        let t = AnchorTransform::IDENTITY.with_translation([0.0, 0.75, -1.0]);
        assert_eq!(t.apply([0.5, 0.0, 0.0]), [0.5, 0.75, -1.0]);
    }

    #[test]
    fn test_removed_has_no_anchor() {
        let event = PlaneEvent::removed(PlaneId(7));
        assert_eq!(event.kind, PlaneEventKind::Removed);
        assert!(event.anchor.is_none());
    }
}
