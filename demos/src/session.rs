//! A scripted tracking session.
//!
//! Emits what a provider would report while a user looks around a room:
//! authorization, a table that grows as more of it is seen, the floor, a
//! wall, a plane that is lost again, one corrupted snapshot and shutdown.

use hiddenbox_core::buffer::VertexFormat;
use hiddenbox_core::math::quat_from_rotation_y;
use hiddenbox_core::mesh::generators::generate_plane_geometry;
use hiddenbox_tracking::{
    AnchorTransform, AuthorizationStatus, PlaneAlignment, PlaneAnchor, PlaneClassification,
    PlaneEvent, PlaneId, SessionEvent, SessionState, TrackingEvent,
};
use tokio::sync::mpsc;

pub const TABLE: PlaneId = PlaneId(0x5a1e_0001_0000_4000_8000_0000_0000_0001);
pub const FLOOR: PlaneId = PlaneId(0x5a1e_0001_0000_4000_8000_0000_0000_0002);
pub const WALL: PlaneId = PlaneId(0x5a1e_0001_0000_4000_8000_0000_0000_0003);
pub const SEAT: PlaneId = PlaneId(0x5a1e_0001_0000_4000_8000_0000_0000_0004);

/// Scripted session parameters.
#[derive(Debug, Clone, Copy)]
pub struct ScriptedSession {
    /// Number of table refinements after the initial detection.
    pub updates: u32,
    /// Half extent of the table when first detected, in metres.
    pub initial_half_extent: f32,
}

impl Default for ScriptedSession {
    fn default() -> Self {
        Self {
            updates: 3,
            initial_half_extent: 0.25,
        }
    }
}

impl ScriptedSession {
    /// All events of the session, in delivery order.
    pub fn events(&self) -> Vec<TrackingEvent> {
        let table_pose = AnchorTransform::IDENTITY
            .with_translation([0.2, 0.72, -1.1])
            .with_rotation(quat_from_rotation_y(0.3));

        let mut events: Vec<TrackingEvent> = vec![
            SessionEvent::AuthorizationChanged {
                capability: "world_sensing".into(),
                status: AuthorizationStatus::Allowed,
            }
            .into(),
            SessionEvent::StateChanged(SessionState::Running).into(),
            PlaneEvent::added(TABLE, self.table(0, table_pose)).into(),
            PlaneEvent::added(
                FLOOR,
                PlaneAnchor::new(generate_plane_geometry(
                    2.5,
                    2.0,
                    4,
                    VertexFormat::Float32x3Aligned,
                ))
                .with_classification(PlaneClassification::Floor),
            )
            .into(),
            PlaneEvent::added(
                WALL,
                PlaneAnchor::new(generate_plane_geometry(1.5, 1.2, 2, VertexFormat::Float32x3))
                    .with_transform(AnchorTransform::IDENTITY.with_translation([0.0, 1.2, -2.0]))
                    .with_classification(PlaneClassification::Wall)
                    .with_alignment(PlaneAlignment::Vertical),
            )
            .into(),
            PlaneEvent::added(SEAT, self.seat()).into(),
        ];

        for step in 1..=self.updates {
            events.push(PlaneEvent::updated(TABLE, self.table(step, table_pose)).into());
        }

        events.push(PlaneEvent::updated(SEAT, corrupted()).into());
        events.push(PlaneEvent::removed(SEAT).into());
        events.push(SessionEvent::StateChanged(SessionState::Stopped).into());
        events
    }

    /// Send every event on `tx`, stopping early if the receiver is gone.
    pub async fn play(self, tx: mpsc::Sender<TrackingEvent>) {
        for event in self.events() {
            if tx.send(event).await.is_err() {
                log::debug!("replay receiver closed");
                return;
            }
        }
    }

    fn table(&self, step: u32, pose: AnchorTransform) -> PlaneAnchor {
        let half = self.initial_half_extent * (1.0 + 0.25 * step as f32);
        PlaneAnchor::new(generate_plane_geometry(
            half,
            half * 0.75,
            1 + step,
            VertexFormat::Float32x3Aligned,
        ))
        .with_transform(pose)
        .with_classification(PlaneClassification::Table)
    }

    fn seat(&self) -> PlaneAnchor {
        PlaneAnchor::new(generate_plane_geometry(0.2, 0.2, 1, VertexFormat::Float32x3))
            .with_transform(AnchorTransform::IDENTITY.with_translation([-0.8, 0.45, -0.6]))
            .with_classification(PlaneClassification::Seat)
    }
}

/// Aligned vertex bytes reported as packed.
fn corrupted() -> PlaneAnchor {
    let mut geometry = generate_plane_geometry(0.2, 0.2, 1, VertexFormat::Float32x3Aligned);
    geometry.vertices.format = VertexFormat::Float32x3;
    PlaneAnchor::new(geometry).with_classification(PlaneClassification::Seat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_count() {
        let session = ScriptedSession {
            updates: 2,
            ..ScriptedSession::default()
        };
        // 2 session + 4 adds + 2 updates + corrupt + remove + stop
        assert_eq!(session.events().len(), 11);
    }
}
