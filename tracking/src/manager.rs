//! The per-plane state machine and the event loop that drives it.
//!
//! Each plane id is either [`PlaneState::Absent`] or [`PlaneState::Present`].
//! Add and update build the new representation first; only a successful
//! build touches the scene and registry, so a failed transition leaves the
//! previous state exactly as it was.

use tokio::sync::mpsc;

use crate::builder::PlaneMeshBuilder;
use crate::config::TrackingConfig;
use crate::error::TrackingError;
use crate::event::{
    AuthorizationStatus, PlaneAlignment, PlaneAnchor, PlaneEvent, PlaneEventKind, PlaneId,
    SessionEvent, TrackingEvent,
};
use crate::registry::{PlaneRecord, PlaneRegistry, PlaneState};
use crate::scene::PlaneScene;

/// Outcome of applying one plane event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneTransition {
    /// Absent -> Present.
    Added,
    /// Present -> Present with a new representation.
    Updated,
    /// Present -> Absent.
    Removed,
    /// No change (remove of an absent plane, or a filtered plane).
    Unchanged,
}

/// Counters collected by [`PlaneTrackingManager::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub events: usize,
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub failures: usize,
    pub live_planes: usize,
}

impl RunSummary {
    fn record(&mut self, transition: PlaneTransition) {
        match transition {
            PlaneTransition::Added => self.added += 1,
            PlaneTransition::Updated => self.updated += 1,
            PlaneTransition::Removed => self.removed += 1,
            PlaneTransition::Unchanged => self.unchanged += 1,
        }
    }
}

/// Owns the plane registry and the scene, and applies tracking events to
/// them one at a time.
pub struct PlaneTrackingManager<S: PlaneScene> {
    config: TrackingConfig,
    builder: PlaneMeshBuilder,
    registry: PlaneRegistry,
    scene: S,
    sequence: u64,
}

impl<S: PlaneScene> PlaneTrackingManager<S> {
    pub fn new(config: TrackingConfig, scene: S) -> Self {
        let builder = PlaneMeshBuilder::new(&config);
        Self {
            config,
            builder,
            registry: PlaneRegistry::new(),
            scene,
            sequence: 0,
        }
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    pub fn registry(&self) -> &PlaneRegistry {
        &self.registry
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Consume the manager and hand back the scene.
    pub fn into_scene(self) -> S {
        self.scene
    }

    /// Apply one plane event.
    ///
    /// On error nothing was changed; the caller decides whether to go on.
    pub fn on_plane_event(&mut self, event: PlaneEvent) -> Result<PlaneTransition, TrackingError> {
        self.sequence += 1;
        let PlaneEvent {
            plane,
            kind,
            anchor,
        } = event;

        let transition = match kind {
            PlaneEventKind::Removed => self.remove_plane(plane),
            PlaneEventKind::Added | PlaneEventKind::Updated => {
                let anchor = anchor.ok_or(TrackingError::MissingGeometry { plane })?;
                if self.config.horizontal_only && anchor.alignment == PlaneAlignment::Vertical {
                    log::trace!("plane {plane}: vertical plane ignored");
                    // A plane that turned vertical no longer belongs in the registry.
                    self.remove_plane(plane)
                } else {
                    self.apply_anchor(plane, anchor)?
                }
            }
        };

        log::debug!(
            "plane {plane}: {kind:?} -> {transition:?} (#{})",
            self.sequence
        );
        Ok(transition)
    }

    fn apply_anchor(
        &mut self,
        plane: PlaneId,
        anchor: PlaneAnchor,
    ) -> Result<PlaneTransition, TrackingError> {
        let geometry = self.builder.build(plane, &anchor.geometry)?;

        let previous = self.registry.remove(plane);
        if let Some(previous) = &previous {
            self.detach_record(previous);
        }

        let mesh_entity = self
            .scene
            .attach_mesh(plane, geometry.mesh, &anchor.transform);
        let collision_entity = geometry
            .collision
            .as_ref()
            .map(|shape| self.scene.attach_collision(plane, shape, &anchor.transform));

        let (transition, revision, first_seen) = match &previous {
            Some(previous) => (
                PlaneTransition::Updated,
                previous.revision + 1,
                previous.first_seen,
            ),
            None => (PlaneTransition::Added, 0, self.sequence),
        };

        if transition == PlaneTransition::Added {
            log::info!(
                "plane {plane} added ({:?}, {:?})",
                anchor.classification,
                anchor.alignment
            );
        }

        self.registry.insert(PlaneRecord {
            plane,
            mesh_entity,
            collision_entity,
            transform: anchor.transform,
            classification: anchor.classification,
            alignment: anchor.alignment,
            bounds: geometry.bounds,
            revision,
            first_seen,
        });
        debug_assert_eq!(self.registry.state(plane), PlaneState::Present);

        Ok(transition)
    }

    fn remove_plane(&mut self, plane: PlaneId) -> PlaneTransition {
        match self.registry.remove(plane) {
            Some(record) => {
                self.detach_record(&record);
                log::info!("plane {plane} removed");
                PlaneTransition::Removed
            }
            None => PlaneTransition::Unchanged,
        }
    }

    fn detach_record(&mut self, record: &PlaneRecord) {
        self.scene.detach(record.mesh_entity);
        if let Some(collision) = record.collision_entity {
            self.scene.detach(collision);
        }
    }

    /// Log a session notification. Never touches the registry.
    pub fn on_session_event(&self, event: &SessionEvent) {
        match event {
            SessionEvent::AuthorizationChanged { capability, status } => match status {
                AuthorizationStatus::Allowed => log::info!("{capability}: authorized"),
                AuthorizationStatus::Denied => log::warn!("{capability}: authorization denied"),
                AuthorizationStatus::NotDetermined => {
                    log::debug!("{capability}: authorization not determined")
                }
            },
            SessionEvent::StateChanged(state) => log::info!("tracking session {state:?}"),
            SessionEvent::ProviderError(message) => log::error!("tracking provider: {message}"),
        }
    }

    /// Process events until every sender has been dropped.
    ///
    /// Events are handled strictly in arrival order, each to completion
    /// before the next is received. Failed transitions are logged and
    /// skipped.
    pub async fn run(&mut self, mut events: mpsc::Receiver<TrackingEvent>) -> RunSummary {
        let mut summary = RunSummary::default();

        while let Some(event) = events.recv().await {
            summary.events += 1;
            match event {
                TrackingEvent::Plane(event) => match self.on_plane_event(event) {
                    Ok(transition) => summary.record(transition),
                    Err(err) => {
                        log::warn!("{err}");
                        summary.failures += 1;
                    }
                },
                TrackingEvent::Session(event) => self.on_session_event(&event),
            }
            tokio::task::yield_now().await;
        }

        summary.live_planes = self.registry.len();
        log::info!(
            "event stream closed: {} events, {} failures, {} live planes",
            summary.events,
            summary.failures,
            summary.live_planes
        );
        summary
    }
}
