//! # hiddenbox tracking
//!
//! Turns a stream of plane-anchor events into renderable meshes, static
//! collision shapes and a registry of live planes.
//!
//! - [`event`] - Tracking events (plane add/update/remove, session events)
//! - [`builder`] - Per-plane mesh and collision construction
//! - [`collision`] - Static triangle-mesh collision shapes (rapier)
//! - [`scene`] - The sink that receives meshes and collision shapes
//! - [`registry`] - Live planes keyed by anchor id
//! - [`manager`] - The per-plane state machine and the event loop
//! - [`placement`] - Anchoring the hidden box on a detected table
//! - [`config`] - Tracking configuration
//!
//! # Example
//!
//! ```ignore
//! let (tx, rx) = tokio::sync::mpsc::channel(config.event_capacity);
//! let mut manager = PlaneTrackingManager::new(config, PhysicsScene::new());
//! tokio::spawn(provider.forward_events(tx));
//! let summary = manager.run(rx).await;
//! ```

pub mod builder;
pub mod collision;
pub mod config;
mod error;
pub mod event;
pub mod manager;
pub mod placement;
pub mod registry;
pub mod scene;

pub use builder::{PlaneGeometry, PlaneMeshBuilder};
pub use collision::{ShapeError, StaticCollisionShape};
pub use config::{ConfigError, IndexWidth, TrackingConfig};
pub use error::TrackingError;
pub use event::{
    AnchorTransform, AuthorizationStatus, PlaneAlignment, PlaneAnchor, PlaneClassification,
    PlaneEvent, PlaneEventKind, PlaneId, SessionEvent, SessionState, TrackingEvent,
};
pub use manager::{PlaneTrackingManager, PlaneTransition, RunSummary};
pub use placement::{BoxAnchor, find_box_anchor};
pub use registry::{PlaneRecord, PlaneRegistry, PlaneState};
pub use scene::{EntityHandle, PhysicsScene, PlaneScene, SceneMesh};
