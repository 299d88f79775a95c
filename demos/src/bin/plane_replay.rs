//! Plane Replay
//!
//! Feeds a scripted tracking session through the plane tracking manager,
//! then reports the live planes and where the hidden box would be placed.
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin plane_replay -- --updates 5 --box-size 0.4
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hiddenbox_demos::session::ScriptedSession;
use hiddenbox_tracking::{PhysicsScene, PlaneTrackingManager, TrackingConfig, find_box_anchor};
use tokio::sync::mpsc;

/// Replay a synthetic plane tracking session.
#[derive(Parser, Debug)]
#[command(name = "plane_replay", version, about)]
struct Args {
    /// Tracking configuration file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip collision shape generation.
    #[arg(long)]
    no_collision: bool,

    /// Number of table refinements to replay.
    #[arg(long, default_value = "3")]
    updates: u32,

    /// Edge length of the (square) box footprint in metres.
    #[arg(long)]
    box_size: Option<f32>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match TrackingConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => TrackingConfig::default(),
    };
    if args.no_collision {
        config.collision = false;
    }
    if let Some(size) = args.box_size {
        config.box_footprint = [size, size];
    }
    log::debug!("{config:?}");

    let (tx, rx) = mpsc::channel(config.event_capacity.max(1));
    let session = ScriptedSession {
        updates: args.updates,
        ..ScriptedSession::default()
    };
    let producer = tokio::spawn(session.play(tx));

    let footprint = config.box_footprint;
    let mut manager = PlaneTrackingManager::new(config, PhysicsScene::new());
    let summary = manager.run(rx).await;
    if let Err(err) = producer.await {
        log::error!("replay task failed: {err}");
        return ExitCode::FAILURE;
    }

    log::info!(
        "{} events: {} added, {} updated, {} removed, {} unchanged, {} failed",
        summary.events,
        summary.added,
        summary.updated,
        summary.removed,
        summary.unchanged,
        summary.failures
    );
    for record in manager.registry().snapshot() {
        log::info!(
            "  {} {:?} rev {} size {:?}",
            record.plane,
            record.classification,
            record.revision,
            record.bounds.size()
        );
    }
    log::info!(
        "scene: {} meshes, {} colliders",
        manager.scene().mesh_count(),
        manager.scene().collider_count()
    );

    match find_box_anchor(manager.registry(), footprint) {
        Some(anchor) => log::info!(
            "box placed on {} at {:?} (surface {:?})",
            anchor.plane,
            anchor.translation,
            anchor.surface_size
        ),
        None => log::warn!("no table large enough for a {footprint:?} box"),
    }

    ExitCode::SUCCESS
}
