//! # hiddenbox demos
//!
//! Synthetic tracking sessions for driving the plane tracking core without
//! a device.
//!
//! ## Available Demos
//!
//! - `plane_replay` - Replays a scripted session and places the box

pub mod session;

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
