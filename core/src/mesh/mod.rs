//! CPU-side mesh types and generators.
//!
//! This module provides renderer-agnostic mesh data structures:
//!
//! - [`MeshDescriptor`] - Named instances, models and parts
//! - [`MeshPart`] - Positions, indices and a material slot
//! - [`MeshError`] - Validation failures
//! - Generators for synthetic plane geometry

mod data;
mod error;
pub mod generators;

pub use data::{
    IndexData, IndexFormat, MeshDescriptor, MeshInstance, MeshModel, MeshPart, PrimitiveTopology,
};
pub use error::MeshError;
