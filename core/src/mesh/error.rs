//! Mesh validation errors.

use thiserror::Error;

/// Reasons a [`MeshDescriptor`](super::MeshDescriptor) is not drawable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("mesh has no parts")]
    NoParts,
    #[error("instance {instance} references unknown model {model}")]
    UnknownModel { instance: String, model: String },
    #[error("model {model} part {part} uses missing material slot {material_index}")]
    MissingMaterial {
        model: String,
        part: usize,
        material_index: usize,
    },
    #[error("model {model} part {part} has no vertices or no indices")]
    EmptyPart { model: String, part: usize },
    #[error("model {model} part {part}: {count} indices do not form whole primitives of {per_primitive}")]
    IncompletePrimitive {
        model: String,
        part: usize,
        count: usize,
        per_primitive: usize,
    },
    #[error("model {model} part {part}: index {index} out of range ({vertex_count} vertices)")]
    IndexOutOfRange {
        model: String,
        part: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("model {model} part {part}: vertex {vertex} is not finite")]
    NonFinitePosition {
        model: String,
        part: usize,
        vertex: usize,
    },
}
