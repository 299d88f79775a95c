//! Synthetic plane geometry.
//!
//! Produces the same raw buffers a tracking provider hands out for a plane
//! anchor, so replays, tests and benches can drive the decoding path without
//! a device.

use crate::buffer::{
    AlignedFloat3, GeometryElement, GeometrySnapshot, GeometrySource, RawBuffer, VertexFormat,
};

/// Largest grid resolution [`generate_plane_geometry`] produces per side.
pub const MAX_PLANE_SEGMENTS: u32 = 1024;

/// Generate a rectangular plane in the anchor's XZ plane (Y up).
///
/// The plane is centred on the anchor origin and split into a
/// `segments` x `segments` grid, clamped to `1..=MAX_PLANE_SEGMENTS`, two
/// triangles per cell. Indices are stored as 32-bit signed integers.
///
/// # Arguments
///
/// * `half_width` - Half the extent along X
/// * `half_depth` - Half the extent along Z
/// * `segments` - Grid cells per side
/// * `format` - Vertex storage format (packed or SIMD-aligned)
pub fn generate_plane_geometry(
    half_width: f32,
    half_depth: f32,
    segments: u32,
    format: VertexFormat,
) -> GeometrySnapshot {
    let segments = segments.clamp(1, MAX_PLANE_SEGMENTS) as usize;
    let row = segments + 1;

    let mut positions = Vec::with_capacity(row * row);
    for j in 0..=segments {
        for i in 0..=segments {
            let u = i as f32 / segments as f32;
            let v = j as f32 / segments as f32;
            positions.push([
                -half_width + 2.0 * half_width * u,
                0.0,
                -half_depth + 2.0 * half_depth * v,
            ]);
        }
    }

    // (MAX_PLANE_SEGMENTS + 1)^2 vertices stay well inside i32.
    let mut indices: Vec<i32> = Vec::with_capacity(segments * segments * 6);
    for j in 0..segments {
        for i in 0..segments {
            let v0 = (j * row + i) as i32;
            let v1 = v0 + 1;
            let v2 = v0 + row as i32;
            let v3 = v2 + 1;
            indices.extend_from_slice(&[v0, v2, v1, v1, v2, v3]);
        }
    }

    let vertex_buffer = match format {
        VertexFormat::Float32x3 => RawBuffer::from_pod(&positions),
        VertexFormat::Float32x3Aligned => {
            let aligned: Vec<AlignedFloat3> = positions
                .iter()
                .map(|&xyz| AlignedFloat3 { xyz, pad: 0.0 })
                .collect();
            RawBuffer::from_pod(&aligned)
        }
    };

    GeometrySnapshot::new(
        GeometrySource::new(vertex_buffer, positions.len(), format),
        GeometryElement::triangles_i32(&indices),
    )
}
