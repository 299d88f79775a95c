//! Typed views over a plane anchor's vertex and face buffers.

use std::mem::size_of;

use super::error::DecodeError;
use super::raw::{RawBuffer, decode, decode_padded_vec3, decode_vec3};

/// Storage format of vertex positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexFormat {
    /// Three packed 32-bit floats (12 bytes).
    #[default]
    Float32x3,
    /// Three 32-bit floats in a 16-byte SIMD slot.
    Float32x3Aligned,
}

impl VertexFormat {
    /// Size in bytes of one element in this format.
    pub fn size(&self) -> usize {
        match self {
            Self::Float32x3 => 12,
            Self::Float32x3Aligned => 16,
        }
    }
}

/// Vertex positions of one anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeometrySource {
    /// Raw position data.
    pub buffer: RawBuffer,
    /// Number of vertices.
    pub count: usize,
    /// Element format.
    pub format: VertexFormat,
}

impl GeometrySource {
    /// Create a vertex source.
    pub fn new(buffer: RawBuffer, count: usize, format: VertexFormat) -> Self {
        Self {
            buffer,
            count,
            format,
        }
    }

    /// Decode all positions according to the format tag.
    pub fn positions(&self) -> Result<Vec<[f32; 3]>, DecodeError> {
        match self.format {
            VertexFormat::Float32x3 => decode_vec3::<f32>(&self.buffer, self.count),
            VertexFormat::Float32x3Aligned => decode_padded_vec3(&self.buffer, self.count),
        }
    }
}

/// Primitive (face) index data of one anchor.
///
/// Indices are stored back to back; the buffer stride is the index width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeometryElement {
    buffer: RawBuffer,
    primitive_count: usize,
    indices_per_primitive: usize,
}

impl GeometryElement {
    /// Create an element from raw index bytes.
    pub fn new(
        data: Vec<u8>,
        primitive_count: usize,
        indices_per_primitive: usize,
        bytes_per_index: usize,
    ) -> Self {
        Self {
            buffer: RawBuffer::new(data, bytes_per_index),
            primitive_count,
            indices_per_primitive,
        }
    }

    /// Create a triangle-list element from 32-bit indices.
    pub fn triangles_i32(indices: &[i32]) -> Self {
        Self {
            buffer: RawBuffer::from_pod(indices),
            primitive_count: indices.len() / 3,
            indices_per_primitive: 3,
        }
    }

    /// Set the byte offset of the first index.
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.buffer = self.buffer.with_offset(offset);
        self
    }

    /// Number of primitives.
    pub fn primitive_count(&self) -> usize {
        self.primitive_count
    }

    /// Indices making up one primitive (3 for triangles).
    pub fn indices_per_primitive(&self) -> usize {
        self.indices_per_primitive
    }

    /// Byte width of one index.
    pub fn bytes_per_index(&self) -> usize {
        self.buffer.stride()
    }

    /// Total number of indices, or `None` on overflow.
    pub fn index_count(&self) -> Option<usize> {
        self.primitive_count.checked_mul(self.indices_per_primitive)
    }

    fn require_i32(&self) -> Result<(), DecodeError> {
        if self.bytes_per_index() != size_of::<i32>() {
            return Err(DecodeError::LayoutMismatch {
                element_size: size_of::<i32>(),
                stride: self.bytes_per_index(),
            });
        }
        Ok(())
    }

    /// Decode every index as a signed 32-bit integer.
    pub fn decode_indices32(&self) -> Result<IndexSequence, DecodeError> {
        self.require_i32()?;
        let count = self.index_count().ok_or(DecodeError::Overflow {
            index: self.primitive_count,
        })?;
        let values = decode::<i32>(&self.buffer, count)?;
        Ok(IndexSequence {
            values,
            per_primitive: self.indices_per_primitive,
        })
    }

    /// Indices of a single primitive.
    pub fn indexed_primitive(&self, index: usize) -> Result<Vec<i32>, DecodeError> {
        if index >= self.primitive_count {
            return Err(DecodeError::PrimitiveOutOfRange {
                index,
                count: self.primitive_count,
            });
        }
        self.require_i32()?;
        let first = index
            .checked_mul(self.indices_per_primitive)
            .ok_or(DecodeError::Overflow { index })?;
        let end = first
            .checked_add(self.indices_per_primitive)
            .ok_or(DecodeError::Overflow { index })?;
        (first..end)
            .map(|i| self.buffer.read_at::<i32>(i))
            .collect()
    }
}

/// A decoded index stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSequence {
    values: Vec<i32>,
    per_primitive: usize,
}

impl IndexSequence {
    /// Wrap already decoded indices.
    pub fn new(values: Vec<i32>, per_primitive: usize) -> Self {
        Self {
            values,
            per_primitive,
        }
    }

    /// Raw signed values as decoded.
    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    /// Number of indices.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the stream holds no indices.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest index value, if any.
    pub fn max_value(&self) -> Option<i32> {
        self.values.iter().copied().max()
    }

    /// Check if every value is representable as `u16`.
    pub fn fits_u16(&self) -> bool {
        self.values.iter().all(|&v| u16::try_from(v).is_ok())
    }

    /// Narrow to unsigned 32-bit indices; negative values fail.
    pub fn to_u32(&self) -> Result<Vec<u32>, DecodeError> {
        self.values
            .iter()
            .map(|&value| {
                u32::try_from(value).map_err(|_| DecodeError::IndexOutOfRange { value, bits: 32 })
            })
            .collect()
    }

    /// Narrow to unsigned 16-bit indices; values outside `0..=65535` fail.
    pub fn to_u16(&self) -> Result<Vec<u16>, DecodeError> {
        self.values
            .iter()
            .map(|&value| {
                u16::try_from(value).map_err(|_| DecodeError::IndexOutOfRange { value, bits: 16 })
            })
            .collect()
    }

    /// Group the stream into triangles.
    pub fn triangles(&self) -> Result<Vec<[u32; 3]>, DecodeError> {
        if self.values.len() % 3 != 0 {
            return Err(DecodeError::IncompletePrimitive {
                count: self.values.len(),
                per_primitive: 3,
            });
        }
        let wide = self.to_u32()?;
        Ok(wide
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect())
    }

    /// Indices per primitive of the element this stream was read from.
    pub fn per_primitive(&self) -> usize {
        self.per_primitive
    }
}

/// One anchor's geometry as captured from the tracking provider.
///
/// Captured fresh for every add/update event and dropped once the mesh and
/// collision shape have been built from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeometrySnapshot {
    /// Vertex positions.
    pub vertices: GeometrySource,
    /// Triangle indices.
    pub faces: GeometryElement,
}

impl GeometrySnapshot {
    /// Create a snapshot from its two buffers.
    pub fn new(vertices: GeometrySource, faces: GeometryElement) -> Self {
        Self { vertices, faces }
    }
}
