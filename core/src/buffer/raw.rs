//! Raw byte buffers with element stride and offset, and the strided readers
//! built on top of them.

use std::mem::size_of;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use super::error::DecodeError;

/// An owned byte buffer holding fixed-size logical elements.
///
/// Element `i` starts at byte `offset + stride * i`. The buffer itself does
/// not know the element count; callers pass it to the decoders together with
/// the element type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBuffer {
    data: Vec<u8>,
    stride: usize,
    offset: usize,
}

impl RawBuffer {
    /// Create a buffer with the given element stride and no offset.
    pub fn new(data: Vec<u8>, stride: usize) -> Self {
        Self {
            data,
            stride,
            offset: 0,
        }
    }

    /// Create a tightly packed buffer from plain-old-data values.
    ///
    /// The stride is `size_of::<T>()`.
    pub fn from_pod<T: Pod>(values: &[T]) -> Self {
        Self::new(bytemuck::cast_slice(values).to_vec(), size_of::<T>())
    }

    /// Set the byte offset of the first element.
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Raw bytes, including any leading offset and padding.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Byte distance between consecutive elements.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Byte offset of the first element.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Buffer length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Byte range of element `index` when each element is `size` bytes wide.
    fn element_range(&self, index: usize, size: usize) -> Result<Range<usize>, DecodeError> {
        let start = self
            .stride
            .checked_mul(index)
            .and_then(|rel| rel.checked_add(self.offset))
            .ok_or(DecodeError::Overflow { index })?;
        let end = start
            .checked_add(size)
            .ok_or(DecodeError::Overflow { index })?;
        if end > self.data.len() {
            return Err(DecodeError::OutOfBounds {
                index,
                start,
                end,
                len: self.data.len(),
            });
        }
        Ok(start..end)
    }

    /// Bytes of element `index` when each element is `size` bytes wide.
    pub fn element_bytes(&self, index: usize, size: usize) -> Result<&[u8], DecodeError> {
        let range = self.element_range(index, size)?;
        Ok(&self.data[range])
    }

    /// Read element `index` as a `T`, ignoring the stride/size precondition.
    ///
    /// Used by sequential readers that step through the buffer themselves.
    pub(crate) fn read_at<T: Pod>(&self, index: usize) -> Result<T, DecodeError> {
        let bytes = self.element_bytes(index, size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }
}

/// Decode `count` elements of type `T` from a strided buffer.
///
/// Fails with [`DecodeError::LayoutMismatch`] unless `size_of::<T>()` equals
/// the buffer stride. The whole range is bounds-checked before any element
/// is read, so a failure never yields a partial sequence.
///
/// # Example
///
/// ```
/// use hiddenbox_core::buffer::{RawBuffer, decode};
///
/// let buffer = RawBuffer::from_pod(&[1.0f32, 2.0, 3.0]);
/// let values: Vec<f32> = decode(&buffer, 3).unwrap();
/// assert_eq!(values, vec![1.0, 2.0, 3.0]);
/// ```
pub fn decode<T: Pod>(buffer: &RawBuffer, count: usize) -> Result<Vec<T>, DecodeError> {
    let element_size = size_of::<T>();
    if element_size != buffer.stride() {
        return Err(DecodeError::LayoutMismatch {
            element_size,
            stride: buffer.stride(),
        });
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    // Checking the last element covers every earlier one.
    buffer.element_range(count - 1, element_size)?;

    let mut values = Vec::with_capacity(count);
    for index in 0..count {
        values.push(buffer.read_at::<T>(index)?);
    }
    Ok(values)
}

/// Decode `count` packed three-component vectors of `T`.
///
/// Delegates to [`decode`] with a `[T; 3]` element, so the buffer stride must
/// be exactly `3 * size_of::<T>()`.
pub fn decode_vec3<T: Pod>(buffer: &RawBuffer, count: usize) -> Result<Vec<[T; 3]>, DecodeError> {
    decode::<[T; 3]>(buffer, count)
}

/// A float triple stored in a 16-byte, SIMD-aligned slot.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct AlignedFloat3 {
    /// The three meaningful components.
    pub xyz: [f32; 3],
    /// Alignment padding; never interpreted.
    pub pad: f32,
}

/// Decode `count` SIMD-aligned float triples (stride 16), dropping padding.
pub fn decode_padded_vec3(buffer: &RawBuffer, count: usize) -> Result<Vec<[f32; 3]>, DecodeError> {
    let padded = decode::<AlignedFloat3>(buffer, count)?;
    Ok(padded.into_iter().map(|v| v.xyz).collect())
}
