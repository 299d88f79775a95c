//! Error types for buffer decoding.

use thiserror::Error;

/// Errors that can occur while decoding a raw geometry buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The requested element type does not match the buffer stride.
    #[error("element size {element_size} does not match buffer stride {stride}")]
    LayoutMismatch {
        /// Byte size of the element type being read.
        element_size: usize,
        /// Stride declared by the buffer.
        stride: usize,
    },
    /// An element lies (partly) outside the buffer.
    #[error("element {index} needs bytes {start}..{end} but the buffer holds {len}")]
    OutOfBounds {
        /// Element index.
        index: usize,
        /// First byte of the element.
        start: usize,
        /// One past the last byte of the element.
        end: usize,
        /// Buffer length in bytes.
        len: usize,
    },
    /// Offset or stride arithmetic overflowed `usize`.
    #[error("byte address of element {index} overflows")]
    Overflow {
        /// Element index.
        index: usize,
    },
    /// A primitive index past the primitive count was requested.
    #[error("primitive {index} out of range (primitive count {count})")]
    PrimitiveOutOfRange {
        /// Requested primitive.
        index: usize,
        /// Number of primitives in the element.
        count: usize,
    },
    /// An index value does not fit the requested unsigned width.
    #[error("index value {value} does not fit in u{bits}")]
    IndexOutOfRange {
        /// The offending value.
        value: i32,
        /// Target width in bits.
        bits: u32,
    },
    /// An index stream does not split into whole primitives.
    #[error("{count} indices do not form whole primitives of {per_primitive}")]
    IncompletePrimitive {
        /// Number of indices in the stream.
        count: usize,
        /// Indices per primitive.
        per_primitive: usize,
    },
}
