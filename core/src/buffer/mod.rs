//! Decoding of raw geometry buffers into typed sequences.
//!
//! Tracking providers hand out geometry as opaque byte buffers with an
//! element stride and a byte offset. This module turns them into typed data:
//!
//! - [`RawBuffer`] - Owned bytes plus stride/offset
//! - [`decode`], [`decode_vec3`], [`decode_padded_vec3`] - Strided element reads
//! - [`GeometrySource`] - Vertex positions with a [`VertexFormat`] tag
//! - [`GeometryElement`] - Primitive index data ([`IndexSequence`] output)
//! - [`GeometrySnapshot`] - One anchor's vertices and faces
//!
//! Every read is bounds-checked, and the element size must match the buffer
//! stride exactly. A padded 16-byte float triple read as a packed 12-byte
//! triple is a [`DecodeError::LayoutMismatch`], never a silent misread.

mod element;
mod error;
mod raw;

pub use element::{GeometryElement, GeometrySnapshot, GeometrySource, IndexSequence, VertexFormat};
pub use error::DecodeError;
pub use raw::{AlignedFloat3, RawBuffer, decode, decode_padded_vec3, decode_vec3};
