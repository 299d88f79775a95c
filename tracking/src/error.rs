//! Error type for plane transitions.

use hiddenbox_core::buffer::DecodeError;
use hiddenbox_core::mesh::MeshError;
use thiserror::Error;

use crate::collision::ShapeError;
use crate::event::PlaneId;

/// Why a plane add/update could not be applied.
///
/// Every variant aborts the single transition it came from; the registry
/// and scene keep their previous state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackingError {
    /// The geometry buffers could not be decoded (stride/size mismatch,
    /// truncated buffer, unrepresentable index).
    #[error("plane {plane}: geometry decode failed: {source}")]
    Decode {
        plane: PlaneId,
        #[source]
        source: DecodeError,
    },
    /// Geometry decoded but does not form a valid mesh.
    #[error("plane {plane}: mesh construction failed: {source}")]
    MeshConstructionFailed {
        plane: PlaneId,
        #[source]
        source: MeshError,
    },
    /// A static collision shape could not be generated.
    #[error("plane {plane}: collision shape construction failed: {source}")]
    ShapeConstructionFailed {
        plane: PlaneId,
        #[source]
        source: ShapeError,
    },
    /// An add/update event arrived without an anchor payload.
    #[error("plane {plane}: add/update event carries no geometry")]
    MissingGeometry { plane: PlaneId },
}

impl TrackingError {
    /// The plane the failed transition belonged to.
    pub fn plane(&self) -> PlaneId {
        match self {
            Self::Decode { plane, .. }
            | Self::MeshConstructionFailed { plane, .. }
            | Self::ShapeConstructionFailed { plane, .. }
            | Self::MissingGeometry { plane } => *plane,
        }
    }

    /// Check if this is a stride/element-size mismatch in the raw buffers.
    pub fn is_layout_mismatch(&self) -> bool {
        matches!(
            self,
            Self::Decode {
                source: DecodeError::LayoutMismatch { .. },
                ..
            }
        )
    }
}
