//! Per-plane mesh and collision shape construction.

use hiddenbox_core::buffer::{DecodeError, GeometrySnapshot, IndexSequence};
use hiddenbox_core::math::Bounds3;
use hiddenbox_core::mesh::{IndexData, MeshDescriptor, MeshError, MeshPart};

use crate::collision::StaticCollisionShape;
use crate::config::{IndexWidth, TrackingConfig};
use crate::error::TrackingError;
use crate::event::PlaneId;

/// Everything built from one geometry snapshot.
#[derive(Debug, Clone)]
pub struct PlaneGeometry {
    /// Renderable mesh: one instance, one model, one part.
    pub mesh: MeshDescriptor,
    /// Static collision shape, if collision is enabled.
    pub collision: Option<StaticCollisionShape>,
    /// Bounds of the plane in anchor space.
    pub bounds: Bounds3,
}

/// Builds meshes and collision shapes from plane geometry snapshots.
///
/// Pure with respect to the registry and scene: a failed build leaves
/// nothing behind.
#[derive(Debug, Clone)]
pub struct PlaneMeshBuilder {
    material_name: String,
    index_width: IndexWidth,
    collision: bool,
}

impl PlaneMeshBuilder {
    /// Create a builder from tracking settings.
    pub fn new(config: &TrackingConfig) -> Self {
        Self {
            material_name: config.material_name.clone(),
            index_width: config.index_width,
            collision: config.collision,
        }
    }

    /// Check if collision shapes are generated.
    pub fn collision_enabled(&self) -> bool {
        self.collision
    }

    /// Decode `geometry` and build the plane's mesh and collision shape.
    pub fn build(
        &self,
        plane: PlaneId,
        geometry: &GeometrySnapshot,
    ) -> Result<PlaneGeometry, TrackingError> {
        let decode_err = |source| TrackingError::Decode { plane, source };

        let positions = geometry.vertices.positions().map_err(decode_err)?;
        let indices = geometry.faces.decode_indices32().map_err(decode_err)?;
        let index_data = self.index_data(&indices).map_err(decode_err)?;

        log::trace!(
            "plane {plane}: decoded {} vertices ({:?}), {} indices as {:?}",
            positions.len(),
            geometry.vertices.format,
            indices.len(),
            index_data.format()
        );

        let part = MeshPart::triangles(positions, index_data);
        let mesh = MeshDescriptor::single(&format!("plane-{plane}"), part, &self.material_name);
        mesh.validate()
            .map_err(|source| TrackingError::MeshConstructionFailed { plane, source })?;

        // `validate` has rejected empty parts, so the bounds always exist.
        let model = &mesh.models[0];
        let positions = &model.parts[0].positions;
        let bounds = Bounds3::from_points(positions).ok_or_else(|| {
            TrackingError::MeshConstructionFailed {
                plane,
                source: MeshError::EmptyPart {
                    model: model.id.clone(),
                    part: 0,
                },
            }
        })?;

        let collision = if self.collision {
            let triangles = indices.triangles().map_err(decode_err)?;
            let shape = StaticCollisionShape::from_triangles(positions, &triangles)
                .map_err(|source| TrackingError::ShapeConstructionFailed { plane, source })?;
            Some(shape)
        } else {
            None
        };

        Ok(PlaneGeometry {
            mesh,
            collision,
            bounds,
        })
    }

    fn index_data(&self, indices: &IndexSequence) -> Result<IndexData, DecodeError> {
        match self.index_width {
            IndexWidth::Auto if indices.fits_u16() => Ok(IndexData::Uint16(indices.to_u16()?)),
            _ => Ok(IndexData::Uint32(indices.to_u32()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use hiddenbox_core::buffer::{GeometryElement, GeometrySource, RawBuffer, VertexFormat};
    use hiddenbox_core::mesh::IndexFormat;
    use hiddenbox_core::mesh::generators::generate_plane_geometry;

    use super::*;

    const PLANE: PlaneId = PlaneId(0xA);

    fn builder() -> PlaneMeshBuilder {
        PlaneMeshBuilder::new(&TrackingConfig::default())
    }

    #[test]
    fn test_build_quad() {
        let snapshot = generate_plane_geometry(0.6, 0.4, 1, VertexFormat::Float32x3);
        let built = builder().build(PLANE, &snapshot).unwrap();

        assert_eq!(built.mesh.instances.len(), 1);
        assert_eq!(built.mesh.models.len(), 1);
        assert_eq!(built.mesh.models[0].parts.len(), 1);
        assert_eq!(built.mesh.materials, vec!["plane_occlusion".to_string()]);
        assert_eq!(built.mesh.vertex_count(), 4);
        assert_eq!(built.mesh.triangle_count(), 2);
        assert_eq!(
            built.mesh.models[0].parts[0].indices.format(),
            IndexFormat::Uint16
        );
        assert_eq!(built.bounds.size(), [1.2, 0.0, 0.8]);
        assert_eq!(built.collision.unwrap().triangle_count(), 2);
    }

    #[test]
    fn test_build_without_collision() {
        let config = TrackingConfig {
            collision: false,
            ..TrackingConfig::default()
        };
        let snapshot = generate_plane_geometry(0.5, 0.5, 2, VertexFormat::Float32x3Aligned);
        let built = PlaneMeshBuilder::new(&config).build(PLANE, &snapshot).unwrap();
        assert!(built.collision.is_none());
        assert_eq!(built.mesh.vertex_count(), 9);
    }

    #[test]
    fn test_forced_u32_indices() {
        let config = TrackingConfig {
            index_width: IndexWidth::U32,
            ..TrackingConfig::default()
        };
        let snapshot = generate_plane_geometry(0.5, 0.5, 1, VertexFormat::Float32x3);
        let built = PlaneMeshBuilder::new(&config).build(PLANE, &snapshot).unwrap();
        assert_eq!(
            built.mesh.models[0].parts[0].indices.format(),
            IndexFormat::Uint32
        );
    }

    #[test]
    fn test_padded_vertices_tagged_packed_fail_layout() {
        let mut snapshot = generate_plane_geometry(0.5, 0.5, 1, VertexFormat::Float32x3Aligned);
        snapshot.vertices.format = VertexFormat::Float32x3;

        let err = builder().build(PLANE, &snapshot).unwrap_err();
        assert!(err.is_layout_mismatch());
        assert_eq!(err.plane(), PLANE);
    }

    #[test]
    fn test_out_of_range_index_fails_mesh() {
        let snapshot = GeometrySnapshot::new(
            GeometrySource::new(
                RawBuffer::from_pod(&[[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]),
                3,
                VertexFormat::Float32x3,
            ),
            GeometryElement::triangles_i32(&[0, 1, 5]),
        );
        let err = builder().build(PLANE, &snapshot).unwrap_err();
        assert!(matches!(
            err,
            TrackingError::MeshConstructionFailed {
                source: MeshError::IndexOutOfRange { index: 5, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_negative_index_fails_decode() {
        let snapshot = GeometrySnapshot::new(
            GeometrySource::new(
                RawBuffer::from_pod(&[[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]),
                3,
                VertexFormat::Float32x3,
            ),
            GeometryElement::triangles_i32(&[0, -1, 2]),
        );
        let err = builder().build(PLANE, &snapshot).unwrap_err();
        assert!(matches!(
            err,
            TrackingError::Decode {
                source: DecodeError::IndexOutOfRange { value: -1, bits: 32 },
                ..
            }
        ));
    }

    #[test]
    fn test_empty_geometry_fails_mesh() {
        let snapshot = GeometrySnapshot::new(
            GeometrySource::new(RawBuffer::new(Vec::new(), 12), 0, VertexFormat::Float32x3),
            GeometryElement::triangles_i32(&[]),
        );
        let err = builder().build(PLANE, &snapshot).unwrap_err();
        assert!(matches!(
            err,
            TrackingError::MeshConstructionFailed {
                source: MeshError::EmptyPart { part: 0, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_degenerate_plane_fails_shape() {
        let snapshot = GeometrySnapshot::new(
            GeometrySource::new(
                RawBuffer::from_pod(&[[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]),
                3,
                VertexFormat::Float32x3,
            ),
            GeometryElement::triangles_i32(&[0, 1, 2]),
        );
        let err = builder().build(PLANE, &snapshot).unwrap_err();
        assert!(matches!(
            err,
            TrackingError::ShapeConstructionFailed { .. }
        ));
    }
}
