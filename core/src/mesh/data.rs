//! CPU-side mesh descriptors.
//!
//! This module provides:
//! - [`PrimitiveTopology`] - How vertices are assembled into primitives
//! - [`IndexFormat`] / [`IndexData`] - Index width and storage
//! - [`MeshPart`], [`MeshModel`], [`MeshInstance`] - Descriptor building blocks
//! - [`MeshDescriptor`] - Named instances, models and parts handed to a renderer

use super::error::MeshError;

/// Primitive topology describing how vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Each vertex is a separate point.
    PointList,
    /// Every two vertices form a line.
    LineList,
    /// Every three vertices form a triangle.
    #[default]
    TriangleList,
}

impl PrimitiveTopology {
    /// Get the number of vertices per primitive.
    pub fn vertices_per_primitive(&self) -> usize {
        match self {
            Self::PointList => 1,
            Self::LineList => 2,
            Self::TriangleList => 3,
        }
    }
}

/// Index format for indexed drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit unsigned integers (max 65535 vertices).
    #[default]
    Uint16,
    /// 32-bit unsigned integers (max ~4 billion vertices).
    Uint32,
}

impl IndexFormat {
    /// Get the size in bytes of each index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }
}

/// Index storage of one mesh part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexData {
    /// 16-bit indices.
    Uint16(Vec<u16>),
    /// 32-bit indices.
    Uint32(Vec<u32>),
}

impl IndexData {
    /// Storage format.
    pub fn format(&self) -> IndexFormat {
        match self {
            Self::Uint16(_) => IndexFormat::Uint16,
            Self::Uint32(_) => IndexFormat::Uint32,
        }
    }

    /// Number of indices.
    pub fn len(&self) -> usize {
        match self {
            Self::Uint16(v) => v.len(),
            Self::Uint32(v) => v.len(),
        }
    }

    /// Check if there are no indices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the indices widened to `u32`.
    pub fn iter(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        match self {
            Self::Uint16(v) => Box::new(v.iter().map(|&i| i as u32)),
            Self::Uint32(v) => Box::new(v.iter().copied()),
        }
    }

    /// Raw little-endian bytes, ready for upload.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Uint16(v) => bytemuck::cast_slice(v),
            Self::Uint32(v) => bytemuck::cast_slice(v),
        }
    }
}

/// One drawable part: positions, indices and a material slot.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPart {
    /// Index into [`MeshDescriptor::materials`].
    pub material_index: usize,
    /// Primitive topology.
    pub topology: PrimitiveTopology,
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Primitive indices into `positions`.
    pub indices: IndexData,
}

impl MeshPart {
    /// Create a triangle-list part using material slot 0.
    pub fn triangles(positions: Vec<[f32; 3]>, indices: IndexData) -> Self {
        Self {
            material_index: 0,
            topology: PrimitiveTopology::TriangleList,
            positions,
            indices,
        }
    }

    /// Set the material slot.
    #[must_use]
    pub fn with_material_index(mut self, material_index: usize) -> Self {
        self.material_index = material_index;
        self
    }

    /// Number of complete primitives.
    pub fn primitive_count(&self) -> usize {
        self.indices.len() / self.topology.vertices_per_primitive()
    }
}

/// A named collection of parts.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshModel {
    /// Model identifier, referenced by instances.
    pub id: String,
    /// Parts making up the model.
    pub parts: Vec<MeshPart>,
}

/// A placement of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshInstance {
    /// Instance identifier.
    pub id: String,
    /// Identifier of the instanced model.
    pub model: String,
}

/// Descriptor for a renderable mesh resource.
///
/// # Example
///
/// ```
/// use hiddenbox_core::mesh::{IndexData, MeshDescriptor, MeshPart};
///
/// let part = MeshPart::triangles(
///     vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
///     IndexData::Uint16(vec![0, 1, 2]),
/// );
/// let desc = MeshDescriptor::single("plane", part, "occlusion");
/// assert!(desc.validate().is_ok());
/// assert_eq!(desc.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshDescriptor {
    /// Instances referencing models by id.
    pub instances: Vec<MeshInstance>,
    /// Models holding the geometry.
    pub models: Vec<MeshModel>,
    /// Material names, indexed by [`MeshPart::material_index`].
    pub materials: Vec<String>,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl MeshDescriptor {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the common single instance / model / part descriptor.
    ///
    /// The instance is named `"{name}-instance"` and the model
    /// `"{name}-model"`; the part's material slot is reset to 0.
    pub fn single(name: &str, part: MeshPart, material: impl Into<String>) -> Self {
        let model_id = format!("{name}-model");
        Self::new()
            .with_material(material)
            .with_model(MeshModel {
                id: model_id.clone(),
                parts: vec![part.with_material_index(0)],
            })
            .with_instance(MeshInstance {
                id: format!("{name}-instance"),
                model: model_id,
            })
            .with_label(name)
    }

    /// Add a model.
    #[must_use]
    pub fn with_model(mut self, model: MeshModel) -> Self {
        self.models.push(model);
        self
    }

    /// Add an instance.
    #[must_use]
    pub fn with_instance(mut self, instance: MeshInstance) -> Self {
        self.instances.push(instance);
        self
    }

    /// Add a material slot.
    #[must_use]
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.materials.push(material.into());
        self
    }

    /// Set a debug label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Iterate every part of every model.
    pub fn parts(&self) -> impl Iterator<Item = &MeshPart> {
        self.models.iter().flat_map(|m| m.parts.iter())
    }

    /// Total vertex count across all parts.
    pub fn vertex_count(&self) -> usize {
        self.parts().map(|p| p.positions.len()).sum()
    }

    /// Total index count across all parts.
    pub fn index_count(&self) -> usize {
        self.parts().map(|p| p.indices.len()).sum()
    }

    /// Total triangle count across triangle-list parts.
    pub fn triangle_count(&self) -> usize {
        self.parts()
            .filter(|p| p.topology == PrimitiveTopology::TriangleList)
            .map(MeshPart::primitive_count)
            .sum()
    }

    /// Check that the descriptor describes drawable geometry.
    ///
    /// Every instance must reference an existing model, every part must have
    /// a material slot, whole primitives, in-range indices and finite
    /// positions, and there must be at least one non-empty part.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.parts().next().is_none() {
            return Err(MeshError::NoParts);
        }

        for instance in &self.instances {
            if !self.models.iter().any(|m| m.id == instance.model) {
                return Err(MeshError::UnknownModel {
                    instance: instance.id.clone(),
                    model: instance.model.clone(),
                });
            }
        }

        for model in &self.models {
            for (part_index, part) in model.parts.iter().enumerate() {
                validate_part(&model.id, part_index, part, self.materials.len())?;
            }
        }
        Ok(())
    }
}

fn validate_part(
    model: &str,
    part_index: usize,
    part: &MeshPart,
    material_count: usize,
) -> Result<(), MeshError> {
    if part.material_index >= material_count {
        return Err(MeshError::MissingMaterial {
            model: model.to_owned(),
            part: part_index,
            material_index: part.material_index,
        });
    }
    if part.positions.is_empty() || part.indices.is_empty() {
        return Err(MeshError::EmptyPart {
            model: model.to_owned(),
            part: part_index,
        });
    }

    let per_primitive = part.topology.vertices_per_primitive();
    if part.indices.len() % per_primitive != 0 {
        return Err(MeshError::IncompletePrimitive {
            model: model.to_owned(),
            part: part_index,
            count: part.indices.len(),
            per_primitive,
        });
    }

    let vertex_count = part.positions.len();
    if let Some(index) = part.indices.iter().find(|&i| i as usize >= vertex_count) {
        return Err(MeshError::IndexOutOfRange {
            model: model.to_owned(),
            part: part_index,
            index,
            vertex_count,
        });
    }

    if let Some(vertex) = part
        .positions
        .iter()
        .position(|p| p.iter().any(|c| !c.is_finite()))
    {
        return Err(MeshError::NonFinitePosition {
            model: model.to_owned(),
            part: part_index,
            vertex,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_part() -> MeshPart {
        MeshPart::triangles(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 1.0],
            ],
            IndexData::Uint16(vec![0, 1, 2, 2, 1, 3]),
        )
    }

    #[test]
    fn test_primitive_topology_vertices() {
        assert_eq!(PrimitiveTopology::PointList.vertices_per_primitive(), 1);
        assert_eq!(PrimitiveTopology::LineList.vertices_per_primitive(), 2);
        assert_eq!(PrimitiveTopology::TriangleList.vertices_per_primitive(), 3);
    }

    #[test]
    fn test_index_format_size() {
        assert_eq!(IndexFormat::Uint16.size(), 2);
        assert_eq!(IndexFormat::Uint32.size(), 4);
    }

    #[test]
    fn test_single_descriptor_layout() {
        let desc = MeshDescriptor::single("plane", quad_part(), "occlusion");
        assert_eq!(desc.instances.len(), 1);
        assert_eq!(desc.models.len(), 1);
        assert_eq!(desc.instances[0].model, desc.models[0].id);
        assert_eq!(desc.materials, vec!["occlusion".to_string()]);
        assert_eq!(desc.vertex_count(), 4);
        assert_eq!(desc.index_count(), 6);
        assert_eq!(desc.triangle_count(), 2);
        assert!(desc.validate().is_ok());
    }

    #[test]
    fn test_index_bytes() {
        let data = IndexData::Uint16(vec![1, 2]);
        assert_eq!(data.as_bytes().len(), 4);
        assert_eq!(data.format(), IndexFormat::Uint16);
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut part = quad_part();
        part.indices = IndexData::Uint32(vec![0, 1, 4]);
        let desc = MeshDescriptor::single("plane", part, "occlusion");
        assert!(matches!(
            desc.validate(),
            Err(MeshError::IndexOutOfRange { index: 4, vertex_count: 4, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_partial_triangle() {
        let mut part = quad_part();
        part.indices = IndexData::Uint16(vec![0, 1, 2, 3]);
        let desc = MeshDescriptor::single("plane", part, "occlusion");
        assert!(matches!(
            desc.validate(),
            Err(MeshError::IncompletePrimitive { count: 4, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut part = quad_part();
        part.positions[2][1] = f32::NAN;
        let desc = MeshDescriptor::single("plane", part, "occlusion");
        assert!(matches!(
            desc.validate(),
            Err(MeshError::NonFinitePosition { vertex: 2, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert_eq!(MeshDescriptor::new().validate(), Err(MeshError::NoParts));

        let part = MeshPart::triangles(Vec::new(), IndexData::Uint16(Vec::new()));
        let desc = MeshDescriptor::single("plane", part, "occlusion");
        assert!(matches!(desc.validate(), Err(MeshError::EmptyPart { .. })));
    }

    #[test]
    fn test_validate_rejects_dangling_instance() {
        let desc = MeshDescriptor::single("plane", quad_part(), "occlusion").with_instance(
            MeshInstance {
                id: "ghost".into(),
                model: "missing".into(),
            },
        );
        assert!(matches!(desc.validate(), Err(MeshError::UnknownModel { .. })));
    }
}
