//! Static collision shapes for tracked planes, backed by
//! [rapier](https://rapier.rs/) triangle meshes.

use std::fmt;

use hiddenbox_core::math::Bounds3;
use rapier3d::na::{Quaternion, Translation3, UnitQuaternion};
use rapier3d::prelude::*;
use thiserror::Error;

use crate::event::AnchorTransform;

/// Twice the triangle area below which a triangle counts as degenerate.
const DEGENERATE_AREA_EPSILON: f32 = 1e-10;

/// Reasons a collision shape cannot be generated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("no triangles")]
    NoTriangles,
    #[error("triangle {triangle} references vertex {index} of {vertex_count}")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("all {0} triangles are degenerate")]
    Degenerate(usize),
}

/// A non-moving triangle-mesh shape in anchor space.
#[derive(Clone)]
pub struct StaticCollisionShape {
    shape: SharedShape,
    triangle_count: usize,
}

impl StaticCollisionShape {
    /// Build a triangle-mesh shape from positions and triangle indices.
    ///
    /// Fails if there are no triangles, an index is out of range, or every
    /// triangle has zero area. Input that passes these checks is always
    /// accepted by rapier.
    pub fn from_triangles(
        positions: &[[f32; 3]],
        triangles: &[[u32; 3]],
    ) -> Result<Self, ShapeError> {
        if triangles.is_empty() {
            return Err(ShapeError::NoTriangles);
        }

        let vertices: Vec<Point<Real>> = positions
            .iter()
            .map(|p| Point::new(p[0] as Real, p[1] as Real, p[2] as Real))
            .collect();

        let mut non_degenerate = 0;
        for (triangle, tri) in triangles.iter().enumerate() {
            let mut corners = [Point::origin(); 3];
            for (corner, &index) in corners.iter_mut().zip(tri) {
                *corner = *vertices
                    .get(index as usize)
                    .ok_or(ShapeError::IndexOutOfRange {
                        triangle,
                        index,
                        vertex_count: vertices.len(),
                    })?;
            }
            let doubled_area = (corners[1] - corners[0])
                .cross(&(corners[2] - corners[0]))
                .norm();
            if doubled_area > DEGENERATE_AREA_EPSILON {
                non_degenerate += 1;
            }
        }
        if non_degenerate == 0 {
            return Err(ShapeError::Degenerate(triangles.len()));
        }

        Ok(Self {
            shape: SharedShape::trimesh(vertices, triangles.to_vec()),
            triangle_count: triangles.len(),
        })
    }

    /// The underlying rapier shape.
    pub fn shape(&self) -> &SharedShape {
        &self.shape
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Bounds of the shape in anchor space.
    pub fn local_bounds(&self) -> Bounds3 {
        let aabb = self.shape.compute_local_aabb();
        Bounds3 {
            min: [aabb.mins.x, aabb.mins.y, aabb.mins.z],
            max: [aabb.maxs.x, aabb.maxs.y, aabb.maxs.z],
        }
    }

    /// Build a fixed collider placed at the anchor pose.
    pub fn to_collider(&self, transform: &AnchorTransform) -> Collider {
        ColliderBuilder::new(self.shape.clone())
            .position(anchor_isometry(transform))
            .build()
    }
}

impl fmt::Debug for StaticCollisionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCollisionShape")
            .field("triangle_count", &self.triangle_count)
            .field("bounds", &self.local_bounds())
            .finish()
    }
}

/// Converts an anchor pose to a rapier `Isometry`.
///
/// A zero quaternion maps to the identity rotation.
pub fn anchor_isometry(transform: &AnchorTransform) -> Isometry<Real> {
    let [tx, ty, tz] = transform.translation;
    let [x, y, z, w] = transform.rotation;
    let q = Quaternion::new(w as Real, x as Real, y as Real, z as Real);
    let rotation = if q.norm_squared() > 0.0 {
        UnitQuaternion::from_quaternion(q)
    } else {
        UnitQuaternion::identity()
    };
    Isometry::from_parts(
        Translation3::new(tx as Real, ty as Real, tz as Real),
        rotation,
    )
}
