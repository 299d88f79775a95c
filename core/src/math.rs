//! Math type aliases and helper functions.
//!
//! Geometry crosses crate boundaries as plain arrays (`[f32; 3]`,
//! `[f32; 4]`); these helpers convert to `nalgebra` where arithmetic is
//! needed.

pub use nalgebra;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// Quaternion (f32). Stored as `[x, y, z, w]` in memory.
/// Use [`quat_from_xyzw`] or `Quaternion::new(w, x, y, z)` to construct.
pub type Quat = nalgebra::Quaternion<f32>;

/// Unit quaternion (f32).
pub type UnitQuat = nalgebra::UnitQuaternion<f32>;

/// Create a quaternion from x, y, z, w components.
pub fn quat_from_xyzw(x: f32, y: f32, z: f32, w: f32) -> Quat {
    nalgebra::Quaternion::new(w, x, y, z)
}

/// Extract `[x, y, z, w]` from a quaternion.
pub fn quat_to_array(q: Quat) -> [f32; 4] {
    [q.i, q.j, q.k, q.w]
}

/// Rotation of `angle` radians around the Y axis, as `[x, y, z, w]`.
pub fn quat_from_rotation_y(angle: f32) -> [f32; 4] {
    let (s, c) = (angle * 0.5).sin_cos();
    [0.0, s, 0.0, c]
}

/// Rotate a point by an `[x, y, z, w]` quaternion, then translate it.
///
/// The quaternion is normalized first; a zero quaternion yields the
/// identity rotation.
pub fn transform_point(translation: [f32; 3], rotation: [f32; 4], point: [f32; 3]) -> [f32; 3] {
    let [x, y, z, w] = rotation;
    let q = quat_from_xyzw(x, y, z, w);
    let rotated = if q.norm_squared() > 0.0 {
        UnitQuat::from_quaternion(q) * Vec3::from(point)
    } else {
        Vec3::from(point)
    };
    (rotated + Vec3::from(translation)).into()
}

/// Axis-aligned bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    /// Minimum corner.
    pub min: [f32; 3],
    /// Maximum corner.
    pub max: [f32; 3],
}

impl Bounds3 {
    /// Tight bounds of a point set, or `None` when empty.
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self {
            min: *first,
            max: *first,
        };
        for p in rest {
            for axis in 0..3 {
                bounds.min[axis] = bounds.min[axis].min(p[axis]);
                bounds.max[axis] = bounds.max[axis].max(p[axis]);
            }
        }
        Some(bounds)
    }

    /// Centre point.
    pub fn center(&self) -> [f32; 3] {
        (Vec3::from(self.min).lerp(&Vec3::from(self.max), 0.5)).into()
    }

    /// Edge lengths along each axis.
    pub fn size(&self) -> [f32; 3] {
        (Vec3::from(self.max) - Vec3::from(self.min)).into()
    }
}
