mod convex_polyhedron;
mod plane;

pub use convex_polyhedron::{ConvexPolyhedron, Crossing, ObjOpenError};
pub use plane::Plane;

pub type FloatType = f32;
pub use std::f32::consts as float_consts;
pub type WorldPoint = nalgebra::Point3<FloatType>;
pub type WorldVector = nalgebra::Vector3<FloatType>;

/// Distances below this are considered to be zero.
pub const EPSILON: FloatType = 1e-4;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: WorldPoint,
    /// Direction of the ray, not necessarily normalized.
    /// Distances along the ray are measured in multiples of its length.
    pub direction: WorldVector,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: WorldVector) -> Ray {
        Ray { origin, direction }
    }

    pub fn point_at(&self, t: FloatType) -> WorldPoint {
        self.origin + self.direction * t
    }
}

/// Normalizes the vector, vectors shorter than EPSILON turn into zero vector.
pub fn normalize_or_zero(v: &WorldVector) -> WorldVector {
    v.try_normalize(EPSILON).unwrap_or_else(WorldVector::zeros)
}

/// Mirrors `incoming` around the plane given by `normal`.
/// The result has the same length as `incoming` (if the normal is unit length).
pub fn reflect(incoming: &WorldVector, normal: &WorldVector) -> WorldVector {
    incoming - normal * (2.0 * normal.dot(incoming))
}
