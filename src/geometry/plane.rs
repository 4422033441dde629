use nalgebra::Unit;

use super::{EPSILON, FloatType, Ray, WorldPoint, WorldVector};

/// Plane given by `normal · x == offset`.
/// The normal points out of the half space the plane bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    pub normal: Unit<WorldVector>,
    pub offset: FloatType,
}

impl Plane {
    pub fn new(normal: Unit<WorldVector>, offset: FloatType) -> Plane {
        Plane { normal, offset }
    }

    /// Plane with the given normal passing through a point.
    /// Returns None if the normal is too short to be normalized.
    pub fn through_point(normal: &WorldVector, point: &WorldPoint) -> Option<Plane> {
        let normal = Unit::try_new(*normal, EPSILON)?;
        let offset = normal.dot(&point.coords);
        Some(Plane { normal, offset })
    }

    /// Signed distance of the point from the plane, positive in front of the plane
    /// (in the direction of the normal).
    pub fn signed_distance(&self, point: &WorldPoint) -> FloatType {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Returns ray parameter of the intersection with the plane and the cosine-like
    /// term `normal · direction` (negative when the ray goes against the normal).
    /// Parameter is NaN or infinite if the ray is parallel to the plane.
    pub fn intersect(&self, ray: &Ray) -> (FloatType, FloatType) {
        let denominator = self.normal.dot(&ray.direction);
        let t = -self.signed_distance(&ray.origin) / denominator;
        (t, denominator)
    }

    /// Checks whether the two planes are the same up to EPSILON.
    pub fn approx_eq(&self, other: &Plane) -> bool {
        (self.normal.as_ref() - other.normal.as_ref()).norm() < EPSILON
            && (self.offset - other.offset).abs() < EPSILON
    }
}
