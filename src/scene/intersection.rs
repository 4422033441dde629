use nalgebra::Unit;

use super::{ColliderRegistry, FaceIdx, RegisteredCollider};
use crate::geometry::{Crossing, EPSILON, FloatType, Ray, WorldPoint, WorldVector};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitRecord {
    /// Ray parameter of the hit
    pub t: FloatType,
    /// Distance from the ray origin to the hit point
    pub distance: FloatType,
    pub point: WorldPoint,
    /// Outward facing normal of the hit face
    pub normal: Unit<WorldVector>,
    pub face: FaceIdx,
}

/// What to do with a hit right at the ray origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NearOriginHits {
    Keep,
    /// If the nearest hit is closer than EPSILON, use the second nearest one instead.
    /// Rays starting on a surface they were just reflected from would otherwise hit it
    /// again immediately.
    Skip,
}

type Candidate<'a> = (Crossing, &'a RegisteredCollider);

impl ColliderRegistry {
    /// Finds the nearest place where the ray passes through a surface of any collider.
    /// Colliders are two sided, rays starting inside a collider hit its inner surface.
    pub fn nearest_hit(&self, ray: &Ray, near_origin: NearOriginHits) -> Option<HitRecord> {
        let mut nearest: Option<Candidate> = None;
        let mut second: Option<Candidate> = None;

        for collider in &self.colliders {
            for crossing in collider.shape.intersect(ray) {
                let candidate = Some((crossing, collider));
                if nearest.is_none_or(|(c, _)| crossing.t < c.t) {
                    second = nearest;
                    nearest = candidate;
                } else if second.is_none_or(|(c, _)| crossing.t < c.t) {
                    second = candidate;
                }
            }
        }

        let ray_length = ray.direction.norm();
        let (crossing, collider) = match nearest {
            Some((c, _)) if near_origin == NearOriginHits::Skip && c.t * ray_length < EPSILON => {
                second?
            }
            nearest => nearest?,
        };

        Some(HitRecord {
            t: crossing.t,
            distance: crossing.t * ray_length,
            point: ray.point_at(crossing.t),
            normal: collider.shape.faces()[crossing.face].normal,
            face: collider.first_face + crossing.face,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert2::{assert, let_assert};
    use test_case::test_case;

    use crate::geometry::{ConvexPolyhedron, reflect};

    const TOLERANCE: FloatType = 1e-4;

    fn cube_registry() -> ColliderRegistry {
        let mut registry = ColliderRegistry::new();
        registry.register(ConvexPolyhedron::unit_cube());
        registry
    }

    #[test]
    fn empty_registry_misses() {
        let registry = ColliderRegistry::new();
        let ray = Ray::new(WorldPoint::origin(), WorldVector::x());

        assert!(registry.nearest_hit(&ray, NearOriginHits::Skip).is_none());
    }

    #[test_case(WorldVector::new(1.0, 0.0, 0.0), 0 ; "plus_x")]
    #[test_case(WorldVector::new(-1.0, 0.0, 0.0), 1 ; "minus_x")]
    #[test_case(WorldVector::new(0.0, 1.0, 0.0), 2 ; "plus_y")]
    #[test_case(WorldVector::new(0.0, -1.0, 0.0), 3 ; "minus_y")]
    #[test_case(WorldVector::new(0.0, 0.0, 1.0), 4 ; "plus_z")]
    #[test_case(WorldVector::new(0.0, 0.0, -1.0), 5 ; "minus_z")]
    fn hit_from_outside_towards_center(side: WorldVector, expected_face: usize) {
        let registry = cube_registry();
        let ray = Ray::new(WorldPoint::from(side * 3.0), -side);

        let_assert!(Some(hit) = registry.nearest_hit(&ray, NearOriginHits::Skip));

        assert!(hit.face.index() == expected_face);
        assert!((hit.distance - 2.5).abs() < TOLERANCE);
        assert!((hit.point - WorldPoint::from(side * 0.5)).norm() < TOLERANCE);
        assert!((hit.normal.as_ref() - side).norm() < TOLERANCE);
    }

    #[test]
    fn distance_with_unnormalized_direction() {
        let registry = cube_registry();
        let ray = Ray::new(WorldPoint::new(0.0, 0.0, -3.0), WorldVector::new(0.0, 0.0, 2.0));

        let_assert!(Some(hit) = registry.nearest_hit(&ray, NearOriginHits::Skip));

        assert!((hit.t - 1.25).abs() < TOLERANCE);
        assert!((hit.distance - 2.5).abs() < TOLERANCE);
    }

    #[test]
    fn hit_inner_surface() {
        let registry = cube_registry();
        let ray = Ray::new(WorldPoint::new(0.2, 0.4, 0.0), WorldVector::new(0.0, 1.0, 0.0));

        let_assert!(Some(hit) = registry.nearest_hit(&ray, NearOriginHits::Skip));

        assert!(hit.face.index() == 2);
        assert!((hit.distance - 0.1).abs() < TOLERANCE);
    }

    #[test]
    fn origin_on_surface_is_skipped() {
        let registry = cube_registry();
        let ray = Ray::new(WorldPoint::new(0.5, 0.1, 0.0), WorldVector::new(-1.0, 0.0, 0.0));

        let_assert!(Some(skipped) = registry.nearest_hit(&ray, NearOriginHits::Skip));
        assert!(skipped.face.index() == 1);
        assert!((skipped.distance - 1.0).abs() < TOLERANCE);

        let_assert!(Some(kept) = registry.nearest_hit(&ray, NearOriginHits::Keep));
        assert!(kept.face.index() == 0);
        assert!(kept.distance < TOLERANCE);
    }

    #[test]
    fn reflected_ray_leaves_the_face() {
        let registry = cube_registry();
        let incoming = Ray::new(WorldPoint::new(0.2, 0.4, 0.0), WorldVector::new(1.0, 0.0, 0.0));

        let_assert!(Some(first) = registry.nearest_hit(&incoming, NearOriginHits::Skip));
        assert!(first.face.index() == 0);

        let reflected = Ray::new(first.point, reflect(&incoming.direction, &first.normal));
        let_assert!(Some(second) = registry.nearest_hit(&reflected, NearOriginHits::Skip));

        assert!(second.face != first.face);
        assert!(second.face.index() == 1);
        assert!((second.distance - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn nearest_collider_wins() {
        let mut registry = ColliderRegistry::new();
        let far = registry.register(ConvexPolyhedron::cuboid(
            WorldPoint::new(5.0, 0.0, 0.0),
            WorldVector::repeat(0.5),
        ));
        let near = registry.register(ConvexPolyhedron::cuboid(
            WorldPoint::new(2.0, 0.0, 0.0),
            WorldVector::repeat(0.5),
        ));
        let ray = Ray::new(WorldPoint::origin(), WorldVector::x());

        let_assert!(Some(hit) = registry.nearest_hit(&ray, NearOriginHits::Skip));

        let near_faces: Vec<_> = registry.faces(near).map(|f| f.index).collect();
        assert!(near_faces.contains(&hit.face));
        assert!(hit.face.index() == 7); // -X face of the second collider
        assert!((hit.distance - 1.5).abs() < TOLERANCE);
        assert!(registry.faces(far).all(|f| f.index != hit.face));
    }

    #[test]
    fn skip_falls_through_to_next_collider() {
        let mut registry = ColliderRegistry::new();
        registry.register(ConvexPolyhedron::cuboid(
            WorldPoint::new(-1.0, 0.0, 0.0),
            WorldVector::repeat(0.5),
        ));
        registry.register(ConvexPolyhedron::cuboid(
            WorldPoint::new(2.0, 0.0, 0.0),
            WorldVector::repeat(0.5),
        ));
        // Starts on the +X face of the first cube, pointing away from it
        let ray = Ray::new(WorldPoint::new(-0.5, 0.0, 0.0), WorldVector::x());

        let_assert!(Some(hit) = registry.nearest_hit(&ray, NearOriginHits::Skip));

        assert!(hit.face.index() == 7);
        assert!((hit.distance - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn skip_without_fallback_misses() {
        let registry = cube_registry();
        // Starts on the +X face, pointing out of the cube
        let ray = Ray::new(WorldPoint::new(0.5, 0.0, 0.0), WorldVector::x());

        assert!(registry.nearest_hit(&ray, NearOriginHits::Skip).is_none());
        let_assert!(Some(hit) = registry.nearest_hit(&ray, NearOriginHits::Keep));
        assert!(hit.face.index() == 0);
    }

    #[test]
    fn pointing_away_misses() {
        let registry = cube_registry();
        let ray = Ray::new(WorldPoint::new(0.0, 3.0, 0.0), WorldVector::y());

        assert!(registry.nearest_hit(&ray, NearOriginHits::Keep).is_none());
    }
}
