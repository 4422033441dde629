use std::{fs, path::Path};

use arrayvec::ArrayVec;
use thiserror::Error;

use super::{FloatType, Plane, Ray, WorldPoint, WorldVector};

/// Convex solid bounded by a set of planes, one plane per face.
///
/// The solid is the intersection of the half spaces behind the face planes.
/// Faces are numbered by their position in the plane list.
/// Only convex shapes can be represented; building one from a non-convex mesh
/// (see [`ConvexPolyhedron::from_obj`]) gives the convex region bounded by all of its
/// face planes, which is not the original shape.
#[derive(Clone, Debug)]
pub struct ConvexPolyhedron {
    faces: Vec<Plane>,
}

/// Point where a ray passes through the surface of a polyhedron.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Crossing {
    /// Ray parameter of the crossing
    pub t: FloatType,
    /// Index of the crossed face within the polyhedron
    pub face: usize,
}

impl ConvexPolyhedron {
    pub fn from_planes(faces: impl IntoIterator<Item = Plane>) -> ConvexPolyhedron {
        ConvexPolyhedron {
            faces: faces.into_iter().collect(),
        }
    }

    /// Axis aligned box.
    /// Faces are ordered +X, -X, +Y, -Y, +Z, -Z.
    pub fn cuboid(center: WorldPoint, half_size: WorldVector) -> ConvexPolyhedron {
        let faces = [
            (WorldVector::x_axis(), half_size.x),
            (-WorldVector::x_axis(), half_size.x),
            (WorldVector::y_axis(), half_size.y),
            (-WorldVector::y_axis(), half_size.y),
            (WorldVector::z_axis(), half_size.z),
            (-WorldVector::z_axis(), half_size.z),
        ]
        .map(|(normal, half)| Plane::new(normal, normal.dot(&center.coords) + half));

        ConvexPolyhedron {
            faces: faces.into(),
        }
    }

    /// Cube with edge length 1 centered at the origin.
    pub fn unit_cube() -> ConvexPolyhedron {
        Self::cuboid(WorldPoint::origin(), WorldVector::repeat(0.5))
    }

    /// Loads a convex triangle mesh from a wavefront OBJ file.
    /// Coplanar triangles are merged into a single face, faces are numbered in order
    /// of first appearance in the file.
    pub fn from_obj(p: impl AsRef<Path>) -> Result<ConvexPolyhedron, ObjOpenError> {
        let content = fs::read_to_string(p)?;
        let parsed = wavefront_obj::obj::parse(content)?;

        Self::load_obj(parsed)
    }

    fn load_obj(obj: wavefront_obj::obj::ObjSet) -> Result<ConvexPolyhedron, ObjOpenError> {
        let mut faces: Vec<Plane> = Vec::new();

        for o in obj.objects.into_iter() {
            let vertex = |index: usize| {
                let v = &o.vertices[index];
                WorldPoint::new(v.x as FloatType, v.y as FloatType, v.z as FloatType)
            };

            for geometry in &o.geometry {
                for shape in &geometry.shapes {
                    let wavefront_obj::obj::Primitive::Triangle(a, b, c) = &shape.primitive else {
                        log::warn!("Skipping non-triangle primitive in object {}", o.name);
                        continue;
                    };

                    let (a, b, c) = (vertex(a.0), vertex(b.0), vertex(c.0));
                    let Some(plane) = Plane::through_point(&(b - a).cross(&(c - a)), &a) else {
                        log::warn!("Skipping degenerate triangle in object {}", o.name);
                        continue;
                    };

                    if !faces.iter().any(|face| face.approx_eq(&plane)) {
                        faces.push(plane);
                    }
                }
            }
        }

        if faces.is_empty() {
            return Err(ObjOpenError::NoFaces);
        }

        Ok(ConvexPolyhedron { faces })
    }

    pub fn faces(&self) -> &[Plane] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Signed distance-like measure from the surface: negative inside, zero on the surface,
    /// positive outside.
    /// Exact on the surface and inside, a lower bound of the distance outside.
    pub fn signed_distance(&self, point: &WorldPoint) -> FloatType {
        self.faces
            .iter()
            .map(|face| face.signed_distance(point))
            .fold(FloatType::NEG_INFINITY, FloatType::max)
    }

    /// Calculates where the ray crosses the surface.
    ///
    /// Returns the crossings with `t >= 0`, ordered by `t`: both entry and exit for rays
    /// starting outside the solid, only the exit for rays starting inside, nothing
    /// for rays that miss.
    pub fn intersect(&self, ray: &Ray) -> ArrayVec<Crossing, 2> {
        let mut entry = Crossing {
            t: FloatType::NEG_INFINITY,
            face: usize::MAX,
        };
        let mut exit = Crossing {
            t: FloatType::INFINITY,
            face: usize::MAX,
        };

        for (face, plane) in self.faces.iter().enumerate() {
            let (t, denominator) = plane.intersect(ray);
            if denominator < 0.0 {
                if t > entry.t {
                    entry = Crossing { t, face };
                }
            } else if denominator > 0.0 {
                if t < exit.t {
                    exit = Crossing { t, face };
                }
            } else if plane.signed_distance(&ray.origin) > 0.0 {
                // Parallel to the plane and outside of it
                return ArrayVec::new();
            }
        }

        let mut crossings = ArrayVec::new();
        if entry.t > exit.t {
            return crossings;
        }
        for crossing in [entry, exit] {
            if crossing.t >= 0.0 && crossing.t.is_finite() {
                crossings.push(crossing);
            }
        }
        crossings
    }
}

#[derive(Debug, Error)]
pub enum ObjOpenError {
    #[error("Failed to read file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse file: {0}")]
    ParseError(#[from] wavefront_obj::ParseError),

    #[error("File contains no usable triangles")]
    NoFaces,
}
