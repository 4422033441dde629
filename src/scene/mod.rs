mod face_colours;
mod intersection;

use index_vec::IndexVec;
use thiserror::Error;

use crate::{
    geometry::{ConvexPolyhedron, Plane},
    util::Colour,
};

pub use face_colours::FaceColourTable;
pub use intersection::{HitRecord, NearOriginHits};

index_vec::define_index_type! {
    /// Handle of a collider registered in a [`ColliderRegistry`].
    pub struct ColliderIdx = u32;
}

index_vec::define_index_type! {
    /// Index of a collider face, unique across the whole registry.
    pub struct FaceIdx = u32;
}

/// Everything the simulation bounces light off.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub colliders: ColliderRegistry,
    pub face_colours: FaceColourTable,
}

impl Scene {
    pub fn new(colliders: ColliderRegistry, face_colours: FaceColourTable) -> Scene {
        Scene {
            colliders,
            face_colours,
        }
    }

    /// Unit cube centered at the origin, with yellow +X face, cyan -X face and
    /// magenta -Y face.
    pub fn reference() -> Scene {
        let mut colliders = ColliderRegistry::new();
        colliders.register(ConvexPolyhedron::unit_cube());
        Scene {
            colliders,
            face_colours: FaceColourTable::reference(),
        }
    }
}

#[derive(Clone, Debug)]
struct RegisteredCollider {
    first_face: FaceIdx,
    shape: ConvexPolyhedron,
}

/// Ordered set of convex colliders.
///
/// Faces of every registered collider get contiguous indices, continuing where the
/// previously registered collider stopped.
#[derive(Clone, Debug, Default)]
pub struct ColliderRegistry {
    colliders: IndexVec<ColliderIdx, RegisteredCollider>,
    face_count: usize,
}

/// Face of a registered collider.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Face {
    pub index: FaceIdx,
    pub plane: Plane,
}

impl ColliderRegistry {
    pub fn new() -> ColliderRegistry {
        Default::default()
    }

    pub fn register(&mut self, shape: ConvexPolyhedron) -> ColliderIdx {
        let first_face = FaceIdx::from_usize(self.face_count);
        self.face_count += shape.face_count();
        let handle = self.colliders.push(RegisteredCollider { first_face, shape });
        log::debug!(
            "Registered collider {} with faces {}..{}",
            handle.index(),
            first_face.index(),
            self.face_count
        );
        handle
    }

    pub fn collider(&self, handle: ColliderIdx) -> &ConvexPolyhedron {
        &self.colliders[handle].shape
    }

    pub fn faces(&self, handle: ColliderIdx) -> impl Iterator<Item = Face> + '_ {
        let collider = &self.colliders[handle];
        collider
            .shape
            .faces()
            .iter()
            .enumerate()
            .map(|(i, plane)| Face {
                index: collider.first_face + i,
                plane: *plane,
            })
    }

    /// Number of registered colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Total number of faces of all registered colliders
    pub fn face_count(&self) -> usize {
        self.face_count
    }
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Colour {colour:?} of face {} is outside of [0, 1]", .face.index())]
    InvalidFaceColour { face: FaceIdx, colour: Colour },
}
