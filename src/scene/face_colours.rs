use indexmap::IndexMap;

use super::{FaceIdx, SceneError};
use crate::util::{Colour, WHITE, is_unit_colour};

/// Absorption tint of collider faces.
/// Faces without an assigned colour don't absorb anything (they are white).
#[derive(Clone, Debug, Default)]
pub struct FaceColourTable {
    colours: IndexMap<FaceIdx, Colour>,
}

impl FaceColourTable {
    pub fn new() -> FaceColourTable {
        Default::default()
    }

    /// Face colours of the reference scene, assuming that faces 0..6 belong to
    /// a [`crate::geometry::ConvexPolyhedron::cuboid`].
    pub fn reference() -> FaceColourTable {
        FaceColourTable {
            colours: IndexMap::from([
                (FaceIdx::from_usize(0), Colour::new(1.0, 1.0, 0.0)),
                (FaceIdx::from_usize(1), Colour::new(0.0, 1.0, 1.0)),
                (FaceIdx::from_usize(3), Colour::new(1.0, 0.0, 1.0)),
            ]),
        }
    }

    /// Sets colour of a face, returns the previous one.
    pub fn insert(&mut self, face: FaceIdx, colour: Colour) -> Result<Option<Colour>, SceneError> {
        if !is_unit_colour(colour) {
            return Err(SceneError::InvalidFaceColour { face, colour });
        }
        Ok(self.colours.insert(face, colour))
    }

    pub fn colour_for(&self, face: FaceIdx) -> Colour {
        self.colours.get(&face).copied().unwrap_or(WHITE)
    }

    /// Explicitly assigned colours, in order of insertion.
    pub fn iter(&self) -> impl Iterator<Item = (FaceIdx, Colour)> + '_ {
        self.colours.iter().map(|(face, colour)| (*face, *colour))
    }
}
