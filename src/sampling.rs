use rand::Rng;
use rand_distr::Distribution;

use crate::geometry::{FloatType, WorldVector, float_consts::PI};

/// Directions uniformly distributed over the unit sphere.
///
/// Uses inverse transform sampling of the latitude, so that the density doesn't
/// cluster around the poles (or the box corners, as it would with normalized
/// uniform vectors from a cube).
#[derive(Copy, Clone, Debug, Default)]
pub struct UniformSphereDirection;

impl Distribution<WorldVector> for UniformSphereDirection {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> WorldVector {
        let u1: FloatType = rng.random();
        let u2: FloatType = rng.random();

        let lat = (2.0 * u1 - 1.0).acos() - PI / 2.0;
        let long = 2.0 * PI * u2;

        WorldVector::new(
            lat.cos() * long.cos(),
            lat.cos() * long.sin(),
            lat.sin(),
        )
    }
}
