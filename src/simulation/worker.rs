use rand::{Rng, SeedableRng, rngs::SmallRng};
use rand_distr::Distribution as _;

use crate::{
    geometry::{FloatType, Ray, reflect},
    point_cloud::Sample,
    sampling::UniformSphereDirection,
    scene::{HitRecord, NearOriginHits, Scene},
    simulation::SimulationSettings,
    util::{Colour, WHITE, tint},
};

/// Range of rays processed by a worker in one go.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RayBatch {
    pub index: usize,
    pub ray_count: usize,
}

/// Light carried by a single ray between bounces.
#[derive(Clone, Debug)]
pub struct LightRayState {
    pub ray: Ray,
    pub colour: Colour,
    pub alpha: FloatType,
}

impl LightRayState {
    pub fn new(ray: Ray) -> LightRayState {
        LightRayState {
            ray,
            colour: WHITE,
            alpha: 1.0,
        }
    }

    /// Attenuates the light by the distance travelled to the hit, reflects the ray off
    /// the hit face and tints it by the face colour.
    /// Returns sample of the light arriving at the hit point (before the face tint).
    pub fn bounce(
        &mut self,
        hit: &HitRecord,
        face_colour: Colour,
        air_absorption_per_unit: FloatType,
    ) -> Sample {
        // Alpha must stay positive even for very long paths
        self.alpha = (self.alpha * air_absorption_per_unit.powf(hit.distance))
            .max(FloatType::MIN_POSITIVE);

        let sample = Sample {
            position: hit.point,
            colour: self.colour,
            alpha: self.alpha,
        };

        self.ray = Ray::new(hit.point, reflect(&self.ray.direction, &hit.normal));
        self.colour = tint(self.colour, face_colour);

        sample
    }
}

/// Random generator for one batch of a seeded run.
/// The seed is scrambled before the batch index is mixed in, so that neighbouring
/// seeds don't reuse each other's batch streams.
fn batch_rng(seed: u64, batch_index: usize) -> SmallRng {
    let stream: u64 = SmallRng::seed_from_u64(seed).random();
    SmallRng::seed_from_u64(stream ^ batch_index as u64)
}

pub struct Worker {
    rng: SmallRng,
    seed: Option<u64>,
    samples: Vec<Sample>,
}

impl Worker {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
            seed,
            samples: Vec::new(),
        }
    }

    pub fn trace_batch(&mut self, scene: &Scene, settings: &SimulationSettings, batch: RayBatch) {
        if let Some(seed) = self.seed {
            // Output of seeded runs must not depend on which worker gets which batch
            self.rng = batch_rng(seed, batch.index);
        }

        self.samples.reserve(batch.ray_count * settings.bounce_count);
        for _ in 0..batch.ray_count {
            self.trace_ray(scene, settings);
        }
    }

    /// Emits a single ray from the light and follows it until it misses everything or
    /// runs out of bounces.
    fn trace_ray(&mut self, scene: &Scene, settings: &SimulationSettings) {
        let direction = UniformSphereDirection.sample(&mut self.rng);
        let mut state = LightRayState::new(Ray::new(settings.light_position, direction));

        for _ in 0..settings.bounce_count {
            let Some(hit) = scene
                .colliders
                .nearest_hit(&state.ray, NearOriginHits::Skip)
            else {
                break;
            };

            let face_colour = scene.face_colours.colour_for(hit.face);
            self.samples
                .push(state.bounce(&hit, face_colour, settings.air_absorption_per_unit));
        }
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}
