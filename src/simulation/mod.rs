mod machinery;
mod worker;

use bon::Builder;
use thiserror::Error;

use crate::geometry::{FloatType, WorldPoint};

pub use machinery::simulate;
pub use worker::LightRayState;

/// Parameters of a single simulation run.
#[derive(Clone, Debug, Builder)]
pub struct SimulationSettings {
    #[builder(default = WorldPoint::new(0.2, 0.4, 0.0))]
    pub light_position: WorldPoint,

    /// Number of rays emitted from the light
    #[builder(default = 5_000)]
    pub ray_count: usize,

    /// Maximum number of surface hits traced for each ray
    #[builder(default = 3)]
    pub bounce_count: usize,

    /// Fraction of alpha that survives a unit of travelled distance
    #[builder(default = 0.25)]
    pub air_absorption_per_unit: FloatType,

    /// Makes the run reproducible. Random seed from the OS is used if not set.
    pub seed: Option<u64>,

    /// Number of worker threads, defaults to the number of CPUs.
    pub worker_count: Option<usize>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings::builder().build()
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<(), InvalidSettings> {
        if self.ray_count == 0 {
            return Err(InvalidSettings::ZeroRayCount);
        }
        let absorption = self.air_absorption_per_unit;
        if !(absorption > 0.0 && absorption <= 1.0) {
            return Err(InvalidSettings::AbsorptionOutOfRange(absorption));
        }
        if !self.light_position.coords.iter().all(|c| c.is_finite()) {
            return Err(InvalidSettings::NonFiniteLightPosition(self.light_position));
        }
        if self.worker_count == Some(0) {
            return Err(InvalidSettings::ZeroWorkerCount);
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum InvalidSettings {
    #[error("Ray count must be positive")]
    ZeroRayCount,

    #[error("Air absorption per unit must be in (0, 1], got {0}")]
    AbsorptionOutOfRange(FloatType),

    #[error("Light position must be finite, got {0}")]
    NonFiniteLightPosition(WorldPoint),

    #[error("Worker count must be positive")]
    ZeroWorkerCount,
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid simulation settings: {0}")]
    InvalidSettings(#[from] InvalidSettings),

    #[error("Failed to spawn worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}
