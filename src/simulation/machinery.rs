use std::{
    panic,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use crate::{
    point_cloud::{PointCloud, Sample},
    scene::Scene,
    simulation::{
        SimulationError, SimulationSettings,
        worker::{RayBatch, Worker},
    },
};

/// Number of rays a worker takes at once.
const RAY_BATCH_SIZE: usize = 256;

/// Emits rays from the light, bounces them around the scene and collects the
/// resulting samples.
///
/// Rays are traced in parallel, the call returns once all of them are finished.
/// Sample order in the output is unspecified.
pub fn simulate(
    scene: &Scene,
    settings: &SimulationSettings,
) -> Result<PointCloud, SimulationError> {
    settings.validate()?;

    let state = SimulationState {
        batch_count: settings.ray_count.div_ceil(RAY_BATCH_SIZE),
        ray_count: settings.ray_count,
        next_batch_index: AtomicUsize::new(0),
    };
    let worker_count = settings
        .worker_count
        .unwrap_or_else(num_cpus::get)
        .clamp(1, state.batch_count);

    log::debug!(
        "Simulating {} rays x {} bounces from {} on {} workers",
        settings.ray_count,
        settings.bounce_count,
        settings.light_position,
        worker_count
    );

    let worker_samples = thread::scope(|scope| -> Result<Vec<Vec<Sample>>, SimulationError> {
        let state = &state;
        let handles = (0..worker_count)
            .map(move |worker_id| {
                thread::Builder::new()
                    .name(format!("worker{worker_id}"))
                    .spawn_scoped(scope, move || {
                        let mut worker = Worker::new(settings.seed);
                        while let Some(batch) = state.get_next_batch() {
                            worker.trace_batch(scene, settings, batch);
                        }
                        worker.into_samples()
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(SimulationError::WorkerSpawn)?;

        Ok(handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| panic::resume_unwind(payload))
            })
            .collect())
    })?;

    let cloud: PointCloud = worker_samples.into_iter().flatten().collect();
    log::info!(
        "Simulated {} rays, {} samples",
        settings.ray_count,
        cloud.len()
    );

    Ok(cloud)
}

struct SimulationState {
    batch_count: usize,
    ray_count: usize,
    next_batch_index: AtomicUsize,
}

impl SimulationState {
    fn get_next_batch(&self) -> Option<RayBatch> {
        let index = self.next_batch_index.fetch_add(1, Ordering::Relaxed);
        if index >= self.batch_count {
            return None;
        }
        let first_ray = index * RAY_BATCH_SIZE;
        Some(RayBatch {
            index,
            ray_count: RAY_BATCH_SIZE.min(self.ray_count - first_ray),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{assert, let_assert};

    #[test]
    fn batches_cover_all_rays() {
        let ray_count = 3 * RAY_BATCH_SIZE + 17;
        let state = SimulationState {
            batch_count: ray_count.div_ceil(RAY_BATCH_SIZE),
            ray_count,
            next_batch_index: AtomicUsize::new(0),
        };

        let batches: Vec<_> = std::iter::from_fn(|| state.get_next_batch()).collect();

        assert!(batches.len() == 4);
        assert!(batches.iter().map(|b| b.ray_count).sum::<usize>() == ray_count);
        assert!(batches[3].ray_count == 17);
        assert!(batches.iter().enumerate().all(|(i, b)| b.index == i));
        assert!(state.get_next_batch().is_none());
    }

    #[test]
    fn more_workers_than_batches() {
        let scene = Scene::reference();
        let settings = SimulationSettings::builder()
            .ray_count(10)
            .bounce_count(1)
            .worker_count(64)
            .build();

        let_assert!(Ok(cloud) = simulate(&scene, &settings));
        assert!(cloud.len() == 10);
    }
}
