pub mod geometry;
pub mod point_cloud;
pub mod sampling;
pub mod scene;
pub mod simulation;
mod util;

pub use point_cloud::{PointCloud, Sample};
pub use scene::Scene;
pub use simulation::{SimulationError, SimulationSettings, simulate};
pub use util::{Colour, Stats};
