mod ply;

use crate::{
    geometry::{FloatType, WorldPoint},
    util::{Colour, Stats},
};

/// Single point of the simulated light, placed where a ray hit a collider.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    pub position: WorldPoint,
    pub colour: Colour,
    pub alpha: FloatType,
}

/// Unordered collection of samples produced by a simulation run.
#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    samples: Vec<Sample>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloudSummary {
    pub sample_count: usize,
    pub alpha: Stats,
}

impl PointCloud {
    pub fn new() -> PointCloud {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Moves all samples from `other` into this cloud.
    pub fn extend(&mut self, other: PointCloud) {
        if self.samples.is_empty() {
            self.samples = other.samples;
        } else {
            self.samples.extend(other.samples);
        }
    }

    pub fn summary(&self) -> PointCloudSummary {
        PointCloudSummary {
            sample_count: self.samples.len(),
            alpha: self.samples.iter().map(|s| s.alpha).collect(),
        }
    }
}

impl PointCloudSummary {
    /// Summary of two clouds combined, without going through their samples again.
    pub fn merge(&self, other: &Self) -> Self {
        PointCloudSummary {
            sample_count: self.sample_count + other.sample_count,
            alpha: self.alpha.merge(&other.alpha),
        }
    }
}


impl From<Vec<Sample>> for PointCloud {
    fn from(samples: Vec<Sample>) -> Self {
        PointCloud { samples }
    }
}

impl FromIterator<Sample> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        PointCloud {
            samples: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PointCloud {
    type Item = Sample;
    type IntoIter = std::vec::IntoIter<Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl std::fmt::Display for PointCloudSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.sample_count == 0 {
            return write!(f, "no samples");
        }
        write!(f, "{} samples, alpha {}", self.sample_count, self.alpha)
    }
}
