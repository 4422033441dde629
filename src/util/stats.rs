use std::fmt::Display;

use crate::geometry::FloatType;

/// Running minimum, maximum and mean of a series of values.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub count: usize,
    pub min: FloatType,
    pub max: FloatType,
    pub mean: FloatType,
}

impl Stats {
    pub fn add_sample(&mut self, value: FloatType) {
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.mean += (value - self.mean) / (self.count as FloatType);
    }

    pub fn merge(&self, other: &Self) -> Self {
        let count = self.count + other.count;
        Stats {
            count,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
            mean: if count > 0 {
                (self.mean * self.count as FloatType + other.mean * other.count as FloatType)
                    / count as FloatType
            } else {
                0.0
            },
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Stats {
            count: 0,
            min: FloatType::INFINITY,
            max: FloatType::NEG_INFINITY,
            mean: 0.0,
        }
    }
}

impl FromIterator<FloatType> for Stats {
    fn from_iter<I: IntoIterator<Item = FloatType>>(iter: I) -> Self {
        let mut stats = Stats::default();
        for value in iter {
            stats.add_sample(value);
        }
        stats
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            return write!(f, "no samples");
        }
        write!(
            f,
            "{:.3} - {:.3}; mean {:.3}; {} samples",
            self.min, self.max, self.mean, self.count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;

    #[test]
    fn add_sample() {
        let mut s = Stats::default();
        s.add_sample(0.5);
        assert!(s.count == 1);
        assert!(s.min == 0.5);
        assert!(s.max == 0.5);
        assert!(s.mean == 0.5);
    }

    #[test]
    fn collect() {
        let s: Stats = [0.25, 1.0, 0.5, 0.25].into_iter().collect();
        assert!(s.count == 4);
        assert!(s.min == 0.25);
        assert!(s.max == 1.0);
        assert!((s.mean - 0.5).abs() < 1e-6);
    }

    #[test]
    fn merge_stats() {
        let a: Stats = [0.25].into_iter().collect();
        let b: Stats = [0.5, 0.75].into_iter().collect();
        let m = a.merge(&b);
        assert!(m.count == 3);
        assert!(m.min == 0.25);
        assert!(m.max == 0.75);
        assert!(m.mean == 0.5);
    }

    #[test]
    fn merge_with_default() {
        let s: Stats = [0.125].into_iter().collect();
        assert!(Stats::default().merge(&s) == s);
        assert!(Stats::default().merge(&Stats::default()) == Stats::default());
    }

    #[test]
    fn display_format() {
        let s: Stats = [0.5].into_iter().collect();
        let output = format!("{}", s);
        assert!(output.contains("0.500 - 0.500"));
        assert!(output.contains("mean 0.500"));
        assert!(output.contains("1 samples"));
        assert!(format!("{}", Stats::default()) == "no samples");
    }
}
