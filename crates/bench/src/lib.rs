//! Shared criterion settings for the workspace benchmarks.

use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::SeedableRng;
use rand::rngs::StdRng;

const RNG_SEED: u64 = 0x5E67_7EE5;

/// Sample count and timings for one benchmark group, scaled by input size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimePreset {
    Small,
    Medium,
    Large,
}

impl RuntimePreset {
    pub fn for_size(size: usize) -> Self {
        if size <= 4_096 {
            Self::Small
        } else if size <= 16_384 {
            Self::Medium
        } else {
            Self::Large
        }
    }

    pub fn sample_size(self) -> usize {
        match self {
            Self::Small | Self::Medium => 15,
            Self::Large => 10,
        }
    }

    pub fn warm_up(self) -> Duration {
        match self {
            Self::Small => Duration::from_millis(100),
            Self::Medium => Duration::from_millis(500),
            Self::Large => Duration::from_millis(800),
        }
    }

    pub fn measurement(self) -> Duration {
        match self {
            Self::Small => Duration::from_millis(200),
            Self::Medium => Duration::from_millis(1000),
            Self::Large => Duration::from_millis(1500),
        }
    }

    pub fn apply<M: Measurement>(self, group: &mut BenchmarkGroup<'_, M>) {
        group.sample_size(self.sample_size());
        group.warm_up_time(self.warm_up());
        group.measurement_time(self.measurement());
    }
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

#[cfg(test)]
mod tests {
    use super::RuntimePreset;

    #[test]
    fn presets_scale_with_size() {
        assert_eq!(RuntimePreset::for_size(1_024), RuntimePreset::Small);
        assert_eq!(RuntimePreset::for_size(4_096), RuntimePreset::Small);
        assert_eq!(RuntimePreset::for_size(16_384), RuntimePreset::Medium);
        assert_eq!(RuntimePreset::for_size(65_536), RuntimePreset::Large);
        assert!(RuntimePreset::Large.measurement() > RuntimePreset::Small.measurement());
    }
}
