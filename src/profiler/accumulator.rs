//! Smoothing accumulators for timing samples

/// Ingests timing samples and exposes a representative value.
///
/// The profiler only depends on this trait; the smoothing algorithm is the
/// implementor's concern.
pub trait Accumulator: Default {
    /// Discards all samples.
    fn clear(&mut self);

    /// Adds one sample in ticks.
    fn add(&mut self, sample: u64);

    /// Current smoothed value in ticks (0 before the first sample).
    fn value(&self) -> u64;

    /// Number of samples added since the last clear.
    fn samples(&self) -> u32;
}

/// Exponential moving average with alpha = 0.1.
///
/// Uses fixed-point arithmetic: `avg_new = (sample + 9 * avg_old) / 10`.
/// The first sample seeds the average directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MovingAverage {
    value: u64,
    samples: u32,
}

impl MovingAverage {
    /// Empty average with no samples.
    pub const fn new() -> Self {
        Self {
            value: 0,
            samples: 0,
        }
    }
}

impl Accumulator for MovingAverage {
    fn clear(&mut self) {
        *self = Self::new();
    }

    fn add(&mut self, sample: u64) {
        if self.samples == 0 {
            self.value = sample;
        } else {
            self.value = sample.saturating_add(self.value.saturating_mul(9)) / 10;
        }
        self.samples = self.samples.saturating_add(1);
    }

    fn value(&self) -> u64 {
        self.value
    }

    fn samples(&self) -> u32 {
        self.samples
    }
}
