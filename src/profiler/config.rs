//! Profiler runtime configuration

/// Default floor below which timing deltas are discarded, in ticks.
///
/// With a millisecond tick, a delta of 0 or 1 is tick quantization rather
/// than work done.
pub const DEFAULT_MIN_RESOLUTION_TICKS: u64 = 1;

/// Runtime settings for [`IterationProfiler`](super::IterationProfiler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfilerConfig {
    /// Deltas less than or equal to this many ticks are not sampled.
    pub min_resolution_ticks: u64,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            min_resolution_ticks: DEFAULT_MIN_RESOLUTION_TICKS,
        }
    }
}
