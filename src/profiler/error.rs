//! Profiler error types
//!
//! Provides error types for profiler configuration operations.

/// Errors from profiler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfilerError {
    /// Every segment slot is already registered
    CapacityExceeded {
        /// Fixed number of segment slots
        capacity: usize,
    },
}

impl core::fmt::Display for ProfilerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProfilerError::CapacityExceeded { capacity } => {
                write!(f, "segment capacity of {} exceeded", capacity)
            }
        }
    }
}
