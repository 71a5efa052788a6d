//! Per-iteration control loop profiling
//!
//! [`IterationProfiler`] measures how long each pass of the control loop
//! takes and how that time splits across named phases ("segments") within
//! the pass. Samples feed an [`Accumulator`] per measurement so the report
//! shows smoothed values rather than the last, noisy reading.
//!
//! # Components
//!
//! - [`accumulator`]: `Accumulator` trait and the default `MovingAverage`
//! - [`config`]: `ProfilerConfig` (resolution floor)
//! - [`error`]: `ProfilerError`
//!
//! # Example
//!
//! ```rust
//! use pico_timeout::profiler::IterationProfiler;
//! use pico_timeout::traits::MockClock;
//!
//! let clock = MockClock::<u32>::new();
//! let mut profiler: IterationProfiler = IterationProfiler::default();
//! profiler.register_segment("sensors");
//! profiler.register_segment("control");
//!
//! for _ in 0..3 {
//!     profiler.begin(&clock);
//!     clock.advance(4); // read sensors
//!     profiler.mark_segment_done(&clock);
//!     clock.advance(6); // run controllers
//!     profiler.mark_segment_done(&clock);
//! }
//! profiler.begin(&clock);
//!
//! let mut out = String::new();
//! profiler.report(&mut out).unwrap();
//! assert_eq!(out, "Speed:\nLoop 10\nsensors 4\ncontrol 6\n");
//! ```

pub mod accumulator;
pub mod config;
pub mod error;

pub use accumulator::{Accumulator, MovingAverage};
pub use config::{ProfilerConfig, DEFAULT_MIN_RESOLUTION_TICKS};
pub use error::ProfilerError;

use core::fmt;

use heapless::Vec;

use crate::traits::{Tick, TickSource};

/// Default number of segment slots.
pub const DEFAULT_SEGMENT_CAPACITY: usize = 8;

/// Named phase of one loop iteration and its timing.
#[derive(Debug, Clone)]
pub struct Segment<A: Accumulator = MovingAverage> {
    label: &'static str,
    timing: A,
}

impl<A: Accumulator> Segment<A> {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            timing: A::default(),
        }
    }

    /// Name given at registration.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Accumulated timing for this segment.
    pub fn timing(&self) -> &A {
        &self.timing
    }
}

/// Loop and segment timing for a polled control loop.
///
/// Per iteration: [`begin`](Self::begin), then one
/// [`mark_segment_done`](Self::mark_segment_done) per phase in registration
/// order. The iteration ends implicitly at the next `begin`.
///
/// Segment storage is fixed at `N` slots; nothing is allocated after
/// construction.
#[derive(Debug, Clone)]
pub struct IterationProfiler<
    T: Tick = u32,
    A: Accumulator = MovingAverage,
    const N: usize = DEFAULT_SEGMENT_CAPACITY,
> {
    config: ProfilerConfig,
    loop_timing: A,
    segments: Vec<Segment<A>, N>,
    cursor: usize,
    segment_start: T,
    last_iteration_start: Option<T>,
}

impl<T: Tick, A: Accumulator, const N: usize> Default for IterationProfiler<T, A, N> {
    fn default() -> Self {
        Self::new(ProfilerConfig::default())
    }
}

impl<T: Tick, A: Accumulator, const N: usize> IterationProfiler<T, A, N> {
    /// Creates a profiler with no registered segments.
    pub fn new(config: ProfilerConfig) -> Self {
        Self {
            config,
            loop_timing: A::default(),
            segments: Vec::new(),
            cursor: 0,
            segment_start: T::ZERO,
            last_iteration_start: None,
        }
    }

    /// Active runtime settings.
    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Whole-iteration timing.
    pub fn loop_timing(&self) -> &A {
        &self.loop_timing
    }

    /// Registered segments in registration order.
    pub fn segments(&self) -> &[Segment<A>] {
        &self.segments
    }

    /// Segment at `index`, if registered.
    pub fn segment(&self, index: usize) -> Option<&Segment<A>> {
        self.segments.get(index)
    }

    /// Number of registered segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Fixed number of segment slots.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Appends a named segment slot and returns its index.
    ///
    /// # Errors
    ///
    /// [`ProfilerError::CapacityExceeded`] when all `N` slots are taken.
    pub fn try_register_segment(&mut self, label: &'static str) -> Result<usize, ProfilerError> {
        self.segments
            .push(Segment::new(label))
            .map_err(|_| ProfilerError::CapacityExceeded { capacity: N })?;
        Ok(self.segments.len() - 1)
    }

    /// Appends a named segment slot, ignoring the request when full.
    ///
    /// Profiling is best-effort diagnostics; an overflowing registration is
    /// logged and otherwise dropped.
    pub fn register_segment(&mut self, label: &'static str) {
        if let Err(err) = self.try_register_segment(label) {
            crate::log_warn!("Profiler: segment {} dropped, {}", label, err);
        }
    }

    /// Starts a new iteration, closing the previous one.
    ///
    /// The previous iteration's length is sampled unless this is the first
    /// call or the length is within the resolution floor.
    pub fn begin<C: TickSource<Tick = T>>(&mut self, clock: &C) {
        let now = clock.now();

        if let Some(last) = self.last_iteration_start {
            let delta = now.wrapping_since(last);
            if self.is_significant(delta) {
                self.loop_timing.add(delta.as_u64());
            }
        }

        self.last_iteration_start = Some(now);
        self.segment_start = now;
        self.cursor = 0;
    }

    /// Closes the current segment and moves to the next registered one.
    ///
    /// Calls beyond the registered segments only restart the segment clock.
    pub fn mark_segment_done<C: TickSource<Tick = T>>(&mut self, clock: &C) {
        let now = clock.now();
        let delta = now.wrapping_since(self.segment_start);
        let significant = self.is_significant(delta);

        if let Some(segment) = self.segments.get_mut(self.cursor) {
            if significant {
                segment.timing.add(delta.as_u64());
            }
            self.cursor += 1;
        }

        self.segment_start = now;
    }

    /// Closes the current segment, attributing it to `index`.
    ///
    /// For phases that do not run in registration order. Does not move the
    /// cursor used by [`mark_segment_done`](Self::mark_segment_done).
    pub fn mark_segment_done_at<C: TickSource<Tick = T>>(&mut self, clock: &C, index: usize) {
        let now = clock.now();
        let delta = now.wrapping_since(self.segment_start);
        let significant = self.is_significant(delta);

        match self.segments.get_mut(index) {
            Some(segment) => {
                if significant {
                    segment.timing.add(delta.as_u64());
                }
            }
            None => {
                crate::log_debug!("Profiler: no segment at index {}", index);
            }
        }

        self.segment_start = now;
    }

    /// Clears every accumulator; registered labels are kept.
    pub fn clear(&mut self) {
        self.loop_timing.clear();
        for segment in self.segments.iter_mut() {
            segment.timing.clear();
        }
        crate::log_trace!("Profiler: cleared {} segments", self.segments.len());
    }

    /// Writes the loop value and every sampled segment, one per line.
    ///
    /// ```text
    /// Speed:
    /// Loop 12
    /// sensors 4
    /// ```
    ///
    /// # Errors
    ///
    /// Propagates the first write error from `out`.
    pub fn report<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "Speed:")?;
        writeln!(out, "Loop {}", self.loop_timing.value())?;

        for segment in self.segments.iter().filter(|s| s.timing.samples() > 0) {
            writeln!(out, "{} {}", segment.label, segment.timing.value())?;
        }
        Ok(())
    }

    #[inline]
    fn is_significant(&self, delta: T) -> bool {
        delta.as_u64() > self.config.min_resolution_ticks
    }
}
