//! Elapsed-time measurement

use super::units::TICKS_PER_SECOND;
use crate::traits::{Tick, TickSource};

/// Measures ticks between an explicit start and stop, or against now.
///
/// [`Stopwatch::elapsed`] is live and ignores `stop`; [`Stopwatch::measured`]
/// is the interval frozen by the last `start`/`stop` pair.
///
/// # Example
///
/// ```
/// use pico_timeout::timeout::Stopwatch;
/// use pico_timeout::traits::MockClock;
///
/// let clock = MockClock::<u32>::new();
/// let mut watch = Stopwatch::new(&clock);
///
/// clock.advance(42);
/// watch.stop(&clock);
/// clock.advance(8);
/// assert_eq!(watch.measured(), 42);
/// assert_eq!(watch.elapsed(&clock), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stopwatch<T: Tick = u32> {
    start: T,
    stop: T,
}

impl<T: Tick> Stopwatch<T> {
    /// Starts a stopwatch at now with zero measured time.
    pub fn new<C: TickSource<Tick = T>>(clock: &C) -> Self {
        let now = clock.now();
        Self {
            start: now,
            stop: now,
        }
    }

    /// Restarts at now and zeroes the measured interval.
    pub fn reset<C: TickSource<Tick = T>>(&mut self, clock: &C) {
        *self = Self::new(clock);
    }

    /// Moves the start to now; pair with [`Stopwatch::stop`] to measure an interval.
    pub fn start<C: TickSource<Tick = T>>(&mut self, clock: &C) {
        self.start = clock.now();
    }

    /// Freezes the measured interval at now.
    pub fn stop<C: TickSource<Tick = T>>(&mut self, clock: &C) {
        self.stop = clock.now();
    }

    /// Ticks since the last start.
    pub fn elapsed<C: TickSource<Tick = T>>(&self, clock: &C) -> T {
        clock.now().wrapping_since(self.start)
    }

    /// Whole seconds since the last start.
    pub fn elapsed_secs<C: TickSource<Tick = T>>(&self, clock: &C) -> u64 {
        self.elapsed(clock).as_u64() / TICKS_PER_SECOND
    }

    /// Ticks between the last start and stop.
    pub fn measured(&self) -> T {
        self.stop.wrapping_since(self.start)
    }
}
