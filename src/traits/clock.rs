//! Tick source abstraction for platform-agnostic timing.
//!
//! This module provides the `TickSource` trait that abstracts over the
//! hardware counter (Embassy time driver, mock, etc.) to enable host testing
//! without embedded dependencies.

use core::cell::Cell;

use super::tick::Tick;

/// Monotonic wrapping tick counter read by the control loop.
///
/// The counter must only ever move forward, except for the single rollover
/// from [`Tick::MAX`] to zero.
///
/// # Example
///
/// ```
/// use pico_timeout::traits::{MockClock, TickSource};
///
/// fn control_loop<C: TickSource<Tick = u32>>(clock: &C, last_update: &mut u32) {
///     if clock.elapsed_since(*last_update) >= 20 { // 50Hz
///         // Do control update
///         *last_update = clock.now();
///     }
/// }
///
/// let clock = MockClock::<u32>::new();
/// let mut last = 0;
/// control_loop(&clock, &mut last);
/// ```
pub trait TickSource {
    /// Counter type produced by this source.
    type Tick: Tick;

    /// Returns the current tick count.
    fn now(&self) -> Self::Tick;

    /// Returns the ticks elapsed since `earlier`.
    ///
    /// Uses wrapping subtraction so the result is correct across rollover.
    fn elapsed_since(&self, earlier: Self::Tick) -> Self::Tick {
        self.now().wrapping_since(earlier)
    }
}

impl<C: TickSource + ?Sized> TickSource for &C {
    type Tick = C::Tick;

    fn now(&self) -> Self::Tick {
        (**self).now()
    }
}

// ============================================================================
// Embassy Implementation
// ============================================================================

/// Embassy-based tick source in milliseconds since boot.
///
/// `embassy_time::Instant` is 64-bit; the value is truncated to 32 bits so it
/// wraps like a conventional firmware millisecond counter (every ~49.7 days).
#[cfg(feature = "embassy")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embassy")]
impl TickSource for EmbassyClock {
    type Tick = u32;

    fn now(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock tick source for testing with controllable time advancement.
///
/// Advancing wraps at the counter boundary, so a narrow counter type can be
/// used to drive deadlines through rollover.
///
/// # Example
///
/// ```
/// use pico_timeout::traits::{MockClock, TickSource};
///
/// let clock = MockClock::<u8>::with_initial(250);
/// clock.advance(10);
/// assert_eq!(clock.now(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockClock<T: Tick = u32> {
    current: Cell<T>,
}

impl<T: Tick> MockClock<T> {
    /// Creates a new `MockClock` starting at tick 0.
    pub fn new() -> Self {
        Self::with_initial(T::ZERO)
    }

    /// Creates a new `MockClock` starting at the specified tick.
    pub fn with_initial(tick: T) -> Self {
        Self {
            current: Cell::new(tick),
        }
    }

    /// Sets the current tick to an absolute value.
    pub fn set(&self, tick: T) {
        self.current.set(tick);
    }

    /// Advances the current tick, wrapping at the counter boundary.
    pub fn advance(&self, ticks: T) {
        self.current.set(self.current.get().wrapping_offset(ticks));
    }
}

impl<T: Tick> TickSource for MockClock<T> {
    type Tick = T;

    fn now(&self) -> T {
        self.current.get()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
