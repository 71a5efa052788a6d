#![cfg_attr(not(test), no_std)]

//! pico_timeout - Deadline and loop-timing primitives for tick-driven control loops
//!
//! All time in this crate derives from a single wrapping tick counter
//! (milliseconds since boot on the target). Every comparison is done with
//! wrapping subtraction so deadlines stay correct across counter rollover.
//!
//! # Design Principles
//!
//! - **No allocation**: fixed-capacity storage via `heapless`
//! - **No globals**: every timer is owned by the loop that polls it
//! - **Clock injection**: the tick source is passed by reference into each call
//!
//! # Modules
//!
//! - [`traits`]: Tick counter and tick source abstractions (`Tick`, `TickSource`, `MockClock`)
//! - [`timeout`]: `Deadline` (one-shot, interval, repeating, debounce) and `Stopwatch`
//! - [`profiler`]: Per-iteration loop and segment timing (`IterationProfiler`)
//! - [`logging`]: `log_*!` macros (defmt on target, stdout in host tests)
//!
//! # Example
//!
//! ```
//! use pico_timeout::traits::MockClock;
//! use pico_timeout::timeout::Deadline;
//!
//! let clock = MockClock::<u32>::new();
//! let mut blink = Deadline::interval(&clock, 500);
//!
//! clock.advance(499);
//! assert!(!blink.check_and_rearm(&clock));
//! clock.advance(1);
//! assert!(blink.check_and_rearm(&clock));
//! ```

pub mod logging;
pub mod profiler;
pub mod timeout;
pub mod traits;

pub use profiler::{Accumulator, IterationProfiler, MovingAverage, ProfilerConfig, ProfilerError};
pub use timeout::{Deadline, RepeatLimit, Stopwatch};
pub use traits::{MockClock, Tick, TickSource};
