//! Deadline and elapsed-time primitives for polled control loops
//!
//! Every object here is owned by the loop that polls it; the tick source is
//! passed into each call rather than stored.
//!
//! # Components
//!
//! - [`deadline`]: `Deadline` covering one-shot timeouts, intervals,
//!   repeat-limited timers and debouncers
//! - [`units`]: seconds/minutes/hours to tick conversion
//! - [`stopwatch`]: `Stopwatch` for measuring elapsed ticks
//!
//! # Example
//!
//! ```rust
//! use pico_timeout::timeout::Deadline;
//! use pico_timeout::traits::MockClock;
//!
//! let clock = MockClock::<u32>::new();
//! let mut failsafe = Deadline::from_secs(&clock, 2, false, true);
//!
//! clock.advance(1_999);
//! assert!(!failsafe.check_and_disable(&clock));
//! clock.advance(1);
//! assert!(failsafe.check_and_disable(&clock));
//! assert!(!failsafe.check_and_disable(&clock)); // one-shot
//! ```

pub mod deadline;
pub mod stopwatch;
pub mod units;

pub use deadline::{Deadline, RepeatLimit};
pub use stopwatch::Stopwatch;
pub use units::{hours_to_ticks, mins_to_ticks, secs_to_ticks, TICKS_PER_SECOND};
