//! Tick counter and tick source abstractions.
//!
//! This module decouples the timing primitives from any particular hardware
//! timer so they can be tested on host with a controllable clock.
//!
//! # Design
//!
//! - [`Tick`] is the wrapping unsigned counter type (`u8`..`u64`)
//! - [`TickSource`] reads the current tick; it is passed by reference into every call
//! - [`MockClock`] is always available for host testing
//! - `EmbassyClock` (feature `embassy`) reads `embassy_time::Instant`

pub mod clock;
pub mod tick;

#[cfg(feature = "embassy")]
pub use clock::EmbassyClock;
pub use clock::{MockClock, TickSource};
pub use tick::Tick;
