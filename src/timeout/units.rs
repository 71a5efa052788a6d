//! Larger time units expressed in ticks
//!
//! One tick is one millisecond. Conversions saturate instead of overflowing,
//! and the `Deadline` constructors below additionally saturate into the
//! deadline's tick width.

use super::deadline::Deadline;
use crate::traits::{Tick, TickSource};

/// Ticks in one second.
pub const TICKS_PER_SECOND: u64 = 1000;

const SECONDS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;

/// Converts seconds to ticks.
#[inline]
pub const fn secs_to_ticks(secs: u64) -> u64 {
    secs.saturating_mul(TICKS_PER_SECOND)
}

/// Converts minutes to ticks.
#[inline]
pub const fn mins_to_ticks(mins: u64) -> u64 {
    secs_to_ticks(mins.saturating_mul(SECONDS_PER_MINUTE))
}

/// Converts hours to ticks.
#[inline]
pub const fn hours_to_ticks(hours: u64) -> u64 {
    mins_to_ticks(hours.saturating_mul(MINUTES_PER_HOUR))
}

impl<T: Tick> Deadline<T> {
    /// Same as [`Deadline::new`] with the duration in seconds.
    pub fn from_secs<C>(clock: &C, secs: u32, start_expired: bool, start_enabled: bool) -> Self
    where
        C: TickSource<Tick = T>,
    {
        let ticks = T::from_u64_saturating(secs_to_ticks(u64::from(secs)));
        Self::new(clock, ticks, start_expired, start_enabled)
    }

    /// Same as [`Deadline::new`] with the duration in minutes.
    pub fn from_mins<C>(clock: &C, mins: u32, start_expired: bool, start_enabled: bool) -> Self
    where
        C: TickSource<Tick = T>,
    {
        let ticks = T::from_u64_saturating(mins_to_ticks(u64::from(mins)));
        Self::new(clock, ticks, start_expired, start_enabled)
    }

    /// Same as [`Deadline::new`] with the duration in hours.
    pub fn from_hours<C>(clock: &C, hours: u32, start_expired: bool, start_enabled: bool) -> Self
    where
        C: TickSource<Tick = T>,
    {
        let ticks = T::from_u64_saturating(hours_to_ticks(u64::from(hours)));
        Self::new(clock, ticks, start_expired, start_enabled)
    }
}
