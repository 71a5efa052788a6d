//! Wrapping tick counter type.

use core::fmt::{Debug, Display};

/// Fixed-width unsigned counter that wraps to zero after its maximum.
///
/// The timing primitives are generic over the counter width so the
/// wraparound behaviour can be exercised directly with a narrow counter
/// (`u8` wraps every 256 ticks) while firmware uses `u32` milliseconds.
///
/// Only wrapping arithmetic is exposed. Comparing two absolute tick values
/// with `<`/`>=` is wrong once the counter has rolled over; compute a
/// difference with [`Tick::wrapping_since`] instead.
pub trait Tick: Copy + Eq + Ord + Default + Debug + Display {
    /// Zero ticks.
    const ZERO: Self;

    /// Largest representable tick value (the tick before rollover).
    const MAX: Self;

    /// Returns `self + ticks`, wrapping at the counter boundary.
    fn wrapping_offset(self, ticks: Self) -> Self;

    /// Returns the number of ticks from `earlier` to `self`, wrapping at the
    /// counter boundary.
    fn wrapping_since(self, earlier: Self) -> Self;

    /// Converts a 64-bit tick count, saturating at [`Tick::MAX`].
    fn from_u64_saturating(ticks: u64) -> Self;

    /// Widens the tick count to 64 bits.
    fn as_u64(self) -> u64;
}

macro_rules! impl_tick {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Tick for $ty {
                const ZERO: Self = 0;
                const MAX: Self = <$ty>::MAX;

                #[inline]
                fn wrapping_offset(self, ticks: Self) -> Self {
                    self.wrapping_add(ticks)
                }

                #[inline]
                fn wrapping_since(self, earlier: Self) -> Self {
                    self.wrapping_sub(earlier)
                }

                #[inline]
                fn from_u64_saturating(ticks: u64) -> Self {
                    <$ty>::try_from(ticks).unwrap_or(<$ty>::MAX)
                }

                #[inline]
                fn as_u64(self) -> u64 {
                    u64::from(self)
                }
            }
        )*
    };
}

impl_tick!(u8, u16, u32, u64);
