//! Wraparound-safe deadline state machine
//!
//! A single [`Deadline`] type covers every timer flavour the control loop
//! needs. The flavour is chosen at construction:
//!
//! | Constructor | Behaviour |
//! |---|---|
//! | [`Deadline::interval`] | armed, fires every `duration` via [`Deadline::check_and_rearm`] |
//! | [`Deadline::expired`] | armed, first check fires immediately |
//! | [`Deadline::disabled`] | configured but idle until [`Deadline::reset`] |
//! | [`Deadline::repeating`] | idle; once reset, fires `max_repeats + 1` times then disables |
//! | [`Deadline::debouncer`] | idle; [`Deadline::is_debouncing`] while the quiet window runs |
//!
//! # Wraparound
//!
//! The due test never compares absolute tick values. With
//! `remaining = fires_at - now` (wrapping), a deadline is due iff
//! `remaining == 0 || remaining > duration`: before the deadline the
//! remaining time always lies in `1..=duration`, after it the subtraction
//! wraps to a value larger than `duration`. This holds for any duration up to
//! the full counter range. A deadline left unpolled for more than
//! `Tick::MAX - duration` ticks past its due point reads as not-due again;
//! that is inherent to a finite counter.
//!
//! A pre-expired deadline is latched as due instead, so it stays due until
//! the first firing or reset however long it waits and whatever its duration.

use crate::traits::{Tick, TickSource};

/// Repeat policy applied by [`Deadline::check_and_rearm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RepeatLimit {
    /// Rearm on every due event, forever.
    #[default]
    Unlimited,
    /// Rearm up to `max_repeats` times, then disable.
    Limited {
        /// Rearms allowed after the first firing
        max_repeats: u32,
        /// Due events seen since the last reset
        repeats: u32,
    },
}

/// Armed point in tick time after which the control loop should act.
///
/// # Example
///
/// ```
/// use pico_timeout::timeout::Deadline;
/// use pico_timeout::traits::MockClock;
///
/// let clock = MockClock::<u8>::with_initial(250);
/// let deadline = Deadline::interval(&clock, 10);
///
/// clock.set(255);
/// assert!(!deadline.is_due(&clock));
/// clock.set(4); // wrapped past 255
/// assert!(deadline.is_due(&clock));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deadline<T: Tick = u32> {
    enabled: bool,
    duration: T,
    fires_at: T,
    pre_expired: bool,
    repeat: RepeatLimit,
}

impl<T: Tick> Deadline<T> {
    /// Creates a deadline of `duration` ticks.
    ///
    /// # Arguments
    ///
    /// * `start_expired` - arm at "now" so the first due-check fires
    /// * `start_enabled` - start enabled; otherwise idle until [`Deadline::reset`]
    pub fn new<C>(clock: &C, duration: T, start_expired: bool, start_enabled: bool) -> Self
    where
        C: TickSource<Tick = T>,
    {
        let now = clock.now();
        Self {
            enabled: start_enabled,
            duration,
            fires_at: if start_expired {
                now
            } else {
                now.wrapping_offset(duration)
            },
            pre_expired: start_expired,
            repeat: RepeatLimit::Unlimited,
        }
    }

    /// Enabled deadline due `duration` ticks from now.
    pub fn interval<C: TickSource<Tick = T>>(clock: &C, duration: T) -> Self {
        Self::new(clock, duration, false, true)
    }

    /// Enabled deadline that is due on the very first check.
    pub fn expired<C: TickSource<Tick = T>>(clock: &C, duration: T) -> Self {
        Self::new(clock, duration, true, true)
    }

    /// Disabled deadline, armed later with [`Deadline::reset`].
    pub fn disabled<C: TickSource<Tick = T>>(clock: &C, duration: T) -> Self {
        Self::new(clock, duration, false, false)
    }

    /// Disabled deadline that, once reset, fires `max_repeats + 1` times.
    pub fn repeating<C: TickSource<Tick = T>>(clock: &C, duration: T, max_repeats: u32) -> Self {
        Self::disabled(clock, duration).with_repeat_limit(max_repeats)
    }

    /// Quiet-window deadline: pre-expired and disabled until the first edge.
    pub fn debouncer<C: TickSource<Tick = T>>(clock: &C, duration: T) -> Self {
        Self::new(clock, duration, true, false)
    }

    /// Limits [`Deadline::check_and_rearm`] to `max_repeats` rearms.
    ///
    /// `u32::MAX` is a valid limit and still exhausts after `u32::MAX + 1` firings.
    pub fn with_repeat_limit(mut self, max_repeats: u32) -> Self {
        self.repeat = RepeatLimit::Limited {
            max_repeats,
            repeats: 0,
        };
        self
    }

    /// Configured duration in ticks.
    #[inline]
    pub fn duration(&self) -> T {
        self.duration
    }

    /// Configured duration in whole seconds.
    pub fn duration_secs(&self) -> u64 {
        self.duration.as_u64() / super::units::TICKS_PER_SECOND
    }

    /// Returns true unless disabled or exhausted.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current repeat policy and count.
    #[inline]
    pub fn repeat_limit(&self) -> RepeatLimit {
        self.repeat
    }

    /// Rearms allowed after the first firing, `None` when unlimited.
    pub fn max_repeats(&self) -> Option<u32> {
        match self.repeat {
            RepeatLimit::Unlimited => None,
            RepeatLimit::Limited { max_repeats, .. } => Some(max_repeats),
        }
    }

    /// Due events counted since the last reset (always 0 when unlimited).
    pub fn repeats(&self) -> u32 {
        match self.repeat {
            RepeatLimit::Unlimited => 0,
            RepeatLimit::Limited { repeats, .. } => repeats,
        }
    }

    /// Returns true if the deadline is enabled and has been reached.
    ///
    /// Pure observation: never rearms or disables.
    pub fn is_due<C: TickSource<Tick = T>>(&self, clock: &C) -> bool {
        self.enabled && self.due_at(clock.now())
    }

    /// Returns true if the deadline is enabled and not yet reached.
    pub fn is_active<C: TickSource<Tick = T>>(&self, clock: &C) -> bool {
        self.enabled && !self.due_at(clock.now())
    }

    /// Ticks left until due; zero when due or disabled.
    pub fn remaining<C: TickSource<Tick = T>>(&self, clock: &C) -> T {
        let now = clock.now();
        if !self.enabled || self.due_at(now) {
            return T::ZERO;
        }
        self.fires_at.wrapping_since(now)
    }

    /// Whole seconds left until due.
    pub fn remaining_secs<C: TickSource<Tick = T>>(&self, clock: &C) -> u64 {
        self.remaining(clock).as_u64() / super::units::TICKS_PER_SECOND
    }

    /// Polls a periodic deadline.
    ///
    /// Returns false if disabled or not yet due. When due, rearms relative to
    /// *now* (not the previous due point) and returns true, so an overrun
    /// delays the next firing instead of producing a catch-up burst.
    ///
    /// With a [`RepeatLimit::Limited`] policy the firing that exceeds
    /// `max_repeats` disables the deadline instead of rearming; that final
    /// firing still returns true.
    pub fn check_and_rearm<C: TickSource<Tick = T>>(&mut self, clock: &C) -> bool {
        if !self.enabled {
            return false;
        }

        let now = clock.now();
        if !self.due_at(now) {
            return false;
        }

        let exhausted = match &mut self.repeat {
            RepeatLimit::Unlimited => false,
            RepeatLimit::Limited {
                max_repeats,
                repeats,
            } => {
                let exhausted = *repeats >= *max_repeats;
                *repeats = repeats.saturating_add(1);
                exhausted
            }
        };

        self.pre_expired = false;
        if exhausted {
            self.enabled = false;
        } else {
            self.fires_at = now.wrapping_offset(self.duration);
        }
        true
    }

    /// Polls a one-shot deadline.
    ///
    /// Returns true exactly once when due and disables the deadline; false
    /// thereafter until reset.
    pub fn check_and_disable<C: TickSource<Tick = T>>(&mut self, clock: &C) -> bool {
        if !self.is_due(clock) {
            return false;
        }
        self.enabled = false;
        self.pre_expired = false;
        true
    }

    /// Returns true while a debounce window is running.
    ///
    /// The first call after the window has elapsed disables the deadline, so
    /// the window ends exactly once; call [`Deadline::reset`] on each
    /// triggering edge to open a new window.
    pub fn is_debouncing<C: TickSource<Tick = T>>(&mut self, clock: &C) -> bool {
        if self.check_and_disable(clock) {
            return false;
        }
        self.is_active(clock)
    }

    /// Re-enables and rearms `duration` ticks from now.
    ///
    /// Also clears the repeat count of a repeat-limited deadline.
    pub fn reset<C: TickSource<Tick = T>>(&mut self, clock: &C) {
        self.enabled = true;
        self.pre_expired = false;
        self.fires_at = clock.now().wrapping_offset(self.duration);
        if let RepeatLimit::Limited { repeats, .. } = &mut self.repeat {
            *repeats = 0;
        }
    }

    /// Replaces the duration, then behaves like [`Deadline::reset`].
    ///
    /// A zero duration is the "always due" sentinel, not an error.
    pub fn reset_with<C: TickSource<Tick = T>>(&mut self, clock: &C, duration: T) {
        self.duration = duration;
        self.reset(clock);
    }

    /// Suspends the deadline; the configured duration is kept for the next reset.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Makes the deadline permanently due while enabled (zero duration).
    pub fn set_always_due(&mut self) {
        self.duration = T::ZERO;
    }

    /// Wraparound-safe due test, ignoring the enable flag.
    #[inline]
    fn due_at(&self, now: T) -> bool {
        if self.pre_expired {
            return true;
        }
        let remaining = self.fires_at.wrapping_since(now);
        remaining == T::ZERO || remaining > self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockClock;

    #[test]
    fn test_not_due_before_duration() {
        let clock = MockClock::<u32>::with_initial(1_000);
        let deadline = Deadline::interval(&clock, 100);

        clock.advance(99);
        assert!(!deadline.is_due(&clock));
        assert!(deadline.is_active(&clock));

        clock.advance(1);
        assert!(deadline.is_due(&clock));
        assert!(!deadline.is_active(&clock));

        clock.advance(5_000);
        assert!(deadline.is_due(&clock));
    }

    #[test]
    fn test_expired_is_due_immediately() {
        for duration in [0u32, 1, 50, 10_000, u32::MAX] {
            let clock = MockClock::<u32>::with_initial(77);
            let deadline = Deadline::expired(&clock, duration);
            assert!(deadline.is_due(&clock), "duration {}", duration);
        }
    }

    #[test]
    fn test_expired_stays_due_until_first_check() {
        let clock = MockClock::<u8>::new();
        let mut deadline = Deadline::expired(&clock, 200);

        clock.advance(60);
        assert!(deadline.is_due(&clock));
        assert_eq!(deadline.remaining(&clock), 0);
        assert!(deadline.check_and_rearm(&clock));

        // Latch cleared by the firing; normal schedule from here
        assert!(!deadline.is_due(&clock));
        clock.advance(199);
        assert!(!deadline.is_due(&clock));
        clock.advance(1);
        assert!(deadline.is_due(&clock));
    }

    #[test]
    fn test_expired_with_saturated_duration() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::from_hours(&clock, 2_000, true, true);
        assert_eq!(deadline.duration(), u32::MAX);

        clock.advance(1);
        assert!(deadline.check_and_disable(&clock));
        assert!(!deadline.check_and_disable(&clock));
    }

    #[test]
    fn test_reset_clears_expired_latch() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::expired(&clock, 100);

        clock.advance(10);
        deadline.reset(&clock);
        assert!(!deadline.is_due(&clock));
        clock.advance(100);
        assert!(deadline.is_due(&clock));
    }

    #[test]
    fn test_disabled_never_due() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::disabled(&clock, 10);

        clock.advance(100);
        assert!(!deadline.is_due(&clock));
        assert!(!deadline.is_active(&clock));
        assert!(!deadline.check_and_rearm(&clock));
        assert!(!deadline.check_and_disable(&clock));
        assert_eq!(deadline.remaining(&clock), 0);
    }

    #[test]
    fn test_wraparound_narrow_counter() {
        let clock = MockClock::<u8>::with_initial(250);
        let deadline = Deadline::interval(&clock, 10);

        for tick in [251u8, 254, 255, 0, 1, 3] {
            clock.set(tick);
            assert!(!deadline.is_due(&clock), "tick {}", tick);
        }

        clock.set(4);
        assert!(deadline.is_due(&clock));
        clock.set(30);
        assert!(deadline.is_due(&clock));
    }

    #[test]
    fn test_wraparound_full_range_duration() {
        // Duration close to the counter range must not fire early
        let clock = MockClock::<u8>::with_initial(10);
        let deadline = Deadline::interval(&clock, 240);

        clock.set(200);
        assert!(!deadline.is_due(&clock));
        clock.set(249);
        assert!(!deadline.is_due(&clock));
        clock.set(250);
        assert!(deadline.is_due(&clock));
    }

    #[test]
    fn test_is_due_is_pure() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::interval(&clock, 10);
        clock.advance(10);

        let before = deadline.clone();
        for _ in 0..5 {
            assert!(deadline.is_due(&clock));
        }
        assert_eq!(deadline, before);

        assert!(deadline.check_and_rearm(&clock));
        let rearmed = deadline.clone();
        for _ in 0..5 {
            assert!(!deadline.is_due(&clock));
        }
        assert_eq!(deadline, rearmed);
    }

    #[test]
    fn test_check_and_rearm_period() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::interval(&clock, 20);
        let mut fired = 0;

        for _ in 0..100 {
            clock.advance(1);
            if deadline.check_and_rearm(&clock) {
                fired += 1;
            }
        }
        assert_eq!(fired, 5);
    }

    #[test]
    fn test_check_and_rearm_no_catch_up_after_stall() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::interval(&clock, 10);

        // Stall for many periods
        clock.advance(95);
        assert!(deadline.check_and_rearm(&clock));
        assert!(!deadline.check_and_rearm(&clock));

        // Next firing is relative to the late poll, not the missed schedule
        assert_eq!(deadline.remaining(&clock), 10);
        clock.advance(9);
        assert!(!deadline.check_and_rearm(&clock));
        clock.advance(1);
        assert!(deadline.check_and_rearm(&clock));
    }

    #[test]
    fn test_check_and_disable_one_shot() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::interval(&clock, 5);

        clock.advance(4);
        assert!(!deadline.check_and_disable(&clock));
        clock.advance(1);
        assert!(deadline.check_and_disable(&clock));
        assert!(!deadline.is_enabled());

        clock.advance(100);
        assert!(!deadline.check_and_disable(&clock));
        assert!(!deadline.check_and_disable(&clock));
    }

    #[test]
    fn test_reset_rearms_from_now() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::interval(&clock, 10);
        clock.advance(8);

        deadline.reset(&clock);
        clock.advance(8);
        assert!(!deadline.is_due(&clock));
        clock.advance(2);
        assert!(deadline.is_due(&clock));
    }

    #[test]
    fn test_reset_with_new_duration() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::disabled(&clock, 10);

        deadline.reset_with(&clock, 50);
        assert!(deadline.is_enabled());
        assert_eq!(deadline.duration(), 50);
        clock.advance(49);
        assert!(!deadline.is_due(&clock));
        clock.advance(1);
        assert!(deadline.is_due(&clock));
    }

    #[test]
    fn test_zero_duration_always_due() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::interval(&clock, 100);

        deadline.reset_with(&clock, 0);
        assert!(deadline.is_enabled());
        for _ in 0..3 {
            assert!(deadline.check_and_rearm(&clock));
            clock.advance(1);
        }
    }

    #[test]
    fn test_set_always_due() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::interval(&clock, 1_000);
        assert!(!deadline.is_due(&clock));

        deadline.set_always_due();
        assert!(deadline.is_due(&clock));
        assert_eq!(deadline.duration(), 0);
    }

    #[test]
    fn test_disable_keeps_duration() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::interval(&clock, 30);

        deadline.disable();
        assert!(!deadline.is_enabled());
        assert_eq!(deadline.duration(), 30);

        deadline.reset(&clock);
        clock.advance(30);
        assert!(deadline.is_due(&clock));
    }

    #[test]
    fn test_remaining_counts_down() {
        let clock = MockClock::<u32>::new();
        let deadline = Deadline::interval(&clock, 2_500);

        assert_eq!(deadline.remaining(&clock), 2_500);
        assert_eq!(deadline.remaining_secs(&clock), 2);
        clock.advance(1_000);
        assert_eq!(deadline.remaining(&clock), 1_500);
        assert_eq!(deadline.remaining_secs(&clock), 1);
        clock.advance(1_500);
        assert_eq!(deadline.remaining(&clock), 0);
        assert_eq!(deadline.duration_secs(), 2);
    }

    #[test]
    fn test_repeating_fires_max_plus_one() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::repeating(&clock, 10, 2);
        assert!(!deadline.is_enabled());

        deadline.reset(&clock);
        let mut fired = 0;
        for _ in 0..200 {
            clock.advance(1);
            if deadline.check_and_rearm(&clock) {
                fired += 1;
            }
        }

        assert_eq!(fired, 3);
        assert_eq!(deadline.repeats(), 3);
        assert_eq!(deadline.max_repeats(), Some(2));
        assert!(!deadline.is_enabled());
        assert!(!deadline.is_due(&clock));
        assert!(!deadline.check_and_rearm(&clock));
    }

    #[test]
    fn test_repeating_reset_restarts_count() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::interval(&clock, 5).with_repeat_limit(0);

        clock.advance(5);
        assert!(deadline.check_and_rearm(&clock));
        clock.advance(5);
        assert!(!deadline.check_and_rearm(&clock));

        deadline.reset(&clock);
        assert_eq!(deadline.repeats(), 0);
        clock.advance(5);
        assert!(deadline.check_and_rearm(&clock));
        assert!(!deadline.is_enabled());
    }

    #[test]
    fn test_repeat_limit_at_u32_max_still_exhausts() {
        let clock = MockClock::<u32>::new();
        let mut deadline = Deadline::interval(&clock, 5);
        deadline.repeat = RepeatLimit::Limited {
            max_repeats: u32::MAX,
            repeats: u32::MAX,
        };

        clock.advance(5);
        assert!(deadline.check_and_rearm(&clock));
        assert!(!deadline.is_enabled());
        clock.advance(5);
        assert!(!deadline.check_and_rearm(&clock));
    }

    #[test]
    fn test_unlimited_reports_no_repeats() {
        let clock = MockClock::<u32>::new();
        let deadline = Deadline::interval(&clock, 5);
        assert_eq!(deadline.repeat_limit(), RepeatLimit::Unlimited);
        assert_eq!(deadline.max_repeats(), None);
        assert_eq!(deadline.repeats(), 0);
    }

    #[test]
    fn test_debouncer_window() {
        let clock = MockClock::<u32>::new();
        let mut debounce = Deadline::debouncer(&clock, 50);
        assert!(!debounce.is_debouncing(&clock));

        // Triggering edge opens the quiet window
        debounce.reset(&clock);
        clock.advance(10);
        assert!(debounce.is_debouncing(&clock));
        clock.advance(39);
        assert!(debounce.is_debouncing(&clock));

        clock.advance(1);
        assert!(!debounce.is_debouncing(&clock));
        assert!(!debounce.is_enabled());

        clock.advance(1_000);
        assert!(!debounce.is_debouncing(&clock));
    }

    #[test]
    fn test_debouncer_retrigger_extends_window() {
        let clock = MockClock::<u32>::new();
        let mut debounce = Deadline::debouncer(&clock, 20);

        debounce.reset(&clock);
        clock.advance(15);
        debounce.reset(&clock);
        clock.advance(15);
        assert!(debounce.is_debouncing(&clock));
        clock.advance(5);
        assert!(!debounce.is_debouncing(&clock));
    }
}
