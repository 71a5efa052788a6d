//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (`defmt` feature): Uses defmt
//! - Host tests: Uses println!
//! - Host non-test: No-op
//!
//! Timing primitives sit on the hot path of the control loop, so only
//! configuration mistakes (e.g. profiler overflow) are logged, never
//! individual due-checks.

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        println!("[WARN] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        println!("[DEBUG] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        println!("[TRACE] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}
