//! # Admission
//!
//! Whether a record is rendered at all is decided before any formatting happens, by
//! comparing its [Severity] against a [SeverityFilter]. The filter is either a single
//! threshold ("at least WARN") or a closed range ("DEBUG up to ERROR"), both over the same
//! ordering the formatter uses for severity text.
//!
//! The filter holds atomics, so it can be changed on the fly while other threads log.
//!
//! Verbosity is a separate integer axis, see [Logger::v()](crate::Logger::v).

use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::{log_impl::Logger, severity::Severity};

pub trait Filter {
    /// whether a severity passes
    fn is_enabled(&self, sev: Severity) -> bool;

    /// for macros logger_XXX
    #[doc(hidden)]
    fn _private_api_log(
        &self, args: fmt::Arguments, sev: Severity, loc: &(&str, &str, u32),
    );
}

/// Threshold or closed range over [Severity].
///
/// # Example
///
/// ``` rust
/// use captains_format::{Severity, SeverityFilter};
/// let filter = SeverityFilter::threshold(Severity::Warn);
/// assert!(!filter.admits(Severity::Info));
/// assert!(filter.admits(Severity::Panic));
/// filter.set_range(Severity::Debug, Severity::Error);
/// assert!(filter.admits(Severity::Info));
/// assert!(!filter.admits(Severity::Fatal));
/// ```
pub struct SeverityFilter {
    min: AtomicUsize,
    max: AtomicUsize,
}

impl Clone for SeverityFilter {
    fn clone(&self) -> Self {
        Self {
            min: AtomicUsize::new(self.min.load(Ordering::Relaxed)),
            max: AtomicUsize::new(self.max.load(Ordering::Relaxed)),
        }
    }
}

impl Default for SeverityFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SeverityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeverityFilter({}..={})", self.min(), self.max())
    }
}

impl SeverityFilter {
    /// Lets everything through
    pub fn new() -> Self {
        Self::range(Severity::None, Severity::Panic)
    }

    pub fn threshold(min: Severity) -> Self {
        Self::range(min, Severity::Panic)
    }

    pub fn range(min: Severity, max: Severity) -> Self {
        Self { min: AtomicUsize::new(min as usize), max: AtomicUsize::new(max as usize) }
    }

    /// Set a threshold, the upper bound is reset to PANIC
    #[inline]
    pub fn set_min(&self, min: Severity) {
        self.set_range(min, Severity::Panic);
    }

    #[inline]
    pub fn set_range(&self, min: Severity, max: Severity) {
        self.min.store(min as usize, Ordering::Relaxed);
        self.max.store(max as usize, Ordering::Relaxed);
    }

    #[inline]
    pub fn min(&self) -> Severity {
        Severity::from_index(self.min.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn max(&self) -> Severity {
        Severity::from_index(self.max.load(Ordering::Relaxed))
    }

    #[inline(always)]
    pub fn admits(&self, sev: Severity) -> bool {
        let s = sev as usize;
        s >= self.min.load(Ordering::Relaxed) && s <= self.max.load(Ordering::Relaxed)
    }
}

/// Result of [Logger::v()](crate::Logger::v), logs only when the verbosity check passed.
///
/// ``` rust
/// use captains_format::*;
/// let logger = Builder::new().verbosity(2).build_logger().expect("logger");
/// logger_info!(logger.v(1), "will print");
/// logger_info!(logger.v(3), "will not print");
/// ```
#[derive(Clone, Copy)]
pub struct Verbose<'a> {
    pub(crate) enabled: bool,
    pub(crate) logger: &'a Logger,
}

impl<'a> Verbose<'a> {
    #[inline(always)]
    pub fn is_true(&self) -> bool {
        self.enabled
    }
}

impl<'a> Filter for Verbose<'a> {
    #[inline(always)]
    fn is_enabled(&self, sev: Severity) -> bool {
        self.enabled && self.logger.is_enabled(sev)
    }

    #[doc(hidden)]
    #[inline(always)]
    fn _private_api_log(&self, args: fmt::Arguments, sev: Severity, loc: &(&str, &str, u32)) {
        if self.enabled {
            self.logger._private_api_log(args, sev, loc);
        }
    }
}
