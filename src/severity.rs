use std::fmt;
use std::str::FromStr;

use log::{Level, LevelFilter};

/// Ordered log importance. The numeric order is the only source of truth for both
/// rendering and admission.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    None = 0,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Critical,
    Stack,
    Fatal,
    Panic,
}

pub const SEVERITY_COUNT: usize = 10;

pub(crate) const UC_SEVERITY: [&str; SEVERITY_COUNT] =
    ["NONE", "TRACE", "DEBUG", "INFO", "WARN", "ERROR", "CRITICAL", "STACK", "FATAL", "PANIC"];

pub(crate) const CAP_SEVERITY: [&str; SEVERITY_COUNT] =
    ["None", "Trace", "Debug", "Info", "Warn", "Error", "Critical", "Stack", "Fatal", "Panic"];

pub(crate) const LC_SEVERITY: [&str; SEVERITY_COUNT] =
    ["none", "trace", "debug", "info", "warn", "error", "critical", "stack", "fatal", "panic"];

pub(crate) const UC_SHORT_SEVERITY: [&str; SEVERITY_COUNT] =
    ["NONE", "TRAC", "DEBG", "INFO", "WARN", "EROR", "CRIT", "STAK", "FATL", "PANC"];

pub(crate) const CAP_SHORT_SEVERITY: [&str; SEVERITY_COUNT] =
    ["None", "Trac", "Debg", "Info", "Warn", "Eror", "Crit", "Stak", "Fatl", "Panc"];

pub(crate) const LC_SHORT_SEVERITY: [&str; SEVERITY_COUNT] =
    ["none", "trac", "debg", "info", "warn", "eror", "crit", "stak", "fatl", "panc"];

pub(crate) const UC_LETTER_SEVERITY: [&str; SEVERITY_COUNT] =
    ["N", "T", "D", "I", "W", "E", "C", "S", "F", "P"];

pub(crate) const LC_LETTER_SEVERITY: [&str; SEVERITY_COUNT] =
    ["n", "t", "d", "i", "w", "e", "c", "s", "f", "p"];

const ALL: [Severity; SEVERITY_COUNT] = [
    Severity::None,
    Severity::Trace,
    Severity::Debug,
    Severity::Info,
    Severity::Warn,
    Severity::Error,
    Severity::Critical,
    Severity::Stack,
    Severity::Fatal,
    Severity::Panic,
];

impl Severity {
    /// Out-of-range indexes map to [Severity::None].
    #[inline]
    pub fn from_index(index: usize) -> Self {
        if index < SEVERITY_COUNT {
            ALL[index]
        } else {
            Severity::None
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// TRACE, DEBUG, ...
    #[inline]
    pub fn as_str(self) -> &'static str {
        UC_SEVERITY[self.index()]
    }

    /// TRAC, DEBG, ...
    #[inline]
    pub fn as_short_str(self) -> &'static str {
        UC_SHORT_SEVERITY[self.index()]
    }

    /// All levels from low to high
    pub fn iter() -> impl Iterator<Item = Severity> {
        ALL.into_iter()
    }

    /// The facade level that lets this severity through, used for `log::set_max_level`.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Severity::None | Severity::Trace => LevelFilter::Trace,
            Severity::Debug => LevelFilter::Debug,
            Severity::Info => LevelFilter::Info,
            Severity::Warn => LevelFilter::Warn,
            _ => LevelFilter::Error,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::None
    }
}

impl From<Level> for Severity {
    #[inline]
    fn from(level: Level) -> Self {
        match level {
            Level::Error => Severity::Error,
            Level::Warn => Severity::Warn,
            Level::Info => Severity::Info,
            Level::Debug => Severity::Debug,
            Level::Trace => Severity::Trace,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ();

    /// Accepts the full or the 4-letter name, case-insensitive.
    fn from_str(s: &str) -> Result<Self, ()> {
        for sev in ALL {
            let i = sev.index();
            if s.eq_ignore_ascii_case(UC_SEVERITY[i]) || s.eq_ignore_ascii_case(UC_SHORT_SEVERITY[i])
            {
                return Ok(sev);
            }
        }
        Err(())
    }
}
