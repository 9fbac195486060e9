//! Static verb table shared by both template grammars.
//!
//! Every [Verb] is a distinct bit, so a compiled format can summarize the verbs it uses
//! with a plain OR of their codes.

use std::collections::HashMap;

use lazy_static::lazy_static;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Next literal segment
    Literal = 1 << 0,
    /// YYYY-MM-DD
    Date = 1 << 1,
    /// YYYY/MM/DD
    DateSlash = 1 << 2,
    /// hh:mm:ss.uuuuuu
    TimeMicro = 1 << 3,
    /// hh:mm:ss
    Time = 1 << 4,
    /// TRACE
    SeverityUpper = 1 << 5,
    /// Trace
    SeverityCap = 1 << 6,
    /// trace
    SeverityLower = 1 << 7,
    /// TRAC
    SevUpper = 1 << 8,
    /// Trac
    SevCap = 1 << 9,
    /// trac
    SevLower = 1 << 10,
    /// T
    SUpper = 1 << 11,
    /// t
    SLower = 1 << 12,
    Unix = 1 << 13,
    UnixNano = 1 << 14,
    FullFile = 1 << 15,
    File = 1 << 16,
    /// base name minus a 3-char suffix
    ShortFile = 1 << 17,
    Line = 1 << 18,
    FullFunction = 1 << 19,
    PkgFunction = 1 << 20,
    Function = 1 << 21,
    Message = 1 << 22,
    SafeMessage = 1 << 23,
    /// Only exists in the named table, resolved during compilation
    Color = 1 << 24,
}

/// Verbs which need the caller's file / line / function.
pub const LOCATION_MASK: u32 = Verb::FullFile as u32
    | Verb::File as u32
    | Verb::ShortFile as u32
    | Verb::Line as u32
    | Verb::FullFunction as u32
    | Verb::PkgFunction as u32
    | Verb::Function as u32;

impl Verb {
    #[inline(always)]
    pub fn bit(self) -> u32 {
        self as u32
    }

    #[inline(always)]
    pub fn needs_location(self) -> bool {
        self.bit() & LOCATION_MASK != 0
    }

    /// Single-character verb after `%`.
    #[inline]
    pub fn from_short(c: char) -> Option<Verb> {
        let v = match c {
            'D' => Verb::Date,
            'd' => Verb::DateSlash,
            'T' => Verb::TimeMicro,
            't' => Verb::Time,
            'L' => Verb::SeverityUpper,
            'l' => Verb::SevUpper,
            'F' => Verb::FullFile,
            'f' => Verb::File,
            'x' => Verb::ShortFile,
            's' => Verb::Line,
            'P' => Verb::FullFunction,
            'p' => Verb::Function,
            'M' => Verb::Message,
            _ => return None,
        };
        Some(v)
    }

    /// Name inside `%{...}`, case-sensitive.
    #[inline]
    pub fn from_name(name: &str) -> Option<Verb> {
        NAMED_VERBS.get(name).copied()
    }
}

lazy_static! {
    static ref NAMED_VERBS: HashMap<&'static str, Verb> = {
        let mut m = HashMap::new();
        m.insert("SEVERITY", Verb::SeverityUpper);
        m.insert("Severity", Verb::SeverityCap);
        m.insert("severity", Verb::SeverityLower);
        m.insert("SEV", Verb::SevUpper);
        m.insert("Sev", Verb::SevCap);
        m.insert("sev", Verb::SevLower);
        m.insert("S", Verb::SUpper);
        m.insert("s", Verb::SLower);
        m.insert("Date", Verb::Date);
        m.insert("Time", Verb::Time);
        m.insert("Unix", Verb::Unix);
        m.insert("UnixNano", Verb::UnixNano);
        m.insert("FullFile", Verb::FullFile);
        m.insert("File", Verb::File);
        m.insert("ShortFile", Verb::ShortFile);
        m.insert("Line", Verb::Line);
        m.insert("FullFunction", Verb::FullFunction);
        m.insert("PkgFunction", Verb::PkgFunction);
        m.insert("Function", Verb::Function);
        m.insert("Color", Verb::Color);
        m.insert("Message", Verb::Message);
        m.insert("SafeMessage", Verb::SafeMessage);
        m
    };
}
