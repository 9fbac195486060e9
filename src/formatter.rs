use std::io::Write;
use std::path::MAIN_SEPARATOR;

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

use crate::{
    compiler::{CompiledFormat, Grammar},
    digits::{write_fixed, write_i64, write_var},
    record::{LogRecord, Message},
    severity::*,
    verb::Verb,
};

/// Size of the fixed numeric scratch area.
pub const SCRATCH_SIZE: usize = 64;

/// Scratch and output buffers above this capacity are released after use,
/// so one huge message does not pin memory for the lifetime of the formatter.
pub const MAX_RETAINED: usize = 8000;

/// Placeholder for a record without file information.
pub const UNKNOWN_FILE: &str = "???";

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Turns a record into the bytes of one log line.
///
/// A formatter owns mutable scratch buffers, calls on one instance must be serialized.
/// The returned slice stays valid until the next call.
#[enum_dispatch]
pub trait Formatter {
    fn format(&mut self, r: &LogRecord<'_>) -> &[u8];

    /// Whether the caller should fill file / line / function before formatting.
    fn should_capture_location(&self) -> bool;

    /// Drop buffers grown past [MAX_RETAINED]. Sinks call this once the line is written,
    /// `format` also does it on entry for callers that never do.
    fn release(&mut self);
}

#[enum_dispatch(Formatter)]
pub enum LogFormatter {
    Std(StdFormatter),
    Glog(GlogFormatter),
}

/// Renders a [CompiledFormat].
pub struct StdFormatter {
    compiled: CompiledFormat,
    tmp: [u8; SCRATCH_SIZE],
    // holds formatted arguments for SafeMessage
    stmp: Vec<u8>,
    buf: Vec<u8>,
}

impl StdFormatter {
    pub fn new(template: &str, grammar: Grammar) -> Self {
        Self::from_compiled(CompiledFormat::compile(template, grammar))
    }

    pub fn from_compiled(compiled: CompiledFormat) -> Self {
        Self {
            compiled,
            tmp: [0u8; SCRATCH_SIZE],
            stmp: Vec::with_capacity(SCRATCH_SIZE),
            buf: Vec::with_capacity(128),
        }
    }

    #[inline]
    pub fn compiled(&self) -> &CompiledFormat {
        &self.compiled
    }

    #[inline(always)]
    fn severity_str(&mut self, table: &[&str; SEVERITY_COUNT], sev: Severity) {
        self.buf.extend_from_slice(table[sev.index()].as_bytes());
    }
}

impl Formatter for StdFormatter {
    fn format(&mut self, r: &LogRecord<'_>) -> &[u8] {
        release_oversized(&mut self.buf, 128);
        self.buf.clear();
        let mut stringi = 0;
        for i in 0..self.compiled.parts.len() {
            match self.compiled.parts[i] {
                Verb::Literal => {
                    self.buf.extend_from_slice(self.compiled.strings[stringi].as_bytes());
                    stringi += 1;
                }
                Verb::Date => {
                    let n = write_date(&mut self.tmp, &r.time, b'-');
                    self.buf.extend_from_slice(&self.tmp[..n]);
                }
                Verb::DateSlash => {
                    let n = write_date(&mut self.tmp, &r.time, b'/');
                    self.buf.extend_from_slice(&self.tmp[..n]);
                }
                Verb::Time => {
                    let n = write_clock(&mut self.tmp, &r.time);
                    self.buf.extend_from_slice(&self.tmp[..n]);
                }
                Verb::TimeMicro => {
                    let n = write_clock_micro(&mut self.tmp, &r.time);
                    self.buf.extend_from_slice(&self.tmp[..n]);
                }
                Verb::SeverityUpper => self.severity_str(&UC_SEVERITY, r.severity),
                Verb::SeverityCap => self.severity_str(&CAP_SEVERITY, r.severity),
                Verb::SeverityLower => self.severity_str(&LC_SEVERITY, r.severity),
                Verb::SevUpper => self.severity_str(&UC_SHORT_SEVERITY, r.severity),
                Verb::SevCap => self.severity_str(&CAP_SHORT_SEVERITY, r.severity),
                Verb::SevLower => self.severity_str(&LC_SHORT_SEVERITY, r.severity),
                Verb::SUpper => self.severity_str(&UC_LETTER_SEVERITY, r.severity),
                Verb::SLower => self.severity_str(&LC_LETTER_SEVERITY, r.severity),
                Verb::Unix => {
                    let n = write_i64(&mut self.tmp, 0, r.time.timestamp());
                    self.buf.extend_from_slice(&self.tmp[..n]);
                }
                Verb::UnixNano => {
                    let nanos = r
                        .time
                        .timestamp()
                        .saturating_mul(1_000_000_000)
                        .saturating_add(r.time.timestamp_subsec_nanos() as i64);
                    let n = write_i64(&mut self.tmp, 0, nanos);
                    self.buf.extend_from_slice(&self.tmp[..n]);
                }
                Verb::FullFile => {
                    self.buf.extend_from_slice(r.file.unwrap_or(UNKNOWN_FILE).as_bytes());
                }
                Verb::File => {
                    let file = r.file.map(base_name).unwrap_or(UNKNOWN_FILE);
                    self.buf.extend_from_slice(file.as_bytes());
                }
                Verb::ShortFile => {
                    let file = r.file.map(|f| strip_suffix3(base_name(f))).unwrap_or(UNKNOWN_FILE);
                    self.buf.extend_from_slice(file.as_bytes());
                }
                Verb::Line => {
                    let n = write_var(&mut self.tmp, 0, r.line.unwrap_or(0) as u64);
                    self.buf.extend_from_slice(&self.tmp[..n]);
                }
                Verb::FullFunction => {
                    self.buf.extend_from_slice(r.function.unwrap_or("").as_bytes());
                }
                Verb::PkgFunction => {
                    let f = r.function.map(pkg_function).unwrap_or("");
                    self.buf.extend_from_slice(f.as_bytes());
                }
                Verb::Function => {
                    let f = r.function.map(bare_function).unwrap_or("");
                    self.buf.extend_from_slice(f.as_bytes());
                }
                Verb::Message => write_message(&mut self.buf, &r.message),
                Verb::SafeMessage => {
                    write_safe_message(&mut self.buf, &mut self.stmp, &r.message);
                }
                // spliced into literals by the compiler
                Verb::Color => {}
            }
        }
        if let Some(&last) = self.buf.last() {
            if last != b'\n' {
                self.buf.push(b'\n');
            }
        }
        &self.buf
    }

    #[inline(always)]
    fn should_capture_location(&self) -> bool {
        self.compiled.should_capture_location()
    }

    #[inline(always)]
    fn release(&mut self) {
        release_oversized(&mut self.buf, 128);
        release_oversized(&mut self.stmp, SCRATCH_SIZE);
    }
}

/// Fixed glog layout, no template:
///
/// ``` text
/// Lmmdd hh:mm:ss.uuuuuu ppppp file:line] msg
/// ```
///
/// `L` is the one-letter severity and `ppppp` the zero-padded process id.
pub struct GlogFormatter {
    tmp: [u8; SCRATCH_SIZE],
    buf: Vec<u8>,
}

impl GlogFormatter {
    pub fn new() -> Self {
        Self { tmp: [0u8; SCRATCH_SIZE], buf: Vec::with_capacity(128) }
    }
}

impl Default for GlogFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for GlogFormatter {
    fn format(&mut self, r: &LogRecord<'_>) -> &[u8] {
        release_oversized(&mut self.buf, 128);
        self.buf.clear();
        let tmp = &mut self.tmp;
        let t = &r.time;
        tmp[0] = UC_LETTER_SEVERITY[r.severity.index()].as_bytes()[0];
        write_fixed(tmp, 1, 2, t.month() as u64);
        write_fixed(tmp, 3, 2, t.day() as u64);
        tmp[5] = b' ';
        let n = write_clock_micro(&mut tmp[6..], t);
        tmp[6 + n] = b' ';
        let mut end = 7 + n;
        if r.pid < 100_000 {
            write_fixed(tmp, end, 5, r.pid as u64);
            end += 5;
        } else {
            end += write_var(tmp, end, r.pid as u64);
        }
        tmp[end] = b' ';
        self.buf.extend_from_slice(&tmp[..end + 1]);

        let file = r.file.map(base_name).unwrap_or(UNKNOWN_FILE);
        self.buf.extend_from_slice(file.as_bytes());
        tmp[0] = b':';
        let n = write_var(tmp, 1, r.line.unwrap_or(0) as u64);
        tmp[n + 1] = b']';
        tmp[n + 2] = b' ';
        self.buf.extend_from_slice(&tmp[..n + 3]);

        let start = self.buf.len();
        write_message(&mut self.buf, &r.message);
        if self.buf.len() > start && self.buf.last() != Some(&b'\n') {
            self.buf.push(b'\n');
        }
        &self.buf
    }

    #[inline(always)]
    fn should_capture_location(&self) -> bool {
        true
    }

    #[inline(always)]
    fn release(&mut self) {
        release_oversized(&mut self.buf, 128);
    }
}

#[inline(always)]
fn release_oversized(buf: &mut Vec<u8>, keep: usize) {
    if buf.capacity() > MAX_RETAINED {
        buf.clear();
        buf.shrink_to(keep);
    }
}

/// YYYY-MM-DD with the given separator, returns 10
#[inline]
fn write_date(tmp: &mut [u8], t: &DateTime<FixedOffset>, sep: u8) -> usize {
    write_fixed(tmp, 0, 4, t.year().rem_euclid(10000) as u64);
    tmp[4] = sep;
    write_fixed(tmp, 5, 2, t.month() as u64);
    tmp[7] = sep;
    write_fixed(tmp, 8, 2, t.day() as u64);
    10
}

/// hh:mm:ss, returns 8
#[inline]
fn write_clock(tmp: &mut [u8], t: &DateTime<FixedOffset>) -> usize {
    write_fixed(tmp, 0, 2, t.hour() as u64);
    tmp[2] = b':';
    write_fixed(tmp, 3, 2, t.minute() as u64);
    tmp[5] = b':';
    write_fixed(tmp, 6, 2, t.second() as u64);
    8
}

/// hh:mm:ss.uuuuuu, returns 15
#[inline]
fn write_clock_micro(tmp: &mut [u8], t: &DateTime<FixedOffset>) -> usize {
    write_clock(tmp, t);
    tmp[8] = b'.';
    // leap seconds report nanosecond() >= 1e9
    let micros = (t.nanosecond() % 1_000_000_000) / 1000;
    write_fixed(tmp, 9, 6, micros as u64);
    15
}

#[inline]
fn write_message(buf: &mut Vec<u8>, msg: &Message<'_>) {
    match msg {
        Message::Str(s) => buf.extend_from_slice(s.as_bytes()),
        Message::Args(args) => {
            if let Some(s) = args.as_str() {
                buf.extend_from_slice(s.as_bytes());
            } else {
                let _ = buf.write_fmt(*args);
            }
        }
    }
}

/// Message with every byte below 0x20 written as `\xHH`.
fn write_safe_message(buf: &mut Vec<u8>, stmp: &mut Vec<u8>, msg: &Message<'_>) {
    let text: &[u8] = match msg.as_str() {
        Some(s) => s.as_bytes(),
        None => {
            stmp.clear();
            write_message(stmp, msg);
            stmp
        }
    };
    buf.reserve(text.len());
    for &c in text {
        if c < 32 {
            buf.extend_from_slice(&[b'\\', b'x', HEX[(c >> 4) as usize], HEX[(c & 0xf) as usize]]);
        } else {
            buf.push(c);
        }
    }
    release_oversized(stmp, SCRATCH_SIZE);
}

/// Strip everything up to the last path separator.
#[inline]
pub(crate) fn base_name(path: &str) -> &str {
    match path.rfind(|c| c == '/' || c == MAIN_SEPARATOR) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Drop a 3-byte extension such as `.rs`. Names too short are kept as they are.
#[inline]
pub(crate) fn strip_suffix3(name: &str) -> &str {
    if name.len() >= 3 && name.is_char_boundary(name.len() - 3) {
        &name[..name.len() - 3]
    } else {
        name
    }
}

/// `github.com/user/pkg.Func` -> `pkg.Func`
#[inline]
pub(crate) fn pkg_function(function: &str) -> &str {
    match function.rfind('/') {
        Some(idx) => &function[idx + 1..],
        None => function,
    }
}

/// `pkg.Func` -> `Func`, `my_crate::net::serve` -> `serve`
#[inline]
pub(crate) fn bare_function(function: &str) -> &str {
    let f = pkg_function(function);
    let colons = f.rfind("::").map(|i| i + 2);
    let dot = f.rfind('.').map(|i| i + 1);
    match colons.max(dot) {
        Some(idx) => &f[idx..],
        None => f,
    }
}
