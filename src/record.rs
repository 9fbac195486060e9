use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::severity::Severity;

/// Message text of a record.
///
/// `Args` stays unformatted until a renderer actually needs it, so records dropped by the
/// filter never pay for formatting.
#[derive(Clone, Copy)]
pub enum Message<'a> {
    Str(&'a str),
    Args(fmt::Arguments<'a>),
}

impl<'a> Message<'a> {
    /// Text available without formatting.
    #[inline]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Message::Str(s) => Some(s),
            Message::Args(args) => args.as_str(),
        }
    }
}

impl<'a> From<&'a str> for Message<'a> {
    fn from(s: &'a str) -> Self {
        Message::Str(s)
    }
}

impl<'a> From<&'a String> for Message<'a> {
    fn from(s: &'a String) -> Self {
        Message::Str(s.as_str())
    }
}

impl<'a> From<fmt::Arguments<'a>> for Message<'a> {
    fn from(args: fmt::Arguments<'a>) -> Self {
        Message::Args(args)
    }
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Str(s) => f.write_str(s),
            Message::Args(args) => f.write_fmt(*args),
        }
    }
}

impl fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string())
    }
}

/// One log call, borrowed for the duration of a single render.
#[derive(Clone, Debug)]
pub struct LogRecord<'a> {
    pub time: DateTime<FixedOffset>,
    pub severity: Severity,
    /// Source path as given by `file!()` or the facade record
    pub file: Option<&'a str>,
    pub line: Option<u32>,
    /// Qualified function or module path, e.g. `my_crate::net::serve`
    pub function: Option<&'a str>,
    pub pid: u32,
    pub message: Message<'a>,
}

impl<'a> LogRecord<'a> {
    pub fn new<M: Into<Message<'a>>>(
        time: DateTime<FixedOffset>, severity: Severity, message: M,
    ) -> Self {
        Self {
            time,
            severity,
            file: None,
            line: None,
            function: None,
            pid: std::process::id(),
            message: message.into(),
        }
    }

    #[inline]
    pub fn with_location(mut self, file: &'a str, line: u32) -> Self {
        self.file = Some(file);
        self.line = Some(line);
        self
    }

    #[inline]
    pub fn with_function(mut self, function: &'a str) -> Self {
        self.function = Some(function);
        self
    }

    #[inline]
    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = pid;
        self
    }
}
