use crate::{
    config::{LogFormat, SinkConfigTrait},
    formatter::{Formatter, LogFormatter},
    log_impl::{LogSink, LogSinkTrait},
    record::LogRecord,
    severity::Severity,
};
use parking_lot::Mutex;
use std::path::Path;
use std::str::FromStr;

#[repr(i32)]
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout = 1,
    Stderr = 2,
}

impl FromStr for ConsoleTarget {
    type Err = ();

    /// accepts stdout / stderr in any case, or the fd number 1 / 2
    fn from_str(s: &str) -> Result<Self, ()> {
        let v = s.to_lowercase();
        match v.as_str() {
            "stdout" | "1" => Ok(ConsoleTarget::Stdout),
            "stderr" | "2" => Ok(ConsoleTarget::Stderr),
            _ => Err(()),
        }
    }
}

/// Config for console sink
#[derive(Clone, Debug, Hash)]
pub struct LogConsole {
    pub target: ConsoleTarget,

    /// min severity written to the console
    pub level: Severity,

    pub format: LogFormat,
}

impl LogConsole {
    pub fn new(target: ConsoleTarget, level: Severity, format: LogFormat) -> Self {
        Self { target, level, format }
    }
}

impl SinkConfigTrait for LogConsole {
    fn get_level(&self) -> Severity {
        self.level
    }

    fn get_file_path(&self) -> Option<Box<Path>> {
        None
    }

    fn build(&self) -> LogSink {
        LogSink::Console(LogSinkConsole::new(self))
    }
}

pub(crate) struct LogSinkConsole {
    target_fd: libc::c_int,
    min_level: Severity,
    capture_location: bool,
    formatter: Mutex<LogFormatter>,
}

impl LogSinkConsole {
    pub fn new(config: &LogConsole) -> Self {
        let formatter = config.format.build();
        Self {
            target_fd: config.target as i32,
            min_level: config.level,
            capture_location: formatter.should_capture_location(),
            formatter: Mutex::new(formatter),
        }
    }

    #[inline(always)]
    fn write_fd(&self, buf: &[u8]) {
        unsafe {
            let _ = libc::write(self.target_fd, buf.as_ptr() as *const libc::c_void, buf.len());
        }
    }
}

impl LogSinkTrait for LogSinkConsole {
    fn reopen(&self) -> std::io::Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn should_capture_location(&self) -> bool {
        self.capture_location
    }

    #[inline(always)]
    fn log(&self, r: &LogRecord) {
        if r.severity >= self.min_level {
            let mut formatter = self.formatter.lock();
            let buf = formatter.format(r);
            self.write_fd(buf);
            formatter.release();
        }
    }

    fn write_raw(&self, sev: Severity, buf: &[u8]) {
        if sev >= self.min_level {
            // keep the trace from interleaving with a line being formatted
            let _guard = self.formatter.lock();
            self.write_fd(buf);
        }
    }

    fn flush(&self) {}
}
