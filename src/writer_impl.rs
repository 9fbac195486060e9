use crate::{
    config::{LogFormat, SinkConfigTrait},
    formatter::{Formatter, LogFormatter},
    log_impl::{LogSink, LogSinkTrait},
    record::LogRecord,
    severity::Severity,
};
use parking_lot::Mutex;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Shared handle to an output, the sink only ever sees it through the mutex.
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Config for a sink writing to any `std::io::Write`, such as a socket or an in-memory buffer.
///
/// ``` rust
/// use std::sync::Arc;
/// use parking_lot::Mutex;
/// use captains_format::*;
/// let out = Arc::new(Mutex::new(Vec::<u8>::new()));
/// let logger = Builder::new()
///     .writer(LogWriter::new(out.clone(), Severity::Info, LogFormat::short("%l %M")))
///     .build_logger()
///     .expect("logger");
/// logger_info!(logger, "engage");
/// assert_eq!(&out.lock()[..], b"INFO engage\n");
/// ```
#[derive(Clone)]
pub struct LogWriter {
    pub level: Severity,

    pub format: LogFormat,

    pub writer: SharedWriter,
}

impl fmt::Debug for LogWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogWriter").field("level", &self.level).field("format", &self.format).finish()
    }
}

impl LogWriter {
    pub fn new<W: Write + Send + 'static>(
        writer: Arc<Mutex<W>>, level: Severity, format: LogFormat,
    ) -> Self {
        Self { level, format, writer }
    }
}

impl SinkConfigTrait for LogWriter {
    fn get_level(&self) -> Severity {
        self.level
    }

    fn get_file_path(&self) -> Option<Box<Path>> {
        None
    }

    fn build(&self) -> LogSink {
        LogSink::Writer(LogSinkWriter::new(self))
    }
}

pub(crate) struct LogSinkWriter {
    min_level: Severity,
    writer: SharedWriter,
    capture_location: bool,
    formatter: Mutex<LogFormatter>,
}

impl LogSinkWriter {
    pub fn new(config: &LogWriter) -> Self {
        let formatter = config.format.build();
        Self {
            min_level: config.level,
            writer: config.writer.clone(),
            capture_location: formatter.should_capture_location(),
            formatter: Mutex::new(formatter),
        }
    }
}

impl LogSinkTrait for LogSinkWriter {
    fn reopen(&self) -> std::io::Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn should_capture_location(&self) -> bool {
        self.capture_location
    }

    #[inline]
    fn log(&self, r: &LogRecord) {
        if r.severity >= self.min_level {
            let mut formatter = self.formatter.lock();
            let buf = formatter.format(r);
            if let Err(e) = self.writer.lock().write_all(buf) {
                eprintln!("log writer failed: {:?}", e);
            }
            formatter.release();
        }
    }

    fn write_raw(&self, sev: Severity, buf: &[u8]) {
        if sev >= self.min_level {
            let _guard = self.formatter.lock();
            if let Err(e) = self.writer.lock().write_all(buf) {
                eprintln!("log writer failed: {:?}", e);
            }
        }
    }

    fn flush(&self) {
        let _ = self.writer.lock().flush();
    }
}
