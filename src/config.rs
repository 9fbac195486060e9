use crate::console_impl::LogConsole;
use crate::file_impl::LogRawFile;
use crate::log_impl::{setup_log, LogSink, LogSinkTrait, Logger};
use crate::writer_impl::LogWriter;
use crate::{
    compiler::Grammar,
    formatter::{GlogFormatter, LogFormatter, StdFormatter},
    severity::Severity,
};
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

/// Config to setup a logger.
/// See crate::recipe for usage
pub struct Builder {
    /// When dynamic==true,
    ///   Can safely re-initialize the global logger even it exists,
    ///   useful to setup different types of logger in test suits.
    /// When dynamic==false,
    ///   Only initialize once, logger sinks setting cannot be change afterwards.
    pub dynamic: bool,

    /// Listen for signal of log-rotate
    /// NOTE: Once logger started to listen signal, does not support dynamic reconfigure.
    pub rotation_signals: Vec<i32>,

    /// Hookup to log error when panic
    pub panic: bool,

    /// Whether to exit program after panic
    pub continue_when_panic: bool,

    /// Initial verbosity for V()
    pub verbosity: i32,

    /// Logger-wide admission, on top of the level of each sink
    pub min_severity: Severity,
    pub max_severity: Severity,

    /// Different types of log sink
    pub(crate) sinks: Vec<Box<dyn SinkConfigTrait>>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dynamic: false,
            rotation_signals: Vec::new(),
            panic: false,
            continue_when_panic: false,
            verbosity: 0,
            min_severity: Severity::None,
            max_severity: Severity::Panic,
            sinks: Vec::new(),
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// For test cases, set dynamic=true, turn Off signal and leave the panic hook alone.
    /// Call this with pre-set recipe for convenient.
    pub fn test(mut self) -> Self {
        self.dynamic = true;
        self.rotation_signals.clear();
        self.panic = false;
        self
    }

    /// Log panics through this logger on setup.
    /// With continue_when_panic==false the process exits after the panic is logged.
    pub fn panic(mut self, continue_when_panic: bool) -> Self {
        self.panic = true;
        self.continue_when_panic = continue_when_panic;
        self
    }

    /// Add log-rotate signal
    pub fn signal(mut self, signal: i32) -> Self {
        self.rotation_signals.push(signal);
        self
    }

    /// Add raw file sink that supports multiprocess atomic append
    pub fn raw_file(mut self, config: LogRawFile) -> Self {
        self.sinks.push(Box::new(config));
        self
    }

    /// Add console sink
    pub fn console(mut self, config: LogConsole) -> Self {
        self.sinks.push(Box::new(config));
        self
    }

    /// Add a sink writing to any `std::io::Write`
    pub fn writer(mut self, config: LogWriter) -> Self {
        self.sinks.push(Box::new(config));
        self
    }

    pub fn verbosity(mut self, verbosity: i32) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Only admit records at or above `min`
    pub fn severity(mut self, min: Severity) -> Self {
        self.min_severity = min;
        self.max_severity = Severity::Panic;
        self
    }

    /// Only admit records within `min..=max`
    pub fn severity_range(mut self, min: Severity, max: Severity) -> Self {
        self.min_severity = min;
        self.max_severity = max;
        self
    }

    /// Return the lowest severity any sink accepts
    pub fn get_min_severity(&self) -> Severity {
        let mut min_sev = Severity::Panic;
        for sink in &self.sinks {
            let sev = sink.get_level();
            if sev < min_sev {
                min_sev = sev;
            }
        }
        if self.min_severity > min_sev {
            min_sev = self.min_severity;
        }
        return min_sev;
    }

    /// Construct a standalone logger without touching global state.
    pub fn build_logger(&self) -> std::io::Result<Logger> {
        let mut sinks = Vec::with_capacity(self.sinks.len());
        for config in &self.sinks {
            let sink = config.build();
            sink.reopen()?;
            sinks.push(sink);
        }
        Ok(Logger::new(sinks, self))
    }

    /// Setup global logger.
    /// Equals to setup_log(builder)
    pub fn build(self) -> Result<Arc<Logger>, ()> {
        setup_log(self)
    }
}

pub(crate) trait SinkConfigTrait {
    /// get min severity of the sink
    fn get_level(&self) -> Severity;
    /// Only file sink has path
    #[allow(dead_code)]
    fn get_file_path(&self) -> Option<Box<Path>>;
    /// Build an actual sink from config
    fn build(&self) -> LogSink;
}

/// Line layout of a sink
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LogFormat {
    /// A template in the given grammar
    Template(Cow<'static, str>, Grammar),
    /// Fixed glog layout
    Glog,
}

impl LogFormat {
    /// `%X` template
    ///
    /// # Example
    /// ```
    /// use captains_format::{LogRawFile, LogFormat, Severity};
    /// let log_format = LogFormat::short("%D %T [%L] %f:%s %M");
    /// let log_sink = LogRawFile::new("/tmp", "test.log", Severity::Info, log_format);
    /// ```
    pub const fn short(template: &'static str) -> Self {
        LogFormat::Template(Cow::Borrowed(template), Grammar::Short)
    }

    /// `%{Name}` template
    ///
    /// # Example
    /// ```
    /// use captains_format::{LogConsole, ConsoleTarget, LogFormat, Severity};
    /// let log_format = LogFormat::named("%{Color cyan}%{SEV}%{Color reset} %{Time} %{Message}");
    /// let log_sink = LogConsole::new(ConsoleTarget::Stderr, Severity::Debug, log_format);
    /// ```
    pub const fn named(template: &'static str) -> Self {
        LogFormat::Template(Cow::Borrowed(template), Grammar::Named)
    }

    /// Template known only at runtime
    pub fn custom<S: Into<String>>(template: S, grammar: Grammar) -> Self {
        LogFormat::Template(Cow::Owned(template.into()), grammar)
    }

    /// Compile into a formatter owning its own scratch buffers
    pub fn build(&self) -> LogFormatter {
        match self {
            LogFormat::Template(template, grammar) => StdFormatter::new(template, *grammar).into(),
            LogFormat::Glog => GlogFormatter::new().into(),
        }
    }
}
