use crate::{
    config::Builder,
    console_impl::LogSinkConsole,
    file_impl::LogSinkFile,
    filter::{Filter, SeverityFilter, Verbose},
    record::{LogRecord, Message},
    severity::Severity,
    time::Timer,
    writer_impl::LogSinkWriter,
};
use arc_swap::ArcSwapOption;
use backtrace::Backtrace;
use lazy_static::lazy_static;
use log::{Log, Metadata, Record};
use parking_lot::Mutex;
use signal_hook::iterator::Signals;
use std::fmt;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::thread;

#[enum_dispatch]
pub(crate) trait LogSinkTrait {
    fn reopen(&self) -> std::io::Result<()>;

    /// Whether the formatter of this sink references file / line / function
    fn should_capture_location(&self) -> bool;

    fn log(&self, r: &LogRecord);

    /// Bytes which bypass the formatter, only when `sev` passes the sink level
    fn write_raw(&self, sev: Severity, buf: &[u8]);

    fn flush(&self);
}

#[enum_dispatch(LogSinkTrait)]
pub(crate) enum LogSink {
    Console(LogSinkConsole),
    File(LogSinkFile),
    Writer(LogSinkWriter),
}

/// A set of sinks sharing one admission filter and verbosity.
///
/// Can be used directly as an explicit instance passed around, or installed as the
/// process-wide default with [setup_log()], which also routes the `log` crate macros here.
///
/// Each sink keeps its compiled formatter behind a mutex, so one `Logger` can be shared
/// across threads.
pub struct Logger {
    sinks: Vec<LogSink>,
    filter: SeverityFilter,
    verbosity: AtomicI32,
    capture_location: bool,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("sinks", &self.sinks.len())
            .field("filter", &self.filter)
            .field("verbosity", &self.verbosity())
            .finish()
    }
}

impl Logger {
    pub(crate) fn new(sinks: Vec<LogSink>, builder: &Builder) -> Self {
        let capture_location = sinks.iter().any(|s| s.should_capture_location());
        Self {
            sinks,
            filter: SeverityFilter::range(builder.min_severity, builder.max_severity),
            verbosity: AtomicI32::new(builder.verbosity),
            capture_location,
        }
    }

    #[inline(always)]
    pub fn is_enabled(&self, sev: Severity) -> bool {
        self.filter.admits(sev)
    }

    /// Changeable while logging
    #[inline]
    pub fn filter(&self) -> &SeverityFilter {
        &self.filter
    }

    pub fn set_verbosity(&self, verbosity: i32) {
        self.verbosity.store(verbosity, Ordering::Relaxed);
    }

    #[inline]
    pub fn verbosity(&self) -> i32 {
        self.verbosity.load(Ordering::Relaxed)
    }

    /// Whether the verbosity is at least `level`
    ///
    /// Cheaper than [Logger::v()] for the hot path:
    /// ``` rust
    /// use captains_format::*;
    /// let logger = Builder::new().verbosity(1).build_logger().expect("logger");
    /// if logger.is_v(1) {
    ///     logger_info!(logger, "some info");
    /// }
    /// ```
    #[inline(always)]
    pub fn is_v(&self, level: i32) -> bool {
        self.verbosity() >= level
    }

    #[inline]
    pub fn v(&self, level: i32) -> Verbose<'_> {
        Verbose { enabled: self.is_v(level), logger: self }
    }

    /// Whether any sink needs the caller's location
    #[inline]
    pub fn should_capture_location(&self) -> bool {
        self.capture_location
    }

    /// Render and write one message to all the sinks, skip the admission check.
    ///
    /// `loc` is (module_path, file, line), only forwarded when some sink prints it.
    pub fn output(&self, sev: Severity, msg: Message<'_>, loc: Option<&(&str, &str, u32)>) {
        let now = Timer::new();
        let mut record = LogRecord::new(now.get(), sev, msg);
        if self.capture_location {
            if let Some(&(module_path, file, line)) = loc {
                record = record.with_location(file, line).with_function(module_path);
            }
        }
        for sink in &self.sinks {
            sink.log(&record);
        }
    }

    /// Write a backtrace of the current thread to all sinks accepting STACK
    pub fn write_stack(&self) {
        let bt = Backtrace::new();
        let trace = format!("{:?}\n", bt);
        for sink in &self.sinks {
            sink.write_raw(Severity::Stack, trace.as_bytes());
        }
    }

    pub fn reopen(&self) -> std::io::Result<()> {
        for sink in &self.sinks {
            sink.reopen()?;
        }
        Ok(())
    }
}

impl Filter for Logger {
    #[inline(always)]
    fn is_enabled(&self, sev: Severity) -> bool {
        self.filter.admits(sev)
    }

    /// STACK is followed by a backtrace, FATAL exits the process, PANIC panics with the
    /// message, all after the record is written.
    #[doc(hidden)]
    fn _private_api_log(&self, args: fmt::Arguments, sev: Severity, loc: &(&str, &str, u32)) {
        self.output(sev, Message::Args(args), Some(loc));
        match sev {
            Severity::Stack => self.write_stack(),
            Severity::Fatal => {
                Log::flush(self);
                std::process::exit(exitcode::SOFTWARE);
            }
            Severity::Panic => {
                Log::flush(self);
                panic!("{}", args);
            }
            _ => {}
        }
    }
}

impl Log for Logger {
    fn enabled(&self, m: &Metadata) -> bool {
        self.filter.admits(m.level().into())
    }

    fn log(&self, r: &Record) {
        let sev: Severity = r.level().into();
        if !self.filter.admits(sev) {
            return;
        }
        let location = (
            r.module_path().unwrap_or(r.target()),
            r.file().unwrap_or(""),
            r.line().unwrap_or(0),
        );
        let loc = if r.file().is_some() { Some(&location) } else { None };
        self.output(sev, Message::Args(*r.args()), loc);
    }

    fn flush(&self) {
        for sink in &self.sinks {
            sink.flush();
        }
    }
}

/// Forwards the `log` crate to whatever logger is currently installed
struct GlobalLogger;

static FACADE: GlobalLogger = GlobalLogger;

static DEFAULT_LOGGER: ArcSwapOption<Logger> = ArcSwapOption::const_empty();

impl Log for GlobalLogger {
    fn enabled(&self, m: &Metadata) -> bool {
        if let Some(logger) = &*DEFAULT_LOGGER.load() {
            return Log::enabled(&**logger, m);
        }
        false
    }

    fn log(&self, r: &Record) {
        if let Some(logger) = &*DEFAULT_LOGGER.load() {
            Log::log(&**logger, r);
        }
    }

    fn flush(&self) {
        if let Some(logger) = &*DEFAULT_LOGGER.load() {
            Log::flush(&**logger);
        }
    }
}

#[derive(Default)]
struct SetupState {
    installed: bool,
    dynamic: bool,
    listening_signal: bool,
}

lazy_static! {
    // Only locked on setup, logging goes through DEFAULT_LOGGER
    static ref SETUP_STATE: Mutex<SetupState> = Mutex::new(SetupState::default());
}

fn panic_or_error() {
    #[cfg(debug_assertions)]
    {
        panic!("GlobalLogger cannot be initialized twice on dynamic==false");
    }
    #[cfg(not(debug_assertions))]
    {
        eprintln!("GlobalLogger cannot be initialized twice on dynamic==false");
    }
}

/// The logger installed by [setup_log()], if any
pub fn default_logger() -> Option<Arc<Logger>> {
    DEFAULT_LOGGER.load_full()
}

/// log handle for panic hook
#[doc(hidden)]
pub fn log_panic(info: &std::panic::PanicHookInfo) {
    let bt = Backtrace::new();
    if let Some(logger) = default_logger() {
        let loc = info.location().map(|l| ("panic", l.file(), l.line()));
        logger.output(
            Severity::Panic,
            Message::Args(format_args!("panic occur: {}\ntrace: {:?}", info, bt)),
            loc.as_ref(),
        );
        Log::flush(&*logger);
    }
    eprint!("panic occur: {} at {:?}\ntrace: {:?}", info, info.location(), bt);
}

fn panic_and_exit_hook(info: &std::panic::PanicHookInfo) {
    log_panic(info);
    std::process::exit(exitcode::IOERR);
}

fn panic_no_exit_hook(info: &std::panic::PanicHookInfo) {
    log_panic(info);
    eprint!("not debug version, so don't exit process");
}

/// Initialize the process-wide logger from Builder, and route the `log` crate to it.
pub fn setup_log(builder: Builder) -> Result<Arc<Logger>, ()> {
    let mut state = SETUP_STATE.lock();
    if state.installed && !state.dynamic {
        panic_or_error();
        return Err(());
    }
    let logger = match builder.build_logger() {
        Ok(logger) => Arc::new(logger),
        Err(e) => {
            eprintln!("Initialize logger failed: {:?}", e);
            return Err(());
        }
    };
    DEFAULT_LOGGER.store(Some(logger.clone()));
    if !state.installed {
        // The facade accepts exactly one logger per process
        if let Err(e) = log::set_logger(&FACADE) {
            eprintln!("log facade already taken: {:?}", e);
        }
        state.installed = true;
    }
    state.dynamic = builder.dynamic;
    // admission is the logger's own filter, which can change after setup
    log::set_max_level(log::LevelFilter::Trace);
    if builder.panic {
        if builder.continue_when_panic {
            std::panic::set_hook(Box::new(panic_no_exit_hook));
        } else {
            std::panic::set_hook(Box::new(panic_and_exit_hook));
        }
    }
    if builder.rotation_signals.len() > 0 && !state.listening_signal {
        match Signals::new(&builder.rotation_signals) {
            Ok(mut signals) => {
                state.listening_signal = true;
                thread::spawn(move || {
                    for _sig in signals.forever() {
                        if let Some(logger) = default_logger() {
                            let _ = logger.reopen();
                        }
                    }
                });
            }
            Err(e) => {
                eprintln!("listen for log-rotate signal failed: {:?}", e);
            }
        }
    }
    Ok(logger)
}
