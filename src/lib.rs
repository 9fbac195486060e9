//! # captains-format
//!
//! A structured-text logger driven by compiled format templates.
//!
//! A template is compiled once into a sequence of verbs, then each record is rendered into a
//! reused byte buffer without touching the allocator on the hot path. Two template grammars
//! are supported:
//!
//! * short, `%` and one letter: `[%D %T][%L][%f:%s] %M`
//! * named, `%{Name}` or `%{Name arg}`: `%{Color red}%{SEV}%{Color reset} %{Time} %{Message}`
//!
//! | short | named                     | output                                  |
//! |-------|---------------------------|-----------------------------------------|
//! | `%D`  | `%{Date}`                 | `2014-01-08`                            |
//! | `%d`  |                           | `2014/01/08`                            |
//! | `%T`  |                           | `18:27:14.123456`                       |
//! | `%t`  | `%{Time}`                 | `18:27:14`                              |
//! | `%L`  | `%{SEVERITY}` / `%{Severity}` / `%{severity}` | `PANIC` / `Panic` / `panic` |
//! | `%l`  | `%{SEV}` / `%{Sev}` / `%{sev}` | `PANC` / `Panc` / `panc`           |
//! |       | `%{S}` / `%{s}`           | `P` / `p`                               |
//! |       | `%{Unix}` / `%{UnixNano}` | seconds / nanoseconds since epoch       |
//! | `%F`  | `%{FullFile}`             | `/path/to/testing.go`                   |
//! | `%f`  | `%{File}`                 | `testing.go`                            |
//! | `%x`  | `%{ShortFile}`            | `testing`                               |
//! | `%s`  | `%{Line}`                 | `391`                                   |
//! | `%P`  | `%{FullFunction}`         | `pkg.func`                              |
//! |       | `%{PkgFunction}`          | path stripped up to the last `/`        |
//! | `%p`  | `%{Function}`             | `func`                                  |
//! | `%M`  | `%{Message}`              | the message                             |
//! |       | `%{SafeMessage}`          | the message with control bytes escaped  |
//! |       | `%{Color fg+attrs:bg}`    | ANSI escape, resolved at compile time   |
//!
//! `%%` is a literal `%`, unknown verbs are kept as text.
//!
//! ## Setup
//!
//! ``` rust
//! use captains_format::*;
//! use log::*;
//!
//! let builder = recipe::stderr_logger(Severity::Debug);
//! let _logger = builder.build().expect("setup");
//! info!("engage");
//! ```
//!
//! A [Logger] can also be used without installing it globally, with the `logger_*` macros:
//!
//! ``` rust
//! use captains_format::*;
//! let logger = recipe::stderr_logger(Severity::Info).build_logger().expect("logger");
//! logger_warn!(logger, "shields at {}%", 30);
//! if logger.is_v(2) {
//!     logger_info!(logger, "not printed");
//! }
//! ```
//!
//! STACK, FATAL and PANIC records have side effects after being written: a backtrace is
//! appended, the process exits, or the thread panics.

#[macro_use]
extern crate enum_dispatch;

mod color;
mod compiler;
mod config;
mod console_impl;
mod digits;
mod env;
mod file_impl;
mod filter;
mod formatter;
mod log_impl;
mod record;
mod severity;
mod time;
mod verb;
mod writer_impl;

pub mod macros;
pub mod recipe;

pub use log::{Level as LogLevel, LevelFilter as LogLevelFilter};

pub use self::{
    color::{color_code, RESET as COLOR_RESET},
    compiler::{compile_named, compile_short, CompiledFormat, Grammar},
    config::{Builder, LogFormat},
    console_impl::{ConsoleTarget, LogConsole},
    digits::{write_fixed, write_i64, write_var, MAX_DIGITS},
    env::{env_or, EnvVarDefault},
    file_impl::LogRawFile,
    filter::{Filter, SeverityFilter, Verbose},
    formatter::{Formatter, GlogFormatter, LogFormatter, StdFormatter, MAX_RETAINED},
    log_impl::{default_logger, log_panic, setup_log, Logger},
    record::{LogRecord, Message},
    severity::{Severity, SEVERITY_COUNT},
    verb::{Verb, LOCATION_MASK},
    writer_impl::{LogWriter, SharedWriter},
};

#[cfg(test)]
mod tests;
