//! The recipe module contains some prelude functions that construct a [Builder] for
//! convenience use. Please click to the description and source for reference.

use crate::*;
use std::path;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// [{date} {time}][{severity}][{file}:{line}] {msg}
pub const LOG_FORMAT_DEBUG: LogFormat = LogFormat::short("[%D %T][%L][%f:%s] %M");

/// [{date} {time}][{severity}] {msg}
pub const LOG_FORMAT_PROD: LogFormat = LogFormat::short("[%D %T][%L] %M");

/// Severity colored by level, for terminals
pub const LOG_FORMAT_COLOR: LogFormat = LogFormat::named(
    "%{Color blue}%{Date} %{Time}%{Color reset} %{Color yellow+b}%{SEV}%{Color reset} \
     %{File}:%{Line} %{Message}",
);

/// Lmmdd hh:mm:ss.uuuuuu pid file:line] msg
pub const LOG_FORMAT_GLOG: LogFormat = LogFormat::Glog;

fn console_logger(target: ConsoleTarget, min_level: Severity) -> Builder {
    let console_config = LogConsole::new(target, min_level, LOG_FORMAT_DEBUG);
    // exit on panic when debugging, keep running on release
    Builder::default().console(console_config).panic(!cfg!(debug_assertions))
}

/// Output to stdout with LOG_FORMAT_DEBUG, with dynamic=true.
///
/// You don't care the speed when output to console.
#[inline]
pub fn stdout_logger(min_level: Severity) -> Builder {
    console_logger(ConsoleTarget::Stdout, min_level).test()
}

/// Output to stderr with LOG_FORMAT_DEBUG, with dynamic=true.
///
/// You don't care the speed when output to console.
#[inline]
pub fn stderr_logger(min_level: Severity) -> Builder {
    console_logger(ConsoleTarget::Stderr, min_level).test()
}

/// Configure dynamic file/console logger from environment.
///
/// # Arguments:
///
///   - file_env_name:
///
///     If valid as stdout/stderr/1/2, output to console target;
///
///     When a file path is configured, create a raw_file_logger();
///
///     For empty string, default output to Stderr.
///
///   - level_env_name: configure the min severity, default to INFO.
///
/// # Example:
///
/// ``` rust
/// use captains_format::recipe;
/// let _ = recipe::env_logger("LOG_FILE", "LOG_LEVEL").build();
/// ```
pub fn env_logger(file_env_name: &str, level_env_name: &str) -> Builder {
    let level: Severity = env_or(level_env_name, Severity::Info).into();
    let mut console: Option<ConsoleTarget> = None;
    if let Ok(file_path) = std::env::var(file_env_name) {
        if let Ok(target) = ConsoleTarget::from_str(file_path.as_str()) {
            console = Some(target);
        } else if file_path.len() > 0 {
            return raw_file_logger(file_path, level).test();
        }
    }
    return console_logger(console.unwrap_or(ConsoleTarget::Stderr), level).test();
}

fn split_path(file_path: PathBuf) -> (PathBuf, PathBuf) {
    let p = path::absolute(&file_path).unwrap_or(file_path);
    let dir = p.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    let file_name = p.file_name().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("log"));
    (dir, file_name)
}

/// Setup one log file, with a custom format.
///
/// See the source for details.
///
/// The type of file_path can be &str / String / &OsStr / OsString / Path / PathBuf
pub fn raw_file_logger_custom<P: Into<PathBuf>>(
    file_path: P, min_level: Severity, format: LogFormat,
) -> Builder {
    let (dir, file_name) = split_path(file_path.into());
    let file = LogRawFile::new(dir, file_name, min_level, format);
    // exit on panic when debugging, keep running on release
    Builder::default()
        .signal(signal_hook::consts::SIGUSR1)
        .raw_file(file)
        .panic(!cfg!(debug_assertions))
}

/// Setup one log file.
///
/// See the source for details.
///
/// The type of file_path can be &str / String / &OsStr / OsString / Path / PathBuf
pub fn raw_file_logger<P: Into<PathBuf>>(file_path: P, min_level: Severity) -> Builder {
    raw_file_logger_custom(file_path, min_level, LOG_FORMAT_DEBUG)
}

/// Setup two log files.
/// One as "{{name}}.log" for debug purpose, with file line to track problem.
/// One as "{{name}}.log.wf" for error level log.
/// See the source for details.
///
/// The type of `dir` can be &str / String / &OsStr / OsString / Path / PathBuf.
///
/// The type of `name` can be &str / String.
pub fn split_error_file_logger<P1, P2>(dir: P1, name: P2, min_level: Severity) -> Builder
where
    P1: Into<PathBuf>,
    P2: Into<String>,
{
    let _name: String = name.into();
    let debug_file_name = format!("{}.log", _name);
    let _dir: PathBuf = dir.into();
    let debug_file = LogRawFile::new(_dir.clone(), debug_file_name, min_level, LOG_FORMAT_DEBUG);
    let err_file_name = format!("{}.log.wf", _name);
    let error_file = LogRawFile::new(_dir.clone(), err_file_name, Severity::Error, LOG_FORMAT_PROD);

    Builder::default()
        .signal(signal_hook::consts::SIGUSR1)
        .raw_file(debug_file)
        .raw_file(error_file)
        .panic(!cfg!(debug_assertions))
}
