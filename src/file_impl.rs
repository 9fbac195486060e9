use crate::{
    config::{LogFormat, SinkConfigTrait},
    formatter::{Formatter, LogFormatter},
    log_impl::{LogSink, LogSinkTrait},
    record::LogRecord,
    severity::Severity,
};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::{fs::OpenOptions, os::unix::prelude::*, sync::Arc};

use arc_swap::ArcSwapOption;

/// Config for file sink that supports atomic append from multiprocess.
/// For log rotation, you need system log-rotate service to notify with signal.
#[derive(Clone, Debug, Hash)]
pub struct LogRawFile {
    /// min severity written to this file
    pub level: Severity,

    pub format: LogFormat,

    /// path: dir/name
    pub file_path: Box<Path>,
}

impl LogRawFile {
    /// Construct config for file sink,
    /// will try to create dir if not exists.
    ///
    /// The type of `dir` and `file_name` can be &str / String / &OsStr / OsString / Path / PathBuf. They can be of
    /// different types.
    pub fn new<P1, P2>(dir: P1, file_name: P2, level: Severity, format: LogFormat) -> Self
    where
        P1: Into<PathBuf>,
        P2: Into<PathBuf>,
    {
        let dir_path: PathBuf = dir.into();
        if !dir_path.exists() {
            if let Err(e) = std::fs::create_dir_all(&dir_path) {
                eprintln!("create dir {:#?} for log failed: {:?}", &dir_path, e);
            }
        }
        let file_path = dir_path.join(file_name.into()).into_boxed_path();
        Self { level, format, file_path }
    }
}

impl SinkConfigTrait for LogRawFile {
    fn get_level(&self) -> Severity {
        self.level
    }

    fn get_file_path(&self) -> Option<Box<Path>> {
        Some(self.file_path.clone())
    }

    fn build(&self) -> LogSink {
        LogSink::File(LogSinkFile::new(self))
    }
}

pub(crate) struct LogSinkFile {
    min_level: Severity,
    path: Box<Path>,
    // raw fd is only valid while the File lives, ArcSwap keeps it alive during reopen
    f: ArcSwapOption<std::fs::File>,
    capture_location: bool,
    formatter: Mutex<LogFormatter>,
}

pub(crate) fn open_file(path: &Path) -> std::io::Result<std::fs::File> {
    OpenOptions::new().append(true).create(true).open(path)
}

impl LogSinkFile {
    pub fn new(config: &LogRawFile) -> Self {
        let formatter = config.format.build();
        Self {
            path: config.file_path.clone(),
            min_level: config.level,
            f: ArcSwapOption::new(None),
            capture_location: formatter.should_capture_location(),
            formatter: Mutex::new(formatter),
        }
    }

    #[inline(always)]
    fn write_file(file: &std::fs::File, buf: &[u8]) {
        unsafe {
            let _ = libc::write(
                file.as_raw_fd() as libc::c_int,
                buf.as_ptr() as *const libc::c_void,
                buf.len(),
            );
        }
    }
}

impl LogSinkTrait for LogSinkFile {
    fn reopen(&self) -> std::io::Result<()> {
        match open_file(&self.path) {
            Ok(f) => {
                self.f.store(Some(Arc::new(f)));
                Ok(())
            }
            Err(e) => {
                eprintln!("open logfile {:#?} failed: {:?}", &self.path, e);
                Err(e)
            }
        }
    }

    #[inline(always)]
    fn should_capture_location(&self) -> bool {
        self.capture_location
    }

    #[inline(always)]
    fn log(&self, r: &LogRecord) {
        if r.severity >= self.min_level {
            // ArcSwap ensure file fd is not close during reopen for log rotation,
            // in case of panic during write.
            if let Some(file) = self.f.load_full() {
                // One write() per line keeps appends from multiple processes whole.
                let mut formatter = self.formatter.lock();
                let buf = formatter.format(r);
                Self::write_file(&file, buf);
                formatter.release();
            }
        }
    }

    fn write_raw(&self, sev: Severity, buf: &[u8]) {
        if sev >= self.min_level {
            if let Some(file) = self.f.load_full() {
                let _guard = self.formatter.lock();
                Self::write_file(&file, buf);
            }
        }
    }

    fn flush(&self) {}
}
