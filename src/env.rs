use crate::{
    compiler::Grammar, config::LogFormat, console_impl::ConsoleTarget, severity::Severity,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[doc(hidden)]
#[macro_export(local_inner_macros)]
macro_rules! impl_from_env {
    ($type: tt) => {
        impl<'a> Into<$type> for EnvVarDefault<'a, $type> {
            #[inline]
            fn into(self) -> $type {
                if let Ok(v) = std::env::var(&self.name) {
                    match $type::from_str(&v) {
                        Ok(r) => return r,
                        Err(_) => {
                            std::eprintln!(
                                "env {}={} is not valid, set to {:?}",
                                self.name,
                                v,
                                self.default
                            );
                        }
                    }
                }
                return self.default;
            }
        }
    };
}

pub struct EnvVarDefault<'a, T> {
    pub(crate) name: &'a str,
    pub(crate) default: T,
}

/// To config some logger setting with env.
///
/// Read value from environment, and set with default if not exists.
///
/// NOTE: the arguments to load from env_or() must support owned values.
///
/// Example:
///
/// ```rust
/// use captains_format::*;
/// let _level: Severity = env_or("LOG_LEVEL", Severity::Info).into();
/// let _file_path: String = env_or("LOG_FILE", "/tmp/test.log").into();
/// let _console: ConsoleTarget = env_or("LOG_CONSOLE", ConsoleTarget::Stdout).into();
/// ```
pub fn env_or<'a, T>(name: &'a str, default: T) -> EnvVarDefault<'a, T> {
    EnvVarDefault { name, default }
}

impl<'a> Into<String> for EnvVarDefault<'a, &'a str> {
    fn into(self) -> String {
        if let Ok(v) = std::env::var(&self.name) {
            return v;
        }
        return self.default.to_string();
    }
}

impl<'a, P: AsRef<Path>> Into<PathBuf> for EnvVarDefault<'a, P> {
    fn into(self) -> PathBuf {
        if let Some(v) = std::env::var_os(&self.name) {
            if v.len() > 0 {
                return PathBuf::from(v);
            }
        }
        return self.default.as_ref().to_path_buf();
    }
}

/// `glog` selects the fixed glog layout, anything else is a template,
/// in the named grammar when it contains `%{`.
impl<'a> Into<LogFormat> for EnvVarDefault<'a, LogFormat> {
    fn into(self) -> LogFormat {
        if let Ok(v) = std::env::var(&self.name) {
            if v.eq_ignore_ascii_case("glog") {
                return LogFormat::Glog;
            }
            if v.len() > 0 {
                let grammar = Grammar::detect(&v);
                return LogFormat::custom(v, grammar);
            }
        }
        return self.default;
    }
}

crate::impl_from_env!(Severity);
crate::impl_from_env!(ConsoleTarget);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe;

    #[test]
    fn test_env_config() {
        // test severity
        unsafe { std::env::set_var("LEVEL", "warn") };
        let level: Severity = env_or("LEVEL", Severity::Debug).into();
        assert_eq!(level, Severity::Warn);
        unsafe { std::env::set_var("LEVEL", "CRIT") };
        let level: Severity = env_or("LEVEL", Severity::Debug).into();
        assert_eq!(level, Severity::Critical);
        unsafe { std::env::set_var("LEVEL", "loud") };
        let level: Severity = env_or("LEVEL", Severity::Debug).into();
        assert_eq!(level, Severity::Debug);

        assert_eq!(ConsoleTarget::from_str("Stdout").unwrap(), ConsoleTarget::Stdout);
        assert_eq!(ConsoleTarget::from_str("StdERR").unwrap(), ConsoleTarget::Stderr);
        assert_eq!(ConsoleTarget::from_str("1").unwrap(), ConsoleTarget::Stdout);
        assert_eq!(ConsoleTarget::from_str("2").unwrap(), ConsoleTarget::Stderr);
        assert_eq!(ConsoleTarget::from_str("0").unwrap_err(), ());

        // test console target
        unsafe { std::env::set_var("CONSOLE", "stderr") };
        let target: ConsoleTarget = env_or("CONSOLE", ConsoleTarget::Stdout).into();
        assert_eq!(target, ConsoleTarget::Stderr);
        unsafe { std::env::set_var("CONSOLE", "") };
        let target: ConsoleTarget = env_or("CONSOLE", ConsoleTarget::Stdout).into();
        assert_eq!(target, ConsoleTarget::Stdout);

        // test format
        unsafe { std::env::set_var("LOG_FORMAT", "%{Time} %{Message}") };
        let format: LogFormat = env_or("LOG_FORMAT", recipe::LOG_FORMAT_PROD).into();
        assert_eq!(format, LogFormat::custom("%{Time} %{Message}", Grammar::Named));
        unsafe { std::env::set_var("LOG_FORMAT", "%t %M") };
        let format: LogFormat = env_or("LOG_FORMAT", recipe::LOG_FORMAT_PROD).into();
        assert_eq!(format, LogFormat::custom("%t %M", Grammar::Short));
        unsafe { std::env::set_var("LOG_FORMAT", "GLOG") };
        let format: LogFormat = env_or("LOG_FORMAT", recipe::LOG_FORMAT_PROD).into();
        assert_eq!(format, LogFormat::Glog);
        unsafe { std::env::set_var("LOG_FORMAT", "") };
        let format: LogFormat = env_or("LOG_FORMAT", recipe::LOG_FORMAT_PROD).into();
        assert_eq!(format, recipe::LOG_FORMAT_PROD);

        // test path
        unsafe { std::env::set_var("LOG_PATH", "/tmp/test.log") };
        let path: PathBuf = env_or("LOG_PATH", "/tmp/other.log").into();
        assert_eq!(path, Path::new("/tmp/test.log").to_path_buf());

        unsafe { std::env::set_var("LOG_PATH", "") };
        let path: PathBuf = env_or("LOG_PATH", "/tmp/other.log").into();
        assert_eq!(path, Path::new("/tmp/other.log").to_path_buf());

        let _builder =
            recipe::raw_file_logger(env_or("LOG_PATH", "/tmp/other.log"), Severity::Info);
        let _builder = recipe::raw_file_logger(
            env_or("LOG_PATH", "/tmp/other.log".to_string()),
            Severity::Info,
        );
    }
}
