#[doc(hidden)]
#[macro_export]
macro_rules! do_log_filter {
    ($logger:expr, $sev:expr, $($arg:tt)+) => ({
        #[allow(unused_imports)]
        use $crate::Filter;
        let sev: $crate::Severity = $sev;
        let logger = &$logger;
        if logger.is_enabled(sev) {
            logger._private_api_log(
                std::format_args!($($arg)+),
                sev,
                &(std::module_path!(), std::file!(), std::line!()),
            );
        }
    });
}

/// Log with an explicit [Severity](crate::Severity).
///
/// The first argument is a [Logger](crate::Logger) (or `Arc<Logger>`), or the
/// [Verbose](crate::Verbose) returned by `Logger::v()`.
///
/// ``` rust
/// use captains_format::*;
/// let logger = recipe::stderr_logger(Severity::Info).build_logger().expect("logger");
/// logger_log!(logger, Severity::Warn, "shields at {}%", 30);
/// ```
#[macro_export]
macro_rules! logger_log {
    ($logger:expr, $sev:expr, $($arg:tt)+) => (
        $crate::do_log_filter!($logger, $sev, $($arg)+);
    )
}

/// Log with severity TRACE, the arguments after the logger are like [std::format!()].
#[macro_export]
macro_rules! logger_trace {
    ($logger:expr, $($arg:tt)+) => (
        $crate::do_log_filter!($logger, $crate::Severity::Trace, $($arg)+);
    )
}

/// Log with severity DEBUG
#[macro_export]
macro_rules! logger_debug {
    ($logger:expr, $($arg:tt)+) => (
        $crate::do_log_filter!($logger, $crate::Severity::Debug, $($arg)+);
    )
}

/// Same as [logger_debug!()], like `print` in the std logger of other languages.
#[macro_export]
macro_rules! logger_print {
    ($logger:expr, $($arg:tt)+) => (
        $crate::do_log_filter!($logger, $crate::Severity::Debug, $($arg)+);
    )
}

/// Log with severity INFO
#[macro_export]
macro_rules! logger_info {
    ($logger:expr, $($arg:tt)+) => (
        $crate::do_log_filter!($logger, $crate::Severity::Info, $($arg)+);
    )
}

/// Log with severity WARN
#[macro_export]
macro_rules! logger_warn {
    ($logger:expr, $($arg:tt)+) => (
        $crate::do_log_filter!($logger, $crate::Severity::Warn, $($arg)+);
    )
}

/// Log with severity ERROR
#[macro_export]
macro_rules! logger_error {
    ($logger:expr, $($arg:tt)+) => (
        $crate::do_log_filter!($logger, $crate::Severity::Error, $($arg)+);
    )
}

/// Log with severity CRITICAL
#[macro_export]
macro_rules! logger_critical {
    ($logger:expr, $($arg:tt)+) => (
        $crate::do_log_filter!($logger, $crate::Severity::Critical, $($arg)+);
    )
}

/// Log with severity STACK, then write a backtrace of the current thread to the same sinks.
#[macro_export]
macro_rules! logger_stack {
    ($logger:expr, $($arg:tt)+) => (
        $crate::do_log_filter!($logger, $crate::Severity::Stack, $($arg)+);
    )
}

/// Log with severity FATAL, then exit the process.
///
/// If the record is filtered out, the process keeps running.
#[macro_export]
macro_rules! logger_fatal {
    ($logger:expr, $($arg:tt)+) => (
        $crate::do_log_filter!($logger, $crate::Severity::Fatal, $($arg)+);
    )
}

/// Log with severity PANIC, then panic with the same message.
///
/// If the record is filtered out, nothing happens.
///
/// ``` rust,should_panic
/// use captains_format::*;
/// let logger = recipe::stderr_logger(Severity::Info).build_logger().expect("logger");
/// logger_panic!(logger, "warp core breach");
/// ```
#[macro_export]
macro_rules! logger_panic {
    ($logger:expr, $($arg:tt)+) => (
        $crate::do_log_filter!($logger, $crate::Severity::Panic, $($arg)+);
    )
}

/// Will log with the logger at ERROR and panic when condition not met.
///
/// The first argument is a [Logger](crate::Logger), the rest arguments are like [core::assert!()].
///
/// # Examples:
///
/// ``` rust
/// use captains_format::*;
/// let logger = recipe::stderr_logger(Severity::Info).build_logger().expect("logger");
/// let user_id = Some(111);
/// logger_assert!(logger, user_id.is_some());
/// logger_assert!(logger, user_id.is_some(), "user must login");
/// ```
#[macro_export]
macro_rules! logger_assert {
    ($logger:expr, $cond:expr) => ({
        if !$cond {
            $crate::do_log_filter!(
                $logger,
                $crate::Severity::Error,
                "assertion failed: {:?}",
                std::stringify!($cond)
            );
            std::panic!(r#"assertion failed: {:?}"#, std::stringify!($cond));
        }
    });
    ($logger:expr, $cond:expr,) => ({
        $crate::logger_assert!($logger, $cond);
    });
    ($logger:expr, $cond:expr, $($arg:tt)+) => ({
        if !$cond {
            $crate::do_log_filter!(
                $logger,
                $crate::Severity::Error,
                "assertion failed: {}",
                std::format_args!($($arg)+)
            );
            std::panic!(r#"{}"#, std::format_args!($($arg)+));
        }
    });
}

/// Will log with the logger at ERROR and panic when the two sides differ.
///
/// The first argument is a [Logger](crate::Logger), the rest arguments are like [core::assert_eq!()].
///
/// # Examples:
///
/// ``` rust
/// use captains_format::*;
/// let logger = recipe::stderr_logger(Severity::Info).build_logger().expect("logger");
/// logger_assert_eq!(logger, 1, 1);
/// logger_assert_eq!(logger, 1, 1, "impossible things happended");
/// ```
#[macro_export]
macro_rules! logger_assert_eq {
    ($logger:expr, $left:expr, $right:expr) => ({
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    $crate::do_log_filter!($logger, $crate::Severity::Error, "assertion failed! \
                    expected: (`left == right`) actual: (`{:?}` != `{:?}`)", &*left_val, &*right_val);
                    std::panic!(r#"assertion failed: `(left == right)`
  left: `{:?}`,
 right: `{:?}`"#, &*left_val, &*right_val);
                }
            }
        }
    });
    ($logger:expr, $left:expr, $right:expr,) => ({
        $crate::logger_assert_eq!($logger, $left, $right);
    });
    ($logger:expr, $left:expr, $right:expr, $($arg:tt)+) => ({
        match (&($left), &($right)) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    $crate::do_log_filter!($logger, $crate::Severity::Error, "assertion failed! \
                    expected: `(left == right)` actual: (`{:?}` != `{:?}`)", &*left_val, &*right_val);
                    std::panic!(r#"assertion failed: `(left == right)`
  left: `{:?}`,
 right: `{:?}`: {}"#, &*left_val, &*right_val,
                           std::format_args!($($arg)+));
                }
            }
        }
    });
}
