use super::utils::*;
use crate::{
    default_logger, logger_critical, logger_debug, recipe, setup_log, Builder, LogFormat, LogRawFile,
    Severity,
};
use log::*;
use std::fs::*;

const RE_DEBUG: &str = r"^\[(.+) (.+)\]\[(\w+)\]\[(.+)\:(\d+)\] (.+)$";

const RE_ERROR: &str = r"^\[(.+) (.+)\]\[(\w+)\] (.+)$";

#[test]
fn test_global_log_console() {
    lock_file!();
    let builder = recipe::stderr_logger(Severity::Debug);
    builder.build().expect("setup_log");
    debug!("test1 {}", "debug");
    info!("test2");
    error!("test3_error {}", "hahah");
}

#[test]
fn test_global_log_file() {
    lock_file!();

    let builder = recipe::split_error_file_logger("/tmp", "format_test", Severity::Debug).test();
    clear_test_files(&builder);
    builder.build().expect("setup_log");
    trace!("filtered");
    debug!("test1 {}", "debug");
    info!("test2");
    error!("test3_error {}", "hahah");
    let debug_logs = parse_log("/tmp/format_test.log", RE_DEBUG).expect("parse log");
    assert_eq!(debug_logs.len(), 3);
    assert_eq!(debug_logs[0][3], "DEBUG");
    assert_eq!(debug_logs[0][4], "test_global_log.rs");
    assert_eq!(debug_logs[0][6], "test1 debug");
    assert_eq!(debug_logs[1][3], "INFO");
    assert_eq!(debug_logs[1][6], "test2");
    assert_eq!(debug_logs[2][3], "ERROR");
    assert_eq!(debug_logs[2][6], "test3_error hahah");

    let err_logs = parse_log("/tmp/format_test.log.wf", RE_ERROR).expect("parse log.wf");
    assert_eq!(err_logs.len(), 1);
    assert_eq!(err_logs[0][3], "ERROR");
    assert_eq!(err_logs[0][4], "test3_error hahah");

    // the installed logger is reachable for the logger_* macros
    let logger = default_logger().expect("installed");
    logger_critical!(logger, "from default");
    let err_logs = parse_log("/tmp/format_test.log.wf", RE_ERROR).expect("parse log.wf");
    assert_eq!(err_logs.len(), 2);
    assert_eq!(err_logs[1][3], "CRITICAL");
}

#[test]
fn test_global_log_reopen() {
    lock_file!();

    let builder = recipe::raw_file_logger_custom(
        "/tmp/format_reopen.log",
        Severity::Info,
        LogFormat::short("%L %M"),
    )
    .test()
    .signal(signal_hook::consts::SIGUSR1);
    clear_test_files(&builder);
    setup_log(builder).expect("setup_log");
    info!("before rotate");
    // what logrotate does
    rename("/tmp/format_reopen.log", "/tmp/format_reopen.log.1").expect("rename");
    unsafe {
        libc::kill(std::process::id() as libc::c_int, signal_hook::consts::SIGUSR1);
    }
    std::thread::sleep(std::time::Duration::new(1, 0));
    info!("after reopen");
    assert_eq!(read_to_string("/tmp/format_reopen.log.1").unwrap(), "INFO before rotate\n");
    assert_eq!(read_to_string("/tmp/format_reopen.log").unwrap(), "INFO after reopen\n");
    let _ = remove_file("/tmp/format_reopen.log.1");
}

#[test]
fn test_global_log_replace() {
    lock_file!();

    let first = recipe::raw_file_logger_custom(
        "/tmp/format_replace_a.log",
        Severity::Debug,
        LogFormat::named("%{sev} %{Message}"),
    )
    .test();
    clear_test_files(&first);
    setup_log(first).expect("setup_log");
    warn!("to a");

    let second = recipe::raw_file_logger_custom(
        "/tmp/format_replace_b.log",
        Severity::Warn,
        LogFormat::named("%{sev} %{Message}"),
    )
    .test();
    clear_test_files(&second);
    setup_log(second).expect("setup_log");
    warn!("to b");
    info!("filtered");
    assert_eq!(read_to_string("/tmp/format_replace_a.log").unwrap(), "warn to a\n");
    assert_eq!(read_to_string("/tmp/format_replace_b.log").unwrap(), "warn to b\n");
}

#[test]
fn test_global_log_loosen_filter() {
    lock_file!();

    let path = "/tmp/format_loosen.log";
    let builder = Builder::new()
        .test()
        .severity(Severity::Info)
        .raw_file(LogRawFile::new(
            "/tmp",
            "format_loosen.log",
            Severity::Trace,
            LogFormat::short("%L %M"),
        ));
    clear_test_files(&builder);
    let logger = setup_log(builder).expect("setup_log");
    debug!("before loosening");
    logger.filter().set_min(Severity::Debug);
    assert!(logger.is_enabled(Severity::Debug));
    debug!("after loosening");
    logger_debug!(logger, "via macro");
    trace!("still filtered");
    assert_eq!(read_to_string(path).unwrap(), "DEBUG after loosening\nDEBUG via macro\n");

    logger.filter().set_min(Severity::Trace);
    trace!("now admitted");
    assert!(read_to_string(path).unwrap().ends_with("TRACE now admitted\n"));
}

#[test]
fn test_global_log_panic_hook() {
    lock_file!();

    let path = "/tmp/format_panic.log";
    let builder = recipe::raw_file_logger_custom(path, Severity::Info, LogFormat::short("%L %M"))
        .test()
        .panic(true);
    clear_test_files(&builder);
    setup_log(builder).expect("setup_log");
    let r = std::panic::catch_unwind(|| {
        panic!("hull breach on deck {}", 7);
    });
    // back to the default hook before anything else can panic
    let _ = std::panic::take_hook();
    assert!(r.is_err());
    let content = read_to_string(path).unwrap();
    assert!(content.starts_with("PANIC panic occur: "), "{}", content);
    assert!(content.contains("hull breach on deck 7"), "{}", content);
}
