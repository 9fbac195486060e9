use super::utils::*;
use crate::*;
use chrono::FixedOffset;
use rstest::*;

fn render(template: &str, grammar: Grammar, r: &LogRecord) -> String {
    let mut f = StdFormatter::new(template, grammar);
    String::from_utf8(f.format(r).to_vec()).unwrap()
}

#[test]
fn test_short_all_verbs() {
    let r = test_record("hello there!");
    assert_eq!(
        render("%p-%P [%D]%%[%d]%%[%T][%t] [%L:%l:%F:%f:%x:%s] %%%M%%", Grammar::Short, &r),
        "func-pkg.func [2014-01-08]%[2014/01/08]%[18:27:14.123456][18:27:14] \
         [PANIC:PANC:/path/to/testing.go:testing.go:testing:391] %hello there!%\n"
    );
}

#[test]
fn test_named_all_verbs() {
    let r = test_record("hello there!");
    assert_eq!(
        render(
            "%{Date} %{Time} %{FullFile} %{File} %{ShortFile}:%{Line} %{FullFunction} %{Function} %{Message}",
            Grammar::Named,
            &r
        ),
        "2014-01-08 18:27:14 /path/to/testing.go testing.go testing:391 pkg.func func hello there!\n"
    );
}

#[rstest]
#[case("%{Date} %{Time} %{Message}", Grammar::Named, "2014-01-08 18:27:14 hello there!\n")]
#[case("%L", Grammar::Short, "PANIC\n")]
#[case("%notsupported", Grammar::Short, "%notsupported\n")]
#[case("%{notsupported} %{Message}", Grammar::Named, "%{notsupported} hello there!\n")]
#[case("%f", Grammar::Short, "testing.go\n")]
#[case("%x", Grammar::Short, "testing\n")]
#[case("", Grammar::Short, "")]
#[case("", Grammar::Named, "")]
#[case("no verbs here", Grammar::Short, "no verbs here\n")]
#[case("no verbs here\n", Grammar::Named, "no verbs here\n")]
#[case("100%%", Grammar::Short, "100%\n")]
#[case("100%%", Grammar::Named, "100%\n")]
#[case("trailing %", Grammar::Short, "trailing %\n")]
#[case("%{Unix} %{UnixNano}", Grammar::Named, "1389205634 1389205634123456000\n")]
fn test_render_cases(#[case] template: &str, #[case] grammar: Grammar, #[case] expected: &str) {
    let r = test_record("hello there!");
    assert_eq!(render(template, grammar, &r), expected);
}

#[rstest]
#[case(Severity::None, "NONE|None|none|NONE|None|none|N|n\n")]
#[case(Severity::Trace, "TRACE|Trace|trace|TRAC|Trac|trac|T|t\n")]
#[case(Severity::Info, "INFO|Info|info|INFO|Info|info|I|i\n")]
#[case(Severity::Error, "ERROR|Error|error|EROR|Eror|eror|E|e\n")]
#[case(Severity::Critical, "CRITICAL|Critical|critical|CRIT|Crit|crit|C|c\n")]
#[case(Severity::Stack, "STACK|Stack|stack|STAK|Stak|stak|S|s\n")]
#[case(Severity::Panic, "PANIC|Panic|panic|PANC|Panc|panc|P|p\n")]
fn test_severity_spellings(#[case] sev: Severity, #[case] expected: &str) {
    let r = LogRecord::new(test_time(), sev, "");
    assert_eq!(
        render(
            "%{SEVERITY}|%{Severity}|%{severity}|%{SEV}|%{Sev}|%{sev}|%{S}|%{s}",
            Grammar::Named,
            &r
        ),
        expected
    );
}

#[test]
fn test_missing_location() {
    let r = LogRecord::new(test_time(), Severity::Info, "bare");
    assert_eq!(render("%F %f %x %s [%P] %M", Grammar::Short, &r), "??? ??? ??? 0 [] bare\n");
}

#[rstest]
#[case("github.com/user/pkg.Func", "pkg.Func", "Func")]
#[case("captains_format::tests::test_format", "captains_format::tests::test_format", "test_format")]
#[case("main", "main", "main")]
fn test_function_stripping(#[case] function: &str, #[case] pkg: &str, #[case] bare: &str) {
    let r = LogRecord::new(test_time(), Severity::Info, "").with_function(function);
    assert_eq!(render("%{PkgFunction}", Grammar::Named, &r), format!("{}\n", pkg));
    assert_eq!(render("%p", Grammar::Short, &r), format!("{}\n", bare));
}

#[rstest]
#[case("src/main.rs", "main")]
#[case("lib.go", "lib")]
#[case("a.c", "")]
#[case("ab", "ab")]
fn test_short_file_suffix(#[case] file: &str, #[case] expected: &str) {
    let r = LogRecord::new(test_time(), Severity::Info, "").with_location(file, 1);
    assert_eq!(render("[%x]", Grammar::Short, &r), format!("[{}]\n", expected));
}

#[test]
fn test_local_offset() {
    let t = test_time().with_timezone(&FixedOffset::east_opt(8 * 3600).unwrap());
    let r = LogRecord::new(t, Severity::Info, "");
    assert_eq!(render("%D %t", Grammar::Short, &r), "2014-01-09 02:27:14\n");
    // the epoch does not move with the offset
    assert_eq!(render("%{Unix}", Grammar::Named, &r), "1389205634\n");
}

#[test]
fn test_safe_message() {
    let r = test_record("a\tb\x01c\n");
    assert_eq!(render("%{SafeMessage}", Grammar::Named, &r), "a\\x09b\\x01c\\x0a\n");
    assert_eq!(render("%{Message}", Grammar::Named, &r), "a\tb\x01c\n");

    let mut f = StdFormatter::new("[%{SafeMessage}]", Grammar::Named);
    assert_eq!(
        f.format(&LogRecord::new(test_time(), Severity::Info, format_args!("{}\x1b{}", 1, 2))),
        b"[1\\x1b2]\n"
    );
}

#[test]
fn test_message_args() {
    let mut f = StdFormatter::new("%l %M", Grammar::Short);
    assert_eq!(
        f.format(&LogRecord::new(test_time(), Severity::Warn, format_args!("{} of {}", 7, 9))),
        b"WARN 7 of 9\n"
    );
    // reuse of the same buffers
    assert_eq!(f.format(&LogRecord::new(test_time(), Severity::Debug, "x")), b"DEBG x\n");
}

#[test]
fn test_color() {
    let r = test_record("hot");
    assert_eq!(
        render("%{Color red}%{Message}%{Color reset}", Grammar::Named, &r),
        "\x1b[0;31mhot\x1b[0m\n"
    );
    assert_eq!(render("%{Color nope}%{Message}", Grammar::Named, &r), "hot\n");
}

#[test]
fn test_glog() {
    let mut f = GlogFormatter::new();
    assert!(f.should_capture_location());
    assert_eq!(
        f.format(&test_record("hello there!")),
        b"P0108 18:27:14.123456 01234 testing.go:391] hello there!\n"
    );
    assert_eq!(
        f.format(&test_record("hello there!").with_pid(1234567)),
        b"P0108 18:27:14.123456 1234567 testing.go:391] hello there!\n"
    );
    assert_eq!(f.format(&test_record("")), b"P0108 18:27:14.123456 01234 testing.go:391] ");

    let r = LogRecord::new(test_time(), Severity::Warn, "done\n").with_pid(7);
    assert_eq!(f.format(&r), b"W0108 18:27:14.123456 00007 ???:0] done\n");
}

#[test]
fn test_compile_idempotent_render() {
    let template = "%{Date} %{SEV} %{File}:%{Line} %{Message}";
    let a = CompiledFormat::compile(template, Grammar::Named);
    let b = CompiledFormat::compile(template, Grammar::Named);
    let mut fa = StdFormatter::from_compiled(a);
    let mut fb = StdFormatter::from_compiled(b);
    let r = test_record("same");
    assert_eq!(fa.format(&r), fb.format(&r));
    assert_eq!(fa.compiled().template(), template);
}

#[test]
fn test_location_flag() {
    assert!(!StdFormatter::new("%D %T %L %M", Grammar::Short).should_capture_location());
    assert!(StdFormatter::new("%D %s %M", Grammar::Short).should_capture_location());
    assert!(!StdFormatter::new("%{Color red}%{Message}", Grammar::Named).should_capture_location());
    assert!(StdFormatter::new("%{PkgFunction}", Grammar::Named).should_capture_location());
    assert!(LogFormat::Glog.build().should_capture_location());
}

#[test]
fn test_severity_monotonic() {
    for t in Severity::iter() {
        let filter = SeverityFilter::threshold(t);
        for a in Severity::iter() {
            for b in Severity::iter().filter(|b| *b >= a) {
                if filter.admits(a) {
                    assert!(filter.admits(b), "{} admits {} but not {}", t, a, b);
                }
            }
        }
    }
}
