//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Async code in the client crates MUST NOT block the runtime.
//! The session loop shares one task with user input; a blocking call there
//! freezes reconnects, keepalive and rendering together.
//!
//! **Required**: `tokio::time::sleep`, `tokio::fs`, `tokio::net`, `tokio::io`.

use architectural_enforcement::{all_production_lines, SourceLine};

/// Production code never sleeps the thread
#[test]
fn test_no_thread_sleep_in_production_code() {
    let violations: Vec<String> = all_production_lines()
        .iter()
        .filter(|line| line.code.contains("thread::sleep"))
        .map(|line| line.report("Blocking sleep"))
        .collect();

    assert_no_violations("thread::sleep", &violations);
}

/// Async functions never use blocking file, network or console I/O
#[test]
fn test_no_blocking_io_in_async_functions() {
    let violations: Vec<String> = all_production_lines()
        .iter()
        .filter(|line| line.in_async_fn)
        .filter_map(blocking_io_kind)
        .collect();

    assert_no_violations("blocking I/O in async code", &violations);
}

/// Console I/O goes through `tokio::io` everywhere, not only inside `async fn`
///
/// A sync helper called from the event loop blocks it just the same.
#[test]
fn test_no_std_console_io_in_production_code() {
    let violations: Vec<String> = all_production_lines()
        .iter()
        .filter(|line| {
            line.code.contains("std::io::stdin()") || line.code.contains("std::io::stdout()")
        })
        .map(|line| line.report("Blocking stdin/stdout"))
        .collect();

    assert_no_violations("std console I/O", &violations);
}

fn blocking_io_kind(line: &SourceLine) -> Option<String> {
    let code = &line.code;
    let label = if code.contains("std::fs::") {
        "Blocking file I/O"
    } else if code.contains("std::net::") {
        "Blocking network I/O"
    } else if code.contains("std::process::Command") {
        "Blocking process I/O"
    } else if code.contains("reqwest::blocking") {
        "Blocking HTTP client"
    } else if code.contains("std::io::stdin()") || code.contains("std::io::stdout()") {
        "Blocking stdin/stdout"
    } else {
        return None;
    };
    Some(line.report(label))
}

fn assert_no_violations(what: &str, violations: &[String]) {
    if violations.is_empty() {
        return;
    }
    for violation in violations {
        eprintln!("  {violation}");
    }
    panic!(
        "\nFound {} {what} violation(s) in production code.\nFix these before merging!",
        violations.len()
    );
}
