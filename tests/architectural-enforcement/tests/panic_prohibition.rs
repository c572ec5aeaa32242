//! Integration Test: Panic Prohibition
//!
//! **Policy**: No error in the chat client is fatal. Production code
//! propagates errors with `?` or reports them; it never calls `unwrap()` or
//! `expect()`. Test modules are exempt.

use architectural_enforcement::all_production_lines;

#[test]
fn test_no_unwrap_or_expect_in_production_code() {
    let violations: Vec<String> = all_production_lines()
        .iter()
        .filter(|line| line.code.contains(".unwrap()") || line.code.contains(".expect("))
        .map(|line| line.report("Panicking call"))
        .collect();

    for violation in &violations {
        eprintln!("  {violation}");
    }
    assert!(
        violations.is_empty(),
        "Found {} unwrap/expect call(s) in production code",
        violations.len()
    );
}
