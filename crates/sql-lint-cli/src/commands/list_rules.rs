//! List rules command implementation.

use sql_lint::rules::{all_checks, reported_kinds};
use sql_lint::RuleKind;

/// Runs the list-rules command.
pub fn run() {
    let checked = reported_kinds(&all_checks());

    println!("Available rules:\n");
    println!("{:<8} {:<27} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for kind in RuleKind::ALL {
        let marker = if checked.contains(&kind) { "" } else { " (directive)" };
        println!("{:<8} {:<27} {}{marker}", kind.code(), kind.name(), kind.description());
    }

    println!("\nUse --rules to report only specific rules, e.g.:");
    println!("  sql-lint check --rules alias,count-star");
    println!("  sql-lint check --rules SQL007,SQL021");
    println!("\nSuppress rules inside a file with comments:");
    println!("  -- NOLINT(alias, count-star)");
    println!("  -- LINT(alias)");
}
