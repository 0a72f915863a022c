use std::path::Path;

use serial_cli::report::{details_table, status_line, summary_table};
use serial_core::Comparison;
use serial_model::Side;

use crate::commands::CompareOutcome;

pub fn print_summary(outcome: &CompareOutcome, reference: &Path, measured: &Path, limit: usize) {
    let comparison = &outcome.comparison;
    let result = &comparison.result;
    println!("Reference: {}", reference.display());
    println!("Measured: {}", measured.display());
    println!("{}", summary_table(comparison));
    println!(
        "Match rate: {:.2}% ({} of {} reference serials)",
        result.match_percentage, result.matched_count, result.reference_total
    );
    println!("Status: {}", status_line(result.status()));

    print_details(comparison, Side::Reference, "Missing from measured list", limit);
    print_details(comparison, Side::Measured, "Extra in measured list", limit);

    if let Some(paths) = &outcome.exports {
        println!("Result: {}", paths.result.display());
        println!("Missing list: {}", paths.missing.display());
        println!("Extra list: {}", paths.extra.display());
    }
    for warning in &comparison.warnings {
        eprintln!("warning: {warning}");
    }
}

fn print_details(comparison: &Comparison, side: Side, title: &str, limit: usize) {
    let details = comparison.result.details(side);
    if details.is_empty() || limit == 0 {
        return;
    }
    let shown = details.len().min(limit);
    println!();
    println!("{title} ({shown} of {}):", details.len());
    println!("{}", details_table(details, limit));
}
