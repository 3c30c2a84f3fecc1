//! Statistics reporting.

use console::style;

use crate::download::BatchSummary;

/// Print statistics for a finished batch.
pub fn print_batch_summary(summary: &BatchSummary) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Download Statistics:").bold());
    println!("  Entries in export: {}", summary.total_records);
    if summary.invalid() > 0 {
        println!(
            "  Missing link/date: {}",
            style(summary.invalid()).yellow()
        );
    }
    println!("  Downloaded:        {}", style(summary.succeeded).green());
    if summary.skipped > 0 {
        println!("  Invalid URL:       {}", style(summary.skipped).yellow());
    }
    if summary.failed > 0 {
        println!("  Failed:            {}", style(summary.failed).red());
    }
    if summary.cancelled {
        println!(
            "  Not attempted:     {} (cancelled)",
            summary.valid - summary.attempted()
        );
    }
    println!("{}", style("═".repeat(50)).dim());
}
