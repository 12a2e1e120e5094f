//! `llmbench list`

use anyhow::Result;
use colored::*;
use llmbench_eval::BenchmarkKind;

/// Print every benchmark this build can run
pub fn list() -> Result<()> {
    println!("Available benchmarks:\n");
    println!("{:<12} {:<7} {}", "Name", "k-shot", "Scoring");
    println!("{:-<80}", "");

    for kind in BenchmarkKind::all() {
        println!(
            "{} {:<7} {}",
            format!("{:<12}", kind.name()).bold(),
            kind.default_k_shot(),
            kind.description()
        );
    }

    println!("\nTotal: {} benchmarks", BenchmarkKind::all().len());
    Ok(())
}
