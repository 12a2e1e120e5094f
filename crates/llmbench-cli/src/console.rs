//! Coloured terminal output

use colored::*;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// Print a header
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold().underline());
    println!("{}", "=".repeat(title.chars().count()).dimmed());
}

/// Colour a 0..=1 score by how good it is
pub fn score(value: f64) -> ColoredString {
    let text = format!("{:.2}%", value * 100.0);
    if value >= 0.75 {
        text.green().bold()
    } else if value >= 0.4 {
        text.yellow()
    } else {
        text.red()
    }
}
