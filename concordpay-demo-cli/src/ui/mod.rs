//! Terminal UI utilities

use colored::Colorize;
use concordpay_lib::PaymentOutcome;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print a section header
pub fn header(text: &str) {
    println!("\n{}", text.bold().underline());
}

/// Print a key-value pair
pub fn key_value(key: &str, value: &str) {
    println!("  {}: {}", key.cyan(), value);
}

/// Print a separator line
pub fn separator() {
    println!("{}", "─".repeat(60).dimmed());
}

/// Print JSON prettily
pub fn json(value: &serde_json::Value) {
    if let Ok(pretty) = serde_json::to_string_pretty(value) {
        println!("{}", pretty);
    }
}

/// Print a payment outcome, colored by how final it is
pub fn outcome(outcome: &PaymentOutcome) {
    let label = outcome.as_str();
    let label = if label.is_empty() { "<missing>" } else { label };
    let rendered = if outcome.is_approved() {
        label.green().bold()
    } else if outcome.is_transient() {
        label.yellow().bold()
    } else if outcome.is_final() {
        label.red().bold()
    } else {
        label.magenta().bold()
    };
    println!("  {}: {}", "Outcome".cyan(), rendered);
}

/// Mask a secret for display, keeping only its length
pub fn masked(secret_len: usize) -> String {
    if secret_len == 0 {
        "(not set)".dimmed().to_string()
    } else {
        format!("{} ({} bytes)", "*".repeat(secret_len.min(8)), secret_len)
    }
}
