//! Terminal output formatting for the hdl-course CLI.
//!
//! Provides consistent, colored output using the [`console`] crate. Everything goes to
//! stdout except `hdl-course config`, whose JSON must stay machine-readable.

use std::path::Path;

use console::style;

/// Bold cyan command title, underlined to its display width.
pub fn print_header(text: &str) {
    println!("\n{}", style(text).bold().cyan());
    println!("{}", style("=".repeat(console::measure_text_width(text))).dim());
}

pub fn print_success(text: &str) {
    println!("{} {}", style("[OK]").green().bold(), text);
}

pub fn print_warning(text: &str) {
    println!("{} {}", style("[WARN]").yellow().bold(), text);
}

pub fn print_error(text: &str) {
    println!("{} {}", style("[ERROR]").red().bold(), text);
}

/// `[1/2] Loading curriculum...`
pub fn print_step(step: u32, total: u32, text: &str) {
    println!("{} {}", style(format!("[{step}/{total}]")).dim(), text);
}

pub fn print_key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// One drifted file in `check` output, e.g. `  stale    lectures/week1/.../seg2_x.html`.
pub fn print_drift(label: &str, path: &Path) {
    println!("  {:<8} {}", style(label).yellow(), path.display());
}
