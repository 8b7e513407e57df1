//! Shared CLI output helpers.
//!
//! Commands print through these so JSON mode, quiet mode and colour are
//! handled in one place. In JSON mode a command prints its result once with
//! [`json_output`]; the line helpers below emit typed JSON lines instead of
//! text so nothing human-oriented leaks onto stdout.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::domain::Money;
use crate::error::Result;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Use ANSI colours.
    pub color: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, color: bool) -> Self {
        Self { json, quiet, color }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(false, false, true)
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

fn plain(config: OutputConfig) -> bool {
    config.json || !config.color
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }
    if plain(config) {
        println!("gaffer {version}");
    } else {
        println!("{} {}", "gaffer".bold(), version.dimmed());
    }
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    let value = value.to_string();

    if config.json {
        emit_json_line("field", json!({ "label": label, "value": value }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    if plain(config) {
        println!("  {label:<16} {value}");
    } else {
        println!("  {:<16} {}", label.dimmed(), value);
    }
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    if plain(config) {
        println!("  ✓ {message}");
    } else {
        println!("  {} {}", "✓".green(), message);
    }
}

/// Print a warning line.
pub fn warning(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }

    if plain(config) {
        println!("  ⚠ {message}");
    } else {
        println!("  {} {}", "⚠".yellow(), message);
    }
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    let config = read_config();

    if config.json {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }

    if plain(config) {
        eprintln!("  × {message}");
    } else {
        eprintln!("  {} {}", "×".red(), message);
    }
}

/// Print a section header.
pub fn section(title: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("section", json!({ "title": title }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!();
    if plain(config) {
        println!("{title}");
    } else {
        println!("{}", title.bold());
    }
}

/// Print a note.
pub fn note(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("note", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {}", muted(message));
}

/// Print a hint with a `hint:` prefix.
pub fn hint(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("hint", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    if plain(config) {
        println!("  hint: {message}");
    } else {
        println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
    }
}

/// Render rows as a table.
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    lines(&table.to_string());
}

/// Print a serializable result as one pretty JSON document.
pub fn json_output<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Braille spinner animation frames.
const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Start a progress spinner on stderr. Hidden in JSON or quiet mode.
pub fn spinner(message: &str) -> indicatif::ProgressBar {
    let config = read_config();
    if config.json || config.quiet {
        let pb = indicatif::ProgressBar::hidden();
        pb.set_message(message.to_string());
        return pb;
    }

    let pb = indicatif::ProgressBar::new_spinner();
    if let Ok(style) = indicatif::ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template("  {spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Clear a finished spinner.
pub fn spinner_done(pb: &indicatif::ProgressBar) {
    pb.finish_and_clear();
}

/// Format a positive value in green.
pub fn positive(value: impl Display) -> String {
    let value = value.to_string();
    if plain(read_config()) {
        return value;
    }
    format!("{}", value.green())
}

/// Format a negative value in red.
pub fn negative(value: impl Display) -> String {
    let value = value.to_string();
    if plain(read_config()) {
        return value;
    }
    format!("{}", value.red())
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if plain(read_config()) {
        return value;
    }
    format!("{}", value.cyan())
}

/// Format a dimmed value.
pub fn muted(value: impl Display) -> String {
    let value = value.to_string();
    if plain(read_config()) {
        return value;
    }
    format!("{}", value.dimmed())
}

/// Projected points with one decimal.
pub fn points(value: f64) -> String {
    format!("{value:.1}")
}

/// Signed points, green when positive and red when negative.
pub fn signed_points(value: f64) -> String {
    let text = format!("{value:+.1}");
    if value > 0.0 {
        positive(text)
    } else if value < 0.0 {
        negative(text)
    } else {
        text
    }
}

/// An amount in tenths as currency, e.g. `5.5m`.
pub fn money(tenths: i64) -> String {
    Money::from_tenths(tenths).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_amounts_and_points() {
        assert_eq!(money(55), "5.5m");
        assert_eq!(money(-15), "-1.5m");
        assert_eq!(points(12.345), "12.3");
    }
}
