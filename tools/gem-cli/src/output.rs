//! Terminal output for the `gems` CLI.
//!
//! In `--json` mode only JSON documents reach stdout; every human-oriented
//! helper is silent.

use std::time::Duration;

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn human(&self) -> bool {
        !self.json
    }

    fn stdout(&self, mark: StyledObject<&str>, msg: &str) {
        if self.human() {
            println!("{} {}", mark, msg);
        }
    }

    fn stderr(&self, mark: StyledObject<&str>, msg: &str) {
        if self.human() {
            eprintln!("{} {}", mark, msg);
        }
    }

    pub fn info(&self, msg: &str) {
        self.stdout(style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.stdout(style("✓").green(), msg);
    }

    pub fn warn(&self, msg: &str) {
        self.stderr(style("⚠").yellow(), msg);
    }

    /// Errors are reported in JSON mode too, as `{"error": ...}` on stderr.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.stderr(style("→").dim(), &style(msg).dim().to_string());
        }
    }

    pub fn header(&self, title: &str) {
        if self.human() {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Pretty-print a JSON document to stdout.
    pub fn json<T: serde::Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "failed to serialize output"),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.human() {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        self.stdout(style("  •").dim(), item);
    }

    pub fn table_header(&self, cols: &[&str], widths: &[usize]) {
        if self.human() {
            println!("  {}", style(pad_columns(cols, widths)).bold());
        }
    }

    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.human() {
            println!("  {}", pad_columns(cols, widths));
        }
    }

    /// Spinner shown while the catalog loads; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

fn pad_columns(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths)
        .map(|(col, width)| format!("{:width$}", col, width = width))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Colored badge for a load state.
pub fn state_badge(state: &str) -> String {
    match state {
        "ready" => style(state).green().to_string(),
        "loading" => style(state).yellow().to_string(),
        "failed" => style(state).red().to_string(),
        "empty" => style(state).dim().to_string(),
        _ => state.to_string(),
    }
}

/// Cut `text` to at most `width` characters, marking the cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
