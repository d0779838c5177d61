//! Colored terminal output on stderr.
//!
//! Stdout is reserved for `build --stdout`.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red.apply_to(msg).to_string());
    }

    /// Print a section heading (cyan bold).
    pub(crate) fn heading(&self, msg: &str) {
        self.line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print one topic's status line: `  <path> (<label>): <detail>`.
    ///
    /// The marker and detail carry the status color, the label is dimmed.
    pub(crate) fn topic(&self, status: Status, path: &str, label: &str, detail: &str) {
        let (marker, style) = match status {
            Status::Ok => ("✓", &self.green),
            Status::Warn => ("!", &self.yellow),
            Status::Fail => ("✗", &self.red),
        };
        self.line(&format!(
            "  {} {path} {}: {}",
            style.apply_to(marker),
            self.dim.apply_to(format!("({label})")),
            style.apply_to(detail)
        ));
    }
}

/// Severity of a per-topic status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    Ok,
    Warn,
    Fail,
}
