//! Colored terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Command results go to stdout; diagnostics go to stderr.
pub(crate) struct Output {
    out: Term,
    err: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    /// Print a result line to stdout.
    pub(crate) fn line(&self, msg: &str) {
        let _ = self.out.write_line(msg);
    }

    /// Print a result line to stdout, dimmed.
    pub(crate) fn muted(&self, msg: &str) {
        let _ = self.out.write_line(&self.dim.apply_to(msg).to_string());
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.err.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.err.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.err.write_line(&self.red.apply_to(msg).to_string());
    }
}
