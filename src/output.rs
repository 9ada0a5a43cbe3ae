//! Terminal output formatting for the svgstack CLI.
//!
//! Provides Cargo-style status output with right-aligned coloured verbs,
//! gated by the configured verbosity (0 = errors only, 3 = per-file
//! optimizer detail). All status output goes to stderr; stdout is reserved
//! for machine-readable output.

use std::io::{self, IsTerminal, Write};

/// ANSI escape codes.
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour is enabled when stderr is a terminal. Lines carry a verbosity
/// level; anything above the configured level is dropped.
pub struct Printer {
    color: bool,
    verbosity: u8,
}

impl Printer {
    pub fn new(verbosity: u8) -> Self {
        Self {
            color: io::stderr().is_terminal(),
            verbosity: verbosity.min(3),
        }
    }

    /// The configured verbosity (0-3).
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// Print a status line with a green bold verb at verbosity >= 1.
    /// e.g. "   Composing 12 icons (vertical)"
    pub fn status(&self, verb: &str, message: &str) {
        if self.verbosity >= 1 {
            self.print_line(GREEN, verb, message);
        }
    }

    /// Print a per-file detail line with a cyan bold verb at verbosity >= 2.
    pub fn detail(&self, verb: &str, message: &str) {
        if self.verbosity >= 2 {
            self.print_line(CYAN, verb, message);
        }
    }

    /// Print an optimizer trace line at verbosity >= 3.
    pub fn trace(&self, verb: &str, message: &str) {
        if self.verbosity >= 3 {
            self.print_line(CYAN, verb, message);
        }
    }

    /// Print a success/completion line with a green bold verb at verbosity >= 1.
    pub fn success(&self, verb: &str, message: &str) {
        if self.verbosity >= 1 {
            self.print_line(GREEN, verb, message);
        }
    }

    /// Print a warning line with a yellow bold verb. Always shown.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    /// Print an error line with a red bold verb. Always shown.
    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    /// Format a string as dim/grey.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Format a string as cyan (for paths, info).
    pub fn cyan(&self, text: &str) -> String {
        if self.color {
            format!("{CYAN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Format a diagnostic severity label with colour.
    pub fn severity(&self, label: &str, is_error: bool) -> String {
        let color = if is_error { RED } else { YELLOW };
        if self.color {
            format!("{BOLD}{color}{label}{RESET}")
        } else {
            label.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "icon", "icons")` → "1 icon".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

/// Convert a byte count into a human readable size for optimizer traces.
pub fn bytes_to_size(bytes: usize) -> String {
    const KILOBYTE: f64 = 1024.0;
    const MEGABYTE: f64 = KILOBYTE * 1024.0;

    let b = bytes as f64;
    if b < KILOBYTE {
        format!("{} B", bytes)
    } else if b < MEGABYTE {
        format!("{:.1} KB", b / KILOBYTE)
    } else {
        format!("{:.1} MB", b / MEGABYTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_singular() {
        assert_eq!(plural(1, "icon", "icons"), "1 icon");
    }

    #[test]
    fn test_plural_zero() {
        assert_eq!(plural(0, "icon", "icons"), "0 icons");
    }

    #[test]
    fn test_plural_many() {
        assert_eq!(plural(5, "file", "files"), "5 files");
    }

    #[test]
    fn test_display_path_absolute() {
        use std::path::Path;
        // An absolute path outside cwd should stay absolute
        let p = Path::new("/nonexistent/path/to/file");
        assert_eq!(display_path(p), "/nonexistent/path/to/file");
    }

    #[test]
    fn test_bytes_to_size() {
        assert_eq!(bytes_to_size(512), "512 B");
        assert_eq!(bytes_to_size(2048), "2.0 KB");
        assert_eq!(bytes_to_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_printer_verbosity_clamped() {
        let printer = Printer::new(9);
        assert_eq!(printer.verbosity(), 3);
    }
}
