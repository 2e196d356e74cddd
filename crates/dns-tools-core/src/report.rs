//! Human-readable run report
//!
//! Pipelines collect plain lines; colors are only applied when the report
//! is rendered.

use std::fmt::Write as _;

const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const RED: &str = "\x1b[91m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Rendering options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    /// Emit ANSI color codes for headings
    pub color: bool,
}

impl Style {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    fn heading(&self, out: &mut String, color: &str, text: &str) {
        if self.color {
            let _ = write!(out, "{color}{BOLD}{text}{RESET}");
        } else {
            out.push_str(text);
        }
    }

    /// `Error: <message>` line for fatal errors on stderr
    pub fn error_line(&self, message: &str) -> String {
        let mut out = String::new();
        self.heading(&mut out, RED, "Error:");
        let _ = write!(out, " {message}");
        out
    }
}

/// Outcome of a download or upload run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// One line per created record value
    pub created: Vec<String>,
    /// Informational lines (unsupported types, skipped sets, rewritten names)
    pub warnings: Vec<String>,
    /// Per-item failures; the run continued past each of them
    pub errors: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&mut self, line: impl Into<String>) {
        self.created.push(line.into());
    }

    pub fn warn(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::warn!("{}", line);
        self.warnings.push(line);
    }

    pub fn error(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::error!("{}", line);
        self.errors.push(line);
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.warnings.is_empty() && self.errors.is_empty()
    }

    /// Render non-empty sections, each preceded by a blank line
    pub fn render(&self, style: Style) -> String {
        let mut out = String::new();
        let sections = [
            (GREEN, "Record sets successfully created:", &self.created),
            (YELLOW, "Warnings:", &self.warnings),
            (RED, "Errors:", &self.errors),
        ];

        for (color, title, lines) in sections {
            if lines.is_empty() {
                continue;
            }
            out.push('\n');
            style.heading(&mut out, color, title);
            out.push('\n');
            for line in lines.iter() {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_renders_nothing() {
        assert_eq!(Report::new().render(Style::plain()), "");
    }

    #[test]
    fn test_sections_in_order_and_skipped_when_empty() {
        let mut report = Report::new();
        report.error("Error while creating record set A for name www: boom");
        report.created("mail;300;A;192.0.2.5");

        let text = report.render(Style::plain());
        assert_eq!(
            text,
            "\nRecord sets successfully created:\nmail;300;A;192.0.2.5\n\
             \nErrors:\nError while creating record set A for name www: boom\n"
        );
        assert!(!text.contains("Warnings:"));
    }

    #[test]
    fn test_colored_heading() {
        let mut report = Report::new();
        report.warn("careful");
        let text = report.render(Style::colored());
        assert!(text.contains("\x1b[93m\x1b[1mWarnings:\x1b[0m"));
    }

    #[test]
    fn test_error_line() {
        assert_eq!(
            Style::plain().error_line("AZURE_TENANT_ID is a required parameter."),
            "Error: AZURE_TENANT_ID is a required parameter."
        );
        assert!(Style::colored().error_line("x").starts_with(RED));
    }
}
