//! Diagnostic rendering backends.

use crate::diagnostic::Diagnostic;

/// Formats a diagnostic into an output string.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic.
    fn render(&self, diag: &Diagnostic) -> String;

    /// Renders a list of diagnostics, one after another.
    fn render_all(&self, diags: &[Diagnostic]) -> String {
        diags.iter().map(|d| self.render(d)).collect()
    }
}

/// Renders diagnostics in a rustc-style terminal format:
///
/// ```text
/// warning[W302]: tri-state target `bus` has a single driver but no else-flow
///   --> alu0/TristateConc
///    = note: ...
///    = help: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to wrap the header in ANSI color codes.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let head = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return head;
        }
        let color = match diag.severity {
            crate::Severity::Error => "31",
            crate::Severity::Warning => "33",
            crate::Severity::Note => "36",
        };
        format!("\x1b[1;{color}m{head}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}: {}\n", self.header(diag), diag.message);
        if let Some(origin) = &diag.origin {
            out.push_str(&format!("  --> {origin}\n"));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};

    #[test]
    fn render_with_origin_and_notes() {
        let diag = Diagnostic::warning(DiagnosticCode::new(Category::Warning, 301), "skipped")
            .with_origin("alu0/TristateConc")
            .with_note("no neutral don't-care entry")
            .with_help("add a don't-care neutral flow");
        let out = TerminalRenderer::new(false).render(&diag);
        assert!(out.starts_with("warning[W301]: skipped\n"));
        assert!(out.contains("  --> alu0/TristateConc\n"));
        assert!(out.contains("= note: no neutral don't-care entry"));
        assert!(out.contains("= help: add a don't-care neutral flow"));
    }

    #[test]
    fn render_without_origin() {
        let diag = Diagnostic::error(DiagnosticCode::new(Category::Error, 999), "general");
        let out = TerminalRenderer::new(false).render(&diag);
        assert_eq!(out, "error[E999]: general\n");
    }

    #[test]
    fn color_wraps_header_only() {
        let diag = Diagnostic::note(DiagnosticCode::new(Category::Note, 401), "built");
        let out = TerminalRenderer::new(true).render(&diag);
        assert!(out.starts_with("\x1b[1;36mnote[N401]\x1b[0m: built"));
    }

    #[test]
    fn render_all_concatenates() {
        let a = Diagnostic::note(DiagnosticCode::new(Category::Note, 1), "a");
        let b = Diagnostic::note(DiagnosticCode::new(Category::Note, 2), "b");
        let out = TerminalRenderer::new(false).render_all(&[a, b]);
        assert_eq!(out, "note[N001]: a\nnote[N002]: b\n");
    }
}
