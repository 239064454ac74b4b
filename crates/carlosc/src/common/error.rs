//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic as Report, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};
use thiserror::Error;

use super::{Diagnostic, DiagnosticKind};

/// Pipeline-level failure
#[derive(Error, Debug)]
pub enum CompileError {
    /// Analysis completed but found errors; code generation must not run
    #[error("semantic analysis failed with {} error(s)", .0.len())]
    Analysis(Vec<Diagnostic>),
}

impl CompileError {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            CompileError::Analysis(diagnostics) => diagnostics,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

impl Diagnostic {
    /// Convert to a codespan diagnostic for the given file
    pub fn to_report(&self, file_id: usize) -> Report<usize> {
        let mut labels = Vec::new();
        if let Some(span) = self.span {
            labels.push(Label::primary(file_id, span).with_message(self.code()));
        }
        if let DiagnosticKind::DuplicateDeclaration { previous, .. } = &self.kind {
            labels.push(Label::secondary(file_id, *previous).with_message("first declared here"));
        }

        Report::error()
            .with_code(self.code())
            .with_message(self.kind.to_string())
            .with_labels(labels)
    }
}

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Print one diagnostic to stderr
    pub fn report(&self, file_id: usize, diagnostic: &Diagnostic) {
        let mut writer = self.writer.lock();
        self.emit(&mut writer, file_id, diagnostic);
    }

    /// Render diagnostics to plain text without colour codes
    pub fn render(&self, file_id: usize, diagnostics: &[Diagnostic]) -> String {
        let mut buffer = NoColor::new(Vec::new());
        for diagnostic in diagnostics {
            self.emit(&mut buffer, file_id, diagnostic);
        }
        String::from_utf8_lossy(&buffer.into_inner()).into_owned()
    }

    fn emit(&self, writer: &mut dyn WriteColor, file_id: usize, diagnostic: &Diagnostic) {
        let report = diagnostic.to_report(file_id);
        if let Err(e) = term::emit(writer, &self.config, &self.files, &report) {
            tracing::warn!(error = %e, "failed to emit diagnostic");
        }
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Span;

    #[test]
    fn test_render_includes_code_and_message() {
        let source = "continue;\n";
        let mut reporter = DiagnosticReporter::new();
        let file_id = reporter.add_file("main.carlos", source);

        let diagnostic = Diagnostic::new(DiagnosticKind::ContinueNotInLoop, Some(Span::new(0, 8)));
        let text = reporter.render(file_id, &[diagnostic]);

        assert!(text.contains("error[continue_not_in_loop]"));
        assert!(text.contains("continue statement is not inside a loop"));
        assert!(text.contains("main.carlos"));
    }

    #[test]
    fn test_render_duplicate_points_at_first_declaration() {
        let source = "int x;\nint x;\n";
        let mut reporter = DiagnosticReporter::new();
        let file_id = reporter.add_file("dup.carlos", source);

        let diagnostic = Diagnostic::new(
            DiagnosticKind::DuplicateDeclaration {
                name: "x".into(),
                previous: Span::new(0, 6),
            },
            Some(Span::new(7, 13)),
        );
        let text = reporter.render(file_id, &[diagnostic]);

        assert!(text.contains("first declared here"));
    }

    #[test]
    fn test_render_without_span() {
        let mut reporter = DiagnosticReporter::new();
        let file_id = reporter.add_file("empty.carlos", "");

        let diagnostic = Diagnostic::new(DiagnosticKind::ReturnOutsideFunction, None);
        let text = reporter.render(file_id, &[diagnostic]);

        assert!(text.contains("return statement is not inside a function"));
    }

    #[test]
    fn test_compile_error_message() {
        let error = CompileError::Analysis(vec![
            Diagnostic::new(DiagnosticKind::BreakNotInLoop, None),
            Diagnostic::new(DiagnosticKind::ContinueNotInLoop, None),
        ]);
        assert_eq!(error.to_string(), "semantic analysis failed with 2 error(s)");
        assert_eq!(error.diagnostics().len(), 2);
    }
}
