//! Common infrastructure shared across analysis phases

mod diagnostic;
mod error;
mod span;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{CompileError, CompileResult, DiagnosticReporter};
pub use span::Span;
