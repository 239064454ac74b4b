//! Semantic diagnostics
//!
//! Analysis never stops at the first problem. Every violation becomes a
//! [`Diagnostic`] appended to a [`Diagnostics`] sink, in traversal order.

use thiserror::Error;

use super::Span;
use crate::types::Type;

/// Kind of semantic error, with the details needed to explain it
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    #[error("continue statement is not inside a loop")]
    ContinueNotInLoop,

    #[error("break statement is not inside a loop")]
    BreakNotInLoop,

    #[error("'{construct}' requires an arithmetic operand, found {found}")]
    NonArithmeticOperand { construct: String, found: Type },

    #[error("'{construct}' requires a boolean operand, found {found}")]
    NonBooleanOperand { construct: String, found: Type },

    #[error("'{name}' is already declared in this scope")]
    DuplicateDeclaration { name: String, previous: Span },

    #[error("undeclared identifier '{name}'")]
    UndeclaredIdentifier { name: String },

    #[error("type mismatch in {construct}: expected {expected}, found {found}")]
    TypeMismatch {
        construct: String,
        expected: Type,
        found: Type,
    },

    #[error("'{callee}' expects {expected} argument(s), found {found}")]
    WrongArgumentCount {
        callee: String,
        expected: usize,
        found: usize,
    },

    #[error("'{name}' is not a function")]
    NotCallable { name: String },

    #[error("'{name}' is a function, not a variable")]
    NotAVariable { name: String },

    #[error("return statement is not inside a function")]
    ReturnOutsideFunction,

    #[error("function returning {expected} must return a value")]
    MissingReturnValue { expected: Type },

    #[error("procedure cannot return a value")]
    UnexpectedReturnValue,
}

impl DiagnosticKind {
    /// Stable identifier for this kind of error
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::ContinueNotInLoop => "continue_not_in_loop",
            DiagnosticKind::BreakNotInLoop => "break_not_in_loop",
            DiagnosticKind::NonArithmeticOperand { .. } => "non_arithmetic_operand",
            DiagnosticKind::NonBooleanOperand { .. } => "non_boolean_operand",
            DiagnosticKind::DuplicateDeclaration { .. } => "duplicate_declaration",
            DiagnosticKind::UndeclaredIdentifier { .. } => "undeclared_identifier",
            DiagnosticKind::TypeMismatch { .. } => "type_mismatch",
            DiagnosticKind::WrongArgumentCount { .. } => "wrong_argument_count",
            DiagnosticKind::NotCallable { .. } => "not_callable",
            DiagnosticKind::NotAVariable { .. } => "not_a_variable",
            DiagnosticKind::ReturnOutsideFunction => "return_outside_function",
            DiagnosticKind::MissingReturnValue { .. } => "missing_return_value",
            DiagnosticKind::UnexpectedReturnValue => "unexpected_return_value",
        }
    }
}

/// A reported semantic error
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Option<Span>) -> Self {
        Self { kind, span }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// Append-only collection of diagnostics
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            code = diagnostic.code(),
            span = ?diagnostic.span,
            "{}",
            diagnostic.kind
        );
        self.items.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Number of diagnostics with the given code
    pub fn count(&self, code: &str) -> usize {
        self.items.iter().filter(|d| d.code() == code).count()
    }

    /// Codes of all diagnostics, in the order they were reported
    pub fn codes(&self) -> Vec<&'static str> {
        self.items.iter().map(Diagnostic::code).collect()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
