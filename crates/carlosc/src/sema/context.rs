//! Analysis context
//!
//! The single piece of mutable state threaded through an analysis pass:
//! the scope stack, the loop nesting depth, the return type of the
//! enclosing function and the diagnostics collected so far.

use crate::common::{Diagnostic, DiagnosticKind, Diagnostics, Span};
use crate::types::Type;

use super::scope::{DefineError, Entity, ScopeStack};

/// Per-compilation analysis state
#[derive(Debug, Default)]
pub struct AnalysisContext {
    scopes: ScopeStack,
    loop_depth: usize,
    function_return: Option<Type>,
    diagnostics: Diagnostics,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Scopes ==========

    pub fn enter_scope(&mut self) {
        self.scopes.push();
        tracing::trace!(depth = self.scopes.depth(), "enter scope");
    }

    pub fn exit_scope(&mut self) {
        let popped = self.scopes.pop();
        debug_assert!(popped, "exit_scope without matching enter_scope");
        tracing::trace!(depth = self.scopes.depth(), "exit scope");
    }

    /// Run `f` inside a fresh scope frame. The frame is popped when `f`
    /// returns, whatever it reported.
    pub fn in_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.enter_scope();
        let result = f(self);
        self.exit_scope();
        result
    }

    /// Number of scope frames, including the global one
    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    /// Declare `name` in the innermost frame. A redeclaration is reported
    /// and the first declaration is kept. Returns whether it was inserted.
    pub fn declare(&mut self, name: &str, entity: Entity) -> bool {
        let span = entity.span;
        match self.scopes.define(name, entity) {
            Ok(()) => true,
            Err(DefineError::AlreadyDefined { previous }) => {
                self.error(
                    DiagnosticKind::DuplicateDeclaration {
                        name: name.to_string(),
                        previous,
                    },
                    span,
                );
                false
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Entity> {
        self.scopes.lookup(name)
    }

    pub fn lookup_local(&self, name: &str) -> Option<&Entity> {
        self.scopes.lookup_local(name)
    }

    /// Look up `name`, reporting `undeclared_identifier` if it is missing
    pub fn resolve(&mut self, name: &str, span: Span) -> Option<Entity> {
        let entity = self.scopes.lookup(name).cloned();
        if entity.is_none() {
            self.error(
                DiagnosticKind::UndeclaredIdentifier {
                    name: name.to_string(),
                },
                span,
            );
        }
        entity
    }

    // ========== Loops ==========

    pub fn enter_loop(&mut self) {
        self.loop_depth += 1;
        tracing::trace!(depth = self.loop_depth, "enter loop");
    }

    pub fn exit_loop(&mut self) {
        debug_assert!(self.loop_depth > 0, "exit_loop without matching enter_loop");
        self.loop_depth = self.loop_depth.saturating_sub(1);
        tracing::trace!(depth = self.loop_depth, "exit loop");
    }

    /// Run `f` one loop level deeper
    pub fn in_loop<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.enter_loop();
        let result = f(self);
        self.exit_loop();
        result
    }

    pub fn is_in_loop(&self) -> bool {
        self.loop_depth > 0
    }

    pub fn loop_depth(&self) -> usize {
        self.loop_depth
    }

    // ========== Functions ==========

    /// Run `f` as the body of a function returning `return_type`.
    ///
    /// Loops enclosing the function declaration are not visible from its
    /// body, so the loop depth restarts at zero.
    pub fn in_function<R>(&mut self, return_type: Type, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved_return = self.function_return.replace(return_type);
        let saved_loops = std::mem::take(&mut self.loop_depth);
        let result = f(self);
        self.loop_depth = saved_loops;
        self.function_return = saved_return;
        result
    }

    /// Return type of the innermost enclosing function, if any
    pub fn function_return_type(&self) -> Option<&Type> {
        self.function_return.as_ref()
    }

    // ========== Diagnostics ==========

    /// Record a semantic error. Never aborts analysis.
    pub fn error(&mut self, kind: DiagnosticKind, span: impl Into<Option<Span>>) {
        self.diagnostics.push(Diagnostic::new(kind, span.into()));
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}
