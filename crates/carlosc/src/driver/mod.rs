//! Analysis pipeline orchestration

use crate::ast::Program;
use crate::common::{CompileError, CompileResult, DiagnosticReporter, Diagnostics};
use crate::optimize::Optimizer;
use crate::sema::AnalysisContext;

/// Pipeline options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Run the optimizer on programs that analyze cleanly
    pub optimize: bool,
    /// Remove statements after `break`, `continue` and `return`
    pub eliminate_dead_code: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            optimize: true,
            eliminate_dead_code: true,
        }
    }
}

/// Outcome of analyzing one program
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The program with resolved types cached on its expressions
    pub program: Program,
    pub diagnostics: Diagnostics,
}

impl Analysis {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Print every diagnostic against `file_id`
    pub fn report(&self, reporter: &DiagnosticReporter, file_id: usize) {
        for diagnostic in &self.diagnostics {
            reporter.report(file_id, diagnostic);
        }
    }
}

/// Runs analysis and, for clean programs, optimization
#[derive(Debug, Default)]
pub struct Pipeline {
    config: AnalysisConfig,
}

impl Pipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Analyze a whole program. Always runs to completion; problems are
    /// returned as diagnostics.
    #[tracing::instrument(skip_all, fields(statements = program.statements.len()))]
    pub fn analyze(&self, mut program: Program) -> Analysis {
        let mut ctx = AnalysisContext::new();
        program.analyze(&mut ctx);
        debug_assert_eq!(ctx.scope_depth(), 1, "unbalanced scopes after analysis");
        debug_assert!(!ctx.is_in_loop(), "unbalanced loops after analysis");

        let diagnostics = ctx.into_diagnostics();
        tracing::debug!(errors = diagnostics.len(), "analysis finished");
        Analysis {
            program,
            diagnostics,
        }
    }

    /// Apply the configured rewrites. Only valid on an error-free program.
    #[tracing::instrument(skip_all)]
    pub fn optimize(&self, program: Program) -> Program {
        if !self.config.optimize {
            return program;
        }
        Optimizer::new(self.config.eliminate_dead_code).program(program)
    }

    /// Analyze, then optimize if nothing was reported.
    ///
    /// Any diagnostic fails the compilation; the program is not handed on.
    #[tracing::instrument(skip_all)]
    pub fn compile(&self, program: Program) -> CompileResult<Program> {
        let analysis = self.analyze(program);
        if analysis.has_errors() {
            return Err(CompileError::Analysis(analysis.diagnostics.into_vec()));
        }
        Ok(self.optimize(analysis.program))
    }
}
