//! Carlos compiler - semantic analysis core
//!
//! This library validates and annotates an already-parsed Carlos program
//! before it is handed to code generation.
//!
//! ## Architecture
//!
//! The crate is organized into:
//! - **Common** (`common/`): Shared infrastructure (spans, diagnostics, errors)
//! - **Types** (`types/`): Semantic types resolved during analysis
//! - **AST** (`ast/`): Statement and expression trees produced by the parser
//! - **Sema** (`sema/`): Analysis context, scope table and node analysis
//! - **Optimize** (`optimize/`): Constant folding and dead-code removal
//! - **Driver** (`driver/`): Analysis/optimization pipeline

pub mod common;
pub mod types;
pub mod ast;
pub mod sema;
pub mod optimize;
pub mod driver;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, Diagnostic, DiagnosticKind, DiagnosticReporter, Diagnostics, Span};
pub use driver::{Analysis, AnalysisConfig, Pipeline};
pub use optimize::Optimizer;
pub use sema::AnalysisContext;
pub use types::Type;
