//! Semantic analysis module
//!
//! This module performs scope resolution, type checking and control-context
//! validation. Every node exposes `analyze(&mut AnalysisContext)`; findings
//! are recorded in the context and never abort the walk.

mod context;
mod scope;
mod expr;
mod stmt;

pub use context::AnalysisContext;
pub use scope::{DefineError, Entity, EntityKind, ScopeStack};
pub use stmt::analyze_sequence;
