//! Abstract Syntax Tree definitions
//!
//! Trees are built by the parser and handed to analysis as-is. Analysis
//! only writes the resolved type cached on each [`Expr`].

mod expr;
mod stmt;
mod decl;

#[cfg(test)]
pub(crate) mod build;

pub use expr::*;
pub use stmt::*;
pub use decl::*;

/// A complete compilation unit
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}
