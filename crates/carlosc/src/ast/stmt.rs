//! Statement AST nodes

use super::{Call, Declaration, Expr};
use crate::common::Span;

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// True for statements after which nothing in the same sequence can run
    pub fn is_terminator(&self) -> bool {
        matches!(
            self.kind,
            StmtKind::Break | StmtKind::Continue | StmtKind::Return(_)
        )
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Variable or function declaration
    Declaration(Declaration),

    /// Assignment: x = expr;
    Assign { target: String, value: Expr },

    /// Call statement: f(a, b);
    Call(Call),

    /// Deferred call: after delay call f(a, b);
    ///
    /// Schedules `call` to run once `delay` time units have elapsed and
    /// continues immediately with the next statement.
    After { delay: Expr, call: Call },

    /// Nested block: { ... }
    Block(Block),

    /// Conditional: if (c1) {..} else if (c2) {..} else {..}
    If {
        cases: Vec<IfCase>,
        else_block: Option<Block>,
    },

    /// While loop: while (cond) body
    While { condition: Expr, body: Block },

    /// For loop: for (init; cond; step) body
    For {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        step: Option<Box<Stmt>>,
        body: Block,
    },

    /// Break statement
    Break,

    /// Continue statement
    Continue,

    /// Return statement: return [expr];
    Return(Option<Expr>),
}

/// One `if`/`else if` arm
#[derive(Debug, Clone, PartialEq)]
pub struct IfCase {
    pub condition: Expr,
    pub body: Block,
}

impl IfCase {
    pub fn new(condition: Expr, body: Block) -> Self {
        Self { condition, body }
    }
}

/// Block (compound statement); opens a scope
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(statements: Vec<Stmt>, span: Span) -> Self {
        Self { statements, span }
    }

    pub fn empty(span: Span) -> Self {
        Self::new(Vec::new(), span)
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
