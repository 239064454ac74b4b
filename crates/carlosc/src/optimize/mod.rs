//! Tree-level optimization
//!
//! Runs after a clean analysis and produces a semantically equivalent,
//! simpler tree:
//! - constant folding of every expression (see [`fold`])
//! - pruning of `if`/`while`/`for` branches with constant conditions
//! - removal of unreachable statements after `break`, `continue` and
//!   `return`
//!
//! Each pass reaches its fixed point in one application, so optimizing an
//! optimized tree returns it unchanged.

mod fold;

use crate::ast::{Block, DeclKind, Declaration, IfCase, Program, Stmt, StmtKind};
use crate::common::Span;

/// Which rewrites to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Optimizer {
    /// Remove statements following `break`, `continue` or `return`
    pub eliminate_dead_code: bool,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self {
            eliminate_dead_code: true,
        }
    }
}

impl Optimizer {
    pub fn new(eliminate_dead_code: bool) -> Self {
        Self { eliminate_dead_code }
    }

    pub fn program(&self, program: Program) -> Program {
        Program::new(self.sequence(program.statements))
    }

    pub fn block(&self, block: Block) -> Block {
        Block::new(self.sequence(block.statements), block.span)
    }

    /// Optimize each statement, then drop what cannot run or does nothing
    fn sequence(&self, statements: Vec<Stmt>) -> Vec<Stmt> {
        let mut result = Vec::with_capacity(statements.len());
        let mut rest = statements.into_iter();
        while let Some(stmt) = rest.next() {
            let terminates = self.eliminate_dead_code && stmt.is_terminator();
            self.push(stmt, &mut result);
            if !terminates {
                continue;
            }

            let tail: Vec<Stmt> = rest.by_ref().collect();
            // A function declared after the jump is callable from the whole
            // sequence, and its body may use any declaration that precedes
            // it, so the tail is kept as is.
            if tail.iter().any(is_function) {
                for stmt in tail {
                    self.push(stmt, &mut result);
                }
            } else if !tail.is_empty() {
                tracing::trace!(count = tail.len(), "dropped unreachable statements");
            }
            break;
        }
        result
    }

    fn push(&self, stmt: Stmt, result: &mut Vec<Stmt>) {
        let stmt = self.stmt(stmt);
        if !matches!(&stmt.kind, StmtKind::Block(block) if block.is_empty()) {
            result.push(stmt);
        }
    }

    pub fn stmt(&self, stmt: Stmt) -> Stmt {
        let span = stmt.span;
        let kind = match stmt.kind {
            StmtKind::Declaration(mut decl) => {
                decl.kind = match decl.kind {
                    DeclKind::Variable(mut var) => {
                        var.init = var.init.map(|init| init.fold());
                        DeclKind::Variable(var)
                    }
                    DeclKind::Function(mut func) => {
                        func.body = self.block(func.body);
                        DeclKind::Function(func)
                    }
                };
                StmtKind::Declaration(decl)
            }

            StmtKind::Assign { target, value } => StmtKind::Assign {
                target,
                value: value.fold(),
            },

            StmtKind::Call(call) => StmtKind::Call(call.fold()),

            StmtKind::After { delay, call } => StmtKind::After {
                delay: delay.fold(),
                call: call.fold(),
            },

            StmtKind::Block(block) => StmtKind::Block(self.block(block)),

            StmtKind::If { cases, else_block } => self.if_chain(cases, else_block, span),

            StmtKind::While { condition, body } => {
                let condition = condition.fold();
                if condition.as_bool() == Some(false) {
                    StmtKind::Block(Block::empty(span))
                } else {
                    StmtKind::While {
                        condition,
                        body: self.block(body),
                    }
                }
            }

            StmtKind::For {
                init,
                condition,
                step,
                body,
            } => {
                let condition = condition.map(|c| c.fold());
                let init = init.map(|init| Box::new(self.stmt(*init)));
                if condition.as_ref().and_then(|c| c.as_bool()) == Some(false) {
                    // The initializer still runs once, in its own scope
                    let statements = init.map(|init| vec![*init]).unwrap_or_default();
                    StmtKind::Block(Block::new(statements, span))
                } else {
                    StmtKind::For {
                        init,
                        condition,
                        step: step.map(|step| Box::new(self.stmt(*step))),
                        body: self.block(body),
                    }
                }
            }

            kind @ (StmtKind::Break | StmtKind::Continue) => kind,

            StmtKind::Return(value) => StmtKind::Return(value.map(|v| v.fold())),
        };
        Stmt::new(kind, span)
    }

    fn if_chain(&self, cases: Vec<IfCase>, else_block: Option<Block>, span: Span) -> StmtKind {
        let mut kept = Vec::with_capacity(cases.len());
        for case in cases {
            let condition = case.condition.fold();
            match condition.as_bool() {
                Some(false) => continue,
                Some(true) if kept.is_empty() => {
                    // Always taken: later arms and the else branch are dead
                    return StmtKind::Block(self.block(case.body));
                }
                Some(true) => {
                    kept.push(IfCase::new(condition, self.block(case.body)));
                    return StmtKind::If {
                        cases: kept,
                        else_block: None,
                    };
                }
                None => kept.push(IfCase::new(condition, self.block(case.body))),
            }
        }

        let else_block = else_block.map(|block| self.block(block));
        if kept.is_empty() {
            return StmtKind::Block(else_block.unwrap_or_else(|| Block::empty(span)));
        }
        StmtKind::If {
            cases: kept,
            else_block,
        }
    }
}

fn is_function(stmt: &Stmt) -> bool {
    matches!(
        stmt.kind,
        StmtKind::Declaration(Declaration {
            kind: DeclKind::Function(_),
            ..
        })
    )
}

impl Program {
    /// Optimize with every rewrite enabled
    pub fn optimize(self) -> Program {
        Optimizer::default().program(self)
    }
}

impl Block {
    pub fn optimize(self) -> Block {
        Optimizer::default().block(self)
    }
}

impl Stmt {
    /// Return an equivalent, possibly simpler statement.
    ///
    /// Pure function of the node; only valid once analysis reported no
    /// errors.
    pub fn optimize(self) -> Stmt {
        Optimizer::default().stmt(self)
    }
}
