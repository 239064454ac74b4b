//! Terse tree constructors for tests

use super::*;
use crate::common::Span;
use crate::types::Type;

fn sp() -> Span {
    Span::default()
}

pub fn int(value: i64) -> Expr {
    Expr::new(ExprKind::IntLiteral(value), sp())
}

pub fn real(value: f64) -> Expr {
    Expr::new(ExprKind::RealLiteral(value), sp())
}

pub fn boolean(value: bool) -> Expr {
    Expr::new(ExprKind::BoolLiteral(value), sp())
}

pub fn string(value: &str) -> Expr {
    Expr::new(ExprKind::StringLiteral(value.to_string()), sp())
}

pub fn ident(name: &str) -> Expr {
    Expr::new(ExprKind::Identifier(name.to_string()), sp())
}

pub fn bin(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        sp(),
    )
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        sp(),
    )
}

pub fn call(callee: &str, args: Vec<Expr>) -> Call {
    Call::new(callee, args, sp())
}

pub fn call_expr(callee: &str, args: Vec<Expr>) -> Expr {
    Expr::new(ExprKind::Call(call(callee, args)), sp())
}

pub fn stmt(kind: StmtKind) -> Stmt {
    Stmt::new(kind, sp())
}

pub fn call_stmt(callee: &str, args: Vec<Expr>) -> Stmt {
    stmt(StmtKind::Call(call(callee, args)))
}

pub fn after(delay: Expr, call: Call) -> Stmt {
    stmt(StmtKind::After { delay, call })
}

pub fn continue_stmt() -> Stmt {
    stmt(StmtKind::Continue)
}

pub fn break_stmt() -> Stmt {
    stmt(StmtKind::Break)
}

pub fn ret(value: Option<Expr>) -> Stmt {
    stmt(StmtKind::Return(value))
}

pub fn assign(target: &str, value: Expr) -> Stmt {
    stmt(StmtKind::Assign {
        target: target.to_string(),
        value,
    })
}

pub fn block(statements: Vec<Stmt>) -> Block {
    Block::new(statements, sp())
}

pub fn block_stmt(statements: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::Block(block(statements)))
}

pub fn while_loop(condition: Expr, body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::While {
        condition,
        body: block(body),
    })
}

pub fn for_loop(init: Option<Stmt>, condition: Option<Expr>, step: Option<Stmt>, body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::For {
        init: init.map(Box::new),
        condition,
        step: step.map(Box::new),
        body: block(body),
    })
}

pub fn if_stmt(cases: Vec<(Expr, Vec<Stmt>)>, else_block: Option<Vec<Stmt>>) -> Stmt {
    stmt(StmtKind::If {
        cases: cases
            .into_iter()
            .map(|(condition, body)| IfCase::new(condition, block(body)))
            .collect(),
        else_block: else_block.map(block),
    })
}

pub fn var(name: &str, ty: Type, init: Option<Expr>) -> Stmt {
    stmt(StmtKind::Declaration(Declaration::new(
        DeclKind::Variable(VarDecl {
            name: name.to_string(),
            ty,
            init,
        }),
        sp(),
    )))
}

pub fn func(name: &str, params: Vec<(&str, Type)>, return_type: Type, body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::Declaration(Declaration::new(
        DeclKind::Function(FuncDecl {
            name: name.to_string(),
            params: params
                .into_iter()
                .map(|(name, ty)| Param::new(name, ty, sp()))
                .collect(),
            return_type,
            body: block(body),
        }),
        sp(),
    )))
}

pub fn program(statements: Vec<Stmt>) -> Program {
    Program::new(statements)
}
