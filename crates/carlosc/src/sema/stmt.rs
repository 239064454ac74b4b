//! Statement analysis

use crate::ast::{Block, DeclKind, Declaration, Expr, FuncDecl, Program, Stmt, StmtKind, VarDecl};
use crate::common::{DiagnosticKind, Span};
use crate::types::Type;

use super::{AnalysisContext, Entity};

impl Program {
    /// Analyze every top-level statement in the global frame
    pub fn analyze(&mut self, ctx: &mut AnalysisContext) {
        analyze_sequence(&mut self.statements, ctx);
    }
}

impl Block {
    /// Analyze the block's statements in a new scope
    pub fn analyze(&mut self, ctx: &mut AnalysisContext) {
        ctx.in_scope(|ctx| analyze_sequence(&mut self.statements, ctx));
    }
}

/// Analyze a statement list sharing one frame.
///
/// Functions declared anywhere in the list are visible to every statement
/// in it, so they are declared before anything is analyzed.
pub fn analyze_sequence(statements: &mut [Stmt], ctx: &mut AnalysisContext) {
    for stmt in statements.iter() {
        if let StmtKind::Declaration(Declaration {
            kind: DeclKind::Function(func),
            span,
        }) = &stmt.kind
        {
            declare_function(func, *span, ctx);
        }
    }
    for stmt in statements.iter_mut() {
        stmt.analyze_in_sequence(ctx, true);
    }
}

fn declare_function(func: &FuncDecl, span: Span, ctx: &mut AnalysisContext) {
    let ty = Type::Function(func.signature());
    ctx.declare(&func.name, Entity::function(ty, span));
}

impl Stmt {
    /// Check this statement, recording violations in `ctx`
    pub fn analyze(&mut self, ctx: &mut AnalysisContext) {
        self.analyze_in_sequence(ctx, false);
    }

    fn analyze_in_sequence(&mut self, ctx: &mut AnalysisContext, hoisted: bool) {
        let span = self.span;
        match &mut self.kind {
            StmtKind::Declaration(decl) => match &mut decl.kind {
                DeclKind::Variable(var) => analyze_var_decl(var, decl.span, ctx),
                DeclKind::Function(func) => {
                    if !hoisted {
                        declare_function(func, decl.span, ctx);
                    }
                    analyze_func_body(func, ctx);
                }
            },

            StmtKind::Assign { target, value } => {
                let entity = ctx.resolve(target, span);
                value.analyze(ctx);
                match entity {
                    Some(entity) if entity.is_value() => {
                        let construct = format!("assignment to '{}'", target);
                        value.assert_assignable_to(&entity.ty, &construct, ctx);
                    }
                    Some(_) => ctx.error(
                        DiagnosticKind::NotAVariable {
                            name: target.clone(),
                        },
                        span,
                    ),
                    None => {}
                }
            }

            StmtKind::Call(call) => {
                call.analyze(ctx);
            }

            StmtKind::After { delay, call } => {
                // Scheduling does not block: no scope, loop or reachability
                // effect on the surrounding statements.
                delay.analyze(ctx);
                delay.assert_arithmetic("after", ctx);
                call.analyze(ctx);
                tracing::trace!(callee = %call.callee, "checked deferred call");
            }

            StmtKind::Block(block) => block.analyze(ctx),

            StmtKind::If { cases, else_block } => {
                for case in cases {
                    case.condition.analyze(ctx);
                    case.condition.assert_boolean("if", ctx);
                    case.body.analyze(ctx);
                }
                if let Some(else_block) = else_block {
                    else_block.analyze(ctx);
                }
            }

            StmtKind::While { condition, body } => {
                condition.analyze(ctx);
                condition.assert_boolean("while", ctx);
                ctx.in_loop(|ctx| body.analyze(ctx));
            }

            StmtKind::For {
                init,
                condition,
                step,
                body,
            } => {
                ctx.in_scope(|ctx| {
                    if let Some(init) = init {
                        init.analyze(ctx);
                    }
                    if let Some(condition) = condition {
                        condition.analyze(ctx);
                        condition.assert_boolean("for", ctx);
                    }
                    ctx.in_loop(|ctx| body.analyze(ctx));
                    if let Some(step) = step {
                        step.analyze(ctx);
                    }
                });
            }

            StmtKind::Break => {
                if !ctx.is_in_loop() {
                    ctx.error(DiagnosticKind::BreakNotInLoop, span);
                }
            }

            StmtKind::Continue => {
                if !ctx.is_in_loop() {
                    ctx.error(DiagnosticKind::ContinueNotInLoop, span);
                }
            }

            StmtKind::Return(value) => analyze_return(value.as_mut(), span, ctx),
        }
    }
}

fn analyze_var_decl(var: &mut VarDecl, span: Span, ctx: &mut AnalysisContext) {
    // The initializer cannot see the variable it initializes
    if let Some(init) = &mut var.init {
        init.analyze(ctx);
        let construct = format!("declaration of '{}'", var.name);
        init.assert_assignable_to(&var.ty, &construct, ctx);
    }
    ctx.declare(&var.name, Entity::variable(var.ty.clone(), span));
}

fn analyze_func_body(func: &mut FuncDecl, ctx: &mut AnalysisContext) {
    let FuncDecl {
        params,
        return_type,
        body,
        ..
    } = func;

    ctx.in_function(return_type.clone(), |ctx| {
        ctx.in_scope(|ctx| {
            for param in params.iter() {
                ctx.declare(&param.name, Entity::parameter(param.ty.clone(), param.span));
            }
            // Parameters and top-level locals share one frame
            analyze_sequence(&mut body.statements, ctx);
        });
    });
}

fn analyze_return(value: Option<&mut Expr>, span: Span, ctx: &mut AnalysisContext) {
    let expected = ctx.function_return_type().cloned();
    match (expected, value) {
        (None, value) => {
            if let Some(value) = value {
                value.analyze(ctx);
            }
            ctx.error(DiagnosticKind::ReturnOutsideFunction, span);
        }
        (Some(Type::Void), Some(value)) => {
            value.analyze(ctx);
            ctx.error(DiagnosticKind::UnexpectedReturnValue, span);
        }
        (Some(Type::Void), None) => {}
        (Some(expected), Some(value)) => {
            value.analyze(ctx);
            value.assert_assignable_to(&expected, "return", ctx);
        }
        (Some(expected), None) => {
            ctx.error(DiagnosticKind::MissingReturnValue { expected }, span);
        }
    }
}
