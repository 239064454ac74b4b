//! Expression analysis
//!
//! `analyze` resolves and caches the type of an expression, post-order.
//! The `assert_*` helpers are called by the enclosing construct once the
//! expression has been analyzed. A failed assertion reports one diagnostic
//! and degrades the cached type to [`Type::Error`], which silences every
//! later check on the same value.

use crate::ast::{BinaryOp, Call, Expr, ExprKind, UnaryOp};
use crate::common::DiagnosticKind;
use crate::types::Type;

use super::AnalysisContext;

static ERROR_TYPE: Type = Type::Error;

impl Expr {
    /// Resolve, cache and return the type of this expression
    pub fn analyze(&mut self, ctx: &mut AnalysisContext) -> Type {
        let span = self.span;
        let ty = match &mut self.kind {
            ExprKind::IntLiteral(_) => Type::Int,
            ExprKind::RealLiteral(_) => Type::Real,
            ExprKind::BoolLiteral(_) => Type::Bool,
            ExprKind::CharLiteral(_) => Type::Char,
            ExprKind::StringLiteral(_) => Type::Str,

            ExprKind::Identifier(name) => match ctx.resolve(name, span) {
                Some(entity) if entity.is_value() => entity.ty,
                Some(_) => {
                    ctx.error(DiagnosticKind::NotAVariable { name: name.clone() }, span);
                    Type::Error
                }
                None => Type::Error,
            },

            ExprKind::Binary { op, left, right } => {
                left.analyze(ctx);
                right.analyze(ctx);
                analyze_binary(*op, left, right, ctx)
            }

            ExprKind::Unary { op, operand } => {
                operand.analyze(ctx);
                match op {
                    UnaryOp::Neg => {
                        operand.assert_arithmetic(op.as_str(), ctx);
                        operand.resolved_type().clone()
                    }
                    UnaryOp::Not => {
                        if operand.assert_boolean(op.as_str(), ctx) {
                            Type::Bool
                        } else {
                            Type::Error
                        }
                    }
                }
            }

            ExprKind::Call(call) => call.analyze(ctx),
        };

        self.ty = Some(ty.clone());
        ty
    }

    /// The type cached by [`Expr::analyze`]
    pub fn resolved_type(&self) -> &Type {
        debug_assert!(self.ty.is_some(), "expression used before analysis");
        self.ty.as_ref().unwrap_or(&ERROR_TYPE)
    }

    /// Require a numeric (int or real) value for `construct`
    pub fn assert_arithmetic(&mut self, construct: &str, ctx: &mut AnalysisContext) -> bool {
        self.assert_category(ctx, Type::is_arithmetic, |found| {
            DiagnosticKind::NonArithmeticOperand {
                construct: construct.to_string(),
                found,
            }
        })
    }

    /// Require a boolean value for `construct`
    pub fn assert_boolean(&mut self, construct: &str, ctx: &mut AnalysisContext) -> bool {
        self.assert_category(ctx, Type::is_boolean, |found| {
            DiagnosticKind::NonBooleanOperand {
                construct: construct.to_string(),
                found,
            }
        })
    }

    /// Require a value that can be stored where `expected` is declared
    pub fn assert_assignable_to(
        &mut self,
        expected: &Type,
        construct: &str,
        ctx: &mut AnalysisContext,
    ) -> bool {
        self.assert_category(
            ctx,
            |found| expected.is_assignable_from(found),
            |found| DiagnosticKind::TypeMismatch {
                construct: construct.to_string(),
                expected: expected.clone(),
                found,
            },
        )
    }

    fn assert_category(
        &mut self,
        ctx: &mut AnalysisContext,
        accepts: impl FnOnce(&Type) -> bool,
        report: impl FnOnce(Type) -> DiagnosticKind,
    ) -> bool {
        let found = self.resolved_type();
        if found.is_error() {
            return false;
        }
        if accepts(found) {
            return true;
        }
        let kind = report(found.clone());
        ctx.error(kind, self.span);
        self.ty = Some(Type::Error);
        false
    }
}

fn analyze_binary(op: BinaryOp, left: &mut Expr, right: &mut Expr, ctx: &mut AnalysisContext) -> Type {
    let symbol = op.as_str();
    if op.is_arithmetic() {
        left.assert_arithmetic(symbol, ctx);
        right.assert_arithmetic(symbol, ctx);
        left.resolved_type().arithmetic_result(right.resolved_type())
    } else if op.is_relational() {
        left.assert_arithmetic(symbol, ctx);
        right.assert_arithmetic(symbol, ctx);
        Type::Bool
    } else if op.is_equality() {
        let left_ty = left.resolved_type().clone();
        if !left_ty.is_error() && !right.resolved_type().is_comparable_with(&left_ty) {
            right.assert_assignable_to(&left_ty, symbol, ctx);
        }
        Type::Bool
    } else {
        let left_ok = left.assert_boolean(symbol, ctx);
        let right_ok = right.assert_boolean(symbol, ctx);
        if left_ok && right_ok { Type::Bool } else { Type::Error }
    }
}

impl Call {
    /// Check the callee and arguments; returns the callee's return type
    pub fn analyze(&mut self, ctx: &mut AnalysisContext) -> Type {
        let callee = ctx.resolve(&self.callee, self.span);

        for arg in &mut self.args {
            arg.analyze(ctx);
        }

        let Some(callee) = callee else {
            return Type::Error;
        };
        let Type::Function(signature) = callee.ty else {
            ctx.error(
                DiagnosticKind::NotCallable {
                    name: self.callee.clone(),
                },
                self.span,
            );
            return Type::Error;
        };

        if signature.params.len() != self.args.len() {
            ctx.error(
                DiagnosticKind::WrongArgumentCount {
                    callee: self.callee.clone(),
                    expected: signature.params.len(),
                    found: self.args.len(),
                },
                self.span,
            );
        } else {
            for (i, (arg, param)) in self.args.iter_mut().zip(&signature.params).enumerate() {
                let construct = format!("argument {} of '{}'", i + 1, self.callee);
                arg.assert_assignable_to(param, &construct, ctx);
            }
        }

        *signature.return_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;
    use crate::common::Span;
    use crate::sema::Entity;
    use pretty_assertions::assert_eq;

    fn analyze(expr: &mut Expr) -> (Type, Vec<&'static str>) {
        let mut ctx = AnalysisContext::new();
        let ty = expr.analyze(&mut ctx);
        (ty, ctx.diagnostics().codes())
    }

    #[test]
    fn test_literals() {
        assert_eq!(analyze(&mut int(1)).0, Type::Int);
        assert_eq!(analyze(&mut real(1.5)).0, Type::Real);
        assert_eq!(analyze(&mut boolean(true)).0, Type::Bool);
        assert_eq!(analyze(&mut string("s")).0, Type::Str);
    }

    #[test]
    fn test_type_is_cached() {
        let mut expr = bin(BinaryOp::Add, int(2), int(3));
        let (ty, codes) = analyze(&mut expr);
        assert_eq!(ty, Type::Int);
        assert!(codes.is_empty());
        assert_eq!(expr.ty, Some(Type::Int));
    }

    #[test]
    fn test_mixed_arithmetic_widens() {
        let (ty, codes) = analyze(&mut bin(BinaryOp::Mul, int(2), real(0.5)));
        assert_eq!(ty, Type::Real);
        assert!(codes.is_empty());
    }

    #[test]
    fn test_non_arithmetic_operand() {
        let (ty, codes) = analyze(&mut bin(BinaryOp::Add, boolean(true), int(1)));
        assert_eq!(ty, Type::Error);
        assert_eq!(codes, vec!["non_arithmetic_operand"]);
    }

    #[test]
    fn test_error_type_suppresses_cascade() {
        // (true + 1) * 2 < 4: only the innermost operand is reported
        let mut expr = bin(
            BinaryOp::Lt,
            bin(BinaryOp::Mul, bin(BinaryOp::Add, boolean(true), int(1)), int(2)),
            int(4),
        );
        let (ty, codes) = analyze(&mut expr);
        assert_eq!(ty, Type::Bool);
        assert_eq!(codes, vec!["non_arithmetic_operand"]);
    }

    #[test]
    fn test_relational_and_logical() {
        let mut expr = bin(
            BinaryOp::And,
            bin(BinaryOp::Le, int(1), real(2.0)),
            unary(UnaryOp::Not, boolean(false)),
        );
        let (ty, codes) = analyze(&mut expr);
        assert_eq!(ty, Type::Bool);
        assert!(codes.is_empty());
    }

    #[test]
    fn test_logical_requires_boolean() {
        let (ty, codes) = analyze(&mut bin(BinaryOp::Or, int(1), boolean(true)));
        assert_eq!(ty, Type::Error);
        assert_eq!(codes, vec!["non_boolean_operand"]);
    }

    #[test]
    fn test_equality() {
        assert!(analyze(&mut bin(BinaryOp::Eq, int(1), real(1.0))).1.is_empty());
        assert!(analyze(&mut bin(BinaryOp::Ne, string("a"), string("b"))).1.is_empty());

        let (ty, codes) = analyze(&mut bin(BinaryOp::Eq, string("a"), int(1)));
        assert_eq!(ty, Type::Bool);
        assert_eq!(codes, vec!["type_mismatch"]);
    }

    #[test]
    fn test_unary() {
        assert_eq!(analyze(&mut unary(UnaryOp::Neg, real(2.0))).0, Type::Real);

        let (ty, codes) = analyze(&mut unary(UnaryOp::Neg, boolean(true)));
        assert_eq!(ty, Type::Error);
        assert_eq!(codes, vec!["non_arithmetic_operand"]);

        let (_, codes) = analyze(&mut unary(UnaryOp::Not, int(0)));
        assert_eq!(codes, vec!["non_boolean_operand"]);
    }

    #[test]
    fn test_undeclared_identifier() {
        let (ty, codes) = analyze(&mut bin(BinaryOp::Add, ident("x"), int(1)));
        assert_eq!(ty, Type::Error);
        assert_eq!(codes, vec!["undeclared_identifier"]);
    }

    #[test]
    fn test_identifier_resolves_declared_type() {
        let mut ctx = AnalysisContext::new();
        ctx.declare("rate", Entity::variable(Type::Real, Span::default()));
        assert_eq!(ident("rate").analyze(&mut ctx), Type::Real);
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_function_is_not_a_value() {
        let mut ctx = AnalysisContext::new();
        ctx.declare("f", Entity::function(Type::function(vec![], Type::Int), Span::default()));
        assert_eq!(ident("f").analyze(&mut ctx), Type::Error);
        assert_eq!(ctx.diagnostics().codes(), vec!["not_a_variable"]);
    }

    #[test]
    fn test_assertion_failure_degrades_type() {
        let mut ctx = AnalysisContext::new();
        let mut expr = boolean(true);
        expr.analyze(&mut ctx);

        assert!(!expr.assert_arithmetic("after", &mut ctx));
        assert_eq!(expr.ty, Some(Type::Error));

        // A second assertion on the same value stays quiet
        assert!(!expr.assert_arithmetic("after", &mut ctx));
        assert_eq!(ctx.diagnostics().len(), 1);
        assert_eq!(
            ctx.diagnostics().as_slice()[0].kind,
            DiagnosticKind::NonArithmeticOperand {
                construct: "after".into(),
                found: Type::Bool,
            }
        );
    }

    #[test]
    fn test_call_expression() {
        let mut ctx = AnalysisContext::new();
        ctx.declare(
            "square",
            Entity::function(Type::function(vec![Type::Real], Type::Real), Span::default()),
        );

        let mut expr = call_expr("square", vec![int(3)]);
        assert_eq!(expr.analyze(&mut ctx), Type::Real);
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_call_checks() {
        let mut ctx = AnalysisContext::new();
        ctx.declare(
            "f",
            Entity::function(Type::function(vec![Type::Int], Type::Void), Span::default()),
        );
        ctx.declare("n", Entity::variable(Type::Int, Span::default()));

        call("f", vec![]).analyze(&mut ctx);
        call("f", vec![boolean(true)]).analyze(&mut ctx);
        call("n", vec![]).analyze(&mut ctx);
        call("g", vec![ident("missing")]).analyze(&mut ctx);

        assert_eq!(
            ctx.diagnostics().codes(),
            vec![
                "wrong_argument_count",
                "type_mismatch",
                "not_callable",
                "undeclared_identifier",
                "undeclared_identifier",
            ]
        );
    }
}
