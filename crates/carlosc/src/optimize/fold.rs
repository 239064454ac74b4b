//! Constant folding

use crate::ast::{BinaryOp, Call, Expr, ExprKind, UnaryOp};
use crate::types::Type;

/// A compile-time constant
#[derive(Debug, Clone, PartialEq)]
enum Const {
    Int(i64),
    Real(f64),
    Bool(bool),
    Char(char),
    Str(String),
}

impl Const {
    fn of(expr: &Expr) -> Option<Const> {
        match &expr.kind {
            ExprKind::IntLiteral(v) => Some(Const::Int(*v)),
            ExprKind::RealLiteral(v) => Some(Const::Real(*v)),
            ExprKind::BoolLiteral(v) => Some(Const::Bool(*v)),
            ExprKind::CharLiteral(v) => Some(Const::Char(*v)),
            ExprKind::StringLiteral(v) => Some(Const::Str(v.clone())),
            _ => None,
        }
    }

    fn as_real(&self) -> Option<f64> {
        match self {
            Const::Int(v) => Some(*v as f64),
            Const::Real(v) => Some(*v),
            _ => None,
        }
    }

    fn into_expr(self, template: &Expr) -> Expr {
        let (kind, ty) = match self {
            Const::Int(v) => (ExprKind::IntLiteral(v), Type::Int),
            Const::Real(v) => (ExprKind::RealLiteral(v), Type::Real),
            Const::Bool(v) => (ExprKind::BoolLiteral(v), Type::Bool),
            Const::Char(v) => (ExprKind::CharLiteral(v), Type::Char),
            Const::Str(v) => (ExprKind::StringLiteral(v), Type::Str),
        };
        Expr::new(kind, template.span).with_type(ty)
    }
}

impl Expr {
    /// Fold constant sub-expressions, bottom-up.
    ///
    /// Only meaningful on an analyzed tree; operands are assumed to be
    /// well-typed.
    pub fn fold(self) -> Expr {
        let Expr { kind, span, ty } = self;
        match kind {
            ExprKind::Binary { op, left, right } => {
                let left = left.fold();
                let right = right.fold();
                let folded = Expr {
                    kind: ExprKind::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    span,
                    ty,
                };
                fold_binary(folded)
            }
            ExprKind::Unary { op, operand } => {
                let operand = operand.fold();
                let value = Const::of(&operand).and_then(|c| eval_unary(op, c));
                let expr = Expr {
                    kind: ExprKind::Unary {
                        op,
                        operand: Box::new(operand),
                    },
                    span,
                    ty,
                };
                match value {
                    Some(value) => value.into_expr(&expr),
                    None => expr,
                }
            }
            ExprKind::Call(call) => Expr {
                kind: ExprKind::Call(call.fold()),
                span,
                ty,
            },
            kind => Expr { kind, span, ty },
        }
    }
}

impl Call {
    /// Fold every argument
    pub fn fold(self) -> Call {
        Call {
            args: self.args.into_iter().map(Expr::fold).collect(),
            ..self
        }
    }
}

fn fold_binary(expr: Expr) -> Expr {
    let ExprKind::Binary { op, left, right } = &expr.kind else {
        return expr;
    };

    if let (Some(l), Some(r)) = (Const::of(left), Const::of(right)) {
        if let Some(value) = eval_binary(*op, l, r) {
            tracing::trace!(op = op.as_str(), "folded constant expression");
            return value.into_expr(&expr);
        }
        return expr;
    }

    // Boolean identities with one constant on the left. The right operand
    // is only dropped where short-circuiting would never evaluate it.
    match (*op, left.as_bool()) {
        (BinaryOp::And, Some(false)) | (BinaryOp::Or, Some(true)) => (**left).clone(),
        (BinaryOp::And, Some(true)) | (BinaryOp::Or, Some(false)) => (**right).clone(),
        _ => expr,
    }
}

fn eval_unary(op: UnaryOp, value: Const) -> Option<Const> {
    match (op, value) {
        (UnaryOp::Neg, Const::Int(v)) => v.checked_neg().map(Const::Int),
        (UnaryOp::Neg, Const::Real(v)) => Some(Const::Real(-v)),
        (UnaryOp::Not, Const::Bool(v)) => Some(Const::Bool(!v)),
        _ => None,
    }
}

fn eval_binary(op: BinaryOp, left: Const, right: Const) -> Option<Const> {
    if op.is_arithmetic() {
        return match (&left, &right) {
            (Const::Int(l), Const::Int(r)) => eval_int(op, *l, *r).map(Const::Int),
            _ => eval_real(op, left.as_real()?, right.as_real()?).map(Const::Real),
        };
    }

    // Integers compare exactly; only a real operand widens both sides
    let widen = matches!(left, Const::Real(_)) || matches!(right, Const::Real(_));

    if op.is_relational() {
        let result = match (&left, &right) {
            (Const::Int(l), Const::Int(r)) => compare(op, l, r),
            _ => compare(op, &left.as_real()?, &right.as_real()?),
        };
        return Some(Const::Bool(result));
    }

    if op.is_equality() {
        let equal = if widen {
            left.as_real()? == right.as_real()?
        } else {
            left == right
        };
        return Some(Const::Bool(if op == BinaryOp::Eq { equal } else { !equal }));
    }

    match (op, left, right) {
        (BinaryOp::And, Const::Bool(l), Const::Bool(r)) => Some(Const::Bool(l && r)),
        (BinaryOp::Or, Const::Bool(l), Const::Bool(r)) => Some(Const::Bool(l || r)),
        _ => None,
    }
}

fn compare<T: PartialOrd>(op: BinaryOp, l: &T, r: &T) -> bool {
    match op {
        BinaryOp::Lt => l < r,
        BinaryOp::Le => l <= r,
        BinaryOp::Gt => l > r,
        _ => l >= r,
    }
}

/// Integer arithmetic; `None` on overflow or division by zero
fn eval_int(op: BinaryOp, l: i64, r: i64) -> Option<i64> {
    match op {
        BinaryOp::Add => l.checked_add(r),
        BinaryOp::Sub => l.checked_sub(r),
        BinaryOp::Mul => l.checked_mul(r),
        BinaryOp::Div => l.checked_div(r),
        BinaryOp::Mod => l.checked_rem(r),
        _ => None,
    }
}

fn eval_real(op: BinaryOp, l: f64, r: f64) -> Option<f64> {
    match op {
        BinaryOp::Add => Some(l + r),
        BinaryOp::Sub => Some(l - r),
        BinaryOp::Mul => Some(l * r),
        BinaryOp::Div | BinaryOp::Mod if r == 0.0 => None,
        BinaryOp::Div => Some(l / r),
        BinaryOp::Mod => Some(l % r),
        _ => None,
    }
}
