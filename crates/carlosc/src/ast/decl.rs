//! Declaration AST nodes

use super::{Block, Expr};
use crate::common::Span;
use crate::types::{Signature, Type};

/// A declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub kind: DeclKind,
    pub span: Span,
}

impl Declaration {
    pub fn new(kind: DeclKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            DeclKind::Variable(var) => &var.name,
            DeclKind::Function(func) => &func.name,
        }
    }
}

/// Declaration kinds
#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    Variable(VarDecl),
    Function(FuncDecl),
}

/// Variable declaration: int x = 5;
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub ty: Type,
    pub init: Option<Expr>,
}

/// Function declaration; a `void` return type makes it a procedure
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Type,
    pub body: Block,
}

impl FuncDecl {
    pub fn signature(&self) -> Signature {
        Signature::new(
            self.params.iter().map(|p| p.ty.clone()).collect(),
            self.return_type.clone(),
        )
    }
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type, span: Span) -> Self {
        Self {
            name: name.into(),
            ty,
            span,
        }
    }
}
