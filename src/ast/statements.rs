use std::slice::{Iter, IterMut};

use crate::{types::types::TypeId, Span};

use super::expressions::Expr;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(BlockStmt),
    Let(LetStmt),
    Expression(ExpressionStmt),
    If(IfStmt),
    While(WhileStmt),
    Return(ReturnStmt),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Block(stmt) => stmt.span,
            Stmt::Let(stmt) => stmt.span,
            Stmt::Expression(stmt) => stmt.span,
            Stmt::If(stmt) => stmt.span,
            Stmt::While(stmt) => stmt.span,
            Stmt::Return(stmt) => stmt.span,
        }
    }
}

/// `{ ... }`, which opens a lexical scope.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, Stmt> {
        self.body.iter_mut()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub name: String,
    pub declared_type: Option<TypeId>,
    pub initializer: Option<Expr>,
    /// Type the binding ends up with after checking.
    pub bound_type: Option<TypeId>,
    pub span: Span,
}

/// An expression followed by `;`. The expression is absent for a lone `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Option<Expr>,
    pub span: Span,
}

/// `if c1 { } else if c2 { } else { }`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub branches: Vec<(Expr, BlockStmt)>,
    pub else_body: Option<BlockStmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}
