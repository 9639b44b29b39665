use crate::{types::types::TypeId, Span};

/// Binary operators, from loosest to tightest binding group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Assign,
    Or,
    And,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Assign => "=",
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::Or | BinaryOp::And)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::Less
                | BinaryOp::LessEqual
                | BinaryOp::Greater
                | BinaryOp::GreaterEqual
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    Deref,
    AddressOf,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
            UnaryOp::Deref => "*",
            UnaryOp::AddressOf => "&",
        }
    }
}

/// A name as written, optionally qualified with `a::b::`.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierRef {
    pub name: String,
    pub module_path: Vec<String>,
    /// Module path the name was found in, set by the type checker for globals.
    pub resolved_path: Option<Vec<String>>,
}

impl IdentifierRef {
    pub fn new(name: String, module_path: Vec<String>) -> Self {
        IdentifierRef {
            name,
            module_path,
            resolved_path: None,
        }
    }

    pub fn is_qualified(&self) -> bool {
        !self.module_path.is_empty()
    }

    /// `a::b::name`
    pub fn qualified_name(&self) -> String {
        let mut segments = self.module_path.clone();
        segments.push(self.name.clone());
        segments.join("::")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Subscript {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Cast {
        expr: Box<Expr>,
        target: TypeId,
    },
    /// Read of a storage location; only ever inserted by the type checker.
    LValueToRValue(Box<Expr>),
    Identifier(IdentifierRef),
    IntLiteral(i64),
    DoubleLiteral(f64),
    CharLiteral(char),
    StringLiteral(String),
    BoolLiteral(bool),
}

/// Expression node. `ty` stays `None` until type checking fills it in.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub ty: Option<TypeId>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            ty: None,
        }
    }

    pub fn is_implicit_cast(&self) -> bool {
        matches!(self.kind, ExprKind::LValueToRValue(_))
    }

    /// Looks through any inserted lvalue-to-rvalue conversions.
    pub fn strip_implicit(&self) -> &Expr {
        match &self.kind {
            ExprKind::LValueToRValue(inner) => inner.strip_implicit(),
            _ => self,
        }
    }
}
