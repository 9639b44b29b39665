use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("func", TokenKind::Func);
        map.insert("extern", TokenKind::Extern);
        map.insert("let", TokenKind::Let);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("return", TokenKind::Return);
        map.insert("as", TokenKind::As);
        map.insert("mod", TokenKind::Mod);
        map.insert("import", TokenKind::Import);
        map.insert("int", TokenKind::Int);
        map.insert("double", TokenKind::Double);
        map.insert("char", TokenKind::Char);
        map.insert("bool", TokenKind::Bool);
        map.insert("void", TokenKind::Void);
        map.insert("true", TokenKind::BoolLiteral);
        map.insert("false", TokenKind::BoolLiteral);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    IntLiteral,
    DoubleLiteral,
    CharLiteral,
    StringLiteral,
    BoolLiteral,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,        // ||
    And,       // &&
    Pipe,      // |
    Ampersand, // &

    Dot,
    Semicolon,
    Colon,
    ColonColon,
    Comma,
    Arrow,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Func,
    Extern,
    Let,
    If,
    Else,
    While,
    Return,
    As,
    Mod,
    Import,
    Int,
    Double,
    Char,
    Bool,
    Void,
}

impl TokenKind {
    /// How the kind is named in "expected ..." messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::IntLiteral => "integer literal",
            TokenKind::DoubleLiteral => "double literal",
            TokenKind::CharLiteral => "character literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::BoolLiteral => "boolean literal",
            TokenKind::Identifier => "identifier",
            TokenKind::OpenBracket => "`[`",
            TokenKind::CloseBracket => "`]`",
            TokenKind::OpenCurly => "`{`",
            TokenKind::CloseCurly => "`}`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::Assignment => "`=`",
            TokenKind::Equals => "`==`",
            TokenKind::Not => "`!`",
            TokenKind::NotEquals => "`!=`",
            TokenKind::Less => "`<`",
            TokenKind::LessEquals => "`<=`",
            TokenKind::Greater => "`>`",
            TokenKind::GreaterEquals => "`>=`",
            TokenKind::Or => "`||`",
            TokenKind::And => "`&&`",
            TokenKind::Pipe => "`|`",
            TokenKind::Ampersand => "`&`",
            TokenKind::Dot => "`.`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::ColonColon => "`::`",
            TokenKind::Comma => "`,`",
            TokenKind::Arrow => "`->`",
            TokenKind::Plus => "`+`",
            TokenKind::Dash => "`-`",
            TokenKind::Slash => "`/`",
            TokenKind::Star => "`*`",
            TokenKind::Percent => "`%`",
            TokenKind::Func => "`func`",
            TokenKind::Extern => "`extern`",
            TokenKind::Let => "`let`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::Return => "`return`",
            TokenKind::As => "`as`",
            TokenKind::Mod => "`mod`",
            TokenKind::Import => "`import`",
            TokenKind::Int => "`int`",
            TokenKind::Double => "`double`",
            TokenKind::Char => "`char`",
            TokenKind::Bool => "`bool`",
            TokenKind::Void => "`void`",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_one_of(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn debug(&self) -> String {
        if self.is_one_of(&[
            TokenKind::StringLiteral,
            TokenKind::CharLiteral,
            TokenKind::IntLiteral,
            TokenKind::DoubleLiteral,
            TokenKind::BoolLiteral,
            TokenKind::Identifier,
        ]) {
            format!("{} ({:?})", self.kind, self.value)
        } else {
            format!("{} ()", self.kind)
        }
    }
}
