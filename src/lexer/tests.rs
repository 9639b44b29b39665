//! Unit tests for the lexer module.
//!
//! Covers keywords and identifiers, numeric, character and string literals,
//! operators and punctuation, comments, lookahead and error cases.

use std::rc::Rc;

use super::{
    lexer::{tokenize, Lexer, TokenStream},
    tokens::TokenKind,
};
use crate::{errors::errors::ErrorImpl, source::source_map::FileId};

fn kinds(source: &str) -> Vec<TokenKind> {
    let (tokens, errors) = tokenize(source, FileId(0));
    assert!(errors.is_empty(), "unexpected lexical errors: {:?}", errors);
    tokens.iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("func extern let if else while return as mod import int double char bool void"),
        vec![
            TokenKind::Func,
            TokenKind::Extern,
            TokenKind::Let,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Return,
            TokenKind::As,
            TokenKind::Mod,
            TokenKind::Import,
            TokenKind::Int,
            TokenKind::Double,
            TokenKind::Char,
            TokenKind::Bool,
            TokenKind::Void,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let (tokens, _) = tokenize("foo baz_123 _underscore funcs", FileId(0));

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "baz_123");
    assert_eq!(tokens[2].value, "_underscore");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "funcs");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let (tokens, _) = tokenize("42 3.14 0 1e10 2.5E-3", FileId(0));

    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::DoubleLiteral);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[3].kind, TokenKind::DoubleLiteral);
    assert_eq!(tokens[3].value, "1e10");
    assert_eq!(tokens[4].kind, TokenKind::DoubleLiteral);
    assert_eq!(tokens[4].value, "2.5E-3");
}

#[test]
fn test_tokenize_bool_literals() {
    let (tokens, _) = tokenize("true false", FileId(0));

    assert_eq!(tokens[0].kind, TokenKind::BoolLiteral);
    assert_eq!(tokens[0].value, "true");
    assert_eq!(tokens[1].kind, TokenKind::BoolLiteral);
    assert_eq!(tokens[1].value, "false");
}

#[test]
fn test_tokenize_strings_with_escapes() {
    let (tokens, errors) = tokenize(r#""hello" "a\tb\n" "say \"hi\"" "\x41\?""#, FileId(0));

    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "a\tb\n");
    assert_eq!(tokens[2].value, "say \"hi\"");
    assert_eq!(tokens[3].value, "A?");
}

#[test]
fn test_tokenize_chars() {
    let (tokens, errors) = tokenize(r"'a' '\n' '\'' '\x41'", FileId(0));

    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].value, "\n");
    assert_eq!(tokens[2].value, "'");
    assert_eq!(tokens[3].value, "A");
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % = == != < <= > >= && || ! & | -> :: : ; , ."),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Assignment,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::Ampersand,
            TokenKind::Pipe,
            TokenKind::Arrow,
            TokenKind::ColonColon,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_brackets() {
    assert_eq!(
        kinds("( ) { } [ ]"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let (tokens, _) = tokenize("let x # comment here\n= 5;", FileId(0));

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::Assignment);
    assert_eq!(tokens[3].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[4].kind, TokenKind::Semicolon);
}

#[test]
fn test_token_spans() {
    let (tokens, _) = tokenize("let  value", FileId(3));

    assert_eq!(tokens[1].span.start.0, 5);
    assert_eq!(tokens[1].span.end.0, 10);
    assert_eq!(tokens[1].span.start.1, FileId(3));
    assert_eq!(tokens[2].span.start.0, 10);
}

#[test]
fn test_peek_is_idempotent() {
    let mut lexer = Lexer::new(Rc::from("a b"), FileId(0));

    assert_eq!(lexer.peek().value, "a");
    assert_eq!(lexer.peek().value, "a");
    assert_eq!(lexer.take().value, "a");
    assert_eq!(lexer.take().value, "b");
    assert_eq!(lexer.take().kind, TokenKind::EOF);
    assert_eq!(lexer.take().kind, TokenKind::EOF);
}

#[test]
fn test_unrecognised_character_is_skipped() {
    let (tokens, errors) = tokenize("a @ b", FileId(0));

    assert_eq!(tokens.len(), 3);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_error_impl(),
        &ErrorImpl::UnrecognisedToken {
            token: "@".to_string()
        }
    );
    assert_eq!(errors[0].get_position().0, 2);
}

#[test]
fn test_unterminated_string_reports_at_end() {
    let source = "let s = \"abc";
    let (tokens, errors) = tokenize(source, FileId(0));

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_impl(), &ErrorImpl::UnterminatedString);
    assert_eq!(errors[0].get_position().offset(), source.len());
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EOF));
}

#[test]
fn test_malformed_char_literal() {
    let (tokens, errors) = tokenize("'ab'", FileId(0));

    assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].get_error_impl(),
        ErrorImpl::MalformedCharLiteral { .. }
    ));
}

#[test]
fn test_bad_escape_keeps_character() {
    let (tokens, errors) = tokenize(r#""a\qb""#, FileId(0));

    assert_eq!(tokens[0].value, "aqb");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_error_impl(),
        &ErrorImpl::BadEscape { escape: 'q' }
    );
    assert_eq!(errors[0].get_position().0, 2);
}
