//! Expression grammar, loosest binding first:
//!
//! ```text
//! assignment  = or ( "=" assignment )?
//! or          = and ( "||" and )*
//! and         = relational ( "&&" relational )*
//! relational  = additive ( ("==" | "!=" | "<" | "<=" | ">" | ">=") additive )?
//! additive    = term ( ("+" | "-") term )*
//! term        = cast ( ("*" | "/" | "%") cast )*
//! cast        = unary ( "as" type )*
//! unary       = ("+" | "-" | "!" | "*" | "&") unary | subscript
//! subscript   = primary ( "[" assignment "]" )*
//! primary     = "(" assignment ")" | literal | path ( "(" args ")" )?
//! ```

use crate::{
    ast::expressions::{BinaryOp, Expr, ExprKind, IdentifierRef, UnaryOp},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{parser::Parser, types::parse_type};

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_assignment_expr(parser)
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span.to(rhs.span);
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    )
}

/// Right associative: `a = b = c` assigns `c` to `b` first.
fn parse_assignment_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let lhs = parse_logical_or_expr(parser)?;

    if parser.is_next(TokenKind::Assignment)? {
        let rhs = parse_assignment_expr(parser)?;
        return Ok(binary(BinaryOp::Assign, lhs, rhs));
    }

    Ok(lhs)
}

fn parse_logical_or_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut lhs = parse_logical_and_expr(parser)?;

    while parser.is_next(TokenKind::Or)? {
        let rhs = parse_logical_and_expr(parser)?;
        lhs = binary(BinaryOp::Or, lhs, rhs);
    }

    Ok(lhs)
}

fn parse_logical_and_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut lhs = parse_relational_expr(parser)?;

    while parser.is_next(TokenKind::And)? {
        let rhs = parse_relational_expr(parser)?;
        lhs = binary(BinaryOp::And, lhs, rhs);
    }

    Ok(lhs)
}

/// At most one comparison: `a < b < c` stops after `a < b`.
fn parse_relational_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let lhs = parse_additive_expr(parser)?;

    let op = match parser.peek_kind()? {
        TokenKind::Equals => BinaryOp::Equal,
        TokenKind::NotEquals => BinaryOp::NotEqual,
        TokenKind::Less => BinaryOp::Less,
        TokenKind::LessEquals => BinaryOp::LessEqual,
        TokenKind::Greater => BinaryOp::Greater,
        TokenKind::GreaterEquals => BinaryOp::GreaterEqual,
        _ => return Ok(lhs),
    };

    parser.take()?;
    let rhs = parse_additive_expr(parser)?;
    Ok(binary(op, lhs, rhs))
}

fn parse_additive_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut lhs = parse_term_expr(parser)?;

    loop {
        let op = match parser.peek_kind()? {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Dash => BinaryOp::Subtract,
            _ => return Ok(lhs),
        };

        parser.take()?;
        let rhs = parse_term_expr(parser)?;
        lhs = binary(op, lhs, rhs);
    }
}

fn parse_term_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut lhs = parse_cast_expr(parser)?;

    loop {
        let op = match parser.peek_kind()? {
            TokenKind::Star => BinaryOp::Multiply,
            TokenKind::Slash => BinaryOp::Divide,
            TokenKind::Percent => BinaryOp::Modulo,
            _ => return Ok(lhs),
        };

        parser.take()?;
        let rhs = parse_cast_expr(parser)?;
        lhs = binary(op, lhs, rhs);
    }
}

fn parse_cast_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut expr = parse_unary_expr(parser)?;

    while parser.is_next(TokenKind::As)? {
        let target = parse_type(parser)?;
        let span = parser.span_from(expr.span.start);
        expr = Expr::new(
            ExprKind::Cast {
                expr: Box::new(expr),
                target,
            },
            span,
        );
    }

    Ok(expr)
}

fn parse_unary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let op = match parser.peek_kind()? {
        TokenKind::Plus => UnaryOp::Plus,
        TokenKind::Dash => UnaryOp::Minus,
        TokenKind::Not => UnaryOp::Not,
        TokenKind::Star => UnaryOp::Deref,
        TokenKind::Ampersand => UnaryOp::AddressOf,
        _ => return parse_subscript_expr(parser),
    };

    let start = parser.take()?.span.start;
    let operand = parse_unary_expr(parser)?;

    Ok(Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        parser.span_from(start),
    ))
}

fn parse_subscript_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut expr = parse_primary_expr(parser)?;

    while parser.is_next(TokenKind::OpenBracket)? {
        let index = parse_expr(parser)?;
        parser.expect(TokenKind::CloseBracket)?;

        let span = parser.span_from(expr.span.start);
        expr = Expr::new(
            ExprKind::Subscript {
                base: Box::new(expr),
                index: Box::new(index),
            },
            span,
        );
    }

    Ok(expr)
}

fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.peek_kind()? {
        TokenKind::OpenParen => {
            parser.take()?;
            let expr = parse_expr(parser)?;
            parser.expect(TokenKind::CloseParen)?;
            Ok(expr)
        }
        TokenKind::IntLiteral => {
            let token = parser.take()?;
            let value = parse_number::<i64>(parser, &token)?;
            Ok(Expr::new(ExprKind::IntLiteral(value), token.span))
        }
        TokenKind::DoubleLiteral => {
            let token = parser.take()?;
            let value = parse_double(parser, &token)?;
            Ok(Expr::new(ExprKind::DoubleLiteral(value), token.span))
        }
        TokenKind::CharLiteral => {
            let token = parser.take()?;
            let value = token.value.chars().next().unwrap_or('\0');
            Ok(Expr::new(ExprKind::CharLiteral(value), token.span))
        }
        TokenKind::StringLiteral => {
            let token = parser.take()?;
            Ok(Expr::new(ExprKind::StringLiteral(token.value), token.span))
        }
        TokenKind::BoolLiteral => {
            let token = parser.take()?;
            Ok(Expr::new(
                ExprKind::BoolLiteral(token.value == "true"),
                token.span,
            ))
        }
        _ => parse_reference_or_call(parser),
    }
}

/// Invalid literals are reported and read as zero.
fn parse_number<T: std::str::FromStr + Default>(
    parser: &mut Parser,
    token: &Token,
) -> Result<T, Error> {
    match token.value.parse::<T>() {
        Ok(value) => Ok(value),
        Err(_) => {
            parser.report(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span.start,
            )?;
            Ok(T::default())
        }
    }
}

/// Out-of-range doubles are rejected like malformed ones rather than
/// becoming infinite.
fn parse_double(parser: &mut Parser, token: &Token) -> Result<f64, Error> {
    match token.value.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => {
            parser.report(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span.start,
            )?;
            Ok(0.0)
        }
    }
}

/// `a::b::name`, optionally followed by a call.
fn parse_reference_or_call(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.peek_position()?;

    let mut name = parser.accept(TokenKind::Identifier)?;
    let mut module_path = vec![];
    while parser.is_next(TokenKind::ColonColon)? {
        module_path.push(name);
        name = parser.accept(TokenKind::Identifier)?;
    }

    let identifier = Expr::new(
        ExprKind::Identifier(IdentifierRef::new(name, module_path)),
        parser.span_from(start),
    );

    if !parser.is_next(TokenKind::OpenParen)? {
        return Ok(identifier);
    }

    let arguments = parse_arguments(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(
        ExprKind::Call {
            callee: Box::new(identifier),
            arguments,
        },
        parser.span_from(start),
    ))
}

fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut arguments = vec![];

    if parser.peek_kind()? == TokenKind::CloseParen {
        return Ok(arguments);
    }

    arguments.push(parse_expr(parser)?);
    while parser.is_next(TokenKind::Comma)? {
        arguments.push(parse_expr(parser)?);
    }

    Ok(arguments)
}
