use crate::{
    ast::statements::{
        BlockStmt, ExpressionStmt, IfStmt, LetStmt, ReturnStmt, Stmt, WhileStmt,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    match parser.peek_kind()? {
        TokenKind::Let => Ok(Stmt::Let(parse_let_stmt(parser)?)),
        TokenKind::If => Ok(Stmt::If(parse_if_stmt(parser)?)),
        TokenKind::While => Ok(Stmt::While(parse_while_stmt(parser)?)),
        TokenKind::Return => Ok(Stmt::Return(parse_return_stmt(parser)?)),
        TokenKind::OpenCurly => Ok(Stmt::Block(parse_block(parser)?)),
        _ => Ok(Stmt::Expression(parse_expression_stmt(parser)?)),
    }
}

pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = vec![];
    while !matches!(
        parser.peek_kind()?,
        TokenKind::CloseCurly | TokenKind::EOF
    ) {
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(BlockStmt {
        body,
        span: parser.span_from(start),
    })
}

fn parse_let_stmt(parser: &mut Parser) -> Result<LetStmt, Error> {
    let start = parser.expect(TokenKind::Let)?.span.start;
    let name_token = parser.expect(TokenKind::Identifier)?;

    let declared_type = if parser.is_next(TokenKind::Colon)? {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let initializer = if parser.is_next(TokenKind::Assignment)? {
        Some(parse_expr(parser)?)
    } else {
        None
    };

    if declared_type.is_none() && initializer.is_none() {
        parser.report(
            ErrorImpl::LetWithoutTypeOrValue {
                variable: name_token.value.clone(),
            },
            name_token.span.start,
        )?;
    }

    parser.expect(TokenKind::Semicolon)?;
    Ok(LetStmt {
        name: name_token.value,
        declared_type,
        initializer,
        bound_type: None,
        span: parser.span_from(start),
    })
}

fn parse_if_stmt(parser: &mut Parser) -> Result<IfStmt, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;

    let condition = parse_expr(parser)?;
    let body = parse_block(parser)?;
    let mut branches = vec![(condition, body)];

    let mut else_body = None;
    while parser.is_next(TokenKind::Else)? {
        if parser.is_next(TokenKind::If)? {
            let condition = parse_expr(parser)?;
            let body = parse_block(parser)?;
            branches.push((condition, body));
        } else {
            else_body = Some(parse_block(parser)?);
            break;
        }
    }

    Ok(IfStmt {
        branches,
        else_body,
        span: parser.span_from(start),
    })
}

fn parse_while_stmt(parser: &mut Parser) -> Result<WhileStmt, Error> {
    let start = parser.expect(TokenKind::While)?.span.start;
    let condition = parse_expr(parser)?;
    let body = parse_block(parser)?;

    Ok(WhileStmt {
        condition,
        body,
        span: parser.span_from(start),
    })
}

fn parse_return_stmt(parser: &mut Parser) -> Result<ReturnStmt, Error> {
    let start = parser.expect(TokenKind::Return)?.span.start;

    let value = if parser.peek_kind()? != TokenKind::Semicolon {
        Some(parse_expr(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;
    Ok(ReturnStmt {
        value,
        span: parser.span_from(start),
    })
}

fn parse_expression_stmt(parser: &mut Parser) -> Result<ExpressionStmt, Error> {
    let start = parser.peek_position()?;

    let expression = if parser.peek_kind()? != TokenKind::Semicolon {
        Some(parse_expr(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;
    Ok(ExpressionStmt {
        expression,
        span: parser.span_from(start),
    })
}
