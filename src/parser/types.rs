use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    types::types::{BuiltinKind, TypeId},
};

use super::parser::Parser;

/// `[T ; n]`, `*T` or a builtin keyword.
pub fn parse_type(parser: &mut Parser) -> Result<TypeId, Error> {
    if parser.is_next(TokenKind::OpenBracket)? {
        let element = parse_type(parser)?;
        parser.expect(TokenKind::Semicolon)?;
        let size = parse_array_size(parser)?;
        parser.expect(TokenKind::CloseBracket)?;
        return Ok(parser.types().array(element, size));
    }

    if parser.is_next(TokenKind::Star)? {
        let pointee = parse_type(parser)?;
        return Ok(parser.types().pointer(pointee));
    }

    parse_builtin_type(parser)
}

fn parse_array_size(parser: &mut Parser) -> Result<u64, Error> {
    let token = parser.expect(TokenKind::IntLiteral)?;

    match token.value.parse::<u64>() {
        Ok(size) => Ok(size),
        Err(_) => {
            parser.report(
                ErrorImpl::NumberParseError { token: token.value },
                token.span.start,
            )?;
            Ok(0)
        }
    }
}

fn parse_builtin_type(parser: &mut Parser) -> Result<TypeId, Error> {
    loop {
        let kind = match parser.peek_kind()? {
            TokenKind::Int => BuiltinKind::Int,
            TokenKind::Double => BuiltinKind::Double,
            TokenKind::Char => BuiltinKind::Char,
            TokenKind::Bool => BuiltinKind::Bool,
            TokenKind::Void => BuiltinKind::Void,
            TokenKind::EOF => {
                parser.report_unexpected("type")?;
                return Ok(parser.types().void());
            }
            _ => {
                parser.report_unexpected("type")?;
                parser.take()?;
                continue;
            }
        };

        parser.take()?;
        return Ok(parser.types().builtin(kind));
    }
}
