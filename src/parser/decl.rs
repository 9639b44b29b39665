use crate::{
    ast::ast::{Decl, FnDecl, FnDef, ImportDecl, Module},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    types::types::TypeId,
    Position,
};

use super::{parser::Parser, stmt::parse_block, types::parse_type};

/// `import name;`* followed by declarations up to end of input.
pub fn parse_file(parser: &mut Parser, module_name: &str) -> Result<Module, Error> {
    let start = Position(0, parser.file());
    let mut module = Module::new(String::from(module_name), parser.span_from(start));

    while parser.peek_kind()? == TokenKind::Import {
        module.imports.push(parse_import(parser)?);
    }

    while parser.peek_kind()? != TokenKind::EOF {
        if let Some(decl) = parse_decl(parser)? {
            module.declarations.push(decl);
        }
    }

    module.span = parser.span_from(start);
    Ok(module)
}

fn parse_import(parser: &mut Parser) -> Result<ImportDecl, Error> {
    let start = parser.expect(TokenKind::Import)?.span.start;
    let name = parser.accept(TokenKind::Identifier)?;
    // the terminator is optional
    parser.is_next(TokenKind::Semicolon)?;

    Ok(ImportDecl {
        name,
        span: parser.span_from(start),
    })
}

/// Parses one declaration. A token that cannot start one is reported and
/// dropped, yielding `None`, so the caller retries at the next token.
pub fn parse_decl(parser: &mut Parser) -> Result<Option<Decl>, Error> {
    match parser.peek_kind()? {
        TokenKind::Func | TokenKind::Extern => Ok(Some(parse_function(parser)?)),
        TokenKind::Mod => Ok(Some(Decl::Module(parse_module(parser)?))),
        _ => {
            parser.report_unexpected("declaration")?;
            parser.take()?;
            Ok(None)
        }
    }
}

fn parse_module(parser: &mut Parser) -> Result<Module, Error> {
    let start = parser.expect(TokenKind::Mod)?.span.start;
    let name = parser.accept(TokenKind::Identifier)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut module = Module::new(name, parser.span_from(start));
    while !matches!(
        parser.peek_kind()?,
        TokenKind::CloseCurly | TokenKind::EOF
    ) {
        if let Some(decl) = parse_decl(parser)? {
            module.declarations.push(decl);
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    module.span = parser.span_from(start);
    Ok(module)
}

fn parse_function(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.peek_position()?;
    let is_extern = parser.is_next(TokenKind::Extern)?;

    parser.expect(TokenKind::Func)?;
    let name = parser.accept(TokenKind::Identifier)?;

    parser.expect(TokenKind::OpenParen)?;
    let (params, param_types) = parse_params(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.is_next(TokenKind::Arrow)? {
        parse_type(parser)?
    } else {
        parser.types().void()
    };
    let ty = parser.types().function(return_type, param_types);

    if is_extern {
        parser.expect(TokenKind::Semicolon)?;
        return Ok(Decl::Function(FnDecl {
            name,
            ty,
            params,
            is_extern,
            span: parser.span_from(start),
        }));
    }

    if parser.is_next(TokenKind::Semicolon)? {
        return Ok(Decl::Function(FnDecl {
            name,
            ty,
            params,
            is_extern,
            span: parser.span_from(start),
        }));
    }

    let body = parse_block(parser)?;
    Ok(Decl::Definition(FnDef {
        name,
        ty,
        params,
        body,
        span: parser.span_from(start),
    }))
}

/// `name: Type, ...` up to (not including) the closing parenthesis.
fn parse_params(
    parser: &mut Parser,
) -> Result<(Vec<String>, Vec<TypeId>), Error> {
    let mut names = vec![];
    let mut types = vec![];

    if parser.peek_kind()? == TokenKind::CloseParen {
        return Ok((names, types));
    }

    loop {
        names.push(parser.accept(TokenKind::Identifier)?);
        parser.expect(TokenKind::Colon)?;
        types.push(parse_type(parser)?);

        if !parser.is_next(TokenKind::Comma)? {
            break;
        }
    }

    Ok((names, types))
}
