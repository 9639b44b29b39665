//! Parser state and token plumbing.
//!
//! The parser is a recursive descent over a [`TokenStream`], one function
//! per grammar level, spread over `decl`, `stmt`, `expr` and `types`. It
//! recovers from syntax errors locally: `expect` and `accept` report and
//! discard tokens until the wanted one (or end of input) shows up. Every
//! report goes through the session, which may abort the compilation; that
//! abort is the only thing travelling through `Err`.

use std::rc::Rc;

use crate::{
    ast::ast::Module,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::{Lexer, TokenStream},
        tokens::{Token, TokenKind},
    },
    session::Session,
    source::source_map::FileId,
    types::interner::TypeInterner,
    Position, Span,
};

use super::decl::parse_file;

pub struct Parser<'s> {
    tokens: Box<dyn TokenStream>,
    session: &'s mut Session,
    file: FileId,
    /// End of the last token taken, used to close spans.
    last_end: Position,
}

impl<'s> Parser<'s> {
    pub fn new(tokens: Box<dyn TokenStream>, session: &'s mut Session, file: FileId) -> Self {
        Parser {
            tokens,
            session,
            file,
            last_end: Position(0, file),
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn types(&mut self) -> &mut TypeInterner {
        &mut self.session.types
    }

    /// Hands buffered lexical errors to the reporter.
    fn flush_lexical_errors(&mut self) -> Result<(), Error> {
        for error in self.tokens.drain_errors() {
            self.session.report(error)?;
        }
        Ok(())
    }

    pub fn peek(&mut self) -> Result<&Token, Error> {
        self.tokens.peek();
        self.flush_lexical_errors()?;
        Ok(self.tokens.peek())
    }

    pub fn peek_kind(&mut self) -> Result<TokenKind, Error> {
        Ok(self.peek()?.kind)
    }

    pub fn peek_position(&mut self) -> Result<Position, Error> {
        Ok(self.peek()?.span.start)
    }

    pub fn take(&mut self) -> Result<Token, Error> {
        self.tokens.peek();
        self.flush_lexical_errors()?;

        let token = self.tokens.take();
        if token.kind != TokenKind::EOF {
            self.last_end = token.span.end;
        }
        Ok(token)
    }

    /// Takes the next token only if it has the given kind.
    pub fn is_next(&mut self, kind: TokenKind) -> Result<bool, Error> {
        if self.peek_kind()? == kind {
            self.take()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Skips (and reports) tokens until `kind` or end of input, then takes one.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        loop {
            let token = self.peek()?;

            if token.kind == kind {
                return self.take();
            }

            if token.kind == TokenKind::EOF {
                let position = token.span.start;
                self.report(
                    ErrorImpl::UnexpectedEndOfInput {
                        expected: kind.describe().to_string(),
                    },
                    position,
                )?;
                return self.take();
            }

            let token = self.take()?;
            self.report(
                ErrorImpl::UnexpectedToken {
                    token: token.value,
                    expected: kind.describe().to_string(),
                },
                token.span.start,
            )?;
        }
    }

    /// Same recovery as [`Parser::expect`], yielding the token text.
    pub fn accept(&mut self, kind: TokenKind) -> Result<String, Error> {
        Ok(self.expect(kind)?.value)
    }

    pub fn report(&mut self, error: ErrorImpl, position: Position) -> Result<(), Error> {
        self.session.report(Error::new(error, position))
    }

    /// Reports an unexpected token without consuming it.
    pub fn report_unexpected(&mut self, expected: &str) -> Result<(), Error> {
        let token = self.peek()?;
        let position = token.span.start;
        let error = if token.kind == TokenKind::EOF {
            ErrorImpl::UnexpectedEndOfInput {
                expected: expected.to_string(),
            }
        } else {
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
                expected: expected.to_string(),
            }
        };
        self.report(error, position)
    }

    /// Span from `start` to the end of the last token taken.
    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.last_end)
    }
}

/// Parses one registered source file into a module named `module_name`.
pub fn parse_program(
    session: &mut Session,
    file: FileId,
    module_name: &str,
) -> Result<Module, Error> {
    let text = session.sources.text(file).unwrap_or_else(|| Rc::from(""));
    let lexer = Lexer::new(text, file);

    let mut parser = Parser::new(Box::new(lexer), session, file);
    let module = parse_file(&mut parser, module_name)?;

    tracing::debug!(
        module = module_name,
        declarations = module.declarations.len(),
        imports = module.imports.len(),
        "parsed file"
    );
    Ok(module)
}
