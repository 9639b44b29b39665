use std::{collections::VecDeque, rc::Rc};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    source::source_map::FileId,
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Receives the lexer and the text the pattern matched at the cursor.
pub type RegexHandler = fn(&mut Lexer, &str);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(&format!("^(?:{})", regex)).unwrap(),
        handler,
    }
}

lazy_static! {
    // Tried in order, first match wins. Longer operators precede their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("\\s+", skip_handler),
        pattern("#[^\\n]*", skip_handler),
        pattern("[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern("[0-9]+(\\.[0-9]+)?([eE][+-]?[0-9]+)?", number_handler),
        pattern("(?s)\"(?:[^\"\\\\]|\\\\.)*\"", string_handler),
        pattern("\"", unterminated_string_handler),
        pattern("'(?:[^'\\\\\\n]|\\\\x[0-9a-fA-F]{1,2}|\\\\.)'", char_handler),
        pattern("'(?:[^'\\\\\\n]|\\\\.)*'?", malformed_char_handler),
        pattern("::", MK_DEFAULT_HANDLER!(TokenKind::ColonColon, "::")),
        pattern("->", MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->")),
        pattern("==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern("!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern("<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern(">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern("&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern("\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern("\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern("\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern("\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern("\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern("!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern("&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&")),
        pattern("\\|", MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|")),
        pattern("\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(":", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern("%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
    ];
}

/// One token of lookahead over a lexical source.
///
/// Lexical errors are buffered by the stream and handed out through
/// `drain_errors`, so the consumer decides when they get reported.
pub trait TokenStream {
    /// Returns the next token without consuming it.
    fn peek(&mut self) -> &Token;
    /// Consumes the next token. Keeps returning `EOF` once input is exhausted.
    fn take(&mut self) -> Token;
    fn drain_errors(&mut self) -> Vec<Error>;
}

/// Scans tokens on demand from one source buffer.
pub struct Lexer {
    source: Rc<str>,
    file: FileId,
    pub pos: usize,
    pending: VecDeque<Token>,
    errors: Vec<Error>,
}

impl Lexer {
    pub fn new(source: Rc<str>, file: FileId) -> Lexer {
        Lexer {
            source,
            file,
            pos: 0,
            pending: VecDeque::new(),
            errors: vec![],
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        tracing::trace!(token = %token.debug(), "scanned");
        self.pending.push_back(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self, offset: usize) -> Position {
        Position(offset as u32, self.file)
    }

    pub fn span(&self, start: usize, end: usize) -> Span {
        Span::new(self.position(start), self.position(end))
    }

    fn error(&mut self, error: ErrorImpl, offset: usize) {
        let position = self.position(offset);
        self.errors.push(Error::new(error, position));
    }

    /// Runs one pattern at the cursor, or emits `EOF` when input is exhausted.
    fn scan(&mut self) {
        if self.at_eof() {
            let end = self.source.len();
            self.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                self.span(end, end)
            ));
            return;
        }

        for pattern in PATTERNS.iter() {
            let matched = match pattern.regex.find(self.remainder()) {
                Some(found) if !found.as_str().is_empty() => found.as_str().to_string(),
                _ => continue,
            };

            (pattern.handler)(self, &matched);
            return;
        }

        let unknown = self.remainder().chars().next().unwrap_or('\0');
        self.error(
            ErrorImpl::UnrecognisedToken {
                token: unknown.to_string(),
            },
            self.pos,
        );
        self.advance_n(unknown.len_utf8().max(1));
    }

    fn fill(&mut self) {
        while self.pending.is_empty() {
            self.scan();
        }
    }

    /// Resolves escape sequences in a literal body starting at `offset`.
    fn unescape(&mut self, body: &str, offset: usize) -> String {
        let mut result = String::new();
        let mut chars = body.char_indices().peekable();

        while let Some((index, ch)) = chars.next() {
            if ch != '\\' {
                result.push(ch);
                continue;
            }

            let Some((_, escaped)) = chars.next() else {
                result.push(ch);
                break;
            };

            match escaped {
                'a' => result.push('\u{07}'),
                'b' => result.push('\u{08}'),
                't' => result.push('\t'),
                'n' => result.push('\n'),
                'v' => result.push('\u{0b}'),
                'f' => result.push('\u{0c}'),
                'r' => result.push('\r'),
                '"' => result.push('"'),
                '\'' => result.push('\''),
                '?' => result.push('?'),
                '\\' => result.push('\\'),
                '0' => result.push('\0'),
                'x' => {
                    let mut hex = String::new();
                    while hex.len() < 2 {
                        match chars.peek() {
                            Some((_, digit)) if digit.is_ascii_hexdigit() => {
                                hex.push(*digit);
                                chars.next();
                            }
                            _ => break,
                        }
                    }

                    match u8::from_str_radix(&hex, 16) {
                        Ok(byte) => result.push(byte as char),
                        Err(_) => {
                            self.error(ErrorImpl::BadEscape { escape: 'x' }, offset + index);
                            result.push('x');
                        }
                    }
                }
                other => {
                    self.error(ErrorImpl::BadEscape { escape: other }, offset + index);
                    result.push(other);
                }
            }
        }

        result
    }
}

impl TokenStream for Lexer {
    fn peek(&mut self) -> &Token {
        self.fill();
        &self.pending[0]
    }

    fn take(&mut self) -> Token {
        self.fill();
        match self.pending.pop_front() {
            Some(token) => token,
            None => {
                let end = self.source.len();
                MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.span(end, end))
            }
        }
    }

    fn drain_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) {
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) {
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let start = lexer.pos;
    lexer.push(MK_TOKEN!(
        kind,
        String::from(matched),
        lexer.span(start, start + matched.len())
    ));
    lexer.advance_n(matched.len());
}

fn number_handler(lexer: &mut Lexer, matched: &str) {
    let kind = if matched.contains(['.', 'e', 'E']) {
        TokenKind::DoubleLiteral
    } else {
        TokenKind::IntLiteral
    };

    let start = lexer.pos;
    lexer.push(MK_TOKEN!(
        kind,
        String::from(matched),
        lexer.span(start, start + matched.len())
    ));
    lexer.advance_n(matched.len());
}

fn string_handler(lexer: &mut Lexer, matched: &str) {
    let start = lexer.pos;
    let body = &matched[1..matched.len() - 1];
    let value = lexer.unescape(body, start + 1);

    lexer.push(MK_TOKEN!(
        TokenKind::StringLiteral,
        value,
        lexer.span(start, start + matched.len())
    ));
    lexer.advance_n(matched.len());
}

/// An opening quote with no closing one: the literal runs to end of input.
fn unterminated_string_handler(lexer: &mut Lexer, _matched: &str) {
    let end = lexer.source.len();
    lexer.pos = end;
    lexer.error(ErrorImpl::UnterminatedString, end);
}

fn char_handler(lexer: &mut Lexer, matched: &str) {
    let start = lexer.pos;
    let body = &matched[1..matched.len() - 1];
    let value = lexer.unescape(body, start + 1);

    lexer.push(MK_TOKEN!(
        TokenKind::CharLiteral,
        value,
        lexer.span(start, start + matched.len())
    ));
    lexer.advance_n(matched.len());
}

fn malformed_char_handler(lexer: &mut Lexer, matched: &str) {
    let start = lexer.pos;
    lexer.error(
        ErrorImpl::MalformedCharLiteral {
            literal: String::from(matched),
        },
        start,
    );

    lexer.push(MK_TOKEN!(
        TokenKind::CharLiteral,
        String::from("\0"),
        lexer.span(start, start + matched.len())
    ));
    lexer.advance_n(matched.len());
}

/// Scans a whole buffer eagerly, returning every token up to and including
/// `EOF` along with the lexical errors met on the way.
pub fn tokenize(source: &str, file: FileId) -> (Vec<Token>, Vec<Error>) {
    let mut lexer = Lexer::new(Rc::from(source), file);
    let mut tokens = vec![];

    loop {
        let token = lexer.take();
        let done = token.is(TokenKind::EOF);
        tokens.push(token);
        if done {
            break;
        }
    }

    (tokens, lexer.drain_errors())
}
