//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler for fixed-text tokens

/// Creates a Token instance.
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntLiteral, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a handler for a token whose text never varies.
///
/// The generated handler emits a token of the given kind spanning the
/// literal text and moves the lexer past it.
///
/// ```ignore
/// pattern("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"))
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _matched: &str| {
            let start = lexer.pos;
            lexer.push(MK_TOKEN!(
                $kind,
                String::from($value),
                lexer.span(start, start + $value.len())
            ));
            lexer.advance_n($value.len());
        }
    };
}
