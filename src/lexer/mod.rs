//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer that turns source text into tokens for the
//! parser. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Escape sequences in character and string literals
//! - `#` comments and whitespace
//!
//! Tokens are produced lazily through the [`lexer::TokenStream`] trait.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
