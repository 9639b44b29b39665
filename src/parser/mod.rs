//! Parser module for building the program tree.
//!
//! This module contains the recursive-descent parser that turns a token
//! stream into a [`crate::ast::ast::Module`]. It handles:
//!
//! - Imports, function declarations and definitions, nested modules
//! - Statements (let bindings, control flow, blocks, returns)
//! - Expressions through one function per precedence level
//! - Type expressions for annotations and signatures
//! - Synchronizing error recovery

pub mod decl;
pub mod expr;
pub mod parser;
pub mod stmt;
pub mod types;
