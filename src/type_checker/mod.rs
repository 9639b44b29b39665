//! Type checking and semantic analysis module.
//!
//! This module checks a parsed program and annotates it in place:
//!
//! - Every expression gets its canonical type
//! - Reads of storage locations get an explicit lvalue-to-rvalue conversion
//! - Names are resolved against local scopes, then enclosing modules
//! - Function declarations and definitions are checked for consistency
//!
//! Checking is a single pass, so a function is only visible after the
//! point where it is declared.

pub mod expr;
pub mod inference;
pub mod symbol_table;
pub mod type_checker;

#[cfg(test)]
mod tests;
