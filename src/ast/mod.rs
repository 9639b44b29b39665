/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the program tree
///
/// Submodules:
/// - ast: Modules and declarations
/// - expressions: Expression nodes and operators
/// - statements: Statement nodes
/// - display: Printing a tree back as source
pub mod ast;
pub mod display;
pub mod expressions;
pub mod statements;

#[cfg(test)]
mod tests;
