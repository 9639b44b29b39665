use crate::{types::types::TypeId, Span};

use super::statements::BlockStmt;

/// A namespace: the root file, an imported file, or a `mod name { }` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub imports: Vec<ImportDecl>,
    pub declarations: Vec<Decl>,
    pub span: Span,
}

impl Module {
    pub fn new(name: String, span: Span) -> Self {
        Module {
            name,
            imports: vec![],
            declarations: vec![],
            span,
        }
    }

    pub fn find_module(&self, name: &str) -> Option<&Module> {
        self.declarations.iter().find_map(|decl| match decl {
            Decl::Module(module) if module.name == name => Some(module),
            _ => None,
        })
    }

    pub fn find_definition(&self, name: &str) -> Option<&FnDef> {
        self.declarations.iter().find_map(|decl| match decl {
            Decl::Definition(def) if def.name == name => Some(def),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Function(FnDecl),
    Definition(FnDef),
    Module(Module),
}

/// A signature without a body, `extern` or forward.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub name: String,
    /// Always a function type.
    pub ty: TypeId,
    pub params: Vec<String>,
    pub is_extern: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDef {
    pub name: String,
    /// Always a function type.
    pub ty: TypeId,
    pub params: Vec<String>,
    pub body: BlockStmt,
    pub span: Span,
}
