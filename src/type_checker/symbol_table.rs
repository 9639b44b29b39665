//! Name tables used during type checking.
//!
//! Locals live in a stack of [`Environment`]s, one per open block. Functions
//! live in the [`GlobalTable`], keyed by the module path they were declared
//! in, along with how far they got (declared or defined).

use std::collections::HashMap;

use crate::types::types::TypeId;

#[derive(Debug, Default)]
pub struct Environment {
    variable_lookup: HashMap<String, TypeId>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            variable_lookup: HashMap::new(),
        }
    }

    /// Fails if the name is already bound in this environment.
    pub fn declare_variable(&mut self, name: &str, ty: TypeId) -> bool {
        if self.variable_lookup.contains_key(name) {
            return false;
        }
        self.variable_lookup.insert(name.to_string(), ty);
        true
    }

    pub fn get_variable(&self, name: &str) -> Option<TypeId> {
        self.variable_lookup.get(name).copied()
    }
}

/// Lexical scopes of the function being checked, innermost last.
#[derive(Debug, Default)]
pub struct LocalTable {
    environments: Vec<Environment>,
}

impl LocalTable {
    pub fn new() -> Self {
        LocalTable {
            environments: vec![],
        }
    }

    pub fn begin_scope(&mut self) {
        self.environments.push(Environment::new());
    }

    pub fn end_scope(&mut self) {
        self.environments.pop();
    }

    pub fn depth(&self) -> usize {
        self.environments.len()
    }

    /// Binds `name` in the innermost scope. Shadowing an outer scope is fine,
    /// rebinding within the same scope is not and leaves the table unchanged.
    pub fn declare(&mut self, name: &str, ty: TypeId) -> bool {
        match self.environments.last_mut() {
            Some(environment) => environment.declare_variable(name, ty),
            None => false,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_variable(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclState {
    None,
    Declared,
    Defined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalSymbol {
    pub ty: TypeId,
    pub state: DeclState,
}

/// Why a declaration or definition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclConflict {
    AlreadyDefined,
    ConflictingDeclaration { previous: TypeId },
}

#[derive(Debug, Default)]
pub struct GlobalTable {
    modules: HashMap<Vec<String>, HashMap<String, GlobalSymbol>>,
    module_path: Vec<String>,
}

impl GlobalTable {
    pub fn new() -> Self {
        GlobalTable {
            modules: HashMap::new(),
            module_path: vec![],
        }
    }

    /// Fails if `name` is already one of the enclosing modules.
    pub fn enter_module(&mut self, name: &str) -> bool {
        if self.module_path.iter().any(|module| module == name) {
            return false;
        }

        self.module_path.push(name.to_string());
        tracing::trace!(path = %self.module_path.join("::"), "entered module");
        true
    }

    pub fn exit_module(&mut self) {
        if let Some(module) = self.module_path.pop() {
            tracing::trace!(module = %module, "left module");
        }
    }

    pub fn module_path(&self) -> &[String] {
        &self.module_path
    }

    pub fn get(&self, path: &[String], name: &str) -> Option<&GlobalSymbol> {
        self.modules.get(path)?.get(name)
    }

    /// The symbol `name` declared directly in the current module.
    pub fn state_in_module(&self, name: &str) -> (Option<TypeId>, DeclState) {
        match self.get(&self.module_path, name) {
            Some(symbol) => (Some(symbol.ty), symbol.state),
            None => (None, DeclState::None),
        }
    }

    fn check_transition(&self, name: &str, ty: TypeId) -> Result<(), DeclConflict> {
        match self.state_in_module(name) {
            (_, DeclState::Defined) => Err(DeclConflict::AlreadyDefined),
            (Some(previous), DeclState::Declared) if previous != ty => {
                Err(DeclConflict::ConflictingDeclaration { previous })
            }
            _ => Ok(()),
        }
    }

    fn set(&mut self, name: &str, ty: TypeId, state: DeclState) {
        tracing::debug!(
            module = %self.module_path.join("::"),
            function = name,
            ?state,
            "function state changed"
        );

        self.modules
            .entry(self.module_path.clone())
            .or_default()
            .insert(name.to_string(), GlobalSymbol { ty, state });
    }

    pub fn declare_function(&mut self, name: &str, ty: TypeId) -> Result<(), DeclConflict> {
        self.check_transition(name, ty)?;
        self.set(name, ty, DeclState::Declared);
        Ok(())
    }

    pub fn define_function(&mut self, name: &str, ty: TypeId) -> Result<(), DeclConflict> {
        self.check_transition(name, ty)?;
        self.set(name, ty, DeclState::Defined);
        Ok(())
    }

    /// Looks `qualifier::name` up from the current module outward: every
    /// prefix of the current path is tried, longest first, down to the empty
    /// one. Returns the symbol's type and the full module path it lives in.
    pub fn resolve(&self, qualifier: &[String], name: &str) -> Option<(TypeId, Vec<String>)> {
        for length in (0..=self.module_path.len()).rev() {
            let mut path = self.module_path[..length].to_vec();
            path.extend_from_slice(qualifier);

            if let Some(symbol) = self.get(&path, name) {
                return Some((symbol.ty, path));
            }
        }

        None
    }
}
