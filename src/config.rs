//! Compiler settings shared by the library and the command line.

use crate::errors::diagnostics::DEFAULT_ERROR_LIMIT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Number of errors after which compilation stops.
    pub error_limit: usize,
    /// Extension appended to an import name to find its file.
    pub import_extension: String,
    /// Name of the module wrapping the root file.
    pub main_module: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            error_limit: DEFAULT_ERROR_LIMIT,
            import_extension: String::from("el"),
            main_module: String::from("main"),
        }
    }
}

impl CompilerConfig {
    pub fn with_error_limit(mut self, error_limit: usize) -> Self {
        self.error_limit = error_limit;
        self
    }
}
