//! State owned by one in-flight compilation.

use crate::{
    config::CompilerConfig,
    errors::{diagnostics::DiagnosticEngine, errors::Error},
    source::source_map::SourceMap,
    types::interner::TypeInterner,
};

/// Everything the phases share: sources, diagnostics and types.
///
/// A session is single threaded and is never reused across compilations.
#[derive(Debug)]
pub struct Session {
    pub config: CompilerConfig,
    pub sources: SourceMap,
    pub diagnostics: DiagnosticEngine,
    pub types: TypeInterner,
}

impl Session {
    pub fn new(config: CompilerConfig) -> Self {
        Session {
            diagnostics: DiagnosticEngine::new(config.error_limit),
            sources: SourceMap::new(),
            types: TypeInterner::new(),
            config,
        }
    }

    pub fn report(&mut self, error: Error) -> Result<(), Error> {
        self.diagnostics.report(&self.sources, error)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(CompilerConfig::default())
    }
}
