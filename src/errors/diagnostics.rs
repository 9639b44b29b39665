use crate::{source::source_map::SourceMap, Position};

use super::errors::{Error, ErrorImpl, ErrorLevel};

pub const DEFAULT_ERROR_LIMIT: usize = 5;

/// Collects diagnostics for one compilation and decides when to stop.
///
/// Every reported error is kept in order. `report` returns
/// `Err(CompilationAborted)` once compilation cannot continue: the error is
/// fatal, it sits at the end of its input, or the error limit is reached.
#[derive(Debug)]
pub struct DiagnosticEngine {
    limit: usize,
    errors: Vec<Error>,
    error_count: usize,
    aborted: bool,
}

impl DiagnosticEngine {
    pub fn new(limit: usize) -> Self {
        DiagnosticEngine {
            limit: limit.max(1),
            errors: vec![],
            error_count: 0,
            aborted: false,
        }
    }

    pub fn report(&mut self, sources: &SourceMap, error: Error) -> Result<(), Error> {
        let level = error.get_level();
        let position = *error.get_position();
        let at_eof = sources.is_eof(position);

        tracing::debug!(
            name = error.get_error_name(),
            %position,
            %level,
            "diagnostic reported"
        );

        if level != ErrorLevel::Warning {
            self.error_count += 1;
        }
        self.errors.push(error);

        if level == ErrorLevel::FatalError || at_eof || self.error_count >= self.limit {
            return Err(self.abort(position));
        }

        Ok(())
    }

    fn abort(&mut self, position: Position) -> Error {
        self.aborted = true;
        tracing::info!(errors = self.error_count, limit = self.limit, "compilation aborted");

        Error::new(
            ErrorImpl::CompilationAborted {
                errors: self.error_count,
            },
            position,
        )
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}

impl Default for DiagnosticEngine {
    fn default() -> Self {
        DiagnosticEngine::new(DEFAULT_ERROR_LIMIT)
    }
}
