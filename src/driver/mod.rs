//! Pipeline entry points.
//!
//! Loading (lexing, parsing and imports) and checking are separate phases so
//! callers can stop after parsing. Both log their duration at `info`.

pub mod loader;


use std::{path::Path, time::Instant};

use crate::{
    ast::ast::Module, errors::errors::Error, session::Session,
    type_checker::type_checker::type_check,
};

use self::loader::ModuleLoader;

/// Where the root module comes from.
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    File(&'a Path),
    Stdin,
    Source { name: &'a str, text: &'a str },
}

/// Loads and parses the root module along with everything it imports.
pub fn load(session: &mut Session, input: Input) -> Result<Module, Error> {
    let start = Instant::now();

    let module = match input {
        Input::File(path) => ModuleLoader::for_file(session, path).load_file(path),
        Input::Stdin => ModuleLoader::new(session, ".").load_stdin(),
        Input::Source { name, text } => ModuleLoader::new(session, ".").load_source(name, text),
    }?;

    tracing::info!(elapsed = ?start.elapsed(), "parsed");
    Ok(module)
}

/// Runs semantic analysis over a loaded module.
pub fn analyze(session: &mut Session, module: &mut Module) -> Result<(), Error> {
    let start = Instant::now();
    type_check(session, module)?;

    tracing::info!(elapsed = ?start.elapsed(), "type checked");
    Ok(())
}

pub fn compile(session: &mut Session, input: Input) -> Result<Module, Error> {
    let mut module = load(session, input)?;
    analyze(session, &mut module)?;
    Ok(module)
}

pub fn compile_source(session: &mut Session, name: &str, text: &str) -> Result<Module, Error> {
    compile(session, Input::Source { name, text })
}

pub fn compile_file(session: &mut Session, path: &Path) -> Result<Module, Error> {
    compile(session, Input::File(path))
}
