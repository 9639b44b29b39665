//! Loads a root file and, depth-first, every file it imports.
//!
//! An `import name;` in a file living in `dir` reads `dir/name.<ext>`, parses
//! it as a module called `name`, loads its own imports, and nests the result
//! at the front of the importer's declarations.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    ast::ast::{Decl, ImportDecl, Module},
    errors::errors::{Error, ErrorImpl},
    parser::parser::parse_program,
    session::Session,
    source::source_map::FileId,
    Position,
};

pub struct ModuleLoader<'s> {
    session: &'s mut Session,
    /// Directory imports are resolved against.
    base_dir: PathBuf,
    /// Modules currently being loaded, outermost first.
    chain: Vec<ChainEntry>,
}

/// A module on the import chain. Files are told apart by their canonical
/// path, so two files sharing a module name never look like a cycle.
struct ChainEntry {
    name: String,
    path: Option<PathBuf>,
}

impl<'s> ModuleLoader<'s> {
    pub fn new(session: &'s mut Session, base_dir: impl Into<PathBuf>) -> Self {
        ModuleLoader {
            session,
            base_dir: base_dir.into(),
            chain: vec![],
        }
    }

    /// Loads a root file, resolving its imports next to it.
    pub fn for_file(session: &'s mut Session, path: &Path) -> Self {
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        ModuleLoader::new(session, base_dir)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<Module, Error> {
        let file = match self.session.sources.load(path) {
            Ok(file) => file,
            Err(error) => {
                let error = ErrorImpl::UnreadableFile {
                    path: path.display().to_string(),
                    reason: error.to_string(),
                };
                return Err(self.fatal(error, Position::null()));
            }
        };

        let main_module = self.session.config.main_module.clone();
        self.load_module(file, &main_module, fs::canonicalize(path).ok())
    }

    pub fn load_stdin(&mut self) -> Result<Module, Error> {
        let file = match self.session.sources.read_stdin() {
            Ok(file) => file,
            Err(error) => {
                let error = ErrorImpl::UnreadableFile {
                    path: String::from("<stdin>"),
                    reason: error.to_string(),
                };
                return Err(self.fatal(error, Position::null()));
            }
        };

        let main_module = self.session.config.main_module.clone();
        self.load_module(file, &main_module, None)
    }

    pub fn load_source(&mut self, name: &str, text: &str) -> Result<Module, Error> {
        let file = self.session.sources.add(name, text);
        let main_module = self.session.config.main_module.clone();
        self.load_module(file, &main_module, None)
    }

    /// Reports an error the session is bound to stop on, yielding the abort.
    fn fatal(&mut self, error: ErrorImpl, position: Position) -> Error {
        let error = Error::new(error, position);
        match self.session.report(error.clone()) {
            Err(abort) => abort,
            Ok(()) => error,
        }
    }

    fn load_module(
        &mut self,
        file: FileId,
        name: &str,
        path: Option<PathBuf>,
    ) -> Result<Module, Error> {
        tracing::debug!(module = name, %file, "loading module");

        self.chain.push(ChainEntry {
            name: name.to_string(),
            path,
        });
        let result = self.parse_with_imports(file, name);
        self.chain.pop();

        result
    }

    fn parse_with_imports(&mut self, file: FileId, name: &str) -> Result<Module, Error> {
        let mut module = parse_program(self.session, file, name)?;

        let mut imported = vec![];
        for import in &module.imports {
            if let Some(module) = self.load_import(import)? {
                imported.push(Decl::Module(module));
            }
        }

        imported.append(&mut module.declarations);
        module.declarations = imported;
        Ok(module)
    }

    fn load_import(&mut self, import: &ImportDecl) -> Result<Option<Module>, Error> {
        let path = self.base_dir.join(format!(
            "{}.{}",
            import.name, self.session.config.import_extension
        ));

        // a missing file has no canonical path and is reported below
        let canonical = fs::canonicalize(&path).ok();
        if canonical.is_some() && self.chain.iter().any(|entry| entry.path == canonical) {
            let mut chain: Vec<&str> =
                self.chain.iter().map(|entry| entry.name.as_str()).collect();
            chain.push(&import.name);

            self.session.report(Error::new(
                ErrorImpl::CyclicImport {
                    module: import.name.clone(),
                    chain: chain.join(" -> "),
                },
                import.span.start,
            ))?;
            return Ok(None);
        }

        let file = match self.session.sources.load(&path) {
            Ok(file) => file,
            Err(error) => {
                let error = if error.kind() == ErrorKind::NotFound {
                    ErrorImpl::ImportNotFound {
                        module: import.name.clone(),
                        path: path.display().to_string(),
                    }
                } else {
                    ErrorImpl::UnreadableFile {
                        path: path.display().to_string(),
                        reason: error.to_string(),
                    }
                };
                return Err(self.fatal(error, import.span.start));
            }
        };

        self.load_module(file, &import.name, canonical).map(Some)
    }
}
