use std::{
    fmt::Display,
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

impl FileId {
    /// Used for positions that do not belong to any registered buffer.
    pub const UNKNOWN: FileId = FileId(u32::MAX);
}

impl Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == FileId::UNKNOWN {
            write!(f, "<unknown>")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub path: Option<PathBuf>,
    pub text: Rc<str>,
}

impl SourceFile {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A position translated for humans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLocation {
    pub file_name: String,
    /// 1-based
    pub line: usize,
    /// 0-based byte column inside `line_text`
    pub column: usize,
    pub line_text: String,
    pub is_eof: bool,
}

impl Display for UserLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file_name, self.line, self.column + 1)
    }
}

#[derive(Debug, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        SourceMap { files: vec![] }
    }

    pub fn add(&mut self, name: &str, text: &str) -> FileId {
        self.push(SourceFile {
            name: name.to_string(),
            path: None,
            text: Rc::from(text),
        })
    }

    pub fn load(&mut self, path: &Path) -> io::Result<FileId> {
        let text = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded source file");

        Ok(self.push(SourceFile {
            name: path.display().to_string(),
            path: Some(path.to_path_buf()),
            text: Rc::from(text),
        }))
    }

    pub fn read_stdin(&mut self) -> io::Result<FileId> {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;

        Ok(self.push(SourceFile {
            name: String::from("<stdin>"),
            path: None,
            text: Rc::from(text),
        }))
    }

    fn push(&mut self, file: SourceFile) -> FileId {
        self.files.push(file);
        FileId((self.files.len() - 1) as u32)
    }

    pub fn get(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0 as usize)
    }

    pub fn text(&self, id: FileId) -> Option<Rc<str>> {
        self.get(id).map(|file| Rc::clone(&file.text))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether `position` sits at (or past) the end of its buffer.
    pub fn is_eof(&self, position: Position) -> bool {
        match self.get(position.file()) {
            Some(file) => position.offset() >= file.len(),
            None => false,
        }
    }

    pub fn user_location(&self, position: Position) -> Option<UserLocation> {
        let file = self.get(position.file())?;
        let text: &str = &file.text;
        let offset = position.offset().min(text.len());

        let line_start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = text[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(text.len());
        let line = text[..offset].matches('\n').count() + 1;

        Some(UserLocation {
            file_name: file.name.clone(),
            line,
            column: offset - line_start,
            line_text: text[line_start..line_end].to_string(),
            is_eof: position.offset() >= text.len(),
        })
    }
}
