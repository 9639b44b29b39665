#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    errors::errors::{Error, ErrorTip},
    source::source_map::{FileId, SourceMap},
};

pub mod ast;
pub mod config;
pub mod driver;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod session;
pub mod source;
pub mod type_checker;
pub mod types;

extern crate regex;

/// A byte offset inside one registered source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(pub u32, pub FileId);

impl Position {
    pub fn null() -> Self {
        Position(0, FileId::UNKNOWN)
    }

    pub fn offset(&self) -> usize {
        self.0 as usize
    }

    pub fn file(&self) -> FileId {
        self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    pub fn at(position: Position) -> Self {
        Span {
            start: position,
            end: position,
        }
    }

    pub fn null() -> Self {
        Span::at(Position::null())
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(&self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
        }
    }
}

/// Renders a diagnostic the way the command line shows it.
///
/// ```text
/// error[TypeMatchError]: Expected type `int`, received `bool`
/// -> final.el:20:9
///    |
/// 20 | let a: int = true;
///    | -------------^
/// ```
pub fn render_error(error: &Error, sources: &SourceMap) -> String {
    let mut out = String::new();

    match error.get_tip() {
        ErrorTip::None => out.push_str(&format!(
            "{}[{}]\n",
            error.get_level(),
            error.get_error_name()
        )),
        tip => out.push_str(&format!(
            "{}[{}]: {}\n",
            error.get_level(),
            error.get_error_name(),
            tip
        )),
    }

    let Some(location) = sources.user_location(*error.get_position()) else {
        return out;
    };

    out.push_str(&format!("-> {}\n", location));

    let line_string = location.line.to_string();
    let padding = line_string.len() + 2;
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text, removed_whitespace) = remove_starting_whitespace(&location.line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text.trim_end()));

    let arrows = location.column.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.1, self.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        errors::errors::{Error, ErrorImpl},
        source::source_map::SourceMap,
        Position,
    };

    #[test]
    fn test_render_error_points_at_column() {
        let mut sources = SourceMap::new();
        let file = sources.add("test.el", "func main() {\n    let a: int = true;\n}\n");
        let error = Error::new(
            ErrorImpl::TypeMatchError {
                expected: "int".to_string(),
                received: "bool".to_string(),
            },
            Position(31, file),
        );

        let rendered = super::render_error(&error, &sources);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "error[TypeMatchError]: Expected type `int`, received `bool`");
        assert_eq!(lines[1], "-> test.el:2:18");
        assert_eq!(lines[3], "2 | let a: int = true;");
        assert_eq!(lines[4], "  | -------------^");
    }

    #[test]
    fn test_render_error_without_source() {
        let sources = SourceMap::new();
        let error = Error::new(ErrorImpl::CompilationAborted { errors: 5 }, Position::null());

        let rendered = super::render_error(&error, &sources);
        assert_eq!(rendered.lines().count(), 1);
    }
}
