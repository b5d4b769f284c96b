use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Conditions that stop a run before any file is analysed.
#[derive(Error, Debug)]
pub enum XrefError {
    #[error("project root not found: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("project root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),
    #[error("failed to read project root {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileErrorKind {
    Syntax,
    Read,
    Parser,
}

impl FileErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FileErrorKind::Syntax => "SyntaxError",
            FileErrorKind::Read => "ReadError",
            FileErrorKind::Parser => "ParserError",
        }
    }
}

/// A per-file failure. Never fatal: it is rendered into `parse_errors`
/// and the file is left out of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    pub path: String,
    pub kind: FileErrorKind,
    pub message: String,
}

impl FileError {
    pub fn new(path: impl Into<String>, kind: FileErrorKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn read(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::new(path, FileErrorKind::Read, err.to_string())
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.path, self.kind.as_str(), self.message)
    }
}

impl std::error::Error for FileError {}
