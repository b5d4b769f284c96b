pub mod common;
pub mod python;

use std::path::Path;

use crate::core::{FileError, FileFact};
use common::read_source;

pub trait LanguageParser {
    /// Extracts the structural facts of one file, or reports why it could not.
    fn parse_source(&self, rel_path: &str, source: &str) -> Result<FileFact, FileError>;

    fn language_name(&self) -> &str;

    fn parse_file(&self, file_path: &Path, rel_path: &str) -> Result<FileFact, FileError> {
        let source = read_source(file_path).map_err(|err| FileError::read(rel_path, &err))?;
        self.parse_source(rel_path, &source)
    }
}
