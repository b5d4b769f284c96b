use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Separates a file prefix from the natural key in a qualified key.
pub const FILE_QUALIFIER: &str = "::";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub imports_from: Vec<String>,
    pub imported_by: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub defined_in: String,
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub line: usize,
    pub calls: Vec<String>,
    pub called_by: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub defined_in: String,
    pub bases: Vec<String>,
    pub methods: Vec<String>,
    pub line: usize,
    pub used_in: Vec<String>,
}

/// The assembled cross-reference graph. Read-only once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossReferenceGraph {
    pub generated_at: DateTime<Utc>,
    pub project_root: String,
    pub total_files: usize,
    pub parse_errors: Vec<String>,
    pub files: IndexMap<String, FileSummary>,
    pub functions: IndexMap<String, FunctionRecord>,
    pub classes: IndexMap<String, ClassRecord>,
}

impl CrossReferenceGraph {
    /// Files with at least one importer, most imported first.
    pub fn most_imported(&self, limit: usize) -> Vec<(&str, &FileSummary)> {
        let mut ranked: Vec<_> = self
            .files
            .iter()
            .filter(|(_, summary)| !summary.imported_by.is_empty())
            .map(|(path, summary)| (path.as_str(), summary))
            .collect();
        ranked.sort_by(|a, b| b.1.imported_by.len().cmp(&a.1.imported_by.len()));
        ranked.truncate(limit);
        ranked
    }

    /// Functions with at least one cross-file caller, most called first.
    pub fn most_called(&self, limit: usize) -> Vec<(&str, &FunctionRecord)> {
        let mut ranked: Vec<_> = self
            .functions
            .iter()
            .filter(|(_, record)| !record.called_by.is_empty())
            .map(|(key, record)| (key.as_str(), record))
            .collect();
        ranked.sort_by(|a, b| b.1.called_by.len().cmp(&a.1.called_by.len()));
        ranked.truncate(limit);
        ranked
    }

    /// Case-insensitive substring search over function keys.
    pub fn find_functions(&self, pattern: &str) -> Vec<(&str, &FunctionRecord)> {
        let needle = pattern.to_lowercase();
        self.functions
            .iter()
            .filter(|(key, _)| key.to_lowercase().contains(&needle))
            .map(|(key, record)| (key.as_str(), record))
            .collect()
    }

    pub fn functions_with_callers(&self) -> usize {
        self.functions
            .values()
            .filter(|record| !record.called_by.is_empty())
            .count()
    }
}

/// `a.py::C.run` -> `C.run`
pub fn unqualified_key(key: &str) -> &str {
    key.rsplit(FILE_QUALIFIER).next().unwrap_or(key)
}

/// `a.py::C.run` -> `run`
pub fn simple_name(key: &str) -> &str {
    let unqualified = unqualified_key(key);
    unqualified.rsplit('.').next().unwrap_or(unqualified)
}

pub fn qualify(file: &str, key: &str) -> String {
    format!("{}{}{}", file, FILE_QUALIFIER, key)
}

/// Used when a file defines the same natural key more than once.
pub fn qualify_at_line(file: &str, line: usize, key: &str) -> String {
    format!("{}:{}{}{}", file, line, FILE_QUALIFIER, key)
}
