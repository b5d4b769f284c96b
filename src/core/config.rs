use std::collections::BTreeSet;
use std::path::Path;

/// Directory names never descended into, in addition to hidden directories.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    "__pycache__",
    ".git",
    ".venv",
    "venv",
    "env",
    "node_modules",
    ".tox",
];

pub const DEFAULT_EXTENSION: &str = "py";

/// What the scanner treats as source and which directories it prunes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub extension: String,
    pub skip_dirs: BTreeSet<String>,
    pub skip_hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect(),
            skip_hidden: true,
        }
    }
}

impl ScanConfig {
    pub fn with_skip_dir(mut self, name: impl Into<String>) -> Self {
        self.skip_dirs.insert(name.into());
        self
    }

    pub fn with_hidden_dirs(mut self, include: bool) -> Self {
        self.skip_hidden = !include;
        self
    }

    pub fn is_skipped_dir(&self, name: &str) -> bool {
        self.skip_dirs.contains(name) || (self.skip_hidden && name.starts_with('.'))
    }

    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext == self.extension)
    }

    /// Suffix stripped from a relative path to form its module identifier.
    pub fn source_suffix(&self) -> String {
        format!(".{}", self.extension)
    }
}
