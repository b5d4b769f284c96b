use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ScanConfig, XrefError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Root-relative path with `/` separators; the file's identity in the graph.
    pub rel_path: String,
}

pub struct FileScanner {
    config: ScanConfig,
}

impl FileScanner {
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Walks `root_path` and returns every source file, sorted by path.
    ///
    /// A missing or unreadable root is fatal. Unreadable entries below the
    /// root are logged and skipped.
    pub fn scan_directory(&self, root_path: &Path) -> Result<Vec<SourceFile>> {
        if !root_path.exists() {
            return Err(XrefError::RootNotFound(root_path.to_path_buf()).into());
        }
        if !root_path.is_dir() {
            return Err(XrefError::RootNotDirectory(root_path.to_path_buf()).into());
        }

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !self
                        .config
                        .is_skipped_dir(&entry.file_name().to_string_lossy())
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(XrefError::Walk {
                        path: root_path.to_path_buf(),
                        source: err,
                    }
                    .into());
                }
                Err(err) => {
                    log::warn!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if !entry.path().is_file() || !self.config.is_source_file(entry.path()) {
                continue;
            }

            let Some(rel_path) = relative_path(root_path, entry.path()) else {
                log::warn!(
                    "Skipping {}: not below {}",
                    entry.path().display(),
                    root_path.display()
                );
                continue;
            };

            files.push(SourceFile {
                path: entry.path().to_path_buf(),
                rel_path,
            });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        log::debug!("Scanned {} source files under {}", files.len(), root_path.display());
        Ok(files)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Root-relative path joined with `/` regardless of platform.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
