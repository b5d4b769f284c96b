use anyhow::Result;
use rayon::prelude::*;
use std::path::Path;

use super::passes::{assemble, PassOutputs, Provenance};
use super::{
    CallMatcher, CrossReferenceGraph, FileError, FileFact, FileScanner, ModulePathIndex,
    NameHeuristicMatcher, ScanConfig, SourceFile,
};
use crate::parsers::{python::PythonParser, LanguageParser};

/// Output of the analyze stage, in scan order.
#[derive(Debug, Clone, Default)]
pub struct AnalyzedFiles {
    pub facts: Vec<FileFact>,
    pub errors: Vec<FileError>,
}

impl AnalyzedFiles {
    pub fn parse_errors(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

pub struct CodebaseAnalyzer {
    file_scanner: FileScanner,
    parser: Box<dyn LanguageParser + Send + Sync>,
    matcher: Box<dyn CallMatcher + Send + Sync>,
}

impl CodebaseAnalyzer {
    pub fn new() -> Result<Self> {
        Self::with_config(ScanConfig::default())
    }

    pub fn with_config(config: ScanConfig) -> Result<Self> {
        Ok(Self {
            file_scanner: FileScanner::with_config(config),
            parser: Box::new(PythonParser::new()?),
            matcher: Box::new(NameHeuristicMatcher::new()),
        })
    }

    pub fn with_matcher(mut self, matcher: impl CallMatcher + Send + Sync + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// Builds the cross-reference graph for every source file under
    /// `root_path`. Only an invalid root is an error; per-file failures end
    /// up in `parse_errors`.
    pub fn analyze(&self, root_path: &Path) -> Result<CrossReferenceGraph> {
        let files = self.file_scanner.scan_directory(root_path)?;
        log::info!(
            "Found {} {} files to analyze",
            files.len(),
            self.parser.language_name()
        );

        let analyzed = self.analyze_files(&files);
        if !analyzed.errors.is_empty() {
            log::warn!("{} files could not be parsed", analyzed.errors.len());
        }

        let index = ModulePathIndex::build(
            self.file_scanner.config().source_suffix(),
            analyzed.facts.iter().map(|fact| fact.path.as_str()),
        );
        let passes = PassOutputs::run(&analyzed.facts, &index, self.matcher.as_ref());

        Ok(assemble(
            Provenance::now(root_path.display().to_string()),
            &analyzed.facts,
            analyzed.parse_errors(),
            &passes,
        ))
    }

    /// Parses each file independently; results keep the input order.
    pub fn analyze_files(&self, files: &[SourceFile]) -> AnalyzedFiles {
        let results: Vec<Result<FileFact, FileError>> = files
            .par_iter()
            .map(|file| self.parser.parse_file(&file.path, &file.rel_path))
            .collect();

        let mut analyzed = AnalyzedFiles::default();
        for result in results {
            match result {
                Ok(fact) => analyzed.facts.push(fact),
                Err(err) => {
                    log::warn!("Failed to parse {}", err);
                    analyzed.errors.push(err);
                }
            }
        }
        analyzed
    }
}
