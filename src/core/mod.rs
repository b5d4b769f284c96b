pub mod analyzer;
pub mod config;
pub mod error;
pub mod facts;
pub mod graph;
pub mod matcher;
pub mod module_index;
pub mod passes;
pub mod registry;
pub mod scanner;

pub use analyzer::{AnalyzedFiles, CodebaseAnalyzer};
pub use config::ScanConfig;
pub use error::{FileError, FileErrorKind, XrefError};
pub use facts::{ClassFact, FileFact, FunctionFact};
pub use graph::{ClassRecord, CrossReferenceGraph, FileSummary, FunctionRecord};
pub use matcher::{CallMatcher, NameHeuristicMatcher};
pub use module_index::ModulePathIndex;
pub use passes::{assemble, PassOutputs, Provenance};
pub use registry::{ClassRegistry, FunctionRegistry};
pub use scanner::{FileScanner, SourceFile};
