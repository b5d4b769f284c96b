//! The assembler's ordered passes. Each stage reads the immutable output of
//! the earlier ones and returns a new structure:
//!
//! 1. [`ImportGraph::resolve`] - file import edges.
//! 2. [`FunctionRegistry::register`] - unique function keys.
//! 3. [`CallerIndex::resolve`] - cross-file callers per function.
//! 4. [`ClassRegistry::register`] - unique class keys.
//! 5. [`ClassUsage::derive`] - class usage from import edges.
//! 6. [`assemble`] - the final [`CrossReferenceGraph`].
//!
//! [`PassOutputs::run`] chains stages 1-5.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};

use super::facts::FileFact;
use super::graph::{ClassRecord, CrossReferenceGraph, FileSummary, FunctionRecord};
use super::matcher::CallMatcher;
use super::module_index::ModulePathIndex;
use super::registry::{ClassRegistry, FunctionRegistry};

/// File-level import edges, importer -> imported. One node per analysed file,
/// added in scan order; never holds self-edges or parallel edges.
#[derive(Debug, Clone, Default)]
pub struct ImportGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl ImportGraph {
    pub fn resolve(facts: &[FileFact], index: &ModulePathIndex) -> Self {
        let mut imports = Self::default();
        for fact in facts {
            let idx = imports.graph.add_node(fact.path.clone());
            imports.node_map.insert(fact.path.clone(), idx);
        }

        for fact in facts {
            let importer = imports.node_map[&fact.path];
            for module in &fact.imports {
                let Some(target_path) = index.resolve(module) else {
                    continue;
                };
                let Some(&target) = imports.node_map.get(target_path) else {
                    continue;
                };
                if target != importer && imports.graph.find_edge(importer, target).is_none() {
                    imports.graph.add_edge(importer, target, ());
                }
            }
        }
        imports
    }

    /// Files importing `path`, in scan order.
    pub fn importers(&self, path: &str) -> Vec<String> {
        let Some(&idx) = self.node_map.get(path) else {
            return Vec::new();
        };
        let mut importers: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .collect();
        importers.sort();
        importers
            .into_iter()
            .map(|importer| self.graph[importer].clone())
            .collect()
    }

    /// Files importing `path`, sorted by path string.
    pub fn imported_by(&self, path: &str) -> Vec<String> {
        let mut importers = self.importers(path);
        importers.sort();
        importers
    }

    pub fn imports(&self, importer: &str, target: &str) -> bool {
        match (self.node_map.get(importer), self.node_map.get(target)) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Cross-file callers per registered function key, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct CallerIndex {
    called_by: HashMap<String, Vec<String>>,
}

impl CallerIndex {
    pub fn resolve(
        facts: &[FileFact],
        registry: &FunctionRegistry,
        matcher: &dyn CallMatcher,
    ) -> Self {
        let mut index = Self::default();
        for file in facts {
            for func in &file.functions {
                for call_target in &func.calls {
                    let Some(key) = matcher.resolve(call_target, registry) else {
                        continue;
                    };
                    let Some(callee) = registry.get(key) else {
                        continue;
                    };
                    if callee.defined_in == file.path {
                        continue;
                    }
                    let callers = index.called_by.entry(key.to_string()).or_default();
                    if !callers.contains(&file.path) {
                        callers.push(file.path.clone());
                    }
                }
            }
        }
        index
    }

    pub fn callers(&self, key: &str) -> &[String] {
        self.called_by.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Files a class is considered used in: exactly the importers of its
/// defining file. References to the class name itself are not inspected.
#[derive(Debug, Clone, Default)]
pub struct ClassUsage {
    used_in: HashMap<String, Vec<String>>,
}

impl ClassUsage {
    pub fn derive(classes: &ClassRegistry, imports: &ImportGraph) -> Self {
        let used_in = classes
            .iter()
            .map(|(key, class)| (key.to_string(), imports.importers(&class.defined_in)))
            .collect();
        Self { used_in }
    }

    pub fn users(&self, key: &str) -> &[String] {
        self.used_in.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub project_root: String,
    pub generated_at: DateTime<Utc>,
}

impl Provenance {
    pub fn now(project_root: impl Into<String>) -> Self {
        Self {
            project_root: project_root.into(),
            generated_at: Utc::now(),
        }
    }
}

/// Outputs of every pass, produced strictly in order.
#[derive(Debug, Clone)]
pub struct PassOutputs {
    pub imports: ImportGraph,
    pub functions: FunctionRegistry,
    pub callers: CallerIndex,
    pub classes: ClassRegistry,
    pub usage: ClassUsage,
}

impl PassOutputs {
    pub fn run(facts: &[FileFact], index: &ModulePathIndex, matcher: &dyn CallMatcher) -> Self {
        let imports = ImportGraph::resolve(facts, index);
        log::debug!("Resolved {} import edges", imports.edge_count());

        let functions = FunctionRegistry::register(facts);
        let callers = CallerIndex::resolve(facts, &functions, matcher);
        log::debug!("Registered {} functions", functions.len());

        let classes = ClassRegistry::register(facts);
        let usage = ClassUsage::derive(&classes, &imports);
        log::debug!("Registered {} classes", classes.len());

        Self {
            imports,
            functions,
            callers,
            classes,
            usage,
        }
    }
}

pub fn assemble(
    provenance: Provenance,
    facts: &[FileFact],
    parse_errors: Vec<String>,
    passes: &PassOutputs,
) -> CrossReferenceGraph {
    let PassOutputs {
        imports,
        functions,
        callers,
        classes,
        usage,
    } = passes;

    let files: IndexMap<String, FileSummary> = facts
        .iter()
        .map(|fact| {
            let imports_from: BTreeSet<&String> = fact.imports.iter().collect();
            let summary = FileSummary {
                functions: fact.functions.iter().map(|f| f.name.clone()).collect(),
                classes: fact.classes.iter().map(|c| c.name.clone()).collect(),
                imports_from: imports_from.into_iter().cloned().collect(),
                imported_by: imports.imported_by(&fact.path),
            };
            (fact.path.clone(), summary)
        })
        .collect();

    let function_records = functions
        .iter()
        .map(|(key, func)| {
            let record = FunctionRecord {
                defined_in: func.defined_in.clone(),
                class_name: func.class_name.clone(),
                line: func.line,
                calls: func.calls.clone(),
                called_by: callers.callers(key).to_vec(),
            };
            (key.to_string(), record)
        })
        .collect();

    let class_records = classes
        .iter()
        .map(|(key, class)| {
            let record = ClassRecord {
                defined_in: class.defined_in.clone(),
                bases: class.bases.clone(),
                methods: class.methods.clone(),
                line: class.line,
                used_in: usage.users(key).to_vec(),
            };
            (key.to_string(), record)
        })
        .collect();

    CrossReferenceGraph {
        generated_at: provenance.generated_at,
        project_root: provenance.project_root,
        total_files: facts.len(),
        parse_errors,
        files,
        functions: function_records,
        classes: class_records,
    }
}
