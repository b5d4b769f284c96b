use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::CrossReferenceGraph;

pub const DEFAULT_OUTPUT_NAME: &str = "DEPENDENCY_GRAPH.json";

/// Serializes the graph with the field layout external consumers read.
pub struct GraphJsonWriter {
    pretty: bool,
}

impl GraphJsonWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn format_graph(&self, graph: &CrossReferenceGraph) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(graph)?
        } else {
            serde_json::to_string(graph)?
        };
        Ok(json)
    }

    pub fn write_to_file(&self, graph: &CrossReferenceGraph, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = self.format_graph(graph)?;
        fs::write(output_path, json)
            .with_context(|| format!("writing {}", output_path.display()))?;
        Ok(())
    }
}

impl Default for GraphJsonWriter {
    fn default() -> Self {
        Self::new()
    }
}
