use crate::core::CrossReferenceGraph;

const RULE_WIDTH: usize = 60;

/// Human-readable ranking of the graph plus an optional caller lookup.
pub struct SummaryFormatter {
    top: usize,
}

impl SummaryFormatter {
    pub fn new() -> Self {
        Self { top: 10 }
    }

    pub fn with_top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }

    pub fn render(&self, graph: &CrossReferenceGraph, find: Option<&str>) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        out.push_str(&format!("\n{}\n", rule));
        out.push_str("DEPENDENCY GRAPH SUMMARY\n");
        out.push_str(&format!("{}\n", rule));
        out.push_str(&format!("Project:    {}\n", graph.project_root));
        out.push_str(&format!("Generated:  {}\n", graph.generated_at.to_rfc3339()));
        out.push_str(&format!("Files:      {}\n", graph.total_files));
        out.push_str(&format!("Functions:  {}\n", graph.functions.len()));
        out.push_str(&format!("Classes:    {}\n", graph.classes.len()));

        if !graph.parse_errors.is_empty() {
            out.push_str(&format!(
                "\nParse Errors ({}):\n",
                graph.parse_errors.len()
            ));
            for err in &graph.parse_errors {
                out.push_str(&format!("   {}\n", err));
            }
        }

        out.push_str(&format!("\nMost-Imported Files (top {}):\n", self.top));
        for (path, summary) in graph.most_imported(self.top) {
            out.push_str(&format!(
                "   {:3} importers  {}\n",
                summary.imported_by.len(),
                path
            ));
        }

        out.push_str(&format!("\nMost-Called Functions (top {}):\n", self.top));
        for (key, record) in graph.most_called(self.top) {
            out.push_str(&format!(
                "   {:3} callers  {}  ({})\n",
                record.called_by.len(),
                key,
                record.defined_in
            ));
        }

        if let Some(name) = find {
            self.render_callers(&mut out, graph, name);
        }

        out.push_str(&format!("\n{}\n\n", rule));
        out
    }

    fn render_callers(&self, out: &mut String, graph: &CrossReferenceGraph, name: &str) {
        out.push_str(&format!("\nCallers of '{}':\n", name));
        let matches = graph.find_functions(name);
        if matches.is_empty() {
            out.push_str(&format!("   (no function matching '{}' found)\n", name));
            return;
        }
        for (key, record) in matches {
            out.push_str(&format!("   Function: {}\n", key));
            out.push_str(&format!("   Defined:  {}\n", record.defined_in));
            if record.called_by.is_empty() {
                out.push_str("   Called by: (none found)\n");
            } else {
                out.push_str("   Called by:\n");
                for caller in &record.called_by {
                    out.push_str(&format!("     - {}\n", caller));
                }
            }
        }
    }

    /// Two-line stats printed after a graph file is written.
    pub fn render_brief(&self, graph: &CrossReferenceGraph) -> String {
        format!(
            "   {} functions, {} have cross-file callers\n   {} classes defined\n",
            graph.functions.len(),
            graph.functions_with_callers(),
            graph.classes.len()
        )
    }
}

impl Default for SummaryFormatter {
    fn default() -> Self {
        Self::new()
    }
}
