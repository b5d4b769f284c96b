use std::collections::HashMap;

/// Maps module identifiers, and every ancestor package prefix, to a file.
///
/// A file always claims its own identifier. Package prefixes are claimed by
/// the first file that reaches them, so `import pkg` resolves to *some* file
/// under `pkg/` and nothing stronger can be assumed about which one.
#[derive(Debug, Clone, Default)]
pub struct ModulePathIndex {
    suffix: String,
    modules: HashMap<String, String>,
}

impl ModulePathIndex {
    pub fn new(source_suffix: impl Into<String>) -> Self {
        Self {
            suffix: source_suffix.into(),
            modules: HashMap::new(),
        }
    }

    pub fn build<'a>(
        source_suffix: impl Into<String>,
        paths: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut index = Self::new(source_suffix);
        for path in paths {
            index.insert_file(path);
        }
        index
    }

    /// `src/ui/app.py` -> `src.ui.app`
    pub fn module_id(&self, rel_path: &str) -> String {
        let dotted = rel_path.replace(['/', '\\'], ".");
        match dotted.strip_suffix(self.suffix.as_str()) {
            Some(stripped) if !self.suffix.is_empty() => stripped.to_string(),
            _ => dotted,
        }
    }

    pub fn insert_file(&mut self, rel_path: &str) {
        let module_id = self.module_id(rel_path);

        let mut prefix = String::with_capacity(module_id.len());
        let segments: Vec<&str> = module_id.split('.').collect();
        for segment in &segments[..segments.len().saturating_sub(1)] {
            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(segment);
            self.modules
                .entry(prefix.clone())
                .or_insert_with(|| rel_path.to_string());
        }

        self.modules.insert(module_id, rel_path.to_string());
    }

    pub fn resolve(&self, module: &str) -> Option<&str> {
        self.modules.get(module).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
