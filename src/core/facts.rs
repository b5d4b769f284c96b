use serde::{Deserialize, Serialize};

/// A function or method declaration and the calls made from its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionFact {
    pub name: String,
    pub class_name: Option<String>,
    pub line: usize,
    /// Call targets in order of first occurrence, without duplicates.
    pub calls: Vec<String>,
}

impl FunctionFact {
    /// `Class.name` for methods, `name` otherwise.
    pub fn natural_key(&self) -> String {
        match &self.class_name {
            Some(class_name) => format!("{}.{}", class_name, self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFact {
    pub name: String,
    pub bases: Vec<String>,
    pub methods: Vec<String>,
    pub line: usize,
}

/// Everything extracted from one successfully parsed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFact {
    pub path: String,
    /// Module identifiers as written, in source order, duplicates kept.
    pub imports: Vec<String>,
    pub functions: Vec<FunctionFact>,
    pub classes: Vec<ClassFact>,
}

impl FileFact {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            imports: Vec::new(),
            functions: Vec::new(),
            classes: Vec::new(),
        }
    }
}
