use indexmap::IndexMap;
use std::collections::HashMap;

use super::facts::FileFact;
use super::graph::{qualify, qualify_at_line};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredFunction {
    pub name: String,
    pub defined_in: String,
    pub class_name: Option<String>,
    pub line: usize,
    pub calls: Vec<String>,
}

/// Every function under a unique key, in registration (scan) order.
///
/// A natural key shared by more than one definition (same name, same
/// enclosing class name, compared as strings) is prefixed with the defining
/// file: `a.py::run`. Same-named classes in different files count as one
/// context here.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    entries: IndexMap<String, RegisteredFunction>,
    first_by_name: HashMap<String, usize>,
}

impl FunctionRegistry {
    pub fn register(facts: &[FileFact]) -> Self {
        let mut contexts: HashMap<(&str, Option<&str>), usize> = HashMap::new();
        for func in facts.iter().flat_map(|file| &file.functions) {
            *contexts
                .entry((func.name.as_str(), func.class_name.as_deref()))
                .or_insert(0) += 1;
        }

        let mut registry = Self::default();
        for file in facts {
            for func in &file.functions {
                let natural_key = func.natural_key();
                let shared = contexts
                    .get(&(func.name.as_str(), func.class_name.as_deref()))
                    .copied()
                    .unwrap_or(0)
                    > 1;

                let mut key = if shared {
                    qualify(&file.path, &natural_key)
                } else {
                    natural_key.clone()
                };
                if registry.entries.contains_key(&key) {
                    key = qualify_at_line(&file.path, func.line, &natural_key);
                }
                if registry.entries.contains_key(&key) {
                    log::debug!("Dropping duplicate function key {}", key);
                    continue;
                }

                let position = registry.entries.len();
                registry
                    .first_by_name
                    .entry(func.name.clone())
                    .or_insert(position);
                registry.entries.insert(
                    key,
                    RegisteredFunction {
                        name: func.name.clone(),
                        defined_in: file.path.clone(),
                        class_name: func.class_name.clone(),
                        line: func.line,
                        calls: func.calls.clone(),
                    },
                );
            }
        }
        registry
    }

    pub fn get(&self, key: &str) -> Option<&RegisteredFunction> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegisteredFunction)> {
        self.entries.iter().map(|(key, func)| (key.as_str(), func))
    }

    /// Earliest registered key whose simple name is `name`.
    pub fn first_named(&self, name: &str) -> Option<&str> {
        let position = *self.first_by_name.get(name)?;
        self.entries.get_index(position).map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredClass {
    pub name: String,
    pub defined_in: String,
    pub bases: Vec<String>,
    pub methods: Vec<String>,
    pub line: usize,
}

/// Classes keyed by bare name; the first definition seen keeps the bare
/// key and later ones are file-prefixed.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    entries: IndexMap<String, RegisteredClass>,
}

impl ClassRegistry {
    pub fn register(facts: &[FileFact]) -> Self {
        let mut registry = Self::default();
        for file in facts {
            for class in &file.classes {
                let mut key = if registry.entries.contains_key(&class.name) {
                    qualify(&file.path, &class.name)
                } else {
                    class.name.clone()
                };
                if registry.entries.contains_key(&key) {
                    key = qualify_at_line(&file.path, class.line, &class.name);
                }
                if registry.entries.contains_key(&key) {
                    log::debug!("Dropping duplicate class key {}", key);
                    continue;
                }

                registry.entries.insert(
                    key,
                    RegisteredClass {
                        name: class.name.clone(),
                        defined_in: file.path.clone(),
                        bases: class.bases.clone(),
                        methods: class.methods.clone(),
                        line: class.line,
                    },
                );
            }
        }
        registry
    }

    pub fn get(&self, key: &str) -> Option<&RegisteredClass> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegisteredClass)> {
        self.entries.iter().map(|(key, class)| (key.as_str(), class))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
