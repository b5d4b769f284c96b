use std::collections::VecDeque;

use anyhow::Result;
use indexmap::IndexSet;
use tree_sitter::Node as TSNode;

use super::common::{extract_text, find_children_by_kind, first_syntax_error, TreeSitterParser};
use super::LanguageParser;
use crate::core::{ClassFact, FileError, FileErrorKind, FileFact, FunctionFact};

/// Python 2 statements the grammar still accepts but Python 3 does not.
const PYTHON2_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Result<Self> {
        // Fails early if the grammar and the tree-sitter runtime disagree.
        TreeSitterParser::new(tree_sitter_python::language())?;
        Ok(Self)
    }
}

impl LanguageParser for PythonParser {
    fn parse_source(&self, rel_path: &str, source: &str) -> Result<FileFact, FileError> {
        let parser_error =
            |err: anyhow::Error| FileError::new(rel_path, FileErrorKind::Parser, err.to_string());

        let mut parser =
            TreeSitterParser::new(tree_sitter_python::language()).map_err(parser_error)?;
        let tree = parser.parse_source(source).map_err(parser_error)?;
        let root = tree.root_node();

        if let Some((line, column)) = first_syntax_error(&root, PYTHON2_STATEMENTS) {
            return Err(FileError::new(
                rel_path,
                FileErrorKind::Syntax,
                format!("invalid syntax at line {}, column {}", line, column),
            ));
        }

        let mut visitor = FileVisitor::new(rel_path, source.as_bytes());
        visitor.visit(&root);
        Ok(visitor.fact)
    }

    fn language_name(&self) -> &str {
        "python"
    }
}

/// Walks a module once, dispatching on node kind.
struct FileVisitor<'s> {
    source: &'s [u8],
    fact: FileFact,
    class_stack: Vec<String>,
}

impl<'s> FileVisitor<'s> {
    fn new(rel_path: &str, source: &'s [u8]) -> Self {
        Self {
            source,
            fact: FileFact::new(rel_path),
            class_stack: Vec::new(),
        }
    }

    fn visit(&mut self, node: &TSNode) {
        match node.kind() {
            "class_definition" => {
                self.visit_class(node);
                return;
            }
            "function_definition" => self.visit_function(node),
            "import_statement" => self.visit_import(node),
            "import_from_statement" => self.visit_import_from(node),
            "future_import_statement" => self.fact.imports.push("__future__".to_string()),
            _ => {}
        }
        self.visit_children(node);
    }

    fn visit_children(&mut self, node: &TSNode) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(&child);
        }
    }

    // import a.b, c as d
    fn visit_import(&mut self, node: &TSNode) {
        let mut cursor = node.walk();
        for name in node.children_by_field_name("name", &mut cursor) {
            let module = match name.kind() {
                "aliased_import" => name
                    .child_by_field_name("name")
                    .map(|inner| dotted_name(&inner, self.source)),
                _ => Some(dotted_name(&name, self.source)),
            };
            if let Some(module) = module.filter(|m| !m.is_empty()) {
                self.fact.imports.push(module);
            }
        }
    }

    // from a.b import c / from .a import c; `from . import c` names no module
    fn visit_import_from(&mut self, node: &TSNode) {
        let Some(module_node) = node.child_by_field_name("module_name") else {
            return;
        };
        let module = match module_node.kind() {
            "relative_import" => find_children_by_kind(&module_node, "dotted_name")
                .first()
                .map(|dotted| dotted_name(dotted, self.source)),
            _ => Some(dotted_name(&module_node, self.source)),
        };
        if let Some(module) = module.filter(|m| !m.is_empty()) {
            self.fact.imports.push(module);
        }
    }

    fn visit_function(&mut self, node: &TSNode) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };

        let mut calls = CallCollector::new(self.source);
        if let Some(parent) = node.parent() {
            if parent.kind() == "decorated_definition" {
                for decorator in find_children_by_kind(&parent, "decorator") {
                    calls.seed_children(&decorator);
                }
            }
        }
        calls.seed_children(node);

        self.fact.functions.push(FunctionFact {
            name: extract_text(&name_node, self.source).to_string(),
            class_name: self.class_stack.last().cloned(),
            line: node.start_position().row + 1,
            calls: calls.into_calls(),
        });
    }

    fn visit_class(&mut self, node: &TSNode) {
        let Some(name_node) = node.child_by_field_name("name") else {
            self.visit_children(node);
            return;
        };
        let name = extract_text(&name_node, self.source).to_string();

        let bases = node
            .child_by_field_name("superclasses")
            .map(|args| self.base_names(&args))
            .unwrap_or_default();
        let methods = node
            .child_by_field_name("body")
            .map(|body| self.method_names(&body))
            .unwrap_or_default();

        self.fact.classes.push(ClassFact {
            name: name.clone(),
            bases,
            methods,
            line: node.start_position().row + 1,
        });

        self.class_stack.push(name);
        self.visit_children(node);
        self.class_stack.pop();
    }

    // Positional bases only; keyword arguments and subscripts are skipped.
    fn base_names(&self, args: &TSNode) -> Vec<String> {
        let mut cursor = args.walk();
        args.named_children(&mut cursor)
            .filter_map(|arg| match arg.kind() {
                "identifier" => Some(extract_text(&arg, self.source).to_string()),
                "attribute" => attribute_chain(&arg, self.source),
                _ => None,
            })
            .collect()
    }

    // Direct members only; methods of nested classes stay with those classes.
    fn method_names(&self, body: &TSNode) -> Vec<String> {
        let mut cursor = body.walk();
        body.named_children(&mut cursor)
            .filter_map(|member| match member.kind() {
                "function_definition" => Some(member),
                "decorated_definition" => member
                    .child_by_field_name("definition")
                    .filter(|def| def.kind() == "function_definition"),
                _ => None,
            })
            .filter_map(|func| func.child_by_field_name("name"))
            .map(|name| extract_text(&name, self.source).to_string())
            .collect()
    }
}

/// Collects normalized call targets breadth-first, first occurrence first.
/// Decorator expressions are seeded ahead of the signature and body.
struct CallCollector<'s, 't> {
    source: &'s [u8],
    pending: VecDeque<TSNode<'t>>,
}

impl<'s, 't> CallCollector<'s, 't> {
    fn new(source: &'s [u8]) -> Self {
        Self {
            source,
            pending: VecDeque::new(),
        }
    }

    fn seed_children(&mut self, node: &TSNode<'t>) {
        let mut cursor = node.walk();
        self.pending.extend(node.children(&mut cursor));
    }

    fn into_calls(mut self) -> Vec<String> {
        let mut calls = IndexSet::new();
        while let Some(node) = self.pending.pop_front() {
            if node.kind() == "call" {
                if let Some(target) = node
                    .child_by_field_name("function")
                    .and_then(|callee| call_target(&callee, self.source))
                {
                    calls.insert(target);
                }
            }
            self.seed_children(&node);
        }
        calls.into_iter().collect()
    }
}

/// `f` for `f()`, `a.b.c` for `a.b.c()`; nothing for subscripts, lambdas and
/// other computed callees.
pub fn call_target(callee: &TSNode, source: &[u8]) -> Option<String> {
    match callee.kind() {
        "identifier" => Some(extract_text(callee, source).to_string()),
        "attribute" => attribute_chain(callee, source),
        _ => None,
    }
}

/// Dotted form of an attribute access, outermost name first. Segments above a
/// computed head are kept: `f().run` gives `run`.
pub fn attribute_chain(node: &TSNode, source: &[u8]) -> Option<String> {
    let mut parts = Vec::new();
    let mut current = *node;
    while current.kind() == "attribute" {
        if let Some(attribute) = current.child_by_field_name("attribute") {
            parts.push(extract_text(&attribute, source));
        }
        match current.child_by_field_name("object") {
            Some(object) => current = object,
            None => break,
        }
    }
    if current.kind() == "identifier" {
        parts.push(extract_text(&current, source));
    }

    if parts.is_empty() {
        None
    } else {
        parts.reverse();
        Some(parts.join("."))
    }
}

fn dotted_name(node: &TSNode, source: &[u8]) -> String {
    if node.kind() != "dotted_name" {
        return extract_text(node, source).trim().to_string();
    }
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|part| part.kind() == "identifier")
        .map(|part| extract_text(&part, source))
        .collect::<Vec<_>>()
        .join(".")
}
