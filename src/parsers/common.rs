use anyhow::Result;
use std::fs;
use std::path::Path;
use tree_sitter::{Language, Node as TSNode, Parser, Tree};

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(language)?;
        Ok(Self { parser })
    }

    pub fn parse_source(&mut self, source: &str) -> Result<Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("parser produced no tree"))
    }
}

/// Reads a file as text. Invalid UTF-8 is replaced rather than rejected.
pub fn read_source(file_path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(file_path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

pub fn extract_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.byte_range()]).unwrap_or("")
}

/// 1-based (line, column) of the first ERROR or MISSING node, or of the first
/// node whose kind the grammar accepts but the language itself rejects.
pub fn first_syntax_error(root: &TSNode, rejected_kinds: &[&str]) -> Option<(usize, usize)> {
    if !root.has_error() && rejected_kinds.is_empty() {
        return None;
    }
    if root.is_error() || root.is_missing() || rejected_kinds.contains(&root.kind()) {
        let position = root.start_position();
        return Some((position.row + 1, position.column + 1));
    }
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if let Some(found) = first_syntax_error(&child, rejected_kinds) {
            return Some(found);
        }
    }
    if !root.has_error() {
        return None;
    }
    // has_error without a reachable error node: report the root itself
    let position = root.start_position();
    Some((position.row + 1, position.column + 1))
}

pub fn find_children_by_kind<'a>(node: &TSNode<'a>, kind: &str) -> Vec<TSNode<'a>> {
    let mut results = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == kind {
            results.push(child);
        }
    }
    results
}
