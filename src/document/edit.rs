//! Formatting-preserving edits on JSONC text.
//!
//! Every edit parses the text into a concrete syntax tree, changes one
//! property and prints the tree back, so comments, the header and the
//! existing indentation survive untouched.

use jsonc_parser::ParseOptions;
use jsonc_parser::cst::{
    CstInputValue,
    CstObject,
    CstRootNode,
};

use super::DocumentError;
use super::node::{
    Leaf,
    Node,
    NodePath,
    ScalarKind,
    Section,
};

/// Converts a tree node into a CST input value.
pub(super) fn to_input_value(node: &Node) -> CstInputValue {
    match node {
        Node::Leaf(leaf) => leaf_input_value(leaf),
        Node::Section(section) => section_input_value(section),
    }
}

/// Keeps numbers and booleans unquoted.
fn leaf_input_value(leaf: &Leaf) -> CstInputValue {
    match leaf.kind {
        ScalarKind::String => CstInputValue::String(leaf.value.clone()),
        ScalarKind::Number => CstInputValue::Number(leaf.value.clone()),
        ScalarKind::Boolean => CstInputValue::Bool(leaf.value == "true"),
    }
}

fn section_input_value(section: &Section) -> CstInputValue {
    CstInputValue::Object(
        section.iter().map(|(name, node)| (name.to_string(), to_input_value(node))).collect(),
    )
}

/// Sets `path` to `value`, creating or replacing intermediate objects.
pub(super) fn set_in_text(
    text: &str,
    path: &NodePath,
    value: CstInputValue,
) -> Result<String, DocumentError> {
    set_all_in_text(text, vec![(path.clone(), value)])
}

/// Applies every `(path, value)` assignment on one syntax tree, in order.
pub(super) fn set_all_in_text(
    text: &str,
    edits: Vec<(NodePath, CstInputValue)>,
) -> Result<String, DocumentError> {
    let Some((first, _)) = edits.first() else {
        return Ok(text.to_string());
    };
    let root = parse_cst(text, first)?;

    for (path, value) in edits {
        let Some((last, parents)) = path.segments().split_last() else {
            return Err(edit_error(&path, "cannot replace the document root"));
        };
        let mut current = root.object_value_or_set();
        for part in parents {
            current = current.object_value_or_set(part);
        }
        set_property(&current, last, value);
    }

    Ok(root.to_string())
}

/// Removes the property at `path`. Absent paths leave the text unchanged.
pub(super) fn remove_in_text(text: &str, path: &NodePath) -> Result<String, DocumentError> {
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(edit_error(path, "cannot remove the document root"));
    };
    let root = parse_cst(text, path)?;

    let Some(mut current) = root.object_value() else {
        return Ok(text.to_string());
    };
    for part in parents {
        match current.object_value(part) {
            Some(child) => current = child,
            None => return Ok(text.to_string()),
        }
    }
    if let Some(prop) = current.get(last) {
        prop.remove();
    }

    Ok(root.to_string())
}

/// Replaces the value of `name`, or appends it.
fn set_property(object: &CstObject, name: &str, value: CstInputValue) {
    if let Some(prop) = object.get(name) {
        prop.set_value(value);
    } else {
        object.append(name, value);
    }
}

fn parse_cst(text: &str, path: &NodePath) -> Result<CstRootNode, DocumentError> {
    CstRootNode::parse(text, &ParseOptions::default())
        .map_err(|e| edit_error(path, &e.to_string()))
}

fn edit_error(path: &NodePath, message: &str) -> DocumentError {
    DocumentError::Edit { path: path.to_string(), message: message.to_string() }
}
