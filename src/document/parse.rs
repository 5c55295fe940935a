//! Builds the document tree from JSONC text.

use jsonc_parser::ast::{
    Comment,
    Object,
    ObjectPropName,
    Value,
};
use jsonc_parser::{
    CollectOptions,
    CommentCollectionStrategy,
    CommentMap,
    ParseOptions,
};

use super::DocumentError;
use super::node::{
    Leaf,
    Node,
    ScalarKind,
    Section,
};

/// Parsed tree plus the comment block above the root object.
#[derive(Debug)]
pub(super) struct ParsedTree {
    pub(super) root: Section,
    pub(super) header: Option<String>,
}

/// Parses `text` into a section tree with comments attached to their keys.
///
/// Blank text yields an empty root so that a freshly created file can be
/// filled by the updater.
pub(super) fn parse_tree(text: &str) -> Result<ParsedTree, DocumentError> {
    let collect_options =
        CollectOptions { comments: CommentCollectionStrategy::Separate, tokens: false };
    let result = jsonc_parser::parse_to_ast(text, &collect_options, &ParseOptions::default())
        .map_err(|e| DocumentError::Parse(e.to_string()))?;

    let comments = result.comments.as_ref();
    match result.value {
        None => Ok(ParsedTree { root: Section::new(), header: None }),
        Some(Value::Object(object)) => Ok(ParsedTree {
            header: comments_at(comments, object.range.start),
            root: build_section(&object, comments),
        }),
        Some(_) => Err(DocumentError::NotAnObject),
    }
}

/// Converts an AST object, skipping arrays and nulls.
fn build_section(object: &Object<'_>, comments: Option<&CommentMap<'_>>) -> Section {
    let mut section = Section::new();
    for prop in &object.properties {
        let name = match &prop.name {
            ObjectPropName::String(lit) => lit.value.to_string(),
            ObjectPropName::Word(word) => word.value.to_string(),
        };
        let comment = comments_at(comments, prop.range.start);

        let node = match &prop.value {
            Value::StringLit(lit) => Node::Leaf(Leaf {
                value: lit.value.to_string(),
                kind: ScalarKind::String,
                comment,
            }),
            Value::NumberLit(lit) => Node::Leaf(Leaf {
                value: lit.value.to_string(),
                kind: ScalarKind::Number,
                comment,
            }),
            Value::BooleanLit(lit) => Node::Leaf(Leaf {
                value: lit.value.to_string(),
                kind: ScalarKind::Boolean,
                comment,
            }),
            Value::Object(child) => {
                let mut child = build_section(child, comments);
                child.comment = comment;
                Node::Section(child)
            }
            Value::Array(_) | Value::NullKeyword(_) => {
                tracing::debug!(key = %name, "Skipping non-message value");
                continue;
            }
        };
        section.insert(name, node);
    }
    section
}

/// Joins the comments that lead the token starting at `position`.
fn comments_at(comments: Option<&CommentMap<'_>>, position: usize) -> Option<String> {
    let list = comments?.get(&position)?;
    let lines: Vec<&str> = list
        .iter()
        .map(|comment| match comment {
            Comment::Line(line) => line.text.trim(),
            Comment::Block(block) => block.text.trim(),
        })
        .collect();
    if lines.is_empty() { None } else { Some(lines.join("\n")) }
}
