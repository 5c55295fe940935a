//! Message document backed by its source text.

use std::io::Read;
use std::path::Path;

use jsonc_parser::cst::CstInputValue;

use super::DocumentError;
use super::edit::{
    remove_in_text,
    set_all_in_text,
    set_in_text,
    to_input_value,
};
use super::node::{
    Node,
    NodePath,
    Section,
};
use super::parse::parse_tree;

/// A structured message document.
///
/// The source text is the single source of truth: edits rewrite the text
/// through the concrete syntax tree and the node tree is rebuilt from the
/// result, so the tree always describes exactly what [`Document::save`]
/// will write.
#[derive(Debug, Clone)]
pub struct Document {
    /// Source of truth; every edit rewrites it
    text: String,
    /// Tree parsed from `text`
    root: Section,
    /// Comment above the root object
    header: Option<String>,
}

impl Document {
    /// Parses a document from text.
    pub fn parse(text: impl Into<String>) -> Result<Self, DocumentError> {
        let text = text.into();
        let tree = parse_tree(&text)?;
        Ok(Self { text, root: tree.root, header: tree.header })
    }

    /// Reads and parses a document from a byte stream.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, DocumentError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(text)
    }

    /// Reads and parses a document file.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(text)
    }

    /// Writes the document text back to `path`.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        std::fs::write(path, &self.text)?;
        Ok(())
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn root(&self) -> &Section {
        &self.root
    }

    /// Comment block written above the root object.
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    #[must_use]
    pub fn node(&self, path: &NodePath) -> Option<&Node> {
        self.root.find(path)
    }

    /// Whether `path` addresses nothing.
    ///
    /// A key holding an empty string is not virtual.
    #[must_use]
    pub fn is_virtual(&self, path: &NodePath) -> bool {
        self.node(path).is_none()
    }

    /// Raw scalar text at `path`, `None` for sections and absent keys.
    #[must_use]
    pub fn get_str(&self, path: &NodePath) -> Option<&str> {
        self.node(path).and_then(Node::as_leaf).map(|leaf| leaf.value.as_str())
    }

    /// Integer at `path`. Quoted integers are accepted.
    #[must_use]
    pub fn get_int(&self, path: &NodePath) -> Option<i64> {
        self.get_str(path).and_then(|value| value.trim().parse().ok())
    }

    /// Sets a string leaf, creating intermediate sections on demand.
    pub fn set_value(&mut self, path: &NodePath, value: &str) -> Result<(), DocumentError> {
        self.apply(set_in_text(&self.text, path, CstInputValue::String(value.to_string()))?)
    }

    pub fn set_int(&mut self, path: &NodePath, value: i64) -> Result<(), DocumentError> {
        self.apply(set_in_text(&self.text, path, CstInputValue::Number(value.to_string()))?)
    }

    /// Copies `node` to `path`, or removes the key when `node` is `None`.
    pub fn set_node(&mut self, path: &NodePath, node: Option<&Node>) -> Result<(), DocumentError> {
        let text = match node {
            Some(node) => set_in_text(&self.text, path, to_input_value(node))?,
            None => remove_in_text(&self.text, path)?,
        };
        self.apply(text)
    }

    /// Copies every `(path, node)` pair in a single edit pass.
    ///
    /// Later pairs see the sections created by earlier ones, so sibling
    /// keys of a new section end up together.
    pub fn set_nodes(&mut self, nodes: &[(NodePath, Node)]) -> Result<(), DocumentError> {
        if nodes.is_empty() {
            return Ok(());
        }
        let edits =
            nodes.iter().map(|(path, node)| (path.clone(), to_input_value(node))).collect();
        self.apply(set_all_in_text(&self.text, edits)?)
    }

    /// Installs edited text and re-parses it.
    fn apply(&mut self, text: String) -> Result<(), DocumentError> {
        *self = Self::parse(text)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;
    use crate::document::Leaf;

    const TEXT: &str = r#"// Messages for the shop
{
  "file_version": 4,
  "errors": {
    // Shown when nothing more specific applies
    "generic": "Oops",
    "empty": ""
  }
}"#;

    /// `get_int` / `get_str`
    #[googletest::test]
    fn test_reads_scalars_and_versions() {
        let doc = Document::parse(TEXT).unwrap();

        expect_that!(doc.get_int(&"file_version".into()), some(eq(4)));
        assert_eq!(doc.get_str(&"errors.generic".into()), Some("Oops"));
        assert_eq!(doc.get_str(&"errors".into()), None);
        assert_eq!(doc.header(), Some("Messages for the shop"));
    }

    /// `is_virtual`: an empty string is present
    #[googletest::test]
    fn test_empty_value_is_not_virtual() {
        let doc = Document::parse(TEXT).unwrap();

        expect_that!(doc.is_virtual(&"errors.empty".into()), eq(false));
        expect_that!(doc.is_virtual(&"errors.timeout".into()), eq(true));
        expect_that!(doc.is_virtual(&"file_version".into()), eq(false));
    }

    /// `set_value`: tree and text change together
    #[googletest::test]
    fn test_set_value_updates_tree_and_text() {
        let mut doc = Document::parse(TEXT).unwrap();

        doc.set_value(&"errors.timeout".into(), "Timed out").unwrap();
        doc.set_int(&"file_version".into(), 5).unwrap();

        assert_eq!(doc.get_str(&"errors.timeout".into()), Some("Timed out"));
        expect_that!(doc.get_int(&"file_version".into()), some(eq(5)));
        expect_that!(doc.text(), contains_substring("// Shown when nothing more specific applies"));
        assert_eq!(
            doc.node(&"errors.generic".into()).and_then(Node::comment),
            Some("Shown when nothing more specific applies")
        );
    }

    /// `set_node`
    #[googletest::test]
    fn test_set_node_copies_and_removes() {
        let mut doc = Document::parse(TEXT).unwrap();

        doc.set_node(&"errors.generic".into(), Some(&Node::Leaf(Leaf::string("Error")))).unwrap();
        assert_eq!(doc.get_str(&"errors.generic".into()), Some("Error"));

        doc.set_node(&"errors.generic".into(), None).unwrap();
        expect_that!(doc.is_virtual(&"errors.generic".into()), eq(true));
    }

    /// `load` / `save`: header and new key on disk
    #[googletest::test]
    fn test_load_and_save_round_trip_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("messages_en.json");
        std::fs::write(&path, TEXT).unwrap();

        let mut doc = Document::load(&path).unwrap();
        doc.set_value(&"errors.timeout".into(), "Timed out").unwrap();
        doc.save(&path).unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        expect_that!(saved, starts_with("// Messages for the shop"));
        expect_that!(saved, contains_substring("\"timeout\": \"Timed out\""));
    }

    /// `set_nodes`: fills a bare file with nested keys in one pass
    #[googletest::test]
    fn test_set_nodes_fills_minimal_file() {
        let mut doc = Document::parse("{\"file_version\": 1}").unwrap();
        let mut errors = Section::new();
        errors.insert("generic", Node::Leaf(Leaf::string("Error: {code}")));
        let nodes = vec![
            (NodePath::parse("errors"), Node::Section(errors)),
            (NodePath::parse("errors.timeout"), Node::Leaf(Leaf::string("Timed out"))),
            (NodePath::parse("shop.welcome"), Node::Leaf(Leaf::string("Welcome!"))),
            (NodePath::parse("shop.limit"), Node::Leaf(Leaf::number(3))),
        ];

        doc.set_nodes(&nodes).unwrap();

        assert_eq!(doc.get_str(&"errors.generic".into()), Some("Error: {code}"));
        assert_eq!(doc.get_str(&"errors.timeout".into()), Some("Timed out"));
        assert_eq!(doc.get_str(&"shop.welcome".into()), Some("Welcome!"));
        expect_that!(doc.get_int(&"shop.limit".into()), some(eq(3)));
        expect_that!(doc.get_int(&"file_version".into()), some(eq(1)));
        let reparsed = Document::parse(doc.text()).unwrap();
        expect_that!(reparsed.root().leaf_paths().len(), eq(5));
    }

    /// `set_nodes`: an empty batch leaves the text as it was
    #[googletest::test]
    fn test_set_nodes_empty_batch() {
        let mut doc = Document::parse(TEXT).unwrap();

        doc.set_nodes(&[]).unwrap();

        expect_that!(doc.text(), eq(TEXT));
    }

    #[googletest::test]
    fn test_from_reader_parses_bytes() {
        let doc = Document::from_reader(TEXT.as_bytes()).unwrap();

        expect_that!(doc.root().len(), eq(2));
    }

    /// `load`: missing file
    #[rstest]
    fn test_load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = Document::load(&temp_dir.path().join("missing.json"));

        assert!(matches!(result, Err(DocumentError::Io(_))));
    }
}
