//! Message document tree.

use std::fmt;

/// How a leaf value was written in the source document.
///
/// Kept so that copying a leaf into another document does not turn
/// `"file_version": 5` into `"file_version": "5"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Number,
    Boolean,
}

/// A scalar value with the comment attached above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub value: String,
    pub kind: ScalarKind,
    /// Comment lines directly preceding the key, comment markers stripped.
    pub comment: Option<String>,
}

impl Leaf {
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self { value: value.into(), kind: ScalarKind::String, comment: None }
    }

    #[must_use]
    pub fn number(value: i64) -> Self {
        Self { value: value.to_string(), kind: ScalarKind::Number, comment: None }
    }
}

/// Ordered named children. Insertion order is the document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Children in document order
    children: Vec<(String, Node)>,
    pub comment: Option<String>,
}

/// A document node is either a leaf or a section, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Leaf),
    Section(Section),
}

impl Node {
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Section(_) => None,
        }
    }

    #[must_use]
    pub const fn as_section(&self) -> Option<&Section> {
        match self {
            Self::Section(section) => Some(section),
            Self::Leaf(_) => None,
        }
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => leaf.comment.as_deref(),
            Self::Section(section) => section.comment.as_deref(),
        }
    }
}

impl Section {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a child, replacing an existing child with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) {
        let name = name.into();
        if let Some(slot) = self.children.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = node;
        } else {
            self.children.push((name, node));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|(n, _)| n == name).map(|(_, node)| node)
    }

    /// Iterates children in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Resolves a path relative to this section.
    ///
    /// Returns `None` when nothing is addressed there, including when an
    /// intermediate segment is a leaf.
    #[must_use]
    pub fn find(&self, path: &NodePath) -> Option<&Node> {
        let (first, rest) = path.segments().split_first()?;
        let child = self.get(first)?;
        if rest.is_empty() {
            return Some(child);
        }
        child.as_section()?.find(&NodePath::from_segments(rest.to_vec()))
    }

    /// Collects the paths of every leaf below this section, depth first.
    #[must_use]
    pub fn leaf_paths(&self) -> Vec<NodePath> {
        let mut result = Vec::new();
        collect_leaf_paths(self, &NodePath::root(), &mut result);
        result
    }
}

fn collect_leaf_paths(section: &Section, prefix: &NodePath, result: &mut Vec<NodePath>) {
    for (name, node) in section.iter() {
        let path = prefix.child(name);
        match node {
            Node::Leaf(_) => result.push(path),
            Node::Section(child) => collect_leaf_paths(child, &path, result),
        }
    }
}

/// Address of a node: the names from the root down to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath {
    /// Non-empty segment names
    segments: Vec<String>,
}

impl NodePath {
    #[must_use]
    pub const fn root() -> Self {
        Self { segments: Vec::new() }
    }

    /// Splits a dotted path. Empty segments are dropped, so `"a..b."` is `a.b`.
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        Self {
            segments: dotted
                .split('.')
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .map(ToString::to_string)
                .collect(),
        }
    }

    #[must_use]
    pub const fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// Name of the addressed node, `None` for the root.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether `self` addresses `other` or one of its ancestors.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.segments.starts_with(&self.segments)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for NodePath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}
