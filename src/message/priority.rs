//! Sibling ordering for replacement sources.
//!
//! The loader substitutes a replacement marker only with text that is
//! already in the table being built. Children leading to a replacement
//! source are therefore visited before their siblings.

use crate::config::MessageReplacements;
use crate::document::{
    Node,
    NodePath,
    Section,
};

/// Orders section children so replacement sources resolve first.
#[derive(Debug, Clone, Default)]
pub struct PriorityResolver {
    /// Replacement source paths in configuration order.
    targets: Vec<NodePath>,
    /// Length of the longest target path.
    max_depth: usize,
}

impl PriorityResolver {
    #[must_use]
    pub fn new(replacements: &MessageReplacements) -> Self {
        let targets: Vec<NodePath> = replacements
            .entries()
            .iter()
            .map(|replacement| NodePath::parse(&replacement.key))
            .collect();
        let max_depth = targets.iter().map(NodePath::len).max().unwrap_or(0);
        Self { targets, max_depth }
    }

    /// Returns the children of `section` in traversal order.
    ///
    /// `parent` is the path of `section` and `depth` its distance from the
    /// root. Children on the way to a replacement source come first, ranked
    /// by the first replacement they lead to; every other child keeps its
    /// document order.
    #[must_use]
    pub fn order<'a>(
        &self,
        section: &'a Section,
        parent: &NodePath,
        depth: usize,
    ) -> Vec<(&'a str, &'a Node)> {
        let mut children: Vec<(&'a str, &'a Node)> = section.iter().collect();
        if depth >= self.max_depth {
            return children;
        }

        children.sort_by_key(|(name, _)| self.rank(&parent.child(name), depth));
        children
    }

    /// Index of the first target under `path`; unrelated paths rank last.
    fn rank(&self, path: &NodePath, depth: usize) -> usize {
        self.targets
            .iter()
            .position(|target| target.len() > depth && path.is_prefix_of(target))
            .unwrap_or(usize::MAX)
    }
}
