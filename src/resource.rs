//! Access to the bundled message files.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{
    Cursor,
    Read,
};
use std::path::PathBuf;

/// Supplies bundled resources by path (e.g. `messages/messages_en.json`).
pub trait ResourceProvider {
    /// Opens the resource at `path`, `None` when the bundle has no such file.
    fn resource(&self, path: &str) -> Option<Box<dyn Read + '_>>;
}

impl fmt::Debug for dyn ResourceProvider + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResourceProvider")
    }
}

/// Bundle laid out as plain files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    /// Directory holding `messages/...`
    root: PathBuf,
}

impl DirectoryResources {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceProvider for DirectoryResources {
    fn resource(&self, path: &str) -> Option<Box<dyn Read + '_>> {
        let full_path = path.split('/').fold(self.root.clone(), |acc, part| acc.join(part));
        match File::open(&full_path) {
            Ok(file) => Some(Box::new(file)),
            Err(e) => {
                tracing::debug!("Bundled resource {:?} not available: {}", full_path, e);
                None
            }
        }
    }
}

/// Bundle held in memory, e.g. files compiled in with `include_str!`.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResources {
    /// Contents by resource path
    files: HashMap<String, Vec<u8>>,
}

impl EmbeddedResources {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource, replacing any previous content at `path`.
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }
}

impl ResourceProvider for EmbeddedResources {
    fn resource(&self, path: &str) -> Option<Box<dyn Read + '_>> {
        let content = self.files.get(path)?;
        Some(Box::new(Cursor::new(content.as_slice())))
    }
}
