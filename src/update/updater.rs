//! Version-aware migration of operator-edited message files.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    UpdateError,
    UpdateOutcome,
};
use crate::config::{
    MessageUpdate,
    PolyglotSettings,
};
use crate::document::{
    Document,
    DocumentError,
    FILE_VERSION_KEY,
    Node,
    NodePath,
    Section,
};
use crate::resource::ResourceProvider;

/// Brings message files on disk up to the bundled file version.
///
/// Keys missing from the operator's file are copied from the bundled file;
/// existing values are never touched except by a [`MessageUpdate`] whose
/// version lies inside the migrated range.
#[derive(Debug, Clone, Copy)]
pub struct FileUpdater<'a> {
    settings: &'a PolyglotSettings,
    /// Source of the bundled counterparts
    provider: &'a dyn ResourceProvider,
}

impl<'a> FileUpdater<'a> {
    #[must_use]
    pub const fn new(settings: &'a PolyglotSettings, provider: &'a dyn ResourceProvider) -> Self {
        Self { settings, provider }
    }

    /// Updates every file in `paths`. A failing file does not stop the rest.
    #[must_use]
    pub fn update_files(
        &self,
        paths: &[PathBuf],
        updates: &[MessageUpdate],
    ) -> Vec<UpdateOutcome> {
        paths
            .iter()
            .map(|path| {
                let file_name = file_name_of(path);
                self.update_file(path, &file_name, updates)
            })
            .collect()
    }

    /// Updates one file, logging instead of returning errors.
    ///
    /// `file_name` selects the bundled counterpart in the message directory.
    pub fn update_file(
        &self,
        path: &Path,
        file_name: &str,
        updates: &[MessageUpdate],
    ) -> UpdateOutcome {
        match self.try_update_file(path, file_name, updates) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Error updating file {}: {}", file_name_of(path), e);
                UpdateOutcome::Failed(e)
            }
        }
    }

    /// Updates one file, returning the first error encountered.
    ///
    /// Nothing is written unless every step before saving succeeded.
    pub fn try_update_file(
        &self,
        path: &Path,
        file_name: &str,
        updates: &[MessageUpdate],
    ) -> Result<UpdateOutcome, UpdateError> {
        let mut user = Document::load(path)?;
        let Some(bundled) = self.bundled_document(file_name)? else {
            tracing::debug!(file_name, "No bundled message file to update from");
            return Ok(UpdateOutcome::NoBundledFile);
        };

        let version_path = NodePath::parse(FILE_VERSION_KEY);
        let user_version = user
            .get_int(&version_path)
            .ok_or_else(|| UpdateError::MissingUserVersion(file_name.to_string()))?;
        let bundled_version = bundled
            .get_int(&version_path)
            .ok_or_else(|| UpdateError::MissingBundledVersion(file_name.to_string()))?;

        if user_version == bundled_version {
            return Ok(UpdateOutcome::UpToDate { version: user_version });
        }

        let keys_added = copy_missing(bundled.root(), &mut user)?;
        let notices = apply_updates(updates, &mut user, &bundled, user_version, bundled_version)?;
        for notice in &notices {
            tracing::warn!("{file_name} was changed: {notice}");
        }

        user.set_int(&version_path, bundled_version)?;
        user.save(path)?;

        tracing::info!(
            "{file_name} was updated to a new file version, {keys_added} new keys were added."
        );
        Ok(UpdateOutcome::Updated {
            from_version: user_version,
            to_version: bundled_version,
            keys_added,
            notices,
        })
    }

    /// Bundled document for `file_name`, falling back to the default
    /// language file when the bundle dropped that locale.
    fn bundled_document(&self, file_name: &str) -> Result<Option<Document>, DocumentError> {
        let default_name = self.settings.message_file_name_for(&self.settings.default_language);
        let reader =
            self.provider.resource(&self.settings.resource_path(file_name)).or_else(|| {
                tracing::debug!(file_name, %default_name, "Falling back to default bundled file");
                self.provider.resource(&self.settings.resource_path(&default_name))
            });

        reader.map(Document::from_reader).transpose()
    }
}

/// Copies bundled leaves that the user document lacks, in one edit pass.
/// Returns the count.
fn copy_missing(bundled: &Section, user: &mut Document) -> Result<usize, DocumentError> {
    let mut missing = Vec::new();
    collect_missing(bundled, &NodePath::root(), user, &mut missing);
    user.set_nodes(&missing)?;
    Ok(missing.len())
}

/// Bundled leaves below `parent` that are virtual in `user`.
fn collect_missing(
    bundled: &Section,
    parent: &NodePath,
    user: &Document,
    missing: &mut Vec<(NodePath, Node)>,
) {
    for (name, node) in bundled.iter() {
        if parent.is_empty() && name == FILE_VERSION_KEY {
            continue;
        }
        let path = parent.child(name);
        match node {
            Node::Leaf(_) => {
                if !user.is_virtual(&path) {
                    continue;
                }
                if let Some(ancestor) = leaf_ancestor(user, &path) {
                    tracing::debug!(
                        path = %path,
                        ancestor = %ancestor,
                        "Keeping customized value where the bundled file has a section"
                    );
                    continue;
                }
                missing.push((path, node.clone()));
            }
            Node::Section(child) => collect_missing(child, &path, user, missing),
        }
    }
}

/// First ancestor of `path` that is a leaf in `document`.
fn leaf_ancestor(document: &Document, path: &NodePath) -> Option<NodePath> {
    let segments = path.segments();
    (1..segments.len())
        .map(|len| NodePath::from_segments(segments.iter().take(len).cloned().collect()))
        .find(|ancestor| document.node(ancestor).and_then(Node::as_leaf).is_some())
}

/// Applies the forced updates crossed by `from..=to`, in list order.
///
/// Each applied update replaces the user value with the bundled value, or
/// removes the key when the bundled file no longer has it. Returns the
/// notes of the applied updates.
fn apply_updates(
    updates: &[MessageUpdate],
    user: &mut Document,
    bundled: &Document,
    from: i64,
    to: i64,
) -> Result<Vec<String>, DocumentError> {
    let mut notices = Vec::new();
    for update in updates.iter().filter(|update| update.applies(from, to)) {
        let path = NodePath::parse(&update.path);
        user.set_node(&path, bundled.node(&path))?;
        if let Some(note) = &update.message {
            notices.push(note.clone());
        }
    }
    Ok(notices)
}

fn file_name_of(path: &Path) -> String {
    path.file_name().map(|name| name.to_string_lossy().to_string()).unwrap_or_default()
}
