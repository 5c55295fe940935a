//! Resolves message documents into lookup tables.

use std::collections::{
    HashMap,
    HashSet,
};
use std::path::Path;

use thiserror::Error;

use super::locale::locale_from_file_name;
use super::priority::PriorityResolver;
use super::style::apply_color;
use super::{
    LangMessages,
    MessageKey,
};
use crate::config::PolyglotSettings;
use crate::document::{
    Document,
    DocumentError,
    FILE_VERSION_KEY,
    Node,
    NodePath,
    Section,
};
use crate::resource::ResourceProvider;

#[derive(Error, Debug)]
pub enum LoadError {
    /// Error when the message document cannot be read or parsed
    #[error(transparent)]
    Document(#[from] DocumentError),
    /// Error when the bundle lacks the default language file
    #[error("Embedded messages file is missing: {0}")]
    MissingEmbedded(String),
}

/// Builds [`LangMessages`] from message documents.
///
/// Every leaf becomes one message keyed by its dotted path. Unless its key
/// name is excluded from processing, the text goes through replacement
/// markers, colour codes and `\n` un-escaping, in that order.
#[derive(Debug)]
pub struct MessageLoader<'a> {
    settings: &'a PolyglotSettings,
    /// Orders siblings so replacement sources resolve first
    resolver: PriorityResolver,
}

/// Per-load state shared by the recursive walk.
struct LoadContext {
    /// Every message key present in the document.
    known: HashSet<MessageKey>,
    messages: HashMap<MessageKey, String>,
}

impl<'a> MessageLoader<'a> {
    #[must_use]
    pub fn new(settings: &'a PolyglotSettings) -> Self {
        Self { settings, resolver: PriorityResolver::new(&settings.message_replacements) }
    }

    /// Loads a message file, taking the locale from its file name.
    pub fn load_file(&self, path: &Path) -> Result<LangMessages, LoadError> {
        let file_name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
        let locale = locale_from_file_name(&file_name);
        let document = Document::load(path)?;
        Ok(self.load_document(&document, &locale))
    }

    /// Loads the bundled message file of `language`.
    pub fn load_embedded(
        &self,
        provider: &dyn ResourceProvider,
        language: &str,
    ) -> Result<LangMessages, LoadError> {
        let file_name = self.settings.message_file_name_for(language);
        let resource_path = self.settings.resource_path(&file_name);
        let reader =
            provider.resource(&resource_path).ok_or(LoadError::MissingEmbedded(resource_path))?;
        let document = Document::from_reader(reader)?;
        Ok(self.load_document(&document, language))
    }

    /// Resolves every message of `document`.
    #[must_use]
    pub fn load_document(&self, document: &Document, locale: &str) -> LangMessages {
        let known = document
            .root()
            .leaf_paths()
            .iter()
            .filter(|path| !is_file_version(path))
            .map(MessageKey::from_path)
            .collect();
        let mut context = LoadContext { known, messages: HashMap::new() };

        self.load_section(document.root(), &NodePath::root(), 0, &mut context);

        tracing::debug!(locale, count = context.messages.len(), "Loaded messages");
        LangMessages::new(locale.to_string(), context.messages)
    }

    /// Resolves the leaves below `section` into `context`.
    fn load_section(
        &self,
        section: &Section,
        parent: &NodePath,
        depth: usize,
        context: &mut LoadContext,
    ) {
        for (name, node) in self.resolver.order(section, parent, depth) {
            let path = parent.child(name);
            if is_file_version(&path) {
                continue;
            }
            match node {
                Node::Leaf(leaf) => {
                    let key = MessageKey::from_path(&path);
                    let text = if self.settings.is_process_excluded(name) {
                        leaf.value.clone()
                    } else {
                        self.process_message(&key, &leaf.value, context)
                    };
                    context.messages.insert(key, text);
                }
                Node::Section(child) => self.load_section(child, &path, depth + 1, context),
            }
        }
    }

    fn process_message(&self, key: &MessageKey, input: &str, context: &LoadContext) -> String {
        let replaced = self.apply_replacements(key, input, context);
        apply_color(&replaced).replace("\\n", "\n")
    }

    /// Substitutes markers whose source message is already resolved.
    ///
    /// A source that exists in the document but is not resolved yet (a
    /// reference cycle or a source nested below its dependent) leaves the
    /// marker in place and is reported.
    fn apply_replacements(&self, key: &MessageKey, input: &str, context: &LoadContext) -> String {
        let mut output = input.to_string();
        for replacement in self.settings.message_replacements.entries() {
            if !output.contains(&replacement.marker) {
                continue;
            }
            let source = MessageKey::of(&replacement.key);
            if let Some(text) = context.messages.get(&source) {
                output = output.replace(&replacement.marker, text);
            } else if context.known.contains(&source) {
                tracing::warn!(
                    key = %key,
                    source = %source,
                    marker = %replacement.marker,
                    "Replacement source is not resolved yet, marker left unchanged"
                );
            } else {
                tracing::debug!(key = %key, source = %source, "Replacement source does not exist");
            }
        }
        output
    }
}

fn is_file_version(path: &NodePath) -> bool {
    path.len() == 1 && path.last() == Some(FILE_VERSION_KEY)
}
