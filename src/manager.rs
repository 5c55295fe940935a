//! Message manager: update, load and serve every locale.
//!
//! # Lookup order
//! 1. The requested locale
//! 2. The default language file on disk
//! 3. The bundled default language file

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
};

use globset::Glob;
use ignore::WalkBuilder;
use thiserror::Error;

use crate::config::PolyglotSettings;
use crate::message::{
    LangMessages,
    LoadError,
    MessageKey,
    MessageLoader,
    UNKNOWN_LOCALE,
};
use crate::resource::ResourceProvider;
use crate::update::{
    FileUpdater,
    UpdateOutcome,
};

#[derive(Error, Debug)]
pub enum ManagerError {
    /// Error when the bundled default messages cannot be loaded
    #[error("Failed to load bundled messages: {0}")]
    Embedded(#[from] LoadError),
    /// Error when the message file name does not form a valid glob
    #[error("Invalid message file pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
    /// Error when the message directory cannot be listed
    #[error("Failed to scan message directory: {0}")]
    Scan(String),
}

/// Immutable snapshot of every loaded locale.
#[derive(Debug, Clone)]
pub struct MessageStore {
    /// Locale consulted when the requested one lacks a key
    default_language: String,
    /// Tables loaded from disk, by locale
    languages: HashMap<String, LangMessages>,
    /// Bundled default table, the last fallback
    embedded: LangMessages,
}

impl MessageStore {
    /// Looks up `key` in `locale`, falling back to the default language.
    #[must_use]
    pub fn get(&self, key: &MessageKey, locale: &str) -> Option<&str> {
        self.languages
            .get(locale)
            .and_then(|messages| messages.get(key))
            .or_else(|| self.languages.get(&self.default_language).and_then(|m| m.get(key)))
            .or_else(|| self.embedded.get(key))
    }

    #[must_use]
    pub fn language(&self, locale: &str) -> Option<&LangMessages> {
        self.languages.get(locale)
    }

    /// Locales loaded from disk, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Messages of the bundled default language file.
    #[must_use]
    pub const fn embedded(&self) -> &LangMessages {
        &self.embedded
    }
}

/// Owns the settings and the bundle, and publishes loaded messages.
///
/// Reloading builds a fresh [`MessageStore`] and swaps it in; snapshots
/// taken with [`MessageManager::store`] stay valid and unchanged.
#[derive(Debug)]
pub struct MessageManager<P> {
    settings: PolyglotSettings,
    /// Source of the bundled message files
    provider: P,
    /// Published snapshot
    store: RwLock<Option<Arc<MessageStore>>>,
}

impl<P: ResourceProvider> MessageManager<P> {
    #[must_use]
    pub const fn new(settings: PolyglotSettings, provider: P) -> Self {
        Self { settings, provider, store: RwLock::new(None) }
    }

    #[must_use]
    pub const fn settings(&self) -> &PolyglotSettings {
        &self.settings
    }

    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.settings.default_language
    }

    /// Updates and loads every message file in `dir`, then publishes the
    /// result.
    ///
    /// Files that fail to update or load are logged and skipped. Only a
    /// missing or broken bundled default file fails the whole load.
    pub fn load_messages(&self, dir: &Path) -> Result<Vec<UpdateOutcome>, ManagerError> {
        let files = self.find_message_files(dir)?;
        tracing::debug!(count = files.len(), dir = %dir.display(), "Found message files");

        let updater = FileUpdater::new(&self.settings, &self.provider);
        let outcomes = updater.update_files(&files, &self.settings.message_updates);

        let loader = MessageLoader::new(&self.settings);
        let embedded = loader.load_embedded(&self.provider, &self.settings.default_language)?;

        let mut languages = HashMap::new();
        for file in &files {
            match loader.load_file(file) {
                Ok(messages) if messages.locale() == UNKNOWN_LOCALE => {
                    tracing::warn!("Skipping message file with no locale in its name: {:?}", file);
                }
                Ok(messages) => {
                    languages.insert(messages.locale().to_string(), messages);
                }
                Err(e) => tracing::warn!("Error loading message file {:?}: {}", file, e),
            }
        }

        tracing::info!("Loaded {} message files", languages.len());
        let store = MessageStore {
            default_language: self.settings.default_language.clone(),
            languages,
            embedded,
        };
        *self.store.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(store));

        Ok(outcomes)
    }

    /// Same as [`MessageManager::load_messages`]; readers holding an older
    /// snapshot keep it.
    pub fn reload(&self, dir: &Path) -> Result<Vec<UpdateOutcome>, ManagerError> {
        self.load_messages(dir)
    }

    /// Current snapshot, `None` before the first load.
    #[must_use]
    pub fn store(&self) -> Option<Arc<MessageStore>> {
        self.store.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn get_message(&self, key: &MessageKey, locale: &str) -> Option<String> {
        self.store()?.get(key, locale).map(ToString::to_string)
    }

    #[must_use]
    pub fn loaded_languages(&self) -> Vec<String> {
        self.store()
            .map(|store| store.languages().into_iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// Message files directly inside `dir` whose name fits the configured
    /// pattern, sorted by path.
    fn find_message_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ManagerError> {
        let pattern = self.settings.message_file_glob();
        let matcher = Glob::new(&pattern)
            .map_err(|e| ManagerError::Pattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?
            .compile_matcher();

        let mut files = Vec::new();
        for result in WalkBuilder::new(dir)
            .max_depth(Some(1))
            .hidden(true)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .follow_links(false)
            .build()
        {
            let entry = result.map_err(|e| ManagerError::Scan(e.to_string()))?;
            if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
                continue;
            }
            if matcher.is_match(entry.file_name()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }
}
