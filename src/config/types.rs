use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::document::NodePath;

/// Placeholder substituted with the requested language code in file names.
pub const LANGUAGE_PLACEHOLDER: &str = "{language}";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "messageReplacements[0].marker")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One replacement rule: every occurrence of `marker` is replaced with the
/// resolved text of the message at `key`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Replacement {
    pub marker: String,
    pub key: String,
}

/// Ordered replacement rules. Earlier rules resolve first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MessageReplacements {
    entries: Vec<Replacement>,
}

impl MessageReplacements {
    #[must_use]
    pub const fn new(entries: Vec<Replacement>) -> Self {
        Self { entries }
    }

    /// Builds replacements from `(marker, key)` pairs.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(marker, key)| Replacement {
                    marker: marker.to_string(),
                    key: key.to_string(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[Replacement] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Forces the value at `path` to the bundled value when a user file is
/// migrated across `version`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageUpdate {
    pub version: i64,
    pub path: String,
    /// Operator-facing note logged when the update is applied.
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageUpdate {
    #[must_use]
    pub fn new(version: i64, path: impl Into<String>, message: Option<&str>) -> Self {
        Self { version, path: path.into(), message: message.map(ToString::to_string) }
    }

    /// Whether a migration from `from` to `to` crosses this update.
    #[must_use]
    pub const fn applies(&self, from: i64, to: i64) -> bool {
        from < self.version && self.version <= to
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolyglotSettings {
    /// Directory of the bundled message files inside the resource bundle.
    pub message_directory: String,
    /// File name pattern containing `{language}`.
    pub message_file_name: String,
    pub default_language: String,

    /// Key names whose values are stored verbatim, without substitution
    /// or colour translation.
    pub process_excluded: Vec<String>,

    pub message_replacements: MessageReplacements,
    pub message_updates: Vec<MessageUpdate>,
}

impl PolyglotSettings {
    /// File name of the message file for `language`.
    #[must_use]
    pub fn message_file_name_for(&self, language: &str) -> String {
        self.message_file_name.replace(LANGUAGE_PLACEHOLDER, language)
    }

    /// Resource path of a bundled message file.
    #[must_use]
    pub fn resource_path(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.message_directory)
    }

    /// Glob matching every locale variant of the message file name.
    #[must_use]
    pub fn message_file_glob(&self) -> String {
        self.message_file_name.replace(LANGUAGE_PLACEHOLDER, "*")
    }

    #[must_use]
    pub fn is_process_excluded(&self, key_name: &str) -> bool {
        self.process_excluded.iter().any(|excluded| excluded == key_name)
    }

    /// # Errors
    /// - Required field is empty
    /// - File name pattern without `{language}` or not a valid glob
    /// - Replacement or update entry with an empty field
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.message_directory.is_empty() {
            errors.push(ValidationError::new(
                "messageDirectory",
                "The directory cannot be empty. Example: \"messages\"",
            ));
        }

        if !self.message_file_name.contains(LANGUAGE_PLACEHOLDER) {
            errors.push(ValidationError::new(
                "messageFileName",
                "The file name must contain the {language} placeholder. Example: \"messages_{language}.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.message_file_glob()) {
            errors.push(ValidationError::new(
                "messageFileName",
                format!("Invalid file name pattern '{}': {e}", self.message_file_name),
            ));
        }

        if self.default_language.is_empty() {
            errors.push(ValidationError::new(
                "defaultLanguage",
                "The default language cannot be empty. Example: \"en\"",
            ));
        }

        for (index, replacement) in self.message_replacements.entries().iter().enumerate() {
            if replacement.marker.is_empty() {
                errors.push(ValidationError::new(
                    format!("messageReplacements[{index}].marker"),
                    "The marker cannot be empty",
                ));
            }
            if NodePath::parse(&replacement.key).is_empty() {
                errors.push(ValidationError::new(
                    format!("messageReplacements[{index}].key"),
                    "The key must name a message. Example: \"common.prefix\"",
                ));
            }
        }

        for (index, update) in self.message_updates.iter().enumerate() {
            if NodePath::parse(&update.path).is_empty() {
                errors.push(ValidationError::new(
                    format!("messageUpdates[{index}].path"),
                    "The path must name a message or section. Example: \"errors.generic\"",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for PolyglotSettings {
    fn default() -> Self {
        Self {
            message_directory: "messages".to_string(),
            message_file_name: "messages_{language}.json".to_string(),
            default_language: "en".to_string(),
            process_excluded: Vec::new(),
            message_replacements: MessageReplacements::default(),
            message_updates: Vec::new(),
        }
    }
}
