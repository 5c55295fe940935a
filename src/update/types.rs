//! Update engine type definitions.

use thiserror::Error;

use crate::document::DocumentError;

#[derive(Error, Debug)]
pub enum UpdateError {
    /// Error when either document cannot be read, edited or written
    #[error(transparent)]
    Document(#[from] DocumentError),
    /// The operator's file has no usable `file_version` to migrate from
    #[error("Message file {0} is missing a file_version")]
    MissingUserVersion(String),
    /// The bundled file has no `file_version`; the release is broken
    #[error("Embedded message file {0} is missing a file_version")]
    MissingBundledVersion(String),
}

/// Result of bringing one message file up to date.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// Neither the matching nor the default bundled file exists.
    NoBundledFile,
    /// The file already has the bundled version; nothing was written.
    UpToDate { version: i64 },
    /// The file was migrated and saved.
    Updated {
        from_version: i64,
        to_version: i64,
        keys_added: usize,
        /// Notes of the forced updates that were applied, in order.
        notices: Vec<String>,
    },
    /// The file was left untouched because of an error.
    Failed(UpdateError),
}

impl UpdateOutcome {
    /// Whether the file on disk was rewritten.
    #[must_use]
    pub const fn was_written(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}
