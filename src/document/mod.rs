//! Structured message documents
mod edit;
/// Document error type
mod error;
/// Text-backed document
mod file;
/// Node tree types
mod node;
/// JSONC to tree conversion
mod parse;

pub use error::DocumentError;
pub use file::Document;
pub use node::{
    Leaf,
    Node,
    NodePath,
    ScalarKind,
    Section,
};

/// Root key holding the document version. Never a message.
pub const FILE_VERSION_KEY: &str = "file_version";
