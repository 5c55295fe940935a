use thiserror::Error;

/// Errors raised while reading, editing or writing a message document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Error when the document could not be read or written
    #[error("Failed to access message document: {0}")]
    Io(#[from] std::io::Error),
    /// Error when the document text is not valid JSON with comments
    #[error("Failed to parse message document: {0}")]
    Parse(String),
    /// Error when the document root is something other than an object
    #[error("Message document root must be an object")]
    NotAnObject,
    /// Error when an edit could not be applied to the document
    #[error("Failed to edit '{path}': {message}")]
    Edit { path: String, message: String },
}
