//! Message keys, resolved tables and the document loader
mod key;
mod loader;
/// Locale detection from file names
mod locale;
/// Sibling ordering for replacement sources
mod priority;
pub mod style;
mod table;

pub use key::MessageKey;
pub use loader::{
    LoadError,
    MessageLoader,
};
pub use locale::{
    UNKNOWN_LOCALE,
    locale_from_file_name,
};
pub use priority::PriorityResolver;
pub use table::LangMessages;
