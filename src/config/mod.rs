//! Settings for message loading and migration
/// Settings file loader
mod loader;
/// Settings types and validation
mod types;

pub use loader::load_settings;
pub use types::{
    ConfigError,
    LANGUAGE_PLACEHOLDER,
    MessageReplacements,
    MessageUpdate,
    PolyglotSettings,
    Replacement,
    ValidationError,
};
