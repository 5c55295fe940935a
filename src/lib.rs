//! polyglot
//!
//! Localized message store with version-aware migration of operator-edited
//! message files.

pub mod config;
pub mod document;
pub mod manager;
pub mod message;
pub mod resource;
pub mod update;

pub use manager::{
    ManagerError,
    MessageManager,
    MessageStore,
};
