//! Migration of message files to newer bundled versions
mod types;
mod updater;

pub use types::{
    UpdateError,
    UpdateOutcome,
};
pub use updater::FileUpdater;
