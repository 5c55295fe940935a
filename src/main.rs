//! Entry point: update and load a message directory against a bundle.
//!
//! Usage: `polyglot <messages-dir> <bundle-dir> [config.json]`

use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use polyglot::MessageManager;
use polyglot::config::{
    ConfigError,
    PolyglotSettings,
    load_settings,
};
use polyglot::resource::DirectoryResources;
use polyglot::update::UpdateOutcome;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (messages_dir, bundle_dir, config_path) = match args.as_slice() {
        [messages, bundle] => (PathBuf::from(messages), PathBuf::from(bundle), None),
        [messages, bundle, config] => {
            (PathBuf::from(messages), PathBuf::from(bundle), Some(PathBuf::from(config)))
        }
        _ => {
            tracing::error!("usage: polyglot <messages-dir> <bundle-dir> [config.json]");
            return ExitCode::from(2);
        }
    };

    let settings = match settings_from(config_path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let manager = MessageManager::new(settings, DirectoryResources::new(bundle_dir));
    match manager.load_messages(&messages_dir) {
        Ok(outcomes) => {
            let updated = outcomes.iter().filter(|o| o.was_written()).count();
            let failed = outcomes.iter().filter(|o| matches!(o, UpdateOutcome::Failed(_))).count();
            tracing::info!(
                "Updated {} of {} message files ({} failed), languages: {}",
                updated,
                outcomes.len(),
                failed,
                manager.loaded_languages().join(", ")
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Settings from `path`, or the defaults when there is none.
fn settings_from(path: Option<&Path>) -> Result<PolyglotSettings, ConfigError> {
    let Some(path) = path else {
        return Ok(PolyglotSettings::default());
    };
    load_settings(path)?.map_or_else(
        || {
            tracing::warn!("Settings file {:?} not found, using defaults", path);
            Ok(PolyglotSettings::default())
        },
        Ok,
    )
}
