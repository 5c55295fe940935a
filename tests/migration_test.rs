//! End-to-end migration and loading of a message directory.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use polyglot::MessageManager;
use polyglot::config::load_settings;
use polyglot::document::{
    Document,
    NodePath,
};
use polyglot::message::MessageKey;
use polyglot::resource::DirectoryResources;
use polyglot::update::{
    UpdateError,
    UpdateOutcome,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const BUNDLED_EN: &str = r#"{
  "file_version": 5,
  "common": {
    "prefix": "&6[Shop] "
  },
  "errors": {
    "generic": "Error: {code}",
    "timeout": "Timed out"
  },
  "shop": {
    "welcome": "{PREFIX}Welcome!"
  }
}"#;

const SETTINGS: &str = r#"{
  "messageReplacements": [
    { "marker": "{PREFIX}", "key": "common.prefix" }
  ],
  "messageUpdates": [
    { "version": 4, "path": "errors.generic", "message": "format changed" }
  ]
}"#;

struct Setup {
    bundle: TempDir,
    data: TempDir,
    config: PathBuf,
}

impl Setup {
    fn new() -> Self {
        let bundle = TempDir::new().unwrap();
        fs::create_dir(bundle.path().join("messages")).unwrap();
        fs::write(bundle.path().join("messages/messages_en.json"), BUNDLED_EN).unwrap();

        let data = TempDir::new().unwrap();
        let config = data.path().join("config.json");
        fs::write(&config, SETTINGS).unwrap();

        Self { bundle, data, config }
    }

    fn write(&self, name: &str, text: &str) -> PathBuf {
        let path = self.data.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn manager(&self) -> MessageManager<DirectoryResources> {
        let settings = load_settings(&self.config).unwrap().unwrap();
        MessageManager::new(settings, DirectoryResources::new(self.bundle.path()))
    }
}

fn read(path: &Path, dotted: &str) -> Option<String> {
    Document::load(path).unwrap().get_str(&NodePath::parse(dotted)).map(ToString::to_string)
}

fn version(path: &Path) -> Option<i64> {
    Document::load(path).unwrap().get_int(&NodePath::parse("file_version"))
}

/// Same version as the bundle: the file is left byte for byte
#[test]
fn test_up_to_date_file_is_not_rewritten() {
    let setup = Setup::new();
    let text = "{\n  // mine\n  \"file_version\": 5,\n  \"errors\": { \"generic\": \"Oops\" }\n}\n";
    let path = setup.write("messages_en.json", text);

    let outcomes = setup.manager().load_messages(setup.data.path()).unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes.first(), Some(UpdateOutcome::UpToDate { version: 5 })));
    assert_eq!(fs::read_to_string(&path).unwrap(), text);
}

/// One version behind: the new bundled key is added, customizations stay
#[test]
fn test_behind_file_gains_new_key() {
    let setup = Setup::new();
    let path = setup.write(
        "messages_en.json",
        r#"{
  "file_version": 4,
  "common": { "prefix": "&6[Shop] " },
  "errors": { "generic": "Oops" },
  "shop": { "welcome": "{PREFIX}Welcome!" }
}"#,
    );

    let outcomes = setup.manager().load_messages(setup.data.path()).unwrap();

    let Some(UpdateOutcome::Updated { from_version, to_version, keys_added, notices }) =
        outcomes.first()
    else {
        panic!("expected the file to be updated");
    };
    assert_eq!((*from_version, *to_version, *keys_added), (4, 5, 1));
    assert!(notices.is_empty());
    assert_eq!(read(&path, "errors.timeout").as_deref(), Some("Timed out"));
    assert_eq!(read(&path, "errors.generic").as_deref(), Some("Oops"));
    assert_eq!(version(&path), Some(5));
}

/// A forced update replaces the customized value and reports its note
#[test]
fn test_forced_update_overrides_customization() {
    let setup = Setup::new();
    let path = setup.write(
        "messages_en.json",
        r#"{"file_version": 3, "errors": {"generic": "Oops"}}"#,
    );
    let manager = setup.manager();

    let outcomes = manager.load_messages(setup.data.path()).unwrap();

    let Some(UpdateOutcome::Updated { notices, .. }) = outcomes.first() else {
        panic!("expected the file to be updated");
    };
    assert_eq!(notices, &vec!["format changed".to_string()]);
    assert_eq!(read(&path, "errors.generic").as_deref(), Some("Error: {code}"));
    assert_eq!(
        manager.get_message(&MessageKey::of("errors.generic"), "en").as_deref(),
        Some("Error: {code}")
    );
}

/// A file without `file_version` fails alone
#[test]
fn test_missing_version_only_fails_that_file() {
    let setup = Setup::new();
    let broken_text = r#"{"errors": {"generic": "Kaputt"}}"#;
    let broken = setup.write("messages_de.json", broken_text);
    let healthy = setup.write("messages_en.json", r#"{"file_version": 4}"#);
    let manager = setup.manager();

    let outcomes = manager.load_messages(setup.data.path()).unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(matches!(
        outcomes.first(),
        Some(UpdateOutcome::Failed(UpdateError::MissingUserVersion(_)))
    ));
    assert_eq!(fs::read_to_string(&broken).unwrap(), broken_text);
    assert_eq!(version(&healthy), Some(5));
    // The file still loads with what it has.
    assert_eq!(
        manager.get_message(&MessageKey::of("errors.generic"), "de").as_deref(),
        Some("Kaputt")
    );
}

/// Replacement sources declared after their users still resolve
#[test]
fn test_resolved_table_applies_replacements_and_colors() {
    let setup = Setup::new();
    setup.write(
        "messages_en.json",
        r#"{
  "file_version": 5,
  "shop": { "welcome": "{PREFIX}Welcome!" },
  "common": { "prefix": "&6[Shop] " }
}"#,
    );
    let manager = setup.manager();

    manager.load_messages(setup.data.path()).unwrap();

    assert_eq!(
        manager.get_message(&MessageKey::of("shop.welcome"), "en").as_deref(),
        Some("§6[Shop] Welcome!")
    );
}

/// Running the migration twice writes once
#[test]
fn test_second_run_changes_nothing() {
    let setup = Setup::new();
    let path = setup.write("messages_en.json", r#"{"file_version": 2, "extra": "kept"}"#);
    let manager = setup.manager();

    manager.load_messages(setup.data.path()).unwrap();
    let after_first = fs::read_to_string(&path).unwrap();
    let outcomes = manager.reload(setup.data.path()).unwrap();

    assert!(outcomes.iter().all(|outcome| !outcome.was_written()));
    assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
    assert_eq!(read(&path, "extra").as_deref(), Some("kept"));
}
