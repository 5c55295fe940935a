use std::fmt;

use crate::document::NodePath;

/// Normalized dotted message key (e.g. `errors.generic`).
///
/// Segments are trimmed and empty segments dropped, so `"a..b"` and `"a.b"`
/// are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey(String);

impl MessageKey {
    #[must_use]
    pub fn of(path: &str) -> Self {
        Self::from_path(&NodePath::parse(path))
    }

    #[must_use]
    pub fn from_path(path: &NodePath) -> Self {
        Self(path.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last segment of the key.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or_default()
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageKey {
    fn from(path: &str) -> Self {
        Self::of(path)
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    /// `MessageKey::of`
    #[rstest]
    #[case("errors.generic", "errors.generic")]
    #[case(".errors..generic.", "errors.generic")]
    #[case(" errors . generic ", "errors.generic")]
    #[case("", "")]
    fn test_normalizes_paths(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(MessageKey::of(input).as_str(), expected);
    }

    #[rstest]
    fn test_equal_after_normalization() {
        assert_eq!(MessageKey::of("a..b"), MessageKey::of("a.b"));
        assert_ne!(MessageKey::of("a.b"), MessageKey::of("a.c"));
    }

    /// `MessageKey::name`
    #[rstest]
    #[case("errors.generic", "generic")]
    #[case("welcome", "welcome")]
    fn test_name_is_last_segment(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(MessageKey::of(input).name(), expected);
    }
}
