use std::collections::HashMap;

use super::MessageKey;

/// Fully resolved messages of one locale.
///
/// Built once by the loader and never mutated afterwards; a reload builds a
/// new instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangMessages {
    locale: String,
    messages: HashMap<MessageKey, String>,
}

impl LangMessages {
    #[must_use]
    pub const fn new(locale: String, messages: HashMap<MessageKey, String>) -> Self {
        Self { locale, messages }
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[must_use]
    pub fn get(&self, key: &MessageKey) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &MessageKey) -> bool {
        self.messages.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &MessageKey> {
        self.messages.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub const fn messages(&self) -> &HashMap<MessageKey, String> {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    /// `LangMessages::get`
    #[googletest::test]
    fn test_lookup_by_normalized_key() {
        let mut map = HashMap::new();
        map.insert(MessageKey::of("errors.generic"), "Oops".to_string());
        let messages = LangMessages::new("en".to_string(), map);

        assert_eq!(messages.get(&MessageKey::of("errors..generic")), Some("Oops"));
        assert_eq!(messages.get(&MessageKey::of("errors.timeout")), None);
        expect_that!(messages.contains(&MessageKey::of("errors.generic")), eq(true));
        expect_that!(messages.len(), eq(1));
        assert_eq!(messages.locale(), "en");
    }
}
