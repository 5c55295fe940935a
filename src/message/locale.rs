/// Locale used when a file name does not follow `<prefix>_<locale>.<ext>`.
pub const UNKNOWN_LOCALE: &str = "unknown";

/// Derives the locale code from a message file name.
///
/// The code is the text after the first `_` and before the last `.`.
/// Names without both separators give [`UNKNOWN_LOCALE`]; callers are
/// expected to have filtered file names already.
///
/// # Examples
/// - `messages_en.json` → `en`
/// - `messages_zh-TW.json` → `zh-TW`
/// - `messages_pt_BR.json` → `pt_BR`
/// - `messages.json` → `unknown`
#[must_use]
pub fn locale_from_file_name(file_name: &str) -> String {
    let (Some(underscore), Some(dot)) = (file_name.find('_'), file_name.rfind('.')) else {
        return UNKNOWN_LOCALE.to_string();
    };

    file_name
        .get(underscore + 1..dot)
        .filter(|code| !code.is_empty())
        .map_or_else(|| UNKNOWN_LOCALE.to_string(), ToString::to_string)
}
