//! Legacy colour code translation.

/// Section sign that introduces a formatting code in rendered text.
pub const SECTION_SIGN: char = '§';

/// Translates `&` formatting codes into section-sign codes.
///
/// - `&a`, `&L`, `&r` … become `§a`, `§l`, `§r`
/// - `&#1A2b3C` becomes `§x§1§a§2§b§3§c`
///
/// An `&` that does not start a valid code is kept as is.
#[must_use]
pub fn apply_color(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(index) = rest.find('&') {
        let (before, after) = rest.split_at(index);
        output.push_str(before);
        let code = after.get(1..).unwrap_or_default();

        if let Some(hex) = hex_code(code) {
            output.push(SECTION_SIGN);
            output.push('x');
            for digit in hex.chars() {
                output.push(SECTION_SIGN);
                output.push(digit.to_ascii_lowercase());
            }
            rest = code.get(hex.len() + 1..).unwrap_or_default();
        } else if let Some(c) = code.chars().next().filter(|c| is_legacy_code(*c)) {
            output.push(SECTION_SIGN);
            output.push(c.to_ascii_lowercase());
            rest = code.get(c.len_utf8()..).unwrap_or_default();
        } else {
            output.push('&');
            rest = code;
        }
    }
    output.push_str(rest);
    output
}

/// Returns the six hex digits of a `#RRGGBB` prefix.
fn hex_code(code: &str) -> Option<&str> {
    let digits = code.strip_prefix('#')?.get(..6)?;
    digits.chars().all(|c| c.is_ascii_hexdigit()).then_some(digits)
}

const fn is_legacy_code(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r')
}
