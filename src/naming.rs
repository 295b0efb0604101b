//! Identifier derivation shared by reference resolution, interface building
//! and rendering.
//!
//! [`interface_name`] is the single place a definition name becomes a
//! TypeScript interface name, so a `$ref` and the definition it points at
//! always agree.

use pinyin::ToPinyin;

/// Prefix put in front of every derived interface name.
pub const INTERFACE_PREFIX: &str = "I";

/// Marker preceding the definition name inside a `$ref` pointer.
const DEFINITIONS_MARKER: &str = "/definitions/";

/// CJK Unified Ideographs range that survives [`remove_special_characters`].
fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

/// Keeps `[A-Za-z0-9_]` and CJK ideographs, drops everything else.
///
/// Already-safe input is returned unchanged; the empty string stays empty.
pub fn remove_special_characters(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || is_cjk(*c))
        .collect()
}

/// Replaces every CJK ideograph with its toneless pinyin, first letter
/// upper-cased (`用户` becomes `YongHu`). Characters without a reading are
/// dropped; ASCII passes through.
pub fn romanize(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii() {
            output.push(c);
        } else if let Some(pinyin) = c.to_pinyin() {
            output.push_str(&first_upper_case(pinyin.plain()));
        }
    }
    output
}

pub fn first_upper_case(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Definition name carried by a `$ref`: whatever follows the last
/// `/definitions/`, or the whole pointer when the marker is missing.
pub fn reference_target(reference: &str) -> &str {
    reference
        .rsplit(DEFINITIONS_MARKER)
        .next()
        .unwrap_or(reference)
}

/// Interface name for a raw definition name: special characters stripped,
/// CJK romanized, [`INTERFACE_PREFIX`] prepended.
///
/// Total: `""` maps to `"I"`, and `"Map«string,Item»"` to `"IMapstringItem"`.
pub fn interface_name(definition: &str) -> String {
    format!(
        "{}{}",
        INTERFACE_PREFIX,
        romanize(&remove_special_characters(definition))
    )
}
