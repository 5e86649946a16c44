use regex::Regex;
use std::sync::OnceLock;

use crate::config::{DEFAULT_SLUG, NOTE_KEY_PREFIX};

/// Whitespace as the browser's regex `\s` and `String.prototype.trim` see it.
pub fn is_page_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

pub fn trim_page(text: &str) -> &str {
    text.trim_matches(is_page_whitespace)
}

/// Strips the leading `#` from a `location.hash` value.
pub fn fragment_from_hash(hash: &str) -> &str {
    hash.strip_prefix('#').unwrap_or(hash)
}

pub fn slug_for_fragment(fragment: &str) -> &str {
    if fragment.is_empty() {
        DEFAULT_SLUG
    } else {
        fragment
    }
}

/// Storage key for the note addressed by `fragment`.
pub fn storage_key(fragment: &str) -> String {
    format!("{NOTE_KEY_PREFIX}{}", slug_for_fragment(fragment))
}

pub fn slugify(text: &str) -> String {
    static RE_SPACE: OnceLock<Regex> = OnceLock::new();
    static RE_UNSAFE: OnceLock<Regex> = OnceLock::new();
    static RE_DASHES: OnceLock<Regex> = OnceLock::new();

    let re_space = RE_SPACE.get_or_init(|| {
        Regex::new(
            r"[\t\n\x0B\x0C\r \xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+",
        )
        .unwrap()
    });
    let re_unsafe = RE_UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\-]+").unwrap());
    let re_dashes = RE_DASHES.get_or_init(|| Regex::new(r"--+").unwrap());

    let lowered = text.to_lowercase();
    let mut slug = re_space.replace_all(trim_page(&lowered), "-").to_string();
    slug = re_unsafe.replace_all(&slug, "").to_string();
    slug = re_dashes.replace_all(&slug, "-").to_string();
    slug
}

/// Slug a note is saved under once it carries `title`.
pub fn slug_for_title(title: &str) -> String {
    let slug = slugify(trim_page(title));
    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug
    }
}

pub fn new_note_fragment(stamp_ms: u64) -> String {
    format!("new-note-{stamp_ms}")
}
