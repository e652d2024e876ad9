// src/language.rs
use crate::utils::collate::locale_cmp;
use serde::Serialize;

/// Supported locale codes and the English name of each language.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("th", "Thai"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    pub code: &'static str,
    pub name: &'static str,
}

pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

pub fn is_supported_locale(code: &str) -> bool {
    language_name(code).is_some()
}

/// Locale codes ordered by their language names.
pub fn sorted_locales() -> Vec<&'static str> {
    sorted_language_entries()
        .into_iter()
        .map(|entry| entry.code)
        .collect()
}

pub fn sorted_language_entries() -> Vec<LanguageEntry> {
    let mut entries: Vec<LanguageEntry> = LANGUAGES
        .iter()
        .map(|&(code, name)| LanguageEntry { code, name })
        .collect();
    entries.sort_by(|a, b| locale_cmp(a.name, b.name));
    entries
}
