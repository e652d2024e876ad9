// src/i18n.rs
//! Translation engine handed to the UI layer.
//!
//! One instance is built at startup with [`I18n::bootstrap`] and passed
//! around explicitly. Storage and interpolation come from rust-i18n's
//! [`SimpleBackend`]; this type adds the active and fallback locales on top.

use crate::utils::error::Error;
use rust_i18n::{replace_patterns, Backend, SimpleBackend};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

pub const DEFAULT_LOCALE: &str = "en";
pub const FALLBACK_LOCALE: &str = "en";

/// Flattened translation key (`app.title`) to localized string.
pub type MessageBundle = BTreeMap<String, String>;

const EMBEDDED_BUNDLES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("es", include_str!("../locales/es.json")),
    ("fr", include_str!("../locales/fr.json")),
    ("th", include_str!("../locales/th.json")),
];

pub struct I18n {
    locale: String,
    fallback_locale: String,
    backend: SimpleBackend,
    // Union of every loaded key, so whole bundles can be read back out.
    keys: BTreeSet<String>,
}

impl I18n {
    pub fn new(
        locale: impl Into<String>,
        fallback_locale: impl Into<String>,
        bundles: HashMap<String, MessageBundle>,
    ) -> Self {
        let mut backend = SimpleBackend::new();
        let mut keys = BTreeSet::new();
        for (locale, bundle) in &bundles {
            let data: HashMap<&str, &str> = bundle
                .iter()
                .map(|(key, message)| (key.as_str(), message.as_str()))
                .collect();
            backend.add_translations(locale, &data);
            keys.extend(bundle.keys().cloned());
        }
        Self {
            locale: locale.into(),
            fallback_locale: fallback_locale.into(),
            backend,
            keys,
        }
    }

    /// English active and fallback, with every embedded bundle loaded.
    pub fn bootstrap() -> Self {
        let bundles = EMBEDDED_BUNDLES
            .iter()
            .map(|(locale, source)| {
                let bundle = parse_bundle(source)
                    .unwrap_or_else(|e| panic!("embedded locale '{locale}' is malformed: {e}"));
                (locale.to_string(), bundle)
            })
            .collect();
        Self::new(DEFAULT_LOCALE, FALLBACK_LOCALE, bundles)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    /// Sorted codes of every loaded bundle.
    pub fn available_locales(&self) -> Vec<&str> {
        self.backend.available_locales()
    }

    fn has_locale(&self, locale: &str) -> bool {
        self.available_locales().contains(&locale)
    }

    pub fn set_locale(&mut self, locale: &str) -> Result<(), Error> {
        if !self.has_locale(locale) {
            return Err(Error::UnsupportedLocale(locale.to_string()));
        }
        if self.locale != locale {
            debug!("Switching locale from '{}' to '{}'", self.locale, locale);
            self.locale = locale.to_string();
        }
        Ok(())
    }

    /// Every message stored for `locale`, or `None` when it was never loaded.
    pub fn messages(&self, locale: &str) -> Option<MessageBundle> {
        if !self.has_locale(locale) {
            return None;
        }
        let bundle = self
            .keys
            .iter()
            .filter_map(|key| {
                self.backend
                    .translate(locale, key)
                    .map(|message| (key.clone(), message.to_string()))
            })
            .collect();
        Some(bundle)
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        [&self.locale, &self.fallback_locale]
            .into_iter()
            .find_map(|locale| self.backend.translate(locale, key))
    }

    /// Active locale first, then the fallback; an unknown key comes back as-is.
    pub fn translate(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(message) => message.to_string(),
            None => {
                debug!("Missing translation for '{}' in '{}'", key, self.locale);
                key.to_string()
            }
        }
    }

    /// Like [`translate`](Self::translate), then fills `%{name}` placeholders.
    /// Placeholders without a matching argument are left in place.
    pub fn translate_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let (patterns, values): (Vec<&str>, Vec<String>) = args
            .iter()
            .map(|(name, value)| (*name, value.to_string()))
            .unzip();
        replace_patterns(&self.translate(key), &patterns, &values)
    }
}

/// Parses a JSON message document into the flat keys the backend stores,
/// joining nested object keys with `.`.
pub fn parse_bundle(source: &str) -> Result<MessageBundle, Error> {
    let value: Value = serde_json::from_str(source)?;
    let mut bundle = MessageBundle::new();
    flatten_into(&mut bundle, None, &value);
    Ok(bundle)
}

fn flatten_into(bundle: &mut MessageBundle, prefix: Option<&str>, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = match prefix {
                    Some(prefix) => format!("{prefix}.{key}"),
                    None => key.clone(),
                };
                flatten_into(bundle, Some(&path), child);
            }
        }
        Value::String(message) => {
            if let Some(key) = prefix {
                bundle.insert(key.to_string(), message.clone());
            }
        }
        other => warn!(
            "Skipping non-string message at '{}': {}",
            prefix.unwrap_or("<root>"),
            other
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LANGUAGES;

    fn bundle(pairs: &[(&str, &str)]) -> MessageBundle {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn bootstrap_defaults_to_english() {
        let i18n = I18n::bootstrap();
        assert_eq!(i18n.locale(), "en");
        assert_eq!(i18n.fallback_locale(), "en");
        assert_eq!(i18n.translate("actions.copy"), "Copy QR code");
    }

    #[test]
    fn bundle_locales_match_language_list() {
        let i18n = I18n::bootstrap();
        let mut expected: Vec<&str> = LANGUAGES.iter().map(|(code, _)| *code).collect();
        expected.sort_unstable();
        assert_eq!(i18n.available_locales(), expected);

        let mut compiled: Vec<String> = rust_i18n::available_locales!()
            .into_iter()
            .map(|locale| locale.to_string())
            .collect();
        compiled.sort_unstable();
        assert_eq!(compiled, expected);
    }

    #[test]
    fn missing_key_falls_back_then_returns_key() {
        let mut i18n = I18n::bootstrap();
        i18n.set_locale("th").unwrap();
        assert_eq!(i18n.translate("language.label"), "ภาษา");
        assert_eq!(i18n.translate("theme.light"), "Light mode");
        assert_eq!(i18n.translate("does.not.exist"), "does.not.exist");
    }

    #[test]
    fn rejects_unknown_locale() {
        let mut i18n = I18n::bootstrap();
        let err = i18n.set_locale("de").unwrap_err();
        assert!(matches!(err, Error::UnsupportedLocale(ref l) if l == "de"));
        assert_eq!(i18n.locale(), "en");
    }

    #[test]
    fn interpolates_named_arguments() {
        let mut i18n = I18n::bootstrap();
        assert_eq!(i18n.translate_with("greeting", &[("name", "Ada")]), "Hello, Ada!");
        i18n.set_locale("fr").unwrap();
        assert_eq!(i18n.translate_with("greeting", &[("name", "Ada")]), "Bonjour, Ada !");
    }

    #[test]
    fn custom_fallback_locale() {
        let mut bundles = HashMap::new();
        bundles.insert("en".to_string(), bundle(&[("a", "A")]));
        bundles.insert("es".to_string(), bundle(&[("a", "A-es"), ("b", "B-es")]));
        let i18n = I18n::new("en", "es", bundles);
        assert_eq!(i18n.translate("a"), "A");
        assert_eq!(i18n.translate("b"), "B-es");
    }

    #[test]
    fn flattens_nested_documents() {
        let parsed = parse_bundle(r#"{"a":{"b":{"c":"deep"}},"top":"t","n":3}"#).unwrap();
        assert_eq!(parsed, bundle(&[("a.b.c", "deep"), ("top", "t")]));
        assert!(parse_bundle("{oops").is_err());
    }

    #[test]
    fn exposes_whole_bundles() {
        let i18n = I18n::bootstrap();
        let es = i18n.messages("es").unwrap();
        assert_eq!(es.get("actions.download").map(String::as_str), Some("Descargar"));
        assert!(i18n.messages("de").is_none());

        let th = i18n.messages("th").unwrap();
        assert!(!th.contains_key("theme.light"));
        assert_eq!(
            i18n.messages("en").unwrap().len(),
            parse_bundle(EMBEDDED_BUNDLES[0].1).unwrap().len()
        );
    }

    #[test]
    fn placeholders_follow_rust_i18n_syntax() {
        let mut bundles = HashMap::new();
        bundles.insert(
            "en".to_string(),
            bundle(&[("pair", "%{a} and %{b}"), ("legacy", "{a} stays")]),
        );
        let i18n = I18n::new("en", "en", bundles);
        assert_eq!(i18n.translate_with("pair", &[("b", "2"), ("a", "1")]), "1 and 2");
        assert_eq!(i18n.translate_with("pair", &[("a", "1")]), "1 and %{b}");
        assert_eq!(i18n.translate_with("legacy", &[("a", "1")]), "{a} stays");
        assert_eq!(i18n.translate_with("absent", &[("a", "1")]), "absent");
    }

    #[test]
    fn empty_bundle_still_counts_as_a_locale() {
        let mut bundles = HashMap::new();
        bundles.insert("en".to_string(), bundle(&[("a", "A")]));
        bundles.insert("xx".to_string(), MessageBundle::new());
        let mut i18n = I18n::new("en", "en", bundles);
        assert_eq!(i18n.available_locales(), vec!["en", "xx"]);
        i18n.set_locale("xx").unwrap();
        assert_eq!(i18n.translate("a"), "A");
        assert_eq!(i18n.messages("xx"), Some(MessageBundle::new()));
    }
}
