// src/config_manager.rs
use crate::i18n::DEFAULT_LOCALE;
use crate::language::{is_supported_locale, sorted_locales};
use crate::utils::error::Error;
use crate::utils::path::get_config_file_path;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub const LANGUAGE_CONFIG_KEY: &str = "Language";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConfigItem {
    pub name: String,
    pub description: String,
    pub value: String,
    pub default_value: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<String>,
}

impl ConfigItem {
    fn accepts(&self, value: &str) -> bool {
        self.options.is_empty() || self.options.iter().any(|o| o == value)
    }

    fn validate_and_normalize(&mut self) {
        if !self.accepts(&self.value) {
            warn!(
                "Value '{}' for config '{}' not in options. Resetting to default '{}'.",
                self.value, self.name, self.default_value
            );
            self.value = self.default_value.clone();
        }
    }
}

/// Maps an OS locale such as `fr-CA` or `th_TH` onto a supported language.
pub fn lang_from_locale(locale: &str) -> &'static str {
    let primary = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    sorted_locales()
        .into_iter()
        .find(|code| *code == primary)
        .unwrap_or(DEFAULT_LOCALE)
}

fn get_default_lang_from_system() -> &'static str {
    match sys_locale::get_locale() {
        Some(locale) => {
            info!("System locale is: {}", locale);
            lang_from_locale(&locale)
        }
        None => DEFAULT_LOCALE,
    }
}

#[derive(Debug)]
pub struct AppConfig {
    items: HashMap<String, ConfigItem>,
    config_path: PathBuf,
    default_lang: &'static str,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::load(get_config_file_path(), get_default_lang_from_system())
    }

    /// Loads values from `config_path` over the code defaults, drops anything
    /// obsolete or invalid, and writes the normalized result back.
    pub fn load(config_path: impl Into<PathBuf>, default_lang: &'static str) -> Self {
        let mut instance = Self {
            items: Self::get_default_config_items(default_lang),
            config_path: config_path.into(),
            default_lang,
        };

        instance.load_from_file();
        instance.merge_and_validate_defaults();
        instance.save_to_file();
        instance
    }

    fn get_default_config_items(default_lang: &str) -> HashMap<String, ConfigItem> {
        let mut items = HashMap::new();

        items.insert(
            LANGUAGE_CONFIG_KEY.to_string(),
            ConfigItem {
                name: LANGUAGE_CONFIG_KEY.to_string(),
                description: "The display language of the application.".to_string(),
                value: default_lang.to_string(),
                default_value: default_lang.to_string(),
                options: sorted_locales().into_iter().map(str::to_string).collect(),
            },
        );

        items
    }

    fn merge_and_validate_defaults(&mut self) {
        let defaults = Self::get_default_config_items(self.default_lang);

        self.items.retain(|name, _| {
            if defaults.contains_key(name) {
                true
            } else {
                warn!("Removing obsolete config item '{}'.", name);
                false
            }
        });

        for (name, default_item) in defaults {
            match self.items.entry(name) {
                std::collections::hash_map::Entry::Occupied(mut entry) => {
                    let item = entry.get_mut();
                    item.description = default_item.description;
                    item.default_value = default_item.default_value;
                    item.options = default_item.options;
                    item.validate_and_normalize();
                }
                std::collections::hash_map::Entry::Vacant(entry) => {
                    info!("Adding new default config item: {}", entry.key());
                    entry.insert(default_item);
                }
            }
        }
    }

    fn load_from_file(&mut self) {
        if !self.config_path.exists() {
            info!(
                "Config file {:?} not found. Proceeding with default configuration values.",
                self.config_path
            );
            return;
        }

        match fs::read_to_string(&self.config_path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(loaded_values) => {
                    for (name, loaded_value) in loaded_values {
                        if let Some(item) = self.items.get_mut(&name) {
                            item.value = loaded_value;
                        } else {
                            warn!("Loaded unknown config key '{}' from file. It will be removed upon next save.", name);
                        }
                    }
                    info!("Config values loaded from {:?}", self.config_path);
                }
                Err(e) => {
                    error!(
                        "Failed to parse config file {:?}: {}. Using default values.",
                        self.config_path, e
                    );
                }
            },
            Err(e) => {
                error!(
                    "Failed to read config file {:?}: {}. Using default values.",
                    self.config_path, e
                );
            }
        }
    }

    pub fn save_to_file(&self) {
        let values_to_save: HashMap<&str, &str> = self
            .items
            .iter()
            .map(|(name, item)| (name.as_str(), item.value.as_str()))
            .collect();

        match serde_json::to_string_pretty(&values_to_save) {
            Ok(content) => {
                if let Some(parent) = self.config_path.parent() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        error!(
                            "Failed to create parent directory {:?} for config file: {}",
                            parent, e
                        );
                        return;
                    }
                }

                if let Err(e) = fs::write(&self.config_path, content) {
                    error!("Failed to write config file to {:?}: {}", self.config_path, e);
                } else {
                    info!("Config saved to {:?}", self.config_path);
                }
            }
            Err(e) => {
                error!("Failed to serialize config values: {}", e);
            }
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn get_item_value(&self, name: &str) -> Option<&str> {
        self.items.get(name).map(|item| item.value.as_str())
    }

    pub fn get_all_items_vec(&self) -> Vec<ConfigItem> {
        let mut items_vec: Vec<_> = self.items.values().cloned().collect();
        items_vec.sort_by(|a, b| a.name.cmp(&b.name));
        items_vec
    }

    pub fn update_item_value(&mut self, name: &str, new_value: &str) -> Result<(), Error> {
        let item = self
            .items
            .get_mut(name)
            .ok_or_else(|| Error::UnknownConfigItem(name.to_string()))?;
        if !item.accepts(new_value) {
            return Err(Error::InvalidConfigValue {
                name: name.to_string(),
                value: new_value.to_string(),
            });
        }
        item.value = new_value.to_string();
        self.save_to_file();
        info!("Updated config item '{}' and saved configuration.", name);
        Ok(())
    }

    pub fn get_effective_lang(&self) -> &str {
        match self.get_item_value(LANGUAGE_CONFIG_KEY) {
            Some(lang) if is_supported_locale(lang) => lang,
            _ => self.default_lang,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &tempfile::TempDir) -> AppConfig {
        AppConfig::load(dir.path().join("config").join("app_config.json"), "en")
    }

    #[test]
    fn fresh_config_uses_defaults_and_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        assert_eq!(config.get_effective_lang(), "en");
        assert!(config.config_path().exists());

        let items = config.get_all_items_vec();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].options, vec!["en", "fr", "es", "th"]);
    }

    #[test]
    fn update_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir);
        config.update_item_value(LANGUAGE_CONFIG_KEY, "th").unwrap();

        let reloaded = config_in(&dir);
        assert_eq!(reloaded.get_effective_lang(), "th");
    }

    #[test]
    fn update_rejects_unknown_items_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir);
        assert!(matches!(
            config.update_item_value("Theme", "dark"),
            Err(Error::UnknownConfigItem(_))
        ));
        assert!(matches!(
            config.update_item_value(LANGUAGE_CONFIG_KEY, "de"),
            Err(Error::InvalidConfigValue { .. })
        ));
        assert_eq!(config.get_effective_lang(), "en");
    }

    #[test]
    fn invalid_and_obsolete_values_are_dropped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_config.json");
        fs::write(&path, r#"{"Language":"klingon","Theme":"dark"}"#).unwrap();

        let config = AppConfig::load(&path, "fr");
        assert_eq!(config.get_effective_lang(), "fr");
        assert_eq!(config.get_item_value("Theme"), None);

        let saved: HashMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[LANGUAGE_CONFIG_KEY], "fr");
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_config.json");
        fs::write(&path, "not json").unwrap();
        let config = AppConfig::load(&path, "es");
        assert_eq!(config.get_effective_lang(), "es");
    }

    #[test]
    fn maps_system_locales() {
        assert_eq!(lang_from_locale("fr-CA"), "fr");
        assert_eq!(lang_from_locale("th_TH"), "th");
        assert_eq!(lang_from_locale("ES"), "es");
        assert_eq!(lang_from_locale("de-DE"), "en");
        assert_eq!(lang_from_locale(""), "en");
    }
}
