// src/presets.rs
//! QR code style presets handed to the renderer.
//!
//! Built-in presets are the default render options shallow-merged with one
//! embedded style document each. A JSON catalog supplied through the
//! environment replaces the built-ins wholesale when it validates.

use crate::utils::collate::locale_cmp;
use crate::utils::error::Error;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::env;
use tracing::{error, info, warn};

pub const PRESETS_ENV_VAR: &str = "QR_CODE_PRESETS";
pub const DEFAULT_PRESET_ENV_VAR: &str = "DEFAULT_PRESET";
pub const PLAIN_PRESET_NAME: &str = "Plain";

/// Renderer options, kept as an untyped bag so unknown keys pass through.
pub type RenderOptions = Map<String, Value>;

/// Display attributes around the rendered code. Any other key is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PresetStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<PresetStyle>,
    #[serde(flatten)]
    pub options: RenderOptions,
}

impl Preset {
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn border_radius(&self) -> Option<&str> {
        self.style.as_ref()?.border_radius.as_deref()
    }

    pub fn background(&self) -> Option<&str> {
        self.style.as_ref()?.background.as_deref()
    }
}

/// An embedded style document: renderer `props` plus display `style`.
#[derive(Debug, Deserialize)]
struct StyleConfig {
    #[serde(default)]
    props: RenderOptions,
    #[serde(default)]
    style: PresetStyle,
}

const BUILT_IN_STYLE_CONFIGS: &[(&str, &str)] = &[
    (PLAIN_PRESET_NAME, include_str!("../assets/presets/plain.json")),
    ("ECHO Black", include_str!("../assets/presets/echo_black.json")),
    ("ECHO Green", include_str!("../assets/presets/echo_green.json")),
    ("ECHO Ivory", include_str!("../assets/presets/echo_ivory.json")),
    ("ECHO White", include_str!("../assets/presets/echo_white.json")),
];

static BUILT_IN_PRESETS: Lazy<Vec<Preset>> = Lazy::new(build_built_in_presets);

pub fn default_preset_options() -> RenderOptions {
    json!({
        "backgroundOptions": { "color": "transparent" },
        "imageOptions": { "margin": 0 },
        "width": 200,
        "height": 200,
        "margin": 0,
        "type": "svg"
    })
    .as_object()
    .cloned()
    .unwrap_or_default()
}

/// Top-level merge: each key in `overlay` replaces the same key in `base`
/// outright. Nested objects are not merged.
pub fn shallow_merge(base: &RenderOptions, overlay: &RenderOptions) -> RenderOptions {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

fn build_preset(name: &str, config: StyleConfig) -> Preset {
    let mut options = shallow_merge(&default_preset_options(), &config.props);
    // name and style are attached separately and must not be shadowed by props
    options.remove("name");
    options.remove("style");
    Preset {
        name: name.to_string(),
        style: Some(config.style),
        options,
    }
}

fn build_built_in_presets() -> Vec<Preset> {
    let mut presets: Vec<Preset> = BUILT_IN_STYLE_CONFIGS
        .iter()
        .map(|(name, source)| {
            let config: StyleConfig = serde_json::from_str(source)
                .unwrap_or_else(|e| panic!("embedded preset '{name}' is malformed: {e}"));
            build_preset(name, config)
        })
        .collect();

    // Plain leads; the rest follow by display name.
    let plain_index = presets
        .iter()
        .position(|p| p.name == PLAIN_PRESET_NAME)
        .unwrap_or(0);
    let plain = presets.remove(plain_index);
    presets.sort_by(|a, b| locale_cmp(&a.name, &b.name));
    presets.insert(0, plain);
    presets
}

pub fn built_in_presets() -> &'static [Preset] {
    &BUILT_IN_PRESETS
}

/// Parses and validates an external preset catalog.
///
/// The text must be a non-empty JSON array of objects, each with a non-empty
/// string `name`. `style`, if present, may hold only the string attributes
/// `borderRadius` and `background`.
/// Every other key is accepted as a renderer option without inspection.
pub fn parse_presets(text: &str) -> Result<Vec<Preset>, Error> {
    let presets: Vec<Preset> = serde_json::from_str(text)?;
    if presets.is_empty() {
        return Err(Error::EmptyPresetCatalog);
    }
    if let Some(index) = presets.iter().position(|p| p.name.trim().is_empty()) {
        return Err(Error::UnnamedPreset { index });
    }

    let mut seen = HashSet::new();
    for preset in &presets {
        if !seen.insert(preset.name.as_str()) {
            warn!("Preset name '{}' appears more than once in the catalog", preset.name);
        }
    }
    Ok(presets)
}

/// External inputs, read once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetSettings {
    pub catalog_override: Option<String>,
    pub default_preset: Option<String>,
}

impl PresetSettings {
    /// Unset and empty variables both read as `None`.
    pub fn from_env() -> Self {
        Self {
            catalog_override: read_env(PRESETS_ENV_VAR),
            default_preset: read_env(DEFAULT_PRESET_ENV_VAR),
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogSource {
    BuiltIn,
    Override,
}

#[derive(Debug, Clone)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
    default_index: usize,
    source: CatalogSource,
}

impl PresetCatalog {
    pub fn built_in() -> Self {
        Self::resolve(&PresetSettings::default())
    }

    /// Never fails: a bad override is logged and the built-ins are used.
    pub fn resolve(settings: &PresetSettings) -> Self {
        let (presets, source) = match non_empty(&settings.catalog_override) {
            None => (built_in_presets().to_vec(), CatalogSource::BuiltIn),
            Some(text) => match parse_presets(text) {
                Ok(presets) => {
                    info!("Using {} presets from {}", presets.len(), PRESETS_ENV_VAR);
                    (presets, CatalogSource::Override)
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using built-in presets.", PRESETS_ENV_VAR, e);
                    (built_in_presets().to_vec(), CatalogSource::BuiltIn)
                }
            },
        };

        let default_index = match non_empty(&settings.default_preset) {
            None => 0,
            Some(wanted) => presets.iter().position(|p| p.name == wanted).unwrap_or_else(|| {
                warn!(
                    "Default preset '{}' not found. Falling back to '{}'.",
                    wanted, presets[0].name
                );
                0
            }),
        };

        Self {
            presets,
            default_index,
            source,
        }
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn default_preset(&self) -> &Preset {
        &self.presets[self.default_index]
    }

    pub fn default_index(&self) -> usize {
        self.default_index
    }

    pub fn source(&self) -> CatalogSource {
        self.source
    }

    pub fn find(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }
}
