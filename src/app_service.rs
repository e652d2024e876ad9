// src/app_service.rs
use crate::config_manager::{AppConfig, ConfigItem, LANGUAGE_CONFIG_KEY};
use crate::emitter::emit;
use crate::i18n::{I18n, MessageBundle};
use crate::language::{sorted_language_entries, LanguageEntry};
use crate::preferences::JsonFilePreferenceStore;
use crate::presets::{Preset, PresetCatalog, PresetSettings};
use crate::theme::{self, WindowTheme};
use crate::utils::error::Error;
use crate::utils::path::get_preferences_file_path;
use rust_i18n::t;
use serde::Serialize;
use std::sync::Mutex;
use tauri::{AppHandle, Manager, WebviewWindow};
use tracing::{info, warn};

pub const LOCALE_CHANGED_EVENT: &str = "locale-changed";
pub const MAIN_WINDOW_LABEL: &str = "main";

/// Everything the commands need, built once during setup and handed to
/// Tauri as managed state.
pub struct AppState {
    pub i18n: Mutex<I18n>,
    pub config: Mutex<AppConfig>,
    pub preferences: Mutex<JsonFilePreferenceStore>,
    pub presets: PresetCatalog,
}

impl AppState {
    pub fn new() -> Self {
        let config = AppConfig::new();
        let mut i18n = I18n::bootstrap();
        let lang = config.get_effective_lang().to_string();
        if let Err(e) = apply_locale(&mut i18n, &lang) {
            warn!("Configured language '{}' could not be applied: {}", lang, e);
        }

        Self {
            i18n: Mutex::new(i18n),
            config: Mutex::new(config),
            preferences: Mutex::new(JsonFilePreferenceStore::open(get_preferences_file_path())),
            presets: PresetCatalog::resolve(&PresetSettings::from_env()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Serialize)]
struct LocalePayload<'a> {
    locale: &'a str,
}

/// Switches the engine and keeps rust-i18n's locale for Rust-side strings in step.
fn apply_locale(i18n: &mut I18n, locale: &str) -> Result<(), Error> {
    i18n.set_locale(locale)?;
    rust_i18n::set_locale(locale);
    info!("Locale set to '{}'", locale);
    Ok(())
}

fn refresh_window_title(app_handle: &AppHandle) {
    if let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
        if let Err(e) = window.set_title(&t!("app.title")) {
            warn!("Failed to update window title: {}", e);
        }
    }
}

pub fn focus_main_window(app_handle: &AppHandle) {
    if let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
        for result in [window.unminimize(), window.show(), window.set_focus()] {
            if let Err(e) = result {
                warn!("Failed to bring main window forward: {}", e);
            }
        }
    }
}

pub fn enforce_light_mode(window: WebviewWindow, state: &AppState) -> Result<(), Error> {
    let mut preferences = state.preferences.lock()?;
    let mut surface = WindowTheme::new(window);
    theme::force_light_mode(&mut surface, &mut *preferences);
    Ok(())
}

pub fn setup(app_handle: &AppHandle) -> Result<(), Error> {
    let state = AppState::new();
    if let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
        enforce_light_mode(window, &state)?;
    }
    app_handle.manage(state);
    refresh_window_title(app_handle);
    info!("AppState initialized and managed by Tauri.");
    Ok(())
}

#[tauri::command]
pub fn get_sorted_locales() -> Vec<LanguageEntry> {
    sorted_language_entries()
}

#[tauri::command]
pub fn get_locale(state: tauri::State<'_, AppState>) -> Result<String, Error> {
    Ok(state.i18n.lock()?.locale().to_string())
}

#[tauri::command]
pub fn set_locale(
    locale: String,
    app_handle: AppHandle,
    state: tauri::State<'_, AppState>,
) -> Result<(), Error> {
    apply_locale(&mut *state.i18n.lock()?, &locale)?;
    state
        .config
        .lock()?
        .update_item_value(LANGUAGE_CONFIG_KEY, &locale)?;
    refresh_window_title(&app_handle);
    emit(LOCALE_CHANGED_EVENT, LocalePayload { locale: &locale });
    Ok(())
}

/// Whole bundle for the web UI's translator; the active locale when `locale` is omitted.
#[tauri::command]
pub fn get_messages(
    locale: Option<String>,
    state: tauri::State<'_, AppState>,
) -> Result<MessageBundle, Error> {
    let i18n = state.i18n.lock()?;
    let locale = locale.unwrap_or_else(|| i18n.locale().to_string());
    i18n.messages(&locale)
        .ok_or(Error::UnsupportedLocale(locale))
}

#[tauri::command]
pub fn translate(key: String, state: tauri::State<'_, AppState>) -> Result<String, Error> {
    Ok(state.i18n.lock()?.translate(&key))
}

#[tauri::command]
pub fn get_presets(state: tauri::State<'_, AppState>) -> Vec<Preset> {
    state.presets.presets().to_vec()
}

#[tauri::command]
pub fn get_default_preset(state: tauri::State<'_, AppState>) -> Preset {
    state.presets.default_preset().clone()
}

#[tauri::command]
pub fn force_light_mode(
    window: WebviewWindow,
    state: tauri::State<'_, AppState>,
) -> Result<(), Error> {
    enforce_light_mode(window, &state)
}

#[tauri::command]
pub fn get_config_payload(state: tauri::State<'_, AppState>) -> Result<Vec<ConfigItem>, Error> {
    Ok(state.config.lock()?.get_all_items_vec())
}

#[tauri::command]
pub fn update_config_item(
    name: String,
    value: String,
    app_handle: AppHandle,
    state: tauri::State<'_, AppState>,
) -> Result<(), Error> {
    if name == LANGUAGE_CONFIG_KEY {
        return set_locale(value, app_handle, state);
    }
    state.config.lock()?.update_item_value(&name, &value)
}
