// src/theme.rs
use crate::preferences::PreferenceStore;
use std::collections::BTreeSet;
use tracing::{debug, info};

pub const DARK_MODE_PREFERENCE_KEY: &str = "dark-mode-preference";
pub const LIGHT_PREFERENCE: &str = "light";
pub const DARK_CLASS: &str = "dark";

/// Whatever carries the UI's `dark` flag: the web root element, a window.
pub trait ThemeSurface {
    fn has_dark_class(&self) -> bool;
    fn remove_dark_class(&mut self);
}

/// In-memory model of the root element's class list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RootClassList {
    classes: BTreeSet<String>,
}

impl RootClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

impl ThemeSurface for RootClassList {
    fn has_dark_class(&self) -> bool {
        self.contains(DARK_CLASS)
    }

    fn remove_dark_class(&mut self) {
        self.classes.remove(DARK_CLASS);
    }
}

/// Pins the UI to light mode. Safe to call any number of times.
pub fn force_light_mode<S, P>(surface: &mut S, store: &mut P)
where
    S: ThemeSurface + ?Sized,
    P: PreferenceStore + ?Sized,
{
    if surface.has_dark_class() {
        debug!("Removing '{}' class from theme surface", DARK_CLASS);
        surface.remove_dark_class();
    }

    store.remove(DARK_MODE_PREFERENCE_KEY);
    store.set(DARK_MODE_PREFERENCE_KEY, LIGHT_PREFERENCE);
    info!("Forced light mode");
}

#[cfg(feature = "desktop")]
pub use desktop::WindowTheme;

#[cfg(feature = "desktop")]
mod desktop {
    use super::{ThemeSurface, LIGHT_PREFERENCE};
    use crate::emitter::emit;
    use serde::Serialize;
    use tauri::{Theme, WebviewWindow};
    use tracing::error;

    pub const THEME_CHANGED_EVENT: &str = "theme-changed";

    #[derive(Clone, Serialize)]
    struct ThemePayload<'a> {
        theme: &'a str,
    }

    /// Native window theme plus the web UI's class list, kept in step via
    /// the `theme-changed` event.
    pub struct WindowTheme {
        window: WebviewWindow,
        ui_light: bool,
    }

    impl WindowTheme {
        pub fn new(window: WebviewWindow) -> Self {
            Self {
                window,
                ui_light: false,
            }
        }
    }

    impl ThemeSurface for WindowTheme {
        fn has_dark_class(&self) -> bool {
            // The web UI may still carry `dark` until it has been told otherwise.
            !self.ui_light || matches!(self.window.theme(), Ok(Theme::Dark))
        }

        fn remove_dark_class(&mut self) {
            if let Err(e) = self.window.set_theme(Some(Theme::Light)) {
                error!("Failed to set light theme on window '{}': {}", self.window.label(), e);
            }
            emit(
                THEME_CHANGED_EVENT,
                ThemePayload {
                    theme: LIGHT_PREFERENCE,
                },
            );
            self.ui_light = true;
        }
    }
}
