#[cfg(feature = "desktop")]
mod app_service;
pub mod config_manager;
#[cfg(feature = "desktop")]
mod emitter;
pub mod i18n;
pub mod language;
pub mod preferences;
pub mod presets;
pub mod theme;
pub mod utils;

rust_i18n::i18n!("locales", fallback = "en");

#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
mod desktop {
    use crate::app_service;
    use crate::utils::logger::LoggerBuilder;
    use tracing::{error, info};

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        if let Err(e) = LoggerBuilder::new().default_level("debug").init() {
            eprintln!("Warning: failed to initialize logging: {e:#}");
        }
        info!("Log initialized");

        let builder = tauri::Builder::default();
        #[cfg(not(any(target_os = "android", target_os = "ios")))]
        let builder = builder.plugin(tauri_plugin_single_instance::init(|app, args, cwd| {
            info!("tauri_plugin_single_instance args:{:?} cwd:{}", args, cwd);
            app_service::focus_main_window(app);
        }));

        let result = builder
            .setup(|app| {
                let app_handle = app.handle();
                crate::emitter::init_app_handle(app_handle.clone());
                app_service::setup(app_handle)?;
                Ok(())
            })
            .invoke_handler(tauri::generate_handler![
                app_service::get_sorted_locales,
                app_service::get_locale,
                app_service::set_locale,
                app_service::get_messages,
                app_service::translate,
                app_service::get_presets,
                app_service::get_default_preset,
                app_service::force_light_mode,
                app_service::get_config_payload,
                app_service::update_config_item,
            ])
            .run(tauri::generate_context!());

        if let Err(e) = result {
            error!("Error while running tauri application: {}", e);
            std::process::exit(1);
        }
    }
}
