// src/emitter.rs
use once_cell::sync::OnceCell;
use serde::Serialize;
use tauri::{AppHandle, Emitter, Wry};
use tracing::{debug, error};

static GLOBAL_APP_HANDLE: OnceCell<AppHandle<Wry>> = OnceCell::new();

pub fn init_app_handle(handle: AppHandle<Wry>) {
    if GLOBAL_APP_HANDLE.set(handle).is_err() {
        error!("Global AppHandle was already initialized. This call was ignored.");
    }
}

fn get_app_handle() -> Option<&'static AppHandle<Wry>> {
    GLOBAL_APP_HANDLE.get()
}

/// Broadcasts to the web UI. Before setup has run this only logs.
pub fn emit<S: Serialize + Clone>(event_name: &str, payload: S) {
    if let Some(handle) = get_app_handle() {
        if let Err(e) = handle.emit(event_name, payload) {
            error!("Failed to emit event '{}': {}", event_name, e);
        }
    } else {
        debug!("AppHandle not initialized. Cannot emit event '{}'.", event_name);
    }
}
