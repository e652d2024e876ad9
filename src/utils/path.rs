use lazy_static::lazy_static;
use std::env;
use std::path::PathBuf;

const BASE_DIR: &str = "data";
const CONFIG_FILE_NAME: &str = "app_config.json";
const PREFERENCES_FILE_NAME: &str = "preferences.json";

lazy_static! {
    static ref CWD: PathBuf = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
}

fn get_base_dir() -> PathBuf {
    CWD.join(BASE_DIR)
}

pub fn get_log_dir() -> PathBuf {
    get_base_dir().join("logs")
}

pub fn get_config_dir() -> PathBuf {
    get_base_dir().join("config")
}

pub fn get_config_file_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE_NAME)
}

/// Durable home of the values the web UI would otherwise keep in `localStorage`.
pub fn get_preferences_file_path() -> PathBuf {
    get_config_dir().join(PREFERENCES_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_files_live_under_config_dir() {
        let config_dir = get_config_dir();
        assert!(get_config_file_path().starts_with(&config_dir));
        assert!(get_preferences_file_path().starts_with(&config_dir));
        assert!(get_log_dir().ends_with("data/logs"));
    }
}
