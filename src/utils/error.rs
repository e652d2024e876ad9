// src/utils/error.rs

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("preset catalog must contain at least one preset")]
    EmptyPresetCatalog,
    #[error("preset at index {index} has an empty name")]
    UnnamedPreset { index: usize },
    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),
    #[error("unknown config item '{0}'")]
    UnknownConfigItem(String),
    #[error("invalid value '{value}' for config item '{name}'")]
    InvalidConfigValue { name: String, value: String },
    #[error("application state lock was poisoned")]
    StatePoisoned,
    #[cfg(feature = "desktop")]
    #[error(transparent)]
    Tauri(#[from] tauri::Error),
}

#[derive(serde::Serialize)]
#[serde(tag = "kind", content = "message")]
#[serde(rename_all = "camelCase")]
enum ErrorKind {
    Io(String),
    Json(String),
    Preset(String),
    Locale(String),
    Config(String),
    State(String),
    #[cfg(feature = "desktop")]
    Tauri(String),
}

impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let error_message = self.to_string();
        let error_kind = match self {
            Self::Io(_) => ErrorKind::Io(error_message),
            Self::Json(_) => ErrorKind::Json(error_message),
            Self::EmptyPresetCatalog | Self::UnnamedPreset { .. } => {
                ErrorKind::Preset(error_message)
            }
            Self::UnsupportedLocale(_) => ErrorKind::Locale(error_message),
            Self::UnknownConfigItem(_) | Self::InvalidConfigValue { .. } => {
                ErrorKind::Config(error_message)
            }
            Self::StatePoisoned => ErrorKind::State(error_message),
            #[cfg(feature = "desktop")]
            Self::Tauri(_) => ErrorKind::Tauri(error_message),
        };
        error_kind.serialize(serializer)
    }
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Error::StatePoisoned
    }
}
