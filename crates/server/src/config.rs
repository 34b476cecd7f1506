use std::{collections::HashMap, fs, path::PathBuf};

use directory::DirectoryConfig;
use tracing::warn;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    /// Built front end; unknown paths fall back to its `index.html`.
    pub static_dir: PathBuf,
    pub directory: DirectoryConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:5000".into(),
            static_dir: PathBuf::from("client/build"),
            directory: DirectoryConfig::default(),
        }
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    settings_from_sources(file.as_deref(), |name| std::env::var(name).ok())
}

/// Defaults, then `server.toml` contents, then environment. For each
/// setting the `APP__` variable wins over the bare one.
pub(crate) fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr") {
                    settings.server_bind = v.clone();
                }
                if let Some(v) = file_cfg.get("static_dir") {
                    settings.static_dir = PathBuf::from(v);
                }
                if let Some(v) = file_cfg.get("directory_url") {
                    settings.directory.directory_url = v.clone();
                }
                if let Some(v) = file_cfg.get("directory_key") {
                    settings.directory.directory_key = v.clone();
                }
            }
            Err(error) => warn!(%error, file = SETTINGS_FILE, "ignoring unreadable settings file"),
        }
    }

    let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(port) = env("PORT") {
        settings.server_bind = format!("0.0.0.0:{}", port.trim());
    }
    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("STATIC_DIR") {
        settings.static_dir = PathBuf::from(v);
    }
    if let Some(v) = env("APP__STATIC_DIR") {
        settings.static_dir = PathBuf::from(v);
    }

    if let Some(v) = env("DIRECTORY_URL") {
        settings.directory.directory_url = v;
    }
    if let Some(v) = env("APP__DIRECTORY_URL") {
        settings.directory.directory_url = v;
    }

    if let Some(v) = env("DIRECTORY_KEY") {
        settings.directory.directory_key = v;
    }
    if let Some(v) = env("APP__DIRECTORY_KEY") {
        settings.directory.directory_key = v;
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
