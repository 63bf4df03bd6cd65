use std::{fs, path::Path};

use serde::Deserialize;

pub const SETTINGS_FILE: &str = "cycle.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub log_filter: String,
    pub name_check_debounce_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080/cycle/".into(),
            log_filter: "info".into(),
            name_check_debounce_ms: 500,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    log_filter: Option<String>,
    name_check_debounce_ms: Option<u64>,
    request_timeout_secs: Option<u64>,
}

/// Builds the settings from defaults, `cycle.toml` and the environment.
/// A settings file that does not parse is skipped; its error is handed back
/// so it can be reported once logging is up.
pub fn load_settings() -> (Settings, Option<toml::de::Error>) {
    let mut settings = Settings::default();
    let file_error = apply_file(&mut settings, Path::new(SETTINGS_FILE)).err();
    apply_env(&mut settings, |key| std::env::var(key).ok());
    (settings, file_error)
}

fn apply_file(settings: &mut Settings, path: &Path) -> Result<(), toml::de::Error> {
    let Ok(raw) = fs::read_to_string(path) else {
        return Ok(());
    };
    let file_cfg = toml::from_str::<FileSettings>(&raw)?;
    apply_file_settings(settings, file_cfg);
    Ok(())
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.name_check_debounce_ms {
        settings.name_check_debounce_ms = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("CYCLE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("CYCLE_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(parsed) = var("APP__NAME_CHECK_DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
        settings.name_check_debounce_ms = parsed;
    }
    if let Some(parsed) = var("APP__REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        settings.request_timeout_secs = parsed;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
