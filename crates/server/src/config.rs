use std::{collections::HashMap, fs, path::Path};

use shared::error::Locale;
use tracing::warn;

pub const SETTINGS_FILE: &str = "preview.toml";
const DEFAULT_PORT_ATTEMPTS: u16 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub page_locale: Locale,
    pub api_base: String,
    pub port_attempts: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".into(),
            page_locale: Locale::Ko,
            api_base: String::new(),
            port_attempts: DEFAULT_PORT_ATTEMPTS,
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the optional TOML file, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, &file_cfg),
            Err(error) => warn!(path = %path.display(), %error, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }
    if let Some(port) = env("PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => settings.bind_addr = with_port(&settings.bind_addr, port),
            Err(_) => warn!(%port, "ignoring non-numeric PORT"),
        }
    }
    if let Some(v) = env("APP__PAGE_LOCALE") {
        match v.parse::<Locale>() {
            Ok(locale) => settings.page_locale = locale,
            Err(error) => warn!(%error, "ignoring APP__PAGE_LOCALE"),
        }
    }
    if let Some(v) = env("APP__API_BASE") {
        settings.api_base = v;
    }
    if let Some(v) = env("APP__PORT_ATTEMPTS") {
        if let Ok(parsed) = v.parse::<u16>() {
            settings.port_attempts = parsed.max(1);
        }
    }

    settings
}

fn apply_file(settings: &mut Settings, file_cfg: &HashMap<String, toml::Value>) {
    if let Some(v) = file_cfg.get("bind_addr").and_then(toml::Value::as_str) {
        settings.bind_addr = v.to_string();
    }
    if let Some(v) = file_cfg.get("port").and_then(toml::Value::as_integer) {
        if let Ok(port) = u16::try_from(v) {
            settings.bind_addr = with_port(&settings.bind_addr, port);
        }
    }
    if let Some(v) = file_cfg.get("page_locale").and_then(toml::Value::as_str) {
        if let Ok(locale) = v.parse::<Locale>() {
            settings.page_locale = locale;
        }
    }
    if let Some(v) = file_cfg.get("api_base").and_then(toml::Value::as_str) {
        settings.api_base = v.to_string();
    }
    if let Some(v) = file_cfg.get("port_attempts").and_then(toml::Value::as_integer) {
        if let Ok(attempts) = u16::try_from(v) {
            settings.port_attempts = attempts.max(1);
        }
    }
}

fn with_port(bind_addr: &str, port: u16) -> String {
    let host = match bind_addr.rsplit_once(':') {
        Some((host, _)) => host.trim(),
        None => bind_addr.trim(),
    };
    let host = if host.is_empty() { "127.0.0.1" } else { host };
    format!("{host}:{port}")
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
