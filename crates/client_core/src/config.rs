use std::{collections::HashMap, fs, path::Path, time::Duration};

use tracing::warn;
use url::Url;

use crate::{error::ConfigError, faq::DEFAULT_SUPPORT_PHONE};

pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.web3forms.com/submit";
pub const SETTINGS_FILE: &str = "storefront.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub relay_endpoint: String,
    pub access_key: String,
    pub request_timeout_secs: u64,
    pub chat_reply_delay_ms: u64,
    pub support_phone: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            relay_endpoint: DEFAULT_RELAY_ENDPOINT.into(),
            access_key: "YOUR_WEB3FORMS_ACCESS_KEY".into(),
            request_timeout_secs: 15,
            chat_reply_delay_ms: 500,
            support_phone: DEFAULT_SUPPORT_PHONE.into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn chat_reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat_reply_delay_ms)
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file if present, then environment overrides.
/// Values that fail to parse leave the previous layer in place.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, &file_cfg),
            Err(err) => warn!(path = %path.display(), error = %err, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("APP__RELAY_ENDPOINT") {
        settings.relay_endpoint = v;
    }

    if let Some(v) = env("WEB3FORMS_ACCESS_KEY") {
        settings.access_key = v;
    }
    if let Some(v) = env("APP__ACCESS_KEY") {
        settings.access_key = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = env("APP__CHAT_REPLY_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.chat_reply_delay_ms = parsed;
        }
    }

    if let Some(v) = env("APP__SUPPORT_PHONE") {
        settings.support_phone = v;
    }

    settings
}

fn apply_file(settings: &mut Settings, file_cfg: &HashMap<String, toml::Value>) {
    if let Some(v) = file_cfg.get("relay_endpoint").and_then(toml::Value::as_str) {
        settings.relay_endpoint = v.to_string();
    }
    if let Some(v) = file_cfg.get("access_key").and_then(toml::Value::as_str) {
        settings.access_key = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("request_timeout_secs")
        .and_then(toml::Value::as_integer)
        .and_then(|v| u64::try_from(v).ok())
    {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg
        .get("chat_reply_delay_ms")
        .and_then(toml::Value::as_integer)
        .and_then(|v| u64::try_from(v).ok())
    {
        settings.chat_reply_delay_ms = v;
    }
    if let Some(v) = file_cfg.get("support_phone").and_then(toml::Value::as_str) {
        settings.support_phone = v.to_string();
    }
}

pub fn validate_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidEndpoint {
        endpoint: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
