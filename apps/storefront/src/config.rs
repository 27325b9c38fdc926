use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use client_core::DEFAULT_CATALOG_URL;
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "storefront.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub log_filter: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_CATALOG_URL.into(),
            log_filter: "info".into(),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    log_filter: Option<String>,
    request_timeout_secs: Option<u64>,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file (if it exists), then environment overrides.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        apply_file_settings(&mut settings, &raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?;
    }

    apply_env_overrides(&mut settings, env)?;
    Ok(settings)
}

fn apply_file_settings(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if file_cfg.request_timeout_secs.is_some() {
        settings.request_timeout_secs = file_cfg.request_timeout_secs;
    }
    Ok(())
}

fn apply_env_overrides(
    settings: &mut Settings,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = env("STOREFRONT_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        let secs = v
            .trim()
            .parse::<u64>()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_SECS must be whole seconds, got '{v}'"))?;
        settings.request_timeout_secs = Some(secs);
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
