use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use tracing::warn;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://backend-8u5mz2smy-sahil-dalwanis-projects.vercel.app";
pub const DEFAULT_CONFIG_FILE: &str = "directory.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub settings_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            settings_path: default_settings_path(),
        }
    }
}

fn default_settings_path() -> PathBuf {
    match dirs::data_local_dir() {
        Some(base) => base.join("members_directory").join("settings.json"),
        None => PathBuf::from("./data/settings.json"),
    }
}

/// Defaults, then `config_path` if it exists, then environment variables.
pub fn load_settings(config_path: &Path) -> Settings {
    let raw = fs::read_to_string(config_path).ok();
    load_settings_from(raw.as_deref(), |name| std::env::var(name).ok())
}

pub(crate) fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_base_url") {
                    settings.api_base_url = v.clone();
                }
                if let Some(v) = file_cfg.get("settings_path") {
                    settings.settings_path = PathBuf::from(v);
                }
            }
            Err(err) => warn!("ignoring unreadable config file: {err}"),
        }
    }

    if let Some(v) = env("DIRECTORY_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("DIRECTORY_SETTINGS_PATH") {
        settings.settings_path = PathBuf::from(v);
    }
    if let Some(v) = env("APP__SETTINGS_PATH") {
        settings.settings_path = PathBuf::from(v);
    }

    settings
}

/// Trims whitespace and trailing slashes and requires an absolute http(s) url.
pub fn normalize_api_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        bail!("api base url must not be empty");
    }

    let parsed =
        Url::parse(trimmed).with_context(|| format!("invalid api base url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("api base url '{raw}' must use http or https");
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
