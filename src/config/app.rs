// src/config/app.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::calendar::Locale;
use crate::menu::ItemStyle;

pub const DEFAULT_CONFIG_PATH: &str = "config/lunch.toml";
pub const ENV_CONFIG_PATH: &str = "LUNCH_CONFIG_PATH";

fn default_fetch_timeout_secs() -> u64 {
    20
}

/// Everything the service reads at startup. Passed around explicitly;
/// nothing reads the environment after [`AppConfig::load`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Slack incoming-webhook URL. No hook, no Slack.
    pub slack_hook: Option<String>,
    pub slack_channel: Option<String>,
    /// Path token that authorizes posting to Slack.
    pub secret_key: Option<String>,
    pub debug: bool,
    /// Per-source limit in seconds; `0` waits forever.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    pub item_style: ItemStyle,
    pub locale: Locale,
    /// Sort restaurants after the first by name instead of arrival order.
    pub sort_rest: bool,
    pub disabled_sources: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            slack_hook: None,
            slack_channel: None,
            secret_key: None,
            debug: false,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            item_style: ItemStyle::default(),
            locale: Locale::default(),
            sort_rest: false,
            disabled_sources: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load config using env var + fallbacks, then apply env overrides:
    /// 1) $LUNCH_CONFIG_PATH
    /// 2) config/lunch.toml
    /// 3) built-in defaults
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_p.exists() {
                Self::load_from(&default_p)?
            } else {
                Self::default()
            }
        };
        cfg.apply_env();
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: AppConfig = toml::from_str(s)?;
        cfg.disabled_sources = clean_list(std::mem::take(&mut cfg.disabled_sources));
        Ok(cfg)
    }

    /// SLACK_HOOK, SLACK_CHANNEL, SECRET_KEY, DEBUG, FETCH_TIMEOUT_SECS.
    pub fn apply_env(&mut self) {
        if let Some(v) = non_empty_env("SLACK_HOOK") {
            self.slack_hook = Some(v);
        }
        if let Some(v) = non_empty_env("SLACK_CHANNEL") {
            self.slack_channel = Some(v);
        }
        if let Some(v) = non_empty_env("SECRET_KEY") {
            self.secret_key = Some(v);
        }
        if let Some(v) = non_empty_env("DEBUG") {
            self.debug = !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no");
        }
        if let Some(secs) = non_empty_env("FETCH_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.fetch_timeout_secs = secs;
        }
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        (self.fetch_timeout_secs > 0).then(|| Duration::from_secs(self.fetch_timeout_secs))
    }

    /// Post only when a hook is configured and the caller knows the secret.
    pub fn should_send_to_slack(&self, key: Option<&str>) -> bool {
        match (&self.slack_hook, &self.secret_key, key) {
            (Some(_), Some(secret), Some(key)) => secret == key,
            _ => false,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut set = BTreeSet::new();
    for it in items {
        let t = it.trim();
        if !t.is_empty() {
            set.insert(t.to_string());
        }
    }
    set.into_iter().collect()
}
