use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use sentimation_core::refresh::DEFAULT_REFRESH_INTERVAL_MS;
use serde::Deserialize;
use tracing::{debug, info, warn};

const CONFIG_ENV_VAR: &str = "SENTIMATION_CONFIG";
const API_URL_ENV_VAR: &str = "SENTIMATION_API_URL";
const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api_url: String,
    pub refresh_interval_ms: u32,
    pub color: bool,
    #[serde(skip)]
    pub loaded_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            color: true,
            loaded_file: None,
        }
    }
}

impl Config {
    /// Reads the first config file found: the explicit path, then
    /// `$SENTIMATION_CONFIG`, then the per-user config directory. No file
    /// means defaults.
    #[tracing::instrument(skip(config_override))]
    pub fn load(config_override: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = resolve_config_path(config_override) else {
            warn!("no config file found; using defaults");
            return Ok(Self::default());
        };

        info!(config = %path.display(), "loading config");
        Self::load_file(&path)
    }

    fn load_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let mut cfg: Config = toml::from_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        cfg.loaded_file = Some(path.to_path_buf());
        Ok(cfg)
    }

    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV_VAR)
            && !url.trim().is_empty()
        {
            debug!(url = %url, "api url from environment");
            self.api_url = url;
        }
    }

    #[tracing::instrument(skip(self, overrides))]
    pub fn apply_overrides<I>(&mut self, overrides: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in overrides {
            debug!(key = %key, value = %value, "applying override");
            match key.as_str() {
                "api_url" => self.api_url = value,
                "refresh_interval_ms" => {
                    self.refresh_interval_ms = value
                        .parse()
                        .with_context(|| format!("invalid refresh_interval_ms: {value}"))?;
                }
                "color" => {
                    self.color = parse_bool(&value)
                        .ok_or_else(|| anyhow!("invalid color setting: {value}"))?;
                }
                other => return Err(anyhow!("unknown config key: {other}")),
            }
        }
        Ok(())
    }
}

fn resolve_config_path(config_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_override {
        return Some(path.to_path_buf());
    }

    if let Ok(from_env) = std::env::var(CONFIG_ENV_VAR) {
        if from_env == "/dev/null" {
            return None;
        }
        return Some(PathBuf::from(from_env));
    }

    let candidate = dirs::config_dir()?.join("sentimation").join("config.toml");
    candidate.exists().then_some(candidate)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "y" | "yes" | "on" | "true" => Some(true),
        "0" | "n" | "no" | "off" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::Config;

    #[test]
    fn reads_toml_file_with_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"http://studio:5000\"\n").expect("write config");

        let cfg = Config::load(Some(&path)).expect("load config");
        assert_eq!(cfg.api_url, "http://studio:5000");
        assert_eq!(cfg.refresh_interval_ms, 30_000);
        assert!(cfg.color);
        assert_eq!(cfg.loaded_file.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn rejects_unknown_keys_in_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "apiurl = \"x\"\n").expect("write config");

        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn overrides_replace_values() {
        let mut cfg = Config::default();
        cfg.apply_overrides([
            ("refresh_interval_ms".to_string(), "5000".to_string()),
            ("color".to_string(), "off".to_string()),
        ])
        .expect("apply overrides");
        assert_eq!(cfg.refresh_interval_ms, 5_000);
        assert!(!cfg.color);

        assert!(
            cfg.apply_overrides([("colour".to_string(), "on".to_string())])
                .is_err()
        );
        assert!(
            cfg.apply_overrides([("refresh_interval_ms".to_string(), "soon".to_string())])
                .is_err()
        );
    }
}
