use crate::entry::ResponseMode;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpiraConfig {
    /// Path to the journal database.
    pub db_path: PathBuf,
    /// Default response tone for new sessions.
    pub response_mode: ResponseMode,
    /// How many recent entries to rebuild a session from.
    pub history_limit: u32,
}

impl Default for SpiraConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            response_mode: ResponseMode::Validation,
            history_limit: 50,
        }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spira")
        .join("journal.db")
}

impl SpiraConfig {
    /// Load config from a TOML file, falling back to defaults for missing
    /// fields. Env var overrides are applied after loading.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: SpiraConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if the file doesn't exist or is invalid, return
    /// defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SPIRA_DB") {
            self.db_path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("SPIRA_RESPONSE_MODE") {
            match v.parse() {
                Ok(mode) => self.response_mode = mode,
                Err(e) => tracing::warn!("Ignoring SPIRA_RESPONSE_MODE: {}", e),
            }
        }
        if let Ok(v) = std::env::var("SPIRA_HISTORY_LIMIT") {
            if let Ok(n) = v.parse() {
                self.history_limit = n;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = SpiraConfig::default();
        assert_eq!(cfg.response_mode, ResponseMode::Validation);
        assert_eq!(cfg.history_limit, 50);
        assert!(cfg.db_path.ends_with("spira/journal.db"));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let cfg: SpiraConfig = toml::from_str(r#"response_mode = "humor""#).unwrap();
        assert_eq!(cfg.response_mode, ResponseMode::Humor);
        assert_eq!(cfg.history_limit, 50);
    }

    #[test]
    fn test_full_toml() {
        let cfg: SpiraConfig = toml::from_str(
            r#"
            db_path = "/tmp/test-journal.db"
            response_mode = "mirror_me"
            history_limit = 10
            "#,
        )
        .unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/test-journal.db"));
        assert_eq!(cfg.response_mode, ResponseMode::MirrorMe);
        assert_eq!(cfg.history_limit, 10);
    }
}
