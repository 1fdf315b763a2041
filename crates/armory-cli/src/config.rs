//! Persisted CLI settings at `<config_dir>/armory/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use armory_core::{DEFAULT_BASE_URL, DEFAULT_LOCALE};
use serde::{Deserialize, Serialize};

use crate::cli::SourceArgs;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub api_key: Option<String>,
    pub locale: Option<String>,
    pub base_url: Option<String>,
}

/// Connection settings after merging flags, environment and config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub api_key: String,
    pub locale: String,
    pub base_url: String,
}

pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Failed to determine config directory")?;
    Ok(config_dir.join("armory").join("config.toml"))
}

impl Settings {
    /// Load settings; a missing file yields empty settings
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Flags and environment win over the file
    pub fn merge(self, source: &SourceArgs) -> Self {
        Self {
            api_key: source.api_key.clone().or(self.api_key),
            locale: source.locale.clone().or(self.locale),
            base_url: source.base_url.clone().or(self.base_url),
        }
    }

    pub fn resolve(self) -> Result<Resolved> {
        let Some(api_key) = self.api_key.filter(|key| !key.trim().is_empty()) else {
            bail!("No API key configured. Pass --api-key, set ARMORY_API_KEY, or run `armory configure --api-key <key>`.");
        };
        Ok(Resolved {
            api_key,
            locale: self.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

/// Settings for a command run, read from the default config file
pub fn resolve(source: &SourceArgs) -> Result<Resolved> {
    Settings::load_from(&config_path()?)?.merge(source).resolve()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("armory").join("config.toml");
        let settings = Settings {
            api_key: Some("secret".to_string()),
            locale: Some("fr".to_string()),
            base_url: None,
        };

        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_flags_override_file() {
        let file = Settings {
            api_key: Some("from-file".to_string()),
            locale: Some("fr".to_string()),
            base_url: None,
        };
        let flags = SourceArgs {
            locale: Some("ja".to_string()),
            ..SourceArgs::default()
        };

        let resolved = file.merge(&flags).resolve().unwrap();
        assert_eq!(resolved.api_key, "from-file");
        assert_eq!(resolved.locale, "ja");
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = Settings::default().resolve().unwrap_err();
        assert!(err.to_string().contains("No API key"));
    }
}
