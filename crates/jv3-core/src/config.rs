use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::classifier::ArtifactFlow;
use crate::error::{Jv3Error, Result};
use crate::reply::DEFAULT_REPLY_DELAY;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub reply_delay_ms: u64,
    pub flow: ArtifactFlow,
    pub download_dir: Option<PathBuf>,
    pub preview_dir: Option<PathBuf>,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            reply_delay_ms: DEFAULT_REPLY_DELAY.as_millis() as u64,
            flow: ArtifactFlow::Extended,
            download_dir: None,
            preview_dir: None,
            tick_rate_ms: 300,
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    /// Where downloads go: configured dir, then the user's downloads dir,
    /// then the working directory
    pub fn resolved_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn resolved_preview_dir(&self) -> PathBuf {
        self.preview_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("jv3"))
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(Jv3Error::ConfigDir)?;

        Ok(config_dir.join("jv3").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.reply_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jv3").join("config.json");
        let config = Config {
            reply_delay_ms: 5,
            flow: ArtifactFlow::Simplified,
            download_dir: Some(dir.path().to_path_buf()),
            ..Config::new()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "flow": "simplified" }"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.flow, ArtifactFlow::Simplified);
        assert_eq!(config.reply_delay_ms, 1000);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Jv3Error::Json(_))));
    }

    #[test]
    fn test_configured_download_dir_wins() {
        let config = Config {
            download_dir: Some(PathBuf::from("/tmp/x")),
            ..Config::new()
        };
        assert_eq!(config.resolved_download_dir(), PathBuf::from("/tmp/x"));
    }
}
