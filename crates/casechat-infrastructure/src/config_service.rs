//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the front-end configuration
//! from the configuration file (~/.config/casechat/config.toml) and applies
//! environment overrides on top.

use crate::paths::CasechatPaths;
use casechat_core::config::ChatConfig;
use casechat_core::{CaseChatError, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Environment variable overriding `endpoint`.
pub const ENDPOINT_ENV: &str = "CASECHAT_ENDPOINT";

/// Configuration service that loads and caches the chat configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; `None` means the platform default path.
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ChatConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading the default config file.
    ///
    /// The file is read lazily on first access.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a ConfigService reading `path` instead of the default location.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn get_config(&self) -> Result<ChatConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let path = match &self.path {
            Some(path) => path.clone(),
            None => CasechatPaths::config_file().map_err(|e| CaseChatError::config(e.to_string()))?,
        };
        let loaded = apply_overrides(load_config(&path)?, env::var(ENDPOINT_ENV).ok());

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a config file.
///
/// A missing or blank file yields the defaults.
pub fn load_config(path: &Path) -> Result<ChatConfig> {
    if !path.exists() {
        tracing::debug!("[ConfigService] No config at {:?}, using defaults", path);
        return Ok(ChatConfig::default());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(ChatConfig::default());
    }

    let config: ChatConfig = toml::from_str(&content)?;
    tracing::info!("[ConfigService] Loaded config from {:?}", path);
    Ok(config)
}

/// Applies an endpoint override, ignoring blank values.
pub fn apply_overrides(mut config: ChatConfig, endpoint: Option<String>) -> ChatConfig {
    if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
        config.endpoint = endpoint.trim().to_string();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use casechat_core::config::DEFAULT_ENDPOINT;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ChatConfig::default());
    }

    #[test]
    fn test_blank_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "  \n").unwrap();

        assert_eq!(load_config(&path).unwrap(), ChatConfig::default());
    }

    #[test]
    fn test_file_values_are_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
endpoint = "http://saflii-qa.internal/ask"
history_preview_chars = 40
example_prompts = ["What is the rule in Plascon-Evans?"]
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.endpoint, "http://saflii-qa.internal/ask");
        assert_eq!(config.history_preview_chars, 40);
        assert_eq!(config.example_prompts, vec!["What is the rule in Plascon-Evans?"]);
        assert_eq!(config.time_format, "%H:%M");
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "endpoint = [").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_endpoint_override() {
        let config = apply_overrides(
            ChatConfig::default(),
            Some(" http://localhost:8080/ask ".into()),
        );
        assert_eq!(config.endpoint, "http://localhost:8080/ask");

        let config = apply_overrides(ChatConfig::default(), Some("   ".into()));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_service_caches_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "history_preview_chars = 10").unwrap();

        let service = ConfigService::with_path(&path);
        assert_eq!(service.get_config().unwrap().history_preview_chars, 10);

        fs::write(&path, "history_preview_chars = 20").unwrap();
        assert_eq!(service.get_config().unwrap().history_preview_chars, 10);

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().history_preview_chars, 20);
    }
}
