//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → build-time env → runtime env → CLI flags.
//!
//! Config lives at `~/.inlaw/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Environment variable selecting the backend base URL.
pub const API_URL_ENV: &str = "INLAW_API_URL";

/// Base URL baked in at compile time, if `INLAW_API_URL` was set for the build.
const BUILD_API_URL: Option<&str> = option_env!("INLAW_API_URL");

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InlawConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.inlaw/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".inlaw").join("config.toml"))
}

/// Load config from `~/.inlaw/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `InlawConfig::default()`.
pub fn load_config() -> Result<InlawConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(InlawConfig::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<InlawConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(InlawConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: InlawConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# InLaw Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → INLAW_API_URL → --api-url.

# [api]
# base_url = "http://localhost:8000"
# timeout_ms = 30000
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config. `cli_api_url` is the `--api-url` flag, if given.
pub fn resolve(config: &InlawConfig, cli_api_url: Option<&str>) -> ResolvedConfig {
    let env_api_url = std::env::var(API_URL_ENV).ok();
    resolve_with_env(config, cli_api_url, env_api_url.as_deref())
}

fn resolve_with_env(
    config: &InlawConfig,
    cli_api_url: Option<&str>,
    env_api_url: Option<&str>,
) -> ResolvedConfig {
    // Base URL: CLI → runtime env → build-time env → config → default
    // Blank values (e.g. `INLAW_API_URL=` in a .env file) fall through to the next layer
    let present = |url: &&str| !url.trim().is_empty();
    let base_url = cli_api_url
        .filter(present)
        .or(env_api_url.filter(present))
        .or(BUILD_API_URL.filter(present))
        .or(config.api.base_url.as_deref().filter(present))
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string();

    let timeout = config
        .api
        .timeout_ms
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_TIMEOUT);

    ResolvedConfig { base_url, timeout }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&InlawConfig::default(), None, None);
        assert_eq!(resolved.timeout, Duration::from_millis(30_000));
        if BUILD_API_URL.is_none() {
            assert_eq!(resolved.base_url, "http://localhost:8000");
        }
    }

    #[test]
    fn test_resolve_precedence() {
        let config = InlawConfig {
            api: ApiConfig {
                base_url: Some("http://file:8000".to_string()),
                timeout_ms: Some(5000),
            },
        };

        let from_cli = resolve_with_env(&config, Some("http://cli:8000"), Some("http://env:8000"));
        assert_eq!(from_cli.base_url, "http://cli:8000");

        let from_env = resolve_with_env(&config, None, Some("http://env:8000"));
        assert_eq!(from_env.base_url, "http://env:8000");

        if BUILD_API_URL.is_none() {
            let from_file = resolve_with_env(&config, None, None);
            assert_eq!(from_file.base_url, "http://file:8000");
        }
        assert_eq!(from_env.timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_blank_env_does_not_hide_config_file() {
        let config = InlawConfig {
            api: ApiConfig {
                base_url: Some("http://file:8000".to_string()),
                timeout_ms: None,
            },
        };

        let resolved = resolve_with_env(&config, Some(""), Some("  "));
        if BUILD_API_URL.is_none() {
            assert_eq!(resolved.base_url, "http://file:8000");
        }

        let blank_file = InlawConfig {
            api: ApiConfig {
                base_url: Some(String::new()),
                timeout_ms: None,
            },
        };
        if BUILD_API_URL.is_none() {
            assert_eq!(
                resolve_with_env(&blank_file, None, Some("")).base_url,
                "http://localhost:8000"
            );
        }
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let config = InlawConfig {
            api: ApiConfig {
                base_url: None,
                timeout_ms: Some(0),
            },
        };
        assert_eq!(resolve_with_env(&config, None, None).timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: InlawConfig = toml::from_str(
            r#"
[api]
base_url = "http://192.168.1.20:8000"
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://192.168.1.20:8000"));
        assert!(config.api.timeout_ms.is_none());

        let empty: InlawConfig = toml::from_str("").unwrap();
        assert!(empty.api.base_url.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("inlaw-config-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("inlaw-config-gen-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();
        assert!(config.api.base_url.is_none());
        assert!(path.exists());

        // The generated file is all comments and must parse back to defaults
        let regenerated = load_config_from(&path).unwrap();
        assert!(regenerated.api.base_url.is_none());

        fs::remove_dir_all(&dir).unwrap();
    }
}
