//! Configuration management for trustfilter using the prefer crate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Backend used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "https://trust-filter-ai.onrender.com";

/// Category sent when the user does not pick one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Minimum trimmed content length accepted for analysis or file loading.
pub const MIN_CONTENT_CHARS: usize = 10;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("Invalid API URL '{0}': {1}")]
    InvalidApiUrl(String, url::ParseError),

    #[error("API URL must use http or https: {0}")]
    UnsupportedScheme(String),
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the analysis backend (without the `/analyze` suffix).
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Category used when none is given on the command line.
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Where the client identifier is persisted.
    /// Defaults to `<data_dir>/trustfilter/identity.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_path: Option<PathBuf>,
    /// Optional request timeout. Requests never time out when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    /// File the config was loaded from, if any.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            default_category: default_category(),
            identity_path: None,
            request_timeout_secs: None,
            source_path: None,
        }
    }
}

impl Config {
    /// Discover and load configuration, falling back to defaults.
    ///
    /// Environment overrides are applied on top of whatever was found.
    pub async fn load() -> Self {
        // Use prefer for file discovery, then parse with serde
        let config = match prefer::load("trustfilter").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => match Self::load_from_path(path).await {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                        Self::default()
                    }
                },
                None => Self::default(),
            },
            // No config file found
            Err(_) => Self::default(),
        };
        config.with_env_overrides()
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse config text in the format implied by `ext`.
    pub fn parse(contents: &str, ext: &str) -> Result<Self, ConfigError> {
        match ext {
            "toml" => toml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "TOML",
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "YAML",
                message: e.to_string(),
            }),
            _ => serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "JSON",
                message: e.to_string(),
            }),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `TFA_API_URL`: backend base URL
    /// - `TFA_CATEGORY`: default category
    /// - `TFA_IDENTITY_PATH`: client identifier file
    /// - `TFA_REQUEST_TIMEOUT`: request timeout in seconds
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("TFA_API_URL") {
            if !val.trim().is_empty() {
                self.api_base = val;
            }
        }
        if let Ok(val) = std::env::var("TFA_CATEGORY") {
            if !val.trim().is_empty() {
                self.default_category = val;
            }
        }
        if let Ok(val) = std::env::var("TFA_IDENTITY_PATH") {
            if !val.trim().is_empty() {
                self.identity_path = Some(PathBuf::from(val));
            }
        }
        if let Ok(val) = std::env::var("TFA_REQUEST_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.request_timeout_secs = Some(secs);
            }
        }
        self
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.to_string();
        self
    }

    /// Validated backend base URL with trailing slashes removed.
    pub fn api_base_url(&self) -> Result<String, ConfigError> {
        let trimmed = self.api_base.trim().trim_end_matches('/');
        let parsed = url::Url::parse(trimmed)
            .map_err(|e| ConfigError::InvalidApiUrl(self.api_base.clone(), e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(self.api_base.clone()));
        }
        Ok(trimmed.to_string())
    }

    /// Full URL of the analysis endpoint.
    pub fn analyze_url(&self) -> Result<String, ConfigError> {
        Ok(format!("{}/analyze", self.api_base_url()?))
    }

    /// Request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Resolved location of the identity file.
    ///
    /// Returns `None` when no explicit path is set and the platform has no
    /// data directory; the identifier then lives in memory only.
    pub fn identity_file(&self) -> Option<PathBuf> {
        self.identity_path
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("trustfilter").join("identity.json")))
    }
}
