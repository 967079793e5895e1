//! Client configuration
//!
//! This module contains the configuration structures for the photo client,
//! loadable from YAML or JSON files. Every field has a default, so an empty
//! document plus an API base is a complete configuration.

use crate::api::{DEFAULT_PERSON_PHOTOS_PATH, DEFAULT_PHOTOS_PATH};
use crate::continuation::TriggerMargin;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::signing::UrlBuilderConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base used in production builds
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Development proxy settings
    #[serde(default)]
    pub dev_proxy: DevProxyConfig,

    /// Photos requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Distance, in pixels, before the sentinel is visible at which the next
    /// page is requested
    #[serde(default = "default_trigger_margin")]
    pub trigger_margin_px: u32,

    /// Main listing endpoint path
    #[serde(default = "default_photos_path")]
    pub photos_path: String,

    /// Per-person listing endpoint path, with an `{id}` placeholder
    #[serde(default = "default_person_photos_path")]
    pub person_photos_path: String,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Media URL signing settings
    #[serde(default)]
    pub signing: SigningSettings,
}

fn default_page_size() -> u32 {
    50
}

fn default_trigger_margin() -> u32 {
    400
}

fn default_photos_path() -> String {
    DEFAULT_PHOTOS_PATH.to_string()
}

fn default_person_photos_path() -> String {
    DEFAULT_PERSON_PHOTOS_PATH.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            dev_proxy: DevProxyConfig::default(),
            page_size: default_page_size(),
            trigger_margin_px: default_trigger_margin(),
            photos_path: default_photos_path(),
            person_photos_path: default_person_photos_path(),
            http: HttpSettings::default(),
            signing: SigningSettings::default(),
        }
    }
}

// ============================================================================
// Dev Proxy
// ============================================================================

/// Route media requests through a development proxy on the document origin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevProxyConfig {
    /// Whether the proxy is in use
    #[serde(default)]
    pub enabled: bool,

    /// Origin the document is served from (e.g. `http://localhost:5173`)
    #[serde(default)]
    pub document_origin: Option<String>,
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries of transient failures per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Sustained request rate
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,

    /// Request burst allowance
    #[serde(default = "default_burst")]
    pub burst_size: u32,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_rps() -> u32 {
    10
}

fn default_burst() -> u32 {
    10
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            requests_per_second: default_rps(),
            burst_size: default_burst(),
            user_agent: None,
        }
    }
}

// ============================================================================
// Signing Settings
// ============================================================================

/// Media URL signing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningSettings {
    /// Query parameter carrying the token
    #[serde(default = "default_token_param")]
    pub token_param: String,

    /// Query parameter carrying the cache-busting value
    #[serde(default = "default_cache_bust_param")]
    pub cache_bust_param: String,

    /// Refuse to build media URLs without a credential
    #[serde(default = "default_true")]
    pub require_credential: bool,
}

fn default_token_param() -> String {
    "token".to_string()
}

fn default_cache_bust_param() -> String {
    "_ts".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for SigningSettings {
    fn default() -> Self {
        Self {
            token_param: default_token_param(),
            cache_bust_param: default_cache_bust_param(),
            require_credential: true,
        }
    }
}

// ============================================================================
// Loading & Conversion
// ============================================================================

impl ClientConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config {}: {e}", path.display()))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("yaml" | "yml") | None => Self::from_yaml_str(&contents),
            Some(other) => Err(Error::config(format!(
                "Unsupported config format '.{other}'"
            ))),
        }
    }

    /// Parse YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::invalid_config("page_size must be at least 1"));
        }
        if self.signing.token_param.is_empty() || self.signing.cache_bust_param.is_empty() {
            return Err(Error::invalid_config(
                "signing parameter names must not be empty",
            ));
        }
        if self.signing.token_param == self.signing.cache_bust_param {
            return Err(Error::invalid_config(
                "token_param and cache_bust_param must differ",
            ));
        }
        if !self.person_photos_path.contains("{id}") {
            return Err(Error::invalid_config(
                "person_photos_path must contain an {id} placeholder",
            ));
        }
        if self.dev_proxy.enabled && self.dev_proxy.document_origin.is_none() {
            return Err(Error::invalid_config(
                "dev_proxy is enabled but document_origin is not set",
            ));
        }
        if self.api_base_url.is_none() {
            return Err(Error::missing_base_url(&self.photos_path));
        }
        Ok(())
    }

    /// Viewport trigger margin
    pub fn trigger_margin(&self) -> TriggerMargin {
        TriggerMargin(self.trigger_margin_px)
    }

    /// HTTP client configuration for API calls
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .max_retries(self.http.max_retries)
            .rate_limit(RateLimiterConfig::new(
                self.http.requests_per_second,
                self.http.burst_size,
            ));
        if let Some(base) = &self.api_base_url {
            builder = builder.base_url(base);
        }
        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }

    /// URL builder configuration for media URLs
    pub fn url_builder_config(&self) -> UrlBuilderConfig {
        let dev_proxy_origin = if self.dev_proxy.enabled {
            self.dev_proxy.document_origin.clone()
        } else {
            None
        };
        UrlBuilderConfig {
            api_base: self.api_base_url.clone(),
            dev_proxy_origin,
            token_param: self.signing.token_param.clone(),
            cache_bust_param: self.signing.cache_bust_param.clone(),
            require_credential: self.signing.require_credential,
        }
    }
}
