//! Authenticated URL builder

use super::cache_bust::{CacheBuster, MonotonicClockBuster};
use crate::auth::{require_credential, CredentialSource};
use crate::error::{Error, Result};
use crate::types::Photo;
use std::sync::Arc;
use url::{form_urlencoded, Url};

/// Settings for resolving and signing media URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilderConfig {
    /// API base used in production builds
    pub api_base: Option<String>,
    /// Document origin used instead of the API base when routing through a
    /// development proxy
    pub dev_proxy_origin: Option<String>,
    /// Query parameter carrying the bearer token
    pub token_param: String,
    /// Query parameter carrying the cache-busting value
    pub cache_bust_param: String,
    /// Whether building without a credential is a configuration error
    pub require_credential: bool,
}

impl Default for UrlBuilderConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            dev_proxy_origin: None,
            token_param: "token".to_string(),
            cache_bust_param: "_ts".to_string(),
            require_credential: true,
        }
    }
}

impl UrlBuilderConfig {
    /// Config resolving relative paths under an API base
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: Some(api_base.into()),
            ..Self::default()
        }
    }

    /// Config resolving relative paths against a dev proxy's document origin
    pub fn with_dev_proxy(origin: impl Into<String>) -> Self {
        Self {
            dev_proxy_origin: Some(origin.into()),
            ..Self::default()
        }
    }
}

/// Builds browser-loadable media URLs carrying the credential as a query
/// parameter
#[derive(Clone)]
pub struct AuthenticatedUrlBuilder {
    config: UrlBuilderConfig,
    api_base: Option<Url>,
    dev_proxy_origin: Option<Url>,
    cache_buster: Arc<dyn CacheBuster>,
}

impl AuthenticatedUrlBuilder {
    /// Create a builder using the wall clock for cache busting
    pub fn new(config: UrlBuilderConfig) -> Result<Self> {
        Self::with_cache_buster(config, Arc::new(MonotonicClockBuster::new()))
    }

    /// Create a builder with an injected cache-busting source
    pub fn with_cache_buster(
        config: UrlBuilderConfig,
        cache_buster: Arc<dyn CacheBuster>,
    ) -> Result<Self> {
        if config.token_param.is_empty() || config.cache_bust_param.is_empty() {
            return Err(Error::invalid_config(
                "token and cache-bust parameter names must not be empty",
            ));
        }
        if config.token_param == config.cache_bust_param {
            return Err(Error::invalid_config(format!(
                "token and cache-bust parameters share the name '{}'",
                config.token_param
            )));
        }

        let api_base = config.api_base.as_deref().map(Url::parse).transpose()?;
        let dev_proxy_origin = config
            .dev_proxy_origin
            .as_deref()
            .map(Url::parse)
            .transpose()?;

        Ok(Self {
            config,
            api_base,
            dev_proxy_origin,
            cache_buster,
        })
    }

    /// Get the builder configuration
    pub fn config(&self) -> &UrlBuilderConfig {
        &self.config
    }

    /// Build an authenticated URL for a relative path or absolute URL
    ///
    /// Any existing token or cache-bust parameters are replaced; every other
    /// query parameter is kept in place.
    pub fn build(&self, path_or_url: &str, token: Option<&str>) -> Result<Url> {
        let token = match token.filter(|t| !t.is_empty()) {
            Some(token) => Some(token),
            None if self.config.require_credential => {
                return Err(Error::invalid_config(
                    "a credential is required to build media URLs",
                ))
            }
            None => None,
        };

        let mut url = self.resolve(path_or_url)?;
        let token_param = self.config.token_param.as_str();
        let bust_param = self.config.cache_bust_param.as_str();

        // Untouched parameters are kept byte-for-byte, in their original order
        let mut query = url
            .query()
            .unwrap_or_default()
            .split('&')
            .filter(|segment| !segment.is_empty())
            .filter(|segment| {
                let key = form_urlencoded::parse(segment.as_bytes()).next();
                !key.is_some_and(|(key, _)| key == token_param || key == bust_param)
            })
            .collect::<Vec<_>>()
            .join("&");

        {
            let mut pairs = form_urlencoded::Serializer::new(&mut query);
            if let Some(token) = token {
                pairs.append_pair(token_param, token);
            }
            pairs.append_pair(bust_param, &self.cache_buster.next_value());
        }
        url.set_query(Some(&query));

        Ok(url)
    }

    /// Build an authenticated URL using the current credential
    ///
    /// An absent credential fails with [`Error::Unauthenticated`].
    pub async fn build_with(
        &self,
        path_or_url: &str,
        credentials: &dyn CredentialSource,
    ) -> Result<Url> {
        let token = require_credential(credentials).await?;
        self.build(path_or_url, Some(&token))
    }

    /// Signed thumbnail URL for a photo
    pub fn signed_thumbnail(&self, photo: &Photo, token: Option<&str>) -> Result<Url> {
        self.build(&photo.thumbnail_url, token)
    }

    /// Signed full-resolution URL for a photo
    pub fn signed_full(&self, photo: &Photo, token: Option<&str>) -> Result<Url> {
        self.build(&photo.url, token)
    }

    /// Resolve a path or URL to an absolute URL without signing it
    ///
    /// Relative inputs must stay on the configured origin: a scheme-relative
    /// path such as `//other.host/x` fails with
    /// [`Error::InvalidConfiguration`].
    pub fn resolve(&self, path_or_url: &str) -> Result<Url> {
        if let Some(url) = parse_absolute(path_or_url) {
            return Ok(url);
        }

        // The dev proxy forwards from the document root, the API base keeps
        // its path prefix.
        let (base, url) = if let Some(origin) = &self.dev_proxy_origin {
            (origin, origin.join(path_or_url)?)
        } else if let Some(base) = &self.api_base {
            let prefix = base.as_str().trim_end_matches('/');
            let path = path_or_url.trim_start_matches('/');
            (base, Url::parse(&format!("{prefix}/{path}"))?)
        } else {
            return Err(Error::missing_base_url(path_or_url));
        };

        if url.origin() != base.origin() {
            return Err(Error::invalid_config(format!(
                "relative media path '{path_or_url}' resolves off the configured origin"
            )));
        }
        Ok(url)
    }
}

impl std::fmt::Debug for AuthenticatedUrlBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedUrlBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn parse_absolute(candidate: &str) -> Option<Url> {
    Url::parse(candidate)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}
