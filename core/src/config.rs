//! Client configuration: origin, API prefix, default headers and credential.

use std::collections::BTreeMap;
use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Origin used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Path segment placed between the origin and every request path.
pub const DEFAULT_API_PREFIX: &str = "/api/";

/// `Accept` value sent with every request unless overridden.
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

pub const ENV_BASE_URL: &str = "COURSE_API_BASE_URL";
pub const ENV_API_PREFIX: &str = "COURSE_API_PREFIX";
pub const ENV_SESSION_TOKEN: &str = "COURSE_SESSION_TOKEN";

/// Opaque, pre-issued session credential.
///
/// Sent verbatim as `Cookie: session=<token>`. Never decoded or refreshed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Accept".to_string(), DEFAULT_ACCEPT.to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ])
}

/// Everything a `RequestClient` needs to address the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_headers")]
    pub default_headers: BTreeMap<String, String>,
    #[serde(default)]
    pub session_token: Option<SessionToken>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            default_headers: default_headers(),
            session_token: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    pub fn session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(SessionToken::new(token));
        self
    }

    /// Add or replace a default header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Parse a JSON document such as
    /// `{"baseUrl": "...", "defaultHeaders": {...}, "sessionToken": "..."}`.
    /// Omitted keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build from `COURSE_API_BASE_URL`, `COURSE_API_PREFIX` and
    /// `COURSE_SESSION_TOKEN`. Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(base_url) = read_var(ENV_BASE_URL)? {
            config.base_url = base_url;
        }
        if let Some(prefix) = read_var(ENV_API_PREFIX)? {
            config.api_prefix = prefix;
        }
        config.session_token = read_var(ENV_SESSION_TOKEN)?.map(SessionToken::new);
        Ok(config)
    }
}

fn read_var(name: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { name }),
    }
}
