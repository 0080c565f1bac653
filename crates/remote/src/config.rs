// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::RemoteError;
use std::time::Duration;

/// Base URL used when `PODIUM_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api";

/// Request timeout used when `PODIUM_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings of an [`crate::HttpBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root of the REST API, without a trailing slash.
    pub base_url: String,
    /// Bearer token from an earlier login.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration without a token and with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::InvalidBaseUrl` unless `base_url` starts with
    /// `http://` or `https://`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteError> {
        let base_url: String = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(RemoteError::InvalidBaseUrl {
                url: base_url,
                message: String::from("expected an http:// or https:// URL"),
            });
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `PODIUM_API_URL`, `PODIUM_TOKEN` and `PODIUM_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or the timeout is malformed.
    pub fn from_env() -> Result<Self, RemoteError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, RemoteError> {
        let base_url: String =
            lookup("PODIUM_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config: Self = Self::new(base_url)?;

        if let Some(token) = lookup("PODIUM_TOKEN").filter(|t| !t.is_empty()) {
            config.token = Some(token);
        }

        if let Some(raw) = lookup("PODIUM_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| RemoteError::InvalidSetting {
                    name: "PODIUM_TIMEOUT_SECS",
                    message: e.to_string(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.token, None);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_environment_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("PODIUM_API_URL", "https://podium.example/api/"),
            ("PODIUM_TOKEN", "abc"),
            ("PODIUM_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://podium.example/api");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_malformed_settings_are_rejected() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[("PODIUM_TIMEOUT_SECS", "soon")])),
            Err(RemoteError::InvalidSetting { .. })
        ));
        assert!(matches!(
            ClientConfig::new("localhost:3000"),
            Err(RemoteError::InvalidBaseUrl { .. })
        ));
    }
}
