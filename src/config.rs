//! Client configuration with defaults and environment overrides.
//!
//! Browser builds have no process environment, so `from_env` simply yields
//! the defaults there.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The timeout override is not a whole number of milliseconds.
    #[error("invalid PARLEY_REQUEST_TIMEOUT_MS: {value}")]
    InvalidTimeout { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend root every endpoint path is appended to (no trailing `/`).
    pub base_url: String,
    /// Fixed transport ceiling; exceeding it surfaces as a timeout failure.
    pub timeout: Duration,
    /// Destination the browser is sent to when the session ends.
    pub login_route: String,
    /// Durable storage slot holding the bearer token.
    pub token_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            login_route: DEFAULT_LOGIN_ROUTE.to_owned(),
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PARLEY_API_BASE_URL`: default `http://localhost:3000/api`
    /// - `PARLEY_REQUEST_TIMEOUT_MS`: default 10000
    /// - `PARLEY_LOGIN_ROUTE`: default `/login`
    /// - `PARLEY_TOKEN_KEY`: default `token`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if the timeout is not numeric.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if the timeout is not numeric.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let base_url = lookup("PARLEY_API_BASE_URL").unwrap_or(defaults.base_url);
        let timeout = match lookup("PARLEY_REQUEST_TIMEOUT_MS") {
            Some(raw) => {
                let millis = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?;
                Duration::from_millis(millis)
            }
            None => defaults.timeout,
        };
        let login_route = lookup("PARLEY_LOGIN_ROUTE").unwrap_or(defaults.login_route);
        let token_key = lookup("PARLEY_TOKEN_KEY").unwrap_or(defaults.token_key);

        Ok(Self::default()
            .with_base_url(&base_url)
            .with_timeout(timeout)
            .with_login_route(&login_route)
            .with_token_key(&token_key))
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_login_route(mut self, route: &str) -> Self {
        self.login_route = route.trim().to_owned();
        self
    }

    #[must_use]
    pub fn with_token_key(mut self, key: &str) -> Self {
        self.token_key = key.to_owned();
        self
    }

    /// Route to navigate to on session expiry.
    ///
    /// The configured route is canonical; `/login` is used only when it is blank.
    pub fn login_destination(&self) -> &str {
        if self.login_route.is_empty() {
            DEFAULT_LOGIN_ROUTE
        } else {
            &self.login_route
        }
    }

    /// Timeout ceiling in whole milliseconds, saturating at `u32::MAX`.
    pub fn timeout_millis(&self) -> u32 {
        u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX)
    }

    /// Join an endpoint path onto the base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
