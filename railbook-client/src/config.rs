//! Client configuration.

use std::time::Duration;

use railbook_core::SUCCESS_CODE;

use crate::ClientError;

/// Base URL used when `RAILBOOK_API_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/api";

/// Per-request timeout used when `RAILBOOK_TIMEOUT_MS` is unset.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for a [`RequestClient`](crate::RequestClient).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ClientConfig {
    /// Root of the booking API; descriptor paths are appended to its path.
    pub base_url: String,

    /// Upper bound on one request, body included.
    pub timeout: Duration,

    /// Sign-in page handed to the notifier when a session expires.
    pub login_url: Option<String>,

    /// Envelope codes treated as success.
    pub success_codes: Vec<i64>,
}

impl ClientConfig {
    /// Create a config for `base_url` with default timeout and success codes.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            login_url: None,
            success_codes: vec![SUCCESS_CODE],
        }
    }

    /// Load settings from `RAILBOOK_*` environment variables.
    ///
    /// | variable                    | meaning                               |
    /// |-----------------------------|---------------------------------------|
    /// | `RAILBOOK_API_BASE_URL`     | base URL                              |
    /// | `RAILBOOK_TIMEOUT_MS`       | timeout in milliseconds               |
    /// | `RAILBOOK_LOGIN_URL`        | sign-in page for expired sessions     |
    /// | `RAILBOOK_ACCEPT_ZERO_CODE` | `1`/`true` also treats code 0 as ok  |
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if a variable is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let base_url = lookup("RAILBOOK_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let mut config = Self::new(base_url);

        if let Some(raw) = lookup("RAILBOOK_TIMEOUT_MS") {
            let millis: u64 = raw.trim().parse().map_err(|e| {
                ClientError::Config(format!("RAILBOOK_TIMEOUT_MS={raw:?}: {e}"))
            })?;
            if millis == 0 {
                return Err(ClientError::Config("RAILBOOK_TIMEOUT_MS must be positive".to_owned()));
            }
            config.timeout = Duration::from_millis(millis);
        }

        config.login_url = lookup("RAILBOOK_LOGIN_URL").filter(|v| !v.trim().is_empty());

        if let Some(raw) = lookup("RAILBOOK_ACCEPT_ZERO_CODE") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config = config.accept_zero_code(),
                "" | "0" | "false" | "no" => {}
                other => {
                    return Err(ClientError::Config(format!(
                        "RAILBOOK_ACCEPT_ZERO_CODE={other:?}: expected a boolean"
                    )))
                }
            }
        }

        Ok(config)
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the sign-in page reported on HTTP 401.
    #[must_use]
    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = Some(url.into());
        self
    }

    /// Also treat envelope code `0` as success.
    #[must_use]
    pub fn accept_zero_code(mut self) -> Self {
        if !self.success_codes.contains(&0) {
            self.success_codes.push(0);
        }
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
