use std::time::Duration;

use tracing::debug;

use crate::error::DotenvError;
use crate::salts::{Result, SaltSource};

pub const DEFAULT_SALTS_URL: &str = "https://api.wordpress.org/secret-key/1.1/salt/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// The WordPress.org secret-key service, or any endpoint answering in the
/// same `define()` format.
#[derive(Debug, Clone)]
pub struct HttpSaltSource {
    url: String,
    timeout: Duration,
}

impl HttpSaltSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    fn fetch_error(&self, e: impl std::fmt::Display) -> DotenvError {
        DotenvError::SaltFetch {
            url: self.url.clone(),
            message: e.to_string(),
        }
    }
}

impl Default for HttpSaltSource {
    fn default() -> Self {
        Self::new(DEFAULT_SALTS_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl SaltSource for HttpSaltSource {
    fn fetch(&self) -> Result<String> {
        debug!(url = %self.url, timeout = ?self.timeout, "fetching salts");

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("wp-dotenv/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| self.fetch_error(e))?;

        client
            .get(&self.url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| self.fetch_error(e))
    }
}
