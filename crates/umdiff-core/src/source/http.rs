use std::time::Duration;

use url::Url;

use super::{FetchFailure, Transport};
use crate::errors::{Result, UmdiffError};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    /// Upper bound on the whole request, connect through body
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("umdiff/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Blocking HTTP(S) transport: one GET per call, no retry.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    options: HttpOptions,
}

impl HttpTransport {
    /// # Errors
    ///
    /// - `Config` - the TLS backend or user agent is rejected by the client builder
    pub fn new(options: HttpOptions) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .connect_timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()
            .map_err(|e| UmdiffError::Config {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client, options })
    }

    pub fn options(&self) -> &HttpOptions {
        &self.options
    }

    fn classify(&self, err: reqwest::Error) -> FetchFailure {
        if err.is_timeout() {
            FetchFailure::Timeout(self.options.timeout)
        } else if let Some(status) = err.status() {
            FetchFailure::Status(status.as_u16())
        } else if err.is_connect() {
            FetchFailure::Connect(err.to_string())
        } else {
            FetchFailure::Other(err.to_string())
        }
    }
}

impl Transport for HttpTransport {
    fn get_text(&self, url: &Url) -> std::result::Result<String, FetchFailure> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .and_then(|res| res.error_for_status())
            .map_err(|e| self.classify(e))?;
        let body = response.bytes().map_err(|e| self.classify(e))?;
        String::from_utf8(body.to_vec()).map_err(|_| FetchFailure::InvalidUtf8)
    }
}
