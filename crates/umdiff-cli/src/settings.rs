//! Layered configuration for the `umdiff` binary.
//!
//! Sources, lowest precedence first: built-in defaults, `umdiff.toml` in the
//! working directory (or the file given with `--config`), then `UMDIFF_*`
//! environment variables. Command-line flags override all of these.

use crate::commands::OutputFormat;
use clap::ValueEnum;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use umdiff_core::errors::UmdiffError;
use umdiff_core::logging_facility::Profile;
use umdiff_core::source::http::DEFAULT_TIMEOUT;
use umdiff_core::HttpOptions;

/// The config file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "umdiff.toml";

/// Prefix for environment overrides, e.g. `UMDIFF_FETCH_TIMEOUT_SECS`.
pub const ENV_PREFIX: &str = "UMDIFF";

#[derive(Debug, Clone, Deserialize)]
pub struct UmdiffConfig {
    /// Upper bound on each remote fetch
    pub fetch_timeout_secs: u64,
    /// User-Agent for remote fetches; `umdiff/<version>` when unset
    #[serde(default)]
    pub user_agent: Option<String>,
    pub log_profile: String,
    /// Default report format: `text` or `json`
    pub format: String,
}

impl UmdiffConfig {
    /// Load defaults, then the config file, then the environment.
    ///
    /// # Errors
    ///
    /// - `Config` - unreadable or invalid file, or a value of the wrong type
    pub fn load(path: Option<&Path>) -> Result<Self, UmdiffError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::new(CONFIG_FILE_NAME, FileFormat::Toml).required(false),
        };

        let settings = Config::builder()
            .set_default("fetch_timeout_secs", DEFAULT_TIMEOUT.as_secs())
            .and_then(|b| b.set_default("log_profile", "development"))
            .and_then(|b| b.set_default("format", "text"))
            .map_err(config_error)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(config_error)?;

        let config: Self = settings.try_deserialize().map_err(config_error)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), UmdiffError> {
        if self.fetch_timeout_secs == 0 {
            return Err(UmdiffError::Config {
                message: "fetch_timeout_secs must be greater than zero".to_string(),
            });
        }
        self.log_profile()?;
        self.output_format()?;
        Ok(())
    }

    /// # Errors
    ///
    /// - `Config` - not a known profile name
    pub fn log_profile(&self) -> Result<Profile, UmdiffError> {
        self.log_profile
            .parse()
            .map_err(|message| UmdiffError::Config { message })
    }

    /// # Errors
    ///
    /// - `Config` - neither `text` nor `json`
    pub fn output_format(&self) -> Result<OutputFormat, UmdiffError> {
        OutputFormat::from_str(&self.format, true).map_err(|_| UmdiffError::Config {
            message: format!("unknown output format: {}", self.format),
        })
    }

    /// HTTP options, with `timeout_override` taking precedence when given.
    pub fn http_options(&self, timeout_override: Option<u64>) -> HttpOptions {
        let defaults = HttpOptions::default();
        HttpOptions {
            timeout: Duration::from_secs(timeout_override.unwrap_or(self.fetch_timeout_secs)),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }
}

fn config_error(err: config::ConfigError) -> UmdiffError {
    UmdiffError::Config {
        message: err.to_string(),
    }
}
