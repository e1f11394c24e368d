//! Logging initialization module

use std::sync::Once;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(format!("unknown log profile: {}", other)),
        }
    }
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset or invalid
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "umdiff=debug",
            Profile::Production => "umdiff=info",
            Profile::Test => "off",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`, writing to stderr.
///
/// Only the first call has an effect. If another global subscriber is
/// already installed (e.g. by `init_test_capture()`), it is left in place.
///
/// # Profiles
///
/// - **Development**: human-readable lines
/// - **Production**: one JSON object per event
/// - **Test**: nothing is written; use `init_test_capture()` to collect events
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(profile.filter())
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(profile.filter())
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init().map_err(Into::into),
        };
        if installed.is_err() {
            tracing::debug!("global subscriber already installed; keeping it");
        }
    });
}
