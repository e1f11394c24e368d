//! Manifest source resolution.
//!
//! Turns a manifest reference into raw text. References carrying a URL
//! scheme (`https://…`) are fetched through a [`Transport`]; everything else
//! (and `file://` URLs) is read from the local filesystem. Both paths fail
//! with the same `SourceUnavailable` error kind.
//!
//! No retry and no caching: every call re-reads.

pub mod file;
pub mod http;

use crate::errors::{Result, UmdiffError};
use crate::{log_op_end, log_op_error, log_op_start};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub use http::{HttpOptions, HttpTransport};

/// Why a remote fetch failed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchFailure {
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("response body is not valid UTF-8")]
    InvalidUtf8,
    #[error("{0}")]
    Other(String),
}

/// Remote retrieval seam; the production implementation is [`HttpTransport`].
pub trait Transport {
    /// Perform a single GET and return the body as text.
    ///
    /// # Errors
    ///
    /// Any non-success status, timeout, connection or decoding failure.
    fn get_text(&self, url: &Url) -> std::result::Result<String, FetchFailure>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get_text(&self, url: &Url) -> std::result::Result<String, FetchFailure> {
        (**self).get_text(url)
    }
}

/// A manifest reference classified by its syntactic form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestReference {
    Local(PathBuf),
    Remote(Url),
}

impl ManifestReference {
    /// Classify a reference string.
    ///
    /// # Errors
    ///
    /// - `SourceUnavailable` - the reference has a scheme but is not a valid
    ///   URL, or its scheme is neither `http`, `https` nor `file`
    pub fn classify(reference: &str) -> Result<Self> {
        if !has_scheme_prefix(reference) {
            return Ok(ManifestReference::Local(PathBuf::from(reference)));
        }
        let url = Url::parse(reference)
            .map_err(|e| UmdiffError::source_unavailable(reference, format!("invalid URL: {}", e)))?;
        match url.scheme() {
            "http" | "https" => Ok(ManifestReference::Remote(url)),
            "file" => url
                .to_file_path()
                .map(ManifestReference::Local)
                .map_err(|()| UmdiffError::source_unavailable(reference, "invalid file URL")),
            other => Err(UmdiffError::source_unavailable(
                reference,
                format!("unsupported URL scheme: {}", other),
            )),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ManifestReference::Remote(_))
    }
}

/// `scheme://` where scheme is a letter followed by letters, digits, `+`, `-` or `.`
fn has_scheme_prefix(reference: &str) -> bool {
    let Some((scheme, _)) = reference.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Stateless resolver over an injected transport.
#[derive(Debug, Clone)]
pub struct Resolver<T = HttpTransport> {
    transport: T,
}

impl Resolver<HttpTransport> {
    /// Resolver backed by a blocking HTTP client.
    ///
    /// # Errors
    ///
    /// - `Config` - the HTTP client could not be built from `options`
    pub fn http(options: HttpOptions) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(options)?))
    }
}

impl<T: Transport> Resolver<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve a reference to its raw text.
    ///
    /// # Errors
    ///
    /// - `SourceUnavailable` - unreadable path, failed fetch, non-UTF-8 content
    pub fn resolve(&self, reference: &str) -> Result<String> {
        log_op_start!("resolve_manifest", reference = reference);
        let start = std::time::Instant::now();

        let result = self.resolve_impl(reference).map_err(|e| {
            log_op_error!(
                "resolve_manifest",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                reference = reference
            );
            e
        })?;

        log_op_end!(
            "resolve_manifest",
            duration_ms = start.elapsed().as_millis() as u64,
            reference = reference,
            bytes = result.len() as u64
        );

        Ok(result)
    }

    fn resolve_impl(&self, reference: &str) -> Result<String> {
        match ManifestReference::classify(reference)? {
            ManifestReference::Local(path) => file::read_local(&path)
                .map_err(|e| UmdiffError::source_unavailable(reference, e)),
            ManifestReference::Remote(url) => self
                .transport
                .get_text(&url)
                .map_err(|e| UmdiffError::source_unavailable(reference, e)),
        }
    }
}
