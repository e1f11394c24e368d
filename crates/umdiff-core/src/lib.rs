//! umdiff core - Ubuntu image manifest comparison
//!
//! This crate provides:
//! - Manifest source resolution (local paths and HTTP(S) URLs)
//! - A tolerant line-oriented manifest parser
//! - Pairwise and multi-architecture diff engines
//! - Debian version ordering for change direction
//! - Structured logging and a stable error taxonomy

pub mod debversion;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod source;

// Referenced by the logging macros.
pub use umdiff_core_types;

// Re-export commonly used types
pub use diff::{diff, diff_aggregate, AggregateDiffResult, DiffResult};
pub use errors::{ExError, ExErrorKind, Result, UmdiffError};
pub use model::{ManifestDocument, PackageEntry, PackageKind};
pub use parser::parse;
pub use pipeline::{compare_architectures, compare_references, load_manifest};
pub use source::{HttpOptions, HttpTransport, Resolver, Transport};
