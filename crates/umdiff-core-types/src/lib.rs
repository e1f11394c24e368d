//! Core types shared across umdiff facilities
//!
//! - **Correlation types**: RunId, tagging every log event of one invocation
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::RunId;
