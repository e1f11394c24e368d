//! Manifest diff engine.
//!
//! Compares parsed manifest documents and produces structured, deterministic
//! results suitable for JSON output and human review.
//!
//! ## Entry points
//!
//! ```ignore
//! use umdiff_core::diff::{diff, diff_aggregate, render_diff_summary};
//!
//! let result = diff(&old_doc, &new_doc);
//! let summary = render_diff_summary(&result);
//! ```
//!
//! ## Guarantees
//!
//! - **Partition**: each package name of either side is exactly one of added,
//!   removed, changed or unchanged.
//! - **Determinism**: identical inputs produce identical output, in document order.
//! - **Purity**: the pairwise diff performs no I/O and never fails.

pub mod aggregate;
pub mod engine;
pub mod human_summary;
pub mod model;

pub use aggregate::diff_aggregate;
pub use engine::diff;
pub use human_summary::{render_aggregate_summary, render_diff_summary};
pub use model::{
    AggregateDiffResult, ChangeDirection, DiffClassification, DiffDelta, DiffResult,
    VersionChange,
};
