//! Manifest diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Per-architecture collections use `BTreeMap` so serialized output is
//! ordered by label.

use crate::model::PackageEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Schema version stamped on every [`DiffResult`].
pub const DIFF_SCHEMA_VERSION: u32 = 1;

/// Comparison of exactly two manifest documents.
///
/// Every package name of either document lands in exactly one of `added`,
/// `removed`, `changed`, or the `unchanged_count` tally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffResult {
    /// Schema version of this structure (always 1)
    pub diff_schema_version: u32,
    /// Provenance of both sides
    pub identity: DiffIdentity,
    /// Architecture/flavour this comparison belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture_label: Option<String>,
    pub classification: DiffClassification,
    /// Present only in new, in new's order
    pub added: Vec<PackageEntry>,
    /// Present only in old, in old's order
    pub removed: Vec<PackageEntry>,
    /// Present in both with differing versions, in new's order
    pub changed: Vec<VersionChange>,
    pub unchanged_count: usize,
}

impl DiffResult {
    /// True when nothing was added, removed or changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Number of distinct package names across both documents.
    pub fn total_compared(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len() + self.unchanged_count
    }

    /// The added/removed/changed lists without provenance.
    pub fn delta(&self) -> DiffDelta {
        DiffDelta {
            added: self.added.clone(),
            removed: self.removed.clone(),
            changed: self.changed.clone(),
        }
    }
}

/// Where each side of a diff came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffIdentity {
    pub old_origin: String,
    /// SHA-256 of the old manifest text
    pub old_content_digest: String,
    pub new_origin: String,
    /// SHA-256 of the new manifest text
    pub new_content_digest: String,
}

/// High-level classification of a diff.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiffClassification {
    /// Both manifests have byte-identical content
    Identical,
    /// Content differs (comments, ordering, whitespace) but no package changed
    NoPackageChange,
    /// At least one package was added, removed or changed
    Changed,
}

/// A package present on both sides with a different version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VersionChange {
    pub name: String,
    pub old_version: String,
    pub new_version: String,
    /// Debian ordering of new relative to old; informational only
    pub direction: ChangeDirection,
}

/// How a changed version moved under Debian version ordering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Upgrade,
    Downgrade,
    /// Textually different but equal under Debian rules (e.g. `1.0` vs `0:1.0`)
    Equivalent,
}

/// Added/removed/changed lists without provenance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiffDelta {
    pub added: Vec<PackageEntry>,
    pub removed: Vec<PackageEntry>,
    pub changed: Vec<VersionChange>,
}

impl DiffDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }
}

/// Result of comparing several architecture-specific manifest pairs at once.
///
/// `common` holds the changes seen identically (same name, same version or
/// old/new pair) in every architecture; `architecture_specific` holds what
/// remains for each label. Every label appears in both maps, with an empty
/// delta when it has no deviation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateDiffResult {
    pub per_architecture: BTreeMap<String, DiffResult>,
    pub common: DiffDelta,
    pub architecture_specific: BTreeMap<String, DiffDelta>,
}

impl AggregateDiffResult {
    /// True when no architecture shows any change.
    pub fn is_empty(&self) -> bool {
        self.per_architecture.values().all(DiffResult::is_empty)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.per_architecture.keys().map(String::as_str)
    }
}
