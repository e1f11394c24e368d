//! Pairwise manifest diff.
//!
//! The core entry point is [`diff`], a pure set/equality comparator over two
//! parsed documents. Versions are equal when their trimmed strings are equal;
//! Debian ordering only labels the direction of a change.

use crate::debversion::compare_versions;
use crate::diff::model::{
    ChangeDirection, DiffClassification, DiffIdentity, DiffResult, VersionChange,
    DIFF_SCHEMA_VERSION,
};
use crate::model::ManifestDocument;
use std::cmp::Ordering;

/// Compare `old` against `new`.
///
/// Output ordering is deterministic: `added` and `changed` follow `new`'s
/// entry order, `removed` follows `old`'s.
pub fn diff(old: &ManifestDocument, new: &ManifestDocument) -> DiffResult {
    let mut added = Vec::new();
    let mut changed = Vec::new();
    let mut unchanged_count = 0usize;

    for entry in new.entries() {
        match old.get(&entry.name) {
            None => added.push(entry.clone()),
            Some(previous) if previous.normalized_version() == entry.normalized_version() => {
                unchanged_count += 1;
            }
            Some(previous) => changed.push(VersionChange {
                name: entry.name.clone(),
                old_version: previous.normalized_version().to_string(),
                new_version: entry.normalized_version().to_string(),
                direction: direction(previous.normalized_version(), entry.normalized_version()),
            }),
        }
    }

    let removed = old
        .entries()
        .iter()
        .filter(|entry| !new.contains(&entry.name))
        .cloned()
        .collect::<Vec<_>>();

    let identity = DiffIdentity {
        old_origin: old.origin().to_string(),
        old_content_digest: old.content_digest().to_string(),
        new_origin: new.origin().to_string(),
        new_content_digest: new.content_digest().to_string(),
    };

    let classification = if added.is_empty() && removed.is_empty() && changed.is_empty() {
        if !identity.old_content_digest.is_empty()
            && identity.old_content_digest == identity.new_content_digest
        {
            DiffClassification::Identical
        } else {
            DiffClassification::NoPackageChange
        }
    } else {
        DiffClassification::Changed
    };

    DiffResult {
        diff_schema_version: DIFF_SCHEMA_VERSION,
        identity,
        architecture_label: new
            .architecture_label()
            .or(old.architecture_label())
            .map(str::to_string),
        classification,
        added,
        removed,
        changed,
        unchanged_count,
    }
}

fn direction(old: &str, new: &str) -> ChangeDirection {
    match compare_versions(old, new) {
        Ordering::Less => ChangeDirection::Upgrade,
        Ordering::Greater => ChangeDirection::Downgrade,
        Ordering::Equal => ChangeDirection::Equivalent,
    }
}
