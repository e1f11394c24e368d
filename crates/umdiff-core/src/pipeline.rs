//! Reference-to-report pipeline.
//!
//! Composes resolver, parser and diff engine: resolve each reference, parse
//! it, then compare. Any failure aborts the whole comparison with the first
//! error; no partial result is produced.

use crate::diff::aggregate::check_label_sets;
use crate::diff::{diff, diff_aggregate, AggregateDiffResult, DiffResult};
use crate::errors::Result;
use crate::model::ManifestDocument;
use crate::parser::parse;
use crate::source::{Resolver, Transport};
use std::collections::BTreeMap;

/// Resolve and parse one reference, tagging it with `label` if given.
///
/// # Errors
///
/// - `SourceUnavailable` from resolution
/// - `MalformedManifestLine` / `DuplicatePackageEntry` from parsing
pub fn load_manifest<T: Transport>(
    resolver: &Resolver<T>,
    reference: &str,
    label: Option<&str>,
) -> Result<ManifestDocument> {
    let raw = resolver.resolve(reference)?;
    let doc = parse(&raw, reference)?;
    Ok(match label {
        Some(label) => doc.with_architecture_label(label),
        None => doc,
    })
}

/// Load two references and diff them.
///
/// # Errors
///
/// Any resolution or parse error of either side; `old` is loaded first.
pub fn compare_references<T: Transport>(
    resolver: &Resolver<T>,
    old_reference: &str,
    new_reference: &str,
) -> Result<DiffResult> {
    let old = load_manifest(resolver, old_reference, None)?;
    let new = load_manifest(resolver, new_reference, None)?;
    Ok(diff(&old, &new))
}

/// Load label-keyed reference sets and aggregate their diffs.
///
/// Label sets are checked before anything is fetched.
///
/// # Errors
///
/// - `ArchitectureSetMismatch` when the label sets differ or are empty
/// - any resolution or parse error, in ascending label order, old before new
pub fn compare_architectures<T: Transport>(
    resolver: &Resolver<T>,
    old_references: &BTreeMap<String, String>,
    new_references: &BTreeMap<String, String>,
) -> Result<AggregateDiffResult> {
    check_label_sets(old_references.keys(), new_references.keys())?;

    let mut old_docs = BTreeMap::new();
    let mut new_docs = BTreeMap::new();
    for (label, old_reference) in old_references {
        let Some(new_reference) = new_references.get(label) else {
            continue;
        };
        old_docs.insert(
            label.clone(),
            load_manifest(resolver, old_reference, Some(label))?,
        );
        new_docs.insert(
            label.clone(),
            load_manifest(resolver, new_reference, Some(label))?,
        );
    }

    diff_aggregate(&old_docs, &new_docs)
}
