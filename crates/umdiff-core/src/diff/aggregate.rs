//! Multi-architecture diff aggregation.
//!
//! Ubuntu image builds ship one manifest per architecture. Aggregation diffs
//! each pair, then splits the result into the delta common to every
//! architecture and the per-architecture deviations.

use crate::diff::engine::diff;
use crate::diff::model::{AggregateDiffResult, DiffDelta, DiffResult, VersionChange};
use crate::errors::{Result, UmdiffError};
use crate::model::{ManifestDocument, PackageEntry};
use crate::{log_op_end, log_op_error, log_op_start};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Labels present on only one side, ascending. Empty when the sets match.
pub fn mismatched_labels<'a, A, B>(old_labels: A, new_labels: B) -> Vec<String>
where
    A: IntoIterator<Item = &'a String>,
    B: IntoIterator<Item = &'a String>,
{
    let old: BTreeSet<&str> = old_labels.into_iter().map(String::as_str).collect();
    let new: BTreeSet<&str> = new_labels.into_iter().map(String::as_str).collect();
    // BTreeSet iteration is ordered, so the difference comes out sorted.
    old.symmetric_difference(&new)
        .map(|label| label.to_string())
        .collect()
}

/// Validate that both sides carry the same non-empty label set.
///
/// # Errors
///
/// - `ArchitectureSetMismatch` - a label lacks a counterpart, or no labels at all
pub fn check_label_sets<'a, A, B>(old_labels: A, new_labels: B) -> Result<()>
where
    A: IntoIterator<Item = &'a String> + Clone,
    B: IntoIterator<Item = &'a String>,
{
    let missing_labels = mismatched_labels(old_labels.clone(), new_labels);
    if !missing_labels.is_empty() || old_labels.into_iter().next().is_none() {
        return Err(UmdiffError::ArchitectureSetMismatch { missing_labels });
    }
    Ok(())
}

/// Diff each architecture pair and derive the common and specific views.
///
/// # Errors
///
/// - `ArchitectureSetMismatch` - the two maps do not have identical key sets
pub fn diff_aggregate(
    old_by_arch: &BTreeMap<String, ManifestDocument>,
    new_by_arch: &BTreeMap<String, ManifestDocument>,
) -> Result<AggregateDiffResult> {
    log_op_start!("diff_aggregate", arch_count = old_by_arch.len() as u64);
    let start = std::time::Instant::now();

    let result = diff_aggregate_impl(old_by_arch, new_by_arch).map_err(|e| {
        log_op_error!(
            "diff_aggregate",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "diff_aggregate",
        duration_ms = start.elapsed().as_millis() as u64,
        arch_count = result.per_architecture.len() as u64,
        common_count = result.common.len() as u64
    );

    Ok(result)
}

fn diff_aggregate_impl(
    old_by_arch: &BTreeMap<String, ManifestDocument>,
    new_by_arch: &BTreeMap<String, ManifestDocument>,
) -> Result<AggregateDiffResult> {
    check_label_sets(old_by_arch.keys(), new_by_arch.keys())?;

    let mut per_architecture = BTreeMap::new();
    for (label, old) in old_by_arch {
        // Label sets were checked above.
        let Some(new) = new_by_arch.get(label) else {
            continue;
        };
        let mut result = diff(old, new);
        result.architecture_label = Some(label.clone());
        per_architecture.insert(label.clone(), result);
    }

    let common = common_delta(&per_architecture);
    let common_label = per_architecture.keys().next().cloned().unwrap_or_default();
    let architecture_specific = per_architecture
        .iter()
        .map(|(label, result)| {
            let remainder = specific_delta(label, result, &common_label, &common);
            (label.clone(), remainder)
        })
        .collect();

    Ok(AggregateDiffResult {
        per_architecture,
        common,
        architecture_specific,
    })
}

type EntryKey<'a> = (&'a str, &'a str);
type ChangeKey<'a> = (&'a str, &'a str, &'a str);

/// `libc6:amd64` under label `amd64` matches as `libc6`.
fn unqualified<'a>(name: &'a str, label: &str) -> &'a str {
    name.strip_suffix(label)
        .and_then(|base| base.strip_suffix(':'))
        .filter(|base| !base.is_empty())
        .unwrap_or(name)
}

fn entry_key<'a>(entry: &'a PackageEntry, label: &str) -> EntryKey<'a> {
    (unqualified(&entry.name, label), entry.normalized_version())
}

fn change_key<'a>(change: &'a VersionChange, label: &str) -> ChangeKey<'a> {
    (
        unqualified(&change.name, label),
        change.old_version.as_str(),
        change.new_version.as_str(),
    )
}

/// Entries reported identically by every architecture, in the first
/// architecture's order. Names keep the first architecture's qualifier.
fn common_delta(per_architecture: &BTreeMap<String, DiffResult>) -> DiffDelta {
    let mut results = per_architecture.iter();
    let Some((first_label, first)) = results.next() else {
        return DiffDelta::default();
    };
    let rest: Vec<(&String, &DiffResult)> = results.collect();

    let added_sets: Vec<HashSet<EntryKey<'_>>> = rest
        .iter()
        .map(|(label, r)| r.added.iter().map(|e| entry_key(e, label)).collect())
        .collect();
    let removed_sets: Vec<HashSet<EntryKey<'_>>> = rest
        .iter()
        .map(|(label, r)| r.removed.iter().map(|e| entry_key(e, label)).collect())
        .collect();
    let changed_sets: Vec<HashSet<ChangeKey<'_>>> = rest
        .iter()
        .map(|(label, r)| r.changed.iter().map(|c| change_key(c, label)).collect())
        .collect();

    DiffDelta {
        added: first
            .added
            .iter()
            .filter(|e| {
                let key = entry_key(e, first_label);
                added_sets.iter().all(|set| set.contains(&key))
            })
            .cloned()
            .collect(),
        removed: first
            .removed
            .iter()
            .filter(|e| {
                let key = entry_key(e, first_label);
                removed_sets.iter().all(|set| set.contains(&key))
            })
            .cloned()
            .collect(),
        changed: first
            .changed
            .iter()
            .filter(|c| {
                let key = change_key(c, first_label);
                changed_sets.iter().all(|set| set.contains(&key))
            })
            .cloned()
            .collect(),
    }
}

fn specific_delta(
    label: &str,
    result: &DiffResult,
    common_label: &str,
    common: &DiffDelta,
) -> DiffDelta {
    let common_added: HashSet<EntryKey<'_>> = common
        .added
        .iter()
        .map(|e| entry_key(e, common_label))
        .collect();
    let common_removed: HashSet<EntryKey<'_>> = common
        .removed
        .iter()
        .map(|e| entry_key(e, common_label))
        .collect();
    let common_changed: HashSet<ChangeKey<'_>> = common
        .changed
        .iter()
        .map(|c| change_key(c, common_label))
        .collect();

    DiffDelta {
        added: result
            .added
            .iter()
            .filter(|e| !common_added.contains(&entry_key(e, label)))
            .cloned()
            .collect(),
        removed: result
            .removed
            .iter()
            .filter(|e| !common_removed.contains(&entry_key(e, label)))
            .cloned()
            .collect(),
        changed: result
            .changed
            .iter()
            .filter(|c| !common_changed.contains(&change_key(c, label)))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn docs(pairs: &[(&str, &str)]) -> BTreeMap<String, ManifestDocument> {
        pairs
            .iter()
            .map(|(label, text)| {
                let doc = parse(text, &format!("{}.manifest", label))
                    .unwrap()
                    .with_architecture_label(*label);
                (label.to_string(), doc)
            })
            .collect()
    }

    #[test]
    fn test_mismatched_labels_is_symmetric_and_sorted() {
        let old: Vec<String> = vec!["s390x".into(), "amd64".into(), "arm64".into()];
        let new: Vec<String> = vec!["amd64".into(), "riscv64".into()];
        assert_eq!(
            mismatched_labels(&old, &new),
            vec!["arm64".to_string(), "riscv64".to_string(), "s390x".to_string()]
        );
    }

    #[test]
    fn test_empty_label_sets_rejected() {
        let err = diff_aggregate(&BTreeMap::new(), &BTreeMap::new()).unwrap_err();
        assert_eq!(
            err,
            UmdiffError::ArchitectureSetMismatch {
                missing_labels: vec![]
            }
        );
    }

    #[test]
    fn test_single_architecture_everything_is_common() {
        let old = docs(&[("amd64", "a\t1.0\nb\t1.0\n")]);
        let new = docs(&[("amd64", "a\t1.1\nc\t1.0\n")]);
        let result = diff_aggregate(&old, &new).unwrap();
        assert_eq!(result.common.len(), 3);
        assert!(result.architecture_specific["amd64"].is_empty());
    }

    #[test]
    fn test_change_with_different_versions_per_arch_is_not_common() {
        let old = docs(&[("amd64", "a\t1.0\n"), ("arm64", "a\t1.0\n")]);
        let new = docs(&[("amd64", "a\t1.1\n"), ("arm64", "a\t1.2\n")]);
        let result = diff_aggregate(&old, &new).unwrap();
        assert!(result.common.is_empty());
        assert_eq!(result.architecture_specific["amd64"].changed[0].new_version, "1.1");
        assert_eq!(result.architecture_specific["arm64"].changed[0].new_version, "1.2");
    }

    #[test]
    fn test_unqualified_strips_only_own_label() {
        assert_eq!(unqualified("libc6:amd64", "amd64"), "libc6");
        assert_eq!(unqualified("libc6:arm64", "amd64"), "libc6:arm64");
        assert_eq!(unqualified("libamd64", "amd64"), "libamd64");
        assert_eq!(unqualified("bash", "amd64"), "bash");
    }
}
