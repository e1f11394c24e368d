//! Multi-architecture aggregation scenarios.

mod common;

use common::{docs_by_arch, names};
use umdiff_core::diff::diff_aggregate;
use umdiff_core::errors::{ExError, ExErrorKind, UmdiffError};

// S1: a change shared by all architectures lands in the common view
#[test]
fn test_common_and_specific_views() {
    let old = docs_by_arch(&[
        ("amd64", "libc6\t2.39-0ubuntu8\nshim-signed\t1.58\n"),
        ("arm64", "libc6\t2.39-0ubuntu8\nflash-kernel\t3.107\n"),
    ]);
    let new = docs_by_arch(&[
        ("amd64", "libc6\t2.39-0ubuntu8.3\nshim-signed\t1.59\n"),
        ("arm64", "libc6\t2.39-0ubuntu8.3\nflash-kernel\t3.107\n"),
    ]);

    let result = diff_aggregate(&old, &new).unwrap();

    assert_eq!(result.labels().collect::<Vec<_>>(), vec!["amd64", "arm64"]);
    assert_eq!(result.common.changed.len(), 1);
    assert_eq!(result.common.changed[0].name, "libc6");

    let amd64 = &result.architecture_specific["amd64"];
    assert_eq!(amd64.changed.len(), 1);
    assert_eq!(amd64.changed[0].name, "shim-signed");
    assert!(result.architecture_specific["arm64"].is_empty());

    assert_eq!(
        result.per_architecture["arm64"].architecture_label.as_deref(),
        Some("arm64")
    );
}

// S1b: arch-qualified names match across architectures by package name
#[test]
fn test_arch_qualified_names_share_common_view() {
    let old = docs_by_arch(&[
        ("amd64", "libc6:amd64\t2.39-0ubuntu8\nbash\t5.2\n"),
        ("arm64", "libc6:arm64\t2.39-0ubuntu8\nbash\t5.2\n"),
    ]);
    let new = docs_by_arch(&[
        ("amd64", "libc6:amd64\t2.39-0ubuntu8.3\nbash\t5.2\nlibgcc-s1:amd64\t14.2\n"),
        ("arm64", "libc6:arm64\t2.39-0ubuntu8.3\nbash\t5.2\nlibgcc-s1:arm64\t14.2\n"),
    ]);

    let result = diff_aggregate(&old, &new).unwrap();

    assert_eq!(result.common.changed.len(), 1);
    assert_eq!(result.common.changed[0].name, "libc6:amd64");
    assert_eq!(names(&result.common.added), vec!["libgcc-s1:amd64"]);
    assert!(result.architecture_specific["amd64"].is_empty());
    assert!(result.architecture_specific["arm64"].is_empty());

    // Per-architecture results keep their own qualified names.
    assert_eq!(
        result.per_architecture["arm64"].changed[0].name,
        "libc6:arm64"
    );
}

// A qualifier naming another architecture is not stripped
#[test]
fn test_foreign_qualifier_stays_specific() {
    let old = docs_by_arch(&[("amd64", ""), ("arm64", "")]);
    let new = docs_by_arch(&[
        ("amd64", "libc6:i386\t2.39\n"),
        ("arm64", "libc6:arm64\t2.39\n"),
    ]);

    let result = diff_aggregate(&old, &new).unwrap();
    assert!(result.common.is_empty());
    assert_eq!(names(&result.architecture_specific["amd64"].added), vec!["libc6:i386"]);
    assert_eq!(names(&result.architecture_specific["arm64"].added), vec!["libc6:arm64"]);
}

// S2: labels without counterpart are reported, sorted
#[test]
fn test_architecture_set_mismatch() {
    let old = docs_by_arch(&[("amd64", "a\t1\n"), ("arm64", "a\t1\n")]);
    let new = docs_by_arch(&[("amd64", "a\t1\n")]);

    let err = diff_aggregate(&old, &new).unwrap_err();
    assert_eq!(
        err,
        UmdiffError::ArchitectureSetMismatch {
            missing_labels: vec!["arm64".to_string()]
        }
    );

    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::ArchitectureSetMismatch);
    assert_eq!(ex.labels(), Some(&["arm64".to_string()][..]));
}

#[test]
fn test_mismatch_on_both_sides() {
    let old = docs_by_arch(&[("amd64", ""), ("s390x", "")]);
    let new = docs_by_arch(&[("amd64", ""), ("ppc64el", "")]);
    let err = diff_aggregate(&old, &new).unwrap_err();
    assert_eq!(
        err,
        UmdiffError::ArchitectureSetMismatch {
            missing_labels: vec!["ppc64el".to_string(), "s390x".to_string()]
        }
    );
}

#[test]
fn test_added_and_removed_split_by_version() {
    let old = docs_by_arch(&[("amd64", "gone\t1\n"), ("arm64", "gone\t1\n")]);
    let new = docs_by_arch(&[("amd64", "fresh\t2\n"), ("arm64", "fresh\t3\n")]);

    let result = diff_aggregate(&old, &new).unwrap();
    assert_eq!(names(&result.common.removed), vec!["gone"]);
    assert!(result.common.added.is_empty());
    assert_eq!(names(&result.architecture_specific["amd64"].added), vec!["fresh"]);
    assert_eq!(names(&result.architecture_specific["arm64"].added), vec!["fresh"]);
}

#[test]
fn test_no_changes_anywhere() {
    let old = docs_by_arch(&[("amd64", "a\t1\n"), ("arm64", "a\t1\n")]);
    let new = docs_by_arch(&[("amd64", "a\t1\n"), ("arm64", "a\t1\n")]);
    let result = diff_aggregate(&old, &new).unwrap();
    assert!(result.is_empty());
    assert!(result.common.is_empty());
    assert_eq!(result.architecture_specific.len(), 2);
}
