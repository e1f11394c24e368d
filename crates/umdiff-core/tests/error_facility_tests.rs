use umdiff_core::errors::{ExError, ExErrorKind, UmdiffError};

#[test]
fn test_source_unavailable_structured_fields() {
    let err = UmdiffError::SourceUnavailable {
        reference: "https://example.com/x.manifest".to_string(),
        cause: "HTTP status 404".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::SourceUnavailable);
    assert_eq!(ex_err.code(), "ERR_SOURCE_UNAVAILABLE");
    assert_eq!(ex_err.origin(), Some("https://example.com/x.manifest"));
    assert_eq!(ex_err.message(), "HTTP status 404");
}

#[test]
fn test_duplicate_entry_names_package() {
    let err = UmdiffError::DuplicatePackageEntry {
        origin: "m".to_string(),
        name: "libc6".to_string(),
        first_version: "1".to_string(),
        second_version: "2".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::DuplicatePackageEntry);
    assert_eq!(ex_err.package(), Some("libc6"));
    assert_eq!(ex_err.origin(), Some("m"));
}

#[test]
fn test_error_kind_code_mapping() {
    // Each kind has a stable, unique code
    let kinds = vec![
        (ExErrorKind::SourceUnavailable, "ERR_SOURCE_UNAVAILABLE"),
        (ExErrorKind::MalformedManifestLine, "ERR_MALFORMED_MANIFEST_LINE"),
        (ExErrorKind::DuplicatePackageEntry, "ERR_DUPLICATE_PACKAGE_ENTRY"),
        (ExErrorKind::ArchitectureSetMismatch, "ERR_ARCHITECTURE_SET_MISMATCH"),
        (ExErrorKind::Config, "ERR_CONFIG"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_domain_error_kind_matches_conversion() {
    let errors = vec![
        UmdiffError::MalformedManifestLine {
            origin: "m".to_string(),
            line_number: 3,
            raw_line: "x".to_string(),
        },
        UmdiffError::ArchitectureSetMismatch {
            missing_labels: vec![],
        },
        UmdiffError::Config {
            message: "bad timeout".to_string(),
        },
    ];

    for err in errors {
        let kind = err.kind();
        let ex_err: ExError = err.into();
        assert_eq!(ex_err.kind(), kind);
    }
}

#[test]
fn test_display_format() {
    let ex_err: ExError = UmdiffError::MalformedManifestLine {
        origin: "old.manifest".to_string(),
        line_number: 7,
        raw_line: "garbage".to_string(),
    }
    .into();

    let display = ex_err.to_string();
    assert!(display.starts_with("[ERR_MALFORMED_MANIFEST_LINE] in operation 'parse_manifest'"));
    assert!(display.contains("(origin: old.manifest)"));
    assert!(display.contains("(line: 7)"));
}
