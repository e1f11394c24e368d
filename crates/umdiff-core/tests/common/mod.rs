use std::collections::BTreeMap;
use std::io::Write;
use tempfile::NamedTempFile;
use umdiff_core::{parse, ManifestDocument};

/// Parse manifest text for tests; panics on parse failure.
#[allow(dead_code)]
pub fn doc(text: &str, origin: &str) -> ManifestDocument {
    parse(text, origin).unwrap()
}

/// Build a label-keyed document map from `(label, text)` pairs.
#[allow(dead_code)]
pub fn docs_by_arch(pairs: &[(&str, &str)]) -> BTreeMap<String, ManifestDocument> {
    pairs
        .iter()
        .map(|(label, text)| {
            (
                label.to_string(),
                doc(text, &format!("{label}.manifest")).with_architecture_label(*label),
            )
        })
        .collect()
}

/// Write manifest text to a temporary file that lives as long as the handle.
#[allow(dead_code)]
pub fn manifest_file(text: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("umdiff-")
        .suffix(".manifest")
        .tempfile()
        .unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[allow(dead_code)]
pub fn names(entries: &[umdiff_core::PackageEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}
