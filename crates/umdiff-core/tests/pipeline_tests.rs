//! End-to-end pipeline tests: local files and an in-memory transport.

mod common;

use common::{manifest_file, names};
use std::collections::{BTreeMap, HashMap};
use umdiff_core::errors::UmdiffError;
use umdiff_core::source::{FetchFailure, Resolver, Transport};
use umdiff_core::{compare_architectures, compare_references, load_manifest};
use url::Url;

#[derive(Default)]
struct MapTransport {
    bodies: HashMap<String, String>,
}

impl MapTransport {
    fn with(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }
}

impl Transport for MapTransport {
    fn get_text(&self, url: &Url) -> Result<String, FetchFailure> {
        self.bodies
            .get(url.as_str())
            .cloned()
            .ok_or(FetchFailure::Status(404))
    }
}

fn path_of(file: &tempfile::NamedTempFile) -> String {
    file.path().to_string_lossy().into_owned()
}

#[test]
fn test_compare_local_files() {
    let old = manifest_file("pkg-a\t1.0\npkg-b\t2.0\npkg-c\t3.0\n");
    let new = manifest_file("pkg-a\t1.0\npkg-b\t2.1\npkg-d\t4.0\n");
    let resolver = Resolver::with_transport(MapTransport::default());

    let result = compare_references(&resolver, &path_of(&old), &path_of(&new)).unwrap();

    assert_eq!(names(&result.added), vec!["pkg-d"]);
    assert_eq!(names(&result.removed), vec!["pkg-c"]);
    assert_eq!(result.changed[0].name, "pkg-b");
    assert_eq!(result.identity.old_origin, path_of(&old));
}

#[test]
fn test_compare_local_against_remote() {
    let old = manifest_file("a\t1.0\n");
    let resolver = Resolver::with_transport(
        MapTransport::default().with("https://example.com/new.manifest", "a\t1.1\n"),
    );

    let result =
        compare_references(&resolver, &path_of(&old), "https://example.com/new.manifest").unwrap();
    assert_eq!(result.changed.len(), 1);
}

#[test]
fn test_file_url_reads_local_file() {
    let file = manifest_file("a\t1.0\n");
    let url = Url::from_file_path(file.path()).unwrap();
    let resolver = Resolver::with_transport(MapTransport::default());

    let doc = load_manifest(&resolver, url.as_str(), None).unwrap();
    assert_eq!(doc.len(), 1);
}

#[test]
fn test_missing_remote_aborts_comparison() {
    let old = manifest_file("a\t1.0\n");
    let resolver = Resolver::with_transport(MapTransport::default());

    let err = compare_references(&resolver, &path_of(&old), "https://example.com/gone").unwrap_err();
    assert_eq!(
        err,
        UmdiffError::SourceUnavailable {
            reference: "https://example.com/gone".to_string(),
            cause: "HTTP status 404".to_string(),
        }
    );
}

#[test]
fn test_malformed_remote_propagates_origin() {
    let resolver = Resolver::with_transport(
        MapTransport::default()
            .with("https://example.com/old", "a\t1\n")
            .with("https://example.com/new", "a\t1\nbroken\n"),
    );
    let err =
        compare_references(&resolver, "https://example.com/old", "https://example.com/new").unwrap_err();
    assert!(matches!(
        err,
        UmdiffError::MalformedManifestLine { ref origin, line_number: 2, .. }
            if origin == "https://example.com/new"
    ));
}

#[test]
fn test_compare_architectures_from_files() {
    let amd64_old = manifest_file("libc6\t1\nshim\t1\n");
    let amd64_new = manifest_file("libc6\t2\nshim\t2\n");
    let arm64_old = manifest_file("libc6\t1\n");
    let arm64_new = manifest_file("libc6\t2\n");

    let old = BTreeMap::from([
        ("amd64".to_string(), path_of(&amd64_old)),
        ("arm64".to_string(), path_of(&arm64_old)),
    ]);
    let new = BTreeMap::from([
        ("amd64".to_string(), path_of(&amd64_new)),
        ("arm64".to_string(), path_of(&arm64_new)),
    ]);
    let resolver = Resolver::with_transport(MapTransport::default());

    let result = compare_architectures(&resolver, &old, &new).unwrap();
    assert_eq!(result.common.changed.len(), 1);
    assert_eq!(result.architecture_specific["amd64"].changed[0].name, "shim");
}
