//! Manifest text parser.
//!
//! Turns raw manifest text into a [`ManifestDocument`]. One package per
//! line, fields separated by any run of whitespace, `#` comments. Any line
//! that matches none of the supported shapes fails the whole parse: a
//! truncated package list would otherwise show up as phantom removals.

use crate::errors::{Result, UmdiffError};
use crate::model::{ManifestDocument, PackageEntry};
use crate::{log_op_end, log_op_error, log_op_start};
use sha2::{Digest as _, Sha256};

const COMMENT_PREFIX: char = '#';
const SNAP_PREFIX: &str = "snap:";
const BOM: char = '\u{feff}';

type LineShape = fn(&[&str]) -> Option<PackageEntry>;

/// Deb line shapes, most specific first.
const DEB_LINE_SHAPES: &[LineShape] = &[arch_qualified_shape, with_source_shape, name_version_shape];

/// Parse raw manifest text.
///
/// `origin` is the reference the text was loaded from; it is kept on the
/// document and on every error.
///
/// # Errors
///
/// - `MalformedManifestLine` - a line matches no supported shape
/// - `DuplicatePackageEntry` - a name repeats with a different version
pub fn parse(raw_text: &str, origin: &str) -> Result<ManifestDocument> {
    log_op_start!("parse_manifest", origin = origin);
    let start = std::time::Instant::now();

    let result = parse_impl(raw_text, origin).map_err(|e| {
        log_op_error!(
            "parse_manifest",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            origin = origin
        );
        e
    })?;

    log_op_end!(
        "parse_manifest",
        duration_ms = start.elapsed().as_millis() as u64,
        origin = origin,
        entry_count = result.len() as u64
    );

    Ok(result)
}

fn parse_impl(raw_text: &str, origin: &str) -> Result<ManifestDocument> {
    let digest = hex::encode(Sha256::digest(raw_text.as_bytes()));
    let text = raw_text.strip_prefix(BOM).unwrap_or(raw_text);

    let mut doc = ManifestDocument::from_entries(origin, digest, std::iter::empty())?;
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }
        let entry = parse_line(trimmed).ok_or_else(|| UmdiffError::MalformedManifestLine {
            origin: origin.to_string(),
            line_number: idx + 1,
            raw_line: line.to_string(),
        })?;
        doc.push(entry)?;
    }
    Ok(doc)
}

/// Parse one non-blank, non-comment line; `None` when no shape matches.
pub fn parse_line(line: &str) -> Option<PackageEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let first = fields.first()?;
    if first.starts_with(SNAP_PREFIX) {
        return snap_shape(&fields);
    }
    DEB_LINE_SHAPES.iter().find_map(|shape| shape(&fields))
}

/// `snap:name channel revision`
fn snap_shape(fields: &[&str]) -> Option<PackageEntry> {
    match fields {
        [name, channel, revision] if name.len() > SNAP_PREFIX.len() => {
            Some(PackageEntry::snap(*name, *channel, *revision))
        }
        _ => None,
    }
}

/// `name:architecture version [source_package]`
fn arch_qualified_shape(fields: &[&str]) -> Option<PackageEntry> {
    let (name, version, source) = match fields {
        [name, version] => (*name, *version, None),
        [name, version, source] => (*name, *version, Some(*source)),
        _ => return None,
    };
    let (base, arch) = name.split_once(':')?;
    if base.is_empty() || arch.is_empty() || arch.contains(':') {
        return None;
    }
    let mut entry = PackageEntry::deb(name, version).with_architecture(arch);
    if let Some(source) = source {
        entry = entry.with_source_package(source);
    }
    Some(entry)
}

/// `name version source_package`
fn with_source_shape(fields: &[&str]) -> Option<PackageEntry> {
    match fields {
        [name, version, source] if !name.contains(':') => {
            Some(PackageEntry::deb(*name, *version).with_source_package(*source))
        }
        _ => None,
    }
}

/// `name version`
fn name_version_shape(fields: &[&str]) -> Option<PackageEntry> {
    match fields {
        [name, version] if !name.contains(':') => Some(PackageEntry::deb(*name, *version)),
        _ => None,
    }
}
