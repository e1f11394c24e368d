//! Parsed manifest model.
//!
//! A [`ManifestDocument`] is built once per fetch+parse and never mutated
//! afterwards; the diff engine only borrows it.

use crate::errors::{Result, UmdiffError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What kind of artefact a manifest line describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// A Debian binary package
    Deb,
    /// A snap seeded into the image (`snap:<name> <channel> <revision>`)
    Snap,
}

/// One line of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    /// Package identifier, including any `:architecture` qualifier
    pub name: String,
    /// Opaque version token (snap revision for snap entries)
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_package: Option<String>,
    /// Qualifier split out of `name`, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    pub kind: PackageKind,
    /// Tracked channel (snap entries only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl PackageEntry {
    /// A Debian package entry with no source or architecture information.
    pub fn deb(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            source_package: None,
            architecture: None,
            kind: PackageKind::Deb,
            channel: None,
        }
    }

    /// A snap entry; `name` is stored with its `snap:` prefix.
    pub fn snap(
        name: impl Into<String>,
        channel: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: revision.into(),
            source_package: None,
            architecture: None,
            kind: PackageKind::Snap,
            channel: Some(channel.into()),
        }
    }

    pub fn with_source_package(mut self, source: impl Into<String>) -> Self {
        self.source_package = Some(source.into());
        self
    }

    pub fn with_architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = Some(architecture.into());
        self
    }

    /// Version with surrounding whitespace removed, the form used for equality.
    pub fn normalized_version(&self) -> &str {
        self.version.trim()
    }
}

/// The parsed result of one manifest reference.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestDocument {
    origin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    architecture_label: Option<String>,
    /// SHA-256 of the raw text the document was parsed from
    content_digest: String,
    entries: Vec<PackageEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ManifestDocument {
    /// Build a document from entries in manifest order.
    ///
    /// Duplicate names with identical versions collapse into the first
    /// occurrence; differing versions are rejected.
    ///
    /// # Errors
    ///
    /// - `DuplicatePackageEntry` when a name repeats with a different version
    pub fn from_entries(
        origin: impl Into<String>,
        content_digest: impl Into<String>,
        entries: impl IntoIterator<Item = PackageEntry>,
    ) -> Result<Self> {
        let mut doc = Self {
            origin: origin.into(),
            architecture_label: None,
            content_digest: content_digest.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        };
        for entry in entries {
            doc.push(entry)?;
        }
        Ok(doc)
    }

    pub(crate) fn push(&mut self, entry: PackageEntry) -> Result<()> {
        if let Some(&pos) = self.index.get(&entry.name) {
            let existing = &self.entries[pos];
            if existing.normalized_version() == entry.normalized_version() {
                return Ok(());
            }
            return Err(UmdiffError::DuplicatePackageEntry {
                origin: self.origin.clone(),
                name: entry.name,
                first_version: existing.version.clone(),
                second_version: entry.version,
            });
        }
        self.index.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Tag this document as one architecture variant of an aggregate comparison.
    pub fn with_architecture_label(mut self, label: impl Into<String>) -> Self {
        self.architecture_label = Some(label.into());
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn architecture_label(&self) -> Option<&str> {
        self.architecture_label.as_deref()
    }

    pub fn content_digest(&self) -> &str {
        &self.content_digest
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[PackageEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&PackageEntry> {
        self.index.get(name).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
