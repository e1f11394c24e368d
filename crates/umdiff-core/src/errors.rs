use thiserror::Error;

/// Result type alias using UmdiffError
pub type Result<T> = std::result::Result<T, UmdiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (and the CLI's exit
/// path) can branch on without inspecting message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Acquisition
    /// The manifest reference could not be read or fetched
    SourceUnavailable,

    // Parsing
    /// A manifest line matched none of the supported line shapes
    MalformedManifestLine,
    /// A package name appears twice in one manifest with differing versions
    DuplicatePackageEntry,

    // Comparison
    /// Old and new sides of an aggregate comparison carry different architecture labels
    ArchitectureSetMismatch,

    // Configuration
    Config,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::SourceUnavailable => "ERR_SOURCE_UNAVAILABLE",
            ExErrorKind::MalformedManifestLine => "ERR_MALFORMED_MANIFEST_LINE",
            ExErrorKind::DuplicatePackageEntry => "ERR_DUPLICATE_PACKAGE_ENTRY",
            ExErrorKind::ArchitectureSetMismatch => "ERR_ARCHITECTURE_SET_MISMATCH",
            ExErrorKind::Config => "ERR_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus the manifest context
/// (origin, line, package, labels) needed to render a precise diagnostic.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    origin: Option<String>,
    line_number: Option<usize>,
    package: Option<String>,
    labels: Option<Vec<String>>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            origin: None,
            line_number: None,
            package: None,
            labels: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the manifest reference or origin the error relates to
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Add 1-based line number context
    pub fn with_line_number(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }

    /// Add package name context
    pub fn with_package(mut self, name: impl Into<String>) -> Self {
        self.package = Some(name.into());
        self
    }

    /// Add architecture label context
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the origin context, if any
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Get the line number context, if any
    pub fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    /// Get the package name context, if any
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Get architecture labels, if any (populated on ArchitectureSetMismatch)
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(origin) = &self.origin {
            write!(f, " (origin: {})", origin)?;
        }
        if let Some(line_number) = self.line_number {
            write!(f, " (line: {})", line_number)?;
        }
        if let Some(package) = &self.package {
            write!(f, " (package: {})", package)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Every failure the manifest engine can report
///
/// All failures are fail-fast: no partial manifest or partial diff is ever
/// returned alongside one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UmdiffError {
    /// Reference could not be read (local) or fetched (remote)
    #[error("Manifest source unavailable: {reference}: {cause}")]
    SourceUnavailable { reference: String, cause: String },

    /// A line matched none of the supported manifest line shapes
    #[error("Malformed manifest line {line_number} in {origin}: {raw_line:?}")]
    MalformedManifestLine {
        origin: String,
        line_number: usize,
        raw_line: String,
    },

    /// Same package listed twice with different versions
    #[error("Duplicate package entry {name} in {origin}: {first_version} vs {second_version}")]
    DuplicatePackageEntry {
        origin: String,
        name: String,
        first_version: String,
        second_version: String,
    },

    /// Architecture labels present on only one side of an aggregate comparison
    #[error("Architecture set mismatch: labels without a counterpart: {missing_labels:?}")]
    ArchitectureSetMismatch { missing_labels: Vec<String> },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl UmdiffError {
    /// Stable kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            UmdiffError::SourceUnavailable { .. } => ExErrorKind::SourceUnavailable,
            UmdiffError::MalformedManifestLine { .. } => ExErrorKind::MalformedManifestLine,
            UmdiffError::DuplicatePackageEntry { .. } => ExErrorKind::DuplicatePackageEntry,
            UmdiffError::ArchitectureSetMismatch { .. } => ExErrorKind::ArchitectureSetMismatch,
            UmdiffError::Config { .. } => ExErrorKind::Config,
        }
    }

    pub(crate) fn source_unavailable(reference: &str, cause: impl std::fmt::Display) -> Self {
        UmdiffError::SourceUnavailable {
            reference: reference.to_string(),
            cause: cause.to_string(),
        }
    }
}

/// Conversion from UmdiffError to ExError
impl From<UmdiffError> for ExError {
    fn from(err: UmdiffError) -> Self {
        match err {
            UmdiffError::SourceUnavailable { reference, cause } => {
                ExError::new(ExErrorKind::SourceUnavailable)
                    .with_op("resolve_manifest")
                    .with_origin(reference)
                    .with_message(cause)
            }

            UmdiffError::MalformedManifestLine {
                origin,
                line_number,
                raw_line,
            } => ExError::new(ExErrorKind::MalformedManifestLine)
                .with_op("parse_manifest")
                .with_origin(origin)
                .with_line_number(line_number)
                .with_message(format!("Unrecognised line shape: {:?}", raw_line)),

            UmdiffError::DuplicatePackageEntry {
                origin,
                name,
                first_version,
                second_version,
            } => ExError::new(ExErrorKind::DuplicatePackageEntry)
                .with_op("parse_manifest")
                .with_origin(origin)
                .with_package(name)
                .with_message(format!(
                    "Listed with versions {} and {}",
                    first_version, second_version
                )),

            UmdiffError::ArchitectureSetMismatch { missing_labels } => {
                let message = if missing_labels.is_empty() {
                    "No architecture labels supplied".to_string()
                } else {
                    format!("Labels without a counterpart: {}", missing_labels.join(", "))
                };
                ExError::new(ExErrorKind::ArchitectureSetMismatch)
                    .with_op("diff_aggregate")
                    .with_labels(missing_labels)
                    .with_message(message)
            }

            UmdiffError::Config { message } => {
                ExError::new(ExErrorKind::Config).with_message(message)
            }
        }
    }
}
