//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`], the crate-wide [Result] alias, and the
//! structured validation records ([`ValidationIssue`], [`ValidationReport`]) that configuration
//! checks accumulate before anything is generated. Reports are only rendered to text by their
//! `Display` impls.
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("one or more parameters are missing in the configuration:\n{0}")]
    MissingParameters(ValidationReport),

    #[error("invalid configuration:\n{0}")]
    InvalidConfig(ValidationReport),

    #[error("input image '{}' was not found", path.display())]
    ResourceNotFound { path: PathBuf },

    #[error("the distribution '{name}' is not supported; supported distributions are: {supported}")]
    UnsupportedDistribution { name: String, supported: String },

    #[error("the structure of type '{name}' is not supported; supported structures are: {supported}")]
    UnsupportedRegionType { name: String, supported: String },

    #[error("the format '{name}' is not supported; supported formats are: {supported}")]
    UnsupportedFormat { name: String, supported: String },

    #[error("slice {index} has shape {actual:?} but the volume expects {expected:?}")]
    ShapeMismatch {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("slice {index} {}", maps_mismatch_message(.expected))]
    MapsMismatch { index: usize, expected: bool },

    #[error("slice {index} is not available in the slice store")]
    MissingSlice { index: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

fn maps_mismatch_message(expected: &bool) -> &'static str {
    if *expected {
        "has no physical maps but the volume format requires them"
    } else {
        "carries physical maps but the volume format has none"
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

/// Category of a single validation finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// A required key is absent.
    MissingParameter,
    /// A name or number lies outside the supported set or range.
    InvalidValue,
    /// Region geometry (or a declared point) lies outside the phantom extents.
    OutOfBounds,
    /// Non-positive radius/size, too few vertices, or a negative gain.
    InvalidGeometry,
    /// Two individually valid settings that cannot be used together.
    UnsupportedCombination,
    /// A referenced path does not exist.
    ResourceNotFound,
}

/// One finding produced while validating a configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// Where the issue was found, e.g. `structure #2 (circle)` or `perc_of_scatterers`.
    pub context: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind, context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.context.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.context, self.message)
        }
    }
}

/// Ordered collection of [`ValidationIssue`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        self.issues.extend(issues);
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns `true` if any issue of the given kind was recorded.
    pub fn contains_kind(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        matches!(err, Error::Other(_))
            .then_some(())
            .expect("expected Other variant");
    }

    #[test]
    fn from_str_allocates_owned_message() {
        let err: Error = "issue".into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "issue"));
    }

    #[test]
    fn report_renders_one_line_per_issue() {
        let mut report = ValidationReport::new();
        report.push(ValidationIssue::new(
            IssueKind::MissingParameter,
            "",
            "parameter \"rows_y\" is missing",
        ));
        report.push(ValidationIssue::new(
            IssueKind::OutOfBounds,
            "structure #0 (circle)",
            "the defined circle is out of bounds of the phantom",
        ));

        let text = report.to_string();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("parameter \"rows_y\" is missing"));
        assert!(text.contains("structure #0 (circle): the defined circle"));
        assert!(report.contains_kind(IssueKind::OutOfBounds));
        assert!(!report.contains_kind(IssueKind::InvalidValue));
    }

    #[test]
    fn maps_mismatch_names_the_missing_side() {
        let err = Error::MapsMismatch {
            index: 2,
            expected: true,
        };
        assert_eq!(
            err.to_string(),
            "slice 2 has no physical maps but the volume format requires them"
        );
    }

    #[test]
    fn invalid_config_error_embeds_report() {
        let mut report = ValidationReport::new();
        report.push(ValidationIssue::new(
            IssueKind::UnsupportedCombination,
            "depth_z",
            "effec_scatterers only supports 2-D phantoms",
        ));
        let err = Error::InvalidConfig(report);
        assert!(err.to_string().contains("only supports 2-D phantoms"));
    }
}
