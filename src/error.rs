// Author: Lukas Bower
// Purpose: Error type shared by metadata construction and discovery configuration.
#![forbid(unsafe_code)]

//! Error type for fallible metadata construction.

use thiserror::Error;

/// Errors surfaced while building metadata records, transforms or parsers.
///
/// Multiscale recognition itself never fails: a node that is not a pyramid
/// yields `None`. Only explicit construction paths return this type.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The scale-level pattern handed to a group parser did not compile.
    #[error("invalid scale level pattern: {0}")]
    Pattern(#[from] regex::Error),
    /// A row-packed affine transform had the wrong number of entries.
    #[error("affine transform expects {expected} row-packed values, found {found}")]
    TransformLength {
        /// Number of values required.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },
    /// A COSEM transform array disagrees with the declared axes.
    #[error("cosem transform field `{field}` has {found} entries but {expected} axes are declared")]
    AxisMismatch {
        /// Name of the offending field.
        field: &'static str,
        /// Number of declared axes.
        expected: usize,
        /// Number of entries found in the field.
        found: usize,
    },
    /// A multiscale record has no levels or unaligned path and transform lists.
    #[error("multiscale record lists {paths} paths and {transforms} transforms; both must be equal and non-zero")]
    LevelMismatch {
        /// Number of level paths.
        paths: usize,
        /// Number of level transforms.
        transforms: usize,
    },
    /// A configuration or metadata document could not be decoded.
    #[error("invalid metadata document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results carrying [`MetadataError`].
pub type Result<T> = std::result::Result<T, MetadataError>;
