//! Error types for pickalign

use crate::point::ObjectId;
use thiserror::Error;

/// Why three picked points cannot span a basis
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// The first two points coincide, so the primary axis has no direction
    #[error("first and second points coincide")]
    CoincidentPoints,

    /// The third point lies on the line through the first two
    #[error("points are collinear")]
    CollinearPoints,
}

/// A pick that breaks the expected picking sequence
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceViolation {
    #[error("pick on object {object} while aligning objects {transforming} and {fixed}")]
    UnexpectedObject {
        object: ObjectId,
        transforming: ObjectId,
        fixed: ObjectId,
    },

    #[error("pick on object {object} has a non-finite coordinate")]
    MalformedPoint { object: ObjectId },

    #[error("object {object} already holds {limit} point(s)")]
    QuotaExceeded { object: ObjectId, limit: usize },
}

/// Main error type for pickalign operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("degenerate input on object {object}: {kind}")]
    DegenerateInput {
        object: ObjectId,
        #[source]
        kind: Degeneracy,
    },

    #[error("invalid pick sequence: {0}")]
    InvalidSequence(#[from] SequenceViolation),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Whether the error terminated the running alignment session
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::InvalidSequence(_))
    }
}

/// Result type alias for pickalign operations
pub type Result<T> = std::result::Result<T, Error>;
