//! Error types for notionical.

use thiserror::Error;

/// A record that passed the shape checks but cannot become an event.
///
/// Whether this aborts the feed or only drops the record is decided by the
/// caller's data error policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("Record {record}: property '{property}' not found")]
    MissingProperty { record: String, property: String },

    #[error("Record {record}: property '{property}' is not of type {expected}")]
    WrongPropertyType {
        record: String,
        property: String,
        expected: &'static str,
    },

    #[error("Record {record}: title is empty")]
    EmptyTitle { record: String },

    #[error("Record {record}: invalid date '{value}': {reason}")]
    InvalidDate {
        record: String,
        value: String,
        reason: String,
    },
}

impl DataError {
    /// Identifier of the record that failed.
    pub fn record(&self) -> &str {
        match self {
            Self::MissingProperty { record, .. }
            | Self::WrongPropertyType { record, .. }
            | Self::EmptyTitle { record }
            | Self::InvalidDate { record, .. } => record,
        }
    }
}

/// Result type alias for record mapping.
pub type DataResult<T> = Result<T, DataError>;
