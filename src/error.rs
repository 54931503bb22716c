//! Error types for date resolution and record conversion.
//!
//! This module provides two error types:
//! - [`DateError`] for failures inside the date subsystem. These never reach
//!   callers of the `parse_date_range` entry points; they are converted into a
//!   missing value plus one [`Warning`](crate::warnings::Warning).
//! - [`RecordError`] for record-level failures in the drivers (unreadable XML,
//!   malformed settings JSON).
//!
//! The [`Result`] alias uses [`RecordError`].

use thiserror::Error;

use crate::instant::Role;
use crate::warnings::WarningKind;

/// Error raised while resolving a single date expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The start bound could not be turned into a calendar date.
    #[error("invalid start date: {0}")]
    InvalidStartDate(String),

    /// The end bound could not be turned into a calendar date.
    #[error("invalid end date: {0}")]
    InvalidEndDate(String),

    /// A captured component could not be read as a number.
    #[error("unparseable date component: {0}")]
    Unparseable(String),
}

impl DateError {
    /// Build the bound error matching `role`.
    #[must_use]
    pub fn invalid_bound(role: Role, value: impl Into<String>) -> Self {
        match role {
            Role::Start => DateError::InvalidStartDate(value.into()),
            Role::End => DateError::InvalidEndDate(value.into()),
        }
    }

    /// Warning category this error is reported under.
    #[must_use]
    pub fn warning_kind(&self) -> WarningKind {
        match self {
            DateError::InvalidStartDate(_) => WarningKind::InvalidStartDate,
            DateError::InvalidEndDate(_) => WarningKind::InvalidEndDate,
            DateError::Unparseable(_) => WarningKind::InvalidDate,
        }
    }

    /// The offending value carried by the error.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            DateError::InvalidStartDate(v)
            | DateError::InvalidEndDate(v)
            | DateError::Unparseable(v) => v,
        }
    }
}

/// Error type for record conversion.
#[derive(Error, Debug)]
pub enum RecordError {
    /// The XML document could not be deserialized.
    #[error("XML error: {0}")]
    Xml(String),

    /// A document lacked an element the driver cannot work without.
    #[error("Missing element: {0}")]
    MissingElement(String),

    /// Settings or output JSON could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`RecordError`].
pub type Result<T> = std::result::Result<T, RecordError>;
