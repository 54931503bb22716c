//! Non-fatal issues found while resolving dates.
//!
//! The date subsystem never fails a record. When it drops or repairs a value
//! it reports a [`Warning`] to a [`WarningSink`] passed in by the caller.
//!
//! Two sinks are provided:
//! - [`WarningLog`] collects warnings in memory (per record, or for tests)
//! - [`TracingSink`] forwards them to `tracing` at `WARN` level

use std::fmt;

use serde::Serialize;

/// Category of a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The start bound did not form a valid calendar date.
    InvalidStartDate,
    /// The end bound did not form a valid calendar date.
    InvalidEndDate,
    /// The end preceded the start and was rewritten.
    InvalidDateRange,
    /// The expression could not be resolved for another reason.
    InvalidDate,
}

impl WarningKind {
    /// Short lower-case label, as stored with the record.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            WarningKind::InvalidStartDate => "invalid start date",
            WarningKind::InvalidEndDate => "invalid end date",
            WarningKind::InvalidDateRange => "invalid date range",
            WarningKind::InvalidDate => "invalid date",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single warning tied to the record it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Data source identifier
    pub source: String,
    /// Record identifier within the source
    pub record_id: String,
    /// Warning category
    pub kind: WarningKind,
    /// Offending value and the raw input it came from
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (record {}.{})",
            self.kind, self.message, self.source, self.record_id
        )
    }
}

/// Receiver for warnings. Implementations must not panic.
pub trait WarningSink {
    /// Record one warning.
    fn warn(&mut self, warning: Warning);
}

impl WarningSink for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

/// In-memory warning collector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningLog {
    warnings: Vec<Warning>,
}

impl WarningLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of warnings collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// `true` if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Iterate over collected warnings in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.iter()
    }

    /// Kinds of the collected warnings, in report order.
    #[must_use]
    pub fn kinds(&self) -> Vec<WarningKind> {
        self.warnings.iter().map(|w| w.kind).collect()
    }

    /// Drop all collected warnings.
    pub fn clear(&mut self) {
        self.warnings.clear();
    }

    /// Consume the log.
    #[must_use]
    pub fn into_inner(self) -> Vec<Warning> {
        self.warnings
    }
}

impl WarningSink for WarningLog {
    fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}

/// Sink that emits every warning as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&mut self, warning: Warning) {
        tracing::warn!(
            source = %warning.source,
            record_id = %warning.record_id,
            kind = %warning.kind,
            "{}",
            warning.message
        );
    }
}
