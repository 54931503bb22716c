//! Per-call context for date resolution.
//!
//! Every parse call receives a [`ParseContext`] carrying the identity of the
//! record being processed, the [`WarningSink`] to report to, and the [`Clock`]
//! used by the future-date guard. Nothing is stored between calls.

use chrono::Datelike;

use crate::warnings::{Warning, WarningKind, WarningSink};

/// Source of the current calendar year.
pub trait Clock {
    /// The current year.
    fn current_year(&self) -> i32;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        chrono::Utc::now().year()
    }
}

/// A clock stuck at one year, for reproducible processing and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

/// Identity, sink and clock for one record's date resolution.
pub struct ParseContext<'a> {
    source: &'a str,
    record_id: &'a str,
    sink: &'a mut dyn WarningSink,
    clock: &'a dyn Clock,
    reported: usize,
}

impl<'a> ParseContext<'a> {
    /// Create a context for the record `record_id` from `source`.
    pub fn new(
        source: &'a str,
        record_id: &'a str,
        sink: &'a mut dyn WarningSink,
        clock: &'a dyn Clock,
    ) -> Self {
        ParseContext {
            source,
            record_id,
            sink,
            clock,
            reported: 0,
        }
    }

    /// Data source identifier.
    #[must_use]
    pub fn source(&self) -> &str {
        self.source
    }

    /// Record identifier.
    #[must_use]
    pub fn record_id(&self) -> &str {
        self.record_id
    }

    /// The current year according to the context's clock.
    #[must_use]
    pub fn current_year(&self) -> i32 {
        self.clock.current_year()
    }

    /// Number of warnings reported through this context so far.
    #[must_use]
    pub const fn warnings_reported(&self) -> usize {
        self.reported
    }

    /// Report a warning for this record.
    pub fn warn(&mut self, kind: WarningKind, message: impl Into<String>) {
        let warning = Warning {
            source: self.source.to_string(),
            record_id: self.record_id.to_string(),
            kind,
            message: message.into(),
        };
        tracing::debug!(
            source = self.source,
            record_id = self.record_id,
            kind = %kind,
            "date warning: {}",
            warning.message
        );
        self.reported += 1;
        self.sink.warn(warning);
    }
}

impl std::fmt::Debug for ParseContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseContext")
            .field("source", &self.source)
            .field("record_id", &self.record_id)
            .field("current_year", &self.clock.current_year())
            .finish_non_exhaustive()
    }
}
