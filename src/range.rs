//! Date ranges, reconciliation and the canonical range string.
//!
//! A [`DateRange`] always satisfies `start <= end`. [`reconcile`] is the only
//! way ranges are built from parsed input: it repairs inverted pairs and drops
//! ranges that reach into the future.
//!
//! The canonical string is the wire format the search index expects:
//!
//! - `YYYY-MM-DD` when start and end fall on the same day
//! - `[YYYY-MM-DD TO YYYY-MM-DD]` otherwise
//!
//! # Examples
//!
//! ```
//! use recdates::range::DateRange;
//!
//! let range = DateRange::from_years(1931, 1931).unwrap();
//! assert_eq!(range.to_canonical_string(), "[1931-01-01 TO 1931-12-31]");
//!
//! let reparsed = DateRange::parse_canonical("[1931-01-01 TO 1931-12-31]").unwrap();
//! assert_eq!(reparsed, range);
//! ```

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::context::ParseContext;
use crate::instant::{ResolvedInstant, Role};
use crate::warnings::WarningKind;

lazy_static! {
    static ref CANONICAL_DATE: Regex = Regex::new(r"^(-?\d{4,})-(\d{2})-(\d{2})$").unwrap();
    static ref CANONICAL_RANGE: Regex = Regex::new(r"^\[(\S+) TO (\S+)\]$").unwrap();
}

/// A validated `[start, end]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: ResolvedInstant,
    end: ResolvedInstant,
    start_unknown: bool,
    end_unknown: bool,
}

impl DateRange {
    /// Build a range from two instants, or `None` if `end < start`.
    #[must_use]
    pub fn new(start: ResolvedInstant, end: ResolvedInstant) -> Option<Self> {
        let start = ResolvedInstant::from_date(start.date(), Role::Start);
        let end = ResolvedInstant::from_date(end.date(), Role::End);
        (start <= end).then_some(DateRange {
            start,
            end,
            start_unknown: false,
            end_unknown: false,
        })
    }

    /// Whole years `first` through `last`.
    #[must_use]
    pub fn from_years(first: i32, last: i32) -> Option<Self> {
        Self::new(
            ResolvedInstant::year_start(first)?,
            ResolvedInstant::year_end(last)?,
        )
    }

    /// Same range with the given bound flags.
    #[must_use]
    pub const fn with_unknown(self, start_unknown: bool, end_unknown: bool) -> Self {
        DateRange {
            start_unknown,
            end_unknown,
            ..self
        }
    }

    /// Range start (`00:00:00Z`).
    #[must_use]
    pub const fn start(&self) -> ResolvedInstant {
        self.start
    }

    /// Range end (`23:59:59Z`).
    #[must_use]
    pub const fn end(&self) -> ResolvedInstant {
        self.end
    }

    /// The start was synthesized from a wildcard or an open marker.
    #[must_use]
    pub const fn start_unknown(&self) -> bool {
        self.start_unknown
    }

    /// The end was synthesized from a wildcard or an open marker.
    #[must_use]
    pub const fn end_unknown(&self) -> bool {
        self.end_unknown
    }

    /// Year of the start bound.
    #[must_use]
    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    /// Year of the end bound.
    #[must_use]
    pub fn end_year(&self) -> i32 {
        self.end.year()
    }

    /// `true` when start and end are on the same calendar day.
    #[must_use]
    pub fn is_single_day(&self) -> bool {
        self.start.date() == self.end.date()
    }

    /// Render the canonical index string.
    ///
    /// ```
    /// use recdates::instant::{ResolvedInstant, Role};
    /// use recdates::range::DateRange;
    ///
    /// let day = DateRange::new(
    ///     ResolvedInstant::new(1960, 1, 1, Role::Start).unwrap(),
    ///     ResolvedInstant::new(1960, 1, 1, Role::End).unwrap(),
    /// )
    /// .unwrap();
    /// assert_eq!(day.to_canonical_string(), "1960-01-01");
    /// ```
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        if self.is_single_day() {
            self.start.date_string()
        } else {
            format!(
                "[{} TO {}]",
                self.start.date_string(),
                self.end.date_string()
            )
        }
    }

    /// Parse a canonical string produced by [`to_canonical_string`](Self::to_canonical_string).
    #[must_use]
    pub fn parse_canonical(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(caps) = CANONICAL_RANGE.captures(text) {
            let start = parse_canonical_date(caps.get(1)?.as_str(), Role::Start)?;
            let end = parse_canonical_date(caps.get(2)?.as_str(), Role::End)?;
            return Self::new(start, end);
        }
        let start = parse_canonical_date(text, Role::Start)?;
        let end = parse_canonical_date(text, Role::End)?;
        Self::new(start, end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

/// Render a range in the canonical index format.
///
/// Free-function form of [`DateRange::to_canonical_string`].
#[must_use]
pub fn date_range_to_canonical_string(range: &DateRange) -> String {
    range.to_canonical_string()
}

fn parse_canonical_date(text: &str, role: Role) -> Option<ResolvedInstant> {
    let caps = CANONICAL_DATE.captures(text)?;
    let year = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2)?.as_str().parse().ok()?;
    let day = caps.get(3)?.as_str().parse().ok()?;
    ResolvedInstant::new(year, month, day, role)
}

/// Validate a resolved start/end pair.
///
/// - If `end < start`, a [`WarningKind::InvalidDateRange`] warning is
///   reported and the end is moved to December 31 of the start year.
/// - If the year of a bound that was actually read from the input (not
///   synthesized, see `start_unknown`/`end_unknown`) lies after the current
///   year, the range is dropped without a warning.
///
/// `raw` is the original input, used in the warning message.
pub fn reconcile(
    start: ResolvedInstant,
    end: ResolvedInstant,
    start_unknown: bool,
    end_unknown: bool,
    raw: &str,
    ctx: &mut ParseContext<'_>,
) -> Option<DateRange> {
    let start = ResolvedInstant::from_date(start.date(), Role::Start);
    let mut end = ResolvedInstant::from_date(end.date(), Role::End);

    if end < start {
        ctx.warn(
            WarningKind::InvalidDateRange,
            format!("{start} - {end} (input: {raw})"),
        );
        end = ResolvedInstant::year_end(start.year())?;
    }

    let now = ctx.current_year();
    if (!start_unknown && start.year() > now) || (!end_unknown && end.year() > now) {
        tracing::trace!(raw, now, "dropping date range in the future");
        return None;
    }

    DateRange::new(start, end).map(|range| range.with_unknown(start_unknown, end_unknown))
}
