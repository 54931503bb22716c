//! Fully resolved calendar instants.
//!
//! A [`ResolvedInstant`] is a validated proleptic Gregorian date together with
//! the [`Role`] it was resolved for. The role fixes the time of day: range
//! starts sit at `00:00:00Z`, range ends at `23:59:59Z`.
//!
//! Years before the common era are written with a leading `-` and a 4-digit
//! zero-padded magnitude, so 25 BCE becomes `-0025-07-12T00:00:00Z`.
//!
//! # Examples
//!
//! ```
//! use recdates::instant::{ResolvedInstant, Role};
//!
//! let start = ResolvedInstant::new(-25, 7, 12, Role::Start).unwrap();
//! assert_eq!(start.to_string(), "-0025-07-12T00:00:00Z");
//!
//! let end = ResolvedInstant::new(1960, 2, 29, Role::End).unwrap();
//! assert_eq!(end.to_string(), "1960-02-29T23:59:59Z");
//! ```

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Which bound of a range a date is being resolved for.
///
/// `Start` orders before `End`, so two instants on the same day compare the
/// way their times of day would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Lower bound, rounded down.
    Start,
    /// Upper bound, rounded up.
    End,
}

impl Role {
    /// Digit substituted for a `u`/`x` wildcard position.
    #[must_use]
    pub const fn wildcard_digit(self) -> char {
        match self {
            Role::Start => '0',
            Role::End => '9',
        }
    }

    /// Month used when none is given.
    #[must_use]
    pub const fn default_month(self) -> u32 {
        match self {
            Role::Start => 1,
            Role::End => 12,
        }
    }

    /// Year used when the year is entirely unknown.
    #[must_use]
    pub const fn unknown_year(self) -> i32 {
        match self {
            Role::Start => 0,
            Role::End => 9999,
        }
    }

    /// Time-of-day suffix written after the date.
    #[must_use]
    pub const fn time_suffix(self) -> &'static str {
        match self {
            Role::Start => "T00:00:00Z",
            Role::End => "T23:59:59Z",
        }
    }
}

/// Format a year as a sign-aware, zero-padded, at least 4-digit string.
///
/// ```
/// use recdates::instant::format_year;
///
/// assert_eq!(format_year(7), "0007");
/// assert_eq!(format_year(1931), "1931");
/// assert_eq!(format_year(-100), "-0100");
/// ```
#[must_use]
pub fn format_year(year: i32) -> String {
    if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{year:04}")
    }
}

/// Last calendar day of `month` in `year`, or `None` if the month is out of range.
#[must_use]
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|d| d.day())
}

/// A calendar-valid date bound to a range role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResolvedInstant {
    date: NaiveDate,
    role: Role,
}

impl ResolvedInstant {
    /// Build an instant, returning `None` if the date does not exist.
    #[must_use]
    pub fn new(year: i32, month: u32, day: u32, role: Role) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(|date| ResolvedInstant { date, role })
    }

    /// Wrap an existing chrono date.
    #[must_use]
    pub const fn from_date(date: NaiveDate, role: Role) -> Self {
        ResolvedInstant { date, role }
    }

    /// First instant of the given year.
    #[must_use]
    pub fn year_start(year: i32) -> Option<Self> {
        Self::new(year, 1, 1, Role::Start)
    }

    /// Last instant of the given year.
    #[must_use]
    pub fn year_end(year: i32) -> Option<Self> {
        Self::new(year, 12, 31, Role::End)
    }

    /// The underlying calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Role this instant was resolved for.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Calendar year (negative before the common era).
    #[must_use]
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Month, 1-12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Day of month.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Date part only, `YYYY-MM-DD`.
    #[must_use]
    pub fn date_string(&self) -> String {
        format!(
            "{}-{:02}-{:02}",
            format_year(self.year()),
            self.month(),
            self.day()
        )
    }
}

impl fmt::Display for ResolvedInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.date_string(), self.role.time_suffix())
    }
}
