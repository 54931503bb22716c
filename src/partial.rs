//! Partially specified dates and their completion into instants.
//!
//! A [`PartialDate`] is what a rule extracts from the input: a year and
//! possibly a month and day. [`PartialDate::complete`] fills in whatever is
//! missing for the requested [`Role`]:
//!
//! | Missing   | Start        | End                         |
//! |-----------|--------------|-----------------------------|
//! | month     | `01`         | `12`                        |
//! | day       | `01`         | last day of the month       |
//! | whole year| `0000`       | `9999`                      |
//! | time      | `00:00:00Z`  | `23:59:59Z`                 |
//!
//! Wildcard digits (`u`, `x`) in a year are replaced one by one, with `0` for
//! starts and `9` for ends: `195u` is 1950 as a start and 1959 as an end.
//!
//! This module also holds the decade/century shorthand arithmetic.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::DateError;
use crate::instant::{format_year, last_day_of_month, ResolvedInstant, Role};

lazy_static! {
    static ref ISO_BOUND: Regex = Regex::new(
        r"^(-)?([0-9ux]{1,4})(?:-?([0-9ux]{2})(?:-?([0-9ux]{2}))?)?(?:t[0-9:.]*(?:z|[+-][0-9]{2}:?[0-9]{2})?)?$"
    )
    .unwrap();
}

/// Offsets (from the decade start) for whole/early/middle/late decade shorthand.
const DECADE_OFFSETS: [(i32, i32); 4] = [(0, 9), (0, 3), (3, 7), (7, 9)];

/// Offsets (from the century start) for whole/early/middle/late century shorthand.
const CENTURY_OFFSETS: [(i32, i32); 4] = [(0, 99), (0, 30), (30, 70), (70, 90)];

/// A date with optional month and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartialDate {
    /// Year, negative before the common era
    pub year: i32,
    /// Month 1-12 when known
    pub month: Option<u32>,
    /// Day of month when known
    pub day: Option<u32>,
    /// Some component was substituted instead of read from the input
    pub unknown: bool,
}

impl PartialDate {
    /// Year precision.
    #[must_use]
    pub const fn of_year(year: i32) -> Self {
        PartialDate {
            year,
            month: None,
            day: None,
            unknown: false,
        }
    }

    /// Month precision.
    #[must_use]
    pub const fn of_month(year: i32, month: u32) -> Self {
        PartialDate {
            year,
            month: Some(month),
            day: None,
            unknown: false,
        }
    }

    /// Day precision.
    #[must_use]
    pub const fn of_day(year: i32, month: u32, day: u32) -> Self {
        PartialDate {
            year,
            month: Some(month),
            day: Some(day),
            unknown: false,
        }
    }

    /// A bound nothing is known about: year `0000` for starts, `9999` for ends.
    #[must_use]
    pub const fn unknown(role: Role) -> Self {
        PartialDate {
            year: role.unknown_year(),
            month: None,
            day: None,
            unknown: true,
        }
    }

    /// Same date, flagged as synthesized.
    #[must_use]
    pub const fn marked_unknown(self) -> Self {
        PartialDate {
            unknown: true,
            ..self
        }
    }

    /// Read an ISO 8601-like bound, resolving wildcard digits for `role`.
    ///
    /// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, the compact `YYYYMMDD` form,
    /// an optional leading `-` and an optional time part (ignored). Month or
    /// day components that contain a wildcard or are `00` count as missing.
    ///
    /// Returns `None` if the text is not shaped like a date at all; calendar
    /// validity is checked later by [`complete`](Self::complete).
    ///
    /// ```
    /// use recdates::instant::Role;
    /// use recdates::partial::PartialDate;
    ///
    /// let start = PartialDate::parse_iso("195u", Role::Start).unwrap();
    /// let end = PartialDate::parse_iso("195u", Role::End).unwrap();
    /// assert_eq!((start.year, end.year), (1950, 1959));
    /// assert!(start.unknown);
    /// ```
    #[must_use]
    pub fn parse_iso(text: &str, role: Role) -> Option<Self> {
        let text = text.trim().to_lowercase();
        let caps = ISO_BOUND.captures(&text)?;
        let negative = caps.get(1).is_some();
        let year_text = caps.get(2)?.as_str();

        let mut date = if year_text.chars().all(is_wildcard) {
            PartialDate::unknown(role)
        } else {
            let (digits, substituted) = substitute_wildcards(year_text, role);
            let year: i32 = digits.parse().ok()?;
            PartialDate {
                year: if negative { -year } else { year },
                month: None,
                day: None,
                unknown: substituted,
            }
        };

        if let Some(m) = caps.get(3) {
            let (value, wild) = read_component(m.as_str());
            date.month = value;
            date.unknown |= wild;
        }
        if let Some(d) = caps.get(4) {
            let (value, wild) = read_component(d.as_str());
            date.day = value;
            date.unknown |= wild;
        }
        Some(date)
    }

    /// Complete the date for `role` and validate it against the calendar.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidStartDate`] or [`DateError::InvalidEndDate`]
    /// (depending on `role`) if the completed date does not exist, for
    /// example day 31 in April.
    pub fn complete(&self, role: Role) -> Result<ResolvedInstant, DateError> {
        let month = self.month.unwrap_or(role.default_month());
        let day = match (self.day, role) {
            (Some(day), _) => day,
            (None, Role::Start) => 1,
            (None, Role::End) => last_day_of_month(self.year, month)
                .ok_or_else(|| DateError::invalid_bound(role, self.describe(month, None)))?,
        };
        ResolvedInstant::new(self.year, month, day, role)
            .ok_or_else(|| DateError::invalid_bound(role, self.describe(month, Some(day))))
    }

    fn describe(&self, month: u32, day: Option<u32>) -> String {
        match day {
            Some(day) => format!("{}-{month:02}-{day:02}", format_year(self.year)),
            None => format!("{}-{month:02}", format_year(self.year)),
        }
    }
}

/// `true` for the wildcard digit placeholders `u` and `x` (any case).
#[must_use]
pub fn is_wildcard(c: char) -> bool {
    matches!(c, 'u' | 'x' | 'U' | 'X')
}

/// Replace every wildcard character with the role's digit.
///
/// Returns the substituted text and whether anything was replaced.
///
/// ```
/// use recdates::instant::Role;
/// use recdates::partial::substitute_wildcards;
///
/// assert_eq!(substitute_wildcards("uu5u", Role::Start), ("0050".to_string(), true));
/// assert_eq!(substitute_wildcards("u960", Role::End), ("9960".to_string(), true));
/// assert_eq!(substitute_wildcards("1931", Role::End), ("1931".to_string(), false));
/// ```
#[must_use]
pub fn substitute_wildcards(text: &str, role: Role) -> (String, bool) {
    let mut substituted = false;
    let out = text
        .chars()
        .map(|c| {
            if is_wildcard(c) {
                substituted = true;
                role.wildcard_digit()
            } else {
                c
            }
        })
        .collect();
    (out, substituted)
}

fn read_component(text: &str) -> (Option<u32>, bool) {
    if text.chars().any(is_wildcard) {
        return (None, true);
    }
    match text.parse::<u32>() {
        Ok(0) | Err(_) => (None, false),
        Ok(value) => (Some(value), false),
    }
}

/// Sub-period named by decade/century shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// The whole decade or century
    Whole,
    /// "alkupuoli", "alussa"
    Early,
    /// "puoliväli", "keskivaiheilla"
    Middle,
    /// "loppupuoli", "lopussa"
    Late,
}

impl Period {
    /// Map a Finnish qualifier word (any inflection) to a period.
    #[must_use]
    pub fn from_qualifier(word: &str) -> Option<Self> {
        let word = word.to_lowercase();
        if word.starts_with("alku") || word.starts_with("alu") {
            Some(Period::Early)
        } else if word.starts_with("puoliväli") || word.starts_with("keski") {
            Some(Period::Middle)
        } else if word.starts_with("loppu") || word.starts_with("lopu") {
            Some(Period::Late)
        } else {
            None
        }
    }

    const fn index(self) -> usize {
        match self {
            Period::Whole => 0,
            Period::Early => 1,
            Period::Middle => 2,
            Period::Late => 3,
        }
    }
}

/// First and last year covered by decade/century shorthand.
///
/// A base divisible by 100 names a century; anything else is floored to its
/// decade.
///
/// ```
/// use recdates::partial::{shorthand_span, Period};
///
/// assert_eq!(shorthand_span(1930, Period::Whole), (1930, 1939));
/// assert_eq!(shorthand_span(1930, Period::Early), (1930, 1933));
/// assert_eq!(shorthand_span(1900, Period::Whole), (1900, 1999));
/// assert_eq!(shorthand_span(1800, Period::Late), (1870, 1890));
/// ```
#[must_use]
pub fn shorthand_span(base: i32, period: Period) -> (i32, i32) {
    if base % 100 == 0 {
        let (from, to) = CENTURY_OFFSETS[period.index()];
        (base + from, base + to)
    } else {
        let decade = base - base.rem_euclid(10);
        let (from, to) = DECADE_OFFSETS[period.index()];
        (decade + from, decade + to)
    }
}

/// Expand an abbreviated range end such as the `43` in `1931-43`.
///
/// A shorter second number inherits the leading digits of the first; if that
/// lands before the first year, the next century (or decade) is used.
///
/// ```
/// use recdates::partial::expand_abbreviated_year;
///
/// assert_eq!(expand_abbreviated_year("1931", "43"), Some(1943));
/// assert_eq!(expand_abbreviated_year("1930", "40"), Some(1940));
/// assert_eq!(expand_abbreviated_year("1931", "1943"), Some(1943));
/// ```
#[must_use]
pub fn expand_abbreviated_year(first: &str, second: &str) -> Option<i32> {
    let start: i32 = first.parse().ok()?;
    let end: i32 = second.parse().ok()?;
    if second.len() >= first.len() {
        return Some(end);
    }
    let modulus = 10_i32.checked_pow(u32::try_from(second.len()).ok()?)?;
    let candidate = start - start.rem_euclid(modulus) + end;
    if candidate < start {
        candidate.checked_add(modulus)
    } else {
        Some(candidate)
    }
}
