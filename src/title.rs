//! Appending the resolved year range to display titles.
//!
//! Whether the range is appended is a per-format setting
//! ([`TitleYearPolicy`]). The label is prefixed with U+200E LEFT-TO-RIGHT
//! MARK so it renders correctly next to right-to-left title text.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::instant::format_year;
use crate::range::DateRange;

/// Direction mark written before the appended year label.
pub const LEFT_TO_RIGHT_MARK: char = '\u{200E}';

lazy_static! {
    static ref FOUR_DIGIT_YEAR: Regex = Regex::new(r"\b\d{4}\b").unwrap();
}

/// When to append the year range to a title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleYearPolicy {
    /// Always append
    Always,
    /// Never append
    #[default]
    Never,
    /// Append only if the title contains no four-digit year
    NoYearExists,
    /// Append if at least one label year is missing from the title
    NoMatchExists,
    /// Append only if none of the label years occur in the title
    NoMatchesExist,
}

impl TitleYearPolicy {
    /// Configuration name of the policy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TitleYearPolicy::Always => "always",
            TitleYearPolicy::Never => "never",
            TitleYearPolicy::NoYearExists => "no_year_exists",
            TitleYearPolicy::NoMatchExists => "no_match_exists",
            TitleYearPolicy::NoMatchesExist => "no_matches_exist",
        }
    }

    fn wants_label(self, title: &str, years: &[String]) -> bool {
        match self {
            TitleYearPolicy::Always => true,
            TitleYearPolicy::Never => false,
            TitleYearPolicy::NoYearExists => !FOUR_DIGIT_YEAR.is_match(title),
            TitleYearPolicy::NoMatchExists => {
                let present = years_in(title);
                years.iter().any(|y| !present.contains(&y.as_str()))
            },
            TitleYearPolicy::NoMatchesExist => {
                let present = years_in(title);
                !years.iter().any(|y| present.contains(&y.as_str()))
            },
        }
    }
}

impl fmt::Display for TitleYearPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TitleYearPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "always" => Ok(TitleYearPolicy::Always),
            "never" | "" => Ok(TitleYearPolicy::Never),
            "no_year_exists" => Ok(TitleYearPolicy::NoYearExists),
            "no_match_exists" => Ok(TitleYearPolicy::NoMatchExists),
            "no_matches_exist" => Ok(TitleYearPolicy::NoMatchesExist),
            other => Err(format!("unknown title year policy: {other}")),
        }
    }
}

/// Whole four-digit numbers in `title`.
fn years_in(title: &str) -> Vec<&str> {
    FOUR_DIGIT_YEAR.find_iter(title).map(|m| m.as_str()).collect()
}

/// Years of the bounds that were read from the input.
fn known_years(range: &DateRange) -> Vec<String> {
    let mut years = Vec::with_capacity(2);
    if !range.start_unknown() {
        years.push(format_year(range.start_year()));
    }
    if !range.end_unknown() {
        let end = format_year(range.end_year());
        if years.first() != Some(&end) {
            years.push(end);
        }
    }
    years
}

/// Short label for a range: `1985`, `1985-1995`, `1985-` or `-1995`.
///
/// Returns `None` when neither bound is known.
///
/// ```
/// use recdates::range::DateRange;
/// use recdates::title::year_range_label;
///
/// let range = DateRange::from_years(1985, 1995).unwrap();
/// assert_eq!(year_range_label(&range).as_deref(), Some("1985-1995"));
///
/// let open = range.with_unknown(false, true);
/// assert_eq!(year_range_label(&open).as_deref(), Some("1985-"));
/// ```
#[must_use]
pub fn year_range_label(range: &DateRange) -> Option<String> {
    let start = (!range.start_unknown()).then(|| format_year(range.start_year()));
    let end = (!range.end_unknown()).then(|| format_year(range.end_year()));
    match (start, end) {
        (Some(start), Some(end)) if start == end => Some(start),
        (Some(start), Some(end)) => Some(format!("{start}-{end}")),
        (Some(start), None) => Some(format!("{start}-")),
        (None, Some(end)) => Some(format!("-{end}")),
        (None, None) => None,
    }
}

/// Apply `policy` to `title`, appending the range label when it applies.
///
/// ```
/// use recdates::range::DateRange;
/// use recdates::title::{title_with_year_range, TitleYearPolicy};
///
/// let range = DateRange::from_years(1985, 1995).unwrap();
/// assert_eq!(
///     title_with_year_range("Kirjeitä", Some(&range), TitleYearPolicy::NoYearExists),
///     "Kirjeitä \u{200E}1985-1995"
/// );
/// assert_eq!(
///     title_with_year_range("Kirjeitä 1985", Some(&range), TitleYearPolicy::NoYearExists),
///     "Kirjeitä 1985"
/// );
/// ```
#[must_use]
pub fn title_with_year_range(
    title: &str,
    range: Option<&DateRange>,
    policy: TitleYearPolicy,
) -> String {
    if title.trim().is_empty() {
        return title.to_string();
    }
    let Some(range) = range else {
        return title.to_string();
    };
    let Some(label) = year_range_label(range) else {
        return title.to_string();
    };
    if policy.wants_label(title, &known_years(range)) {
        format!("{title} {LEFT_TO_RIGHT_MARK}{label}")
    } else {
        title.to_string()
    }
}
