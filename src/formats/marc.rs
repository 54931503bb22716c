//! MARC 21 publication dates.
//!
//! The primary source is control field 008, whose positions 06-14 hold a
//! one-character date type followed by two four-character dates:
//!
//! ```text
//! 850101d19851990fi ...
//!       ^^   ^   ^
//!       |    |   date 2 (positions 11-14)
//!       |    date 1 (positions 07-10)
//!       date type (position 06)
//! ```
//!
//! Unknown digits are written `u`; `9999` as date 2 means "still continuing".
//! When 008 yields nothing the driver falls back to the imprint statement
//! (264/260 `$c`) through [`parse_imprint_date`].

use lazy_static::lazy_static;
use regex::Captures;

use super::shared::{single_year, year_range};
use crate::context::ParseContext;
use crate::instant::Role;
use crate::partial::{is_wildcard, PartialDate};
use crate::range::DateRange;
use crate::rules::{capture_str, Extraction, Outcome, Rule, RuleTable};

lazy_static! {
    /// 008 date rules, in evaluation order.
    pub static ref RULES: RuleTable = RuleTable::new(vec![
        Rule::new("continuing", r"^.{6}c([0-9u]{4})", continuing),
        Rule::new("multiple-dates", r"^.{6}[dikmq]([0-9u]{4})(.{4})?", multiple_dates),
        Rule::new("detailed", r"^.{6}e([0-9u]{4})([0-9u]{2})([0-9u ]{2})", detailed),
        Rule::new("single", r"^.{6}[prst]([0-9u]{4})", single),
        Rule::new("unknown-status", r"^.{6}[nu]([0-9u]{4})(.{4})?", unknown_status),
    ]);

    /// Imprint statement rules (264/260 `$c`), in evaluation order.
    pub static ref IMPRINT_RULES: RuleTable = RuleTable::new(vec![
        Rule::new("imprint-range", r"(?:^|\D)(\d{4})\s*-\s*(\d{4})(?:\D|$)", year_range),
        Rule::new("imprint-year", r"(?:^|\D)(\d{4})(?:\D|$)", single_year),
    ]);
}

/// Resolve an imprint date such as `[1985?]`, `c1985` or `1985-1990`.
pub fn parse_imprint_date(raw: &str, ctx: &mut ParseContext<'_>) -> Option<DateRange> {
    if raw.trim().is_empty() {
        return None;
    }
    let input = raw.trim().to_lowercase();
    super::resolve(&IMPRINT_RULES, raw, &input, ctx)
}

/// Date 1 for `role`; `None` if it carries no known digit at all.
fn date1(caps: &Captures<'_>, role: Role) -> Option<PartialDate> {
    capture_str(caps, 1)
        .filter(|text| !text.chars().all(is_wildcard))
        .and_then(|text| PartialDate::parse_iso(text, role))
}

enum Date2 {
    Open,
    Blank,
    Date(PartialDate),
}

fn date2(caps: &Captures<'_>) -> Date2 {
    match caps.get(2).map(|m| m.as_str()) {
        Some("9999" | "uuuu") => Date2::Open,
        Some(text) if text.trim().is_empty() || text == "||||" => Date2::Blank,
        Some(text) => {
            PartialDate::parse_iso(text, Role::End).map_or(Date2::Blank, Date2::Date)
        },
        None => Date2::Blank,
    }
}

fn bounds(start: Option<PartialDate>, end: Option<PartialDate>) -> Extraction {
    Ok(match (start, end) {
        (Some(start), Some(end)) => Some(Outcome::Bounds { start, end }),
        _ => None,
    })
}

fn continuing(caps: &Captures<'_>) -> Extraction {
    bounds(date1(caps, Role::Start), Some(PartialDate::unknown(Role::End)))
}

fn multiple_dates(caps: &Captures<'_>) -> Extraction {
    let end = match date2(caps) {
        Date2::Open => Some(PartialDate::unknown(Role::End)),
        Date2::Blank => date1(caps, Role::End),
        Date2::Date(date) => Some(date),
    };
    bounds(date1(caps, Role::Start), end)
}

fn unknown_status(caps: &Captures<'_>) -> Extraction {
    let end = match date2(caps) {
        Date2::Date(date) => date,
        Date2::Open | Date2::Blank => PartialDate::unknown(Role::End),
    };
    bounds(date1(caps, Role::Start), Some(end))
}

fn detailed(caps: &Captures<'_>) -> Extraction {
    let month = capture_str(caps, 2)
        .and_then(|m| m.parse::<u32>().ok())
        .filter(|m| *m != 0);
    let day = capture_str(caps, 3)
        .and_then(|d| d.trim().parse::<u32>().ok())
        .filter(|d| *d != 0);
    let with_detail = |date: PartialDate| PartialDate {
        month,
        day: month.and(day),
        ..date
    };
    bounds(
        date1(caps, Role::Start).map(with_detail),
        date1(caps, Role::End).map(with_detail),
    )
}

fn single(caps: &Captures<'_>) -> Extraction {
    bounds(date1(caps, Role::Start), date1(caps, Role::End))
}
