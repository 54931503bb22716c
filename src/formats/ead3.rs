//! EAD3 unit dates.
//!
//! EAD3 records carry structured dates (`<fromdate standarddate="...">`,
//! `<todate>`, `<datesingle>`) or an ISO interval in `unitdate/@normal`.
//! On top of the EAD grammar, a bound may be the token `unknown` or `open`
//! (or simply be absent), which resolves to `0000-01-01` for starts and
//! `9999-12-31` for ends. Such bounds are flagged on the resulting
//! [`DateRange`] so titles do not advertise them.

use lazy_static::lazy_static;
use regex::Captures;

use super::shared::{iso_single, single_year, year_range};
use crate::context::ParseContext;
use crate::formats::DateFormat;
use crate::instant::Role;
use crate::partial::PartialDate;
use crate::range::DateRange;
use crate::rules::{capture_str, Extraction, Outcome, Rule, RuleTable};

/// Bound token meaning "not known".
pub const UNKNOWN: &str = "unknown";

/// Bound token meaning "still continuing".
pub const OPEN: &str = "open";

lazy_static! {
    /// EAD3 date rules, in evaluation order.
    pub static ref RULES: RuleTable = RuleTable::new(vec![
        Rule::new("interval", r"^([^/\s]*)\s*/\s*([^/\s]*)$", interval),
        Rule::new("open-token", r"^(unknown|open)$", open_token),
        Rule::new("year-range", r"^(\d{4})\s*-\s*(\d{4})\.?$", year_range),
        Rule::new("iso-single", r"^(-?[0-9ux][0-9ux-]*(?:t\S*)?)$", iso_single),
        Rule::new("embedded-range", r"\b(\d{4})\s*-\s*(\d{4})\b", year_range),
        Rule::new("embedded-year", r"\b(\d{4})\b", single_year),
    ]);
}

fn bound(text: &str, role: Role) -> Option<PartialDate> {
    match text.trim() {
        "" | UNKNOWN | OPEN => Some(PartialDate::unknown(role)),
        other => PartialDate::parse_iso(other, role),
    }
}

fn interval(caps: &Captures<'_>) -> Extraction {
    let from = caps.get(1).map_or("", |m| m.as_str());
    let to = caps.get(2).map_or("", |m| m.as_str());
    Ok(match (bound(from, Role::Start), bound(to, Role::End)) {
        (Some(start), Some(end)) => Some(Outcome::Bounds { start, end }),
        _ => None,
    })
}

fn open_token(caps: &Captures<'_>) -> Extraction {
    Ok(capture_str(caps, 1).map(|_| Outcome::Bounds {
        start: PartialDate::unknown(Role::Start),
        end: PartialDate::unknown(Role::End),
    }))
}

/// Resolve a structured `fromdate`/`todate` pair.
///
/// A missing `from` is treated as `unknown` and a missing `to` as `open`.
pub fn parse_structured(
    from: Option<&str>,
    to: Option<&str>,
    ctx: &mut ParseContext<'_>,
) -> Option<DateRange> {
    let from = from.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(UNKNOWN);
    let to = to.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(OPEN);
    DateFormat::Ead3.parse_date_range(&format!("{from}/{to}"), ctx)
}
