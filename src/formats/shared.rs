//! Extractors used by more than one format table.

use regex::Captures;

use crate::instant::Role;
use crate::partial::PartialDate;
use crate::rules::{capture_component, capture_int, capture_str, Extraction, Outcome};

/// `from/to`, each side an ISO-like bound with optional wildcards.
pub(crate) fn iso_pair(caps: &Captures<'_>) -> Extraction {
    let (Some(from), Some(to)) = (capture_str(caps, 1), capture_str(caps, 2)) else {
        return Ok(None);
    };
    Ok(
        match (
            PartialDate::parse_iso(from, Role::Start),
            PartialDate::parse_iso(to, Role::End),
        ) {
            (Some(start), Some(end)) => Some(Outcome::Bounds { start, end }),
            _ => None,
        },
    )
}

/// A single ISO-like value used for both bounds.
pub(crate) fn iso_single(caps: &Captures<'_>) -> Extraction {
    let Some(text) = capture_str(caps, 1) else {
        return Ok(None);
    };
    Ok(
        match (
            PartialDate::parse_iso(text, Role::Start),
            PartialDate::parse_iso(text, Role::End),
        ) {
            (Some(start), Some(end)) => Some(Outcome::Bounds { start, end }),
            _ => None,
        },
    )
}

/// Two whole years in groups 1 and 2.
pub(crate) fn year_range(caps: &Captures<'_>) -> Extraction {
    Ok(Some(Outcome::years(
        capture_int(caps, 1)?,
        capture_int(caps, 2)?,
    )))
}

/// One whole year in group 1.
pub(crate) fn single_year(caps: &Captures<'_>) -> Extraction {
    let year = capture_int(caps, 1)?;
    Ok(Some(Outcome::years(year, year)))
}

/// Year, month and day in groups 1-3.
pub(crate) fn single_day(caps: &Captures<'_>) -> Extraction {
    Ok(Some(Outcome::single(PartialDate::of_day(
        capture_int(caps, 1)?,
        capture_component(caps, 2)?,
        capture_component(caps, 3)?,
    ))))
}

/// Year and month in groups 1-2.
pub(crate) fn single_month(caps: &Captures<'_>) -> Extraction {
    Ok(Some(Outcome::single(PartialDate::of_month(
        capture_int(caps, 1)?,
        capture_component(caps, 2)?,
    ))))
}
