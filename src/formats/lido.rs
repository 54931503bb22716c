//! LIDO event dates.
//!
//! Museum records describe dates in free Finnish prose: `1930-luku`,
//! `1800-luvun loppupuoli`, `vuosien 1931 ja 1943 välillä`,
//! `150 ekr - 100 jkr`, `12. toukokuuta 1931`. The input is first
//! normalized (see [`normalize`]) so that the rule table only has to deal
//! with digits, dots, dashes and a handful of keywords.
//!
//! Named prehistoric periods map straight to fixed ranges and "undated"
//! vocabulary maps to no date at all.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

use super::shared::{single_day, single_month, single_year};
use crate::instant::Role;
use crate::partial::{expand_abbreviated_year, shorthand_span, PartialDate, Period};
use crate::range::DateRange;
use crate::rules::{
    capture_component, capture_int, capture_str, Extraction, Outcome, Rule, RuleTable,
};

/// Named periods of Finnish prehistory and their fixed year spans.
const ERAS: [(&str, i32, i32); 4] = [
    ("kivikau", -8600, -1500),
    ("pronssikau", -1500, -500),
    ("rautakau", -500, 1300),
    ("keskia", 1300, 1550),
];

const FINNISH_MONTHS: [&str; 12] = [
    "tammi", "helmi", "maalis", "huhti", "touko", "kesä", "heinä", "elo", "syys", "loka",
    "marras", "joulu",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

lazy_static! {
    static ref DASHES: Regex = Regex::new(r"[\u{2010}-\u{2015}\u{2212}]").unwrap();
    static ref BCE: Regex = Regex::new(r"\b(?:e\.\s?kr|eaa|ekr|bce|bc)\b\.?").unwrap();
    static ref CE: Regex = Regex::new(r"\b(?:j\.\s?kr|jaa|jkr)\b\.?").unwrap();
    static ref FINNISH_MONTH: Regex = Regex::new(
        r"\b(tammi|helmi|maalis|huhti|touko|kesä|heinä|elo|syys|loka|marras|joulu)kuu\w*"
    )
    .unwrap();
    static ref ENGLISH_MONTH: Regex = Regex::new(
        r"\b(january|february|march|april|may|june|july|august|september|october|november|december)\b"
    )
    .unwrap();
    static ref APPROXIMATE: Regex = Regex::new(
        r"\b(?:noin|n\.|ca\.|ca\b|c\.|circa|vuonna|vuosina|vuosien|vuoden|vuotta|välillä|arviolta)"
    )
    .unwrap();
    static ref BEFORE: Regex = Regex::new(r"\b(?:ennen|viimeistään|before)\b").unwrap();
    static ref AFTER: Regex = Regex::new(r"\b(?:jälkeen|after)\b").unwrap();
    static ref BRACKETS: Regex = Regex::new(r"[\[\]()?]").unwrap();
    static ref BETWEEN: Regex = Regex::new(r"(\d)\s+(?:ja|and)\s+(\d)").unwrap();
    static ref DASH_SPACING: Regex = Regex::new(r"\s*-\s*").unwrap();
    static ref SPACES: Regex = Regex::new(r"\s+").unwrap();

    /// LIDO date rules, in evaluation order.
    pub static ref RULES: RuleTable = RuleTable::new(vec![
        Rule::new("undated", r"\b(ajoittamaton|tuntematon|ajoittamattomissa)", undated),
        Rule::new("before-year", r"^ennen (\d{1,4})$", before_year),
        Rule::new("after-year", r"^(\d{1,4}) jälkeen$", after_year),
        // Any other open-ended wording would lose its direction below.
        Rule::new("open-ended", r"\b(?:ennen|jälkeen)\b", undated),
        Rule::new("signed-iso", r"^-(\d{1,4})(?:-(\d{1,2})-(\d{1,2}))?$", signed_iso),
        // Day ranges must come before year ranges, which would read
        // 1.2.1931-3.4.1932 as 1931-1933.
        Rule::new(
            "day-range",
            r"(\d{1,2})\.\s*(\d{1,2})\.\s*(\d{4})-(\d{1,2})\.\s*(\d{1,2})\.\s*(\d{4})",
            day_range,
        ),
        Rule::new(
            "iso-day-range",
            r"(\d{4})-(\d{1,2})-(\d{1,2})\s*[-/]\s*(\d{4})-(\d{1,2})-(\d{1,2})",
            iso_day_range,
        ),
        Rule::new("month-range", r"(\d{1,2})\.\s*(\d{4})-(\d{1,2})\.\s*(\d{4})", month_range),
        Rule::new("day", r"(\d{1,2})\.\s*(\d{1,2})\.\s*(\d{4})", day),
        Rule::new("iso-day", r"(\d{4})-(\d{1,2})-(\d{1,2})", single_day),
        Rule::new("month", r"(\d{1,2})\.\s*(\d{4})", month),
        Rule::new(
            "qualified-shorthand",
            r"(?:^|[^\d-])(\d{1,4})-?(?:lu(?:ku|vu\w*)|l\b\.?)\s*(\w+)",
            qualified_shorthand,
        ),
        // Must come before the single shorthand, which would match only the 40-luku
        // part of 1930-40-luku.
        Rule::new(
            "shorthand-range",
            r"(\d{1,4})-(\d{1,4})-?(?:lu(?:ku|vu\w*)|l\b)",
            shorthand_range,
        ),
        Rule::new("shorthand", r"(\d{1,4})-?(?:lu(?:ku|vu\w*)|l\b)", shorthand),
        Rule::new(
            "era-range",
            r"(\d{1,4})\s*(ekr|jkr)?-(\d{1,4})\s*(ekr|jkr)?",
            era_range,
        ),
        Rule::new("era-year", r"(\d{1,4})\s*(ekr|jkr)", era_year),
        Rule::new("iso-month", r"\b(\d{4})-(0[1-9]|1[0-2])\b", single_month),
        Rule::new("year-range", r"(\d{1,4})-(\d{1,4})", year_range),
        Rule::new("year", r"(\d{4})", single_year),
        Rule::new("short-year", r"^(\d{1,3})$", single_year),
        // Last, so that an explicit year wins over a period name next to it.
        Rule::new("era", r"(kivikau|pronssikau|rautakau|keskia(?:ik|j))", era),
    ]);
}

/// Lower-case and simplify a LIDO date expression for rule matching.
///
/// Dash variants become `-`, era spellings become `ekr`/`jkr`, month names
/// become `N.`, approximation words and brackets are dropped, and
/// `X ja Y` between numbers becomes `X-Y`. Words for "before" and "after"
/// are kept as `ennen` and `jälkeen`.
///
/// ```
/// use recdates::formats::lido::normalize;
///
/// assert_eq!(normalize("Vuosien 1931 ja 1943 välillä"), "1931-1943");
/// assert_eq!(normalize("150 e.Kr. – 100 j.Kr."), "150 ekr-100 jkr");
/// assert_eq!(normalize("12. toukokuuta 1931"), "12. 5. 1931");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let text = raw.nfc().collect::<String>().to_lowercase();
    let text = DASHES.replace_all(&text, "-");
    let text = BCE.replace_all(&text, " ekr ");
    let text = CE.replace_all(&text, " jkr ");
    let text = FINNISH_MONTH.replace_all(&text, |caps: &Captures<'_>| {
        month_token(&FINNISH_MONTHS, &caps[1])
    });
    let text = ENGLISH_MONTH.replace_all(&text, |caps: &Captures<'_>| {
        month_token(&ENGLISH_MONTHS, &caps[1])
    });
    let text = BEFORE.replace_all(&text, " ennen ");
    let text = AFTER.replace_all(&text, " jälkeen ");
    let text = APPROXIMATE.replace_all(&text, " ");
    let text = BRACKETS.replace_all(&text, "");
    let text = BETWEEN.replace_all(&text, "${1}-${2}");
    let text = DASH_SPACING.replace_all(&text, "-");
    let text = SPACES.replace_all(&text, " ");
    text.trim().trim_end_matches(['.', ',']).trim().to_string()
}

fn month_token(names: &[&str; 12], name: &str) -> String {
    names
        .iter()
        .position(|n| *n == name)
        .map_or_else(|| name.to_string(), |i| format!("{}.", i + 1))
}

fn era(caps: &Captures<'_>) -> Extraction {
    let word = capture_str(caps, 1).unwrap_or_default();
    Ok(ERAS
        .iter()
        .find(|(prefix, _, _)| word.starts_with(prefix))
        .and_then(|&(_, first, last)| DateRange::from_years(first, last))
        .map(Outcome::Fixed))
}

fn undated(_: &Captures<'_>) -> Extraction {
    Ok(Some(Outcome::Undated))
}

fn before_year(caps: &Captures<'_>) -> Extraction {
    Ok(Some(Outcome::Bounds {
        start: PartialDate::unknown(Role::Start),
        end: PartialDate::of_year(capture_int(caps, 1)?),
    }))
}

fn after_year(caps: &Captures<'_>) -> Extraction {
    Ok(Some(Outcome::Bounds {
        start: PartialDate::of_year(capture_int(caps, 1)?),
        end: PartialDate::unknown(Role::End),
    }))
}

fn signed_iso(caps: &Captures<'_>) -> Extraction {
    let year = -capture_int(caps, 1)?;
    if capture_str(caps, 2).is_none() {
        return Ok(Some(Outcome::years(year, year)));
    }
    Ok(Some(Outcome::single(PartialDate::of_day(
        year,
        capture_component(caps, 2)?,
        capture_component(caps, 3)?,
    ))))
}

fn day_range(caps: &Captures<'_>) -> Extraction {
    Ok(Some(Outcome::Bounds {
        start: PartialDate::of_day(
            capture_int(caps, 3)?,
            capture_component(caps, 2)?,
            capture_component(caps, 1)?,
        ),
        end: PartialDate::of_day(
            capture_int(caps, 6)?,
            capture_component(caps, 5)?,
            capture_component(caps, 4)?,
        ),
    }))
}

fn iso_day_range(caps: &Captures<'_>) -> Extraction {
    Ok(Some(Outcome::Bounds {
        start: PartialDate::of_day(
            capture_int(caps, 1)?,
            capture_component(caps, 2)?,
            capture_component(caps, 3)?,
        ),
        end: PartialDate::of_day(
            capture_int(caps, 4)?,
            capture_component(caps, 5)?,
            capture_component(caps, 6)?,
        ),
    }))
}

fn month_range(caps: &Captures<'_>) -> Extraction {
    Ok(Some(Outcome::Bounds {
        start: PartialDate::of_month(capture_int(caps, 2)?, capture_component(caps, 1)?),
        end: PartialDate::of_month(capture_int(caps, 4)?, capture_component(caps, 3)?),
    }))
}

fn day(caps: &Captures<'_>) -> Extraction {
    Ok(Some(Outcome::single(PartialDate::of_day(
        capture_int(caps, 3)?,
        capture_component(caps, 2)?,
        capture_component(caps, 1)?,
    ))))
}

fn month(caps: &Captures<'_>) -> Extraction {
    Ok(Some(Outcome::single(PartialDate::of_month(
        capture_int(caps, 2)?,
        capture_component(caps, 1)?,
    ))))
}

fn qualified_shorthand(caps: &Captures<'_>) -> Extraction {
    let Some(period) = capture_str(caps, 2).and_then(Period::from_qualifier) else {
        return Ok(None);
    };
    let (first, last) = shorthand_span(capture_int(caps, 1)?, period);
    Ok(Some(Outcome::years(first, last)))
}

fn shorthand_range(caps: &Captures<'_>) -> Extraction {
    let (Some(first), Some(second)) = (capture_str(caps, 1), capture_str(caps, 2)) else {
        return Ok(None);
    };
    let Some(second) = expand_abbreviated_year(first, second) else {
        return Ok(None);
    };
    let (start, _) = shorthand_span(capture_int(caps, 1)?, Period::Whole);
    let (_, end) = shorthand_span(second, Period::Whole);
    Ok(Some(Outcome::years(start, end)))
}

fn shorthand(caps: &Captures<'_>) -> Extraction {
    let (first, last) = shorthand_span(capture_int(caps, 1)?, Period::Whole);
    Ok(Some(Outcome::years(first, last)))
}

fn signed(year: i32, era: Option<&str>) -> i32 {
    if era == Some("ekr") {
        -year
    } else {
        year
    }
}

fn era_range(caps: &Captures<'_>) -> Extraction {
    let first_era = capture_str(caps, 2);
    let second_era = capture_str(caps, 4);
    if first_era.is_none() && second_era.is_none() {
        return Ok(None);
    }
    // A bound without an era takes the other bound's era.
    let first = signed(capture_int(caps, 1)?, first_era.or(second_era));
    let second = signed(capture_int(caps, 3)?, second_era.or(first_era));
    Ok(Some(Outcome::years(first, second)))
}

fn era_year(caps: &Captures<'_>) -> Extraction {
    let year = signed(capture_int(caps, 1)?, capture_str(caps, 2));
    Ok(Some(Outcome::years(year, year)))
}

fn year_range(caps: &Captures<'_>) -> Extraction {
    let (Some(first), Some(second)) = (capture_str(caps, 1), capture_str(caps, 2)) else {
        return Ok(None);
    };
    let Some(second) = expand_abbreviated_year(first, second) else {
        return Ok(None);
    };
    Ok(Some(Outcome::years(capture_int(caps, 1)?, second)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{FixedClock, ParseContext};
    use crate::formats::DateFormat;
    use crate::warnings::{WarningKind, WarningLog};

    fn parse(input: &str) -> Option<String> {
        parse_logged(input).0
    }

    fn parse_logged(input: &str) -> (Option<String>, WarningLog) {
        let mut log = WarningLog::new();
        let clock = FixedClock(2024);
        let result = {
            let mut ctx = ParseContext::new("museo", "L1", &mut log, &clock);
            DateFormat::Lido
                .parse_date_range(input, &mut ctx)
                .map(|r| r.to_canonical_string())
        };
        (result, log)
    }

    fn rule_for(input: &str) -> &'static str {
        RULES.resolve(&normalize(input)).unwrap().unwrap().rule
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  1930 – 1940  "), "1930-1940");
        assert_eq!(normalize("n. 1930"), "1930");
        assert_eq!(normalize("noin 1930-luvulla"), "1930-luvulla");
        assert_eq!(normalize("[1930?]"), "1930");
        assert_eq!(normalize("toukokuu 1931"), "5. 1931");
        assert_eq!(normalize("May 1931"), "5. 1931");
        assert_eq!(normalize("100 eaa."), "100 ekr");
    }

    #[test]
    fn test_single_year() {
        assert_eq!(parse("1931").as_deref(), Some("[1931-01-01 TO 1931-12-31]"));
        assert_eq!(parse("vuonna 1931").as_deref(), Some("[1931-01-01 TO 1931-12-31]"));
        assert_eq!(parse("850").as_deref(), Some("[0850-01-01 TO 0850-12-31]"));
    }

    #[test]
    fn test_year_ranges() {
        assert_eq!(
            parse("1931-1943").as_deref(),
            Some("[1931-01-01 TO 1943-12-31]")
        );
        assert_eq!(
            parse("vuosien 1931 ja 1943 välillä").as_deref(),
            Some("[1931-01-01 TO 1943-12-31]")
        );
        assert_eq!(
            parse("1931-43").as_deref(),
            Some("[1931-01-01 TO 1943-12-31]")
        );
    }

    #[test]
    fn test_decades_and_centuries() {
        assert_eq!(
            parse("1930-luku").as_deref(),
            Some("[1930-01-01 TO 1939-12-31]")
        );
        assert_eq!(
            parse("1930-luvulta").as_deref(),
            Some("[1930-01-01 TO 1939-12-31]")
        );
        assert_eq!(
            parse("1930-l.").as_deref(),
            Some("[1930-01-01 TO 1939-12-31]")
        );
        assert_eq!(
            parse("1900-luku").as_deref(),
            Some("[1900-01-01 TO 1999-12-31]")
        );
    }

    #[test]
    fn test_qualified_shorthand_is_narrower() {
        assert_eq!(
            parse("1930-luku alkupuoli").as_deref(),
            Some("[1930-01-01 TO 1933-12-31]")
        );
        assert_eq!(
            parse("1930-luvun alkupuolella").as_deref(),
            Some("[1930-01-01 TO 1933-12-31]")
        );
        assert_eq!(
            parse("1950-luvun puolivälissä").as_deref(),
            Some("[1953-01-01 TO 1957-12-31]")
        );
        assert_eq!(
            parse("1930-luvun loppupuoli").as_deref(),
            Some("[1937-01-01 TO 1939-12-31]")
        );
        assert_eq!(
            parse("1800-l. loppupuolella").as_deref(),
            Some("[1870-01-01 TO 1890-12-31]")
        );
    }

    #[test]
    fn test_shorthand_ranges() {
        assert_eq!(
            parse("1930-40-luku").as_deref(),
            Some("[1930-01-01 TO 1949-12-31]")
        );
        assert_eq!(
            parse("1920-1930-luvuilla").as_deref(),
            Some("[1920-01-01 TO 1939-12-31]")
        );
        assert_eq!(
            parse("30-40-luku").as_deref(),
            Some("[0030-01-01 TO 0049-12-31]")
        );
    }

    #[test]
    fn test_shorthand_range_precedes_single_shorthand() {
        assert_eq!(rule_for("1930-40-luku"), "shorthand-range");
        assert!(RULES.position("shorthand-range") < RULES.position("shorthand"));
        // On its own the shorthand rule only sees the 40-luku.
        let partial = RULES.rule("shorthand").unwrap().apply("1930-40-luku").unwrap();
        assert_eq!(partial, Some(Outcome::years(40, 49)));
    }

    #[test]
    fn test_bce_ranges() {
        assert_eq!(
            parse("100 ekr - 50 ekr").as_deref(),
            Some("[-0100-01-01 TO -0050-12-31]")
        );
        assert_eq!(
            parse("150 ekr - 100 jkr").as_deref(),
            Some("[-0150-01-01 TO 0100-12-31]")
        );
        assert_eq!(
            parse("100-50 eKr.").as_deref(),
            Some("[-0100-01-01 TO -0050-12-31]")
        );
        assert_eq!(
            parse("500 e.Kr.").as_deref(),
            Some("[-0500-01-01 TO -0500-12-31]")
        );
        assert_eq!(
            parse("-0025").as_deref(),
            Some("[-0025-01-01 TO -0025-12-31]")
        );
    }

    #[test]
    fn test_era_range_precedes_year_range() {
        assert_eq!(rule_for("100-50 ekr"), "era-range");
        let plain = RULES.rule("year-range").unwrap().apply("100-50 ekr").unwrap();
        assert_eq!(plain, Some(Outcome::years(100, 150)));
    }

    #[test]
    fn test_days_and_months() {
        assert_eq!(parse("12.5.1931").as_deref(), Some("1931-05-12"));
        assert_eq!(parse("12. toukokuuta 1931").as_deref(), Some("1931-05-12"));
        assert_eq!(parse("1931-05-12").as_deref(), Some("1931-05-12"));
        assert_eq!(
            parse("toukokuu 1931").as_deref(),
            Some("[1931-05-01 TO 1931-05-31]")
        );
        assert_eq!(
            parse("2.1960").as_deref(),
            Some("[1960-02-01 TO 1960-02-29]")
        );
        assert_eq!(
            parse("1931-05").as_deref(),
            Some("[1931-05-01 TO 1931-05-31]")
        );
    }

    #[test]
    fn test_day_and_month_ranges() {
        assert_eq!(
            parse("1.2.1931-3.4.1932").as_deref(),
            Some("[1931-02-01 TO 1932-04-03]")
        );
        assert_eq!(
            parse("1931-02-01 - 1932-04-03").as_deref(),
            Some("[1931-02-01 TO 1932-04-03]")
        );
        assert_eq!(
            parse("toukokuu 1931 - kesäkuu 1932").as_deref(),
            Some("[1931-05-01 TO 1932-06-30]")
        );
    }

    #[test]
    fn test_day_range_precedes_year_range() {
        assert_eq!(rule_for("1.2.1931-3.4.1932"), "day-range");
        let misread = RULES
            .rule("year-range")
            .unwrap()
            .apply("1.2.1931-3.4.1932")
            .unwrap();
        assert_eq!(misread, Some(Outcome::years(1931, 1933)));
    }

    #[test]
    fn test_prehistoric_eras() {
        assert_eq!(
            parse("kivikausi").as_deref(),
            Some("[-8600-01-01 TO -1500-12-31]")
        );
        assert_eq!(
            parse("Pronssikausi").as_deref(),
            Some("[-1500-01-01 TO -0500-12-31]")
        );
        assert_eq!(
            parse("myöhäinen rautakausi").as_deref(),
            Some("[-0500-01-01 TO 1300-12-31]")
        );
        assert_eq!(
            parse("keskiaika").as_deref(),
            Some("[1300-01-01 TO 1550-12-31]")
        );
        assert_eq!(
            parse("keskiajalla").as_deref(),
            Some("[1300-01-01 TO 1550-12-31]")
        );
    }

    #[test]
    fn test_era_compounds_and_explicit_years() {
        assert_eq!(
            parse("myöhäisrautakausi").as_deref(),
            Some("[-0500-01-01 TO 1300-12-31]")
        );
        assert_eq!(
            parse("varhaiskeskiaika").as_deref(),
            Some("[1300-01-01 TO 1550-12-31]")
        );
        assert_eq!(
            parse("1450 (keskiaika)").as_deref(),
            Some("[1450-01-01 TO 1450-12-31]")
        );
        assert_eq!(rule_for("1450 (keskiaika)"), "year");
    }

    #[test]
    fn test_before_and_after() {
        assert_eq!(normalize("Ennen vuotta 1900"), "ennen 1900");
        assert_eq!(normalize("vuoden 1900 jälkeen"), "1900 jälkeen");
        assert_eq!(normalize("viimeistään 1900"), "ennen 1900");

        let (range, log) = parse_logged("ennen 1900");
        assert_eq!(range.as_deref(), Some("[0000-01-01 TO 1900-12-31]"));
        assert!(log.is_empty());
        assert_eq!(
            parse("1900 jälkeen").as_deref(),
            Some("[1900-01-01 TO 9999-12-31]")
        );

        let mut log = WarningLog::new();
        let clock = FixedClock(2024);
        let mut ctx = ParseContext::new("museo", "L1", &mut log, &clock);
        let before = DateFormat::Lido
            .parse_date_range("ennen 1900", &mut ctx)
            .unwrap();
        assert!(before.start_unknown() && !before.end_unknown());
        let after = DateFormat::Lido
            .parse_date_range("1900 jälkeen", &mut ctx)
            .unwrap();
        assert!(!after.start_unknown() && after.end_unknown());
    }

    #[test]
    fn test_other_open_ended_wording_declines() {
        assert!(parse("1930-luvun jälkeen").is_none());
        assert!(parse("ennen 12.5.1931").is_none());
        assert!(parse("2030 jälkeen").is_none());
    }

    #[test]
    fn test_undated_vocabulary() {
        let (range, log) = parse_logged("ajoittamaton");
        assert!(range.is_none());
        assert!(log.is_empty());
        assert!(parse("Tuntematon").is_none());
    }

    #[test]
    fn test_future_rejection() {
        let (range, log) = parse_logged("2000-luku");
        assert!(range.is_none());
        assert!(log.is_empty());
        assert!(parse("2030").is_none());
    }

    #[test]
    fn test_inversion_repair() {
        let (range, log) = parse_logged("2013-1943");
        assert_eq!(range.as_deref(), Some("[2013-01-01 TO 2013-12-31]"));
        assert_eq!(log.kinds(), vec![WarningKind::InvalidDateRange]);
    }

    #[test]
    fn test_invalid_day_is_reported() {
        let (range, log) = parse_logged("31.4.1931");
        assert!(range.is_none());
        assert_eq!(log.kinds(), vec![WarningKind::InvalidStartDate]);
    }

    #[test]
    fn test_no_date() {
        let (range, log) = parse_logged("valmistaja tiedossa");
        assert!(range.is_none());
        assert!(log.is_empty());
    }
}
