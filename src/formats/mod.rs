//! Per-format date grammars.
//!
//! Every metadata format has its own ordered [`RuleTable`] reflecting where
//! and how that format writes dates. The tables share the same completion
//! and reconciliation primitives, so the calendar logic lives in one place
//! and the format-specific vocabulary is plain data.
//!
//! | Format | Module | Typical input |
//! |--------|--------|---------------|
//! | EAD    | [`ead`]  | `1985-02-02/1995-12-01`, `19uu/1950` |
//! | EAD3   | [`ead3`] | `unknown/open`, `1985/1995` |
//! | LIDO   | [`lido`] | `1930-luvun alkupuoli`, `150 ekr - 100 jkr` |
//! | QDC    | [`qdc`]  | `2004-05-06`, `1995-2000` |
//! | MARC   | [`marc`] | 008 positions 06-14 |
//!
//! # Examples
//!
//! ```
//! use recdates::context::{FixedClock, ParseContext};
//! use recdates::formats::DateFormat;
//! use recdates::warnings::WarningLog;
//!
//! let mut warnings = WarningLog::new();
//! let clock = FixedClock(2024);
//! let mut ctx = ParseContext::new("museo", "M1", &mut warnings, &clock);
//!
//! let range = DateFormat::Lido.parse_date_range("1930-luku", &mut ctx).unwrap();
//! assert_eq!(range.to_canonical_string(), "[1930-01-01 TO 1939-12-31]");
//! ```

pub mod ead;
pub mod ead3;
pub mod lido;
pub mod marc;
pub mod qdc;
pub(crate) mod shared;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::context::ParseContext;
use crate::error::DateError;
use crate::instant::Role;
use crate::range::{reconcile, DateRange};
use crate::rules::{Outcome, RuleTable};
use crate::warnings::WarningKind;

/// A metadata format with its own date grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// Encoded Archival Description 2002
    Ead,
    /// Encoded Archival Description 3
    Ead3,
    /// Lightweight Information Describing Objects
    Lido,
    /// Qualified Dublin Core
    Qdc,
    /// MARC 21 bibliographic (008 fixed-length data)
    Marc,
}

impl DateFormat {
    /// All formats.
    pub const ALL: [DateFormat; 5] = [
        DateFormat::Ead,
        DateFormat::Ead3,
        DateFormat::Lido,
        DateFormat::Qdc,
        DateFormat::Marc,
    ];

    /// Lower-case format name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DateFormat::Ead => "ead",
            DateFormat::Ead3 => "ead3",
            DateFormat::Lido => "lido",
            DateFormat::Qdc => "qdc",
            DateFormat::Marc => "marc",
        }
    }

    /// The format's ordered rule table.
    #[must_use]
    pub fn rules(self) -> &'static RuleTable {
        match self {
            DateFormat::Ead => &ead::RULES,
            DateFormat::Ead3 => &ead3::RULES,
            DateFormat::Lido => &lido::RULES,
            DateFormat::Qdc => &qdc::RULES,
            DateFormat::Marc => &marc::RULES,
        }
    }

    /// Apply the format's input normalization.
    #[must_use]
    pub fn normalize(self, raw: &str) -> String {
        match self {
            DateFormat::Ead | DateFormat::Ead3 | DateFormat::Qdc => raw.trim().to_lowercase(),
            DateFormat::Lido => lido::normalize(raw),
            // 008 is positional; only strip trailing newline noise.
            DateFormat::Marc => raw.trim_end_matches(['\r', '\n']).to_string(),
        }
    }

    /// Resolve a raw date expression into a validated range.
    ///
    /// Returns `None` when nothing in the input looks like a date, when the
    /// input explicitly says "undated", when the range lies in the future, or
    /// when the date is invalid. Only the last case reports a warning; an
    /// inverted range is repaired and reported instead of dropped.
    pub fn parse_date_range(self, raw: &str, ctx: &mut ParseContext<'_>) -> Option<DateRange> {
        if raw.trim().is_empty() {
            return None;
        }
        let input = self.normalize(raw);
        resolve(self.rules(), raw, &input, ctx)
    }

    /// Resolve separate earliest/latest expressions into one range.
    ///
    /// The start of the first and the end of the second are reconciled as a
    /// pair. A blank side leaves the other to stand on its own; a side that
    /// is present but does not resolve (future, invalid or not a date)
    /// rejects the whole pair.
    pub fn parse_date_pair(
        self,
        earliest: &str,
        latest: &str,
        ctx: &mut ParseContext<'_>,
    ) -> Option<DateRange> {
        let first = self.pair_side(earliest, ctx)?;
        let second = self.pair_side(latest, ctx)?;
        match (first, second) {
            (Some(a), Some(b)) => reconcile(
                a.start(),
                b.end(),
                a.start_unknown(),
                b.end_unknown(),
                &format!("{earliest} / {latest}"),
                ctx,
            ),
            (one, other) => one.or(other),
        }
    }

    /// `Some(None)` for a blank side, `None` for a side that failed.
    #[allow(clippy::option_option)]
    fn pair_side(self, raw: &str, ctx: &mut ParseContext<'_>) -> Option<Option<DateRange>> {
        if raw.trim().is_empty() {
            return Some(None);
        }
        self.parse_date_range(raw, ctx).map(Some)
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ead" => Ok(DateFormat::Ead),
            "ead3" => Ok(DateFormat::Ead3),
            "lido" => Ok(DateFormat::Lido),
            "qdc" | "dc" => Ok(DateFormat::Qdc),
            "marc" | "marcxml" => Ok(DateFormat::Marc),
            other => Err(format!("unknown metadata format: {other}")),
        }
    }
}

/// Run `input` through `table` and turn the outcome into a range.
///
/// `raw` is the untouched input, quoted in warnings.
pub(crate) fn resolve(
    table: &RuleTable,
    raw: &str,
    input: &str,
    ctx: &mut ParseContext<'_>,
) -> Option<DateRange> {
    match table.resolve(input) {
        Ok(Some(found)) => settle(found.outcome, raw, ctx),
        Ok(None) => None,
        Err(err) => {
            report(&err, raw, ctx);
            None
        },
    }
}

fn settle(outcome: Outcome, raw: &str, ctx: &mut ParseContext<'_>) -> Option<DateRange> {
    match outcome {
        Outcome::Undated => None,
        Outcome::Fixed(range) => Some(range),
        Outcome::Bounds { start, end } => {
            let start_instant = match start.complete(Role::Start) {
                Ok(instant) => instant,
                Err(err) => {
                    report(&err, raw, ctx);
                    return None;
                },
            };
            let end_instant = match end.complete(Role::End) {
                Ok(instant) => instant,
                Err(err) => {
                    report(&err, raw, ctx);
                    return None;
                },
            };
            reconcile(
                start_instant,
                end_instant,
                start.unknown,
                end.unknown,
                raw,
                ctx,
            )
        },
    }
}

fn report(err: &DateError, raw: &str, ctx: &mut ParseContext<'_>) {
    let kind: WarningKind = err.warning_kind();
    ctx.warn(kind, format!("{} (input: {raw})", err.value()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FixedClock;
    use crate::warnings::WarningLog;

    #[test]
    fn test_format_names_roundtrip() {
        for format in DateFormat::ALL {
            assert_eq!(format.name().parse::<DateFormat>().unwrap(), format);
        }
        assert!("mods".parse::<DateFormat>().is_err());
    }

    #[test]
    fn test_empty_input_is_silent() {
        let mut log = WarningLog::new();
        let clock = FixedClock(2024);
        let mut ctx = ParseContext::new("s", "r", &mut log, &clock);
        for format in DateFormat::ALL {
            assert!(format.parse_date_range("   ", &mut ctx).is_none());
        }
        assert!(log.is_empty());
    }

    #[test]
    fn test_invalid_day_warns_once() {
        let mut log = WarningLog::new();
        let clock = FixedClock(2024);
        let mut ctx = ParseContext::new("s", "r", &mut log, &clock);
        assert!(DateFormat::Ead
            .parse_date_range("1985-04-31/1990", &mut ctx)
            .is_none());
        assert_eq!(log.kinds(), vec![WarningKind::InvalidStartDate]);
        let warning = log.iter().next().unwrap();
        assert_eq!(warning.message, "1985-04-31 (input: 1985-04-31/1990)");
    }

    #[test]
    fn test_parse_date_pair_spans_both() {
        let mut log = WarningLog::new();
        let clock = FixedClock(2024);
        let mut ctx = ParseContext::new("s", "r", &mut log, &clock);
        let range = DateFormat::Lido
            .parse_date_pair("1930", "1945", &mut ctx)
            .unwrap();
        assert_eq!(range.to_canonical_string(), "[1930-01-01 TO 1945-12-31]");

        let range = DateFormat::Lido
            .parse_date_pair("", "1945", &mut ctx)
            .unwrap();
        assert_eq!(range.to_canonical_string(), "[1945-01-01 TO 1945-12-31]");
        assert!(log.is_empty());
    }

    #[test]
    fn test_parse_date_pair_future_side_rejects_pair() {
        let mut log = WarningLog::new();
        let clock = FixedClock(2024);
        let mut ctx = ParseContext::new("s", "r", &mut log, &clock);
        assert!(DateFormat::Lido
            .parse_date_pair("1990", "2030", &mut ctx)
            .is_none());
        assert!(DateFormat::Lido
            .parse_date_pair("2030", "1990", &mut ctx)
            .is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn test_parse_date_pair_invalid_side_rejects_pair() {
        let mut log = WarningLog::new();
        let clock = FixedClock(2024);
        {
            let mut ctx = ParseContext::new("s", "r", &mut log, &clock);
            assert!(DateFormat::Lido
                .parse_date_pair("30.2.1985", "1.5.1990", &mut ctx)
                .is_none());
        }
        assert_eq!(log.kinds(), vec![WarningKind::InvalidStartDate]);
    }

    #[test]
    fn test_parse_date_pair_blank_side_stands_alone() {
        let mut log = WarningLog::new();
        let clock = FixedClock(2024);
        let mut ctx = ParseContext::new("s", "r", &mut log, &clock);
        let range = DateFormat::Lido
            .parse_date_pair("1.5.1990", "  ", &mut ctx)
            .unwrap();
        assert_eq!(range.to_canonical_string(), "1990-05-01");
        assert!(DateFormat::Lido.parse_date_pair("", " ", &mut ctx).is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn test_format_serde_names() {
        let format: DateFormat = serde_json::from_str("\"ead3\"").unwrap();
        assert_eq!(format, DateFormat::Ead3);
        assert_eq!(serde_json::to_string(&DateFormat::Lido).unwrap(), "\"lido\"");
    }
}
