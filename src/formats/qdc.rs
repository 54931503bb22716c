//! Qualified Dublin Core dates.
//!
//! `dc:date` and `dcterms:issued` values are mostly ISO 8601: a day, a month,
//! a year, or a `from/to` interval. Harvested repositories also produce
//! timestamps (`2004-05-06T12:00:00Z`) and free text containing a year.

use lazy_static::lazy_static;

use super::shared::{iso_pair, single_day, single_month, single_year, year_range};
use crate::rules::{Rule, RuleTable};

lazy_static! {
    /// QDC date rules, in evaluation order.
    pub static ref RULES: RuleTable = RuleTable::new(vec![
        Rule::new("iso-pair", r"^([0-9-]+)\s*/\s*([0-9-]+)$", iso_pair),
        Rule::new("iso-day", r"^(\d{4})-(\d{2})-(\d{2})(?:t.*)?$", single_day),
        // Anchored ranges must be tried before the embedded-year fallback.
        Rule::new("year-range", r"^(\d{4})\s*[-/]\s*(\d{4})$", year_range),
        Rule::new("iso-month", r"^(\d{4})-(\d{2})$", single_month),
        Rule::new("year", r"^(\d{4})$", single_year),
        Rule::new("embedded-range", r"\b(\d{4})\s*-\s*(\d{4})\b", year_range),
        Rule::new("embedded-year", r"\b(\d{4})\b", single_year),
    ]);
}
