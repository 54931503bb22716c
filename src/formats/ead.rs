//! EAD 2002 unit dates.
//!
//! The preferred source is the `normal` attribute of `<unitdate>`, an ISO 8601
//! interval such as `1985-02-02/1995-12-01`. Cataloguers write unknown digits
//! as `u` or `x` (`19uu/1950`); those are resolved per bound, so the start
//! rounds down and the end rounds up. When only the display text is present
//! the plain `1985-1995` and single-year forms are recognized.

use lazy_static::lazy_static;

use super::shared::{iso_pair, iso_single, single_year, year_range};
use crate::rules::{Rule, RuleTable};

lazy_static! {
    /// EAD date rules, in evaluation order.
    pub static ref RULES: RuleTable = RuleTable::new(vec![
        Rule::new("iso-pair", r"^([^/\s]+)\s*/\s*([^/\s]+)$", iso_pair),
        // Must precede iso-single, which would read 1985-1995 as month 19, day 95.
        Rule::new("year-range", r"^(\d{4})\s*-\s*(\d{4})\.?$", year_range),
        Rule::new("iso-single", r"^(-?[0-9ux][0-9ux-]*(?:t\S*)?)$", iso_single),
        Rule::new("embedded-range", r"\b(\d{4})\s*-\s*(\d{4})\b", year_range),
        Rule::new("embedded-year", r"\b(\d{4})\b", single_year),
    ]);
}
