//! Ordered pattern tables for recognizing date expressions.
//!
//! A [`RuleTable`] is an ordered list of [`Rule`]s. Each rule pairs a regular
//! expression with an extractor that turns the captures into an [`Outcome`].
//! [`RuleTable::resolve`] returns the outcome of the first rule that both
//! matches and accepts its captures.
//!
//! Rule order matters: patterns overlap (a `d.m.yyyy-d.m.yyyy` range contains
//! a `yyyy-d` that a plain year range would happily consume), so tables are
//! written most-specific first and each overlap is pinned by a test in the
//! owning format module.

use std::fmt;

use regex::{Captures, Regex};

use crate::error::DateError;
use crate::partial::PartialDate;
use crate::range::DateRange;

/// What a matching rule produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Bounds still to be completed and reconciled.
    Bounds {
        /// Lower bound
        start: PartialDate,
        /// Upper bound
        end: PartialDate,
    },
    /// A fixed range from literal vocabulary.
    Fixed(DateRange),
    /// The input explicitly says there is no date.
    Undated,
}

impl Outcome {
    /// Both bounds taken from the same partial date.
    #[must_use]
    pub const fn single(date: PartialDate) -> Self {
        Outcome::Bounds {
            start: date,
            end: date,
        }
    }

    /// Whole years `first` through `last`.
    #[must_use]
    pub const fn years(first: i32, last: i32) -> Self {
        Outcome::Bounds {
            start: PartialDate::of_year(first),
            end: PartialDate::of_year(last),
        }
    }
}

/// Result of an extractor: `Ok(None)` declines and lets later rules try.
pub type Extraction = Result<Option<Outcome>, DateError>;

/// Turns the captures of a matching pattern into an outcome.
pub type Extractor = fn(&Captures<'_>) -> Extraction;

/// One named pattern/extractor pair.
pub struct Rule {
    name: &'static str,
    pattern: Regex,
    extract: Extractor,
}

impl Rule {
    /// Create a rule.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression. Rule tables are
    /// static, so this surfaces on first use of the table.
    #[must_use]
    pub fn new(name: &'static str, pattern: &str, extract: Extractor) -> Self {
        Rule {
            name,
            pattern: Regex::new(pattern).unwrap(),
            extract,
        }
    }

    /// Rule name, used in logs and tests.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Try this rule alone against `input`.
    ///
    /// # Errors
    ///
    /// Returns the extractor's error if the pattern matched but the captured
    /// components are unusable.
    pub fn apply(&self, input: &str) -> Extraction {
        match self.pattern.captures(input) {
            Some(caps) => (self.extract)(&caps),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// The rule that fired and what it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    /// Name of the matching rule
    pub rule: &'static str,
    /// Extracted outcome
    pub outcome: Outcome,
}

/// An ordered list of rules.
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Create a table; rules are tried in the given order.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleTable { rules }
    }

    /// Find the first rule that matches and accepts `input`.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first extractor error.
    pub fn resolve(&self, input: &str) -> Result<Option<RuleMatch>, DateError> {
        for rule in &self.rules {
            if let Some(outcome) = rule.apply(input)? {
                tracing::trace!(rule = rule.name, input, "date rule matched");
                return Ok(Some(RuleMatch {
                    rule: rule.name,
                    outcome,
                }));
            }
        }
        Ok(None)
    }

    /// Look up a rule by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Rule names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }

    /// Position of a rule in the evaluation order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.name == name)
    }
}

/// Read capture group `index` as an integer.
///
/// # Errors
///
/// Returns [`DateError::Unparseable`] if the group is missing or not a number.
pub fn capture_int(caps: &Captures<'_>, index: usize) -> Result<i32, DateError> {
    let text = caps.get(index).map_or("", |m| m.as_str());
    text.trim()
        .parse()
        .map_err(|_| DateError::Unparseable(caps.get(0).map_or("", |m| m.as_str()).to_string()))
}

/// Read capture group `index` as a month or day number.
///
/// # Errors
///
/// Returns [`DateError::Unparseable`] if the group is missing or not a number.
pub fn capture_component(caps: &Captures<'_>, index: usize) -> Result<u32, DateError> {
    let text = caps.get(index).map_or("", |m| m.as_str());
    text.trim()
        .parse()
        .map_err(|_| DateError::Unparseable(caps.get(0).map_or("", |m| m.as_str()).to_string()))
}

/// Capture group `index` as text, if present and non-empty.
#[must_use]
pub fn capture_str<'t>(caps: &Captures<'t>, index: usize) -> Option<&'t str> {
    caps.get(index).map(|m| m.as_str()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year_rule(caps: &Captures<'_>) -> Extraction {
        let year = capture_int(caps, 1)?;
        Ok(Some(Outcome::years(year, year)))
    }

    fn range_rule(caps: &Captures<'_>) -> Extraction {
        Ok(Some(Outcome::years(
            capture_int(caps, 1)?,
            capture_int(caps, 2)?,
        )))
    }

    fn declining_rule(_: &Captures<'_>) -> Extraction {
        Ok(None)
    }

    fn failing_rule(caps: &Captures<'_>) -> Extraction {
        Err(DateError::Unparseable(caps[0].to_string()))
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let table = RuleTable::new(vec![
            Rule::new("range", r"(\d{4})-(\d{4})", range_rule),
            Rule::new("year", r"(\d{4})", year_rule),
        ]);
        let m = table.resolve("1931-1943").unwrap().unwrap();
        assert_eq!(m.rule, "range");
        assert_eq!(m.outcome, Outcome::years(1931, 1943));

        let m = table.resolve("1931").unwrap().unwrap();
        assert_eq!(m.rule, "year");
    }

    #[test]
    fn test_reordering_changes_result() {
        let table = RuleTable::new(vec![
            Rule::new("year", r"(\d{4})", year_rule),
            Rule::new("range", r"(\d{4})-(\d{4})", range_rule),
        ]);
        let m = table.resolve("1931-1943").unwrap().unwrap();
        assert_eq!(m.rule, "year");
        assert_eq!(m.outcome, Outcome::years(1931, 1931));
    }

    #[test]
    fn test_declining_rule_falls_through() {
        let table = RuleTable::new(vec![
            Rule::new("decline", r"\d+", declining_rule),
            Rule::new("year", r"(\d{4})", year_rule),
        ]);
        assert_eq!(table.resolve("1931").unwrap().unwrap().rule, "year");
    }

    #[test]
    fn test_extractor_error_stops_resolution() {
        let table = RuleTable::new(vec![
            Rule::new("fail", r"x(\d+)", failing_rule),
            Rule::new("year", r"(\d{4})", year_rule),
        ]);
        assert!(table.resolve("x1931").is_err());
        assert!(table.resolve("1931").unwrap().is_some());
    }

    #[test]
    fn test_no_match() {
        let table = RuleTable::new(vec![Rule::new("year", r"(\d{4})", year_rule)]);
        assert_eq!(table.resolve("ei päivämäärää").unwrap(), None);
    }

    #[test]
    fn test_lookup_helpers() {
        let table = RuleTable::new(vec![
            Rule::new("range", r"(\d{4})-(\d{4})", range_rule),
            Rule::new("year", r"(\d{4})", year_rule),
        ]);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["range", "year"]);
        assert_eq!(table.position("year"), Some(1));
        let rule = table.rule("range").unwrap();
        assert_eq!(rule.name(), "range");
        assert_eq!(
            rule.apply("1900-1910").unwrap(),
            Some(Outcome::years(1900, 1910))
        );
        assert_eq!(rule.apply("1900").unwrap(), None);
    }
}
