//! The flat, multi-valued field map handed to the search index.
//!
//! Keys keep their insertion order (like MARC tags in a record), which keeps
//! JSON output stable and easy to diff.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::instant::format_year;
use crate::range::DateRange;

/// Record identifier
pub const ID: &str = "id";
/// Display title, year range appended per policy
pub const TITLE: &str = "title";
/// Title as recorded
pub const TITLE_SHORT: &str = "title_short";
/// Format of the source record
pub const RECORD_FORMAT: &str = "record_format";
/// Data source identifier
pub const SOURCE: &str = "source_str_mv";
/// Every resolved range of the record, in canonical form
pub const SEARCH_DATERANGE_MV: &str = "search_daterange_mv";
/// Four-digit start year of the main range
pub const MAIN_DATE_STR: &str = "main_date_str";
/// Start year of the main range as an instant
pub const MAIN_DATE: &str = "main_date";
/// Archival unit date range (EAD, EAD3)
pub const UNIT_DATERANGE: &str = "unit_daterange";
/// Creation event date range (LIDO)
pub const CREATION_DATERANGE: &str = "creation_daterange";
/// Publication date range (QDC, MARC)
pub const PUBLICATION_DATERANGE: &str = "publication_daterange";

/// Ordered map of field name to values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap {
    fields: IndexMap<String, Vec<String>>,
}

impl FieldMap {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        FieldMap::default()
    }

    /// Append a value. Blank values are ignored.
    pub fn add(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        self.fields.entry(key.to_string()).or_default().push(value);
    }

    /// Append a value unless the key already holds it.
    pub fn add_unique(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if self.get(key).is_some_and(|values| values.contains(&value)) {
            return;
        }
        self.add(key, value);
    }

    /// Replace all values of `key`.
    pub fn set(&mut self, key: &str, values: Vec<String>) {
        let values: Vec<String> = values.into_iter().filter(|v| !v.trim().is_empty()).collect();
        if values.is_empty() {
            self.fields.shift_remove(key);
        } else {
            self.fields.insert(key.to_string(), values);
        }
    }

    /// All values of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.fields.get(key).map(Vec::as_slice)
    }

    /// First value of `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Whether `key` has any value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` if no key has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(key, values)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Record a resolved range under `key` and in
    /// [`SEARCH_DATERANGE_MV`].
    pub fn add_date_range(&mut self, key: &str, range: &DateRange) {
        let canonical = range.to_canonical_string();
        self.add_unique(key, canonical.clone());
        self.add_unique(SEARCH_DATERANGE_MV, canonical);
    }

    /// Set [`MAIN_DATE_STR`] and [`MAIN_DATE`] from the start of `range`.
    ///
    /// Nothing is written when the start is unknown or not after year 0.
    pub fn set_main_date(&mut self, range: &DateRange) {
        let year = range.start_year();
        if range.start_unknown() || year <= 0 {
            return;
        }
        let year = format_year(year);
        self.set(MAIN_DATE, vec![format!("{year}-01-01T00:00:00Z")]);
        self.set(MAIN_DATE_STR, vec![year]);
    }

    /// Serialize to a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut fields = FieldMap::new();
        fields.add(ID, "rec.1");
        fields.add(TITLE, "  ");
        fields.add("topic", "kartat");
        fields.add("topic", "kartat");
        assert_eq!(fields.first(ID), Some("rec.1"));
        assert!(!fields.contains_key(TITLE));
        assert_eq!(fields.get("topic").unwrap().len(), 2);
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_add_unique() {
        let mut fields = FieldMap::new();
        fields.add_unique("topic", "kartat");
        fields.add_unique("topic", "kartat");
        fields.add_unique("topic", "atlakset");
        assert_eq!(fields.get("topic").unwrap(), ["kartat", "atlakset"]);
    }

    #[test]
    fn test_set_replaces_and_removes() {
        let mut fields = FieldMap::new();
        fields.add("a", "1");
        fields.set("a", vec!["2".to_string(), "3".to_string()]);
        assert_eq!(fields.get("a").unwrap(), ["2", "3"]);
        fields.set("a", vec![]);
        assert!(fields.is_empty());
    }

    #[test]
    fn test_date_fields() {
        let mut fields = FieldMap::new();
        let range = DateRange::from_years(1931, 1943).unwrap();
        fields.add_date_range(CREATION_DATERANGE, &range);
        fields.add_date_range(CREATION_DATERANGE, &range);
        fields.set_main_date(&range);
        assert_eq!(
            fields.get(SEARCH_DATERANGE_MV).unwrap(),
            ["[1931-01-01 TO 1943-12-31]"]
        );
        assert_eq!(fields.first(MAIN_DATE_STR), Some("1931"));
        assert_eq!(fields.first(MAIN_DATE), Some("1931-01-01T00:00:00Z"));
    }

    #[test]
    fn test_main_date_skips_unknown_and_bce() {
        let mut fields = FieldMap::new();
        let open = DateRange::from_years(0, 9999)
            .unwrap()
            .with_unknown(true, true);
        fields.set_main_date(&open);
        fields.set_main_date(&DateRange::from_years(-100, -50).unwrap());
        assert!(!fields.contains_key(MAIN_DATE_STR));
        assert!(!fields.contains_key(MAIN_DATE));
    }

    #[test]
    fn test_json_keeps_insertion_order() {
        let mut fields = FieldMap::new();
        fields.add(ID, "x");
        fields.add(TITLE, "Otsikko");
        fields.add(SEARCH_DATERANGE_MV, "1960-01-01");
        assert_eq!(
            fields.to_json().unwrap(),
            r#"{"id":["x"],"title":["Otsikko"],"search_daterange_mv":["1960-01-01"]}"#
        );
        let back: FieldMap = serde_json::from_str(&fields.to_json().unwrap()).unwrap();
        assert_eq!(back, fields);
    }
}
