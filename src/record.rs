//! MARC bibliographic record structures.
//!
//! Only what the MARC driver reads is modelled:
//! - [`Record`]: leader, control fields and data fields
//! - [`Field`]: a data field (010+) with indicators
//! - [`Subfield`]: a coded value within a field
//!
//! # Examples
//!
//! ```
//! use recdates::record::{Field, Record};
//!
//! let mut record = Record::new("00000nam a2200000 a 4500");
//! record.add_control_field("001", "12345");
//! record.add_control_field("008", "850101s1985    fi ||||| |||||||||||fin|c");
//!
//! let mut field = Field::new("245", '1', '0');
//! field.add_subfield('a', "Kartasto /");
//! record.add_field(field);
//!
//! assert_eq!(record.control_number(), Some("12345"));
//! assert_eq!(record.title().as_deref(), Some("Kartasto"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Punctuation ISBD leaves at the end of title subfields.
const TRAILING_PUNCTUATION: &[char] = &[' ', '/', ':', ';', ',', '.', '='];

/// A MARC bibliographic record
///
/// Fields are stored in insertion order using `IndexMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record leader (24 characters)
    pub leader: String,
    /// Control fields (000-009) - tag -> value
    pub control_fields: IndexMap<String, String>,
    /// Data fields (010+) - tag -> fields
    pub fields: IndexMap<String, Vec<Field>>,
}

/// A data field in a MARC record (fields 010 and higher)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field tag (3 digits)
    pub tag: String,
    /// First indicator
    pub indicator1: char,
    /// Second indicator
    pub indicator2: char,
    /// Subfields (stored in `SmallVec` to avoid allocation for typical fields with 4 or fewer subfields)
    pub subfields: SmallVec<[Subfield; 4]>,
}

/// A subfield within a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character)
    pub code: char,
    /// Subfield value
    pub value: String,
}

impl Record {
    /// Create an empty record with the given leader
    #[must_use]
    pub fn new(leader: impl Into<String>) -> Self {
        Record {
            leader: leader.into(),
            control_fields: IndexMap::new(),
            fields: IndexMap::new(),
        }
    }

    /// Add a control field (000-009)
    pub fn add_control_field(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        self.control_fields.insert(tag.into(), value.into());
    }

    /// Get a control field value
    #[must_use]
    pub fn get_control_field(&self, tag: &str) -> Option<&str> {
        self.control_fields.get(tag).map(String::as_str)
    }

    /// Add a data field
    pub fn add_field(&mut self, field: Field) {
        self.fields
            .entry(field.tag.clone())
            .or_default()
            .push(field);
    }

    /// Get first field with a given tag
    #[must_use]
    pub fn get_field(&self, tag: &str) -> Option<&Field> {
        self.fields.get(tag).and_then(|v| v.first())
    }

    /// Iterate over fields matching a specific tag
    pub fn fields_by_tag(&self, tag: &str) -> impl Iterator<Item = &Field> {
        self.fields.get(tag).map(|v| v.iter()).into_iter().flatten()
    }

    /// Control number (001)
    #[must_use]
    pub fn control_number(&self) -> Option<&str> {
        self.get_control_field("001")
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Fixed-length data elements (008)
    #[must_use]
    pub fn fixed_data(&self) -> Option<&str> {
        self.get_control_field("008")
    }

    /// Title proper and remainder (245 `$a` `$b`), without trailing ISBD punctuation
    #[must_use]
    pub fn title(&self) -> Option<String> {
        let field = self.get_field("245")?;
        let title = field
            .get_subfields(&['a', 'b'])
            .into_iter()
            .map(|part| part.trim_end_matches(TRAILING_PUNCTUATION))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" : ");
        (!title.is_empty()).then_some(title)
    }

    /// Imprint dates in fallback order: 264 `$c` with second indicator `1`
    /// (publication), then 260 `$c`.
    #[must_use]
    pub fn imprint_dates(&self) -> Vec<&str> {
        let publication = self
            .fields_by_tag("264")
            .filter(|f| f.indicator2 == '1')
            .flat_map(|f| f.subfields_by_code('c'));
        let imprint = self
            .fields_by_tag("260")
            .flat_map(|f| f.subfields_by_code('c'));
        publication.chain(imprint).collect()
    }
}

impl Field {
    /// Create a new data field
    #[must_use]
    pub fn new(tag: impl Into<String>, indicator1: char, indicator2: char) -> Self {
        Field {
            tag: tag.into(),
            indicator1,
            indicator2,
            subfields: SmallVec::new(),
        }
    }

    /// Add a subfield
    pub fn add_subfield(&mut self, code: char, value: impl Into<String>) {
        self.subfields.push(Subfield {
            code,
            value: value.into(),
        });
    }

    /// Get first value for a subfield code
    #[must_use]
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Iterate over subfields with a specific code
    pub fn subfields_by_code(&self, code: char) -> impl Iterator<Item = &str> {
        self.subfields
            .iter()
            .filter(move |sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Get all subfield values matching any of the given codes, in field order
    #[must_use]
    pub fn get_subfields(&self, codes: &[char]) -> Vec<&str> {
        self.subfields
            .iter()
            .filter(|sf| codes.contains(&sf.code))
            .map(|sf| sf.value.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        let mut record = Record::new("00000nam a2200000 a 4500");
        record.add_control_field("001", " 12345 ");
        let mut title = Field::new("245", '1', '0');
        title.add_subfield('a', "Suomen kartasto :");
        title.add_subfield('b', "maakunnat /");
        title.add_subfield('c', "toim. A. Tekijä.");
        record.add_field(title);

        let mut copyright = Field::new("264", ' ', '4');
        copyright.add_subfield('c', "©1990");
        record.add_field(copyright);
        let mut publication = Field::new("264", ' ', '1');
        publication.add_subfield('c', "[1989]");
        record.add_field(publication);
        let mut imprint = Field::new("260", ' ', ' ');
        imprint.add_subfield('c', "1988.");
        record.add_field(imprint);
        record
    }

    #[test]
    fn test_control_number_is_trimmed() {
        assert_eq!(sample().control_number(), Some("12345"));
        assert_eq!(Record::default().control_number(), None);
    }

    #[test]
    fn test_title_joins_a_and_b() {
        assert_eq!(sample().title().as_deref(), Some("Suomen kartasto : maakunnat"));
    }

    #[test]
    fn test_imprint_dates_order() {
        assert_eq!(sample().imprint_dates(), vec!["[1989]", "1988."]);
    }

    #[test]
    fn test_subfield_access() {
        let record = sample();
        let field = record.get_field("245").unwrap();
        assert_eq!(field.get_subfield('c'), Some("toim. A. Tekijä."));
        assert_eq!(field.subfields_by_code('z').count(), 0);
        assert_eq!(record.fields_by_tag("264").count(), 2);
    }
}
