//! Shared XML plumbing for the record drivers.
//!
//! Drivers describe the elements they read as serde structs and deserialize
//! with `quick-xml`. Source documents use a mix of default namespaces and
//! prefixes (`lido:`, `dc:`, `dcterms:`, `marc:`), so prefixes and namespace
//! declarations are stripped before deserializing:
//!
//! ```
//! use recdates::xml::strip_namespaces;
//!
//! let xml = r#"<lido:lido xmlns:lido="http://www.lido-schema.org"><lido:term lido:type="x">a</lido:term></lido:lido>"#;
//! assert_eq!(strip_namespaces(xml), r#"<lido><term type="x">a</term></lido>"#);
//! ```

use lazy_static::lazy_static;
use quick_xml::de::from_str as xml_from_str;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{RecordError, Result};

lazy_static! {
    static ref XMLNS: Regex = Regex::new(r#"\s+xmlns(?::[\w.-]+)?\s*=\s*"[^"]*""#).unwrap();
    static ref ELEMENT_PREFIX: Regex = Regex::new(r"<(/?)[\w.-]+:").unwrap();
    static ref ATTRIBUTE_PREFIX: Regex = Regex::new(r#"(\s)[\w.-]+:([\w.-]+\s*=\s*")"#).unwrap();
}

/// Strip namespace declarations and prefixes from elements and attributes.
///
/// `<marc:record xmlns:marc="...">` becomes `<record>`, and
/// `xml:lang="fi"` becomes `lang="fi"`.
#[must_use]
pub fn strip_namespaces(xml: &str) -> String {
    let stripped = XMLNS.replace_all(xml, "");
    let stripped = ELEMENT_PREFIX.replace_all(&stripped, "<$1");
    ATTRIBUTE_PREFIX.replace_all(&stripped, "$1$2").into_owned()
}

/// Deserialize a record document after stripping namespaces.
///
/// The root element name is not checked; `T` describes its content.
///
/// # Errors
///
/// Returns [`RecordError::Xml`] if the document is not well-formed or does
/// not fit `T`.
pub fn from_xml<T: DeserializeOwned>(xml: &str) -> Result<T> {
    let cleaned = strip_namespaces(xml);
    xml_from_str(&cleaned).map_err(|e| RecordError::Xml(format!("failed to parse record: {e}")))
}

/// An element read for its text content only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Text {
    /// Text content
    #[serde(rename = "$value", default)]
    pub value: String,
}

impl Text {
    /// Trimmed text, or `None` if blank.
    #[must_use]
    pub fn non_empty(&self) -> Option<&str> {
        Some(self.value.trim()).filter(|s| !s.is_empty())
    }
}

/// First non-blank text among `elements`.
#[must_use]
pub fn first_text(elements: &[Text]) -> Option<&str> {
    elements.iter().find_map(Text::non_empty)
}
