//! MARCXML deserialization.
//!
//! Reads the LOC MARCXML schema (<https://www.loc.gov/standards/marcxml/>):
//! `tag`, `ind1`, `ind2` and `code` are XML attributes. Both default-namespace
//! (`<record xmlns="...">`) and prefix-namespace (`<marc:record>`) forms are
//! accepted.

use serde::Deserialize;

use crate::error::{RecordError, Result};
use crate::record::{Field, Record};
use crate::xml::from_xml;

/// MARCXML record representation.
#[derive(Debug, Deserialize)]
pub struct MarcxmlRecord {
    /// MARC leader string
    #[serde(default)]
    pub leader: String,
    /// Control fields (tags 001-009)
    #[serde(default)]
    pub controlfield: Vec<MarcxmlControlField>,
    /// Data fields (tags 010+)
    #[serde(default)]
    pub datafield: Vec<MarcxmlDataField>,
}

/// MARCXML control field representation.
#[derive(Debug, Deserialize)]
pub struct MarcxmlControlField {
    /// Field tag as an XML attribute (e.g., "001", "008")
    #[serde(rename = "@tag")]
    pub tag: String,
    /// Control field value (text content)
    #[serde(rename = "$value", default)]
    pub value: String,
}

/// MARCXML data field representation.
#[derive(Debug, Deserialize)]
pub struct MarcxmlDataField {
    /// Field tag as an XML attribute (e.g., "245", "650")
    #[serde(rename = "@tag")]
    pub tag: String,
    /// First indicator as an XML attribute
    #[serde(rename = "@ind1", default)]
    pub ind1: String,
    /// Second indicator as an XML attribute
    #[serde(rename = "@ind2", default)]
    pub ind2: String,
    /// Subfields
    #[serde(default)]
    pub subfield: Vec<MarcxmlSubfield>,
}

/// MARCXML subfield representation.
#[derive(Debug, Deserialize)]
pub struct MarcxmlSubfield {
    /// Subfield code as an XML attribute (e.g., "a", "b", "c")
    #[serde(rename = "@code")]
    pub code: String,
    /// Subfield value (text content)
    #[serde(rename = "$value", default)]
    pub value: String,
}

/// Parse one MARCXML `<record>`.
///
/// ```
/// use recdates::marcxml::marcxml_to_record;
///
/// let xml = r#"<marc:record xmlns:marc="http://www.loc.gov/MARC21/slim">
///     <marc:controlfield tag="001">88888</marc:controlfield>
/// </marc:record>"#;
/// let record = marcxml_to_record(xml)?;
/// assert_eq!(record.control_number(), Some("88888"));
/// # Ok::<(), recdates::error::RecordError>(())
/// ```
///
/// # Errors
///
/// Returns an error if the XML is invalid or a subfield has no code.
pub fn marcxml_to_record(xml: &str) -> Result<Record> {
    let xml_record: MarcxmlRecord = from_xml(xml)?;
    marcxml_record_to_record(xml_record)
}

fn marcxml_record_to_record(xml_record: MarcxmlRecord) -> Result<Record> {
    let mut record = Record::new(xml_record.leader);

    for cf in xml_record.controlfield {
        record.add_control_field(cf.tag, cf.value);
    }

    for df in xml_record.datafield {
        let ind1 = df.ind1.chars().next().unwrap_or(' ');
        let ind2 = df.ind2.chars().next().unwrap_or(' ');

        let mut field = Field::new(df.tag, ind1, ind2);

        for sf in df.subfield {
            let code = sf
                .code
                .chars()
                .next()
                .ok_or_else(|| RecordError::MissingElement("subfield code".to_string()))?;
            field.add_subfield(code, sf.value);
        }

        record.add_field(field);
    }

    Ok(record)
}
