//! EAD 2002 driver.
//!
//! A record is an `<archdesc>` or component (`<c>`, `<c01>`...) element; the
//! driver reads its `<did>`:
//!
//! ```xml
//! <c level="file" id="fonds-1.3">
//!   <did>
//!     <unitid>3</unitid>
//!     <unittitle>Kirjeet</unittitle>
//!     <unitdate normal="1931/1943">1931-1943</unitdate>
//!   </did>
//! </c>
//! ```
//!
//! Each `<unitdate>` is one date, read from `@normal` and falling back to the
//! element text.

use serde::Deserialize;

use super::{DateSources, RawDate, RawRecord, RecordDriver};
use crate::config::DriverSettings;
use crate::error::{RecordError, Result};
use crate::fields::UNIT_DATERANGE;
use crate::formats::DateFormat;
use crate::xml::{first_text, from_xml, Text};

#[derive(Debug, Deserialize)]
struct EadComponent {
    #[serde(rename = "@id")]
    id: Option<String>,
    did: Did,
}

#[derive(Debug, Deserialize)]
struct Did {
    #[serde(default)]
    unitid: Vec<Text>,
    #[serde(default)]
    unittitle: Vec<Text>,
    #[serde(default)]
    unitdate: Vec<UnitDate>,
}

/// `<unitdate>`, shared with EAD3.
#[derive(Debug, Deserialize)]
pub(crate) struct UnitDate {
    #[serde(rename = "@normal")]
    normal: Option<String>,
    #[serde(rename = "$value", default)]
    text: String,
}

impl UnitDate {
    pub(crate) fn alternatives(&self) -> Vec<RawDate> {
        self.normal
            .iter()
            .chain(std::iter::once(&self.text))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| RawDate::Expression(s.to_string()))
            .collect()
    }
}

/// Identifier: `@id` of the component, else the first `<unitid>`.
pub(crate) fn record_id(id: Option<&str>, unitid: &[Text]) -> Result<String> {
    id.map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| first_text(unitid))
        .map(str::to_string)
        .ok_or_else(|| RecordError::MissingElement("unitid".to_string()))
}

/// Driver for EAD 2002 records.
#[derive(Debug, Clone, Copy, Default)]
pub struct EadDriver;

impl RecordDriver for EadDriver {
    fn format(&self) -> DateFormat {
        DateFormat::Ead
    }

    fn read(&self, xml: &str, _settings: &DriverSettings) -> Result<RawRecord> {
        let component: EadComponent = from_xml(xml)?;
        let did = &component.did;
        Ok(RawRecord {
            id: record_id(component.id.as_deref(), &did.unitid)?,
            title: first_text(&did.unittitle).map(str::to_string),
            dates: did
                .unitdate
                .iter()
                .map(|date| DateSources::primary(UNIT_DATERANGE, date.alternatives()))
                .collect(),
        })
    }
}
