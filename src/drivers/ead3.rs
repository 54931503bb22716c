//! EAD3 driver.
//!
//! EAD3 adds structured dates to the `<did>`:
//!
//! ```xml
//! <unitdatestructured>
//!   <daterange>
//!     <fromdate standarddate="1985-02-02">2.2.1985</fromdate>
//!     <todate standarddate="1995-12-01">1.12.1995</todate>
//!   </daterange>
//! </unitdatestructured>
//! ```
//!
//! Structured dates win over `<unitdate>`. A missing `fromdate` is unknown
//! and a missing `todate` is open.

use serde::Deserialize;

use super::ead::{record_id, UnitDate};
use super::{DateSources, RawDate, RawRecord, RecordDriver};
use crate::config::DriverSettings;
use crate::error::Result;
use crate::fields::UNIT_DATERANGE;
use crate::formats::DateFormat;
use crate::xml::{first_text, from_xml, Text};

#[derive(Debug, Deserialize)]
struct Ead3Component {
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
    unitdatestructured: Vec<DateGroup>,
    #[serde(default)]
    unitdate: Vec<UnitDate>,
}

/// `<unitdatestructured>` or `<dateset>`.
#[derive(Debug, Default, Deserialize)]
struct DateGroup {
    #[serde(default)]
    daterange: Vec<DateRangeElement>,
    #[serde(default)]
    datesingle: Vec<DateValue>,
    #[serde(default)]
    dateset: Vec<DateGroup>,
}

#[derive(Debug, Deserialize)]
struct DateRangeElement {
    fromdate: Option<DateValue>,
    todate: Option<DateValue>,
}

#[derive(Debug, Deserialize)]
struct DateValue {
    #[serde(rename = "@standarddate")]
    standarddate: Option<String>,
    #[serde(rename = "$value", default)]
    text: String,
}

impl DateValue {
    fn value(&self) -> Option<String> {
        self.standarddate
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| Some(self.text.trim()).filter(|s| !s.is_empty()))
            .map(str::to_string)
    }
}

impl DateGroup {
    fn collect_into(&self, out: &mut Vec<RawDate>) {
        for range in &self.daterange {
            out.push(RawDate::Structured {
                from: range.fromdate.as_ref().and_then(DateValue::value),
                to: range.todate.as_ref().and_then(DateValue::value),
            });
        }
        out.extend(
            self.datesingle
                .iter()
                .filter_map(DateValue::value)
                .map(RawDate::Expression),
        );
        for set in &self.dateset {
            set.collect_into(out);
        }
    }
}

/// Driver for EAD3 records.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ead3Driver;

impl RecordDriver for Ead3Driver {
    fn format(&self) -> DateFormat {
        DateFormat::Ead3
    }

    fn read(&self, xml: &str, _settings: &DriverSettings) -> Result<RawRecord> {
        let component: Ead3Component = from_xml(xml)?;
        let did = &component.did;

        let mut structured = Vec::new();
        for group in &did.unitdatestructured {
            group.collect_into(&mut structured);
        }
        let dates = if structured.is_empty() {
            did.unitdate
                .iter()
                .map(|date| DateSources::primary(UNIT_DATERANGE, date.alternatives()))
                .collect()
        } else {
            structured
                .into_iter()
                .map(|raw| DateSources::primary(UNIT_DATERANGE, vec![raw]))
                .collect()
        };

        Ok(RawRecord {
            id: record_id(component.id.as_deref(), &did.unitid)?,
            title: first_text(&did.unittitle).map(str::to_string),
            dates,
        })
    }
}
