//! Qualified Dublin Core driver.
//!
//! ```xml
//! <oai_qdc:qualifieddc xmlns:oai_qdc="..." xmlns:dc="..." xmlns:dcterms="...">
//!   <dc:identifier>https://example.org/item/1</dc:identifier>
//!   <dc:title>Kalevala</dc:title>
//!   <dcterms:issued>1835</dcterms:issued>
//! </oai_qdc:qualifieddc>
//! ```
//!
//! The publication date is taken from `issued`, then `date`, then
//! `created`; the first that resolves wins.

use serde::Deserialize;

use super::{DateSources, RawDate, RawRecord, RecordDriver};
use crate::config::DriverSettings;
use crate::error::{RecordError, Result};
use crate::fields::PUBLICATION_DATERANGE;
use crate::formats::DateFormat;
use crate::xml::{first_text, from_xml, Text};

#[derive(Debug, Deserialize)]
struct QualifiedDc {
    #[serde(default)]
    identifier: Vec<Text>,
    #[serde(default)]
    title: Vec<Text>,
    #[serde(default)]
    issued: Vec<Text>,
    #[serde(default)]
    date: Vec<Text>,
    #[serde(default)]
    created: Vec<Text>,
}

/// Driver for Qualified Dublin Core records.
#[derive(Debug, Clone, Copy, Default)]
pub struct QdcDriver;

impl RecordDriver for QdcDriver {
    fn format(&self) -> DateFormat {
        DateFormat::Qdc
    }

    fn read(&self, xml: &str, _settings: &DriverSettings) -> Result<RawRecord> {
        let dc: QualifiedDc = from_xml(xml)?;
        let id = first_text(&dc.identifier)
            .map(str::to_string)
            .ok_or_else(|| RecordError::MissingElement("identifier".to_string()))?;

        let alternatives: Vec<RawDate> = dc
            .issued
            .iter()
            .chain(&dc.date)
            .chain(&dc.created)
            .filter_map(Text::non_empty)
            .map(|text| RawDate::Expression(text.to_string()))
            .collect();
        let dates = if alternatives.is_empty() {
            Vec::new()
        } else {
            vec![DateSources::primary(PUBLICATION_DATERANGE, alternatives)]
        };

        Ok(RawRecord {
            id,
            title: first_text(&dc.title).map(str::to_string),
            dates,
        })
    }
}
