//! MARC 21 driver.
//!
//! Reads MARCXML through [`marcxml_to_record`]. The publication date comes
//! from 008 first and falls back to the imprint statements returned by
//! [`Record::imprint_dates`](crate::record::Record::imprint_dates).

use super::{DateSources, RawDate, RawRecord, RecordDriver};
use crate::config::DriverSettings;
use crate::error::{RecordError, Result};
use crate::fields::PUBLICATION_DATERANGE;
use crate::formats::DateFormat;
use crate::marcxml::marcxml_to_record;

/// Driver for MARCXML bibliographic records.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarcDriver;

impl RecordDriver for MarcDriver {
    fn format(&self) -> DateFormat {
        DateFormat::Marc
    }

    fn read(&self, xml: &str, _settings: &DriverSettings) -> Result<RawRecord> {
        let record = marcxml_to_record(xml)?;
        let id = record
            .control_number()
            .map(str::to_string)
            .ok_or_else(|| RecordError::MissingElement("001".to_string()))?;

        let mut alternatives: Vec<RawDate> = record
            .fixed_data()
            .filter(|data| !data.trim().is_empty())
            .map(|data| RawDate::Expression(data.to_string()))
            .into_iter()
            .collect();
        alternatives.extend(
            record
                .imprint_dates()
                .into_iter()
                .map(|text| RawDate::Imprint(text.to_string())),
        );
        let dates = if alternatives.is_empty() {
            Vec::new()
        } else {
            vec![DateSources::primary(PUBLICATION_DATERANGE, alternatives)]
        };

        Ok(RawRecord {
            id,
            title: record.title(),
            dates,
        })
    }
}
