//! LIDO driver.
//!
//! Museum objects carry their dates on events:
//!
//! ```xml
//! <lido>
//!   <lidoRecID type="local">M123</lidoRecID>
//!   <descriptiveMetadata>
//!     <objectIdentificationWrap><titleWrap><titleSet>
//!       <appellationValue>Tuoli</appellationValue>
//!     </titleSet></titleWrap></objectIdentificationWrap>
//!     <eventWrap><eventSet><event>
//!       <eventType><term>valmistus</term></eventType>
//!       <eventDate>
//!         <displayDate>1930-luvun alkupuoli</displayDate>
//!         <date><earliestDate>1930</earliestDate><latestDate>1933</latestDate></date>
//!       </eventDate>
//!     </event></eventSet></eventWrap>
//!   </descriptiveMetadata>
//! </lido>
//! ```
//!
//! Creation events (see [`DriverSettings::is_creation_event`]) feed
//! `creation_daterange`; every other dated event only feeds the search
//! field. Within an event the earliest/latest pair is tried before the
//! display date.

use serde::Deserialize;

use super::{DateSources, RawDate, RawRecord, RecordDriver};
use crate::config::DriverSettings;
use crate::error::{RecordError, Result};
use crate::fields::CREATION_DATERANGE;
use crate::formats::DateFormat;
use crate::xml::{first_text, from_xml, Text};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Lido {
    #[serde(rename = "lidoRecID", default)]
    lido_rec_id: Vec<Text>,
    #[serde(default)]
    descriptive_metadata: Vec<DescriptiveMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescriptiveMetadata {
    object_identification_wrap: Option<ObjectIdentificationWrap>,
    event_wrap: Option<EventWrap>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectIdentificationWrap {
    title_wrap: Option<TitleWrap>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitleWrap {
    #[serde(default)]
    title_set: Vec<TitleSet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitleSet {
    #[serde(default)]
    appellation_value: Vec<Text>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventWrap {
    #[serde(default)]
    event_set: Vec<EventSet>,
}

#[derive(Debug, Deserialize)]
struct EventSet {
    event: Option<Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Event {
    event_type: Option<EventType>,
    #[serde(default)]
    event_date: Vec<EventDate>,
}

#[derive(Debug, Deserialize)]
struct EventType {
    #[serde(default)]
    term: Vec<Text>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDate {
    #[serde(default)]
    display_date: Vec<Text>,
    date: Option<EarliestLatest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EarliestLatest {
    earliest_date: Option<Text>,
    latest_date: Option<Text>,
}

impl Event {
    fn is_creation(&self, settings: &DriverSettings) -> bool {
        self.event_type.as_ref().is_some_and(|event_type| {
            event_type
                .term
                .iter()
                .filter_map(Text::non_empty)
                .any(|term| settings.is_creation_event(term))
        })
    }

    fn alternatives(&self) -> Vec<RawDate> {
        let mut out = Vec::new();
        for date in &self.event_date {
            if let Some(pair) = &date.date {
                let earliest = pair.earliest_date.as_ref().and_then(Text::non_empty);
                let latest = pair.latest_date.as_ref().and_then(Text::non_empty);
                match (earliest, latest) {
                    (Some(earliest), Some(latest)) => out.push(RawDate::Pair {
                        earliest: earliest.to_string(),
                        latest: latest.to_string(),
                    }),
                    (Some(only), None) | (None, Some(only)) => {
                        out.push(RawDate::Expression(only.to_string()));
                    },
                    (None, None) => {},
                }
            }
            out.extend(
                date.display_date
                    .iter()
                    .filter_map(Text::non_empty)
                    .map(|text| RawDate::Expression(text.to_string())),
            );
        }
        out
    }
}

/// Driver for LIDO records.
#[derive(Debug, Clone, Copy, Default)]
pub struct LidoDriver;

impl RecordDriver for LidoDriver {
    fn format(&self) -> DateFormat {
        DateFormat::Lido
    }

    fn read(&self, xml: &str, settings: &DriverSettings) -> Result<RawRecord> {
        let lido: Lido = from_xml(xml)?;
        let id = first_text(&lido.lido_rec_id)
            .map(str::to_string)
            .ok_or_else(|| RecordError::MissingElement("lidoRecID".to_string()))?;

        let title = lido
            .descriptive_metadata
            .iter()
            .filter_map(|meta| meta.object_identification_wrap.as_ref())
            .filter_map(|wrap| wrap.title_wrap.as_ref())
            .flat_map(|wrap| &wrap.title_set)
            .find_map(|set| first_text(&set.appellation_value))
            .map(str::to_string);

        let mut creation = Vec::new();
        let mut other = Vec::new();
        let events = lido
            .descriptive_metadata
            .iter()
            .filter_map(|meta| meta.event_wrap.as_ref())
            .flat_map(|wrap| &wrap.event_set)
            .filter_map(|set| set.event.as_ref());
        for event in events {
            let alternatives = event.alternatives();
            if alternatives.is_empty() {
                continue;
            }
            if event.is_creation(settings) {
                creation.push(DateSources::primary(CREATION_DATERANGE, alternatives));
            } else {
                other.push(DateSources::secondary(alternatives));
            }
        }
        creation.append(&mut other);

        Ok(RawRecord {
            id,
            title,
            dates: creation,
        })
    }
}
