//! Record drivers: XML record in, [`FieldMap`] out.
//!
//! Each driver knows where its format keeps the identifier, the title and
//! the date-bearing elements, and reads them into a [`RawRecord`]. The rest
//! is shared: dates are resolved with the format's grammar, the title policy
//! is applied, and the output fields are written under fixed key names.
//!
//! # Examples
//!
//! ```
//! use recdates::config::DriverSettings;
//! use recdates::context::FixedClock;
//! use recdates::drivers::convert_record_at;
//! use recdates::fields::SEARCH_DATERANGE_MV;
//! use recdates::formats::DateFormat;
//! use recdates::warnings::WarningLog;
//!
//! let xml = r#"<archdesc level="fonds"><did>
//!     <unitid>fonds-1</unitid>
//!     <unittitle>Kirjeenvaihto</unittitle>
//!     <unitdate normal="1985-02-02/1995-12-01">1985-1995</unitdate>
//! </did></archdesc>"#;
//!
//! let mut warnings = WarningLog::new();
//! let fields = convert_record_at(
//!     DateFormat::Ead,
//!     xml,
//!     &DriverSettings::for_source("arkisto"),
//!     &mut warnings,
//!     &FixedClock(2024),
//! )?;
//! assert_eq!(
//!     fields.get(SEARCH_DATERANGE_MV).unwrap(),
//!     ["[1985-02-02 TO 1995-12-01]"]
//! );
//! # Ok::<(), recdates::error::RecordError>(())
//! ```

pub mod ead;
pub mod ead3;
pub mod lido;
pub mod marc;
pub mod qdc;

use rayon::prelude::*;

use crate::config::DriverSettings;
use crate::context::{Clock, ParseContext, SystemClock};
use crate::error::Result;
use crate::fields::{self, FieldMap};
use crate::formats::{self, DateFormat};
use crate::range::DateRange;
use crate::title::title_with_year_range;
use crate::warnings::{Warning, WarningLog, WarningSink};

/// One raw date as found in a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawDate {
    /// A single expression in the format's grammar.
    Expression(String),
    /// Separate earliest and latest expressions.
    Pair {
        /// Lower bound expression
        earliest: String,
        /// Upper bound expression
        latest: String,
    },
    /// Structured EAD3 bounds; a missing side is unknown/open.
    Structured {
        /// `fromdate`
        from: Option<String>,
        /// `todate`
        to: Option<String>,
    },
    /// MARC imprint statement (264/260 `$c`).
    Imprint(String),
}

impl RawDate {
    /// Resolve with the grammar of `format`.
    pub fn resolve(&self, format: DateFormat, ctx: &mut ParseContext<'_>) -> Option<DateRange> {
        match self {
            RawDate::Expression(text) => format.parse_date_range(text, ctx),
            RawDate::Pair { earliest, latest } => format.parse_date_pair(earliest, latest, ctx),
            RawDate::Structured { from, to } => {
                formats::ead3::parse_structured(from.as_deref(), to.as_deref(), ctx)
            },
            RawDate::Imprint(text) => formats::marc::parse_imprint_date(text, ctx),
        }
    }
}

/// Alternative sources for one date, tried in order until one resolves or
/// one is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSources {
    /// Field the resolved range is written to; `None` adds it to
    /// [`fields::SEARCH_DATERANGE_MV`] only.
    pub key: Option<&'static str>,
    /// Candidates in priority order
    pub alternatives: Vec<RawDate>,
}

impl DateSources {
    /// Sources feeding `key`.
    #[must_use]
    pub fn primary(key: &'static str, alternatives: Vec<RawDate>) -> Self {
        DateSources {
            key: Some(key),
            alternatives,
        }
    }

    /// Sources feeding only the search range field.
    #[must_use]
    pub fn secondary(alternatives: Vec<RawDate>) -> Self {
        DateSources {
            key: None,
            alternatives,
        }
    }

    /// First alternative that resolves. A rejected alternative (one that
    /// reported a warning) ends the search, so one date yields at most one
    /// warning and never a range from a lower-priority source.
    fn resolve(&self, format: DateFormat, ctx: &mut ParseContext<'_>) -> Option<DateRange> {
        for raw in &self.alternatives {
            let reported = ctx.warnings_reported();
            if let Some(range) = raw.resolve(format, ctx) {
                return Some(range);
            }
            if ctx.warnings_reported() > reported {
                return None;
            }
        }
        None
    }
}

/// What a driver reads from a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Record identifier
    pub id: String,
    /// Title as recorded
    pub title: Option<String>,
    /// Date sources in priority order
    pub dates: Vec<DateSources>,
}

/// Format-specific reading of a record document.
pub trait RecordDriver: Send + Sync {
    /// Date grammar this driver resolves with.
    fn format(&self) -> DateFormat;

    /// Read identifier, title and raw dates from `xml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be deserialized or lacks an
    /// identifier.
    fn read(&self, xml: &str, settings: &DriverSettings) -> Result<RawRecord>;

    /// Convert `xml` into output fields.
    ///
    /// # Errors
    ///
    /// Fails only when [`read`](Self::read) fails. Date problems are reported
    /// to `sink` and leave the affected field out.
    fn to_fields(
        &self,
        xml: &str,
        settings: &DriverSettings,
        sink: &mut dyn WarningSink,
        clock: &dyn Clock,
    ) -> Result<FieldMap> {
        let raw = self.read(xml, settings)?;
        Ok(assemble(self.format(), &raw, settings, sink, clock))
    }
}

static EAD: ead::EadDriver = ead::EadDriver;
static EAD3: ead3::Ead3Driver = ead3::Ead3Driver;
static LIDO: lido::LidoDriver = lido::LidoDriver;
static QDC: qdc::QdcDriver = qdc::QdcDriver;
static MARC: marc::MarcDriver = marc::MarcDriver;

/// The driver for `format`.
#[must_use]
pub fn driver_for(format: DateFormat) -> &'static dyn RecordDriver {
    match format {
        DateFormat::Ead => &EAD,
        DateFormat::Ead3 => &EAD3,
        DateFormat::Lido => &LIDO,
        DateFormat::Qdc => &QDC,
        DateFormat::Marc => &MARC,
    }
}

/// Resolve the dates of `raw` and build its output fields.
pub fn assemble(
    format: DateFormat,
    raw: &RawRecord,
    settings: &DriverSettings,
    sink: &mut dyn WarningSink,
    clock: &dyn Clock,
) -> FieldMap {
    let mut ctx = ParseContext::new(&settings.source_id, &raw.id, sink, clock);
    let mut out = FieldMap::new();
    out.add(fields::ID, raw.id.as_str());
    out.add(fields::RECORD_FORMAT, format.name());
    out.add(fields::SOURCE, settings.source_id.as_str());

    let mut main: Option<DateRange> = None;
    let mut fallback: Option<DateRange> = None;
    for sources in &raw.dates {
        let Some(range) = sources.resolve(format, &mut ctx) else {
            continue;
        };
        match sources.key {
            Some(key) => {
                out.add_date_range(key, &range);
                main.get_or_insert(range);
            },
            None => {
                out.add_unique(fields::SEARCH_DATERANGE_MV, range.to_canonical_string());
                fallback.get_or_insert(range);
            },
        }
    }
    let main = main.or(fallback);
    if let Some(range) = &main {
        out.set_main_date(range);
    }

    if let Some(title) = raw.title.as_deref() {
        let policy = settings.policy_for(format);
        out.add(fields::TITLE, title_with_year_range(title, main.as_ref(), policy));
        out.add(fields::TITLE_SHORT, title);
    }

    tracing::debug!(
        source = %settings.source_id,
        record_id = %raw.id,
        format = %format,
        dated = main.is_some(),
        "record converted"
    );
    out
}

/// Convert one record, checking dates against the system clock.
///
/// # Errors
///
/// Returns an error if the record cannot be read.
pub fn convert_record(
    format: DateFormat,
    xml: &str,
    settings: &DriverSettings,
    sink: &mut dyn WarningSink,
) -> Result<FieldMap> {
    convert_record_at(format, xml, settings, sink, &SystemClock)
}

/// Convert one record against an explicit clock.
///
/// # Errors
///
/// Returns an error if the record cannot be read.
pub fn convert_record_at(
    format: DateFormat,
    xml: &str,
    settings: &DriverSettings,
    sink: &mut dyn WarningSink,
    clock: &dyn Clock,
) -> Result<FieldMap> {
    driver_for(format).to_fields(xml, settings, sink, clock)
}

/// Result of converting one record in a batch.
#[derive(Debug)]
pub struct Converted {
    /// Output fields, or why the record could not be read
    pub fields: Result<FieldMap>,
    /// Warnings reported for this record
    pub warnings: Vec<Warning>,
}

/// Convert a batch of records in parallel using Rayon.
///
/// Each record is an independent task with its own warning log. Results are
/// returned in input order; a failing record does not affect the others.
pub fn convert_batch<S>(
    format: DateFormat,
    records: &[S],
    settings: &DriverSettings,
    clock: &(dyn Clock + Sync),
) -> Vec<Converted>
where
    S: AsRef<str> + Sync,
{
    let driver = driver_for(format);
    records
        .par_iter()
        .map(|xml| {
            let mut log = WarningLog::new();
            let fields = driver.to_fields(xml.as_ref(), settings, &mut log, clock);
            Converted {
                fields,
                warnings: log.into_inner(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FixedClock;
    use crate::warnings::WarningKind;

    fn convert(raw: &RawRecord, format: DateFormat) -> (FieldMap, WarningLog) {
        let mut log = WarningLog::new();
        let settings = DriverSettings::for_source("testi");
        let fields = assemble(format, raw, &settings, &mut log, &FixedClock(2024));
        (fields, log)
    }

    #[test]
    fn test_alternatives_fall_through() {
        let raw = RawRecord {
            id: "1".to_string(),
            title: None,
            dates: vec![DateSources::primary(
                fields::PUBLICATION_DATERANGE,
                vec![
                    RawDate::Expression("ei päivämäärää".to_string()),
                    RawDate::Expression("1931".to_string()),
                ],
            )],
        };
        let (fields, log) = convert(&raw, DateFormat::Qdc);
        assert_eq!(
            fields.first(fields::PUBLICATION_DATERANGE),
            Some("[1931-01-01 TO 1931-12-31]")
        );
        assert_eq!(fields.first(fields::MAIN_DATE_STR), Some("1931"));
        assert!(log.is_empty());
    }

    #[test]
    fn test_invalid_date_is_omitted_with_warning() {
        let raw = RawRecord {
            id: "2".to_string(),
            title: Some("Otsikko".to_string()),
            dates: vec![DateSources::primary(
                fields::UNIT_DATERANGE,
                vec![RawDate::Expression("1985-02-30/1990".to_string())],
            )],
        };
        let (fields, log) = convert(&raw, DateFormat::Ead);
        assert!(!fields.contains_key(fields::UNIT_DATERANGE));
        assert!(!fields.contains_key(fields::SEARCH_DATERANGE_MV));
        assert_eq!(fields.first(fields::TITLE), Some("Otsikko"));
        assert_eq!(log.kinds(), vec![WarningKind::InvalidStartDate]);
        let warning = log.iter().next().unwrap();
        assert_eq!((warning.source.as_str(), warning.record_id.as_str()), ("testi", "2"));
    }

    #[test]
    fn test_rejected_alternative_ends_the_search() {
        let raw = RawRecord {
            id: "4".to_string(),
            title: None,
            dates: vec![DateSources::primary(
                fields::UNIT_DATERANGE,
                vec![
                    RawDate::Expression("1985-02-30/1990".to_string()),
                    RawDate::Expression("1985-02-31".to_string()),
                    RawDate::Expression("1985".to_string()),
                ],
            )],
        };
        let (fields, log) = convert(&raw, DateFormat::Ead);
        assert!(!fields.contains_key(fields::UNIT_DATERANGE));
        assert!(!fields.contains_key(fields::MAIN_DATE));
        assert_eq!(log.kinds(), vec![WarningKind::InvalidStartDate]);
    }

    #[test]
    fn test_secondary_dates_only_feed_search_field() {
        let raw = RawRecord {
            id: "3".to_string(),
            title: None,
            dates: vec![
                DateSources::secondary(vec![RawDate::Expression("1950".to_string())]),
                DateSources::primary(
                    fields::CREATION_DATERANGE,
                    vec![RawDate::Expression("1930-luku".to_string())],
                ),
            ],
        };
        let (fields, _) = convert(&raw, DateFormat::Lido);
        assert_eq!(
            fields.get(fields::SEARCH_DATERANGE_MV).unwrap(),
            ["[1950-01-01 TO 1950-12-31]", "[1930-01-01 TO 1939-12-31]"]
        );
        assert_eq!(fields.first(fields::MAIN_DATE_STR), Some("1930"));
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let records = vec![
            r#"<qualifieddc><identifier>a</identifier><date>1931</date></qualifieddc>"#,
            "<qualifieddc><identifier>b</identifier>",
            r#"<qualifieddc><identifier>c</identifier><date>2004-02-30</date></qualifieddc>"#,
        ];
        let out = convert_batch(
            DateFormat::Qdc,
            &records,
            &DriverSettings::default(),
            &FixedClock(2024),
        );
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].fields.as_ref().unwrap().first(fields::ID), Some("a"));
        assert!(out[1].fields.is_err());
        assert_eq!(out[2].warnings.len(), 1);
        assert!(out[0].warnings.is_empty());
    }
}
