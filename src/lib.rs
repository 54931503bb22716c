#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! ## Modules
//!
//! - [`formats`]: Per-format date grammars (`DateFormat`)
//! - [`rules`]: Ordered rule tables and rule outcomes
//! - [`partial`]: Partially known dates and wildcard handling
//! - [`instant`]: Completed calendar instants and year formatting
//! - [`range`]: Date ranges, reconciliation and the canonical string
//! - [`context`]: Per-record parse context and clocks
//! - [`warnings`]: Warning kinds and sinks
//! - [`title`]: Year-range suffixes for display titles
//! - [`drivers`]: Record drivers for EAD, EAD3, LIDO, QDC and MARCXML
//! - [`fields`]: Output field map and key names
//! - [`config`]: Driver settings
//! - [`record`] / [`marcxml`]: MARC records read from MARCXML
//! - [`xml`]: Namespace stripping and serde helpers
//! - [`error`]: Error types and result type

pub mod config;
pub mod context;
pub mod drivers;
pub mod error;
pub mod fields;
pub mod formats;
pub mod instant;
pub mod marcxml;
pub mod partial;
pub mod range;
/// MARC bibliographic record structures (`Record`, `Field`, `Subfield`)
pub mod record;
pub mod rules;
pub mod title;
pub mod warnings;
pub mod xml;

pub use config::DriverSettings;
pub use context::{Clock, FixedClock, ParseContext, SystemClock};
pub use drivers::{
    convert_batch, convert_record, convert_record_at, driver_for, Converted, RecordDriver,
};
pub use error::{DateError, RecordError, Result};
pub use fields::FieldMap;
pub use formats::DateFormat;
pub use instant::{ResolvedInstant, Role};
pub use partial::PartialDate;
pub use range::{date_range_to_canonical_string, DateRange};
pub use title::TitleYearPolicy;
pub use warnings::{TracingSink, Warning, WarningKind, WarningLog, WarningSink};
