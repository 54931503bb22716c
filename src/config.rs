//! Driver settings.
//!
//! Settings are read from JSON; every key is optional.
//!
//! ```
//! use recdates::config::DriverSettings;
//! use recdates::formats::DateFormat;
//! use recdates::title::TitleYearPolicy;
//!
//! let settings = DriverSettings::from_json_str(
//!     r#"{"source_id": "museo", "title_year_policy": {"lido": "no_year_exists"}}"#,
//! )?;
//! assert_eq!(settings.source_id, "museo");
//! assert_eq!(settings.policy_for(DateFormat::Lido), TitleYearPolicy::NoYearExists);
//! assert_eq!(settings.policy_for(DateFormat::Ead), TitleYearPolicy::NoYearExists);
//! assert_eq!(settings.policy_for(DateFormat::Qdc), TitleYearPolicy::Never);
//! # Ok::<(), recdates::error::RecordError>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::formats::DateFormat;
use crate::title::TitleYearPolicy;

/// LIDO event types whose dates count as the creation date.
pub const DEFAULT_CREATION_EVENT_TYPES: [&str; 5] =
    ["valmistus", "creation", "production", "luominen", "tuotanto"];

/// Settings shared by all record drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    /// Data source identifier, used in warnings and the source field
    pub source_id: String,
    /// Title policy overrides per format
    pub title_year_policy: BTreeMap<DateFormat, TitleYearPolicy>,
    /// LIDO event types treated as creation events (compared lower-case)
    pub creation_event_types: Vec<String>,
}

impl Default for DriverSettings {
    fn default() -> Self {
        DriverSettings {
            source_id: String::new(),
            title_year_policy: BTreeMap::new(),
            creation_event_types: DEFAULT_CREATION_EVENT_TYPES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl DriverSettings {
    /// Settings for a named source with default policies.
    #[must_use]
    pub fn for_source(source_id: impl Into<String>) -> Self {
        DriverSettings {
            source_id: source_id.into(),
            ..DriverSettings::default()
        }
    }

    /// Parse settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Json`](crate::error::RecordError::Json) if the
    /// document is not valid JSON or has values of the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Title policy for `format`: the configured value, else the format default.
    #[must_use]
    pub fn policy_for(&self, format: DateFormat) -> TitleYearPolicy {
        self.title_year_policy
            .get(&format)
            .copied()
            .unwrap_or_else(|| default_policy(format))
    }

    /// Set the title policy for `format`.
    #[must_use]
    pub fn with_policy(mut self, format: DateFormat, policy: TitleYearPolicy) -> Self {
        self.title_year_policy.insert(format, policy);
        self
    }

    /// Whether a LIDO event type names a creation event.
    #[must_use]
    pub fn is_creation_event(&self, event_type: &str) -> bool {
        let event_type = event_type.trim().to_lowercase();
        self.creation_event_types
            .iter()
            .any(|t| t.to_lowercase() == event_type)
    }
}

/// Archival titles get the unit date by default; other formats do not.
#[must_use]
pub const fn default_policy(format: DateFormat) -> TitleYearPolicy {
    match format {
        DateFormat::Ead | DateFormat::Ead3 => TitleYearPolicy::NoYearExists,
        DateFormat::Lido | DateFormat::Qdc | DateFormat::Marc => TitleYearPolicy::Never,
    }
}
