use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of one analysis run of a software system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Stable id of the analyzed system (same across runs)
    pub system_id: String,

    /// System name
    pub name: String,

    /// Location of the system on disk when the analysis ran
    #[serde(default)]
    pub path: String,

    /// Version of the analyzer that produced the snapshot
    #[serde(default)]
    pub version: String,

    /// When the analysis ran
    pub timestamp: DateTime<Utc>,
}

impl SystemInfo {
    /// Create system info for a run at the given time
    pub fn new(
        system_id: impl Into<String>,
        name: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            system_id: system_id.into(),
            name: name.into(),
            path: String::new(),
            version: String::new(),
            timestamp,
        }
    }
}
