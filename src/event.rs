use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Severity of a trace event, in ETW order: a lower numeric value is more
/// severe, so `Critical < Verbose` under the derived ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TraceLevel {
    Always = 0,
    Critical = 1,
    Error = 2,
    Warning = 3,
    Informational = 4,
    Verbose = 5,
}

impl TraceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceLevel::Always => "Always",
            TraceLevel::Critical => "Critical",
            TraceLevel::Error => "Error",
            TraceLevel::Warning => "Warning",
            TraceLevel::Informational => "Informational",
            TraceLevel::Verbose => "Verbose",
        }
    }
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
#[error(
    "unknown trace level '{0}'; expected 0-5 or always, critical, error, warning, informational, verbose"
)]
pub struct ParseLevelError(String);

impl FromStr for TraceLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "0" | "always" => Ok(TraceLevel::Always),
            "1" | "critical" | "crit" => Ok(TraceLevel::Critical),
            "2" | "error" | "err" => Ok(TraceLevel::Error),
            "3" | "warning" | "warn" => Ok(TraceLevel::Warning),
            "4" | "informational" | "info" => Ok(TraceLevel::Informational),
            "5" | "verbose" => Ok(TraceLevel::Verbose),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl From<TraceLevel> for u8 {
    fn from(level: TraceLevel) -> Self {
        level as u8
    }
}

impl TryFrom<u8> for TraceLevel {
    type Error = ParseLevelError;

    fn try_from(value: u8) -> Result<Self, ParseLevelError> {
        match value {
            0 => Ok(TraceLevel::Always),
            1 => Ok(TraceLevel::Critical),
            2 => Ok(TraceLevel::Error),
            3 => Ok(TraceLevel::Warning),
            4 => Ok(TraceLevel::Informational),
            5 => Ok(TraceLevel::Verbose),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

/// One named payload field. Order within an event follows the field
/// declaration order of the source schema; names are not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadField {
    pub name: String,
    pub value: String,
}

impl PayloadField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One structured record of a trace capture.
///
/// The event carries no sequence position of its own; the filter engine
/// assigns one as the 1-based running count of events processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Offset in milliseconds from capture start
    pub timestamp_relative_ms: f64,
    pub provider_name: String,
    pub event_name: String,
    /// Opaque activity identifier, matched by its string form
    pub activity_id: String,
    pub related_activity_id: String,
    pub process_id: u32,
    pub thread_id: u32,
    pub level: TraceLevel,
    #[serde(default)]
    pub payload: Vec<PayloadField>,
}

impl TraceEvent {
    /// Render the payload as `name=value, name=value, ...` in field order.
    /// This is the form both the substring filter and the verbose report see.
    pub fn render_payload(&self) -> String {
        self.payload
            .iter()
            .map(|field| format!("{}={}", field.name, field.value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
