//! Log record type shared by every JSON-lines source.
//!
//! The agent writes several spellings of the same logical field depending on
//! which hook produced the line (`timestamp` vs `ts`, `action` vs
//! `decision`, ...). Each logical field has one accessor that encodes the
//! fallback order; collectors never look at raw fields directly.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

/// One parsed line of a JSON-lines log.
///
/// Fields are kept as raw JSON values so that a field of an unexpected type
/// never causes the whole line to be rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogRecord {
    timestamp: Option<Value>,
    ts: Option<Value>,
    #[serde(rename = "type")]
    record_type: Option<Value>,
    tool: Option<Value>,
    name: Option<Value>,
    action: Option<Value>,
    decision: Option<Value>,
    hook: Option<Value>,
    source: Option<Value>,
    routed: Option<Value>,
    skill: Option<Value>,
    recommended: Option<Value>,
    corrected: Option<Value>,
    version: Option<Value>,
}

/// Non-empty string content of a field.
fn text(value: &Option<Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// JavaScript-style truthiness of a field.
fn truthy(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

impl LogRecord {
    /// Build a record from any JSON value. Non-objects yield an empty record.
    pub fn from_value(value: Value) -> Self {
        if value.is_object() {
            serde_json::from_value(value).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Event time from `timestamp`, then `ts`. Unparseable or absent is epoch 0.
    pub fn timestamp(&self) -> DateTime<Utc> {
        [&self.timestamp, &self.ts]
            .into_iter()
            .flatten()
            .find(|v| !v.is_null())
            .and_then(parse_timestamp)
            .unwrap_or_default()
    }

    /// Record kind from `type`, then `tool`.
    pub fn kind(&self) -> Option<&str> {
        text(&self.record_type).or_else(|| text(&self.tool))
    }

    /// The `type` field alone.
    pub fn record_type(&self) -> Option<&str> {
        text(&self.record_type)
    }

    /// The `tool` field alone.
    pub fn tool(&self) -> Option<&str> {
        text(&self.tool)
    }

    /// Tool name for usage tallies: `tool`, then `name`.
    pub fn tool_name(&self) -> Option<&str> {
        text(&self.tool).or_else(|| text(&self.name))
    }

    /// Permission outcome from `action`, then `decision`.
    pub fn action(&self) -> Option<&str> {
        text(&self.action).or_else(|| text(&self.decision))
    }

    /// Originating hook from `hook`, then `source`.
    pub fn hook(&self) -> Option<&str> {
        text(&self.hook).or_else(|| text(&self.source))
    }

    /// Skill a routing decision points at: `routed`, `skill`, `recommended`.
    pub fn routed_skill(&self) -> Option<&str> {
        text(&self.routed)
            .or_else(|| text(&self.skill))
            .or_else(|| text(&self.recommended))
    }

    /// Whether a routing feedback entry records a correction.
    pub fn is_correction(&self) -> bool {
        truthy(&self.corrected) || self.record_type() == Some("correction")
    }

    /// Version label; numbers are rendered as text.
    pub fn version(&self) -> Option<String> {
        match &self.version {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Parse a timestamp given as text or epoch milliseconds.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` (read as
/// UTC), bare `YYYY-MM-DD`, and numbers as milliseconds since the epoch.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
                if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                    return Some(naive.and_utc());
                }
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        }
        _ => None,
    }
}
