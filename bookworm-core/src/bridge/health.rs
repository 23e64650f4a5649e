//! Health summary from the external health-check script.

use super::external::ExternalCall;
use crate::config::ExternalConfig;
use crate::root::AgentRoot;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::time::Duration;

/// Dimensions reported when the health check is unavailable.
pub const DEFAULT_DIMENSIONS: [&str; 9] = [
    "settings", "hooks", "skills", "agents", "mcp", "memory", "security", "disk", "logs",
];

/// Older health-check versions report the overall score under these names.
const SCORE_ALIASES: [&str; 3] = ["totalScore", "overallScore", "overall"];

/// Overall health with per-dimension scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    #[serde(default = "zero", deserialize_with = "lenient_score")]
    pub score: Number,
    pub dimensions: Vec<HealthDimension>,
    /// Any other fields the health check reports, passed through as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One named sub-score, kept exactly as the health check reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDimension {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default = "zero_value")]
    pub score: Value,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HealthDimension {
    pub fn new(name: impl Into<String>, score: i64, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: Value::from(score),
            status: status.into(),
            extra: Map::new(),
        }
    }

    /// Numeric value of the score; anything non-numeric counts as 0.
    pub fn score_value(&self) -> f64 {
        match &self.score {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

fn zero() -> Number {
    Number::from(0)
}

fn zero_value() -> Value {
    Value::from(0)
}

/// Numbers pass through; numeric strings are parsed; anything else is 0.
fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Number, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n,
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(Number::from)
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(Number::from_f64))
                .unwrap_or_else(zero)
        }
        _ => zero(),
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Nine zero-scored dimensions with an informational status.
pub fn default_health() -> HealthSummary {
    HealthSummary {
        score: zero(),
        dimensions: DEFAULT_DIMENSIONS
            .iter()
            .map(|name| HealthDimension::new(*name, 0, "info"))
            .collect(),
        extra: Map::new(),
    }
}

impl HealthSummary {
    /// Fill a zero overall score with the rounded mean of the dimensions.
    fn fill_score(&mut self) {
        if self.score.as_f64() != Some(0.0) || self.dimensions.is_empty() {
            return;
        }
        let scores: Vec<f64> = self.dimensions.iter().map(HealthDimension::score_value).collect();
        if scores.iter().all(|s| *s == 0.0) {
            return;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        self.score = Number::from(mean.round() as i64);
    }
}

/// Turn raw health-check output into a [`HealthSummary`].
///
/// Returns `None` unless the output is an object with a `dimensions` list.
/// A score reported under an alias is moved into `score` when `score`
/// itself is absent; aliases are always dropped.
pub fn normalize_health(raw: Value) -> Option<HealthSummary> {
    let Value::Object(mut map) = raw else {
        return None;
    };
    if !map.get("dimensions").is_some_and(Value::is_array) {
        return None;
    }

    let mut alias_score = None;
    for alias in SCORE_ALIASES {
        if let Some(value) = map.remove(alias) {
            if alias_score.is_none() && !value.is_null() {
                alias_score = Some(value);
            }
        }
    }
    let has_score = map.get("score").is_some_and(|v| !v.is_null());
    if !has_score {
        if let Some(score) = alias_score {
            map.insert("score".to_string(), score);
        }
    }

    let mut summary: HealthSummary = match serde_json::from_value(Value::Object(map)) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!(error = %e, "Health check output has unexpected shape");
            return None;
        }
    };
    summary.fill_score();
    Some(summary)
}

/// Run `scripts/health-check.js --json`, falling back to [`default_health`].
pub fn collect_health(root: &AgentRoot, config: &ExternalConfig) -> HealthSummary {
    let script = root.health_check_script();
    if !script.is_file() {
        tracing::debug!(script = %script.display(), "Health check script not present");
        return default_health();
    }

    let call = ExternalCall::new(
        "health-check",
        config.node.clone(),
        Duration::from_secs(config.health_timeout_secs),
    )
    .arg(script.to_string_lossy())
    .arg("--json")
    .cwd(root.path());

    call.run()
        .and_then(normalize_health)
        .unwrap_or_else(default_health)
}
