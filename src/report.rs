//! Daily report view-model and normalization of the backend payload.
//!
//! The backend may omit, null or mistype any field. `normalize` fills every
//! gap with a fixed fallback, field by field, so a partial response still
//! yields a fully populated `DailyReport`.

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const FALLBACK_START_TIME: &str = "05:57";
pub const FALLBACK_END_TIME: &str = "15:54";
pub const FALLBACK_WORKING_HOURS: &str = "9:56";
pub const FALLBACK_UTILIZED_HOURS: &str = "7:42";
pub const FALLBACK_UTILIZATION_PERCENT: u8 = 78;
pub const FALLBACK_DURATION: &str = "00:00";

/// The four mutually exclusive operating states of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationCategory {
    MovingWithLoad,
    MovingWithoutLoad,
    IdleWithLoad,
    IdleWithoutLoad,
}

impl OperationCategory {
    pub const ALL: [OperationCategory; 4] = [
        OperationCategory::MovingWithLoad,
        OperationCategory::MovingWithoutLoad,
        OperationCategory::IdleWithLoad,
        OperationCategory::IdleWithoutLoad,
    ];

    /// Key used by the backend's `breakdown` object.
    pub fn key(self) -> &'static str {
        match self {
            OperationCategory::MovingWithLoad => "moving_with_load",
            OperationCategory::MovingWithoutLoad => "moving_without_load",
            OperationCategory::IdleWithLoad => "idle_with_load",
            OperationCategory::IdleWithoutLoad => "idle_without_load",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OperationCategory::MovingWithLoad => "Moving with load",
            OperationCategory::MovingWithoutLoad => "Moving without load",
            OperationCategory::IdleWithLoad => "Idle with load",
            OperationCategory::IdleWithoutLoad => "Idle without load",
        }
    }
}

impl fmt::Display for OperationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ==================== Backend Payload ====================

/// Daily report exactly as the backend sends it.
///
/// Every field is optional and loosely typed: a section or value of an
/// unexpected JSON type decodes as absent instead of failing the whole
/// payload, so `normalize` falls back for that field alone.
#[derive(Debug, Default, Deserialize)]
pub struct RawDailyReport {
    #[serde(default, deserialize_with = "lenient")]
    pub daily_stats: Option<RawDailyStats>,
    #[serde(default, deserialize_with = "lenient")]
    pub breakdown: Option<HashMap<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawDailyStats {
    pub start_time: Option<Value>,
    pub end_time: Option<Value>,
    pub working_hours: Option<Value>,
    pub utilized_hours: Option<Value>,
    pub utilization_percent: Option<Value>,
}

/// Decode `T`, or `None` when the value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// ==================== View-Model ====================

/// Accumulated duration per operating state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    pub moving_with_load: String,
    pub moving_without_load: String,
    pub idle_with_load: String,
    pub idle_without_load: String,
}

impl Breakdown {
    pub fn duration(&self, category: OperationCategory) -> &str {
        match category {
            OperationCategory::MovingWithLoad => &self.moving_with_load,
            OperationCategory::MovingWithoutLoad => &self.moving_without_load,
            OperationCategory::IdleWithLoad => &self.idle_with_load,
            OperationCategory::IdleWithoutLoad => &self.idle_without_load,
        }
    }
}

impl Default for Breakdown {
    fn default() -> Self {
        Self {
            moving_with_load: FALLBACK_DURATION.to_string(),
            moving_without_load: FALLBACK_DURATION.to_string(),
            idle_with_load: FALLBACK_DURATION.to_string(),
            idle_without_load: FALLBACK_DURATION.to_string(),
        }
    }
}

/// Fully populated report for one date, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    pub start_time: String,
    pub end_time: String,
    pub working_hours: String,
    pub utilized_hours: String,
    /// Always within `0..=100`.
    pub utilization_percent: u8,
    pub breakdown: Breakdown,
}

impl Default for DailyReport {
    fn default() -> Self {
        Self {
            start_time: FALLBACK_START_TIME.to_string(),
            end_time: FALLBACK_END_TIME.to_string(),
            working_hours: FALLBACK_WORKING_HOURS.to_string(),
            utilized_hours: FALLBACK_UTILIZED_HOURS.to_string(),
            utilization_percent: FALLBACK_UTILIZATION_PERCENT,
            breakdown: Breakdown::default(),
        }
    }
}

/// Map a backend payload to the view-model, one field at a time.
pub fn normalize(raw: RawDailyReport) -> DailyReport {
    let stats = raw.daily_stats.unwrap_or_default();
    let mut breakdown = raw.breakdown.unwrap_or_default();

    let mut duration = |category: OperationCategory| {
        breakdown
            .remove(category.key())
            .and_then(|mut entry| entry.get_mut("duration").map(Value::take))
            .and_then(as_text)
            .unwrap_or_else(|| FALLBACK_DURATION.to_string())
    };

    let breakdown = Breakdown {
        moving_with_load: duration(OperationCategory::MovingWithLoad),
        moving_without_load: duration(OperationCategory::MovingWithoutLoad),
        idle_with_load: duration(OperationCategory::IdleWithLoad),
        idle_without_load: duration(OperationCategory::IdleWithoutLoad),
    };

    DailyReport {
        start_time: text_or(stats.start_time, FALLBACK_START_TIME),
        end_time: text_or(stats.end_time, FALLBACK_END_TIME),
        working_hours: text_or(stats.working_hours, FALLBACK_WORKING_HOURS),
        utilized_hours: text_or(stats.utilized_hours, FALLBACK_UTILIZED_HOURS),
        utilization_percent: stats
            .utilization_percent
            .and_then(as_percent)
            .unwrap_or(FALLBACK_UTILIZATION_PERCENT),
        breakdown,
    }
}

fn text_or(value: Option<Value>, fallback: &str) -> String {
    value
        .and_then(as_text)
        .unwrap_or_else(|| fallback.to_string())
}

/// Display text from a string or a number. Blank strings count as missing.
fn as_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Whole percentage from a number or a numeric string.
fn as_percent(value: Value) -> Option<u8> {
    let value = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite())?,
        _ => return None,
    };
    Some(clamp_percent(value))
}

/// Round to the nearest whole percent and clamp into `0..=100`.
pub fn clamp_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
