use log::debug;
use serde::Serialize;
use serde_json::Value;

/// Highest accepted RPM value for rings, offset and the emulated-RPM slider.
pub const RPM_MAX: u32 = 20000;

pub const RING_COUNT: usize = 4;

const RING_KEYS: [&str; RING_COUNT] = ["ring 1", "ring 2", "ring 3", "ring 4"];

/// Diagnostic payload logged whenever any field changes. Never transmitted to
/// the device; only the `{}` probe ever goes over the wire.
#[derive(Debug, Serialize)]
struct ValuesPayload {
    #[serde(rename = "ring 1")]
    ring1: u32,
    #[serde(rename = "ring 2")]
    ring2: u32,
    #[serde(rename = "ring 3")]
    ring3: u32,
    #[serde(rename = "ring 4")]
    ring4: u32,
    offset: u32,
}

#[derive(Debug, Serialize)]
struct RpmPayload {
    rpm: u32,
}

/// Four ring thresholds plus a calibration offset, all in RPM.
///
/// Fields hold the edited text: empty while the user is clearing a field,
/// otherwise a decimal integer in `0..=RPM_MAX`. Every mutation goes through
/// `sanitize`, so a non-empty field is always in range.
#[derive(Debug, Clone, Default)]
pub struct ShiftSettings {
    rings: [String; RING_COUNT],
    offset: String,
}

/// Strip non-digit characters, then clamp to `0..=RPM_MAX`. An input with no
/// digits at all comes back empty, not zero; a digit run too long to parse
/// stores 0, matching the original edit behavior.
fn sanitize(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return String::new();
    }
    let clamped = digits.parse::<u32>().map(|v| v.min(RPM_MAX)).unwrap_or(0);
    clamped.to_string()
}

fn value_or_zero(field: &str) -> u32 {
    field.parse().unwrap_or(0)
}

impl ShiftSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ring(&self, index: usize) -> &str {
        &self.rings[index]
    }

    pub fn offset(&self) -> &str {
        &self.offset
    }

    /// Apply a keystroke edit to one ring field.
    pub fn set_ring(&mut self, index: usize, raw: &str) {
        self.rings[index] = sanitize(raw);
        debug!("Values JSON: {}", self.values_json());
    }

    /// Apply a keystroke edit to the offset field.
    pub fn set_offset(&mut self, raw: &str) {
        self.offset = sanitize(raw);
        debug!("Values JSON: {}", self.values_json());
    }

    /// Current values as the diagnostic JSON object; empty fields count as 0.
    pub fn values_json(&self) -> String {
        let payload = ValuesPayload {
            ring1: value_or_zero(&self.rings[0]),
            ring2: value_or_zero(&self.rings[1]),
            ring3: value_or_zero(&self.rings[2]),
            ring4: value_or_zero(&self.rings[3]),
            offset: value_or_zero(&self.offset),
        };
        // Serialization of a plain struct with integer fields cannot fail.
        serde_json::to_string(&payload).unwrap_or_default()
    }

    /// Restore fields from a previously produced values JSON.
    ///
    /// Malformed JSON is discarded silently and every field keeps its prior
    /// value. A key that is missing or not an integer keeps that one field's
    /// current value; restored values are clamped to the valid range.
    pub fn apply_values_json(&mut self, json: &str) {
        let obj: Value = match serde_json::from_str(json) {
            Ok(v) => v,
            Err(_) => return,
        };

        let restore = |field: &str, key: &str| -> String {
            obj.get(key)
                .and_then(Value::as_i64)
                .map(|v| v.clamp(0, RPM_MAX as i64) as u32)
                .unwrap_or_else(|| value_or_zero(field))
                .to_string()
        };

        for (i, key) in RING_KEYS.into_iter().enumerate() {
            self.rings[i] = restore(&self.rings[i], key);
        }
        self.offset = restore(&self.offset, "offset");
    }
}

/// Diagnostic JSON for the emulated-RPM slider position.
pub fn rpm_json(rpm: u32) -> String {
    serde_json::to_string(&RpmPayload { rpm }).unwrap_or_default()
}
