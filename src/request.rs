//! JSON request and response bodies.
//!
//! Decoding is lenient: every field that is absent or has the wrong
//! shape falls back to its default on its own, and a bad field never
//! rejects the whole request. Only a body that is not JSON at all is an
//! error. Structural problems that survive decoding (e.g. `days <= 0`) are
//! left to validation inside [`optimize`].
//!
//! # Request Shape
//!
//! ```json
//! {
//!   "days": 7,
//!   "shifts": ["Pagi", "Siang", "Malam"],
//!   "employees": ["A", "B", "C"],
//!   "demand": {"Pagi": 1, "Siang": 1, "Malam": 1},
//!   "rules": {"offDays": [6], "closeOnOffDays": true, "mode": "rotation"},
//!   "ga": {"populationSize": 60, "generations": 200, "seed": 7},
//!   "shiftTimes": {"Pagi": "07:00-15:00"}
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::RosterError;
use crate::ga::GaConfig;
use crate::models::{DemandProfile, RosterMode, RuleConfig, DAYS_PER_WEEK};
use crate::scheduler::{optimize, OptimizeInput, OptimizeResult};
use crate::validation::ValidationErrorKind;

/// Decoded request: the optimizer input plus pass-through display data.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeRequest {
    pub input: OptimizeInput,
    /// Opaque display data echoed back in the response.
    pub shift_times: Value,
}

impl Default for OptimizeRequest {
    fn default() -> Self {
        Self {
            input: OptimizeInput::default(),
            shift_times: Value::Object(Map::new()),
        }
    }
}

impl OptimizeRequest {
    /// Parses a request body.
    ///
    /// # Errors
    /// [`RosterError::InvalidConfiguration`] when `body` is not valid JSON.
    pub fn from_json(body: &str) -> Result<Self, RosterError> {
        let value: Value = serde_json::from_str(body).map_err(|e| {
            RosterError::invalid(
                ValidationErrorKind::MalformedRequest,
                format!("request body is not valid JSON: {e}"),
            )
        })?;
        Ok(Self::from_value(&value))
    }

    /// Decodes an already parsed body. A non-object body yields all defaults.
    pub fn from_value(value: &Value) -> Self {
        let mut request = Self::default();
        let Some(body) = value.as_object() else {
            debug!("request body is not an object; using defaults");
            return request;
        };
        let input = &mut request.input;

        if let Some(v) = body.get("days") {
            match as_integer(v) {
                Some(days) => input.days = days,
                None => fallback("days"),
            }
        }
        if let Some(v) = body.get("shifts") {
            match as_names(v) {
                Some(shifts) => input.shifts = shifts,
                None => fallback("shifts"),
            }
        }
        if let Some(v) = body.get("employees") {
            match as_names(v) {
                Some(employees) => input.employees = employees,
                None => fallback("employees"),
            }
        }
        if let Some(v) = body.get("demand") {
            match v.as_object() {
                Some(map) => input.demand = decode_demand(map),
                None => fallback("demand"),
            }
        }
        if let Some(v) = body.get("rules") {
            match v.as_object() {
                Some(map) => input.rules = decode_rules(map),
                None => fallback("rules"),
            }
        }
        if let Some(v) = body.get("ga") {
            match v.as_object() {
                Some(map) => input.ga = decode_ga(map),
                None => fallback("ga"),
            }
        }
        if let Some(v) = body.get("shiftTimes").filter(|v| !v.is_null()) {
            request.shift_times = v.clone();
        }
        request
    }

    /// Runs the optimizer and wraps the result with the pass-through fields.
    pub fn run(self) -> Result<OptimizeResponse, RosterError> {
        let result = optimize(&self.input)?;
        Ok(OptimizeResponse {
            result,
            shift_times: self.shift_times,
        })
    }
}

/// Successful response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    #[serde(flatten)]
    pub result: OptimizeResult,
    pub shift_times: Value,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&RosterError> for ErrorBody {
    fn from(err: &RosterError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Decodes and runs one request body.
///
/// Returns the HTTP status and the JSON body a transport should send.
pub fn handle(body: &str) -> (u16, Value) {
    let outcome = OptimizeRequest::from_json(body).and_then(OptimizeRequest::run);
    let encoded = outcome.and_then(|response| {
        serde_json::to_value(&response)
            .map_err(|e| RosterError::Computation(format!("failed to encode response: {e}")))
    });
    match encoded {
        Ok(value) => (200, value),
        Err(err) => {
            let body = serde_json::to_value(ErrorBody::from(&err))
                .unwrap_or_else(|_| Value::String(err.to_string()));
            (err.status_code(), body)
        }
    }
}

fn fallback(field: &str) {
    debug!(field, "malformed request field; using default");
}

/// Integer value, also accepting integral floats.
fn as_integer(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    let f = v.as_f64()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

/// Non-negative integer value.
fn as_count(v: &Value) -> Option<u64> {
    as_integer(v).and_then(|n| u64::try_from(n).ok())
}

fn as_u32(v: &Value) -> Option<u32> {
    as_count(v).map(|n| u32::try_from(n).unwrap_or(u32::MAX))
}

fn as_usize(v: &Value) -> Option<usize> {
    as_count(v).map(|n| usize::try_from(n).unwrap_or(usize::MAX))
}

/// Array of identifiers. Numbers are accepted and stringified.
fn as_names(v: &Value) -> Option<Vec<String>> {
    v.as_array()?
        .iter()
        .map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

fn decode_demand(map: &Map<String, Value>) -> DemandProfile {
    map.iter()
        .map(|(shift, v)| (shift.clone(), as_u32(v).unwrap_or(0)))
        .collect()
}

fn decode_rules(map: &Map<String, Value>) -> RuleConfig {
    let mut rules = RuleConfig::default();

    if let Some(days) = map.get("offDays").and_then(Value::as_array) {
        rules.calendar.off_days = days
            .iter()
            .filter_map(as_count)
            .filter(|&d| d < DAYS_PER_WEEK as u64)
            .map(|d| d as u8)
            .collect();
    }
    if let Some(b) = map.get("closeOnOffDays").and_then(Value::as_bool) {
        rules.calendar.close_on_off_days = b;
    }
    if let Some(b) = map.get("forbidNightToMorning").and_then(Value::as_bool) {
        rules.forbid_night_to_morning = b;
    }
    if let Some(b) = map.get("forbidDoubleShiftPerDay").and_then(Value::as_bool) {
        rules.forbid_double_shift_per_day = b;
    }
    if let Some(n) = map.get("maxShiftsPerWeek").and_then(as_u32) {
        rules.max_shifts_per_week = n;
    }
    if let Some(n) = map.get("maxNightPerWeek").and_then(as_u32) {
        rules.max_night_per_week = n;
    }
    if let Some(mode) = map.get("mode").and_then(Value::as_str) {
        rules.mode = if mode.eq_ignore_ascii_case("rotation") {
            RosterMode::Rotation
        } else {
            RosterMode::Normal
        };
    }
    if let Some(order) = map.get("rotationOrder").and_then(as_names) {
        rules.rotation_order = order;
    }
    if let Some(s) = map
        .get("rotationStrictness")
        .and_then(Value::as_f64)
        .filter(|s| s.is_finite() && *s >= 0.0)
    {
        rules.rotation_strictness = s;
    }
    if let Some(v) = map.get("nightShiftName") {
        match v {
            Value::Null => rules.night_shift_name = None,
            Value::String(s) => rules.night_shift_name = Some(s.clone()),
            _ => fallback("rules.nightShiftName"),
        }
    }
    if let Some(v) = map.get("morningShiftName") {
        match v {
            Value::Null => rules.morning_shift_name = None,
            Value::String(s) => rules.morning_shift_name = Some(s.clone()),
            _ => fallback("rules.morningShiftName"),
        }
    }
    rules
}

fn decode_ga(map: &Map<String, Value>) -> GaConfig {
    let mut ga = GaConfig::default();
    if let Some(n) = map.get("populationSize").and_then(as_usize) {
        ga.population_size = n;
    }
    if let Some(n) = map.get("generations").and_then(as_usize) {
        ga.generations = n;
    }
    if let Some(n) = map.get("elitism").and_then(as_usize) {
        ga.elitism = n;
    }
    if let Some(r) = map.get("mutationRate").and_then(Value::as_f64) {
        ga = ga.with_mutation_rate(r);
    }
    if let Some(n) = map.get("tournamentSize").and_then(as_usize) {
        ga.tournament_size = n;
    }
    if let Some(seed) = map.get("seed").and_then(as_count) {
        ga.seed = Some(seed);
    }
    if let Some(b) = map.get("parallel").and_then(Value::as_bool) {
        ga.parallel = b;
    }
    if let Some(ms) = map.get("timeLimitMs").and_then(as_count) {
        ga.time_limit_ms = Some(ms);
    }
    ga
}
