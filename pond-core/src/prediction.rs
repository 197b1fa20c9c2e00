//! Prediction results returned by the suitability endpoint.
//!
//! Decoding fails closed: a response missing any required field, or carrying
//! one with the wrong JSON type, is rejected rather than half-populated.
//! Fields the endpoint sends beyond the required set are kept verbatim in
//! [`PredictionResult::extra`] so a stored result re-serializes unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Categorical suitability verdict.
///
/// Labels outside the four known grades are kept as `Other`.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SuitabilityLabel {
    Poor,
    Fair,
    Good,
    Excellent,
    Other(String),
}

impl SuitabilityLabel {
    pub fn as_str(&self) -> &str {
        match self {
            SuitabilityLabel::Poor => "Poor",
            SuitabilityLabel::Fair => "Fair",
            SuitabilityLabel::Good => "Good",
            SuitabilityLabel::Excellent => "Excellent",
            SuitabilityLabel::Other(s) => s,
        }
    }
}

impl From<String> for SuitabilityLabel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Poor" => SuitabilityLabel::Poor,
            "Fair" => SuitabilityLabel::Fair,
            "Good" => SuitabilityLabel::Good,
            "Excellent" => SuitabilityLabel::Excellent,
            _ => SuitabilityLabel::Other(value),
        }
    }
}

impl From<SuitabilityLabel> for String {
    fn from(value: SuitabilityLabel) -> Self {
        match value {
            SuitabilityLabel::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SuitabilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Structured response from the prediction endpoint.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub pond_suitability_label: SuitabilityLabel,
    pub pond_suitability_score: f64,
    /// Growth rate in g/day
    pub growth_rate: f64,
    /// Survival rate in percent
    pub survival_rate: f64,
    /// Expected yield in kg/ha
    #[serde(rename = "yield")]
    pub yield_kg_per_ha: f64,
    /// Feed conversion ratio
    pub fcr: f64,
    /// Anything else the endpoint returned, such as the input echo.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PredictionResult {
    /// Decode a response body.
    pub fn from_json(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// A numeric field echoed back by the endpoint, if present.
    pub fn echoed(&self, name: &str) -> Option<f64> {
        self.extra.get(name).and_then(Value::as_f64)
    }
}
