//! Price forecasts from `/predict/{symbol}`

use super::lenient;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative direction attached to a prediction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
    /// Any other label the service sends, kept verbatim
    Other(String),
}

impl Trend {
    pub fn label(&self) -> &str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
            Self::Other(label) => label,
        }
    }
}

/// Known labels map to their variant; a blank label reads as neutral and
/// anything else is kept exactly as sent.
impl From<String> for Trend {
    fn from(label: String) -> Self {
        match label.as_str() {
            "bullish" => Self::Bullish,
            "bearish" => Self::Bearish,
            "neutral" => Self::Neutral,
            blank if blank.trim().is_empty() => Self::Neutral,
            _ => Self::Other(label),
        }
    }
}

impl From<Trend> for String {
    fn from(trend: Trend) -> Self {
        trend.label().to_string()
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signals the forecast was derived from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionFactors {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub trend_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub volume_signal: Option<String>,
}

/// A forecast for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub current_price: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub predicted_price: f64,
    /// Confidence percentage, nominally 0 to 100
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(default)]
    pub factors: PredictionFactors,
}

impl Prediction {
    pub fn new(current_price: f64, predicted_price: f64, confidence: f64) -> Self {
        Self {
            current_price,
            predicted_price,
            confidence,
            trend: None,
            factors: PredictionFactors::default(),
        }
    }

    pub fn with_trend(mut self, trend: Trend) -> Self {
        self.trend = Some(trend);
        self
    }

    pub fn with_factors(mut self, trend_score: f64, volume_signal: impl Into<String>) -> Self {
        self.factors = PredictionFactors {
            trend_score: Some(trend_score),
            volume_signal: Some(volume_signal.into()),
        };
        self
    }

    /// A zero predicted price is the service's "no forecast" sentinel
    pub fn is_available(&self) -> bool {
        self.predicted_price != 0.0
    }

    /// Keep the prediction only if it carries a forecast
    pub fn into_available(self) -> Option<Self> {
        self.is_available().then_some(self)
    }
}
