//! Display metrics for a forecast

use crate::model::{Prediction, Trend};
use serde::Serialize;
use std::fmt;

use super::round2;

/// Display bucket for a confidence percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    Low,
    Moderate,
    Good,
    High,
}

impl ConfidenceTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bucket a confidence percentage; each tier includes its lower bound
pub fn confidence_tier(confidence: f64) -> ConfidenceTier {
    match confidence {
        c if c >= 75.0 => ConfidenceTier::High,
        c if c >= 60.0 => ConfidenceTier::Good,
        c if c >= 40.0 => ConfidenceTier::Moderate,
        _ => ConfidenceTier::Low,
    }
}

/// The prediction's trend, or neutral when it has none
pub fn trend_classification(prediction: Option<&Prediction>) -> Trend {
    prediction
        .and_then(|p| p.trend.clone())
        .unwrap_or(Trend::Neutral)
}

/// Predicted price minus current price
pub fn predicted_delta(prediction: &Prediction) -> f64 {
    finite(prediction.predicted_price) - finite(prediction.current_price)
}

/// Forecast change in percent, rounded to two decimals
///
/// Zero when the current price is not positive.
pub fn predicted_percent_change(prediction: &Prediction) -> f64 {
    let current = finite(prediction.current_price);
    if current <= 0.0 {
        return 0.0;
    }
    round2(predicted_delta(prediction) / current * 100.0)
}

fn finite(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Everything the prediction panel renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionSummary {
    pub current_price: f64,
    pub predicted_price: f64,
    pub confidence: f64,
    pub tier: ConfidenceTier,
    pub trend: Trend,
    pub predicted_delta: f64,
    pub predicted_percent_change: f64,
    pub trend_score: String,
    pub volume_signal: String,
}

impl PredictionSummary {
    /// Summarise a prediction; `None` when no forecast is available
    pub fn from_prediction(prediction: Option<&Prediction>) -> Option<Self> {
        let prediction = prediction.filter(|p| p.is_available())?;
        let confidence = finite(prediction.confidence).clamp(0.0, 100.0);

        Some(Self {
            current_price: finite(prediction.current_price),
            predicted_price: finite(prediction.predicted_price),
            confidence,
            tier: confidence_tier(confidence),
            trend: trend_classification(Some(prediction)),
            predicted_delta: predicted_delta(prediction),
            predicted_percent_change: predicted_percent_change(prediction),
            trend_score: prediction
                .factors
                .trend_score
                .filter(|score| *score != 0.0)
                .map_or_else(|| "N/A".to_string(), |score| score.to_string()),
            volume_signal: prediction
                .factors
                .volume_signal
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
        })
    }

    /// Forecast at or above the current price
    pub fn is_rise(&self) -> bool {
        self.predicted_delta >= 0.0
    }

    /// Headline such as `"BULLISH TREND"`
    pub fn trend_headline(&self) -> String {
        format!("{} TREND", self.trend.label().to_uppercase())
    }
}
