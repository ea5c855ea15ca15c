//! Pure derived metrics for rendering
//!
//! Nothing here touches the network or the dashboard state; every function
//! takes borrowed data and returns plain values.

pub mod prediction;
pub mod roster;
pub mod series;

pub use prediction::{
    ConfidenceTier, PredictionSummary, confidence_tier, predicted_delta, predicted_percent_change,
    trend_classification,
};
pub use roster::{filter_companies, is_gaining, market_value_range, unique_sectors};
pub use series::{
    SeriesSummary, average_volume, chart_label, latest_price, percent_change, period_high,
    period_low, previous_close, price_delta, volume_above_average,
};

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Two-decimal rendering used for every percentage on the dashboard
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(-0.504), -0.5);
        assert_eq!(round2(10.0), 10.0);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(10.0), "10.00");
        assert_eq!(format_percent(-0.5), "-0.50");
        assert_eq!(format_percent(0.0), "0.00");
    }
}
