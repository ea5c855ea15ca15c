//! Metrics over a selected company's price history

use crate::model::{TimeSeriesPoint, parse_day};
use serde::Serialize;

use super::round2;

/// Close of the most recent point, or 0 for an empty series
pub fn latest_price(series: &[TimeSeriesPoint]) -> f64 {
    series.last().map_or(0.0, |p| finite(p.close))
}

/// Close of the second-to-last point
///
/// With fewer than two points the latest price stands in, so the delta
/// collapses to zero.
pub fn previous_close(series: &[TimeSeriesPoint]) -> f64 {
    match series.len() {
        0 | 1 => latest_price(series),
        n => finite(series[n - 2].close),
    }
}

/// Latest close minus the previous close
pub fn price_delta(series: &[TimeSeriesPoint]) -> f64 {
    latest_price(series) - previous_close(series)
}

/// Day-over-day change in percent, rounded to two decimals
///
/// Zero when the previous close is not positive.
pub fn percent_change(series: &[TimeSeriesPoint]) -> f64 {
    let previous = previous_close(series);
    if previous <= 0.0 {
        return 0.0;
    }
    round2(price_delta(series) / previous * 100.0)
}

/// Highest positive `high` in the series, or the latest price if none
pub fn period_high(series: &[TimeSeriesPoint]) -> f64 {
    positive(series.iter().map(|p| p.high))
        .reduce(f64::max)
        .unwrap_or_else(|| latest_price(series))
}

/// Lowest positive `low` in the series, or the latest price if none
pub fn period_low(series: &[TimeSeriesPoint]) -> f64 {
    positive(series.iter().map(|p| p.low))
        .reduce(f64::min)
        .unwrap_or_else(|| latest_price(series))
}

/// Mean traded volume, 0 for an empty series
pub fn average_volume(series: &[TimeSeriesPoint]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let total: f64 = series.iter().map(|p| p.volume as f64).sum();
    total / series.len() as f64
}

/// Whether each point traded above the series' mean volume
pub fn volume_above_average(series: &[TimeSeriesPoint]) -> Vec<bool> {
    let average = average_volume(series);
    series.iter().map(|p| p.volume as f64 > average).collect()
}

/// Short axis label such as `"Mar 4"`; unparseable dates are returned as-is
pub fn chart_label(date: &str) -> String {
    parse_day(date).map_or_else(|| date.to_string(), |day| day.format("%b %-d").to_string())
}

fn finite(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn positive(values: impl Iterator<Item = f64>) -> impl Iterator<Item = f64> {
    values.filter(|v| v.is_finite() && *v > 0.0)
}

/// All series metrics, computed together for one render pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub latest_price: f64,
    pub previous_close: f64,
    pub price_delta: f64,
    pub percent_change: f64,
    pub period_high: f64,
    pub period_low: f64,
    pub average_volume: f64,
    pub points: usize,
}

impl SeriesSummary {
    pub fn from_series(series: &[TimeSeriesPoint]) -> Self {
        Self {
            latest_price: latest_price(series),
            previous_close: previous_close(series),
            price_delta: price_delta(series),
            percent_change: percent_change(series),
            period_high: period_high(series),
            period_low: period_low(series),
            average_volume: average_volume(series),
            points: series.len(),
        }
    }

    /// Flat or rising since the previous close
    pub fn is_up(&self) -> bool {
        self.price_delta >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closes(values: &[f64]) -> Vec<TimeSeriesPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, close)| {
                TimeSeriesPoint::new(format!("2024-03-{:02}", i + 1), *close, *close, *close, 0)
            })
            .collect()
    }

    fn volumes(values: &[u64]) -> Vec<TimeSeriesPoint> {
        values
            .iter()
            .map(|v| TimeSeriesPoint::new("2024-03-01", 1.0, 1.0, 1.0, *v))
            .collect()
    }

    #[test]
    fn test_two_point_scenario() {
        let series = closes(&[100.0, 110.0]);
        assert_eq!(price_delta(&series), 10.0);
        assert_eq!(percent_change(&series), 10.0);
        assert!(period_high(&series) >= 110.0);
        assert_eq!(crate::analytics::format_percent(percent_change(&series)), "10.00");
    }

    #[test]
    fn test_delta_uses_last_two_closes() {
        let series = closes(&[90.0, 120.5, 118.25]);
        assert_eq!(price_delta(&series), 118.25 - 120.5);
        assert_eq!(latest_price(&series), 118.25);
        assert_eq!(previous_close(&series), 120.5);
    }

    #[test]
    fn test_short_series_have_zero_delta() {
        assert_eq!(price_delta(&[]), 0.0);
        assert_eq!(price_delta(&closes(&[42.0])), 0.0);
        assert_eq!(percent_change(&closes(&[42.0])), 0.0);
        assert_eq!(latest_price(&[]), 0.0);
    }

    #[test]
    fn test_percent_change_never_divides_by_zero() {
        assert_eq!(percent_change(&closes(&[0.0, 15.0])), 0.0);
        assert_eq!(percent_change(&closes(&[-5.0, 15.0])), 0.0);
        // The delta itself still reflects the raw closes
        assert_eq!(price_delta(&closes(&[0.0, 15.0])), 15.0);
    }

    #[test]
    fn test_percent_change_rounds_to_cents() {
        let series = closes(&[3.0, 4.0]);
        assert_eq!(percent_change(&series), 33.33);
    }

    #[test]
    fn test_extremes_ignore_non_positive_values() {
        let series = vec![
            TimeSeriesPoint::new("2024-03-01", 0.0, 0.0, 100.0, 10),
            TimeSeriesPoint::new("2024-03-02", 108.0, 97.0, 104.0, 10),
            TimeSeriesPoint::new("2024-03-03", 112.0, -1.0, 110.0, 10),
        ];
        assert_eq!(period_high(&series), 112.0);
        assert_eq!(period_low(&series), 97.0);
        assert!(period_high(&series) >= period_low(&series));
    }

    #[test]
    fn test_extremes_fall_back_to_latest_price() {
        let series = vec![
            TimeSeriesPoint::new("2024-03-01", 0.0, 0.0, 50.0, 0),
            TimeSeriesPoint::new("2024-03-02", 0.0, 0.0, 55.0, 0),
        ];
        assert_eq!(period_high(&series), 55.0);
        assert_eq!(period_low(&series), 55.0);
        assert_eq!(period_high(&[]), 0.0);
    }

    #[test]
    fn test_average_volume() {
        assert_eq!(average_volume(&[]), 0.0);
        assert_eq!(average_volume(&volumes(&[10, 20])), 15.0);
    }

    #[test]
    fn test_volume_highlights() {
        let flags = volume_above_average(&volumes(&[10, 20, 30]));
        assert_eq!(flags, vec![false, false, true]);
        assert!(volume_above_average(&[]).is_empty());
    }

    #[test]
    fn test_chart_labels() {
        assert_eq!(chart_label("2024-03-04"), "Mar 4");
        assert_eq!(chart_label("2024-11-23T00:00:00"), "Nov 23");
        assert_eq!(chart_label("last week"), "last week");
    }

    #[test]
    fn test_summary_matches_individual_metrics() {
        let series = closes(&[100.0, 95.0]);
        let summary = SeriesSummary::from_series(&series);
        assert_eq!(summary.price_delta, -5.0);
        assert_eq!(summary.percent_change, -5.0);
        assert_eq!(summary.points, 2);
        assert!(!summary.is_up());
        assert!(SeriesSummary::from_series(&[]).is_up());
    }
}
