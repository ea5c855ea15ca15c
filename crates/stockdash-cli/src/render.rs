//! Terminal rendering of dashboard snapshots

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use stockdash_core::analytics::{
    self, PredictionSummary, SeriesSummary, chart_label, format_percent, volume_above_average,
};
use stockdash_core::{Company, DashboardState, RosterEntry};

/// Everything `--json` prints
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub state: &'a DashboardState,
    pub companies: Vec<RosterEntry>,
    pub sectors: Vec<String>,
    pub market_value_range: Option<(f64, f64)>,
    pub analysis: Option<SeriesSummary>,
    pub prediction: Option<PredictionSummary>,
}

impl<'a> Report<'a> {
    pub fn new(state: &'a DashboardState, companies: Vec<RosterEntry>) -> Self {
        let selected = state.selected_company.is_some();
        Self {
            state,
            sectors: analytics::unique_sectors(&state.companies),
            market_value_range: analytics::market_value_range(&companies),
            companies,
            analysis: selected.then(|| SeriesSummary::from_series(&state.stock_data)),
            prediction: PredictionSummary::from_prediction(state.prediction.as_ref()),
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn rupees(value: f64) -> String {
    format!("₹{value:.2}")
}

fn signed_rupees(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "-" };
    format!("{sign}₹{:.2}", value.abs())
}

fn signed_percent(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{}%", format_percent(value))
}

fn millions(volume: f64) -> String {
    format!("{:.1}M", volume / 1_000_000.0)
}

fn direction_color(up: bool) -> Color {
    if up { Color::Green } else { Color::Red }
}

/// The company list, marking the current selection
pub fn roster_table(companies: &[RosterEntry], selected: Option<&str>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Symbol", "Name", "Sector", "Price", "Change", "Volume"]);

    for company in companies {
        let marker = if selected == Some(company.symbol.as_str()) { "▶" } else { "" };
        table.add_row(vec![
            Cell::new(marker),
            Cell::new(&company.symbol),
            Cell::new(&company.name),
            Cell::new(&company.sector),
            Cell::new(rupees(company.price)).set_alignment(CellAlignment::Right),
            change_cell(company),
            Cell::new(millions(company.volume as f64)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn change_cell(company: &Company) -> Cell {
    let text = format!(
        "{} ({})",
        signed_rupees(company.change),
        signed_percent(company.pchange)
    );
    let cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if company.change == 0.0 {
        cell
    } else {
        cell.fg(direction_color(analytics::is_gaining(company)))
    }
}

/// Headline metrics for the selected company's history
pub fn analysis_table(summary: &SeriesSummary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);

    let color = direction_color(summary.is_up());
    table.add_row(vec![Cell::new("Current price"), Cell::new(rupees(summary.latest_price))]);
    table.add_row(vec![
        Cell::new("Change"),
        Cell::new(format!(
            "{} ({})",
            signed_rupees(summary.price_delta),
            signed_percent(summary.percent_change)
        ))
        .fg(color),
    ]);
    table.add_row(vec![Cell::new("Period high"), Cell::new(rupees(summary.period_high))]);
    table.add_row(vec![Cell::new("Period low"), Cell::new(rupees(summary.period_low))]);
    table.add_row(vec![
        Cell::new("Average volume"),
        Cell::new(millions(summary.average_volume)),
    ]);
    table.add_row(vec![Cell::new("Data points"), Cell::new(summary.points)]);
    table
}

/// Per-day closes and volumes, flagging above-average volume days
pub fn history_table(state: &DashboardState) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Close", "High", "Low", "Volume"]);

    let highlights = volume_above_average(&state.stock_data);
    for (point, above) in state.stock_data.iter().zip(highlights) {
        let volume = Cell::new(millions(point.volume as f64)).set_alignment(CellAlignment::Right);
        table.add_row(vec![
            Cell::new(chart_label(&point.date)),
            Cell::new(rupees(point.close)).set_alignment(CellAlignment::Right),
            Cell::new(rupees(point.high)).set_alignment(CellAlignment::Right),
            Cell::new(rupees(point.low)).set_alignment(CellAlignment::Right),
            if above { volume.fg(Color::Cyan) } else { volume },
        ]);
    }
    table
}

/// The prediction panel, or a placeholder when nothing is available
pub fn prediction_table(summary: Option<&PredictionSummary>) -> Table {
    let mut table = new_table();
    let Some(summary) = summary else {
        table.set_header(vec!["Prediction"]);
        table.add_row(vec!["No prediction available"]);
        return table;
    };

    let color = direction_color(summary.is_rise());
    table.set_header(vec![
        Cell::new(summary.trend_headline()).fg(color),
        Cell::new(format!(
            "{:.0}% confidence ({})",
            summary.confidence, summary.tier
        )),
    ]);
    table.add_row(vec![Cell::new("Current price"), Cell::new(rupees(summary.current_price))]);
    table.add_row(vec![
        Cell::new("Predicted price"),
        Cell::new(rupees(summary.predicted_price)).fg(color),
    ]);
    table.add_row(vec![
        Cell::new("Expected change"),
        Cell::new(format!(
            "{} ({})",
            signed_rupees(summary.predicted_delta),
            signed_percent(summary.predicted_percent_change)
        ))
        .fg(color),
    ]);
    table.add_row(vec![Cell::new("Trend score"), Cell::new(&summary.trend_score)]);
    table.add_row(vec![Cell::new("Volume signal"), Cell::new(&summary.volume_signal)]);
    table
}
