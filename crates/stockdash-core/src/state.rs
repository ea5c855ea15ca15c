//! Client-side dashboard state owned by the orchestrator

use crate::model::{Prediction, RosterEntry, TimeSeriesPoint};
use serde::Serialize;
use std::fmt;

/// The three independently fetched resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Companies,
    StockData,
    Prediction,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Companies => "companies",
            Self::StockData => "stock data",
            Self::Prediction => "prediction",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-resource loading flags, never coalesced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadingState {
    pub companies: bool,
    pub stock_data: bool,
    pub prediction: bool,
}

impl LoadingState {
    pub fn is_loading(&self, resource: Resource) -> bool {
        match resource {
            Resource::Companies => self.companies,
            Resource::StockData => self.stock_data,
            Resource::Prediction => self.prediction,
        }
    }

    pub fn any(&self) -> bool {
        self.companies || self.stock_data || self.prediction
    }
}

/// A user-visible fetch failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorState {
    pub resource: Resource,
    pub message: String,
}

impl ErrorState {
    pub fn new(resource: Resource, message: impl Into<String>) -> Self {
        Self {
            resource,
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to fetch {}: {}", self.resource, self.message)
    }
}

/// Everything the presentation layer renders
///
/// Only the orchestrator writes this; readers get clones or borrowed views.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    pub companies: Vec<RosterEntry>,
    pub selected_company: Option<RosterEntry>,
    pub stock_data: Vec<TimeSeriesPoint>,
    pub prediction: Option<Prediction>,
    pub loading: LoadingState,
    pub error: Option<ErrorState>,
    #[serde(skip)]
    pub(crate) selection_generation: u64,
    #[serde(skip)]
    pub(crate) roster_requests: usize,
}

impl DashboardState {
    /// Symbol of the current selection
    pub fn selected_symbol(&self) -> Option<&str> {
        self.selected_company.as_ref().map(|c| c.symbol.as_str())
    }

    /// Look up a roster entry by symbol, case-insensitively
    pub fn find_company(&self, symbol: &str) -> Option<&RosterEntry> {
        self.companies
            .iter()
            .find(|c| c.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn is_selected(&self, entry: &RosterEntry) -> bool {
        self.selected_symbol() == Some(entry.symbol.as_str())
    }
}
