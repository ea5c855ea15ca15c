//! Roster company records

use super::lenient;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

fn unknown_sector() -> String {
    "Unknown".to_string()
}

/// A listed company as returned by `/companies`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "unknown_sector")]
    pub sector: String,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub price: f64,
    /// Absolute change since the previous close
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub change: f64,
    /// Percent change since the previous close
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub pchange: f64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub volume: u64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub market_value: f64,
}

impl Company {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            sector: unknown_sector(),
            price: 0.0,
            change: 0.0,
            pchange: 0.0,
            volume: 0,
            market_value: 0.0,
        }
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }

    pub fn with_quote(mut self, price: f64, change: f64, pchange: f64) -> Self {
        self.price = price;
        self.change = change;
        self.pchange = pchange;
        self
    }

    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_market_value(mut self, market_value: f64) -> Self {
        self.market_value = market_value;
        self
    }
}

/// A company that belongs to the orchestrator's current roster
///
/// Only the orchestrator creates these, so holding one proves the company
/// came from a roster fetch. Selection commands accept nothing else.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RosterEntry(Arc<Company>);

impl RosterEntry {
    pub(crate) fn new(company: Company) -> Self {
        Self(Arc::new(company))
    }

    pub fn company(&self) -> &Company {
        &self.0
    }
}

impl Deref for RosterEntry {
    type Target = Company;

    fn deref(&self) -> &Company {
        &self.0
    }
}
