//! Core data layer for the stockdash market dashboard
//!
//! This crate fetches the company roster, price history and price
//! predictions from the market data service, keeps the dashboard state
//! consistent while those fetches overlap, and derives the metrics the
//! presentation layer renders.

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod state;

pub use api::{HttpStockApi, StockApi};
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use model::{Company, Prediction, PredictionFactors, RosterEntry, TimeSeriesPoint, Trend};
pub use orchestrator::DataOrchestrator;
pub use state::{DashboardState, ErrorState, LoadingState, Resource};
