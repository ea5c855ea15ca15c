//! Client seam for the market data service

pub mod http;

pub use http::HttpStockApi;

use crate::error::Result;
use crate::model::{Company, Prediction, TimeSeriesPoint};
use async_trait::async_trait;

/// Remote source of rosters, price history and forecasts
///
/// The orchestrator only talks to the service through this trait, so tests
/// and alternative transports can stand in for [`HttpStockApi`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockApi: Send + Sync {
    /// `GET /companies?refresh={refresh}&limit={limit}`
    ///
    /// `refresh` asks the service to bypass its own cache.
    async fn get_companies(&self, refresh: bool, limit: u32) -> Result<Vec<Company>>;

    /// `GET /stock/{symbol}?days={days}`, oldest point first
    async fn get_stock_data(&self, symbol: &str, days: u32) -> Result<Vec<TimeSeriesPoint>>;

    /// `GET /predict/{symbol}`
    ///
    /// `Ok(None)` means the service has no forecast for the symbol.
    async fn get_prediction(&self, symbol: &str) -> Result<Option<Prediction>>;
}
