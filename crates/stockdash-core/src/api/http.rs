//! reqwest-backed client for the market data service

use super::StockApi;
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::model::{Company, Prediction, TimeSeriesPoint, sort_chronologically};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("stockdash/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the `/companies`, `/stock` and `/predict` endpoints
#[derive(Debug, Clone)]
pub struct HttpStockApi {
    client: Client,
    base_url: Url,
}

impl HttpStockApi {
    /// Create a client from the dashboard configuration
    ///
    /// The configured timeout applies to every request.
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Self::with_client(client, &config.base_url)
    }

    /// Create a client around a preconfigured reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: directory_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn companies_url(&self, refresh: bool, limit: u32) -> Result<Url> {
        let mut url = self.base_url.join("companies")?;
        url.query_pairs_mut()
            .append_pair("refresh", if refresh { "true" } else { "false" })
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    pub(crate) fn stock_url(&self, symbol: &str, days: u32) -> Result<Url> {
        let mut url = self.symbol_url("stock", symbol)?;
        url.query_pairs_mut().append_pair("days", &days.to_string());
        Ok(url)
    }

    pub(crate) fn predict_url(&self, symbol: &str) -> Result<Url> {
        self.symbol_url("predict", symbol)
    }

    fn symbol_url(&self, resource: &str, symbol: &str) -> Result<Url> {
        let mut url = self.base_url.join(resource)?;
        url.path_segments_mut()
            .map_err(|()| {
                DashboardError::ConfigError(format!("base URL cannot hold paths: {}", self.base_url))
            })?
            .push(symbol);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Parse a base URL so that relative joins append to its path
fn directory_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl StockApi for HttpStockApi {
    async fn get_companies(&self, refresh: bool, limit: u32) -> Result<Vec<Company>> {
        let url = self.companies_url(refresh, limit)?;
        self.get_json(url).await
    }

    async fn get_stock_data(&self, symbol: &str, days: u32) -> Result<Vec<TimeSeriesPoint>> {
        let url = self.stock_url(symbol, days)?;
        let mut points: Vec<TimeSeriesPoint> = self.get_json(url).await?;
        sort_chronologically(&mut points);
        Ok(points)
    }

    async fn get_prediction(&self, symbol: &str) -> Result<Option<Prediction>> {
        let url = self.predict_url(symbol)?;
        match self.get_json::<Prediction>(url).await {
            Ok(prediction) => Ok(prediction.into_available()),
            // The service answers 404 when it cannot forecast the symbol
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn api(base_url: &str) -> HttpStockApi {
        HttpStockApi::with_client(Client::new(), base_url).unwrap()
    }

    /// Answer every connection with the same status line and JSON body
    async fn serve(status: &'static str, body: &'static str) -> HttpStockApi {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut request = vec![0u8; 4096];
                let _ = socket.read(&mut request).await;
                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        let client = Client::builder().no_proxy().build().unwrap();
        HttpStockApi::with_client(client, &format!("http://{addr}/api")).unwrap()
    }

    #[tokio::test]
    async fn test_prediction_not_found_is_none() {
        let api = serve("404 Not Found", r#"{"error": "Prediction not available"}"#).await;
        let prediction = tokio_test::assert_ok!(api.get_prediction("TCS").await);
        assert!(prediction.is_none());
    }

    #[tokio::test]
    async fn test_zero_predicted_price_is_none() {
        let body = r#"{"predicted_price": 0, "confidence": 0, "trend": "unknown",
            "current_price": 0, "factors": {"trend_score": 0, "volume_signal": "unknown"}}"#;
        let api = serve("200 OK", body).await;
        let prediction = tokio_test::assert_ok!(api.get_prediction("TCS").await);
        assert!(prediction.is_none());
    }

    #[tokio::test]
    async fn test_prediction_is_decoded() {
        let body = r#"{"predicted_price": 3850.5, "confidence": 72.5, "trend": "bullish",
            "current_price": "3800", "factors": {"trend_score": 2, "volume_signal": "high"}}"#;
        let api = serve("200 OK", body).await;
        let prediction = tokio_test::assert_ok!(api.get_prediction("TCS").await).unwrap();
        assert_eq!(prediction.current_price, 3800.0);
        assert_eq!(prediction.predicted_price, 3850.5);
        assert_eq!(prediction.trend, Some(crate::model::Trend::Bullish));
    }

    #[tokio::test]
    async fn test_prediction_server_error_is_an_error() {
        let api = serve("500 Internal Server Error", r#"{"error": "boom"}"#).await;
        let err = tokio_test::assert_err!(api.get_prediction("TCS").await);
        assert!(matches!(err, DashboardError::HttpStatus { status: 500, .. }));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_stock_data_is_returned_oldest_first() {
        let body = r#"[
            {"date": "2024-03-06", "high": 12, "low": 10, "close": 11, "volume": 300},
            {"date": "2024-03-05", "high": 11, "low": 9, "close": 10, "volume": 200},
            {"date": "2024-03-04", "high": 10, "low": 8, "close": 9, "volume": 100}
        ]"#;
        let api = serve("200 OK", body).await;
        let points = tokio_test::assert_ok!(api.get_stock_data("TCS", 30).await);
        let dates: Vec<&str> = points.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, ["2024-03-04", "2024-03-05", "2024-03-06"]);
        assert_eq!(points[2].close, 11.0);
    }

    #[tokio::test]
    async fn test_stock_data_not_found_is_an_error() {
        let api = serve("404 Not Found", r#"{"error": "No data"}"#).await;
        let err = tokio_test::assert_err!(api.get_stock_data("TCS", 30).await);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_companies_are_decoded() {
        let body = r#"[{"symbol": "TCS", "name": "Tata Consultancy Services", "price": 3800.0,
            "change": 12.5, "pchange": 0.33, "volume": 1200000, "market_value": 1.4e13}]"#;
        let api = serve("200 OK", body).await;
        let companies = tokio_test::assert_ok!(api.get_companies(false, 15).await);
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].sector, "Unknown");
        assert_eq!(companies[0].volume, 1_200_000);
    }

    #[test]
    fn test_companies_url() {
        let url = api("http://localhost:5000/api").companies_url(true, 15).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/companies?refresh=true&limit=15"
        );
    }

    #[test]
    fn test_stock_url_with_trailing_slash_base() {
        let url = api("http://localhost:5000/api/").stock_url("TCS", 30).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/stock/TCS?days=30");
    }

    #[test]
    fn test_symbol_is_encoded_as_one_segment() {
        let url = api("http://localhost:5000/api").predict_url("M&M/X").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/predict/M&M%2FX");
    }

    #[test]
    fn test_root_base_url() {
        let url = api("https://markets.example.com").predict_url("INFY").unwrap();
        assert_eq!(url.as_str(), "https://markets.example.com/predict/INFY");
    }

    #[test]
    fn test_new_uses_configured_base_url() {
        let config = DashboardConfig::builder()
            .base_url("http://10.1.1.1:8000/v1")
            .timeout_ms(500)
            .build()
            .unwrap();
        let api = tokio_test::assert_ok!(HttpStockApi::new(&config));
        assert_eq!(api.base_url().as_str(), "http://10.1.1.1:8000/v1/");
    }

    #[test]
    fn test_invalid_base_url() {
        tokio_test::assert_err!(HttpStockApi::with_client(Client::new(), "::nope::"));
    }
}
