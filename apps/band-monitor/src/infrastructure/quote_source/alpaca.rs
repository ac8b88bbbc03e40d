//! Alpaca Market Data quote source.
//!
//! Daily bars come from `/v2/stocks/{symbol}/bars`, the previous close and
//! the live price from `/v2/stocks/{symbol}/snapshot`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::application::ports::{QuoteSourceError, QuoteSourcePort};
use crate::domain::shared::Symbol;

/// Default market data endpoint.
pub const DEFAULT_DATA_URL: &str = "https://data.alpaca.markets";

/// Largest page Alpaca serves for bars.
const BARS_PAGE_LIMIT: &str = "10000";

/// Configuration for the Alpaca quote source.
#[derive(Clone)]
pub struct AlpacaQuoteConfig {
    /// API key.
    pub api_key: String,
    /// API secret.
    pub api_secret: String,
    /// Market data base URL.
    pub data_url: String,
    /// Data feed (`iex` or `sip`).
    pub feed: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl AlpacaQuoteConfig {
    /// Create a configuration for the public endpoint and the IEX feed.
    #[must_use]
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
            data_url: DEFAULT_DATA_URL.to_string(),
            feed: "iex".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_data_url(mut self, data_url: impl Into<String>) -> Self {
        self.data_url = data_url.into();
        self
    }

    /// Override the data feed.
    #[must_use]
    pub fn with_feed(mut self, feed: impl Into<String>) -> Self {
        self.feed = feed.into();
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for AlpacaQuoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlpacaQuoteConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("data_url", &self.data_url)
            .field("feed", &self.feed)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Alpaca quote source adapter.
pub struct AlpacaQuoteSource {
    client: reqwest::Client,
    api_key: String,
    api_secret: String,
    data_url: String,
    feed: String,
}

impl std::fmt::Debug for AlpacaQuoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlpacaQuoteSource")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("data_url", &self.data_url)
            .field("feed", &self.feed)
            .finish_non_exhaustive()
    }
}

impl AlpacaQuoteSource {
    /// Create a new adapter.
    pub fn new(config: &AlpacaQuoteConfig) -> Result<Self, QuoteSourceError> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(QuoteSourceError::transport("missing Alpaca credentials"));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QuoteSourceError::transport(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            data_url: config.data_url.trim_end_matches('/').to_string(),
            feed: config.feed.clone(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        symbol: &Symbol,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, QuoteSourceError> {
        let url = format!("{}/v2/stocks/{}/{path}", self.data_url, symbol);

        let response = self
            .client
            .get(&url)
            .header("APCA-API-KEY-ID", &self.api_key)
            .header("APCA-API-SECRET-KEY", &self.api_secret)
            .query(query)
            .send()
            .await
            .map_err(|e| QuoteSourceError::transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(QuoteSourceError::unavailable(symbol));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuoteSourceError::transport(format!(
                "HTTP {}: {body}",
                status.as_u16()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| QuoteSourceError::malformed(e.to_string()))
    }

    async fn snapshot(&self, symbol: &Symbol) -> Result<SnapshotResponse, QuoteSourceError> {
        self.get(symbol, "snapshot", &[("feed", self.feed.as_str())])
            .await
    }
}

fn to_decimal(value: f64) -> Result<Decimal, QuoteSourceError> {
    Decimal::try_from(value).map_err(|e| QuoteSourceError::malformed(e.to_string()))
}

#[async_trait]
impl QuoteSourcePort for AlpacaQuoteSource {
    async fn historical_daily_closes(
        &self,
        symbol: &Symbol,
        lookback_days: u32,
    ) -> Result<Vec<Decimal>, QuoteSourceError> {
        let start = (Utc::now() - chrono::Duration::days(i64::from(lookback_days)))
            .format("%Y-%m-%d")
            .to_string();

        let mut closes = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("timeframe", "1Day"),
                ("start", start.as_str()),
                ("limit", BARS_PAGE_LIMIT),
                ("adjustment", "all"),
                ("feed", self.feed.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("page_token", token));
            }

            let page: BarsResponse = self.get(symbol, "bars", &query).await?;
            for bar in page.bars.unwrap_or_default() {
                closes.push(to_decimal(bar.c)?);
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        if closes.is_empty() {
            return Err(QuoteSourceError::unavailable(symbol));
        }

        tracing::debug!(%symbol, bars = closes.len(), "Fetched daily bars");
        Ok(closes)
    }

    async fn previous_session_close(&self, symbol: &Symbol) -> Result<Decimal, QuoteSourceError> {
        let snapshot = self.snapshot(symbol).await?;
        let bar = snapshot
            .prev_daily_bar
            .ok_or_else(|| QuoteSourceError::unavailable(symbol))?;
        to_decimal(bar.c)
    }

    async fn latest_intraday_price(&self, symbol: &Symbol) -> Result<Decimal, QuoteSourceError> {
        let snapshot = self.snapshot(symbol).await?;

        if let Some(trade) = snapshot.latest_trade {
            return to_decimal(trade.p);
        }
        if let Some(bar) = snapshot.minute_bar {
            return to_decimal(bar.c);
        }
        Err(QuoteSourceError::unavailable(symbol))
    }
}

// API response types

#[derive(Debug, Deserialize)]
struct BarsResponse {
    bars: Option<Vec<BarData>>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BarData {
    /// Close price.
    c: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotResponse {
    latest_trade: Option<TradeData>,
    minute_bar: Option<BarData>,
    prev_daily_bar: Option<BarData>,
}

#[derive(Debug, Deserialize)]
struct TradeData {
    /// Trade price.
    p: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(server: &MockServer) -> AlpacaQuoteSource {
        let config = AlpacaQuoteConfig::new("key".to_string(), "secret".to_string())
            .with_data_url(server.uri());
        AlpacaQuoteSource::new(&config).unwrap()
    }

    #[test]
    fn creation_fails_without_credentials() {
        let config = AlpacaQuoteConfig::new(String::new(), "secret".to_string());
        assert!(AlpacaQuoteSource::new(&config).is_err());
    }

    #[test]
    fn credentials_redacted_debug() {
        let config = AlpacaQuoteConfig::new("key123".to_string(), "secret456".to_string());
        let source = AlpacaQuoteSource::new(&config).unwrap();

        for debug in [format!("{config:?}"), format!("{source:?}")] {
            assert!(!debug.contains("key123"));
            assert!(!debug.contains("secret456"));
            assert!(debug.contains("[REDACTED]"));
        }
    }

    #[tokio::test]
    async fn daily_closes_follow_pagination() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/stocks/VRT/bars"))
            .and(query_param("page_token", "next"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "bars": [{"t": "2024-06-12T04:00:00Z", "c": 103.0}],
                "symbol": "VRT",
                "next_page_token": null
            })))
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v2/stocks/VRT/bars"))
            .and(query_param("timeframe", "1Day"))
            .and(header("APCA-API-KEY-ID", "key"))
            .and(header("APCA-API-SECRET-KEY", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "bars": [
                    {"t": "2024-06-10T04:00:00Z", "c": 100.0},
                    {"t": "2024-06-11T04:00:00Z", "c": 101.5}
                ],
                "symbol": "VRT",
                "next_page_token": "next"
            })))
            .mount(&server)
            .await;

        let closes = adapter(&server)
            .historical_daily_closes(&Symbol::new("VRT"), 30)
            .await
            .unwrap();

        assert_eq!(closes, vec![dec!(100), dec!(101.5), dec!(103)]);
    }

    #[tokio::test]
    async fn empty_bars_are_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/stocks/DGRO/bars"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "bars": null,
                "symbol": "DGRO",
                "next_page_token": null
            })))
            .mount(&server)
            .await;

        let err = adapter(&server)
            .historical_daily_closes(&Symbol::new("DGRO"), 30)
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteSourceError::DataUnavailable { .. }));
    }

    #[tokio::test]
    async fn snapshot_prices() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/stocks/QCOM/snapshot"))
            .and(query_param("feed", "iex"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "symbol": "QCOM",
                "latestTrade": {"t": "2024-06-12T15:00:00Z", "p": 210.25, "s": 100},
                "minuteBar": {"t": "2024-06-12T15:00:00Z", "c": 210.0},
                "prevDailyBar": {"t": "2024-06-11T04:00:00Z", "c": 205.5}
            })))
            .mount(&server)
            .await;

        let source = adapter(&server);
        let symbol = Symbol::new("QCOM");
        assert_eq!(
            source.previous_session_close(&symbol).await.unwrap(),
            dec!(205.5)
        );
        assert_eq!(
            source.latest_intraday_price(&symbol).await.unwrap(),
            dec!(210.25)
        );
    }

    #[tokio::test]
    async fn intraday_falls_back_to_minute_bar() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/stocks/SOXL/snapshot"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "symbol": "SOXL",
                "minuteBar": {"t": "2024-06-12T15:00:00Z", "c": 55.5}
            })))
            .mount(&server)
            .await;

        let price = adapter(&server)
            .latest_intraday_price(&Symbol::new("SOXL"))
            .await
            .unwrap();
        assert_eq!(price, dec!(55.5));
    }

    #[tokio::test]
    async fn status_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/stocks/NOPE/snapshot"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/stocks/TQQQ/snapshot"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/stocks/GOOG/snapshot"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let source = adapter(&server);

        let missing = source
            .latest_intraday_price(&Symbol::new("NOPE"))
            .await
            .unwrap_err();
        assert!(matches!(missing, QuoteSourceError::DataUnavailable { .. }));

        let down = source
            .latest_intraday_price(&Symbol::new("TQQQ"))
            .await
            .unwrap_err();
        assert_eq!(
            down,
            QuoteSourceError::transport("HTTP 500: upstream down")
        );

        let garbled = source
            .latest_intraday_price(&Symbol::new("GOOG"))
            .await
            .unwrap_err();
        assert!(matches!(garbled, QuoteSourceError::Malformed { .. }));
    }
}
