#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use lamina_market_data::{MarketDataError, MarketDataProvider, Quote};
use lamina_server::{api::app_router, build_state_with_provider, config::Config};
use rust_decimal::Decimal;
use tower::ServiceExt;

/// Daily closes for any symbol over the requested range.
#[derive(Default)]
pub struct StubProvider {
    pub missing: HashSet<String>,
    pub failing: HashSet<String>,
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    fn id(&self) -> &'static str {
        "STUB"
    }

    async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError> {
        if self.failing.contains(symbol) {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }
        if self.missing.contains(symbol) {
            return Err(MarketDataError::NoDataForRange);
        }

        let phase = symbol.len() as f64;
        let (first, last) = (start.date_naive(), end.date_naive());
        let days = (last - first).num_days();
        Ok((0..=days)
            .map(|i| {
                let x = i as f64;
                let close = 50.0 * (1.0 + 0.001 * x + 0.02 * (0.5 * x + phase).sin());
                Quote::new(
                    Utc.from_utc_datetime(&(first + Duration::days(i)).and_time(NaiveTime::MIN)),
                    Decimal::from_f64_retain(close).unwrap()
                )
            })
            .collect())
    }
}

pub fn router_with(provider: StubProvider) -> Router {
    let config = Config::from_lookup(|_| None).unwrap();
    let state = build_state_with_provider(&config, Arc::new(provider));
    app_router(state, &config)
}

pub fn router() -> Router {
    router_with(StubProvider::default())
}

/// Start and end dates covering the last four months up to today.
pub fn recent_range() -> (NaiveDate, NaiveDate) {
    let today = Local::now().date_naive();
    (today - Duration::days(120), today)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
