use std::sync::Arc;

use crate::config::Config;
use lamina_core::report::{ReportService, ReportServiceTrait};
use lamina_market_data::{MarketDataProvider, YahooProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub report_service: Arc<dyn ReportServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("LAMINA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Application state backed by Yahoo Finance.
pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = YahooProvider::new()?;
    tracing::info!("Market data provider: {}", provider.id());
    Ok(build_state_with_provider(config, Arc::new(provider)))
}

pub fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn MarketDataProvider>,
) -> Arc<AppState> {
    let report_service = Arc::new(ReportService::new(provider, config.report.clone()));
    Arc::new(AppState { report_service })
}
