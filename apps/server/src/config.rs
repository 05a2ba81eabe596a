use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use lamina_core::constants::DEFAULT_START_DATE;
use lamina_core::report::{EndDateMode, ReportOptions};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub report: ReportOptions,
}

impl Config {
    /// Reads `LAMINA_*` variables, after loading a `.env` file if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("LAMINA_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid LAMINA_LISTEN_ADDR")?;
        let cors_allow = lookup("LAMINA_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = lookup("LAMINA_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|| "30000".into())
            .parse()
            .context("Invalid LAMINA_REQUEST_TIMEOUT_MS")?;

        let end_date_mode = match lookup("LAMINA_END_DATE_MODE") {
            Some(value) => parse_end_date_mode(&value)?,
            None => EndDateMode::default(),
        };
        let show_styled_tables = match lookup("LAMINA_STYLED_TABLES") {
            Some(value) => parse_bool(&value).context("Invalid LAMINA_STYLED_TABLES")?,
            None => true,
        };
        let default_start_date = match lookup("LAMINA_DEFAULT_START_DATE") {
            Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .context("Invalid LAMINA_DEFAULT_START_DATE")?,
            None => {
                let (y, m, d) = DEFAULT_START_DATE;
                NaiveDate::from_ymd_opt(y, m, d)
                    .ok_or_else(|| anyhow!("Invalid built-in default start date"))?
            }
        };

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            report: ReportOptions {
                show_styled_tables,
                end_date_mode,
                default_start_date,
            },
        })
    }
}

fn parse_end_date_mode(value: &str) -> anyhow::Result<EndDateMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "today" => Ok(EndDateMode::Today),
        "user" | "userselected" | "user_selected" => Ok(EndDateMode::UserSelected),
        other => Err(anyhow!(
            "Invalid LAMINA_END_DATE_MODE '{}': expected 'today' or 'user'",
            other
        )),
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("'{}' is not a boolean", other)),
    }
}
