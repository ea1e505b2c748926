//! Environment configuration.
//!
//! Every variable is optional. Unset variables take the default; set but
//! unparseable variables are rejected with a [`ConfigError`] naming the
//! variable, so a typo never silently falls back.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::i18n::Language;
use crate::model::WeatherArea;
use crate::poller::{DEFAULT_REFRESH_INTERVAL, ResponseOrder};
use crate::source::backend::DEFAULT_BACKEND_URL;
use crate::source::jma::JMA_API_BASE;

/// Default port if not specified via environment variable.
pub const DEFAULT_PORT: u16 = 3000;

/// Default earthquake page size.
pub const DEFAULT_QUAKE_LIMIT: u32 = 10;

/// Default weather area (Tokyo).
pub const DEFAULT_AREA_CODE: &str = "130000";

/// Default per-request HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Where weather overviews are fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherSource {
    /// The disaster backend, with translations.
    #[default]
    Backend,
    /// The upstream provider's public feed, canonical text only.
    Jma,
}

impl FromStr for WeatherSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backend" => Ok(WeatherSource::Backend),
            "jma" => Ok(WeatherSource::Jma),
            other => Err(format!("expected \"backend\" or \"jma\", got {other:?}")),
        }
    }
}

fn parse_response_order(s: &str) -> Result<ResponseOrder, String> {
    match s {
        "latest" => Ok(ResponseOrder::LatestIssued),
        "last-write-wins" => Ok(ResponseOrder::LastWriteWins),
        other => Err(format!("expected \"latest\" or \"last-write-wins\", got {other:?}")),
    }
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    match s.parse::<u64>() {
        Ok(0) => Err("must be at least 1 second".to_string()),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub port: u16,
    pub refresh_interval: Duration,
    pub quake_limit: u32,
    pub language: Language,
    pub area_code: String,
    pub weather_source: WeatherSource,
    pub jma_url: String,
    pub timeout: Duration,
    pub response_order: ResponseOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BACKEND_URL.to_string(),
            port: DEFAULT_PORT,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            quake_limit: DEFAULT_QUAKE_LIMIT,
            language: Language::ROOT,
            area_code: DEFAULT_AREA_CODE.to_string(),
            weather_source: WeatherSource::default(),
            jma_url: JMA_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            response_order: ResponseOrder::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let read = |var: &'static str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Config::default();

        if let Some(url) = read("BOUSAI_API_URL") {
            config.api_url = url;
        }
        if let Some(url) = read("BOUSAI_JMA_URL") {
            config.jma_url = url;
        }
        if let Some(code) = read("BOUSAI_LANG") {
            config.language = Language::resolve(&code);
        }

        config.port = read_with(&read, "BOUSAI_PORT", |v| {
            v.parse::<u16>().map_err(|e| e.to_string())
        })?
        .unwrap_or(config.port);
        config.refresh_interval = read_with(&read, "BOUSAI_REFRESH_SECS", parse_seconds)?
            .unwrap_or(config.refresh_interval);
        config.timeout =
            read_with(&read, "BOUSAI_TIMEOUT_SECS", parse_seconds)?.unwrap_or(config.timeout);
        config.quake_limit = read_with(&read, "BOUSAI_QUAKE_LIMIT", |v| match v.parse::<u32>() {
            Ok(0) => Err("must be at least 1".to_string()),
            Ok(n) => Ok(n),
            Err(e) => Err(e.to_string()),
        })?
        .unwrap_or(config.quake_limit);
        config.area_code = read_with(&read, "BOUSAI_AREA", |v| {
            WeatherArea::find(v)
                .map(|area| area.code.to_string())
                .ok_or_else(|| "not a known weather area code".to_string())
        })?
        .unwrap_or(config.area_code);
        config.weather_source =
            read_with(&read, "BOUSAI_WEATHER_SOURCE", |v| v.parse::<WeatherSource>())?
                .unwrap_or(config.weather_source);
        config.response_order = read_with(&read, "BOUSAI_RESPONSE_ORDER", parse_response_order)?
            .unwrap_or(config.response_order);

        Ok(config)
    }
}

fn read_with<T>(
    read: &impl Fn(&'static str) -> Option<String>,
    var: &'static str,
    parser: impl Fn(&str) -> Result<T, String>,
) -> Result<Option<T>, ConfigError> {
    read(var)
        .map(|value| parser(&value).map_err(|reason| ConfigError::Invalid { var, value, reason }))
        .transpose()
}
