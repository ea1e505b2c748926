//! Direct client for the Japan Meteorological Agency's public JSON feed.
//!
//! Used for weather when the backend is bypassed. The feed only uses the
//! camelCase naming convention and never carries translated fields.
//!
//! # API Reference
//!
//! Overview forecasts: `{base}/forecast/data/overview_forecast/{area_code}.json`

use std::time::Duration;

use crate::i18n::Language;
use crate::model::{WeatherPayload, WeatherReport};

use super::endpoint::Endpoint;
use super::error::FetchError;
use super::fetch_json;

/// Base URL for the JMA bosai feed.
pub const JMA_API_BASE: &str = "https://www.jma.go.jp/bosai";

/// Client for the upstream meteorological feed.
#[derive(Clone)]
pub struct JmaClient {
    client: reqwest::Client,
    base_url: String,
}

impl JmaClient {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Create a client with a custom base URL (for testing).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Fetch the overview forecast for an area.
    ///
    /// # Arguments
    ///
    /// * `area_code` - Six-digit prefecture office code (e.g., "130000" for Tokyo)
    pub async fn get_overview(&self, area_code: &str) -> Result<WeatherReport, FetchError> {
        // Language is ignored: the upstream feed is Japanese only.
        let url = Endpoint::upstream_overview(area_code).url(&self.base_url, Language::ROOT);
        let payload: WeatherPayload = fetch_json(&self.client, &url).await?;
        let mut report = payload.normalize();
        if report.area_code.is_none() {
            report.area_code = Some(area_code.to_string());
        }
        Ok(report)
    }
}
