//! Remote data sources feeding the pollers.
//!
//! # Data Sources
//!
//! - [`backend`]: the disaster backend (earthquakes, weather, alerts, with translations)
//! - [`jma`]: the upstream meteorological feed, used for weather when the backend is bypassed
//!
//! The [`DataSource`] trait is the seam between a poller and the network:
//! one implementation per data category, each returning a fully decoded
//! payload or a classified [`FetchError`].

pub mod backend;
pub mod endpoint;
pub mod error;
pub mod jma;

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::i18n::Language;
use crate::model::{DisasterAlert, DisasterRecord, WeatherReport};

pub use backend::BackendClient;
pub use endpoint::{Category, Endpoint};
pub use error::{ErrorKind, FetchError};
pub use jma::JmaClient;

/// One fetchable data category.
pub trait DataSource: Send + Sync + 'static {
    type Output: Clone + Send + Sync + 'static;

    fn category(&self) -> Category;

    /// Fetch the current payload under `lang`.
    fn fetch(&self, lang: Language) -> impl Future<Output = Result<Self::Output, FetchError>> + Send;
}

/// GET `url` and decode a JSON body.
///
/// Failures before a response is received are `Network`; a non-success
/// status is `Status`; an undecodable body is `Decode`.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))
}

/// Recent earthquakes from the backend.
#[derive(Clone)]
pub struct EarthquakeFeed {
    client: BackendClient,
    limit: u32,
}

impl EarthquakeFeed {
    pub fn new(client: BackendClient, limit: u32) -> Self {
        Self { client, limit }
    }
}

impl DataSource for EarthquakeFeed {
    type Output = Vec<DisasterRecord>;

    fn category(&self) -> Category {
        Category::Earthquakes
    }

    async fn fetch(&self, lang: Language) -> Result<Self::Output, FetchError> {
        self.client.get_earthquakes(self.limit, lang).await
    }
}

/// Where weather overviews come from.
#[derive(Clone)]
pub enum WeatherOrigin {
    Backend(BackendClient),
    Upstream(JmaClient),
}

/// Weather overview for a single area.
#[derive(Clone)]
pub struct WeatherFeed {
    origin: WeatherOrigin,
    area_code: String,
}

impl WeatherFeed {
    pub fn new(origin: WeatherOrigin, area_code: &str) -> Self {
        Self {
            origin,
            area_code: area_code.to_string(),
        }
    }

    pub fn area_code(&self) -> &str {
        &self.area_code
    }
}

impl DataSource for WeatherFeed {
    type Output = WeatherReport;

    fn category(&self) -> Category {
        Category::Weather
    }

    async fn fetch(&self, lang: Language) -> Result<Self::Output, FetchError> {
        match &self.origin {
            WeatherOrigin::Backend(client) => client.get_weather(&self.area_code, lang).await,
            WeatherOrigin::Upstream(client) => client.get_overview(&self.area_code).await,
        }
    }
}

/// Warnings and advisories for a single area.
#[derive(Clone)]
pub struct AlertFeed {
    client: BackendClient,
    area_code: String,
}

impl AlertFeed {
    pub fn new(client: BackendClient, area_code: &str) -> Self {
        Self {
            client,
            area_code: area_code.to_string(),
        }
    }

    pub fn area_code(&self) -> &str {
        &self.area_code
    }
}

impl DataSource for AlertFeed {
    type Output = Vec<DisasterAlert>;

    fn category(&self) -> Category {
        Category::Alerts
    }

    async fn fetch(&self, lang: Language) -> Result<Self::Output, FetchError> {
        self.client.get_alerts(&self.area_code, lang).await
    }
}
