//! Client for the disaster information backend.
//!
//! The backend wraps the upstream providers and attaches translated fields
//! for the requested language. Its record formats are treated as given.

use std::time::Duration;

use crate::i18n::Language;
use crate::model::{DisasterAlert, DisasterRecord, WeatherPayload, WeatherReport};

use super::endpoint::Endpoint;
use super::error::FetchError;
use super::fetch_json;

/// Default backend address when none is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Client for querying the backend's versioned JSON API.
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client against `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Create a client with reqwest defaults (for testing).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the most recent earthquakes, most recent first.
    ///
    /// # Arguments
    ///
    /// * `limit` - Page size requested from the backend
    /// * `lang` - Language for translated fields
    pub async fn get_earthquakes(
        &self,
        limit: u32,
        lang: Language,
    ) -> Result<Vec<DisasterRecord>, FetchError> {
        let url = Endpoint::earthquakes(limit).url(&self.base_url, lang);
        fetch_json(&self.client, &url).await
    }

    /// Fetch the weather overview for an area, normalized to one shape.
    pub async fn get_weather(
        &self,
        area_code: &str,
        lang: Language,
    ) -> Result<WeatherReport, FetchError> {
        let url = Endpoint::weather(area_code).url(&self.base_url, lang);
        let payload: WeatherPayload = fetch_json(&self.client, &url).await?;
        Ok(payload.normalize())
    }

    /// Fetch warnings and advisories currently in effect for an area.
    pub async fn get_alerts(
        &self,
        area_code: &str,
        lang: Language,
    ) -> Result<Vec<DisasterAlert>, FetchError> {
        let url = Endpoint::alerts(area_code).url(&self.base_url, lang);
        fetch_json(&self.client, &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::ErrorKind;
    use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
    use serde_json::json;
    use tokio::net::TcpListener;

    async fn spawn_backend(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_get_earthquakes_decodes_list() {
        let app = Router::new().route(
            "/api/v1/earthquakes",
            get(|| async {
                Json(json!([{
                    "id": "a",
                    "time": "2024/05/01 10:00:00",
                    "location": "千葉県東方沖",
                    "magnitude": 4.9,
                    "max_intensity": "4",
                    "depth": 40,
                    "latitude": 35.7,
                    "longitude": 140.8,
                    "tsunami_warning": "なし",
                    "message": ""
                }]))
            }),
        );
        let base = spawn_backend(app).await;

        let records = BackendClient::with_base_url(&base)
            .get_earthquakes(10, Language::Ja)
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].max_intensity, "4");
    }

    #[tokio::test]
    async fn test_get_weather_normalizes_camel_case() {
        let app = Router::new().route(
            "/api/v1/weather/:area",
            get(|Path(area): Path<String>| async move {
                Json(json!({
                    "targetArea": "東京都",
                    "area_code": area,
                    "publishingOffice": "気象庁",
                    "reportDatetime": "2024-05-01T10:37:00+09:00",
                    "text": "晴れ",
                    "text_translated": "Sunny"
                }))
            }),
        );
        let base = spawn_backend(app).await;

        let report = BackendClient::with_base_url(&base)
            .get_weather("130000", Language::En)
            .await
            .unwrap();

        assert_eq!(report.area, "東京都");
        assert_eq!(report.area_code.as_deref(), Some("130000"));
        assert_eq!(report.text_translated.as_deref(), Some("Sunny"));
    }

    #[tokio::test]
    async fn test_http_500_is_server_error() {
        let app = Router::new().route(
            "/api/v1/earthquakes",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = spawn_backend(app).await;

        let err = BackendClient::with_base_url(&base)
            .get_earthquakes(10, Language::Ja)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR)));
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Bind then drop so the port is known to be closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = BackendClient::with_base_url(&format!("http://{addr}"))
            .get_earthquakes(10, Language::Ja)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NetworkError);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_malformed_body_is_server_error() {
        let app = Router::new().route("/api/v1/alerts", get(|| async { "not json" }));
        let base = spawn_backend(app).await;

        let err = BackendClient::with_base_url(&base)
            .get_alerts("130000", Language::Ja)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
        assert_eq!(err.kind(), ErrorKind::ServerError);
    }
}
