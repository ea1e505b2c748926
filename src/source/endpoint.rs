//! Endpoint descriptors for each data category.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::i18n::Language;

/// Path of the earthquake list on the backend.
pub const EARTHQUAKES_PATH: &str = "/api/v1/earthquakes";

/// Path template of the weather overview on the backend.
pub const WEATHER_PATH: &str = "/api/v1/weather/{area_code}";

/// Path of the active warnings list on the backend.
pub const ALERTS_PATH: &str = "/api/v1/alerts";

/// Path template of the upstream provider's overview feed.
pub const UPSTREAM_OVERVIEW_PATH: &str = "/forecast/data/overview_forecast/{area_code}.json";

/// A polled data category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Earthquakes,
    Weather,
    Alerts,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Earthquakes => "earthquakes",
            Category::Weather => "weather",
            Category::Alerts => "alerts",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "earthquakes" => Ok(Category::Earthquakes),
            "weather" => Ok(Category::Weather),
            "alerts" => Ok(Category::Alerts),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// A request shape: path template, path parameters and fixed query parameters.
///
/// The active language is appended at request time so that one descriptor
/// serves every language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    template: &'static str,
    path_params: Vec<(&'static str, String)>,
    query: Vec<(&'static str, String)>,
    localized: bool,
}

impl Endpoint {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            path_params: Vec::new(),
            query: Vec::new(),
            localized: true,
        }
    }

    pub fn earthquakes(limit: u32) -> Self {
        Self::new(EARTHQUAKES_PATH).query("limit", limit.to_string())
    }

    pub fn weather(area_code: &str) -> Self {
        Self::new(WEATHER_PATH).path_param("area_code", area_code)
    }

    pub fn alerts(area_code: &str) -> Self {
        Self::new(ALERTS_PATH).query("area_code", area_code)
    }

    /// Upstream feed: no language parameter, no translated fields.
    pub fn upstream_overview(area_code: &str) -> Self {
        let mut endpoint = Self::new(UPSTREAM_OVERVIEW_PATH).path_param("area_code", area_code);
        endpoint.localized = false;
        endpoint
    }

    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    pub fn query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    /// Render the full URL for `lang` against `base_url`.
    pub fn url(&self, base_url: &str, lang: Language) -> String {
        let mut path = self.template.to_string();
        for (name, value) in &self.path_params {
            path = path.replace(&format!("{{{name}}}"), &urlencoding::encode(value));
        }

        let mut pairs: Vec<String> = self
            .query
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect();
        if self.localized {
            pairs.push(format!("lang={}", urlencoding::encode(lang.code())));
        }

        let base = base_url.trim_end_matches('/');
        if pairs.is_empty() {
            format!("{base}{path}")
        } else {
            format!("{base}{path}?{}", pairs.join("&"))
        }
    }
}
