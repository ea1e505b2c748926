//! Dashboard session: one poller per data category plus the user's selection.
//!
//! The dashboard is the single owner of every [`DataPoller`]. Language and
//! area changes are forwarded to the pollers; tab and sub-view changes only
//! touch the session and never reach the network.
//!
//! # Usage
//!
//! ```ignore
//! let dashboard = Dashboard::from_config(&config)?;
//! dashboard.start();
//! let view = dashboard.view();
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::info;

use crate::config::{Config, WeatherSource};
use crate::i18n::Language;
use crate::model::WeatherArea;
use crate::poller::{DataPoller, PollerConfig};
use crate::source::{
    AlertFeed, BackendClient, Category, EarthquakeFeed, JmaClient, WeatherFeed, WeatherOrigin,
};
use crate::view::{self, PresentationView, QuakeMode, Tab, ViewInputs, ViewSelection};

#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    #[error("unknown weather area code: {0}")]
    UnknownArea(String),
}

/// Initial session and poller settings.
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub language: Language,
    pub area_code: String,
    pub quake_limit: u32,
    pub poller: PollerConfig,
}

impl From<&Config> for DashboardSettings {
    fn from(config: &Config) -> Self {
        Self {
            language: config.language,
            area_code: config.area_code.clone(),
            quake_limit: config.quake_limit,
            poller: PollerConfig {
                interval: config.refresh_interval,
                order: config.response_order,
            },
        }
    }
}

/// Pollers keyed on the selected weather area.
struct AreaPollers {
    weather: DataPoller<WeatherFeed>,
    alerts: DataPoller<AlertFeed>,
}

impl AreaPollers {
    fn area_code(&self) -> &str {
        self.weather.source().area_code()
    }
}

struct Session {
    language: Language,
    selection: ViewSelection,
    running: bool,
}

pub struct Dashboard {
    backend: BackendClient,
    weather_origin: WeatherOrigin,
    poller_config: PollerConfig,
    earthquakes: DataPoller<EarthquakeFeed>,
    area: Mutex<AreaPollers>,
    session: Mutex<Session>,
}

impl Dashboard {
    /// Create a dashboard with stopped pollers.
    pub fn new(
        backend: BackendClient,
        weather_origin: WeatherOrigin,
        settings: DashboardSettings,
    ) -> Self {
        let earthquakes = DataPoller::new(
            EarthquakeFeed::new(backend.clone(), settings.quake_limit),
            settings.language,
            settings.poller,
        );
        let area = Self::area_pollers(
            &backend,
            &weather_origin,
            &settings.area_code,
            settings.language,
            settings.poller,
        );

        Self {
            backend,
            weather_origin,
            poller_config: settings.poller,
            earthquakes,
            area: Mutex::new(area),
            session: Mutex::new(Session {
                language: settings.language,
                selection: ViewSelection::default(),
                running: false,
            }),
        }
    }

    /// Build HTTP clients and a dashboard from environment configuration.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let backend = BackendClient::new(&config.api_url, config.timeout)?;
        let weather_origin = match config.weather_source {
            WeatherSource::Backend => WeatherOrigin::Backend(backend.clone()),
            WeatherSource::Jma => {
                WeatherOrigin::Upstream(JmaClient::new(&config.jma_url, config.timeout)?)
            }
        };
        Ok(Self::new(backend, weather_origin, DashboardSettings::from(config)))
    }

    fn area_pollers(
        backend: &BackendClient,
        weather_origin: &WeatherOrigin,
        area_code: &str,
        language: Language,
        config: PollerConfig,
    ) -> AreaPollers {
        AreaPollers {
            weather: DataPoller::new(
                WeatherFeed::new(weather_origin.clone(), area_code),
                language,
                config,
            ),
            alerts: DataPoller::new(AlertFeed::new(backend.clone(), area_code), language, config),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn area(&self) -> MutexGuard<'_, AreaPollers> {
        self.area.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start every poller. Must be called from within a tokio runtime.
    pub fn start(&self) {
        let mut session = self.session();
        session.running = true;
        self.earthquakes.start();
        let area = self.area();
        area.weather.start();
        area.alerts.start();
    }

    pub fn stop(&self) {
        let mut session = self.session();
        session.running = false;
        self.earthquakes.stop();
        let area = self.area();
        area.weather.stop();
        area.alerts.stop();
    }

    pub fn language(&self) -> Language {
        self.session().language
    }

    pub fn selection(&self) -> ViewSelection {
        self.session().selection
    }

    pub fn area_code(&self) -> String {
        self.area().area_code().to_string()
    }

    /// Switch every poller to `language`; each re-fetches immediately.
    pub fn set_language(&self, language: Language) {
        let mut session = self.session();
        if session.language == language {
            return;
        }
        info!(from = %session.language, to = %language, "Language changed");
        session.language = language;

        self.earthquakes.set_language(language);
        let area = self.area();
        area.weather.set_language(language);
        area.alerts.set_language(language);
    }

    pub fn select_tab(&self, tab: Tab) {
        self.session().selection.select_tab(tab);
    }

    pub fn set_quake_mode(&self, mode: QuakeMode) {
        self.session().selection.set_quake_mode(mode);
    }

    /// Replace the weather and alert pollers with ones for `area_code`.
    ///
    /// The previous area's state is discarded; the new pollers fetch at once
    /// if the dashboard is running.
    pub fn set_weather_area(&self, area_code: &str) -> Result<(), DashboardError> {
        let area = WeatherArea::find(area_code)
            .ok_or_else(|| DashboardError::UnknownArea(area_code.to_string()))?;

        let session = self.session();
        let mut current = self.area();
        if current.area_code() == area.code {
            return Ok(());
        }

        let next = Self::area_pollers(
            &self.backend,
            &self.weather_origin,
            area.code,
            session.language,
            self.poller_config,
        );
        if session.running {
            next.weather.start();
            next.alerts.start();
        }
        info!(from = %current.area_code(), to = %area.code, "Weather area changed");

        // Dropping the old pollers stops them.
        *current = next;
        Ok(())
    }

    /// Out-of-band fetch for one category.
    pub fn retry(&self, category: Category) {
        match category {
            Category::Earthquakes => self.earthquakes.retry(),
            Category::Weather => self.area().weather.retry(),
            Category::Alerts => self.area().alerts.retry(),
        }
    }

    /// Restart every poller with fresh state.
    pub fn reload(&self) {
        let mut session = self.session();
        info!(lang = %session.language, "Reloading all categories");
        session.running = true;
        self.earthquakes.restart();
        let area = self.area();
        area.weather.restart();
        area.alerts.restart();
    }

    /// Compose the current screen from the pollers' latest state.
    pub fn view(&self) -> PresentationView {
        let (language, selection) = {
            let session = self.session();
            (session.language, session.selection)
        };
        let earthquakes = self.earthquakes.state();
        let (area_code, weather, alerts) = {
            let area = self.area();
            (area.area_code().to_string(), area.weather.state(), area.alerts.state())
        };

        view::compose(ViewInputs {
            language,
            selection,
            weather_area: &area_code,
            earthquakes: &earthquakes,
            weather: &weather,
            alerts: &alerts,
        })
    }
}
