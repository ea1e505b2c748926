//! Presentation view model.
//!
//! [`compose`] is a pure function of the three refresh states, the active
//! language and the view selection. It performs no I/O: switching tabs or
//! the earthquake sub-view only selects a different view of data that has
//! already been fetched.

pub mod panel;
pub mod rows;
pub mod selection;

use serde::Serialize;

use crate::classify::legend;
use crate::i18n::{Language, UiKey, ui};
use crate::model::{DisasterAlert, DisasterRecord, WeatherReport};
use crate::poller::{ErrorKind, RefreshState};
use crate::source::Category;

pub use panel::{PanelAction, PanelContent, PanelView, RenderError};
pub use rows::{AlertRow, EarthquakeRow, MapMarker, WeatherView};
pub use selection::{QuakeMode, Tab, ViewSelection};

/// Everything [`compose`] reads.
#[derive(Debug, Clone, Copy)]
pub struct ViewInputs<'a> {
    pub language: Language,
    pub selection: ViewSelection,
    pub weather_area: &'a str,
    pub earthquakes: &'a RefreshState<Vec<DisasterRecord>>,
    pub weather: &'a RefreshState<WeatherReport>,
    pub alerts: &'a RefreshState<Vec<DisasterAlert>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub language: Language,
    pub language_label: &'static str,
}

/// A navigation button (tab or sub-view toggle).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavEntry<T> {
    pub value: T,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingSummary {
    None,
    Some,
    All,
}

/// Shown when any category is in error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBanner {
    pub message: String,
    pub categories: Vec<Category>,
    pub retry: Vec<PanelAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateState {
    pub loading: LoadingSummary,
    pub error_banner: Option<ErrorBanner>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertsBanner {
    pub title: &'static str,
    pub alerts: Vec<AlertRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Footer {
    pub data_sources: &'static str,
    pub disclaimer: &'static str,
}

/// The fully resolved screen for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationView {
    pub header: Header,
    pub tabs: Vec<NavEntry<Tab>>,
    pub quake_modes: Vec<NavEntry<QuakeMode>>,
    pub active_tab: Tab,
    pub panel: PanelView,
    pub alerts: Option<AlertsBanner>,
    pub aggregate: AggregateState,
    pub footer: Footer,
}

/// Loading/error status of one category, stripped of its payload.
#[derive(Debug, Clone, Copy)]
struct Status {
    category: Category,
    loading: bool,
    error: Option<(ErrorKind, bool)>,
}

impl Status {
    fn of<T>(category: Category, state: &RefreshState<T>) -> Self {
        let error = match state {
            RefreshState::Error {
                kind, retryable, ..
            } => Some((*kind, *retryable)),
            _ => None,
        };
        Self {
            category,
            loading: state.is_loading(),
            error,
        }
    }
}

fn aggregate(statuses: &[Status], lang: Language) -> AggregateState {
    let loading_count = statuses.iter().filter(|s| s.loading).count();
    let loading = match loading_count {
        0 => LoadingSummary::None,
        n if n == statuses.len() => LoadingSummary::All,
        _ => LoadingSummary::Some,
    };

    let failed: Vec<_> = statuses
        .iter()
        .filter_map(|s| s.error.map(|(kind, retryable)| (s.category, kind, retryable)))
        .collect();

    let error_banner = failed.first().map(|(_, kind, _)| ErrorBanner {
        message: panel::error_message(*kind, lang),
        categories: failed.iter().map(|(category, ..)| *category).collect(),
        retry: failed
            .iter()
            .filter(|(_, _, retryable)| *retryable)
            .map(|(category, ..)| PanelAction::Retry {
                category: *category,
                label: ui(UiKey::Retry, lang),
            })
            .collect(),
    });

    AggregateState {
        loading,
        error_banner,
    }
}

fn earthquake_content(
    records: &[DisasterRecord],
    mode: QuakeMode,
    lang: Language,
) -> Result<PanelContent, RenderError> {
    Ok(match mode {
        QuakeMode::List => PanelContent::EarthquakeList {
            rows: rows::earthquake_rows(records, lang)?,
            empty_notice: records.is_empty().then(|| ui(UiKey::NoEarthquakes, lang)),
        },
        QuakeMode::Map => PanelContent::EarthquakeMap {
            markers: rows::map_markers(records, lang)?,
            legend_title: ui(UiKey::IntensityLegend, lang),
            legend: legend(),
        },
    })
}

fn active_panel(inputs: &ViewInputs<'_>) -> PanelView {
    let lang = inputs.language;
    let tab = inputs.selection.tab;

    panel::render_panel(tab, lang, || match tab {
        Tab::Earthquake => panel::panel_for(
            Category::Earthquakes,
            inputs.earthquakes,
            lang,
            |records| earthquake_content(records, inputs.selection.quake_mode, lang),
        ),
        Tab::Weather => panel::panel_for(Category::Weather, inputs.weather, lang, |report| {
            Ok(PanelContent::Weather {
                select_label: ui(UiKey::SelectArea, lang),
                areas: rows::area_options(inputs.weather_area, lang),
                report: rows::weather_view(report, lang),
            })
        }),
        Tab::Shelter => Ok(panel::shelter_panel(lang)),
        Tab::Checklist => Ok(panel::checklist_panel(lang)),
    })
}

/// Build the screen from already-fetched state.
pub fn compose(inputs: ViewInputs<'_>) -> PresentationView {
    let lang = inputs.language;
    let selection = inputs.selection;

    let tabs = Tab::ALL
        .iter()
        .map(|&tab| NavEntry {
            value: tab,
            label: ui(tab.label_key(), lang),
            active: tab == selection.tab,
        })
        .collect();

    let quake_modes = [QuakeMode::List, QuakeMode::Map]
        .iter()
        .map(|&mode| NavEntry {
            value: mode,
            label: ui(mode.label_key(), lang),
            active: mode == selection.quake_mode,
        })
        .collect();

    let alerts = inputs
        .alerts
        .data()
        .map(|alerts| rows::alert_banner(alerts, lang))
        .filter(|rows| !rows.is_empty())
        .map(|alerts| AlertsBanner {
            title: ui(UiKey::ActiveAlerts, lang),
            alerts,
        });

    let statuses = [
        Status::of(Category::Earthquakes, inputs.earthquakes),
        Status::of(Category::Weather, inputs.weather),
        Status::of(Category::Alerts, inputs.alerts),
    ];

    PresentationView {
        header: Header {
            title: ui(UiKey::Title, lang),
            subtitle: ui(UiKey::Subtitle, lang),
            language: lang,
            language_label: lang.label(),
        },
        tabs,
        quake_modes,
        active_tab: selection.tab,
        panel: active_panel(&inputs),
        alerts,
        aggregate: aggregate(&statuses, lang),
        footer: Footer {
            data_sources: ui(UiKey::DataSources, lang),
            disclaimer: ui(UiKey::Disclaimer, lang),
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn record(id: &str, latitude: Option<f64>) -> DisasterRecord {
        DisasterRecord {
            id: id.to_string(),
            time: "2024-01-01T16:10:00+09:00".to_string(),
            location: "石川県能登地方".to_string(),
            location_translated: None,
            magnitude: 7.6,
            max_intensity: "7".to_string(),
            max_intensity_translated: None,
            depth: 10.0,
            latitude,
            longitude: Some(137.2),
            tsunami_warning: "大津波警報".to_string(),
            tsunami_warning_translated: None,
            message: String::new(),
            message_translated: None,
        }
    }

    fn ready<T>(data: T) -> RefreshState<T> {
        RefreshState::Ready {
            data,
            fetched_at: Utc::now(),
        }
    }

    fn network_error<T>() -> RefreshState<T> {
        RefreshState::Error {
            kind: ErrorKind::NetworkError,
            retryable: true,
            message: "connection refused".to_string(),
        }
    }

    struct Fixture {
        earthquakes: RefreshState<Vec<DisasterRecord>>,
        weather: RefreshState<WeatherReport>,
        alerts: RefreshState<Vec<DisasterAlert>>,
    }

    impl Fixture {
        fn loading() -> Self {
            Self {
                earthquakes: RefreshState::Loading,
                weather: RefreshState::Loading,
                alerts: RefreshState::Loading,
            }
        }

        fn compose(&self, language: Language, selection: ViewSelection) -> PresentationView {
            compose(ViewInputs {
                language,
                selection,
                weather_area: "130000",
                earthquakes: &self.earthquakes,
                weather: &self.weather,
                alerts: &self.alerts,
            })
        }
    }

    #[test]
    fn test_all_loading() {
        let view = Fixture::loading().compose(Language::Ja, ViewSelection::default());
        assert_eq!(view.aggregate.loading, LoadingSummary::All);
        assert!(view.aggregate.error_banner.is_none());
        assert_eq!(view.panel, PanelView::Loading { message: "読み込み中..." });
    }

    #[test]
    fn test_some_loading_with_error_banner() {
        let fixture = Fixture {
            earthquakes: network_error(),
            ..Fixture::loading()
        };
        let view = fixture.compose(Language::En, ViewSelection::default());

        assert_eq!(view.aggregate.loading, LoadingSummary::Some);
        let banner = view.aggregate.error_banner.expect("error banner");
        assert_eq!(banner.categories, vec![Category::Earthquakes]);
        assert_eq!(banner.retry.len(), 1);
        assert_eq!(banner.message, "Failed to load data: Unable to reach the server");
    }

    #[test]
    fn test_list_and_map_share_fetched_records() {
        let fixture = Fixture {
            earthquakes: ready(vec![record("a", Some(37.5)), record("b", None), record("c", Some(35.0))]),
            ..Fixture::loading()
        };

        let list = fixture.compose(Language::Ja, ViewSelection::default());
        let PanelView::Ready { content: PanelContent::EarthquakeList { rows, empty_notice }, .. } =
            list.panel
        else {
            panic!("expected list panel");
        };
        assert_eq!(rows.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), ["a", "b", "c"]);
        assert!(empty_notice.is_none());

        let map = fixture.compose(
            Language::Ja,
            ViewSelection {
                quake_mode: QuakeMode::Map,
                ..ViewSelection::default()
            },
        );
        let PanelView::Ready { content: PanelContent::EarthquakeMap { markers, legend, .. }, .. } =
            map.panel
        else {
            panic!("expected map panel");
        };
        assert_eq!(
            markers.iter().map(|m| m.row.id.as_str()).collect::<Vec<_>>(),
            ["a", "c"]
        );
        assert_eq!(legend.len(), 9);
    }

    #[test]
    fn test_empty_feed_shows_notice() {
        let fixture = Fixture {
            earthquakes: ready(vec![]),
            ..Fixture::loading()
        };
        let view = fixture.compose(Language::En, ViewSelection::default());
        let PanelView::Ready { content: PanelContent::EarthquakeList { empty_notice, .. }, .. } =
            view.panel
        else {
            panic!("expected list panel");
        };
        assert_eq!(empty_notice, Some("No earthquake data"));
    }

    #[test]
    fn test_bad_record_is_caught_at_panel_boundary() {
        let mut broken = record("a", Some(37.5));
        broken.magnitude = f64::NAN;
        let fixture = Fixture {
            earthquakes: ready(vec![broken]),
            ..Fixture::loading()
        };

        let view = fixture.compose(Language::En, ViewSelection::default());
        assert!(matches!(view.panel, PanelView::RenderFailed { .. }));
        // Chrome outside the panel still renders.
        assert_eq!(view.header.title, "Disaster AI");
    }

    #[test]
    fn test_static_tabs_ignore_fetch_state() {
        let fixture = Fixture::loading();
        let mut selection = ViewSelection::default();
        selection.select_tab(Tab::Shelter);
        let view = fixture.compose(Language::En, selection);
        assert_eq!(view.panel, panel::shelter_panel(Language::En));
        assert_eq!(view.active_tab, Tab::Shelter);
        assert!(view.tabs.iter().filter(|t| t.active).all(|t| t.value == Tab::Shelter));
    }

    #[test]
    fn test_alert_banner_only_from_ready_alerts() {
        let alert = DisasterAlert {
            id: "w1".to_string(),
            alert_type: "warning".to_string(),
            title: "大雨警報".to_string(),
            title_translated: Some("Heavy Rain Warning".to_string()),
            description: String::new(),
            description_translated: None,
            area: "東京都".to_string(),
            issued_at: "2024-06-01T09:00:00+09:00".to_string(),
            expires_at: None,
            severity: "high".to_string(),
        };
        let fixture = Fixture {
            alerts: ready(vec![alert]),
            ..Fixture::loading()
        };
        let view = fixture.compose(Language::En, ViewSelection::default());
        let banner = view.alerts.expect("alerts banner");
        assert_eq!(banner.alerts[0].title, "Heavy Rain Warning");

        let view = Fixture::loading().compose(Language::En, ViewSelection::default());
        assert!(view.alerts.is_none());
    }
}
