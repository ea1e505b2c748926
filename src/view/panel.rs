//! Tab panels and the render-error boundary around them.
//!
//! Building a panel either succeeds or returns a [`RenderError`]. The
//! boundary in [`render_panel`] turns a failure into [`PanelView::RenderFailed`]
//! carrying a localized notice and a full-reload action. It never tries to
//! salvage part of the panel.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::classify::LegendEntry;
use crate::i18n::{Language, UiKey, ui};
use crate::poller::{ErrorKind, RefreshState};
use crate::source::Category;

use super::rows::{AreaOption, EarthquakeRow, MapMarker, WeatherView};
use super::selection::Tab;

/// Failure while building a view from otherwise-decoded data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("record {id} cannot be rendered: {reason}")]
    InvalidRecord { id: String, reason: String },
}

/// A user action offered by a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PanelAction {
    /// Out-of-band fetch for one category.
    Retry { category: Category, label: &'static str },
    /// Restart every poller.
    Reload { label: &'static str },
}

/// One preparedness checklist section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistSection {
    pub category: &'static str,
    pub items: &'static [&'static str],
}

/// What a ready panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelContent {
    EarthquakeList {
        rows: Vec<EarthquakeRow>,
        empty_notice: Option<&'static str>,
    },
    EarthquakeMap {
        markers: Vec<MapMarker>,
        legend_title: &'static str,
        legend: Vec<LegendEntry>,
    },
    Weather {
        select_label: &'static str,
        areas: Vec<AreaOption>,
        report: WeatherView,
    },
    Shelter {
        title: &'static str,
        notice: &'static str,
        hint: &'static str,
    },
    Checklist {
        sections: Vec<ChecklistSection>,
    },
}

/// Render model of the active tab panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanelView {
    Loading {
        message: &'static str,
    },
    Error {
        kind: ErrorKind,
        message: String,
        retry: Option<PanelAction>,
    },
    Ready {
        content: PanelContent,
        fetched_at: Option<DateTime<Utc>>,
    },
    RenderFailed {
        message: &'static str,
        action: PanelAction,
    },
}

/// Localized text for a fetch failure.
pub fn error_message(kind: ErrorKind, lang: Language) -> String {
    let detail = match kind {
        ErrorKind::NetworkError => ui(UiKey::NetworkError, lang),
        ErrorKind::ServerError => ui(UiKey::ServerError, lang),
    };
    format!("{}: {}", ui(UiKey::FetchFailed, lang), detail)
}

/// Map a category's refresh state to a panel, building content only when ready.
pub fn panel_for<T>(
    category: Category,
    state: &RefreshState<T>,
    lang: Language,
    build: impl FnOnce(&T) -> Result<PanelContent, RenderError>,
) -> Result<PanelView, RenderError> {
    Ok(match state {
        RefreshState::Loading => PanelView::Loading {
            message: ui(UiKey::Loading, lang),
        },
        RefreshState::Error {
            kind, retryable, ..
        } => PanelView::Error {
            kind: *kind,
            message: error_message(*kind, lang),
            retry: retryable.then(|| PanelAction::Retry {
                category,
                label: ui(UiKey::Retry, lang),
            }),
        },
        RefreshState::Ready { data, fetched_at } => PanelView::Ready {
            content: build(data)?,
            fetched_at: Some(*fetched_at),
        },
    })
}

/// Boundary around one tab panel.
pub fn render_panel(
    tab: Tab,
    lang: Language,
    build: impl FnOnce() -> Result<PanelView, RenderError>,
) -> PanelView {
    match build() {
        Ok(view) => view,
        Err(err) => {
            warn!(tab = ?tab, %lang, error = %err, "Panel render failed");
            PanelView::RenderFailed {
                message: ui(UiKey::RenderFailed, lang),
                action: PanelAction::Reload {
                    label: ui(UiKey::Reload, lang),
                },
            }
        }
    }
}

pub fn shelter_panel(lang: Language) -> PanelView {
    PanelView::Ready {
        content: PanelContent::Shelter {
            title: ui(UiKey::Shelter, lang),
            notice: ui(UiKey::ShelterUnderDevelopment, lang),
            hint: ui(UiKey::ShelterLocationHint, lang),
        },
        fetched_at: None,
    }
}

const CHECKLIST_JA: &[ChecklistSection] = &[
    ChecklistSection {
        category: "水・食料",
        items: &["飲料水（1人3L×3日分）", "非常食（3日分）", "缶詰・レトルト食品"],
    },
    ChecklistSection {
        category: "衛生用品",
        items: &["非常用トイレ", "ウェットティッシュ", "生理用品", "マスク"],
    },
    ChecklistSection {
        category: "情報・照明",
        items: &["モバイルバッテリー", "懐中電灯", "携帯ラジオ"],
    },
    ChecklistSection {
        category: "貴重品",
        items: &["現金（小銭も）", "身分証明書のコピー", "保険証のコピー"],
    },
    ChecklistSection {
        category: "その他",
        items: &["救急セット", "常備薬", "ブルーシート", "軍手"],
    },
];

const CHECKLIST_EN: &[ChecklistSection] = &[
    ChecklistSection {
        category: "Water & Food",
        items: &["Drinking water (3L×3 days/person)", "Emergency food (3 days)", "Canned/retort food"],
    },
    ChecklistSection {
        category: "Hygiene",
        items: &["Emergency toilet", "Wet wipes", "Sanitary products", "Masks"],
    },
    ChecklistSection {
        category: "Info & Light",
        items: &["Mobile battery", "Flashlight", "Portable radio"],
    },
    ChecklistSection {
        category: "Valuables",
        items: &["Cash (coins too)", "ID copy", "Insurance card copy"],
    },
    ChecklistSection {
        category: "Others",
        items: &["First aid kit", "Regular medicine", "Blue tarp", "Work gloves"],
    },
];

/// Checklist content exists in Japanese and English; other languages get English.
pub fn checklist_panel(lang: Language) -> PanelView {
    let sections = match lang {
        Language::Ja => CHECKLIST_JA,
        _ => CHECKLIST_EN,
    };
    PanelView::Ready {
        content: PanelContent::Checklist {
            sections: sections.to_vec(),
        },
        fetched_at: None,
    }
}
