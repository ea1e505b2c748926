//! Per-record view models for list rows, map markers, weather and alerts.
//!
//! Display strings come from [`display_field`] and the UI dictionary; every
//! classification reads the canonical field. Record order is the provider's
//! order (most recent first) and is never changed here.

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;

use crate::classify::{AlertSeverity, IntensityStyle, classify, has_tsunami_risk};
use crate::i18n::{Language, UiKey, display_field, ui};
use crate::model::{DisasterAlert, DisasterRecord, WEATHER_AREAS, WeatherReport};

use super::panel::RenderError;

/// Display format for timestamps.
const TIME_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Provider formats tried before falling back to the raw string.
const PROVIDER_TIME_FORMATS: &[&str] = &["%Y/%m/%d %H:%M:%S", "%Y/%m/%d %H:%M", "%Y-%m-%d %H:%M:%S"];

/// Reformat a provider timestamp for display, or return it unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format(TIME_FORMAT).to_string();
    }
    PROVIDER_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|parsed| parsed.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// One earthquake, resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeRow {
    pub id: String,
    pub time: String,
    pub location: String,
    pub message: String,
    pub magnitude: String,
    pub depth: String,
    /// Display label of the intensity.
    pub intensity: String,
    /// Canonical intensity code the style was derived from.
    pub intensity_code: String,
    pub style: IntensityStyle,
    pub tsunami: String,
    pub tsunami_risk: bool,
}

/// A map marker. Only built for records with valid coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub row: EarthquakeRow,
}

fn validate(record: &DisasterRecord) -> Result<(), RenderError> {
    let invalid = |reason: &str| RenderError::InvalidRecord {
        id: record.id.clone(),
        reason: reason.to_string(),
    };
    if record.id.trim().is_empty() {
        return Err(invalid("empty identifier"));
    }
    if !record.magnitude.is_finite() {
        return Err(invalid("magnitude is not a finite number"));
    }
    if !record.depth.is_finite() || record.depth < 0.0 {
        return Err(invalid("depth must be a non-negative number"));
    }
    Ok(())
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Build the row for one record.
pub fn earthquake_row(record: &DisasterRecord, lang: Language) -> Result<EarthquakeRow, RenderError> {
    validate(record)?;

    Ok(EarthquakeRow {
        id: record.id.clone(),
        time: format_timestamp(&record.time),
        location: display_field(&record.location, record.location_translated.as_deref(), lang)
            .to_string(),
        message: display_field(&record.message, record.message_translated.as_deref(), lang)
            .to_string(),
        magnitude: format!("M{}", format_number(record.magnitude)),
        depth: format!("{}km", format_number(record.depth)),
        intensity: display_field(
            &record.max_intensity,
            record.max_intensity_translated.as_deref(),
            lang,
        )
        .to_string(),
        intensity_code: record.max_intensity.clone(),
        style: classify(&record.max_intensity),
        tsunami: display_field(
            &record.tsunami_warning,
            record.tsunami_warning_translated.as_deref(),
            lang,
        )
        .to_string(),
        tsunami_risk: has_tsunami_risk(&record.tsunami_warning),
    })
}

/// Rows for every record, in source order.
pub fn earthquake_rows(
    records: &[DisasterRecord],
    lang: Language,
) -> Result<Vec<EarthquakeRow>, RenderError> {
    records.iter().map(|record| earthquake_row(record, lang)).collect()
}

/// Markers for records with both coordinates valid, in source order.
pub fn map_markers(records: &[DisasterRecord], lang: Language) -> Result<Vec<MapMarker>, RenderError> {
    records
        .iter()
        .filter_map(|record| record.coordinates().map(|coords| (record, coords)))
        .map(|(record, (latitude, longitude))| {
            Ok(MapMarker {
                latitude,
                longitude,
                row: earthquake_row(record, lang)?,
            })
        })
        .collect()
}

/// An entry of the weather area selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaOption {
    pub code: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub fn area_options(selected: &str, lang: Language) -> Vec<AreaOption> {
    WEATHER_AREAS
        .iter()
        .map(|area| AreaOption {
            code: area.code,
            label: area.display_name(lang),
            selected: area.code == selected,
        })
        .collect()
}

/// Canonical body offered behind a disclosure when a translation is shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginalText {
    pub label: &'static str,
    pub text: String,
}

/// A weather report, resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub area: String,
    pub report_time: String,
    pub headline: Option<String>,
    pub body: String,
    pub original: Option<OriginalText>,
    pub published_by: String,
}

pub fn weather_view(report: &WeatherReport, lang: Language) -> WeatherView {
    let translated = report
        .text_translated
        .as_deref()
        .filter(|text| !text.trim().is_empty() && !lang.is_root());

    WeatherView {
        area: display_field(&report.area, report.area_translated.as_deref(), lang).to_string(),
        report_time: format_timestamp(&report.report_datetime),
        headline: report.headline.clone(),
        body: translated.unwrap_or(&report.text).to_string(),
        original: translated.map(|_| OriginalText {
            label: ui(UiKey::ShowOriginal, lang),
            text: report.text.clone(),
        }),
        published_by: format!("{}: {}", ui(UiKey::PublishedBy, lang), report.publishing_office),
    }
}

/// A banner entry for an active warning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub area: String,
    pub severity: AlertSeverity,
    pub color: &'static str,
    pub issued_at: String,
}

/// Banner-worthy alerts, in source order.
pub fn alert_banner(alerts: &[DisasterAlert], lang: Language) -> Vec<AlertRow> {
    alerts
        .iter()
        .filter_map(|alert| {
            let severity = AlertSeverity::from_canonical(&alert.severity);
            severity.is_banner_worthy().then(|| AlertRow {
                id: alert.id.clone(),
                title: display_field(&alert.title, alert.title_translated.as_deref(), lang)
                    .to_string(),
                description: display_field(
                    &alert.description,
                    alert.description_translated.as_deref(),
                    lang,
                )
                .to_string(),
                area: alert.area.clone(),
                severity,
                color: severity.color(),
                issued_at: format_timestamp(&alert.issued_at),
            })
        })
        .collect()
}
