//! Data models for records fetched from the disaster backend.
//!
//! # Canonical vs. translated fields
//!
//! Every record carries canonical (Japanese) values, plus optional translated
//! values for the requested language. Any decision that affects behavior
//! (color, risk banding, ordering) reads the canonical field. Translated
//! fields are presentation-only: their coverage is incomplete and differs
//! between languages.

use serde::{Deserialize, Deserializer, Serialize};

use crate::i18n::Language;

/// Publishing authority assumed when a weather payload omits it.
pub const DEFAULT_PUBLISHING_OFFICE: &str = "気象庁";

/// A single earthquake event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterRecord {
    /// Provider identifier, stable across refreshes.
    pub id: String,

    /// Event time as sent by the provider.
    pub time: String,

    /// Canonical hypocenter name.
    pub location: String,

    #[serde(default)]
    pub location_translated: Option<String>,

    pub magnitude: f64,

    /// Canonical maximum seismic intensity code (e.g. "5弱").
    pub max_intensity: String,

    #[serde(default)]
    pub max_intensity_translated: Option<String>,

    /// Hypocenter depth in kilometers.
    pub depth: f64,

    /// Absent when missing or not a number.
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub latitude: Option<f64>,

    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub longitude: Option<f64>,

    /// Canonical tsunami warning value ("なし" when there is none).
    pub tsunami_warning: String,

    #[serde(default)]
    pub tsunami_warning_translated: Option<String>,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub message_translated: Option<String>,
}

impl DisasterRecord {
    /// Coordinates usable for a map marker, if both are present and in range.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.latitude?;
        let lon = self.longitude?;
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        valid.then_some((lat, lon))
    }
}

/// Accept a JSON number or numeric string; anything else becomes `None`.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// A weather overview for one target area, in canonical shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub area: String,
    pub area_translated: Option<String>,
    pub area_code: Option<String>,
    pub publishing_office: String,
    pub report_datetime: String,
    pub headline: Option<String>,
    /// Canonical body. Stays available when a translation is shown.
    pub text: String,
    pub text_translated: Option<String>,
}

/// Weather payload as received on the wire.
///
/// The backend and the upstream provider have used two naming conventions
/// for the same concepts (`area`/`targetArea`, `publishing_office`/
/// `publishingOffice`, `report_datetime`/`reportDatetime`,
/// `headline`/`headlineText`). Both are accepted here and collapsed by
/// [`WeatherPayload::normalize`]; nothing past this boundary sees either shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherPayload {
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default, rename = "targetArea")]
    pub target_area: Option<String>,
    #[serde(default)]
    pub area_translated: Option<String>,
    #[serde(default)]
    pub area_code: Option<String>,
    #[serde(default)]
    pub publishing_office: Option<String>,
    #[serde(default, rename = "publishingOffice")]
    pub publishing_office_camel: Option<String>,
    #[serde(default)]
    pub report_datetime: Option<String>,
    #[serde(default, rename = "reportDatetime")]
    pub report_datetime_camel: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default, rename = "headlineText")]
    pub headline_text: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub text_translated: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn first_non_empty(primary: Option<String>, secondary: Option<String>) -> Option<String> {
    non_empty(primary).or_else(|| non_empty(secondary))
}

impl WeatherPayload {
    /// Collapse both naming conventions into a [`WeatherReport`].
    ///
    /// The first convention wins when both carry a non-empty value.
    pub fn normalize(self) -> WeatherReport {
        WeatherReport {
            area: first_non_empty(self.area, self.target_area).unwrap_or_default(),
            area_translated: non_empty(self.area_translated),
            area_code: non_empty(self.area_code),
            publishing_office: first_non_empty(self.publishing_office, self.publishing_office_camel)
                .unwrap_or_else(|| DEFAULT_PUBLISHING_OFFICE.to_string()),
            report_datetime: first_non_empty(self.report_datetime, self.report_datetime_camel)
                .unwrap_or_default(),
            headline: first_non_empty(self.headline, self.headline_text),
            text: self.text.unwrap_or_default(),
            text_translated: non_empty(self.text_translated),
        }
    }
}

/// A weather warning or advisory in effect for an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterAlert {
    pub id: String,

    /// Provider alert type (e.g. "warning", "advisory", "special_warning").
    #[serde(rename = "type", default)]
    pub alert_type: String,

    /// Canonical title.
    pub title: String,

    #[serde(default)]
    pub title_translated: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub description_translated: Option<String>,

    #[serde(default)]
    pub area: String,

    #[serde(default)]
    pub issued_at: String,

    #[serde(default)]
    pub expires_at: Option<String>,

    /// Canonical severity ("low", "medium", "high", "extreme").
    #[serde(default)]
    pub severity: String,
}

/// A selectable weather forecast area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherArea {
    pub code: &'static str,
    pub name_ja: &'static str,
    pub name_en: &'static str,
}

/// Areas offered in the weather area selector.
pub const WEATHER_AREAS: &[WeatherArea] = &[
    WeatherArea { code: "130000", name_ja: "東京都", name_en: "Tokyo" },
    WeatherArea { code: "270000", name_ja: "大阪府", name_en: "Osaka" },
    WeatherArea { code: "140000", name_ja: "神奈川県", name_en: "Kanagawa" },
    WeatherArea { code: "230000", name_ja: "愛知県", name_en: "Aichi" },
    WeatherArea { code: "400000", name_ja: "福岡県", name_en: "Fukuoka" },
    WeatherArea { code: "010000", name_ja: "北海道", name_en: "Hokkaido" },
    WeatherArea { code: "040000", name_ja: "宮城県", name_en: "Miyagi" },
    WeatherArea { code: "340000", name_ja: "広島県", name_en: "Hiroshima" },
    WeatherArea { code: "471000", name_ja: "沖縄県", name_en: "Okinawa" },
];

impl WeatherArea {
    pub fn find(code: &str) -> Option<&'static WeatherArea> {
        WEATHER_AREAS.iter().find(|area| area.code == code)
    }

    /// Selector label: Japanese for Japanese-reading languages, English otherwise.
    pub fn display_name(&self, lang: Language) -> &'static str {
        match lang {
            Language::Ja | Language::EasyJa => self.name_ja,
            _ => self.name_en,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_json() -> serde_json::Value {
        json!({
            "id": "eq-1",
            "time": "2024/01/01 16:10:00",
            "location": "石川県能登地方",
            "location_translated": "Noto, Ishikawa",
            "magnitude": 7.6,
            "max_intensity": "7",
            "depth": 10,
            "latitude": 37.5,
            "longitude": 137.2,
            "tsunami_warning": "大津波警報",
            "tsunami_warning_translated": "Major Tsunami Warning",
            "message": "地震がありました"
        })
    }

    #[test]
    fn test_decode_backend_record() {
        let record: DisasterRecord = serde_json::from_value(record_json()).unwrap();
        assert_eq!(record.id, "eq-1");
        assert_eq!(record.depth, 10.0);
        assert_eq!(record.coordinates(), Some((37.5, 137.2)));
        assert_eq!(record.max_intensity_translated, None);
        assert_eq!(record.message_translated, None);
    }

    #[test]
    fn test_non_numeric_coordinates_become_absent() {
        let mut value = record_json();
        value["latitude"] = json!("north");
        value["longitude"] = json!(null);
        let record: DisasterRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, None);
        assert_eq!(record.coordinates(), None);
    }

    #[test]
    fn test_numeric_string_coordinates_accepted() {
        let mut value = record_json();
        value["latitude"] = json!("35.0");
        let record: DisasterRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.latitude, Some(35.0));
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let mut value = record_json();
        value["latitude"] = json!(-200.0);
        let record: DisasterRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.coordinates(), None);
    }

    #[test]
    fn test_normalize_snake_case_payload() {
        let payload: WeatherPayload = serde_json::from_value(json!({
            "area": "東京都",
            "area_code": "130000",
            "publishing_office": "気象庁",
            "report_datetime": "2024-05-01T10:37:00+09:00",
            "headline": "雷に注意",
            "text": "晴れ",
            "text_translated": "Sunny"
        }))
        .unwrap();
        let report = payload.normalize();
        assert_eq!(report.area, "東京都");
        assert_eq!(report.area_code.as_deref(), Some("130000"));
        assert_eq!(report.headline.as_deref(), Some("雷に注意"));
        assert_eq!(report.text, "晴れ");
        assert_eq!(report.text_translated.as_deref(), Some("Sunny"));
    }

    #[test]
    fn test_normalize_camel_case_upstream_payload() {
        let payload: WeatherPayload = serde_json::from_value(json!({
            "publishingOffice": "大阪管区気象台",
            "reportDatetime": "2024-05-01T10:37:00+09:00",
            "targetArea": "大阪府",
            "headlineText": "",
            "text": "くもり"
        }))
        .unwrap();
        let report = payload.normalize();
        assert_eq!(report.area, "大阪府");
        assert_eq!(report.publishing_office, "大阪管区気象台");
        assert_eq!(report.report_datetime, "2024-05-01T10:37:00+09:00");
        assert_eq!(report.headline, None);
        assert_eq!(report.text_translated, None);
    }

    #[test]
    fn test_normalize_falls_through_empty_first_convention() {
        let payload: WeatherPayload = serde_json::from_value(json!({
            "area": "",
            "targetArea": "沖縄本島地方",
            "text": "晴れ"
        }))
        .unwrap();
        let report = payload.normalize();
        assert_eq!(report.area, "沖縄本島地方");
        assert_eq!(report.publishing_office, DEFAULT_PUBLISHING_OFFICE);
        assert_eq!(report.report_datetime, "");
    }

    #[test]
    fn test_weather_area_lookup() {
        let osaka = WeatherArea::find("270000").unwrap();
        assert_eq!(osaka.display_name(Language::Ja), "大阪府");
        assert_eq!(osaka.display_name(Language::Vi), "Osaka");
        assert!(WeatherArea::find("999999").is_none());
    }

    #[test]
    fn test_decode_alert_with_type_field() {
        let alert: DisasterAlert = serde_json::from_value(json!({
            "id": "130000_03_202405011000",
            "type": "warning",
            "title": "大雨警報",
            "title_translated": "Heavy Rain Warning",
            "description": "東京地方に大雨警報が発表されています。",
            "area": "Tokyo Area",
            "issued_at": "2024-05-01T10:00:00+09:00",
            "severity": "high"
        }))
        .unwrap();
        assert_eq!(alert.alert_type, "warning");
        assert_eq!(alert.expires_at, None);
    }
}
