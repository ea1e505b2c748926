//! Static UI dictionaries and the translation resolver.
//!
//! The root (Japanese) table is an exhaustive `match`, so adding a [`UiKey`]
//! without a root string fails to compile. Every other table is partial and
//! returns `None` for keys it does not cover.

use std::str::FromStr;

use tracing::warn;

use super::keys::UiKey;
use super::language::Language;

/// Root-language string for a key. Total by construction.
pub fn root(key: UiKey) -> &'static str {
    match key {
        UiKey::Title => "災害対応AI",
        UiKey::Subtitle => "多言語災害情報システム",
        UiKey::Earthquake => "地震情報",
        UiKey::Weather => "天気情報",
        UiKey::Shelter => "避難所",
        UiKey::Checklist => "防災チェックリスト",
        UiKey::Settings => "設定",
        UiKey::Loading => "読み込み中...",
        UiKey::NoData => "データがありません",
        UiKey::LastUpdate => "最終更新",
        UiKey::Intensity => "震度",
        UiKey::Magnitude => "マグニチュード",
        UiKey::Depth => "深さ",
        UiKey::Tsunami => "津波",
        UiKey::TsunamiWarning => "津波警報",
        UiKey::Time => "発生時刻",
        UiKey::IntensityLegend => "震度凡例",
        UiKey::ListView => "リスト",
        UiKey::MapView => "地図",
        UiKey::FetchFailed => "データの取得に失敗しました",
        UiKey::NetworkError => "ネットワークに接続できません",
        UiKey::ServerError => "サーバーでエラーが発生しました",
        UiKey::Retry => "再試行",
        UiKey::NoEarthquakes => "地震情報はありません",
        UiKey::SelectArea => "地域を選択",
        UiKey::PublishedBy => "発表",
        UiKey::ShowOriginal => "原文を表示",
        UiKey::ShelterUnderDevelopment => "避難所検索機能は開発中です。",
        UiKey::ShelterLocationHint => "位置情報を許可すると、最寄りの避難所を表示できます。",
        UiKey::RenderFailed => "表示中にエラーが発生しました",
        UiKey::Reload => "再読み込み",
        UiKey::ActiveAlerts => "発表中の警報",
        UiKey::DataSources => "情報元: 気象庁、P2P地震情報",
        UiKey::Disclaimer => "※この情報は参考情報です。正確な情報は公式発表をご確認ください。",
    }
}

fn en(key: UiKey) -> Option<&'static str> {
    let text = match key {
        UiKey::Title => "Disaster AI",
        UiKey::Subtitle => "Multilingual Disaster Info",
        UiKey::Earthquake => "Earthquakes",
        UiKey::Weather => "Weather",
        UiKey::Shelter => "Shelters",
        UiKey::Checklist => "Checklist",
        UiKey::Settings => "Settings",
        UiKey::Loading => "Loading...",
        UiKey::NoData => "No data available",
        UiKey::LastUpdate => "Last update",
        UiKey::Intensity => "Intensity",
        UiKey::Magnitude => "Magnitude",
        UiKey::Depth => "Depth",
        UiKey::Tsunami => "Tsunami",
        UiKey::TsunamiWarning => "Tsunami Warning",
        UiKey::Time => "Time",
        UiKey::IntensityLegend => "Intensity Legend",
        UiKey::ListView => "List",
        UiKey::MapView => "Map",
        UiKey::FetchFailed => "Failed to load data",
        UiKey::NetworkError => "Unable to reach the server",
        UiKey::ServerError => "The server returned an error",
        UiKey::Retry => "Retry",
        UiKey::NoEarthquakes => "No earthquake data",
        UiKey::SelectArea => "Select Area",
        UiKey::PublishedBy => "Published by",
        UiKey::ShowOriginal => "Show original (Japanese)",
        UiKey::ShelterUnderDevelopment => "Shelter search feature is under development.",
        UiKey::ShelterLocationHint => "Allow location access to show nearby shelters.",
        UiKey::RenderFailed => "Something went wrong while displaying this section",
        UiKey::Reload => "Reload",
        UiKey::ActiveAlerts => "Active warnings",
        UiKey::DataSources => "Data sources: Japan Meteorological Agency, P2P Earthquake",
        UiKey::Disclaimer => {
            "* This is reference information. Please check official announcements for accuracy."
        }
    };
    Some(text)
}

fn zh(key: UiKey) -> Option<&'static str> {
    match key {
        UiKey::Title => Some("灾害应对AI"),
        UiKey::Subtitle => Some("多语言灾害信息系统"),
        UiKey::Earthquake => Some("地震信息"),
        UiKey::Weather => Some("天气信息"),
        UiKey::Shelter => Some("避难所"),
        UiKey::Checklist => Some("防灾清单"),
        UiKey::Settings => Some("设置"),
        UiKey::Loading => Some("加载中..."),
        UiKey::NoData => Some("暂无数据"),
        UiKey::LastUpdate => Some("最后更新"),
        _ => None,
    }
}

fn ko(key: UiKey) -> Option<&'static str> {
    match key {
        UiKey::Title => Some("재난대응AI"),
        UiKey::Subtitle => Some("다국어 재난 정보 시스템"),
        UiKey::Earthquake => Some("지진 정보"),
        UiKey::Weather => Some("날씨 정보"),
        UiKey::Shelter => Some("대피소"),
        UiKey::Checklist => Some("방재 체크리스트"),
        UiKey::Settings => Some("설정"),
        UiKey::Loading => Some("로딩 중..."),
        UiKey::NoData => Some("데이터가 없습니다"),
        UiKey::LastUpdate => Some("마지막 업데이트"),
        _ => None,
    }
}

fn vi(key: UiKey) -> Option<&'static str> {
    match key {
        UiKey::Title => Some("AI Ứng phó Thiên tai"),
        UiKey::Subtitle => Some("Hệ thống thông tin đa ngôn ngữ"),
        UiKey::Earthquake => Some("Động đất"),
        UiKey::Weather => Some("Thời tiết"),
        UiKey::Shelter => Some("Nơi trú ẩn"),
        UiKey::Checklist => Some("Danh sách"),
        UiKey::Settings => Some("Cài đặt"),
        UiKey::Loading => Some("Đang tải..."),
        UiKey::NoData => Some("Không có dữ liệu"),
        UiKey::LastUpdate => Some("Cập nhật lần cuối"),
        _ => None,
    }
}

fn ne(key: UiKey) -> Option<&'static str> {
    match key {
        UiKey::Title => Some("विपद् प्रतिक्रिया AI"),
        UiKey::Subtitle => Some("बहुभाषिक विपद् सूचना"),
        UiKey::Earthquake => Some("भूकम्प"),
        UiKey::Weather => Some("मौसम"),
        UiKey::Shelter => Some("आश्रय"),
        UiKey::Checklist => Some("सूची"),
        UiKey::Settings => Some("सेटिङ"),
        UiKey::Loading => Some("लोड हुँदैछ..."),
        UiKey::NoData => Some("डाटा छैन"),
        UiKey::LastUpdate => Some("अन्तिम अद्यावधिक"),
        _ => None,
    }
}

fn easy_ja(key: UiKey) -> Option<&'static str> {
    match key {
        UiKey::Title => Some("さいがい じょうほう"),
        UiKey::Subtitle => Some("やさしい にほんご"),
        UiKey::Earthquake => Some("じしん"),
        UiKey::Weather => Some("てんき"),
        UiKey::Shelter => Some("ひなんじょ"),
        UiKey::Checklist => Some("もちもの"),
        UiKey::Settings => Some("せってい"),
        UiKey::Loading => Some("よみこみちゅう..."),
        UiKey::NoData => Some("データが ありません"),
        UiKey::LastUpdate => Some("さいしん"),
        _ => None,
    }
}

/// Direct table entry, without fallback.
pub fn entry(lang: Language, key: UiKey) -> Option<&'static str> {
    match lang {
        Language::Ja => Some(root(key)),
        Language::En => en(key),
        Language::Zh => zh(key),
        Language::Ko => ko(key),
        Language::Vi => vi(key),
        Language::Ne => ne(key),
        Language::EasyJa => easy_ja(key),
        // Supported for data, no UI dictionary yet.
        _ => None,
    }
}

/// Resolve a UI string along the language's fallback chain.
pub fn ui(key: UiKey, lang: Language) -> &'static str {
    lang.fallback_chain()
        .into_iter()
        .find_map(|candidate| entry(candidate, key))
        .unwrap_or_else(|| root(key))
}

/// String-keyed resolution for callers holding raw keys and language codes.
///
/// Unknown language codes resolve through the root language. A key absent
/// from the root dictionary yields an empty string and is logged as a
/// data-completeness defect; the key name is never echoed back.
pub fn translate(key: &str, lang_code: &str) -> &'static str {
    match UiKey::from_str(key) {
        Ok(key) => ui(key, Language::resolve(lang_code)),
        Err(_) => {
            warn!(key, lang = lang_code, "translation key missing from root dictionary");
            ""
        }
    }
}

/// Pick the display value of a record field.
///
/// The translated value wins only when it is non-empty and the active language
/// is not the root; otherwise the canonical value is shown.
pub fn display_field<'a>(canonical: &'a str, translated: Option<&'a str>, lang: Language) -> &'a str {
    if lang.is_root() {
        return canonical;
    }
    match translated {
        Some(text) if !text.trim().is_empty() => text,
        _ => canonical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LanguageCatalog;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_key_resolves_non_empty_in_every_language() {
        for lang in LanguageCatalog::ALL {
            for key in UiKey::iter() {
                assert!(!ui(key, lang).is_empty(), "{key:?} empty for {lang}");
            }
        }
    }

    #[test]
    fn test_missing_language_table_falls_back_to_root() {
        assert_eq!(translate("shelter", "fr"), "避難所");
        assert_eq!(ui(UiKey::Shelter, Language::Fr), root(UiKey::Shelter));
    }

    #[test]
    fn test_partial_table_falls_back_to_root_for_missing_key() {
        assert_eq!(entry(Language::Ko, UiKey::Depth), None);
        assert_eq!(ui(UiKey::Depth, Language::Ko), "深さ");
        assert_eq!(ui(UiKey::Shelter, Language::Ko), "대피소");
    }

    #[test]
    fn test_unsupported_language_code_matches_root() {
        for key in UiKey::iter() {
            assert_eq!(translate(key.as_str(), "xx"), root(key));
        }
    }

    #[test]
    fn test_unknown_key_fails_closed_to_empty() {
        assert_eq!(translate("notAKey", "en"), "");
        assert_eq!(translate("notAKey", "ja"), "");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        for key in UiKey::iter() {
            assert_eq!(ui(key, Language::Vi), ui(key, Language::Vi));
        }
        assert_eq!(translate("weather", "ne"), translate("weather", "ne"));
    }

    #[test]
    fn test_display_field_prefers_translation_off_root() {
        assert_eq!(display_field("東京都", Some("Tokyo"), Language::En), "Tokyo");
        assert_eq!(display_field("東京都", Some("Tokyo"), Language::Ja), "東京都");
        assert_eq!(display_field("東京都", None, Language::En), "東京都");
        assert_eq!(display_field("東京都", Some(""), Language::En), "東京都");
    }
}
