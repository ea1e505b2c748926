//! Enumerated user-interface string keys.

use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// Every user-facing string the dashboard renders.
///
/// The string form (camelCase) is the key used by string-indexed lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum UiKey {
    Title,
    Subtitle,
    Earthquake,
    Weather,
    Shelter,
    Checklist,
    Settings,
    Loading,
    NoData,
    LastUpdate,
    Intensity,
    Magnitude,
    Depth,
    Tsunami,
    TsunamiWarning,
    Time,
    IntensityLegend,
    ListView,
    MapView,
    FetchFailed,
    NetworkError,
    ServerError,
    Retry,
    NoEarthquakes,
    SelectArea,
    PublishedBy,
    ShowOriginal,
    ShelterUnderDevelopment,
    ShelterLocationHint,
    RenderFailed,
    Reload,
    ActiveAlerts,
    DataSources,
    Disclaimer,
}

impl UiKey {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_string_form_is_camel_case() {
        assert_eq!(UiKey::Shelter.as_str(), "shelter");
        assert_eq!(UiKey::NoData.as_str(), "noData");
        assert_eq!(UiKey::LastUpdate.as_str(), "lastUpdate");
    }

    #[test]
    fn test_parse_from_string_key() {
        assert_eq!(UiKey::from_str("shelter"), Ok(UiKey::Shelter));
        assert_eq!(UiKey::from_str("tsunamiWarning"), Ok(UiKey::TsunamiWarning));
        assert!(UiKey::from_str("doesNotExist").is_err());
    }
}
