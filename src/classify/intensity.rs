//! Seismic intensity classification.
//!
//! Maps a canonical intensity code on the JMA seismic scale to the visual
//! encoding used by list headers and map markers. Levels 5 and 6 are split
//! into lower (弱) and upper (強) sub-bands, which get adjacent but distinct
//! encodings.

use serde::Serialize;
use strum_macros::EnumIter;

/// One level of the seismic intensity scale, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Intensity {
    One,
    Two,
    Three,
    Four,
    FiveLower,
    FiveUpper,
    SixLower,
    SixUpper,
    Seven,
}

impl Intensity {
    /// The scale in ascending severity.
    pub const SCALE: [Intensity; 9] = [
        Intensity::One,
        Intensity::Two,
        Intensity::Three,
        Intensity::Four,
        Intensity::FiveLower,
        Intensity::FiveUpper,
        Intensity::SixLower,
        Intensity::SixUpper,
        Intensity::Seven,
    ];

    /// Parse a canonical code. Surrounding whitespace is ignored.
    pub fn from_code(code: &str) -> Option<Intensity> {
        match code.trim() {
            "1" => Some(Intensity::One),
            "2" => Some(Intensity::Two),
            "3" => Some(Intensity::Three),
            "4" => Some(Intensity::Four),
            "5弱" => Some(Intensity::FiveLower),
            "5強" => Some(Intensity::FiveUpper),
            "6弱" => Some(Intensity::SixLower),
            "6強" => Some(Intensity::SixUpper),
            "7" => Some(Intensity::Seven),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Intensity::One => "1",
            Intensity::Two => "2",
            Intensity::Three => "3",
            Intensity::Four => "4",
            Intensity::FiveLower => "5弱",
            Intensity::FiveUpper => "5強",
            Intensity::SixLower => "6弱",
            Intensity::SixUpper => "6強",
            Intensity::Seven => "7",
        }
    }

    /// Ordinal position on the scale, 1 for the weakest level.
    pub fn rank(self) -> u8 {
        self as u8 + 1
    }

    /// Marker and header color.
    pub fn color(self) -> &'static str {
        match self {
            Intensity::One => "#f0f0f0",
            Intensity::Two => "#00aaff",
            Intensity::Three => "#0041ff",
            Intensity::Four => "#fae696",
            Intensity::FiveLower => "#ffe600",
            Intensity::FiveUpper => "#ff9900",
            Intensity::SixLower => "#ff2800",
            Intensity::SixUpper => "#a50021",
            Intensity::Seven => "#b40068",
        }
    }

    /// Marker diameter in pixels. Strictly increasing along the scale.
    pub fn marker_size(self) -> u8 {
        14 + 2 * (self as u8)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Intensity::One => "intensity-1",
            Intensity::Two => "intensity-2",
            Intensity::Three => "intensity-3",
            Intensity::Four => "intensity-4",
            Intensity::FiveLower => "intensity-5-lower",
            Intensity::FiveUpper => "intensity-5-upper",
            Intensity::SixLower => "intensity-6-lower",
            Intensity::SixUpper => "intensity-6-upper",
            Intensity::Seven => "intensity-7",
        }
    }
}

/// Visual encoding derived from an intensity code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntensityStyle {
    /// Position on the scale; `None` when the code is unclassified.
    pub rank: Option<u8>,
    pub color: &'static str,
    pub marker_size: u8,
    pub css_class: &'static str,
}

impl IntensityStyle {
    /// The single encoding used for any code outside the scale.
    pub const UNCLASSIFIED: IntensityStyle = IntensityStyle {
        rank: None,
        color: "#888888",
        marker_size: 12,
        css_class: "intensity-unclassified",
    };

    pub fn is_classified(&self) -> bool {
        self.rank.is_some()
    }
}

impl From<Intensity> for IntensityStyle {
    fn from(level: Intensity) -> Self {
        IntensityStyle {
            rank: Some(level.rank()),
            color: level.color(),
            marker_size: level.marker_size(),
            css_class: level.css_class(),
        }
    }
}

/// Classify a canonical intensity code. Unknown codes never fail.
pub fn classify(code: &str) -> IntensityStyle {
    Intensity::from_code(code)
        .map(IntensityStyle::from)
        .unwrap_or(IntensityStyle::UNCLASSIFIED)
}

/// One row of the map legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub code: &'static str,
    pub color: &'static str,
}

/// Legend rows in ascending severity.
pub fn legend() -> Vec<LegendEntry> {
    Intensity::SCALE
        .iter()
        .map(|level| LegendEntry {
            code: level.code(),
            color: level.color(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_scale_matches_enum_order() {
        let iterated: Vec<Intensity> = Intensity::iter().collect();
        assert_eq!(iterated, Intensity::SCALE.to_vec());
    }

    #[test]
    fn test_codes_round_trip() {
        for level in Intensity::SCALE {
            assert_eq!(Intensity::from_code(level.code()), Some(level));
        }
    }

    #[test]
    fn test_encoding_strictly_monotonic() {
        for pair in Intensity::SCALE.windows(2) {
            let (weaker, stronger) = (classify(pair[0].code()), classify(pair[1].code()));
            assert!(weaker.rank < stronger.rank, "{:?} vs {:?}", pair[0], pair[1]);
            assert!(weaker.marker_size < stronger.marker_size);
            assert_ne!(weaker.color, stronger.color);
        }
    }

    #[test]
    fn test_sub_bands_are_adjacent() {
        let lower = classify("5弱");
        let upper = classify("5強");
        assert_eq!(upper.rank.unwrap() - lower.rank.unwrap(), 1);
        assert_eq!(upper.marker_size - lower.marker_size, 2);
        assert_ne!(lower.css_class, upper.css_class);
    }

    #[test]
    fn test_unknown_codes_are_unclassified() {
        for code in ["", "0", "8", "5", "5+", "不明", "seven"] {
            assert_eq!(classify(code), IntensityStyle::UNCLASSIFIED, "{code}");
        }
        assert!(!IntensityStyle::UNCLASSIFIED.is_classified());
    }

    #[test]
    fn test_unclassified_is_distinct_from_scale() {
        for level in Intensity::SCALE {
            let style = IntensityStyle::from(level);
            assert_ne!(style.color, IntensityStyle::UNCLASSIFIED.color);
            assert_ne!(style.css_class, IntensityStyle::UNCLASSIFIED.css_class);
        }
    }

    #[test]
    fn test_classify_is_pure() {
        assert_eq!(classify("6強"), classify("6強"));
        assert_eq!(classify(" 4 "), classify("4"));
    }

    #[test]
    fn test_legend_lists_whole_scale_ascending() {
        let codes: Vec<&str> = legend().iter().map(|entry| entry.code).collect();
        assert_eq!(codes, ["1", "2", "3", "4", "5弱", "5強", "6弱", "6強", "7"]);
    }
}
