//! Weather warning severity.

use serde::Serialize;

/// Severity of a weather warning or advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Extreme,
}

impl AlertSeverity {
    /// Parse the canonical severity field.
    ///
    /// Unrecognized values rank as `High` so they still reach the banner.
    pub fn from_canonical(value: &str) -> AlertSeverity {
        match value.trim() {
            "low" => AlertSeverity::Low,
            "medium" => AlertSeverity::Medium,
            "high" => AlertSeverity::High,
            "extreme" => AlertSeverity::Extreme,
            _ => AlertSeverity::High,
        }
    }

    /// Whether alerts of this severity are shown in the banner.
    pub fn is_banner_worthy(self) -> bool {
        self >= AlertSeverity::High
    }

    pub fn color(self) -> &'static str {
        match self {
            AlertSeverity::Low => "#9ca3af",
            AlertSeverity::Medium => "#facc15",
            AlertSeverity::High => "#dc2626",
            AlertSeverity::Extreme => "#7e22ce",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_severities_are_ordered() {
        let parsed: Vec<AlertSeverity> = ["low", "medium", "high", "extreme"]
            .iter()
            .map(|v| AlertSeverity::from_canonical(v))
            .collect();
        assert!(parsed.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_unknown_severity_fails_safe() {
        assert_eq!(AlertSeverity::from_canonical("critical"), AlertSeverity::High);
        assert_eq!(AlertSeverity::from_canonical(""), AlertSeverity::High);
        assert!(AlertSeverity::from_canonical("???").is_banner_worthy());
    }

    #[test]
    fn test_banner_threshold() {
        assert!(!AlertSeverity::Low.is_banner_worthy());
        assert!(!AlertSeverity::Medium.is_banner_worthy());
        assert!(AlertSeverity::High.is_banner_worthy());
        assert!(AlertSeverity::Extreme.is_banner_worthy());
    }
}
