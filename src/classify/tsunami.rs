//! Tsunami risk evaluation.
//!
//! Only the canonical warning field is consulted. A missing translation must
//! never hide a hazard, so every value other than the "no warning" sentinel
//! counts as risk, including values never seen before.

/// Root-language "no tsunami" value.
pub const NO_TSUNAMI: &str = "なし";

/// Provider sentinel for "no tsunami", equivalent to [`NO_TSUNAMI`].
pub const NO_TSUNAMI_SENTINEL: &str = "None";

/// Whether a canonical tsunami warning value indicates risk.
pub fn has_tsunami_risk(canonical: &str) -> bool {
    canonical != NO_TSUNAMI && canonical != NO_TSUNAMI_SENTINEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_mean_no_risk() {
        assert!(!has_tsunami_risk("なし"));
        assert!(!has_tsunami_risk("None"));
    }

    #[test]
    fn test_everything_else_is_risk() {
        for value in [
            "",
            "none",
            "なし ",
            "調査中",
            "若干の海面変動",
            "津波注意報",
            "津波警報",
            "大津波警報",
            "Unknown",
            "No tsunami",
        ] {
            assert!(has_tsunami_risk(value), "{value:?}");
        }
    }
}
