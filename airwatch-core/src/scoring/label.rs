//! Qualitative air-quality labels
//!
//! Labels are the exact strings the ingestion service and dashboard already
//! store, so they stay in French on the wire.

/// Nine tiers from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AirQualityLabel {
    #[cfg_attr(feature = "serde", serde(rename = "EXCELLENTE"))]
    Excellent,
    #[cfg_attr(feature = "serde", serde(rename = "TRES BONNE"))]
    VeryGood,
    #[cfg_attr(feature = "serde", serde(rename = "BONNE"))]
    Good,
    #[cfg_attr(feature = "serde", serde(rename = "ACCEPTABLE"))]
    Acceptable,
    #[cfg_attr(feature = "serde", serde(rename = "MOYENNE"))]
    Average,
    #[cfg_attr(feature = "serde", serde(rename = "MEDIOCRE"))]
    Mediocre,
    #[cfg_attr(feature = "serde", serde(rename = "MAUVAISE"))]
    Bad,
    #[cfg_attr(feature = "serde", serde(rename = "TRES MAUVAISE"))]
    VeryBad,
    #[cfg_attr(feature = "serde", serde(rename = "DANGEREUSE"))]
    Dangerous,
}

/// Inclusive lower bounds, checked top-down; anything below the last is `Dangerous`
const THRESHOLDS: [(u8, AirQualityLabel); 8] = [
    (90, AirQualityLabel::Excellent),
    (80, AirQualityLabel::VeryGood),
    (70, AirQualityLabel::Good),
    (60, AirQualityLabel::Acceptable),
    (50, AirQualityLabel::Average),
    (40, AirQualityLabel::Mediocre),
    (30, AirQualityLabel::Bad),
    (20, AirQualityLabel::VeryBad),
];

impl AirQualityLabel {
    /// All labels, best first
    pub const ALL: [AirQualityLabel; 9] = [
        AirQualityLabel::Excellent,
        AirQualityLabel::VeryGood,
        AirQualityLabel::Good,
        AirQualityLabel::Acceptable,
        AirQualityLabel::Average,
        AirQualityLabel::Mediocre,
        AirQualityLabel::Bad,
        AirQualityLabel::VeryBad,
        AirQualityLabel::Dangerous,
    ];

    /// Look up the label for a displayed score. Total over `u8`.
    pub fn from_score(score: u8) -> Self {
        THRESHOLDS
            .iter()
            .find(|(lower, _)| score >= *lower)
            .map(|(_, label)| *label)
            .unwrap_or(AirQualityLabel::Dangerous)
    }

    /// Wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AirQualityLabel::Excellent => "EXCELLENTE",
            AirQualityLabel::VeryGood => "TRES BONNE",
            AirQualityLabel::Good => "BONNE",
            AirQualityLabel::Acceptable => "ACCEPTABLE",
            AirQualityLabel::Average => "MOYENNE",
            AirQualityLabel::Mediocre => "MEDIOCRE",
            AirQualityLabel::Bad => "MAUVAISE",
            AirQualityLabel::VeryBad => "TRES MAUVAISE",
            AirQualityLabel::Dangerous => "DANGEREUSE",
        }
    }

    /// Parse a wire label
    pub fn from_wire(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.as_str() == label)
    }
}

impl core::fmt::Display for AirQualityLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AirQualityLabel {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_examples() {
        assert_eq!(AirQualityLabel::from_score(95).as_str(), "EXCELLENTE");
        assert_eq!(AirQualityLabel::from_score(65).as_str(), "ACCEPTABLE");
        assert_eq!(AirQualityLabel::from_score(5).as_str(), "DANGEREUSE");
    }

    #[test]
    fn lower_bounds_are_inclusive() {
        assert_eq!(AirQualityLabel::from_score(90), AirQualityLabel::Excellent);
        assert_eq!(AirQualityLabel::from_score(89), AirQualityLabel::VeryGood);
        assert_eq!(AirQualityLabel::from_score(20), AirQualityLabel::VeryBad);
        assert_eq!(AirQualityLabel::from_score(19), AirQualityLabel::Dangerous);
        assert_eq!(AirQualityLabel::from_score(0), AirQualityLabel::Dangerous);
        assert_eq!(AirQualityLabel::from_score(100), AirQualityLabel::Excellent);
    }

    #[test]
    fn labels_degrade_monotonically() {
        let mut previous = AirQualityLabel::from_score(100);
        for score in (0..=100u8).rev() {
            let label = AirQualityLabel::from_score(score);
            assert!(label >= previous, "score {} jumped back to {}", score, label);
            previous = label;
        }
    }

    #[test]
    fn wire_names_parse_back() {
        for label in AirQualityLabel::ALL {
            assert_eq!(AirQualityLabel::from_wire(label.as_str()), Some(label));
        }
        assert_eq!(AirQualityLabel::from_wire("GOOD"), None);
    }
}
