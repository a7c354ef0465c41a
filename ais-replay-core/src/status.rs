//! AIS navigational status vocabulary.

use serde::{Deserialize, Serialize};

/// Navigational status as carried in bits 38..42 of a position report.
///
/// The numeric discriminants are the wire codes from the AIS message
/// type 1 definition. Codes 9..=14 are reserved or special-purpose and
/// never produced by the text matcher, so they are not represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationStatus {
    UnderWayUsingEngine = 0,
    AtAnchor = 1,
    NotUnderCommand = 2,
    RestrictedManoeuverability = 3,
    ConstrainedByDraught = 4,
    Moored = 5,
    Aground = 6,
    EngagedInFishing = 7,
    UnderWaySailing = 8,
    NotDefined = 15,
}

/// Ordered substring table, first match wins. The entries for codes 3
/// and 4 are deliberately truncated so that both British and archive
/// spellings ("manoeuvrability", "manoeuvrability reduced", ...) match.
const STATUS_TEXT_TABLE: [(&str, NavigationStatus); 9] = [
    ("under way using engine", NavigationStatus::UnderWayUsingEngine),
    ("at anchor", NavigationStatus::AtAnchor),
    ("not under command", NavigationStatus::NotUnderCommand),
    ("restricted manoeuvra", NavigationStatus::RestrictedManoeuverability),
    ("constrained by", NavigationStatus::ConstrainedByDraught),
    ("moored", NavigationStatus::Moored),
    ("aground", NavigationStatus::Aground),
    ("engaged in fishing", NavigationStatus::EngagedInFishing),
    ("under way sailing", NavigationStatus::UnderWaySailing),
];

impl NavigationStatus {
    /// Map free-text status to its wire code, case-insensitively.
    ///
    /// Absent or unrecognized text maps to [`NavigationStatus::NotDefined`]
    /// (code 15) so that downstream decoders see "not defined" rather
    /// than a false "under way" reading.
    pub fn from_text(text: Option<&str>) -> Self {
        let text = match text {
            Some(t) => t.to_lowercase(),
            None => return NavigationStatus::NotDefined,
        };
        STATUS_TEXT_TABLE
            .iter()
            .find(|(needle, _)| text.contains(needle))
            .map(|(_, status)| *status)
            .unwrap_or(NavigationStatus::NotDefined)
    }

    /// The 4-bit wire code.
    pub fn code(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        let cases = [
            ("Under way using engine", 0),
            ("At anchor", 1),
            ("Not under command", 2),
            ("Restricted manoeuvrability", 3),
            ("Constrained by her draught", 4),
            ("Moored", 5),
            ("Aground", 6),
            ("Engaged in fishing", 7),
            ("Under way sailing", 8),
            ("Unknown status", 15),
            ("", 15),
        ];
        for (text, code) in cases {
            assert_eq!(
                NavigationStatus::from_text(Some(text)).code(),
                code,
                "status text {:?}",
                text
            );
        }
    }

    #[test]
    fn test_absent_text_is_not_defined() {
        assert_eq!(NavigationStatus::from_text(None), NavigationStatus::NotDefined);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            NavigationStatus::from_text(Some("UNDER WAY USING ENGINE")).code(),
            0
        );
        assert_eq!(
            NavigationStatus::from_text(Some("under way using engine")).code(),
            0
        );
        assert_eq!(NavigationStatus::from_text(Some("mOoReD")).code(), 5);
    }

    #[test]
    fn test_first_match_wins() {
        // "under way sailing" also contains "under way", but only the
        // engine entry matches the full "under way using engine" text.
        assert_eq!(
            NavigationStatus::from_text(Some("Under way sailing")).code(),
            8
        );
    }
}
