//! NMEA 0183 sentence encoding for replayed position reports.
//!
//! All functions are pure (no I/O). Two sentence renditions are
//! supported, selected by [`SentenceFormat`]:
//!
//! - **AIVDM**: the 168-bit AIS type 1 position report, armored as
//!   6-bit ASCII and framed as `!AIVDM,1,1,,A,<payload>,<fill>*<sum>`
//! - **GPRMC**: a plain-text GPS-style sentence for consumers that do
//!   not decode AIS binary payloads
//!
//! Sentences never carry a line terminator; the transport layer owns
//! the trailing CRLF.

pub mod aivdm;
pub mod bits;
pub mod gprmc;
pub mod type1;

use serde::{Deserialize, Serialize};

use crate::record::AisRecord;

/// Which sentence rendition the replay emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceFormat {
    /// Armored AIS binary payload (`!AIVDM,...`).
    #[default]
    Aivdm,
    /// Plain positional sentence (`$GPRMC,...`).
    Gprmc,
}

/// Encode one record as a sentence in the requested format.
pub fn encode(record: &AisRecord, format: SentenceFormat) -> String {
    match format {
        SentenceFormat::Aivdm => aivdm::to_aivdm(record),
        SentenceFormat::Gprmc => gprmc::to_gprmc(record),
    }
}

/// NMEA checksum: XOR of every byte of the sentence body (the text
/// between the leading `!` or `$` and the trailing `*`), rendered as
/// exactly two uppercase hex digits.
pub fn checksum(body: &str) -> String {
    let sum = body.bytes().fold(0u8, |acc, b| acc ^ b);
    format!("{:02X}", sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_checksum_known_value() {
        assert_eq!(checksum("AIVDM,1,1,,A,13B;3<001uOl?ehORcN3Q5aJ0000,0"), "4B");
    }

    #[test]
    fn test_checksum_zero_padded() {
        assert_eq!(checksum(""), "00");
        // Single char XORs to itself
        assert_eq!(checksum("\x05"), "05");
    }

    #[test]
    fn test_checksum_uppercase_hex() {
        assert_eq!(checksum("\x0A"), "0A");
        // 'G' ^ 'P' = 0x17, 'G' ^ 'z' = 0x3D
        assert_eq!(checksum("GP"), "17");
        assert_eq!(checksum("Gz"), "3D");
    }

    #[test]
    fn test_encode_dispatches_by_format() {
        let record = AisRecord {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 45)
                .unwrap(),
            mmsi: 220382000,
            latitude: Some(55.1234),
            longitude: Some(-2.5678),
            navigational_status: Some("Under way using engine".to_string()),
            rate_of_turn: Some(0.0),
            speed_over_ground: Some(12.5),
            course_over_ground: Some(90.0),
            true_heading: Some(180),
        };
        assert!(encode(&record, SentenceFormat::Aivdm).starts_with("!AIVDM,"));
        assert!(encode(&record, SentenceFormat::Gprmc).starts_with("$GPRMC,"));
    }
}
