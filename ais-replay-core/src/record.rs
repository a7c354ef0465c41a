//! The decoded vessel position record that drives a replay.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One decoded AIS position report, as produced by a record source.
///
/// Every field that a real sensor can fail to deliver is an `Option`;
/// `None` means "not available" and encodes to the sentinel value the
/// wire format defines for that field. The encoder never rejects a
/// record: out-of-range values are clamped or masked, never errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AisRecord {
    /// Civil timestamp of the report. Treated as a monotonic replay
    /// clock; only differences between consecutive records matter.
    pub timestamp: NaiveDateTime,
    /// Maritime Mobile Service Identity. Values above 2^30 - 1 do not
    /// fit the wire field and are truncated by the packer.
    pub mmsi: u32,
    /// Latitude in degrees, positive north.
    pub latitude: Option<f64>,
    /// Longitude in degrees, positive east.
    pub longitude: Option<f64>,
    /// Free-text navigational status ("Under way using engine", ...).
    pub navigational_status: Option<String>,
    /// Rate of turn in degrees per minute, negative to port.
    pub rate_of_turn: Option<f64>,
    /// Speed over ground in knots.
    pub speed_over_ground: Option<f64>,
    /// Course over ground in degrees [0, 360).
    pub course_over_ground: Option<f64>,
    /// True heading in whole degrees. Values above 359 encode as
    /// "not available", same as `None`.
    pub true_heading: Option<u16>,
}

impl AisRecord {
    /// Whether the status text marks this vessel as moored.
    ///
    /// Matches the substring "moored" case-insensitively, so both the
    /// canonical status and free-form variants are caught.
    pub fn is_moored(&self) -> bool {
        self.navigational_status
            .as_deref()
            .map(|s| s.to_lowercase().contains("moored"))
            .unwrap_or(false)
    }
}

impl std::fmt::Display for AisRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} mmsi {} pos {},{} sog {} cog {}",
            self.timestamp.format("%d/%m/%Y %H:%M:%S"),
            self.mmsi,
            OptField(self.latitude),
            OptField(self.longitude),
            OptField(self.speed_over_ground),
            OptField(self.course_over_ground),
        )
    }
}

struct OptField(Option<f64>);

impl std::fmt::Display for OptField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "-"),
        }
    }
}
