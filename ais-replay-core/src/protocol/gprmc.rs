//! GPRMC sentence formatting: plain-text recommended-minimum position.

use chrono::Timelike;

use crate::record::AisRecord;

use super::checksum;

/// Render a coordinate as NMEA degrees + decimal minutes: the integer
/// degree part zero-padded to two digits, then minutes with four
/// decimals ("5507.4040" for 55.1234 degrees). The sign is dropped; the
/// hemisphere letter carries it.
pub fn to_nmea_coord(degrees: f64) -> String {
    let d = degrees.abs();
    let deg = d.trunc() as u32;
    let minutes = (d - f64::from(deg)) * 60.0;
    format!("{:02}{:07.4}", deg, minutes)
}

/// Format a record as a GPRMC sentence:
/// `$GPRMC,<hhmmss.ff>,A,<lat>,<N|S>,<lon>,<E|W>,<sog>,<cog>,<ddmmyy>,,,*<checksum>`.
///
/// Speed, course and position fields render as empty (not zero) when
/// the record has no value, so consumers can tell "no data" from a
/// vessel that is actually stopped. No line terminator is appended.
pub fn to_gprmc(record: &AisRecord) -> String {
    let time = format!(
        "{}.{:02}",
        record.timestamp.format("%H%M%S"),
        record.timestamp.nanosecond() / 10_000_000
    );
    let date = record.timestamp.format("%d%m%y");

    let (lat, ns) = match record.latitude {
        Some(v) => (to_nmea_coord(v), if v >= 0.0 { "N" } else { "S" }),
        None => (String::new(), ""),
    };
    let (lon, ew) = match record.longitude {
        Some(v) => (to_nmea_coord(v), if v >= 0.0 { "E" } else { "W" }),
        None => (String::new(), ""),
    };
    let sog = record
        .speed_over_ground
        .map(|v| format!("{:.1}", v))
        .unwrap_or_default();
    let cog = record
        .course_over_ground
        .map(|v| format!("{:.1}", v))
        .unwrap_or_default();

    let body = format!(
        "GPRMC,{},A,{},{},{},{},{},{},{},,,",
        time, lat, ns, lon, ew, sog, cog, date
    );
    format!("${}*{}", body, checksum(&body))
}
