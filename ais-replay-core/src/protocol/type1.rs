//! AIS message type 1 (position report) field quantization and assembly.
//!
//! Every quantizer is total: missing or out-of-range input maps to the
//! "not available" sentinel the message definition reserves for that
//! field, so downstream decoders see missing data as missing rather
//! than as a false zero reading.

use chrono::Timelike;

use crate::record::AisRecord;
use crate::status::NavigationStatus;

use super::bits::{BitBuffer, POSITION_REPORT_BITS};

/// Longitude "not available" sentinel: 181 degrees in 1/600000 minute units.
pub const LONGITUDE_NOT_AVAILABLE: i32 = 0x6791AC0;
/// Latitude "not available" sentinel: 91 degrees in 1/600000 minute units.
pub const LATITUDE_NOT_AVAILABLE: i32 = 0x3412140;
/// Speed over ground "not available" sentinel (tenths of a knot field).
pub const SOG_NOT_AVAILABLE: u32 = 1023;
/// Course over ground "not available" sentinel (tenths of a degree field).
pub const COG_NOT_AVAILABLE: u32 = 3600;
/// True heading "not available" sentinel.
pub const HEADING_NOT_AVAILABLE: u32 = 511;

/// Rate of turn, 8 bits signed.
///
/// Zero and "not available" both encode to 0; anything else uses the
/// nonlinear ROT sensor encoding `sign * sqrt(|rot| / 4.733)`, which
/// compresses the sensor range into [-126, 126].
pub fn rate_of_turn_raw(rot: Option<f64>) -> i32 {
    match rot {
        None => 0,
        Some(r) if r == 0.0 => 0,
        Some(r) => {
            let encoded = (r.signum() * (r.abs() / 4.733).sqrt()).round() as i32;
            encoded.clamp(-126, 126)
        }
    }
}

/// Speed over ground in tenths of a knot, 10 bits.
///
/// Capped at 1022 ("102.2 knots or more"); 1023 is reserved for
/// "not available".
pub fn speed_raw(sog: Option<f64>) -> u32 {
    match sog {
        None => SOG_NOT_AVAILABLE,
        Some(s) => ((s * 10.0).round() as u32).min(1022),
    }
}

/// Longitude in 1/600000 minute units, 28 bits signed.
pub fn longitude_raw(lon: Option<f64>) -> i32 {
    match lon {
        None => LONGITUDE_NOT_AVAILABLE,
        Some(l) => (l * 600_000.0).round() as i32,
    }
}

/// Latitude in 1/600000 minute units, 27 bits signed.
pub fn latitude_raw(lat: Option<f64>) -> i32 {
    match lat {
        None => LATITUDE_NOT_AVAILABLE,
        Some(l) => (l * 600_000.0).round() as i32,
    }
}

/// Course over ground in tenths of a degree, 12 bits.
pub fn course_raw(cog: Option<f64>) -> u32 {
    match cog {
        None => COG_NOT_AVAILABLE,
        Some(c) => ((c * 10.0).round() as u32).min(3599),
    }
}

/// True heading in whole degrees, 9 bits. Anything outside [0, 359]
/// is "not available".
pub fn heading_raw(heading: Option<u16>) -> u32 {
    match heading {
        Some(h) if h <= 359 => u32::from(h),
        _ => HEADING_NOT_AVAILABLE,
    }
}

/// Assemble the 168-bit type 1 position report for a record.
///
/// Field offsets follow the published message layout. The reserved,
/// maneuver, RAIM and radio-status bits are always zero; position
/// accuracy is always reported as low.
pub fn build_position_report(record: &AisRecord) -> BitBuffer {
    let mut bits = BitBuffer::new(POSITION_REPORT_BITS);

    bits.set(0, 6, 1); // message type: position report class A
    bits.set(6, 2, 0); // repeat indicator
    bits.set(8, 30, record.mmsi);
    bits.set(
        38,
        4,
        NavigationStatus::from_text(record.navigational_status.as_deref())
            .code()
            .into(),
    );
    bits.set_signed(42, 8, rate_of_turn_raw(record.rate_of_turn));
    bits.set(50, 10, speed_raw(record.speed_over_ground));
    bits.set(60, 1, 0); // position accuracy: low
    bits.set_signed(61, 28, longitude_raw(record.longitude));
    bits.set_signed(89, 27, latitude_raw(record.latitude));
    bits.set(116, 12, course_raw(record.course_over_ground));
    bits.set(128, 9, heading_raw(record.true_heading));
    bits.set(137, 6, record.timestamp.second().min(59));
    bits.set(143, 2, 0); // maneuver indicator
    bits.set(145, 3, 0); // spare
    bits.set(148, 1, 0); // RAIM flag
    bits.set(149, 19, 0); // radio status

    bits
}
