//! AIVDM sentence formatting: armored type 1 payload with checksum.

use crate::record::AisRecord;

use super::checksum;
use super::type1::build_position_report;

/// Format a record as a single-fragment AIVDM sentence on channel A:
/// `!AIVDM,1,1,,A,<payload>,<fill>*<checksum>`.
///
/// The sentence carries no line terminator; the transport appends CRLF.
pub fn to_aivdm(record: &AisRecord) -> String {
    let (payload, fill_bits) = build_position_report(record).to_sixbit_ascii();
    let body = format!("AIVDM,1,1,,A,{},{}", payload, fill_bits);
    format!("!{}*{}", body, checksum(&body))
}
