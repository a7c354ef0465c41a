//! Record sources: CSV iteration over archive exports.
//!
//! The archive CSVs (Danish Maritime Authority daily exports) carry
//! two dozen columns; only the position-report fields are read, by
//! header name, so column reordering or additions do not break the
//! source. Field-level defaulting follows the archive conventions:
//! blank numeric fields mean zero, a blank heading means "not
//! available", and rows that cannot produce a record at all are
//! skipped with a warning rather than aborting a multi-hour replay.

pub mod download;

use std::fs::File;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::DeserializeRecordsIntoIter;
use log::warn;
use serde::Deserialize;

use ais_replay_core::AisRecord;

/// Timestamp layout used by the archive exports.
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// The raw CSV columns this tool reads. Everything arrives as text;
/// conversion and defaulting happen in [`row_to_record`].
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "# Timestamp")]
    timestamp: String,
    #[serde(rename = "MMSI")]
    mmsi: String,
    #[serde(rename = "Latitude")]
    latitude: String,
    #[serde(rename = "Longitude")]
    longitude: String,
    #[serde(rename = "Navigational status")]
    navigational_status: String,
    #[serde(rename = "ROT")]
    rot: String,
    #[serde(rename = "SOG")]
    sog: String,
    #[serde(rename = "COG")]
    cog: String,
    #[serde(rename = "Heading")]
    heading: String,
}

/// A lazy, finite record source backed by one CSV file. Restarting a
/// replay means reopening the file.
pub struct CsvSource {
    reader: csv::Reader<File>,
}

impl CsvSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(file);
        Ok(CsvSource { reader })
    }

    /// Iterate the decoded records, skipping rows that cannot produce
    /// one.
    pub fn records(self) -> RecordIter {
        RecordIter {
            rows: self.reader.into_deserialize(),
            skipped: 0,
        }
    }
}

/// Iterator over decoded records. Malformed rows are counted and
/// logged, not surfaced as errors.
pub struct RecordIter {
    rows: DeserializeRecordsIntoIter<File, CsvRow>,
    skipped: u64,
}

impl RecordIter {
    /// Rows dropped so far because they could not be decoded.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl Iterator for RecordIter {
    type Item = AisRecord;

    fn next(&mut self) -> Option<AisRecord> {
        loop {
            match self.rows.next()? {
                Ok(row) => match row_to_record(&row) {
                    Some(record) => return Some(record),
                    None => {
                        self.skipped += 1;
                        warn!("skipping undecodable row ({} so far)", self.skipped);
                    }
                },
                Err(e) => {
                    self.skipped += 1;
                    warn!("skipping malformed CSV row: {}", e);
                }
            }
        }
    }
}

/// Convert a raw row, applying the archive defaulting rules. Returns
/// `None` when the timestamp or MMSI is unusable.
fn row_to_record(row: &CsvRow) -> Option<AisRecord> {
    let timestamp = NaiveDateTime::parse_from_str(row.timestamp.trim(), TIMESTAMP_FORMAT).ok()?;
    let mmsi = row.mmsi.trim().parse::<u32>().ok()?;

    Some(AisRecord {
        timestamp,
        mmsi,
        latitude: parse_numeric(&row.latitude),
        longitude: parse_numeric(&row.longitude),
        navigational_status: parse_status(&row.navigational_status),
        rate_of_turn: parse_numeric(&row.rot),
        speed_over_ground: parse_numeric(&row.sog),
        course_over_ground: parse_numeric(&row.cog),
        true_heading: parse_heading(&row.heading),
    })
}

/// Archive convention: blank or unparseable numeric fields read as
/// zero; an explicit non-finite value means "not available".
fn parse_numeric(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        return Some(0.0);
    }
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        Ok(_) => None,
        Err(_) => Some(0.0),
    }
}

/// Heading is the exception: a blank or unparseable field means "not
/// available", never zero.
fn parse_heading(field: &str) -> Option<u16> {
    field.trim().parse::<u16>().ok()
}

fn parse_status(field: &str) -> Option<String> {
    let field = field.trim();
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "# Timestamp,Type of mobile,MMSI,Latitude,Longitude,Navigational status,ROT,SOG,COG,Heading,IMO,Callsign,Name\n";

    fn source_from(lines: &[&str]) -> RecordIter {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        for line in lines {
            file.write_all(line.as_bytes()).unwrap();
            file.write_all(b"\n").unwrap();
        }
        file.flush().unwrap();
        // The open handle inside the reader outlives the unlink
        CsvSource::open(file.path()).unwrap().records()
    }

    #[test]
    fn test_parses_complete_row() {
        let mut records = source_from(&[
            "15/01/2024 10:30:45,Class A,220382000,55.1234,-2.5678,Under way using engine,0,12.5,90.0,180,1234,ABCD,VESSEL",
        ]);
        let record = records.next().unwrap();
        assert_eq!(record.mmsi, 220382000);
        assert_eq!(record.latitude, Some(55.1234));
        assert_eq!(record.longitude, Some(-2.5678));
        assert_eq!(
            record.navigational_status.as_deref(),
            Some("Under way using engine")
        );
        assert_eq!(record.speed_over_ground, Some(12.5));
        assert_eq!(record.course_over_ground, Some(90.0));
        assert_eq!(record.true_heading, Some(180));
        assert_eq!(
            record.timestamp,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 45)
                .unwrap()
        );
        assert!(records.next().is_none());
    }

    #[test]
    fn test_blank_numerics_default_to_zero() {
        let mut records = source_from(&[
            "15/01/2024 10:30:45,Class A,220382000,55.1234,-2.5678,,0,,90.0,,,,",
        ]);
        let record = records.next().unwrap();
        assert_eq!(record.speed_over_ground, Some(0.0));
        assert_eq!(record.rate_of_turn, Some(0.0));
        assert_eq!(record.navigational_status, None);
        // Heading is the exception: blank means not available
        assert_eq!(record.true_heading, None);
    }

    #[test]
    fn test_undecodable_rows_are_skipped() {
        let mut records = source_from(&[
            "not a timestamp,Class A,220382000,55.0,10.0,,0,1.0,2.0,3",
            "15/01/2024 10:30:45,Class A,not-an-mmsi,55.0,10.0,,0,1.0,2.0,3",
            "15/01/2024 10:30:46,Class A,220382000,55.0,10.0,,0,1.0,2.0,3",
        ]);
        let record = records.next().unwrap();
        assert_eq!(record.mmsi, 220382000);
        assert!(records.next().is_none());
        assert_eq!(records.skipped(), 2);
    }

    #[test]
    fn test_non_finite_values_are_unavailable() {
        let mut records = source_from(&[
            "15/01/2024 10:30:45,Class A,220382000,NaN,inf,,0,NaN,90.0,180,,,",
        ]);
        let record = records.next().unwrap();
        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, None);
        assert_eq!(record.speed_over_ground, None);
    }

    #[test]
    fn test_open_missing_file_is_an_error() {
        let result = CsvSource::open(Path::new("/no/such/file.csv"));
        assert!(matches!(result, Err(SourceError::Open { .. })));
    }
}
