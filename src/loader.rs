//! CSV filter pipeline: cut archive exports down to an MMSI selection.
//!
//! Works on raw lines rather than decoded records so the output is a
//! byte-faithful subset of the input - downstream tools get exactly
//! the columns and formatting the archive produced.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use ais_replay_core::MmsiSelection;

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("cannot open {path}: {source}")]
    Open { path: String, source: io::Error },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("no MMSI numbers specified")]
    EmptySelection,
}

/// Totals reported after a filter run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    /// Data lines read across all inputs.
    pub processed: u64,
    /// Lines written to the output.
    pub written: u64,
}

/// Filter the given CSV files by vessel identifier, writing matching
/// lines to `output` (stdout when `None`). The header of the first
/// input is written once; subsequent input headers are dropped.
pub fn run_filter(
    inputs: &[PathBuf],
    output: Option<&Path>,
    selection: &MmsiSelection,
) -> Result<FilterSummary, LoaderError> {
    if selection.is_empty() {
        return Err(LoaderError::EmptySelection);
    }

    let mut writer: BufWriter<Box<dyn Write>> = match output {
        Some(path) => BufWriter::new(Box::new(File::create(path)?)),
        None => BufWriter::new(Box::new(io::stdout().lock())),
    };

    let mut summary = FilterSummary::default();
    let mut header_written = false;

    for input in inputs {
        let file = File::open(input).map_err(|source| LoaderError::Open {
            path: input.display().to_string(),
            source,
        })?;
        info!("reading {}", input.display());

        let mut lines = BufReader::new(file).lines();
        if let Some(header) = lines.next() {
            let header = header?;
            if !header_written {
                writeln!(writer, "{}", header)?;
                header_written = true;
            }
        }

        for line in lines {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            summary.processed += 1;
            match line_mmsi(&line) {
                Some(mmsi) if selection.accepts(mmsi) => {
                    writeln!(writer, "{}", line)?;
                    summary.written += 1;
                }
                Some(_) => {}
                None => warn!("line without a parseable MMSI, dropped"),
            }
        }
    }

    writer.flush()?;
    info!(
        "processed {} records from {} file(s), wrote {}",
        summary.processed,
        inputs.len(),
        summary.written
    );
    Ok(summary)
}

/// MMSI is the third column of the archive layout.
fn line_mmsi(line: &str) -> Option<u32> {
    line.split(',').nth(2)?.trim().parse().ok()
}

/// Parse a comma-separated MMSI list ("220382000, 219000001").
pub fn parse_mmsi_list(list: &str) -> Vec<u32> {
    list.split(',')
        .filter_map(|entry| entry.trim().parse().ok())
        .collect()
}

/// Read MMSI numbers from any line-oriented reader (a file, stdin).
/// Unparseable lines are ignored.
pub fn read_mmsi_lines(reader: impl BufRead) -> io::Result<Vec<u32>> {
    let mut mmsis = Vec::new();
    for line in reader.lines() {
        if let Ok(mmsi) = line?.trim().parse::<u32>() {
            if mmsi > 0 {
                mmsis.push(mmsi);
            }
        }
    }
    Ok(mmsis)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "# Timestamp,Type of mobile,MMSI,Latitude,Longitude,Navigational status,ROT,SOG,COG,Heading";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_include_selection() {
        let input = write_csv(&[
            "15/01/2024 10:30:45,Class A,111,55.0,10.0,,0,1.0,2.0,3",
            "15/01/2024 10:30:46,Class A,222,55.0,10.0,,0,1.0,2.0,3",
            "15/01/2024 10:30:47,Class A,111,55.0,10.0,,0,1.0,2.0,3",
        ]);
        let output = tempfile::NamedTempFile::new().unwrap();
        let selection = MmsiSelection::include([111]);

        let summary = run_filter(
            &[input.path().to_owned()],
            Some(output.path()),
            &selection,
        )
        .unwrap();
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.written, 2);

        let text = std::fs::read_to_string(output.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3); // header + 2 records
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].contains(",111,"));
    }

    #[test]
    fn test_exclude_selection() {
        let input = write_csv(&[
            "15/01/2024 10:30:45,Class A,111,55.0,10.0,,0,1.0,2.0,3",
            "15/01/2024 10:30:46,Class A,222,55.0,10.0,,0,1.0,2.0,3",
        ]);
        let output = tempfile::NamedTempFile::new().unwrap();
        let selection = MmsiSelection::exclude([111]);

        let summary = run_filter(
            &[input.path().to_owned()],
            Some(output.path()),
            &selection,
        )
        .unwrap();
        assert_eq!(summary.written, 1);
        let text = std::fs::read_to_string(output.path()).unwrap();
        assert!(text.contains(",222,"));
        assert!(!text.lines().skip(1).any(|l| l.contains(",111,")));
    }

    #[test]
    fn test_header_written_once_across_inputs() {
        let a = write_csv(&["15/01/2024 10:30:45,Class A,111,55.0,10.0,,0,1.0,2.0,3"]);
        let b = write_csv(&["15/01/2024 10:30:46,Class A,111,55.0,10.0,,0,1.0,2.0,3"]);
        let output = tempfile::NamedTempFile::new().unwrap();
        let selection = MmsiSelection::include([111]);

        let summary = run_filter(
            &[a.path().to_owned(), b.path().to_owned()],
            Some(output.path()),
            &selection,
        )
        .unwrap();
        assert_eq!(summary.written, 2);

        let text = std::fs::read_to_string(output.path()).unwrap();
        let headers = text.lines().filter(|l| l.starts_with("# Timestamp")).count();
        assert_eq!(headers, 1);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_empty_selection_is_an_error() {
        let input = write_csv(&[]);
        let selection = MmsiSelection::include(std::iter::empty());
        let result = run_filter(&[input.path().to_owned()], None, &selection);
        assert!(matches!(result, Err(LoaderError::EmptySelection)));
    }

    #[test]
    fn test_parse_mmsi_list() {
        assert_eq!(parse_mmsi_list("111, 222,333"), vec![111, 222, 333]);
        assert_eq!(parse_mmsi_list("111,bogus,222"), vec![111, 222]);
        assert!(parse_mmsi_list("").is_empty());
    }

    #[test]
    fn test_read_mmsi_lines() {
        let input = "111\n  222 \nnot a number\n0\n333\n";
        let mmsis = read_mmsi_lines(std::io::Cursor::new(input)).unwrap();
        assert_eq!(mmsis, vec![111, 222, 333]);
    }
}
