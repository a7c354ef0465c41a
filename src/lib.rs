//! # AIS Replay
//!
//! Replays recorded AIS vessel traffic as live NMEA 0183 over UDP, for
//! exercising chart plotters and navigation software without an
//! antenna feed.
//!
//! The tool reads daily CSV exports from the Danish Maritime Authority
//! archive (or any file with the same layout), encodes each position
//! record as an AIVDM or GPRMC sentence, and sends one datagram per
//! record, paced to the original inter-record timing divided by a speed
//! multiplier.
//!
//! Protocol encoding and filtering live in [`ais_replay_core`]; this
//! crate owns everything that touches the outside world:
//!
//! - [`source`] - CSV record iteration and archive download/cache
//! - [`transport`] - the UDP sentence sink
//! - [`replay`] - the pacing scheduler
//! - [`loader`] - the CSV filter/export pipeline
//!
//! ## Command-Line Interface
//!
//! See [`Cli`]. One binary, three subcommands:
//!
//! - `replay` - stream a CSV (or a downloaded date) over UDP
//! - `filter` - cut a CSV down to an MMSI selection
//! - `purge-cache` - drop downloaded archives

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod loader;
pub mod replay;
pub mod source;
pub mod transport;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default UDP destination port: the conventional AIS listener port.
pub const DEFAULT_PORT: u16 = 10110;

#[derive(Parser, Clone, Debug)]
#[command(
    name = "ais-replay",
    version,
    about = "Replay AIS vessel tracking data as live NMEA 0183 over UDP"
)]
pub struct Cli {
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Replay a CSV file or a downloaded archive date over UDP
    Replay(ReplayArgs),
    /// Filter CSV records by vessel MMSI and write them back out
    Filter(FilterArgs),
    /// Delete all cached archive downloads
    PurgeCache,
}

#[derive(Args, Clone, Debug)]
pub struct ReplayArgs {
    /// Path to a CSV file with AIS records
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Download and replay the archive for this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<chrono::NaiveDate>,

    /// Only replay records for this vessel
    #[arg(short, long)]
    pub mmsi: Option<u32>,

    /// Playback speed multiplier; also decimates to every Nth record
    #[arg(short = 'x', long = "x-speed", default_value_t = 1,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub speed: u32,

    /// Emit GPRMC sentences instead of armored AIVDM
    #[arg(short, long)]
    pub gps: bool,

    /// Skip moored vessels
    #[arg(short, long)]
    pub skip_moored: bool,

    /// UDP host to send sentences to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// UDP port to send sentences to
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

#[derive(Args, Clone, Debug)]
pub struct FilterArgs {
    /// Input CSV file path(s)
    #[arg(short, long = "input")]
    pub inputs: Vec<PathBuf>,

    /// Download and filter the archive for these dates (YYYY-MM-DD)
    #[arg(short, long = "date")]
    pub dates: Vec<chrono::NaiveDate>,

    /// Output CSV file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File containing MMSI numbers to select, one per line
    #[arg(short, long)]
    pub mmsi_file: Option<PathBuf>,

    /// Comma-separated list of MMSI numbers to select
    #[arg(short = 'l', long)]
    pub mmsi_list: Option<String>,

    /// Read MMSI numbers from stdin, one per line
    #[arg(long)]
    pub mmsi_stdin: bool,

    /// Exclude the selected MMSIs instead of keeping only them
    #[arg(short, long)]
    pub exclude: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_replay_defaults() {
        let cli = Cli::parse_from(["ais-replay", "replay", "--file", "data.csv"]);
        match cli.command {
            Command::Replay(args) => {
                assert_eq!(args.file.as_deref(), Some(std::path::Path::new("data.csv")));
                assert_eq!(args.speed, 1);
                assert_eq!(args.host, "127.0.0.1");
                assert_eq!(args.port, DEFAULT_PORT);
                assert!(!args.gps);
                assert!(!args.skip_moored);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_replay_rejects_zero_speed() {
        // Speed is both a delay divisor and a decimation modulus
        let result = Cli::try_parse_from([
            "ais-replay", "replay", "--file", "data.csv", "--x-speed", "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_accepts_repeated_inputs() {
        let cli = Cli::parse_from([
            "ais-replay",
            "filter",
            "--input",
            "a.csv",
            "--input",
            "b.csv",
            "--mmsi-list",
            "1,2,3",
            "--exclude",
        ]);
        match cli.command {
            Command::Filter(args) => {
                assert_eq!(args.inputs.len(), 2);
                assert!(args.exclude);
                assert_eq!(args.mmsi_list.as_deref(), Some("1,2,3"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_replay_parses_date() {
        let cli = Cli::parse_from(["ais-replay", "replay", "--date", "2024-01-15"]);
        match cli.command {
            Command::Replay(args) => {
                assert_eq!(
                    args.date,
                    chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
                );
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
