use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use miette::{miette, IntoDiagnostic, Result};
use tokio_util::sync::CancellationToken;

use ais_replay::loader::{self, run_filter};
use ais_replay::replay::{ReplayOptions, ReplayScheduler};
use ais_replay::source::download::ArchiveDownloader;
use ais_replay::source::CsvSource;
use ais_replay::transport::UdpSink;
use ais_replay::{Cli, Command, FilterArgs, ReplayArgs};
use ais_replay_core::{MmsiSelection, ReplayFilter, SentenceFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    match cli.command {
        Command::Replay(args) => run_replay(args).await,
        Command::Filter(args) => run_filter_command(args).await,
        Command::PurgeCache => purge_cache(),
    }
}

async fn run_replay(args: ReplayArgs) -> Result<()> {
    let csv_path = resolve_input(args.file.clone(), args.date).await?;

    let sink = UdpSink::connect(&args.host, args.port)
        .await
        .into_diagnostic()?;

    let options = ReplayOptions {
        filter: ReplayFilter {
            mmsi: args.mmsi,
            skip_moored: args.skip_moored,
        },
        format: if args.gps {
            SentenceFormat::Gprmc
        } else {
            SentenceFormat::Aivdm
        },
        speed: args.speed,
    };

    info!(
        "replaying {} to {} at {}x speed{}",
        csv_path.display(),
        sink.destination(),
        args.speed,
        match args.mmsi {
            Some(mmsi) => format!(", MMSI {}", mmsi),
            None => ", all vessels".to_string(),
        }
    );

    let source = CsvSource::open(&csv_path).into_diagnostic()?;

    // Stop between records on ctrl-c; a sentence is never cut short
    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    let mut scheduler = ReplayScheduler::new(options, sink);
    let summary = scheduler
        .run(source.records(), &shutdown)
        .await
        .into_diagnostic()?;

    info!(
        "replay finished: {} sentences sent from {} qualifying records",
        summary.sent, summary.qualifying
    );
    Ok(())
}

async fn run_filter_command(args: FilterArgs) -> Result<()> {
    let selection = load_selection(&args)?;
    info!("selected {} MMSI number(s)", selection.len());

    let mut inputs: Vec<PathBuf> = Vec::new();
    for date in args.dates {
        let downloader = ArchiveDownloader::new().into_diagnostic()?;
        inputs.push(downloader.fetch(date).await.into_diagnostic()?);
    }
    inputs.extend(args.inputs);

    if inputs.is_empty() {
        return Err(miette!("at least one --input file or --date is required"));
    }

    let summary =
        run_filter(&inputs, args.output.as_deref(), &selection).into_diagnostic()?;
    info!(
        "wrote {} of {} records",
        summary.written, summary.processed
    );
    Ok(())
}

fn purge_cache() -> Result<()> {
    let downloader = ArchiveDownloader::new().into_diagnostic()?;
    if downloader.purge().into_diagnostic()? {
        info!("cache purged: {}", downloader.cache_dir().display());
    } else {
        info!("no cache to purge");
    }
    Ok(())
}

/// An explicit file wins over a date; a date downloads (or reuses) the
/// archive for that day.
async fn resolve_input(
    file: Option<PathBuf>,
    date: Option<chrono::NaiveDate>,
) -> Result<PathBuf> {
    match (file, date) {
        (Some(file), _) => Ok(file),
        (None, Some(date)) => {
            let downloader = ArchiveDownloader::new().into_diagnostic()?;
            downloader.fetch(date).await.into_diagnostic()
        }
        (None, None) => Err(miette!("either --file or --date is required")),
    }
}

fn load_selection(args: &FilterArgs) -> Result<MmsiSelection> {
    let mmsis = if let Some(path) = &args.mmsi_file {
        let file = std::fs::File::open(path)
            .map_err(|e| miette!("MMSI file not found: {}: {}", path.display(), e))?;
        loader::read_mmsi_lines(BufReader::new(file)).into_diagnostic()?
    } else if let Some(list) = &args.mmsi_list {
        loader::parse_mmsi_list(list)
    } else if args.mmsi_stdin {
        info!("reading MMSI numbers from stdin...");
        loader::read_mmsi_lines(std::io::stdin().lock()).into_diagnostic()?
    } else {
        return Err(miette!(
            "no MMSI numbers specified; use --mmsi-file, --mmsi-list or --mmsi-stdin"
        ));
    };

    Ok(if args.exclude {
        MmsiSelection::exclude(mmsis)
    } else {
        MmsiSelection::include(mmsis)
    })
}
