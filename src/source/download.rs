//! Archive download and cache for daily AIS exports.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use futures_util::StreamExt;
use log::info;

/// Base URL of the Danish Maritime Authority daily export archive.
const ARCHIVE_BASE_URL: &str = "http://aisdata.ais.dk";

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("no cache directory available on this platform")]
    NoCacheDir,

    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("archive server returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive extraction failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("expected CSV not found after extraction: {}", .0.display())]
    MissingCsv(PathBuf),
}

/// Downloads daily archives into a per-user cache directory and
/// extracts the CSV they carry. Cached CSVs are reused on later runs.
#[derive(Debug, Clone)]
pub struct ArchiveDownloader {
    cache_dir: PathBuf,
    http_client: reqwest::Client,
}

impl ArchiveDownloader {
    pub fn new() -> Result<Self, DownloadError> {
        let project_dirs = directories::ProjectDirs::from("dk", "dma", "ais-replay")
            .ok_or(DownloadError::NoCacheDir)?;
        Self::with_cache_dir(project_dirs.cache_dir())
    }

    /// Use an explicit cache directory (tests, unusual setups).
    pub fn with_cache_dir(cache_dir: &Path) -> Result<Self, DownloadError> {
        // Archives run to gigabytes; allow a leisurely transfer
        let http_client = reqwest::ClientBuilder::new()
            .timeout(std::time::Duration::from_secs(30 * 60))
            .build()?;
        Ok(ArchiveDownloader {
            cache_dir: cache_dir.to_owned(),
            http_client,
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path the extracted CSV for `date` will live at.
    pub fn csv_path(&self, date: NaiveDate) -> PathBuf {
        self.cache_dir.join(format!("aisdk-{}.csv", date))
    }

    /// Fetch the archive for one day, returning the extracted CSV
    /// path. Returns the cached copy without touching the network when
    /// one exists.
    pub async fn fetch(&self, date: NaiveDate) -> Result<PathBuf, DownloadError> {
        let csv_path = self.csv_path(date);
        if csv_path.exists() {
            info!("using cached {}", csv_path.display());
            return Ok(csv_path);
        }

        std::fs::create_dir_all(&self.cache_dir)?;

        let url = format!("{}/aisdk-{}.zip", ARCHIVE_BASE_URL, date);
        let zip_path = self.cache_dir.join(format!("aisdk-{}.zip", date));
        info!("downloading {} ...", url);

        let response = self.http_client.get(&url).send().await?;
        if response.status() != reqwest::StatusCode::OK {
            return Err(DownloadError::Status(response.status()));
        }

        let mut file = std::fs::File::create(&zip_path)?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?)?;
        }
        drop(file);

        info!("extracting {} ...", zip_path.display());
        let archive_file = std::fs::File::open(&zip_path)?;
        let mut archive = zip::ZipArchive::new(archive_file)?;
        archive.extract(&self.cache_dir)?;
        std::fs::remove_file(&zip_path)?;

        if !csv_path.exists() {
            return Err(DownloadError::MissingCsv(csv_path));
        }
        info!("ready: {}", csv_path.display());
        Ok(csv_path)
    }

    /// Delete the cache directory. Returns whether anything was there
    /// to delete.
    pub fn purge(&self) -> Result<bool, DownloadError> {
        if self.cache_dir.exists() {
            std::fs::remove_dir_all(&self.cache_dir)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
