// Theme Source Loader
// Locates a theme archive (local or downloaded) and extracts the theme file

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::Client;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{ConvertError, IoContext, Result};
use crate::models::{GeneratorSettings, ThemeLocation, ThemeSource};
use crate::services::{emit_event, EventSink};

const ARCHIVE_EXTENSION: &str = "vsix";
const PROGRESS_EVENT: &str = "theme_download_progress";

/// Progress information emitted during download
#[derive(Debug, Clone, Serialize)]
pub struct DownloadProgress {
    pub theme: String,
    pub downloaded: u64,
    pub total: u64,
    pub percent: f64,
    pub phase: String,
}

/// Theme archive loader
pub struct ThemeLoader {
    client: Client,
    extensions_dir: PathBuf,
    cache_dir: PathBuf,
}

impl ThemeLoader {
    pub fn new(extensions_dir: PathBuf, cache_dir: PathBuf) -> Self {
        Self {
            client: Client::new(),
            extensions_dir,
            cache_dir,
        }
    }

    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        Self::new(settings.extensions_dir.clone(), settings.cache_dir.clone())
    }

    /// Where a downloaded archive for `theme_name` is cached
    pub fn cached_archive_path(&self, theme_name: &str) -> PathBuf {
        self.cache_dir.join(format!("{theme_name}.{ARCHIVE_EXTENSION}"))
    }

    /// Read the theme definition bytes for `source`
    pub async fn load(&self, source: &ThemeSource, event_sink: &dyn EventSink) -> Result<Vec<u8>> {
        let archive_path = self.archive_path(source, event_sink).await?;
        log::info!("Extracting {} from {:?}", source.file, archive_path);
        extract_entry(&archive_path, &source.file)
    }

    /// Resolve the local archive path, downloading it first when it is remote and not cached
    pub async fn archive_path(&self, source: &ThemeSource, event_sink: &dyn EventSink) -> Result<PathBuf> {
        match &source.location {
            ThemeLocation::Archive(path) => {
                if path.is_absolute() {
                    Ok(path.clone())
                } else {
                    Ok(self.extensions_dir.join(path))
                }
            }
            ThemeLocation::Url(url) => {
                let cached = self.cached_archive_path(&source.name);
                if cached.exists() {
                    match &source.sha256 {
                        Some(expected) => {
                            let actual = file_sha256(&cached)?;
                            if expected.eq_ignore_ascii_case(&actual) {
                                log::info!("Using cached archive {:?}", cached);
                                return Ok(cached);
                            }
                            log::warn!(
                                "Cached archive {:?} has sha256 {actual}, expected {expected}; downloading again",
                                cached
                            );
                            std::fs::remove_file(&cached).with_path(&cached)?;
                        }
                        None => {
                            log::info!("Using cached archive {:?}", cached);
                            return Ok(cached);
                        }
                    }
                }

                std::fs::create_dir_all(&self.cache_dir).with_path(&self.cache_dir)?;
                self.download_archive(source, url, &cached, event_sink).await?;
                Ok(cached)
            }
        }
    }

    /// Download into a temp file next to `dest`, verify, then move into place.
    /// A failed or mismatched download never leaves a file at `dest`.
    async fn download_archive(
        &self,
        source: &ThemeSource,
        url: &str,
        dest: &Path,
        event_sink: &dyn EventSink,
    ) -> Result<()> {
        log::info!("Downloading theme archive from: {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ConvertError::download(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::download(url, format!("HTTP {status}")));
        }

        let total_size = response.content_length().unwrap_or(0);
        let mut downloaded: u64 = 0;
        let mut hasher = Sha256::new();

        let mut temp = tempfile::NamedTempFile::new_in(&self.cache_dir).with_path(&self.cache_dir)?;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ConvertError::download(url, e))?;
            temp.write_all(&chunk).with_path(temp.path())?;
            hasher.update(&chunk);

            downloaded += chunk.len() as u64;
            self.emit_progress(event_sink, &source.name, downloaded, total_size, "downloading");
        }
        temp.flush().with_path(temp.path())?;

        let actual = hex::encode(hasher.finalize());
        if let Some(expected) = &source.sha256 {
            if !expected.eq_ignore_ascii_case(&actual) {
                return Err(ConvertError::ChecksumMismatch {
                    url: url.to_string(),
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        temp.persist(dest)
            .map_err(|e| ConvertError::io(dest, e.error))?;

        self.emit_progress(event_sink, &source.name, downloaded, total_size, "complete");
        log::info!("Download complete: {downloaded} bytes (sha256 {actual})");
        Ok(())
    }

    fn emit_progress(
        &self,
        event_sink: &dyn EventSink,
        theme: &str,
        downloaded: u64,
        total: u64,
        phase: &str,
    ) {
        let percent = if total > 0 {
            (downloaded as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        let progress = DownloadProgress {
            theme: theme.to_string(),
            downloaded,
            total,
            percent,
            phase: phase.to_string(),
        };

        emit_event(event_sink, PROGRESS_EVENT, &progress);
    }
}

fn file_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_path(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher).with_path(path)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Extract exactly one entry, matched by its full in-archive path
pub fn extract_entry(archive_path: &Path, entry: &str) -> Result<Vec<u8>> {
    let file = File::open(archive_path).with_path(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    let mut zipped = match archive.by_name(entry) {
        Ok(zipped) => zipped,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ConvertError::MissingArchiveEntry {
                archive: archive_path.to_path_buf(),
                entry: entry.to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    // The header size is untrusted
    let mut content = Vec::new();
    zipped.read_to_end(&mut content).with_path(archive_path)?;
    Ok(content)
}
