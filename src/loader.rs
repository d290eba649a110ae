//! Local registry cache with age-based refresh.
//!
//! The loader makes sure a readable, fresh enough copy of the registry exists
//! on disk and hands its path to the parser. The refresh decision is taken
//! once per [`Loader::load`] call:
//!
//! - `force` is set, or
//! - no file exists at the output path, or
//! - the age check is enabled (`max_age > 0`) and the file is older than `max_age`.
//!
//! Downloads are streamed into a temporary file next to the destination and
//! renamed into place, so a failed download never clobbers the previous copy.

use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{OuiError, Result};
use crate::fetcher::{HttpFetcher, RegistrySource, TIMEOUT_SECS};
use crate::index::OuiIndex;

/// IEEE MA-L registry in plaintext form.
pub const DEFAULT_URL: &str = "https://standards-oui.ieee.org/oui.txt";

/// 30 days.
pub const DEFAULT_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

/// Mode applied to a freshly downloaded registry (rw-r--r--).
const FILE_MODE: u32 = 0o644;

const CHUNK_SIZE: usize = 8192;

/// Default cache location: `oui.txt` in the system temp directory.
pub fn default_outfile() -> PathBuf {
    std::env::temp_dir().join("oui.txt")
}

/// Loader settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub url: String,
    pub outfile: PathBuf,
    /// Maximum acceptable file age in seconds. Zero or negative disables the check.
    pub max_age: i64,
    pub force: bool,
    pub timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            outfile: default_outfile(),
            max_age: DEFAULT_MAX_AGE_SECS,
            force: false,
            timeout: Duration::from_secs(TIMEOUT_SECS),
        }
    }
}

/// What a [`Loader::load`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub path: PathBuf,
    pub downloaded: bool,
    /// Bytes written; zero when the existing file was reused.
    pub bytes: u64,
}

/// Keeps the local registry copy fresh.
pub struct Loader<S = HttpFetcher> {
    config: LoaderConfig,
    source: S,
}

impl Loader<HttpFetcher> {
    /// Loader that downloads over HTTP with the configured timeout.
    pub fn new(config: LoaderConfig) -> Result<Self> {
        let source = HttpFetcher::new(config.timeout)?;
        Ok(Self::with_source(config, source))
    }
}

impl<S: RegistrySource> Loader<S> {
    pub fn with_source(config: LoaderConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Whether [`Loader::load`] would download right now.
    pub fn needs_download(&self) -> bool {
        let path = &self.config.outfile;

        if self.config.force {
            debug!("Forced refresh of {:?}", path);
            return true;
        }
        if !path.is_file() {
            debug!("{:?} does not exist", path);
            return true;
        }
        if self.config.max_age > 0 && is_stale(path, self.config.max_age, SystemTime::now()) {
            debug!(
                "{:?} is older than {} seconds. Re-downloading.",
                path, self.config.max_age
            );
            return true;
        }
        false
    }

    /// Make sure a usable registry file exists, downloading it if needed.
    ///
    /// # Errors
    /// [`OuiError::DownloadFailed`] if fetching fails, [`OuiError::PersistFailed`]
    /// if the file cannot be written. Neither is retried.
    pub fn load(&self) -> Result<LoadOutcome> {
        let path = self.config.outfile.clone();

        if !self.needs_download() {
            debug!("{:?} exists and is up to date. Not downloading.", path);
            return Ok(LoadOutcome {
                path,
                downloaded: false,
                bytes: 0,
            });
        }

        info!("Downloading {} to {:?}", self.config.url, path);
        let bytes = self.download()?;
        info!("Saved {} bytes to {:?}", bytes, path);

        Ok(LoadOutcome {
            path,
            downloaded: true,
            bytes,
        })
    }

    /// Load (refreshing if needed), then parse and index the registry.
    pub fn index(&self) -> Result<OuiIndex> {
        let outcome = self.load()?;
        let index = OuiIndex::from_path(&outcome.path)?;
        info!("Loaded {} OUI entries", index.size());
        Ok(index)
    }

    fn download(&self) -> Result<u64> {
        let url = self.config.url.as_str();
        let path = self.config.outfile.as_path();
        let persist_err = |source: std::io::Error| OuiError::PersistFailed {
            path: path.to_path_buf(),
            source,
        };

        let mut body = self.source.open(url)?;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut temp_file = NamedTempFile::new_in(dir).map_err(persist_err)?;

        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut total: u64 = 0;
        loop {
            let n = match body.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(OuiError::DownloadFailed {
                        url: url.to_string(),
                        source: Box::new(e),
                    })
                }
            };
            temp_file.write_all(&buf[..n]).map_err(persist_err)?;
            total += n as u64;
        }

        temp_file.as_file().sync_all().map_err(persist_err)?;
        temp_file.persist(path).map_err(|e| persist_err(e.error))?;
        set_file_mode(path).map_err(persist_err)?;

        Ok(total)
    }
}

/// True if the file's mtime is more than `max_age` seconds before `now`.
/// Unreadable metadata counts as stale.
fn is_stale(path: &Path, max_age: i64, now: SystemTime) -> bool {
    let modified = match path.metadata().and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return true,
    };
    // A timestamp in the future has age zero.
    let age = now.duration_since(modified).unwrap_or_default();
    age > Duration::from_secs(max_age.unsigned_abs())
}

#[cfg(unix)]
fn set_file_mode(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(FILE_MODE))
}

#[cfg(not(unix))]
fn set_file_mode(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
