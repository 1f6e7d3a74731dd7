//! Timeout setting and its on-disk persistence
//!
//! The whole configuration is one strictly positive integer: the number of
//! seconds of playback before the engine skips to the next track. It is
//! persisted as a single decimal line in a file inside the host-supplied
//! per-installation data directory.

use std::fmt;
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::ConfigError;

/// Compiled-in default used until a setting is successfully loaded
pub const DEFAULT_TIMEOUT_SECS: u32 = 30;

/// Fixed settings file name, joined to the host's data directory
const SETTINGS_FILE_NAME: &str = "auto_next.cfg";

/// A persisted line longer than this is rejected outright
const MAX_LINE_LEN: usize = 9;

/// Countdown duration in seconds, guaranteed strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutSeconds(u32);

impl TimeoutSeconds {
    /// Validate a raw value into a timeout. Rejects zero, negatives, and
    /// anything that does not fit in 32 bits.
    pub fn new(secs: i64) -> Result<Self, ConfigError> {
        if secs > 0 && secs <= i64::from(u32::MAX) {
            Ok(Self(secs as u32))
        } else {
            Err(ConfigError::InvalidValue(secs.to_string()))
        }
    }

    /// Raw value in seconds
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Countdown duration for the idle timer
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }
}

impl Default for TimeoutSeconds {
    fn default() -> Self {
        Self(DEFAULT_TIMEOUT_SECS)
    }
}

impl fmt::Display for TimeoutSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TimeoutSeconds {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let secs: i64 = trimmed
            .parse()
            .map_err(|_| ConfigError::InvalidValue(trimmed.to_string()))?;
        Self::new(secs)
    }
}

/// File-backed store for the timeout setting
///
/// The record is read once at startup, overwritten wholesale on each save,
/// and removed on uninstall. There is no versioning and no other content.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store rooted in the host's per-installation data directory
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(SETTINGS_FILE_NAME),
        }
    }

    /// Path of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted timeout
    ///
    /// Only the first line of the file is considered, regardless of length.
    /// Any failure is recoverable; the caller keeps its previous value.
    pub fn load(&self) -> Result<TimeoutSeconds, ConfigError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::Missing(self.path.clone()));
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut line = String::new();
        BufReader::new(file)
            .read_line(&mut line)
            .map_err(|source| ConfigError::Read {
                path: self.path.clone(),
                source,
            })?;

        let line = line.trim_end_matches(['\r', '\n']);
        if line.len() > MAX_LINE_LEN {
            return Err(ConfigError::LineTooLong(line.len()));
        }

        let timeout = line.parse()?;
        debug!("Loaded timeout of {}s from {}", timeout, self.path.display());
        Ok(timeout)
    }

    /// Persist the timeout, replacing the whole record
    ///
    /// Writes to a sibling temp file and renames it into place so a crash
    /// mid-write never leaves a torn record.
    pub fn save(&self, value: TimeoutSeconds) -> Result<(), ConfigError> {
        let tmp = self.path.with_extension("cfg.tmp");
        fs::write(&tmp, value.to_string()).map_err(|source| ConfigError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!("Saved timeout of {}s to {}", value, self.path.display());
        Ok(())
    }

    /// Remove the settings file if present
    ///
    /// Failures are swallowed; uninstall must always proceed.
    pub fn delete(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => info!("Removed settings file {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => debug!("Could not remove settings file: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_is_thirty_seconds() {
        assert_eq!(TimeoutSeconds::default().get(), 30);
    }

    #[test]
    fn rejects_zero_and_negative_values() {
        assert!(TimeoutSeconds::new(0).is_err());
        assert!(TimeoutSeconds::new(-5).is_err());
        assert!(TimeoutSeconds::new(1).is_ok());
    }

    #[test]
    fn parses_decimal_strings() {
        assert_eq!("30".parse::<TimeoutSeconds>().unwrap().get(), 30);
        assert_eq!(" 45 ".parse::<TimeoutSeconds>().unwrap().get(), 45);
        assert!("abc".parse::<TimeoutSeconds>().is_err());
        assert!("0".parse::<TimeoutSeconds>().is_err());
        assert!("-5".parse::<TimeoutSeconds>().is_err());
        assert!("".parse::<TimeoutSeconds>().is_err());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());

        for secs in [1, 30, 120, 999_999_999] {
            let value = TimeoutSeconds::new(secs).unwrap();
            store.save(value).unwrap();
            assert_eq!(store.load().unwrap(), value);
        }
    }

    #[test]
    fn load_missing_file_reports_missing() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        assert!(matches!(store.load(), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn load_rejects_over_long_line() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        fs::write(store.path(), "1234567890").unwrap();
        assert!(matches!(store.load(), Err(ConfigError::LineTooLong(10))));
    }

    #[test]
    fn load_rejects_garbage_and_non_positive_values() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());

        for contents in ["not a num", "0", "-12"] {
            fs::write(store.path(), contents).unwrap();
            assert!(
                matches!(store.load(), Err(ConfigError::InvalidValue(_))),
                "expected {:?} to be rejected",
                contents
            );
        }
    }

    #[test]
    fn load_only_considers_the_first_line() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        fs::write(store.path(), "25\n999999\ntrailing junk").unwrap();
        assert_eq!(store.load().unwrap().get(), 25);
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        store.save(TimeoutSeconds::default()).unwrap();

        store.delete();
        assert!(!store.path().exists());
        store.delete();
    }
}
