use crate::game::STARTING_BALANCE;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the preferences path.
pub const PREFS_PATH_ENV: &str = "CUPGO_PREFS";
/// Default preferences file name, relative to the working directory.
pub const PREFS_FILE: &str = "cupgo_prefs.json";

fn default_balance() -> u64 {
    STARTING_BALANCE
}

fn default_sound() -> bool {
    true
}

/// Persisted player preferences. Missing keys fall back to their defaults;
/// the key names match the original document format.
///
/// ```
/// use cupgo_rs::store::Prefs;
///
/// let prefs: Prefs = serde_json::from_str("{}").unwrap();
/// assert_eq!(prefs.balance, 100);
/// assert!(prefs.is_sound_on);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default = "default_balance")]
    pub balance: u64,
    #[serde(rename = "isSoundOn", default = "default_sound")]
    pub is_sound_on: bool,
}

impl Default for Prefs {
    fn default() -> Self {
        Self { balance: default_balance(), is_sound_on: default_sound() }
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    #[error("preferences io error: {0}")]
    Io(#[from] io::Error),
    #[error("preferences malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// File-backed store for [`Prefs`]. Reads and writes are synchronous and
/// last-write-wins; only one screen touches the store at a time.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$CUPGO_PREFS`, or [`PREFS_FILE`] when unset.
    pub fn from_env() -> Self {
        match std::env::var_os(PREFS_PATH_ENV) {
            Some(path) => Self::new(PathBuf::from(path)),
            None => Self::new(PREFS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the preferences. A missing file yields the defaults; a
    /// malformed file is an error.
    pub fn load(&self) -> Result<Prefs, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no preferences at {}, using defaults", self.path.display());
                return Ok(Prefs::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    /// Load, falling back to the defaults on any failure.
    pub fn load_or_default(&self) -> Prefs {
        match self.load() {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("failed to load preferences from {}: {e}", self.path.display());
                Prefs::default()
            }
        }
    }

    pub fn save(&self, prefs: &Prefs) -> Result<(), StoreError> {
        fs::write(&self.path, serde_json::to_string_pretty(prefs)?)?;
        Ok(())
    }
}
