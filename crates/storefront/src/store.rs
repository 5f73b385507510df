//! Persisted client state.
//!
//! The bearer token and cached exchange-rate entries survive process
//! restarts in a single JSON file under the platform data directory. There
//! is no eviction beyond the rate TTL checks done by the currency module.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::currency::CachedRate;

/// Errors from reading or writing the state file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No platform data directory could be determined.
    #[error("could not determine a data directory for state persistence")]
    NoDataDir,

    /// Filesystem failure.
    #[error("state file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// State could not be serialized.
    #[error("state serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// On-disk state shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    rates: HashMap<String, CachedRate>,
}

/// Handle to the persisted key-value state.
///
/// Cheaply cloneable; clones share the same file and in-memory view.
#[derive(Clone)]
pub struct StateStore {
    inner: Arc<StateStoreInner>,
}

struct StateStoreInner {
    path: PathBuf,
    state: Mutex<PersistedState>,
}

impl StateStore {
    /// Open the store at the default platform data path.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoDataDir` if no platform data directory exists,
    /// or an I/O error if the file exists but cannot be read.
    pub fn open() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("in", "monsoonmarket", "monsoon")
            .ok_or(StoreError::NoDataDir)?;
        Self::open_at(dirs.data_dir().join("state.json"))
    }

    /// Open the store at an explicit path.
    ///
    /// A missing file yields an empty state; a corrupt file is discarded
    /// with a warning rather than failing startup.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be read.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(error = %e, path = %path.display(), "state file is corrupt, starting empty");
                PersistedState::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PersistedState::default(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self {
            inner: Arc::new(StateStoreInner {
                path,
                state: Mutex::new(state),
            }),
        })
    }

    /// The persisted bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    /// Replace (or clear) the persisted bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file cannot be written.
    pub fn set_token(&self, token: Option<&str>) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.token = token.map(ToOwned::to_owned);
        Self::save(&self.inner.path, &state)
    }

    /// The cached rate entry for a `BASE_TARGET` key, if any.
    #[must_use]
    pub fn rate(&self, key: &str) -> Option<CachedRate> {
        self.lock().rates.get(key).copied()
    }

    /// Record a rate entry for a `BASE_TARGET` key.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file cannot be written.
    pub fn put_rate(&self, key: &str, entry: CachedRate) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.rates.insert(key.to_owned(), entry);
        Self::save(&self.inner.path, &state)
    }

    fn lock(&self) -> MutexGuard<'_, PersistedState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn save(path: &std::path::Path, state: &PersistedState) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(state)?;
        fs::write(path, text)?;
        Ok(())
    }
}
