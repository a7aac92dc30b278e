//! High score persistence
//!
//! The stored value is a single decimal integer. Natively it lives in a text
//! file; on the web it lives in LocalStorage. Reads that fail for any reason
//! count as 0 and writes are best-effort.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// High score storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing file could not be read or written
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value is not an integer
    #[error("corrupt high score: {0}")]
    Parse(#[from] std::num::ParseIntError),

    /// Storage backend unavailable
    #[error("storage unavailable")]
    Unavailable,
}

/// Where the high score is kept
pub trait HighScoreStore {
    /// Read the stored high score
    fn try_load(&self) -> Result<u64, StoreError>;

    /// Write the high score
    fn try_save(&mut self, score: u64) -> Result<(), StoreError>;

    /// Stored high score, or 0 if missing or unreadable
    fn load(&self) -> u64 {
        match self.try_load() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("High score unavailable ({e}), starting from 0");
                0
            }
        }
    }

    /// Save, logging and swallowing failures
    fn save(&mut self, score: u64) {
        match self.try_save(score) {
            Ok(()) => log::info!("High score {score} saved"),
            Err(e) => log::warn!("Failed to save high score {score}: {e}"),
        }
    }
}

/// Parse stored text, tolerating surrounding whitespace
pub fn parse_score(text: &str) -> Result<u64, StoreError> {
    Ok(text.trim().parse::<u64>()?)
}

/// Text file holding the score
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub const DEFAULT_PATH: &'static str = "highscore.txt";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl HighScoreStore for FileStore {
    fn try_load(&self) -> Result<u64, StoreError> {
        let text = std::fs::read_to_string(&self.path)?;
        parse_score(&text)
    }

    fn try_save(&mut self, score: u64) -> Result<(), StoreError> {
        std::fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}

/// In-process store (tests, hosts without storage)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub score: Option<u64>,
    /// Number of successful saves
    pub saves: usize,
}

impl HighScoreStore for MemoryStore {
    fn try_load(&self) -> Result<u64, StoreError> {
        self.score.ok_or(StoreError::Unavailable)
    }

    fn try_save(&mut self, score: u64) -> Result<(), StoreError> {
        self.score = Some(score);
        self.saves += 1;
        Ok(())
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "catch_game_highscore";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn try_load(&self) -> Result<u64, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(text)) => parse_score(&text),
            _ => Err(StoreError::Unavailable),
        }
    }

    fn try_save(&mut self, score: u64) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(&self.key, &score.to_string())
            .map_err(|_| StoreError::Unavailable)
    }
}
