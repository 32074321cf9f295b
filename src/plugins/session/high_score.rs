//! High-score persistence.
//!
//! The session only needs `load` and `save` of a single integer. The store is
//! injected as the [`HighScores`] resource so tests and headless runs never
//! touch the filesystem.

use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use bevy::prelude::*;
use directories::ProjectDirs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("could not determine a user data directory")]
    NoDataDir,
    #[error("high score file {path:?} is corrupt")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseIntError,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub trait HighScoreStore: Send + Sync + 'static {
    fn load(&self) -> Result<u32, HighScoreError>;
    fn save(&self, score: u32) -> Result<(), HighScoreError>;
}

#[derive(Resource)]
pub struct HighScores(Box<dyn HighScoreStore>);

impl HighScores {
    pub fn new(store: impl HighScoreStore) -> Self {
        Self(Box::new(store))
    }

    /// Stored high score; a failing store reads as zero.
    pub fn load_or_zero(&self) -> u32 {
        self.0.load().unwrap_or_else(|err| {
            warn!("Could not load high score: {err}");
            0
        })
    }

    pub fn save_or_warn(&self, score: u32) {
        if let Err(err) = self.0.save(score) {
            warn!("Could not save high score {score}: {err}");
        }
    }
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new(MemoryHighScoreStore::default())
    }
}

/// Plain-text integer file.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `high_score.txt` in the platform's data directory for this game.
    pub fn in_user_data_dir() -> Result<Self, HighScoreError> {
        let dirs = ProjectDirs::from("", "", "recoil-gunner").ok_or(HighScoreError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join("high_score.txt")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<u32, HighScoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        text.trim()
            .parse()
            .map_err(|source| HighScoreError::Parse { path: self.path.clone(), source })
    }

    fn save(&self, score: u32) -> Result<(), HighScoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}

/// In-memory store. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore(Arc<AtomicU32>);

impl MemoryHighScoreStore {
    pub fn with_value(score: u32) -> Self {
        Self(Arc::new(AtomicU32::new(score)))
    }

    pub fn get(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<u32, HighScoreError> {
        Ok(self.get())
    }

    fn save(&self, score: u32) -> Result<(), HighScoreError> {
        self.0.store(score, Ordering::Relaxed);
        Ok(())
    }
}
