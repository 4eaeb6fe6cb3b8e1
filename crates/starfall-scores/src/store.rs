//! Disk persistence for the high-score table.
//!
//! Missing or unreadable files yield an empty table; the scores screen
//! must come up even on a fresh install or after file corruption.

use std::fs;
use std::path::{Path, PathBuf};

use crate::date;
use crate::table::HighScoreTable;

/// A high-score table bound to its file on disk.
#[derive(Debug)]
pub struct ScoreStore {
    path: PathBuf,
    table: HighScoreTable,
}

impl ScoreStore {
    /// Open a store at the given path, loading whatever is there.
    pub fn open<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let table = load(&path);
        Self { path, table }
    }

    /// Record a finished run. Writes through on every accepted score.
    /// Returns the 1-based rank when the run made the table.
    pub fn record(&mut self, score: u64, level: u32) -> Result<Option<usize>, String> {
        let rank = self.table.add(score, level, date::today());
        if rank.is_some() {
            self.save()?;
        }
        Ok(rank)
    }

    /// Write the table to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create score directory: {e}"))?;
        }
        let json = serde_json::to_string_pretty(&self.table)
            .map_err(|e| format!("Failed to serialize high scores: {e}"))?;
        fs::write(&self.path, json).map_err(|e| format!("Failed to write high scores: {e}"))?;
        Ok(())
    }

    pub fn table(&self) -> &HighScoreTable {
        &self.table
    }

    pub fn high_score(&self) -> u64 {
        self.table.high_score()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Load a table from disk. Missing or corrupt files yield an empty table.
pub fn load(path: &Path) -> HighScoreTable {
    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
        Err(_) => HighScoreTable::default(),
    }
}
