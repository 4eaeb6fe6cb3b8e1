//! The in-memory high-score table.

use serde::{Deserialize, Serialize};

/// Entries kept in the table. Everything below the cut is dropped on write.
pub const MAX_HIGH_SCORES: usize = 10;

/// One recorded run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u64,
    /// Level reached when the run ended.
    pub level: u32,
    /// Calendar date of the run, "YYYY-MM-DD".
    pub date: String,
}

/// High-score table, sorted descending by score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScoreTable {
    pub scores: Vec<ScoreEntry>,
}

impl HighScoreTable {
    /// Whether a score would make the table. Zero never qualifies.
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.scores.len() < MAX_HIGH_SCORES {
            return true;
        }
        match self.scores.last() {
            Some(last) => score > last.score,
            None => true,
        }
    }

    /// Insert a run, keeping the table sorted and capped.
    /// Returns the 1-based rank of the new entry, or None if it didn't qualify.
    pub fn add(&mut self, score: u64, level: u32, date: String) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = ScoreEntry { score, level, date };
        let rank = self
            .scores
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.scores.len());
        self.scores.insert(rank, entry);
        self.scores.truncate(MAX_HIGH_SCORES);

        Some(rank + 1)
    }

    /// The best recorded score, 0 when the table is empty.
    pub fn high_score(&self) -> u64 {
        self.scores.first().map(|e| e.score).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }
}
