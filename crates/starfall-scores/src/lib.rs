//! High-score table and JSON persistence for STARFALL.
//!
//! Self-contained: knows nothing about the simulation beyond the final
//! score and level it is handed.

pub mod date;
pub mod store;
pub mod table;

pub use store::ScoreStore;
pub use table::{HighScoreTable, ScoreEntry, MAX_HIGH_SCORES};
