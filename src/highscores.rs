//! Best-attempts high scores, one record per difficulty
//!
//! Persisted as a single JSON object in a key-value store. Anything that
//! cannot be read back is treated as "no scores yet".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::HIGH_SCORE_KEY;
use crate::difficulty::Difficulty;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Best result for one difficulty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "player")]
    pub player_name: String,
    #[serde(rename = "bestAttempts")]
    pub best_attempts: u32,
}

/// High score table keyed by difficulty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable {
    records: BTreeMap<Difficulty, ScoreRecord>,
}

impl ScoreTable {
    /// Create empty table
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, difficulty: Difficulty) -> Option<&ScoreRecord> {
        self.records.get(&difficulty)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record a win. Only a strictly better attempt count replaces an
    /// existing record; ties keep the first achiever.
    /// Returns true if the table changed.
    pub fn record_win(
        &mut self,
        difficulty: Difficulty,
        player_name: &str,
        attempts_used: u32,
    ) -> bool {
        if attempts_used == 0 {
            return false;
        }
        let better = self
            .records
            .get(&difficulty)
            .map(|existing| attempts_used < existing.best_attempts)
            .unwrap_or(true);
        if !better {
            return false;
        }

        self.records.insert(
            difficulty,
            ScoreRecord {
                player_name: player_name.to_string(),
                best_attempts: attempts_used,
            },
        );
        log::info!(
            "New best for {}: {} in {} attempts",
            difficulty,
            player_name,
            attempts_used
        );
        true
    }

    fn is_valid(&self) -> bool {
        self.records.values().all(|r| r.best_attempts >= 1)
    }
}

/// Loads and saves the score table through a storage backend
pub struct ScoreStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> ScoreStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Load the table. Missing, unreadable or corrupt data yields an empty table.
    pub fn load(&self) -> ScoreTable {
        let json = match self.backend.get_item(HIGH_SCORE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                return ScoreTable::new();
            }
            Err(e) => {
                log::warn!("Could not read high scores: {}", e);
                return ScoreTable::new();
            }
        };

        match serde_json::from_str::<ScoreTable>(&json) {
            Ok(table) if table.is_valid() => {
                log::info!("Loaded high scores for {} difficulties", table.records.len());
                table
            }
            Ok(_) => {
                log::warn!("Discarding high scores with invalid attempt counts");
                ScoreTable::new()
            }
            Err(e) => {
                log::warn!("Discarding corrupt high scores: {}", e);
                ScoreTable::new()
            }
        }
    }

    /// Persist the full table, overwriting prior content
    pub fn save(&mut self, table: &ScoreTable) -> Result<()> {
        let json = serde_json::to_string(table)?;
        self.backend.set_item(HIGH_SCORE_KEY, &json)?;
        log::info!("High scores saved ({} entries)", table.records.len());
        Ok(())
    }
}
