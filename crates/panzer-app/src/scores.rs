//! High-score table, persisted as JSON in the user's home directory.
//!
//! Load tolerates a missing or corrupt file: the game never refuses to
//! start over persistence.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept.
pub const MAX_SCORES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    /// Highest level reached.
    pub level: u32,
    /// Unix timestamp (seconds) when achieved.
    pub timestamp: u64,
}

/// Ordered best-first score table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<ScoreEntry>,
}

impl HighScores {
    /// Does `score` earn a place in the table?
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Insert a result, keeping the table sorted and capped.
    pub fn record(&mut self, score: u32, level: u32) {
        if !self.qualifies(score) {
            return;
        }
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.entries.push(ScoreEntry {
            score,
            level,
            timestamp,
        });
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_SCORES);
    }

    /// Best score on record, zero when the table is empty.
    pub fn best(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }
}

fn scores_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".panzer_scores.json")
}

/// Load the score table, falling back to an empty one on any failure.
pub fn load() -> HighScores {
    let path = scores_path();
    match std::fs::read_to_string(&path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(scores) => scores,
            Err(err) => {
                log::warn!("ignoring corrupt score file {}: {err}", path.display());
                HighScores::default()
            }
        },
        Err(_) => HighScores::default(),
    }
}

/// Persist the score table. Failure is logged, not fatal.
pub fn save(scores: &HighScores) {
    let path = scores_path();
    let json = match serde_json::to_string_pretty(scores) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("failed to serialize scores: {err}");
            return;
        }
    };
    if let Err(err) = std::fs::write(&path, json) {
        log::warn!("failed to write {}: {err}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_sorted_and_capped() {
        let mut scores = HighScores::default();
        for i in 0..15u32 {
            scores.record(i * 100 + 50, 1);
        }
        assert_eq!(scores.entries.len(), MAX_SCORES);
        assert_eq!(scores.best(), 1450);
        assert!(scores
            .entries
            .windows(2)
            .all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_zero_score_never_qualifies() {
        let mut scores = HighScores::default();
        scores.record(0, 3);
        assert!(scores.entries.is_empty());
    }

    #[test]
    fn test_full_table_requires_beating_the_floor() {
        let mut scores = HighScores::default();
        for _ in 0..MAX_SCORES {
            scores.record(500, 2);
        }
        assert!(!scores.qualifies(400));
        assert!(!scores.qualifies(500));
        assert!(scores.qualifies(501));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut scores = HighScores::default();
        scores.record(1200, 4);
        let json = serde_json::to_string(&scores).unwrap();
        let back: HighScores = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries, scores.entries);
    }
}
