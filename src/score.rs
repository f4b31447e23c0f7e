use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{Difficulty, POINTS_PER_SPEED_TIER, WrapMode};
use crate::food::Food;

/// Returns the record-store key for a difficulty/wrap pair, e.g. `hard_on`.
#[must_use]
pub fn record_key(difficulty: Difficulty, wrap: WrapMode) -> String {
    format!("{}_{}", difficulty.as_str(), wrap.as_str())
}

/// Best score per (difficulty, wrap) combination.
///
/// Serialized as a flat map of `<difficulty>_<wrap>` keys. Unknown keys are
/// preserved, missing ones read as zero.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores(BTreeMap<String, u32>);

impl HighScores {
    #[must_use]
    pub fn get(&self, difficulty: Difficulty, wrap: WrapMode) -> u32 {
        self.0
            .get(&record_key(difficulty, wrap))
            .copied()
            .unwrap_or(0)
    }

    pub fn set(&mut self, difficulty: Difficulty, wrap: WrapMode, score: u32) {
        self.0.insert(record_key(difficulty, wrap), score);
    }

    /// Adds a zero record for every combination not yet present.
    pub fn fill_missing(&mut self) {
        for difficulty in Difficulty::ALL {
            for wrap in WrapMode::ALL {
                self.0.entry(record_key(difficulty, wrap)).or_insert(0);
            }
        }
    }
}

impl Default for HighScores {
    fn default() -> Self {
        let mut scores = Self(BTreeMap::new());
        scores.fill_missing();
        scores
    }
}

/// Score, length and speed tier of the running session.
#[derive(Debug, Clone)]
pub struct ScoreKeeper {
    score: u32,
    length: usize,
    speed_tier: u32,
    high_scores: HighScores,
}

impl ScoreKeeper {
    /// Starts a fresh tally carrying over the persisted records.
    #[must_use]
    pub fn new(initial_length: usize, high_scores: HighScores) -> Self {
        Self {
            score: 0,
            length: initial_length,
            speed_tier: 0,
            high_scores,
        }
    }

    /// Credits an eaten food and raises the speed tier on each threshold.
    pub fn on_food_eaten(&mut self, food: Food) {
        self.score = self.score.saturating_add(food.points());
        self.speed_tier = self.speed_tier.max(self.score / POINTS_PER_SPEED_TIER);
    }

    /// Mirrors the snake length after a tick.
    pub fn sync_length(&mut self, length: usize) {
        self.length = length;
    }

    /// Folds the session score into the record for this mode.
    ///
    /// Returns true when the record was raised. Calling it again with the
    /// same score changes nothing.
    pub fn finalize(&mut self, difficulty: Difficulty, wrap: WrapMode) -> bool {
        let previous = self.high_scores.get(difficulty, wrap);
        if self.score > previous {
            self.high_scores.set(difficulty, wrap, self.score);
            return true;
        }
        false
    }

    /// Best score to show while playing: the record or the live score.
    #[must_use]
    pub fn best(&self, difficulty: Difficulty, wrap: WrapMode) -> u32 {
        self.high_scores.get(difficulty, wrap).max(self.score)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn speed_tier(&self) -> u32 {
        self.speed_tier
    }

    #[must_use]
    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }
}
