use crate::game::Difficulty;

/// One finished game; never changed after it is recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub attempt: u32,
    pub score: u32,
    pub rank: u32,
    pub difficulty: Difficulty,
}

/// Attempt counter and ranked history for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    attempts: u32,
    records: Vec<ScoreRecord>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished game and keep the history sorted by score, best first.
    ///
    /// Equal scores keep the order they were recorded in.
    pub fn record_game(&mut self, score: u32, rank: u32, difficulty: Difficulty) -> ScoreRecord {
        self.attempts += 1;
        let record = ScoreRecord {
            attempt: self.attempts,
            score,
            rank,
            difficulty,
        };
        self.records.push(record.clone());
        // sort_by is stable
        self.records.sort_by(|a, b| b.score.cmp(&a.score));
        record
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    /// The best `n` records
    pub fn top(&self, n: usize) -> &[ScoreRecord] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn high_score(&self) -> Option<u32> {
        self.records.first().map(|r| r.score)
    }
}
