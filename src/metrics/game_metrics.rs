use std::time::{Duration, Instant};

/// Food items needed to climb one rank
pub const FOOD_PER_RANK: u32 = 5;
/// Points awarded per food item
pub const POINTS_PER_FOOD: u32 = 5;

/// `floor(elapsed_seconds * 10) + food_eaten * 5`
pub fn score_for(elapsed: Duration, food_eaten: u32) -> u32 {
    let time_points = (elapsed.as_millis() / 100).min(u32::MAX as u128) as u32;
    time_points.saturating_add(food_eaten.saturating_mul(POINTS_PER_FOOD))
}

/// Rank 1 with nothing eaten, one more every `FOOD_PER_RANK` items
pub fn rank_for(food_eaten: u32) -> u32 {
    1 + food_eaten / FOOD_PER_RANK
}

/// Live score keeping for the game in progress
#[derive(Debug, Clone)]
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub food_eaten: u32,
    pub score: u32,
    pub rank: u32,
}

impl GameMetrics {
    pub fn new(now: Instant) -> Self {
        Self {
            start_time: now,
            elapsed_time: Duration::ZERO,
            food_eaten: 0,
            score: 0,
            rank: 1,
        }
    }

    /// Recompute everything from the game start and the current food count
    pub fn update(&mut self, now: Instant, food_eaten: u32) {
        self.elapsed_time = now.saturating_duration_since(self.start_time);
        self.food_eaten = food_eaten;
        self.score = score_for(self.elapsed_time, food_eaten);
        self.rank = rank_for(food_eaten);
    }

    pub fn on_game_start(&mut self, now: Instant) {
        *self = Self::new(now);
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_time.as_secs()
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}
