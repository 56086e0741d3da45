pub mod game_metrics;
pub mod session;

pub use game_metrics::{rank_for, score_for, GameMetrics};
pub use session::{ScoreRecord, SessionHistory};
