use thiserror::Error;

/// What a placement routine was trying to put on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacedItem {
    Food,
    Obstacle,
}

impl std::fmt::Display for PlacedItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacedItem::Food => write!(f, "food"),
            PlacedItem::Obstacle => write!(f, "obstacle"),
        }
    }
}

/// Errors raised by the game core
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// No free cell was left for the item after the retry budget and a full scan
    #[error("no free cell left to place {item} after {attempts} attempts")]
    PlacementExhausted { item: PlacedItem, attempts: u32 },

    #[error("difficulty must be between 1 and 5, got {0}")]
    InvalidDifficulty(u8),

    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
}
