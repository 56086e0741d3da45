pub mod arcade;
pub mod controller;

pub use arcade::ArcadeMode;
pub use controller::{ArcadeController, EndReason, GameSummary, Screen};
