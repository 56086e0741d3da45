//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it once per tick and draws the resulting state.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod spawn;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{Difficulty, GameConfig};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use error::{GameError, PlacedItem};
pub use state::{
    CollisionType, Food, GameState, Obstacle, Position, Rgb, Snake, FOOD_COLOR, OBSTACLE_COLOR,
    SNAKE_PALETTE,
};
