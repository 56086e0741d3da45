//! Snake Arcade - a single-player snake game for the terminal
//!
//! This library provides:
//! - Core game logic: movement, collisions, food and obstacle placement (game module)
//! - Score, rank and per-session high-score tracking (metrics module)
//! - Keyboard mapping (input module) and TUI rendering (render module)
//! - The menu / play / game over flow and the terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
