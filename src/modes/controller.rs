//! Menu, play and game over flow, independent of the terminal.
//!
//! The controller is fed key intents as they arrive and a `tick` at the fixed
//! game rate. Time is always passed in, so the whole flow can be driven
//! headlessly.

use log::{debug, info, warn};
use std::time::Instant;

use crate::game::{Action, CollisionType, Difficulty, Direction, GameEngine, GameState};
use crate::input::KeyAction;
use crate::metrics::{GameMetrics, ScoreRecord, SessionHistory};

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Collision(CollisionType),
    /// No free cell was left for the next food
    BoardFull,
}

/// Outcome of the last finished game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub record: ScoreRecord,
    pub reason: EndReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver(GameSummary),
}

pub struct ArcadeController {
    engine: GameEngine,
    session: SessionHistory,
    screen: Screen,
    state: Option<GameState>,
    metrics: GameMetrics,
    difficulty: Difficulty,
    pending_direction: Option<Direction>,
    last_error: Option<String>,
    should_quit: bool,
}

impl ArcadeController {
    pub fn new(engine: GameEngine, session: SessionHistory, now: Instant) -> Self {
        Self {
            engine,
            session,
            screen: Screen::Menu,
            state: None,
            metrics: GameMetrics::new(now),
            difficulty: Difficulty::default(),
            pending_direction: None,
            last_error: None,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The current (or just finished) game
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn session(&self) -> &SessionHistory {
        &self.session
    }

    pub fn into_session(self) -> SessionHistory {
        self.session
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn history_display(&self) -> usize {
        self.engine.config().history_display
    }

    /// Message from a game that could not be set up
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply a key intent to whichever screen is showing
    pub fn handle_key_action(&mut self, action: KeyAction, now: Instant) {
        if action == KeyAction::Quit {
            info!("Quit requested");
            self.should_quit = true;
            return;
        }

        match action {
            KeyAction::SelectDifficulty(difficulty) if self.screen == Screen::Menu => {
                self.start_game(difficulty, now);
            }
            KeyAction::GameAction(Action::Move(direction)) if self.screen == Screen::Playing => {
                self.queue_direction(direction);
            }
            KeyAction::MainMenu if self.is_game_over() => {
                self.screen = Screen::Menu;
            }
            KeyAction::Restart if self.is_game_over() => {
                self.start_game(self.difficulty, now);
            }
            _ => {}
        }
    }

    /// Keep the newest turn that the engine would accept; a reversal never
    /// replaces an earlier valid turn from the same tick
    fn queue_direction(&mut self, direction: Direction) {
        let reverses = self
            .state
            .as_ref()
            .is_some_and(|state| state.snake.direction.is_opposite(direction));
        if !reverses {
            self.pending_direction = Some(direction);
        }
    }

    fn is_game_over(&self) -> bool {
        matches!(self.screen, Screen::GameOver(_))
    }

    /// Start a fresh game at `difficulty`; stays on the menu if the board cannot be set up
    pub fn start_game(&mut self, difficulty: Difficulty, now: Instant) {
        match self.engine.new_game(difficulty) {
            Ok(state) => {
                info!(
                    "Game started: difficulty {}, {} obstacles",
                    difficulty,
                    state.obstacles.len()
                );
                self.difficulty = difficulty;
                self.state = Some(state);
                self.metrics.on_game_start(now);
                self.pending_direction = None;
                self.last_error = None;
                self.screen = Screen::Playing;
            }
            Err(err) => {
                warn!("Could not start game at difficulty {}: {}", difficulty, err);
                self.last_error = Some(err.to_string());
                self.screen = Screen::Menu;
            }
        }
    }

    /// Advance the running game by one tick; a no-op on the other screens
    pub fn tick(&mut self, now: Instant) {
        if self.screen != Screen::Playing {
            return;
        }
        let Some(state) = self.state.as_mut() else {
            self.screen = Screen::Menu;
            return;
        };

        let action = Action::from(self.pending_direction.take());
        let outcome = self.engine.step(state, action);
        self.metrics.update(now, state.food_eaten());

        match outcome {
            Ok(result) if result.terminated => {
                let reason = result
                    .info
                    .collision_type
                    .map(EndReason::Collision)
                    .unwrap_or(EndReason::BoardFull);
                self.end_game(reason);
            }
            Ok(result) => {
                if result.info.ate_food {
                    debug!(
                        "Food eaten: {} total, score {}",
                        self.metrics.food_eaten, self.metrics.score
                    );
                }
            }
            Err(err) => {
                warn!("Ending game: {}", err);
                self.end_game(EndReason::BoardFull);
            }
        }
    }

    fn end_game(&mut self, reason: EndReason) {
        let record =
            self.session
                .record_game(self.metrics.score, self.metrics.rank, self.difficulty);
        info!(
            "Game over ({:?}): attempt {}, score {}, rank {}, difficulty {}",
            reason, record.attempt, record.score, record.rank, record.difficulty
        );
        self.pending_direction = None;
        self.screen = Screen::GameOver(GameSummary { record, reason });
    }
}
