use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};

use super::controller::ArcadeController;
use crate::game::{Difficulty, GameConfig, GameEngine};
use crate::input::InputHandler;
use crate::metrics::SessionHistory;
use crate::render::Renderer;

/// Interactive terminal session: menu, games and the high-score table
pub struct ArcadeMode {
    controller: ArcadeController,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
}

impl ArcadeMode {
    pub fn new(config: GameConfig, session: SessionHistory) -> Self {
        let tick_interval = config.tick_interval();
        let engine = GameEngine::new(config);

        Self {
            controller: ArcadeController::new(engine, session, Instant::now()),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
        }
    }

    /// Skip the menu and go straight into a game
    pub fn start_at(&mut self, difficulty: Difficulty) {
        self.controller.start_game(difficulty, Instant::now());
    }

    pub fn into_session(self) -> SessionHistory {
        self.controller.into_session()
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = restore_on_error(Self::open_terminal(), disable_raw_mode)?;

        // Run game loop with cleanup
        let result = match Self::prepare_terminal(&mut terminal) {
            Ok(()) => self.run_game_loop(&mut terminal).await,
            Err(err) => Err(err),
        };

        // Cleanup terminal
        let cleanup = self.cleanup_terminal(&mut terminal);

        result.and(cleanup)
    }

    fn open_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        Terminal::new(backend).context("Failed to create terminal")
    }

    fn prepare_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(())
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        info!("Game loop running at {:?} per tick", self.tick_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => break,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.controller.tick(Instant::now());
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.controller);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted");
                    break;
                }
            }

            if self.controller.should_quit() {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.controller.handle_key_action(action, Instant::now());
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Run `restore` when `result` is an error, keeping the original error
fn restore_on_error<T>(
    result: Result<T>,
    restore: impl FnOnce() -> std::io::Result<()>,
) -> Result<T> {
    if result.is_err() {
        if let Err(err) = restore() {
            log::warn!("Failed to restore terminal: {}", err);
        }
    }
    result
}
