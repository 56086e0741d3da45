use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::collections::HashMap;

use crate::game::{Difficulty, GameState, Position, Rgb, FOOD_COLOR, OBSTACLE_COLOR};
use crate::metrics::{GameMetrics, ScoreRecord};
use crate::modes::controller::{ArcadeController, EndReason, GameSummary, Screen};

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Text line for one row of the high-score table
pub fn format_history_row(position: usize, record: &ScoreRecord) -> String {
    format!(
        "{}. Play no. {}   Scored points: {}   Rank: {}   Level: {}",
        position, record.attempt, record.score, record.rank, record.difficulty
    )
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, controller: &ArcadeController) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Main area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let main_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(5),
                Constraint::Percentage(90),
                Constraint::Percentage(5),
            ])
            .split(chunks[1])[1];

        match (controller.screen(), controller.state()) {
            (Screen::Playing, Some(state)) => {
                let stats = self.render_stats(controller.metrics(), state.difficulty);
                frame.render_widget(stats, chunks[0]);
                frame.render_widget(self.render_grid(state), main_area);
            }
            (Screen::GameOver(summary), _) => {
                let history = controller.session().top(controller.history_display());
                frame.render_widget(self.render_game_over(summary, history), main_area);
            }
            _ => {
                frame.render_widget(self.render_menu(controller.last_error()), main_area);
            }
        }

        let controls = self.render_controls(chunks[2], controller.screen());
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut cells: HashMap<Position, (&'static str, Color)> = HashMap::new();
        for obstacle in &state.obstacles {
            cells.insert(obstacle.position, ("▓▓", to_color(OBSTACLE_COLOR)));
        }
        cells.insert(state.food.position, ("● ", to_color(FOOD_COLOR)));
        // Reverse so a freshly grown duplicate tail keeps the earlier segment's color
        let segments: Vec<(Position, Rgb)> = state.snake.colored_segments().collect();
        for (pos, rgb) in segments.into_iter().rev() {
            cells.insert(pos, ("■ ", to_color(rgb)));
        }

        let mut lines = Vec::with_capacity(state.grid_height);
        for y in 0..state.grid_height {
            let spans: Vec<Span> = (0..state.grid_width)
                .map(|x| match cells.get(&Position::new(x as i32, y as i32)) {
                    Some(&(symbol, color)) => Span::styled(symbol, Style::default().fg(color)),
                    None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                })
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, metrics: &GameMetrics, difficulty: Difficulty) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(metrics.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.elapsed_secs().to_string(), value),
            Span::raw("    "),
            Span::styled("Rank: ", label),
            Span::styled(metrics.rank.to_string(), value),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(difficulty.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_menu(&self, last_error: Option<&str>) -> Paragraph<'_> {
        let mut choices = vec![Span::styled(
            "Choose difficulty: ",
            Style::default().fg(Color::Gray),
        )];
        for difficulty in Difficulty::all() {
            choices.push(Span::styled(
                format!("[{}] ", difficulty),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(choices),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to exit", Style::default().fg(Color::Gray)),
            ]),
        ];

        if let Some(error) = last_error {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            )));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_game_over(&self, summary: &GameSummary, history: &[ScoreRecord]) -> Paragraph<'_> {
        let reason = match summary.reason {
            EndReason::Collision(collision) => format!("Hit {}", collision),
            EndReason::BoardFull => "No room left for food".to_string(),
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                format!("Game Over! This was your {}. attempt", summary.record.attempt),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    summary.record.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled("High Scores:", Style::default().fg(Color::Yellow))),
        ];

        for (i, record) in history.iter().enumerate() {
            let style = if record.attempt == summary.record.attempt {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            text.push(Line::from(Span::styled(format_history_row(i + 1, record), style)));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect, screen: &Screen) -> Paragraph<'_> {
        let line = match screen {
            Screen::Menu => Line::from(vec![
                Span::styled("1-5", Style::default().fg(Color::Cyan)),
                Span::raw(" to start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to exit"),
            ]),
            Screen::Playing => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            Screen::GameOver(_) => Line::from(vec![
                Span::styled("M", Style::default().fg(Color::Cyan)),
                Span::raw(" main menu | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" play again | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to exit"),
            ]),
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
