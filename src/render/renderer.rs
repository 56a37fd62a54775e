use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, GameState};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Scoreboard
                Constraint::Min(0),    // Board
                Constraint::Length(4), // Game over banner
                Constraint::Length(3), // Controls
            ])
            .split(frame.area());

        frame.render_widget(self.render_scoreboard(state), chunks[0]);

        // Board is two columns per cell plus borders
        let board_width = u16::try_from(state.board_size)
            .unwrap_or(u16::MAX)
            .saturating_mul(2)
            .saturating_add(2);
        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(board_width),
                Constraint::Fill(1),
            ])
            .split(chunks[1])[1];
        frame.render_widget(self.render_board(state), board_area);

        if state.game_over {
            frame.render_widget(self.render_game_over(), chunks[2]);
        }

        frame.render_widget(self.render_controls(metrics), chunks[3]);
    }

    fn render_board(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.snake.head();

        let lines: Vec<Line> = state
            .cells()
            .into_iter()
            .enumerate()
            .map(|(y, row)| {
                let spans: Vec<Span> = row
                    .into_iter()
                    .enumerate()
                    .map(|(x, cell)| {
                        let is_head = head.x == x as i32 && head.y == y as i32;
                        match cell {
                            Cell::Snake if is_head => Span::styled(
                                "■ ",
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Cell::Snake => Span::styled("□ ", Style::default().fg(Color::Green)),
                            Cell::Food => Span::styled(
                                "O ",
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            ),
                            Cell::Empty => {
                                Span::styled(". ", Style::default().fg(Color::DarkGray))
                            }
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let border_color = if state.game_over {
            Color::Red
        } else {
            Color::White
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(border_color))
                .title(" Snake "),
        )
    }

    fn render_scoreboard(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.high_score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Time Played: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!(
                    "{}s ({})",
                    state.time_played,
                    GameMetrics::format_time(state.time_played)
                ),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![Span::styled(
                "Game Over!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to reset or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit | "),
            Span::raw(format!(
                "Games: {}  Longest: {}",
                metrics.games_played, metrics.longest_snake
            )),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
