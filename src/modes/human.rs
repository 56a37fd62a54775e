use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::timing::{Trigger, Triggers, next_trigger};

/// Interactive play in the terminal.
///
/// This task is the only writer of the game state: ticks, key presses and
/// resets are handled one at a time from a single `select!` loop.
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    triggers: Option<Triggers>,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self::with_engine(GameEngine::new(config)?))
    }

    pub fn with_engine(mut engine: GameEngine) -> Self {
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            triggers: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        self.start_triggers();

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                trigger = next_trigger(&mut self.triggers) => {
                    self.on_trigger(trigger);
                }

                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                if !self.engine.set_direction(&mut self.state, direction) {
                    debug!(
                        "Ignored reversal from {:?} to {:?}",
                        self.state.direction, direction
                    );
                }
            }
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn on_trigger(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Move => {
                let result = self.engine.step(&mut self.state);
                if result.terminated {
                    self.stop_triggers();
                    self.metrics
                        .on_game_over(self.state.snake.len(), self.state.time_played);
                }
            }
            Trigger::Clock => self.engine.tick_clock(&mut self.state),
        }
    }

    /// Fresh board and a fresh trigger pair; the high score carries over.
    fn reset_game(&mut self) {
        self.stop_triggers();

        let high_score = self.state.high_score;
        self.state = self.engine.reset();
        self.state.high_score = high_score;

        self.start_triggers();
    }

    fn start_triggers(&mut self) {
        let config = self.engine.config();
        self.triggers = Some(Triggers::start(
            config.move_interval(),
            config.clock_interval(),
        ));
    }

    fn stop_triggers(&mut self) {
        if self.triggers.take().is_some() {
            debug!("Stopped movement and clock triggers");
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
