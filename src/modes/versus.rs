//! Local two-player mode on a shared keyboard
//!
//! The runtime owns one [`GameSession`] and feeds it three things from a
//! single `tokio::select!` loop: key presses, scheduler deadlines and render
//! frames. Nothing else mutates the session.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{interval, sleep_until};
use tracing::{debug, info};

use crate::game::{FoodSpawner, GameConfig, GameSession};
use crate::input::{InputHandler, KeyAction};
use crate::persistence::ScoreStore;
use crate::render::Renderer;

pub struct VersusMode<S: ScoreStore> {
    session: GameSession<S>,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<S: ScoreStore> VersusMode<S> {
    pub fn new(config: GameConfig, store: S, spawner: FoodSpawner) -> Self {
        Self {
            session: GameSession::new(config, store, spawner, Instant::now()),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
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

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        info!("versus mode started");

        loop {
            let deadline = self.session.next_deadline();
            let wake_at = tokio::time::Instant::from_std(deadline.unwrap_or_else(Instant::now));

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Scheduled session work: ticks, countdown, fade, blink, intro
                _ = sleep_until(wake_at), if deadline.is_some() => {
                    self.session.advance(Instant::now());
                }

                // Render frame
                _ = render_timer.tick() => {
                    let snapshot = self.session.snapshot(Instant::now());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!("versus mode finished");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Game(command) => {
                let accepted = self.session.handle(command, Instant::now());
                debug!(?command, accepted, "command");
            }
            KeyAction::CycleTheme => self.renderer.cycle_theme(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Phase, Player};
    use crate::persistence::HighScoreFile;
    use crate::render::Theme;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tempfile::TempDir;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mode(dir: &TempDir) -> VersusMode<HighScoreFile> {
        VersusMode::new(
            GameConfig::small(),
            HighScoreFile::new(dir.path().join("scores.txt")),
            FoodSpawner::seeded(5),
        )
    }

    #[test]
    fn test_game_initialization() {
        let dir = TempDir::new().unwrap();
        let mode = mode(&dir);
        assert_eq!(mode.session.phase(), Phase::Intro);
        assert_eq!(mode.session.high_scores().as_pair(), (0, 0));
    }

    #[test]
    fn test_enter_starts_countdown() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(&dir);
        mode.handle_event(key(KeyCode::Enter));
        assert!(matches!(mode.session.phase(), Phase::Countdown { .. }));
    }

    #[test]
    fn test_theme_and_quit_keys() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(&dir);

        mode.handle_event(key(KeyCode::Char('b')));
        assert_eq!(mode.renderer.theme(), Theme::DarkSolid);

        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_steering_ignored_outside_running() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(&dir);
        mode.handle_event(key(KeyCode::Enter));
        mode.handle_event(key(KeyCode::Up));
        assert_eq!(
            mode.session.engine().player(Player::Two).snake.direction(),
            None
        );
    }
}
