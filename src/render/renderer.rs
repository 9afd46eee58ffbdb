use std::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::theme::Theme;
use crate::game::{Phase, Player, PlayerView, Position, Snake, Snapshot, Verdict};

const STAR_COUNT: usize = 160;

/// Per-player palette: (head, body, food)
fn palette(player: Player) -> (Color, Color, Color) {
    match player {
        Player::One => (
            Color::Rgb(0x33, 0xFF, 0xFF),
            Color::Rgb(0x00, 0xBF, 0xFF),
            Color::Rgb(0x00, 0xE5, 0xFF),
        ),
        Player::Two => (
            Color::Rgb(0xFF, 0x66, 0xCC),
            Color::Rgb(0xFF, 0x2D, 0x95),
            Color::Rgb(0xFF, 0x33, 0xCC),
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Star,
    Head(Player),
    Body(Player),
    Food(Player),
    Wreck,
}

/// Draws a [`Snapshot`]; never touches game state
pub struct Renderer {
    theme: Theme,
    /// Fractional positions so the field scales with the grid
    stars: Vec<(f32, f32)>,
}

impl Renderer {
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let stars = (0..STAR_COUNT)
            .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
            .collect();

        Self {
            theme: Theme::default(),
            stars,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        let game_area = chunks[1];

        if snapshot.phase == Phase::Intro {
            frame.render_widget(self.render_grid(snapshot, true), game_area);
            let menu_area = centered(game_area, 44, 9);
            frame.render_widget(Clear, menu_area);
            frame.render_widget(self.render_intro(snapshot), menu_area);
            frame.render_widget(self.render_controls(snapshot.phase), chunks[2]);
            return;
        }

        frame.render_widget(self.render_header(snapshot), chunks[0]);
        frame.render_widget(self.render_grid(snapshot, false), game_area);

        match snapshot.phase {
            Phase::Countdown { remaining } => {
                let text = if remaining > 0 {
                    remaining.to_string()
                } else {
                    "GO!".to_string()
                };
                self.render_banner(frame, game_area, &text);
            }
            Phase::Paused => self.render_banner(frame, game_area, "PAUSED"),
            Phase::GameOver { fade } => {
                let area = centered(game_area, 48, 9);
                frame.render_widget(Clear, area);
                frame.render_widget(self.render_summary(snapshot, fade), area);
            }
            Phase::Intro | Phase::Running => {}
        }

        frame.render_widget(self.render_controls(snapshot.phase), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot, intro: bool) -> Paragraph<'_> {
        let width = snapshot.grid.width;
        let height = snapshot.grid.height;
        let mut cells = vec![Cell::Empty; width * height];

        let mut put = |pos: Position, cell: Cell| {
            if pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height {
                cells[pos.y as usize * width + pos.x as usize] = cell;
            }
        };

        if self.theme.has_stars() {
            for &(sx, sy) in &self.stars {
                let x = (sx * width as f32) as i32;
                let y = (sy * height as f32) as i32;
                put(Position::new(x, y), Cell::Star);
            }
        }

        if intro {
            for (player, snake) in Player::BOTH.into_iter().zip(snapshot.intro) {
                paint_snake(&mut put, snake, player, true);
            }
        } else {
            for (player, view) in Player::BOTH.into_iter().zip(&snapshot.players) {
                put(view.state.food, Cell::Food(player));
                paint_snake(&mut put, &view.state.snake, player, view.state.running);
            }
        }

        let divider = snapshot.grid.divider() as usize;
        let lines: Vec<Line> = (0..height)
            .map(|y| {
                let bg = self.theme.background(y, height);
                let spans: Vec<Span> = (0..width)
                    .map(|x| {
                        let (symbol, fg) = match cells[y * width + x] {
                            Cell::Empty if x == divider => ("│ ", Color::DarkGray),
                            Cell::Empty => ("  ", bg),
                            Cell::Star if snapshot.blink_on ^ (x % 2 == 0) => ("· ", Color::White),
                            Cell::Star => ("· ", Color::Gray),
                            Cell::Head(p) => ("■ ", palette(p).0),
                            Cell::Body(p) => ("■ ", palette(p).1),
                            Cell::Food(p) => ("● ", palette(p).2),
                            Cell::Wreck => ("□ ", Color::DarkGray),
                        };
                        Span::styled(symbol, Style::default().fg(fg).bg(bg))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Duel Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_header(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let lines: Vec<Line> = vec![
            Line::from(
                Player::BOTH
                    .into_iter()
                    .zip(&snapshot.players)
                    .flat_map(|(player, view)| self.score_spans(player, view))
                    .collect::<Vec<_>>(),
            ),
            Line::from(
                Player::BOTH
                    .into_iter()
                    .zip(&snapshot.players)
                    .flat_map(|(player, view)| self.status_spans(player, view, snapshot.blink_on))
                    .collect::<Vec<_>>(),
            ),
        ];

        Paragraph::new(lines).alignment(Alignment::Center)
    }

    fn score_spans(&self, player: Player, view: &PlayerView) -> Vec<Span<'static>> {
        vec![
            Span::styled(
                format!("Player {} ", player.number()),
                Style::default()
                    .fg(palette(player).0)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.state.snake.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | High: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.high_score.to_string(), Style::default().fg(Color::White)),
            Span::styled(" | Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(format_time(view.play_time), Style::default().fg(Color::White)),
            Span::raw("        "),
        ]
    }

    fn status_spans(&self, player: Player, view: &PlayerView, blink_on: bool) -> Vec<Span<'static>> {
        let text = if !view.state.running {
            format!("Player {} Lost!", player.number())
        } else if view.state.new_high_score && blink_on {
            "New High Score!".to_string()
        } else {
            String::new()
        };
        vec![
            Span::styled(
                format!("{text:^24}"),
                Style::default()
                    .fg(palette(player).2)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("        "),
        ]
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect, text: &str) {
        let area = centered(area, 20, 3);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                text.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    fn render_intro(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let [one, two] = &snapshot.players;
        let text = vec![
            Line::from(Span::styled(
                "TWO PLAYER SNAKE GAME",
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "High scores  P1: {}  P2: {}",
                one.high_score, two.high_score
            )),
            Line::from(format!("Background: {}", self.theme.name())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" start  "),
                Span::styled("B", Style::default().fg(Color::Cyan)),
                Span::raw(" background  "),
                Span::styled("H", Style::default().fg(Color::Red)),
                Span::raw(" reset scores"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
    }

    fn render_summary(&self, snapshot: &Snapshot, fade: f32) -> Paragraph<'_> {
        let level = (fade.clamp(0.0, 1.0) * 255.0) as u8;
        let ink = Color::Rgb(level, level, level);
        let gold = Color::Rgb(level, level, 0);

        let mut text = vec![
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(ink).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (player, view) in Player::BOTH.into_iter().zip(&snapshot.players) {
            text.push(Line::from(Span::styled(
                format!(
                    "Player {} Score: {} | Time: {}s",
                    player.number(),
                    view.state.snake.score(),
                    view.play_time.as_secs()
                ),
                Style::default().fg(ink),
            )));
        }
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            snapshot.verdict.map(describe).unwrap_or_default(),
            Style::default().fg(gold).add_modifier(Modifier::BOLD),
        )));
        text.push(Line::from(Span::styled(
            "Press R to Restart",
            Style::default().fg(ink).add_modifier(Modifier::ITALIC),
        )));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ink)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let hint = match phase {
            Phase::Intro => "Enter start | B background | H reset scores | Q quit",
            Phase::Countdown { .. } => "Get ready... | Q quit",
            Phase::Running => "P1: WASD | P2: ↑↓←→ | P pause | R restart | Q quit",
            Phase::Paused => "P resume | Q quit",
            Phase::GameOver { .. } => "R play again | M menu | B background | H reset scores | Q quit",
        };

        Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::Gray),
        )))
        .alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tail first, so the head wins where segments overlap
fn paint_snake(put: &mut impl FnMut(Position, Cell), snake: &Snake, player: Player, alive: bool) {
    for (i, &pos) in snake.body().enumerate().rev() {
        let cell = match (alive, i) {
            (false, _) => Cell::Wreck,
            (true, 0) => Cell::Head(player),
            (true, _) => Cell::Body(player),
        };
        put(pos, cell);
    }
}

/// Headline for the end-of-game summary
pub fn describe(verdict: Verdict) -> String {
    match verdict {
        Verdict::Winner {
            player,
            by_time: false,
        } => format!("Player {} Wins!", player.number()),
        Verdict::Winner {
            player,
            by_time: true,
        } => format!("Player {} Wins by Time!", player.number()),
        Verdict::Tie => "It's a Tie!".to_string(),
    }
}

pub fn format_time(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_time(Duration::from_secs(125)), "02:05");
        assert_eq!(format_time(Duration::ZERO), "00:00");
        assert_eq!(format_time(Duration::from_secs(3661)), "61:01");
    }

    #[test]
    fn test_verdict_headlines() {
        assert_eq!(
            describe(Verdict::Winner {
                player: Player::Two,
                by_time: false
            }),
            "Player 2 Wins!"
        );
        assert_eq!(
            describe(Verdict::Winner {
                player: Player::One,
                by_time: true
            }),
            "Player 1 Wins by Time!"
        );
        assert_eq!(describe(Verdict::Tie), "It's a Tie!");
    }

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 10, 4);
        let inner = centered(area, 20, 3);
        assert_eq!(inner, Rect::new(0, 0, 10, 3));
        assert_eq!(centered(Rect::new(2, 2, 20, 10), 10, 4), Rect::new(7, 5, 10, 4));
    }

    #[test]
    fn test_theme_cycles() {
        let mut renderer = Renderer::new();
        assert_eq!(renderer.theme(), Theme::DarkGradient);
        renderer.cycle_theme();
        assert_eq!(renderer.theme(), Theme::DarkSolid);
    }
}
