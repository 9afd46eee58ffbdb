use std::time::{Duration, Instant};

use tracing::debug;

use super::{
    action::{Direction, Player},
    config::GameConfig,
    food::FoodSpawner,
    grid::Grid,
    state::{Position, Snake},
};

/// Best score per player, kept across games and persisted between runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScores([u32; 2]);

impl HighScores {
    pub fn new(player_one: u32, player_two: u32) -> Self {
        Self([player_one, player_two])
    }

    pub fn get(&self, player: Player) -> u32 {
        self.0[player.index()]
    }

    /// Raise the stored score if `score` beats it. Returns whether it did.
    pub fn offer(&mut self, player: Player, score: u32) -> bool {
        let slot = &mut self.0[player.index()];
        if score > *slot {
            *slot = score;
            true
        } else {
            false
        }
    }

    pub fn as_pair(&self) -> (u32, u32) {
        (self.0[0], self.0[1])
    }
}

/// Everything the engine tracks for one seat
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub snake: Snake,
    /// Food target inside this player's half
    pub food: Position,
    /// False once the snake has crashed; stays false until the next game
    pub running: bool,
    /// Set when this game pushed the player's high score up
    pub new_high_score: bool,
}

/// What happened to one player during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerTick {
    pub ate_food: bool,
    pub new_high_score: bool,
    pub crashed: bool,
}

/// Result of a game tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub players: [PlayerTick; 2],
    /// Both snakes are down after this tick
    pub all_down: bool,
}

impl TickOutcome {
    pub fn player(&self, player: Player) -> PlayerTick {
        self.players[player.index()]
    }

    pub fn ate_food(&self) -> bool {
        self.players.iter().any(|p| p.ate_food)
    }
}

/// The two-snake simulation: movement, food, collisions, scoring and speed
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    players: [PlayerState; 2],
    delay: Duration,
    high_scores: HighScores,
    spawner: FoodSpawner,
}

impl GameEngine {
    /// Create an engine with a fresh game already laid out
    pub fn new(config: GameConfig, high_scores: HighScores, mut spawner: FoodSpawner) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        let now = Instant::now();
        let players = Player::BOTH.map(|p| fresh_player(&config, grid, p, &mut spawner, now));

        Self {
            delay: config.initial_delay(),
            config,
            grid,
            players,
            high_scores,
            spawner,
        }
    }

    /// Start a new game: new snakes and food, scores and speed back to their initial values
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    pub fn reset_at(&mut self, now: Instant) {
        for player in Player::BOTH {
            self.players[player.index()] =
                fresh_player(&self.config, self.grid, player, &mut self.spawner, now);
        }
        self.delay = self.config.initial_delay();
    }

    /// Steer a living snake. Input for a crashed snake is dropped.
    pub fn steer(&mut self, player: Player, direction: Direction) -> bool {
        let state = &mut self.players[player.index()];
        state.running && state.snake.set_direction(direction)
    }

    /// Execute one tick of the game
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_at(Instant::now())
    }

    /// Both snakes move before either one eats or crashes, so a crash on one
    /// side never holds back the other side's move.
    pub fn tick_at(&mut self, now: Instant) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        for state in self.players.iter_mut().filter(|s| s.running) {
            state.snake.move_snake();
        }

        for player in Player::BOTH {
            let state = &mut self.players[player.index()];
            if !state.running || state.snake.head() != state.food {
                continue;
            }

            state.snake.grow_at(now);
            state.food = self.spawner.spawn(self.grid.half(player));
            let score = state.snake.score();
            let report = &mut outcome.players[player.index()];
            report.ate_food = true;

            if self.high_scores.offer(player, score) {
                state.new_high_score = true;
                report.new_high_score = true;
            }

            self.delay = self
                .delay
                .saturating_sub(self.config.speed_step())
                .max(self.config.min_delay());
            debug!(
                player = player.number(),
                score,
                delay_ms = self.delay.as_millis() as u64,
                "food eaten"
            );
        }

        for player in Player::BOTH {
            let state = &mut self.players[player.index()];
            if state.running && state.snake.collision() {
                state.running = false;
                state.snake.stop_time_at(now);
                outcome.players[player.index()].crashed = true;
                debug!(player = player.number(), score = state.snake.score(), "snake crashed");
            }
        }

        outcome.all_down = self.all_down();
        outcome
    }

    /// Neither snake is still running
    pub fn all_down(&self) -> bool {
        self.players.iter().all(|s| !s.running)
    }

    pub fn player(&self, player: Player) -> &PlayerState {
        &self.players[player.index()]
    }

    pub fn players(&self) -> &[PlayerState; 2] {
        &self.players
    }

    /// Move a player's food target, for scripted setups
    pub fn place_food(&mut self, player: Player, pos: Position) {
        self.players[player.index()].food = pos;
    }

    /// Current tick interval, shared by both snakes
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn high_scores(&self) -> HighScores {
        self.high_scores
    }

    pub fn reset_high_scores(&mut self) {
        self.high_scores = HighScores::default();
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn fresh_player(
    config: &GameConfig,
    grid: Grid,
    player: Player,
    spawner: &mut FoodSpawner,
    now: Instant,
) -> PlayerState {
    let half = grid.half(player);
    let offset = config.spawn_offset as i32;
    let head_x = match player {
        Player::One => half.left + offset,
        Player::Two => half.right - 1 - offset,
    };
    let head = Position::new(head_x, half.height / 2);

    PlayerState {
        snake: Snake::new_at(head, config.initial_snake_length, half, now),
        food: spawner.spawn(half),
        running: true,
        new_high_score: false,
    }
}
