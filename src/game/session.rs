//! The session controller
//!
//! [`GameSession`] is the single owner of the engine, the phase machine and
//! the scheduler. Input arrives as [`Command`]s, time arrives through
//! [`GameSession::advance`], and renderers read a [`Snapshot`]. Every
//! mutation happens inside one of those calls, so a tick is always applied
//! as a whole.

use std::time::{Duration, Instant};

use tracing::info;

use super::{
    action::{Command, Player},
    config::GameConfig,
    engine::{GameEngine, HighScores, PlayerState},
    food::FoodSpawner,
    grid::Grid,
    intro::IntroDance,
    phase::{Phase, SessionStateMachine},
    schedule::{Scheduler, Task},
    state::Snake,
};
use crate::persistence::ScoreStore;

/// Who won a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Higher score wins; on equal scores the longer survivor wins `by_time`
    Winner { player: Player, by_time: bool },
    Tie,
}

impl Verdict {
    pub fn decide(scores: [u32; 2], play_times: [Duration; 2]) -> Self {
        use std::cmp::Ordering::*;

        let leader = |ordering| match ordering {
            Greater => Some(Player::One),
            Less => Some(Player::Two),
            Equal => None,
        };

        if let Some(player) = leader(scores[0].cmp(&scores[1])) {
            return Verdict::Winner {
                player,
                by_time: false,
            };
        }
        match leader(play_times[0].cmp(&play_times[1])) {
            Some(player) => Verdict::Winner {
                player,
                by_time: true,
            },
            None => Verdict::Tie,
        }
    }
}

/// Read-only view of one player for renderers
#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    pub state: &'a PlayerState,
    pub high_score: u32,
    pub play_time: Duration,
}

/// Everything a renderer may look at, borrowed for one frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub grid: Grid,
    pub players: [PlayerView<'a>; 2],
    pub delay: Duration,
    /// High-score banner visibility, toggled on a fixed cadence
    pub blink_on: bool,
    pub intro: &'a [Snake; 2],
    /// Set once a game has ended and until the next one starts
    pub verdict: Option<Verdict>,
}

pub struct GameSession<S: ScoreStore> {
    engine: GameEngine,
    machine: SessionStateMachine,
    scheduler: Scheduler,
    store: S,
    intro: IntroDance,
    blink_on: bool,
}

impl<S: ScoreStore> GameSession<S> {
    /// Open a session on the intro screen with high scores read from `store`
    pub fn new(config: GameConfig, store: S, spawner: FoodSpawner, now: Instant) -> Self {
        let high_scores = store.load();
        info!(
            player_one = high_scores.get(Player::One),
            player_two = high_scores.get(Player::Two),
            "high scores loaded"
        );

        let machine = SessionStateMachine::new(config.countdown_from, config.fade_step);
        let intro = IntroDance::new(&config);
        let mut scheduler = Scheduler::new();
        scheduler.start(Task::Blink, config.blink_period(), now);
        scheduler.start(Task::Intro, config.intro_period(), now);

        Self {
            engine: GameEngine::new(config, high_scores, spawner),
            machine,
            scheduler,
            store,
            intro,
            blink_on: true,
        }
    }

    /// Apply an input command. Returns false when the current phase ignores it.
    pub fn handle(&mut self, command: Command, now: Instant) -> bool {
        match command {
            Command::Steer(player, direction) => {
                self.machine.is_running() && self.engine.steer(player, direction)
            }
            Command::Start => {
                if !self.machine.start() {
                    return false;
                }
                self.scheduler.stop(Task::Intro);
                self.new_game(now);
                true
            }
            Command::Restart => {
                if !self.machine.restart() {
                    return false;
                }
                self.scheduler.stop(Task::Tick);
                self.scheduler.stop(Task::Fade);
                self.new_game(now);
                true
            }
            Command::TogglePause => {
                if !self.machine.toggle_pause() {
                    return false;
                }
                if self.machine.is_running() {
                    self.scheduler.start(Task::Tick, self.engine.delay(), now);
                } else {
                    self.scheduler.stop(Task::Tick);
                }
                true
            }
            Command::ReturnToIntro => {
                if !self.machine.return_to_intro() {
                    return false;
                }
                self.scheduler.stop(Task::Fade);
                self.intro = IntroDance::new(self.engine.config());
                self.scheduler
                    .start(Task::Intro, self.engine.config().intro_period(), now);
                true
            }
            Command::ResetHighScores => {
                if !matches!(self.machine.phase(), Phase::Intro | Phase::GameOver { .. }) {
                    return false;
                }
                self.engine.reset_high_scores();
                self.store.save(self.engine.high_scores());
                info!("high scores reset");
                true
            }
        }
    }

    /// Run every task that is due at `now`. Returns how many fired.
    pub fn advance(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some(task) = self.scheduler.pop_due(now) {
            self.fire(task, now);
            fired += 1;
        }
        fired
    }

    /// When the next task is due, if any is armed
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    fn fire(&mut self, task: Task, now: Instant) {
        match task {
            Task::Tick => self.tick(now),
            Task::Countdown => {
                if self.machine.step_countdown() {
                    self.scheduler.stop(Task::Countdown);
                    self.scheduler.start(Task::Tick, self.engine.delay(), now);
                }
            }
            Task::Fade => {
                if self.machine.step_fade() {
                    self.scheduler.stop(Task::Fade);
                }
            }
            Task::Blink => self.blink_on = !self.blink_on,
            Task::Intro => self.intro.step(),
        }
    }

    fn tick(&mut self, now: Instant) {
        if !self.machine.is_running() {
            return;
        }

        let outcome = self.engine.tick_at(now);

        if outcome.players.iter().any(|p| p.new_high_score) {
            self.store.save(self.engine.high_scores());
        }
        if outcome.ate_food() {
            self.scheduler.set_period(Task::Tick, self.engine.delay());
        }
        if outcome.all_down {
            self.game_over(now);
        }
    }

    fn game_over(&mut self, now: Instant) {
        self.machine.finish();
        self.scheduler.stop(Task::Tick);
        self.scheduler
            .start(Task::Fade, self.engine.config().fade_period(), now);
        self.store.save(self.engine.high_scores());

        let [one, two] = self.engine.players();
        info!(
            player_one = one.snake.score(),
            player_two = two.snake.score(),
            verdict = ?self.verdict(now),
            "game over"
        );
    }

    fn new_game(&mut self, now: Instant) {
        self.engine.reset_at(now);
        self.scheduler.start(
            Task::Countdown,
            self.engine.config().countdown_period(),
            now,
        );
        info!("new game");
    }

    /// Result of the finished game, `None` while no game has ended
    pub fn verdict(&self, now: Instant) -> Option<Verdict> {
        if !matches!(self.machine.phase(), Phase::GameOver { .. }) {
            return None;
        }
        let players = self.engine.players();
        Some(Verdict::decide(
            players.each_ref().map(|p| p.snake.score()),
            players.each_ref().map(|p| p.snake.play_time_at(now)),
        ))
    }

    pub fn snapshot(&self, now: Instant) -> Snapshot<'_> {
        let high_scores = self.engine.high_scores();
        let players = Player::BOTH.map(|player| {
            let state = self.engine.player(player);
            PlayerView {
                state,
                high_score: high_scores.get(player),
                play_time: state.snake.play_time_at(now),
            }
        });

        Snapshot {
            phase: self.machine.phase(),
            grid: self.engine.grid(),
            players,
            delay: self.engine.delay(),
            blink_on: self.blink_on,
            intro: self.intro.snakes(),
            verdict: self.verdict(now),
        }
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Direct engine access for scripted setups (placing food and the like)
    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    pub fn high_scores(&self) -> HighScores {
        self.engine.high_scores()
    }

    pub fn is_scheduled(&self, task: Task) -> bool {
        self.scheduler.is_active(task)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
