//! Top-level session phases and the legal moves between them
//!
//! ```text
//! Intro -> Countdown -> Running <-> Paused
//!              ^           |
//!              |           v
//!              +------- GameOver -> Intro
//! ```
//!
//! The machine only tracks *where* the session is. Laying out a fresh game on
//! `start`/`restart` and arming timers is the session controller's job.

use tracing::debug;

/// The session's current phase with its transient data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Title screen, no simulation
    Intro,
    /// Counting down to the first tick; `remaining` hits 0 on "go"
    Countdown { remaining: u32 },
    /// Ticking the engine
    Running,
    /// Frozen mid-game
    Paused,
    /// Both snakes are down; `fade` is the summary's opacity in `0.0..=1.0`
    GameOver { fade: f32 },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Intro => "intro",
            Phase::Countdown { .. } => "countdown",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver { .. } => "game over",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionStateMachine {
    phase: Phase,
    countdown_from: u32,
    fade_step: f32,
}

impl SessionStateMachine {
    pub fn new(countdown_from: u32, fade_step: f32) -> Self {
        Self {
            phase: Phase::Intro,
            countdown_from,
            fade_step,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Leave the intro for a countdown
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Intro => {
                self.begin_countdown();
                true
            }
            _ => false,
        }
    }

    /// Count down again from the top. Ignored while paused, counting or idle.
    pub fn restart(&mut self) -> bool {
        match self.phase {
            Phase::Running | Phase::GameOver { .. } => {
                self.begin_countdown();
                true
            }
            _ => false,
        }
    }

    /// One countdown step. Returns true when the step reached "go" and the
    /// session is now running.
    pub fn step_countdown(&mut self) -> bool {
        let Phase::Countdown { remaining } = self.phase else {
            return false;
        };

        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.enter(Phase::Running);
            true
        } else {
            self.phase = Phase::Countdown { remaining };
            false
        }
    }

    /// Pause a running game or resume a paused one
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => self.enter(Phase::Paused),
            Phase::Paused => self.enter(Phase::Running),
            _ => return false,
        }
        true
    }

    /// Both snakes are down
    pub fn finish(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.enter(Phase::GameOver { fade: 0.0 });
                true
            }
            _ => false,
        }
    }

    pub fn return_to_intro(&mut self) -> bool {
        match self.phase {
            Phase::GameOver { .. } => {
                self.enter(Phase::Intro);
                true
            }
            _ => false,
        }
    }

    /// Raise the summary opacity. Returns true once it is fully opaque.
    pub fn step_fade(&mut self) -> bool {
        match &mut self.phase {
            Phase::GameOver { fade } => {
                *fade = (*fade + self.fade_step).min(1.0);
                *fade >= 1.0
            }
            _ => true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    fn begin_countdown(&mut self) {
        self.enter(Phase::Countdown {
            remaining: self.countdown_from,
        });
    }

    fn enter(&mut self, next: Phase) {
        debug!(from = self.phase.name(), to = next.name(), "phase change");
        self.phase = next;
    }
}
