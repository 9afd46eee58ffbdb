//! Core game logic module for two-player Snake
//!
//! This module contains the simulation and session state machine without any
//! terminal I/O or rendering. Time is passed in explicitly wherever it matters,
//! so every rule can be driven step by step from tests.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod intro;
pub mod phase;
pub mod schedule;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction, Player};
pub use config::GameConfig;
pub use engine::{GameEngine, HighScores, PlayerState, PlayerTick, TickOutcome};
pub use food::FoodSpawner;
pub use grid::{Grid, Half};
pub use intro::IntroDance;
pub use phase::{Phase, SessionStateMachine};
pub use schedule::{Scheduler, Task};
pub use session::{GameSession, PlayerView, Snapshot, Verdict};
pub use state::{Position, Snake};
