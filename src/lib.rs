//! Duel Snake - two-player split-screen Snake for the terminal
//!
//! This library provides:
//! - Core game logic and session state machine (game module)
//! - High-score persistence (persistence module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - The interactive terminal runtime (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod persistence;
pub mod render;
