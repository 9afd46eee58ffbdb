//! Where high scores live between runs

pub mod high_scores;

pub use high_scores::{HighScoreFile, ScoreFileError, ScoreStore};
