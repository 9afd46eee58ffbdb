//! High-score persistence
//!
//! Scores are kept in a plain text file holding two lines, player one's best
//! then player two's. Reading never fails from the game's point of view: a
//! missing or damaged file yields zeroes. Write failures are logged and
//! dropped.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::game::HighScores;

/// Default location, relative to the working directory
pub const DEFAULT_SCORE_FILE: &str = "highscores.txt";

/// Storage for the two high scores
pub trait ScoreStore {
    /// Stored scores, or zeroes if none can be read
    fn load(&self) -> HighScores;

    /// Best-effort write; failures are not reported to the caller
    fn save(&self, scores: HighScores);
}

#[derive(Debug, Error)]
pub enum ScoreFileError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("missing score line {line}")]
    MissingLine { line: usize },
    #[error("line {line} is not a score: {text:?}")]
    Malformed { line: usize, text: String },
}

impl ScoreFileError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScoreFileError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Two-line text file holding both high scores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file, reporting exactly what went wrong
    pub fn try_load(&self) -> Result<HighScores, ScoreFileError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| ScoreFileError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_scores(&text)
    }

    pub fn try_save(&self, scores: HighScores) -> Result<(), ScoreFileError> {
        let (one, two) = scores.as_pair();
        std::fs::write(&self.path, format!("{one}\n{two}\n")).map_err(|source| {
            ScoreFileError::Io {
                path: self.path.clone(),
                source,
            }
        })
    }
}

impl ScoreStore for HighScoreFile {
    fn load(&self) -> HighScores {
        match self.try_load() {
            Ok(scores) => scores,
            Err(err) if err.is_not_found() => {
                debug!(path = ?self.path, "no score file yet, starting from zero");
                HighScores::default()
            }
            Err(err) => {
                warn!(error = %err, "ignoring unreadable score file");
                HighScores::default()
            }
        }
    }

    fn save(&self, scores: HighScores) {
        if let Err(err) = self.try_save(scores) {
            warn!(error = %err, "could not save high scores");
        }
    }
}

fn parse_scores(text: &str) -> Result<HighScores, ScoreFileError> {
    let mut lines = text.lines();
    let mut next_score = |line: usize| {
        let raw = lines.next().ok_or(ScoreFileError::MissingLine { line })?;
        raw.trim()
            .parse::<u32>()
            .map_err(|_| ScoreFileError::Malformed {
                line,
                text: raw.to_string(),
            })
    };

    let one = next_score(1)?;
    let two = next_score(2)?;
    Ok(HighScores::new(one, two))
}
