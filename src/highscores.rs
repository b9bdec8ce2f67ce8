//! High score leaderboard system
//!
//! Persisted as a JSON array of scores, best first, trimmed to a fixed length.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// High score leaderboard
#[derive(Debug, Clone, PartialEq)]
pub struct HighScores {
    entries: Vec<f32>,
    max_entries: usize,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Build from arbitrary scores (sorted and trimmed)
    pub fn from_scores(scores: Vec<f32>, max_entries: usize) -> Self {
        let mut board = Self {
            entries: scores,
            max_entries,
        };
        board.normalize();
        board
    }

    /// Append, re-sort, trim. Returns the new best.
    pub fn add_score(&mut self, score: f32) -> f32 {
        self.entries.push(score);
        self.normalize();
        self.best()
    }

    fn normalize(&mut self) {
        self.entries.retain(|s| s.is_finite());
        self.entries.sort_by(|a, b| b.total_cmp(a));
        self.entries.truncate(self.max_entries);
    }

    pub fn entries(&self) -> &[f32] {
        &self.entries
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score, 0 when nothing has been recorded
    pub fn best(&self) -> f32 {
        self.entries.first().copied().unwrap_or(0.0)
    }
}

/// Leaderboard file on disk
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    max_entries: usize,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the leaderboard. Missing or corrupt files give an empty board.
    pub fn load(&self) -> HighScores {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    log::warn!("Could not read {}: {}", self.path.display(), e);
                }
                return HighScores::new(self.max_entries);
            }
        };

        match serde_json::from_slice::<Vec<f32>>(&bytes) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.len());
                HighScores::from_scores(scores, self.max_entries)
            }
            Err(e) => {
                log::warn!("Ignoring corrupt high score file {}: {}", self.path.display(), e);
                HighScores::new(self.max_entries)
            }
        }
    }

    /// Rewrite the whole file
    pub fn save(&self, scores: &HighScores) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer(&mut writer, scores.entries())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writer.flush()?;
        log::info!("High scores saved ({} entries)", scores.entries().len());
        Ok(())
    }

    /// Load, add `score`, save. The updated board is returned even when
    /// writing fails so callers can keep showing it.
    pub fn submit(&self, score: f32) -> (HighScores, io::Result<()>) {
        let mut board = self.load();
        board.add_score(score);
        let saved = self.save(&board);
        (board, saved)
    }
}
