//! Sky Hop - an endless vertical platformer
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, generation, scrolling, score)
//! - `game`: Screen state machine and menu buttons
//! - `highscores`: Persistent leaderboard
//! - `tuning`: Data-driven game balance
//! - `platform`: Input actions, clock and frame pacing
//! - `audio` / `renderer`: Requests to the host's sound and drawing layers

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{Button, ButtonKind, Game, Screen};
pub use highscores::{HighScoreStore, HighScores};
pub use tuning::{Tuning, TuningStore};
