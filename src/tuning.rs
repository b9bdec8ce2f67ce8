//! Data-driven game balance
//!
//! Every number the simulation reads lives here. Loaded from `config.json`
//! next to the binary; a missing config is seeded from `config.example.json`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Window / frame settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenTuning {
    pub width: f32,
    pub height: f32,
    /// Target frames per second for the driver loop
    pub fps: u32,
}

impl Default for ScreenTuning {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 600.0,
            fps: 60,
        }
    }
}

/// Player character
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JumperTuning {
    pub width: f32,
    pub height: f32,
    /// Spawn position (top-left)
    pub start: Vec2,
    /// Horizontal speed in pixels/s while a move key is held
    pub speed: f32,
    /// Ascent scale applied to each profile step
    pub gravity_up: f32,
    /// Descent scale applied to each profile step
    pub gravity_down: f32,
    /// Interval between ascent steps
    pub jump_interval_ms: u64,
    /// Descending weights approximating a parabolic arc
    pub jump_profile: Vec<f32>,
}

impl Default for JumperTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
            start: Vec2::new(180.0, 480.0),
            speed: 220.0,
            gravity_up: 180.0,
            gravity_down: 30.0,
            jump_interval_ms: 25,
            jump_profile: (1..=10).rev().map(|w| w as f32).collect(),
        }
    }
}

/// Relative spawn weights for platform kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformWeights {
    pub r#static: u32,
    pub moving: u32,
    pub breakable: u32,
}

impl Default for PlatformWeights {
    fn default() -> Self {
        Self {
            r#static: 10,
            moving: 1,
            breakable: 2,
        }
    }
}

impl PlatformWeights {
    pub fn total(&self) -> u32 {
        self.r#static + self.moving + self.breakable
    }
}

/// Platform generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformTuning {
    pub width: f32,
    pub height: f32,
    /// Spawn gate: no new platform while this many are alive
    pub max_count: usize,
    /// Vertical distance to the previous highest platform
    pub min_gap: f32,
    pub max_gap: f32,
    pub moving_speed_min: f32,
    pub moving_speed_max: f32,
    pub weights: PlatformWeights,
}

impl Default for PlatformTuning {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 12.0,
            max_count: 12,
            min_gap: 40.0,
            max_gap: 110.0,
            moving_speed_min: 40.0,
            moving_speed_max: 120.0,
            weights: PlatformWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterTuning {
    pub width: f32,
    pub height: f32,
    /// Probability that a new static platform carries a monster
    pub spawn_chance: f64,
}

impl Default for MonsterTuning {
    fn default() -> Self {
        Self {
            width: 36.0,
            height: 36.0,
            spawn_chance: 1.0 / 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    pub radius: f32,
    pub speed: f32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            radius: 5.0,
            speed: 420.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportTuning {
    /// Downward translation speed (pixels/s) while scrolling
    pub scroll_speed: f32,
    /// Scrolling runs while the jumper's top edge is above this line
    pub scroll_threshold: f32,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            scroll_speed: 300.0,
            scroll_threshold: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    /// Pixels of offset plus feet position per point
    pub divisor: f32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self { divisor: 10.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScoreTuning {
    pub file: PathBuf,
    pub max_entries: usize,
}

impl Default for HighScoreTuning {
    fn default() -> Self {
        Self {
            file: PathBuf::from("highscores.json"),
            max_entries: 10,
        }
    }
}

/// All tunables, read-only for the duration of a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub screen: ScreenTuning,
    pub jumper: JumperTuning,
    pub platform: PlatformTuning,
    pub monster: MonsterTuning,
    pub ball: BallTuning,
    pub viewport: ViewportTuning,
    pub score: ScoreTuning,
    pub highscores: HighScoreTuning,
}

/// File-backed tuning with example fallback
#[derive(Debug, Clone)]
pub struct TuningStore {
    path: PathBuf,
    example_path: PathBuf,
}

impl TuningStore {
    pub fn new(path: impl Into<PathBuf>, example_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            example_path: example_path.into(),
        }
    }

    /// `config.json` / `config.example.json` inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("config.json"), dir.join("config.example.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, seeding it from the example when missing.
    ///
    /// A missing config and missing example yield defaults. A config that
    /// exists but does not parse is `InvalidData`.
    pub fn load(&self) -> io::Result<Tuning> {
        match fs::read(&self.path) {
            Ok(bytes) => return parse(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }

        let bytes = match fs::read(&self.example_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", self.path.display());
                return Ok(Tuning::default());
            }
            Err(e) => return Err(e),
        };

        let tuning = parse(&bytes)?;
        log::info!(
            "Seeding {} from {}",
            self.path.display(),
            self.example_path.display()
        );
        self.save(&tuning)?;
        Ok(tuning)
    }

    pub fn save(&self, tuning: &Tuning) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(tuning)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}

fn parse(bytes: &[u8]) -> io::Result<Tuning> {
    serde_json::from_slice(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
