//! Session state and core simulation types
//!
//! One `GameState` is one run: created when play starts, moved into the
//! pause screen untouched, dropped at game over.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Ball, Jumper, Monster, Platform, PlatformKind};
use super::generate;
use super::mask::Mask;
use crate::tuning::Tuning;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Dropped below the bottom of the screen
    Fell,
    /// Touched a monster
    Monster,
}

/// Things that happened during a tick, for audio and effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    PlatformBroke { id: u32 },
    BallFired { id: u32 },
    MonsterKilled { id: u32 },
    Died(DeathCause),
}

/// Collision masks, one per sprite kind
#[derive(Debug, Clone)]
pub struct MaskSet {
    pub jumper: Mask,
    pub platform: Mask,
    pub monster: Mask,
    pub ball: Mask,
}

impl MaskSet {
    /// Shape masks sized from tuning, used when the host supplies no sprites
    pub fn from_tuning(tuning: &Tuning) -> Self {
        let px = |v: f32| v.round().max(1.0) as u32;
        let ball = px(tuning.ball.radius * 2.0);
        Self {
            jumper: Mask::filled(px(tuning.jumper.width), px(tuning.jumper.height)),
            platform: Mask::filled(px(tuning.platform.width), px(tuning.platform.height)),
            monster: Mask::ellipse(px(tuning.monster.width), px(tuning.monster.height)),
            ball: Mask::ellipse(ball, ball),
        }
    }
}

/// Everything the pause screen must hand back unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub jumper: Jumper,
    pub platforms: Vec<Platform>,
    pub monsters: Vec<Monster>,
    pub balls: Vec<Ball>,
    pub score: f32,
    pub viewport_offset: f32,
    pub clock: Duration,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub masks: MaskSet,
    pub jumper: Jumper,
    /// Live platforms, oldest first
    pub platforms: Vec<Platform>,
    pub monsters: Vec<Monster>,
    pub balls: Vec<Ball>,
    /// Best score this run, never decreases
    pub score: f32,
    /// Total downward translation applied so far
    pub viewport_offset: f32,
    /// Session time, advanced by each tick's delta
    pub clock: Duration,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with shape masks
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let masks = MaskSet::from_tuning(&tuning);
        Self::with_masks(seed, tuning, masks)
    }

    /// Create a new run with host-supplied sprite masks
    pub fn with_masks(seed: u64, tuning: Tuning, masks: MaskSet) -> Self {
        let jumper = Jumper::new(&tuning.jumper, Duration::ZERO);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            masks,
            jumper,
            platforms: Vec::new(),
            monsters: Vec::new(),
            balls: Vec::new(),
            score: 0.0,
            viewport_offset: 0.0,
            clock: Duration::ZERO,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };

        state.spawn_start_platform();
        generate::fill(&mut state);
        log::info!(
            "New run (seed {}) with {} platforms",
            seed,
            state.platforms.len()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Static platform centred under the jumper's feet
    fn spawn_start_platform(&mut self) {
        let id = self.next_entity_id();
        let size = Vec2::new(self.tuning.platform.width, self.tuning.platform.height);
        let rect = self.jumper.rect();
        let pos = Vec2::new(rect.center().x - size.x / 2.0, rect.bottom());
        self.platforms
            .push(Platform::new(id, pos, size, PlatformKind::Static));
    }

    /// Translate every live entity down by `dy`
    pub fn shift_all(&mut self, dy: f32) {
        self.jumper.shift(dy);
        for platform in &mut self.platforms {
            platform.shift(dy);
        }
        for monster in &mut self.monsters {
            monster.shift(dy);
        }
        for ball in &mut self.balls {
            ball.shift(dy);
        }
    }

    /// Score for the current frame, before the running max
    pub fn altitude_score(&self) -> f32 {
        (self.viewport_offset + self.jumper.rect().bottom()) / self.tuning.score.divisor
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            jumper: self.jumper.clone(),
            platforms: self.platforms.clone(),
            monsters: self.monsters.clone(),
            balls: self.balls.clone(),
            score: self.score,
            viewport_offset: self.viewport_offset,
            clock: self.clock,
        }
    }
}
