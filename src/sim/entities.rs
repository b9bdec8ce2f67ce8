//! Jumper, platforms, monsters and balls
//!
//! Positions are top-left corners in screen space (y grows downward). Every
//! entity's collision mask lives in the session's [`MaskSet`]; entities of
//! one kind share a mask.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, colliding_indices};
use super::state::{GameEvent, MaskSet};
use super::timer::Timer;
use crate::tuning::JumperTuning;

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jumper {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed magnitude while a move key is held
    pub max_speed: f32,
    /// Current signed horizontal speed
    pub speed: f32,
    /// Last non-zero movement direction, for the sprite
    pub facing: f32,
    /// Ascending when true, falling otherwise
    pub jumping: bool,
    /// Index into the jump profile
    pub jump_offset: usize,
    pub jump_timer: Timer,
}

impl Jumper {
    pub fn new(tuning: &JumperTuning, now: Duration) -> Self {
        Self {
            pos: tuning.start,
            size: Vec2::new(tuning.width, tuning.height),
            max_speed: tuning.speed,
            speed: 0.0,
            facing: 1.0,
            jumping: false,
            jump_offset: 0,
            jump_timer: Timer::new(Duration::from_millis(tuning.jump_interval_ms), now, true),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Set horizontal direction: -1 left, 1 right, 0 stop
    pub fn steer(&mut self, direction: f32) {
        if direction == 0.0 {
            self.speed = 0.0;
        } else {
            self.facing = direction.signum();
            self.speed = self.facing * self.max_speed;
        }
    }

    /// Move sideways, wrapping around the screen edges
    pub fn move_horizontal(&mut self, dt: f32, screen_width: f32) {
        self.pos.x += self.speed * dt;
        let center = self.pos.x + self.size.x / 2.0;
        if center < 0.0 {
            self.pos.x += screen_width;
        } else if center >= screen_width {
            self.pos.x -= screen_width;
        }
    }

    /// Translate vertically (viewport follow)
    pub fn shift(&mut self, dy: f32) {
        self.pos.y += dy;
    }

    /// Advance the jump arc by one tick.
    ///
    /// Ascending steps are gated by the jump timer. Falling checks the
    /// platforms every tick and bounces off the highest bouncable contact.
    pub fn step_jump(
        &mut self,
        now: Duration,
        dt: f32,
        tuning: &JumperTuning,
        platforms: &mut [Platform],
        masks: &MaskSet,
        events: &mut Vec<GameEvent>,
    ) {
        let profile = &tuning.jump_profile;
        if profile.is_empty() {
            return;
        }
        debug_assert!(self.jump_offset < profile.len());

        if self.jumping {
            if self.jump_timer.is_due(now) {
                self.pos.y -= tuning.gravity_up * profile[self.jump_offset] * dt;
                self.jump_offset += 1;
                if self.jump_offset == profile.len() {
                    self.jump_offset = 0;
                    self.jumping = false;
                }
            }
            return;
        }

        let hits = colliding_indices(
            self.pos,
            &masks.jumper,
            platforms.iter().map(|p| &p.pos),
            &masks.platform,
        );

        if !hits.iter().any(|&i| platforms[i].bouncable) {
            self.pos.y += tuning.gravity_down * profile[self.jump_offset] * dt;
            return;
        }

        let mut top = f32::INFINITY;
        for &i in &hits {
            let platform = &mut platforms[i];
            top = top.min(platform.pos.y);
            if platform.bounce() {
                log::debug!("Platform {} broke", platform.id);
                events.push(GameEvent::PlatformBroke { id: platform.id });
            }
        }

        self.pos.y = top - self.size.y;
        self.jumping = true;
        self.jump_offset = 0;
        self.jump_timer = Timer::new(self.jump_timer.interval(), now, true);
        events.push(GameEvent::Jumped);
    }
}

/// Platform variants with their variant-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Green, never moves
    Static,
    /// Blue, slides between the screen edges
    Moving { speed: f32, direction: f32 },
    /// Brown, supports exactly one bounce
    Breakable { broken: bool },
}

/// A platform entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Whether landing here resets the jump
    pub bouncable: bool,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(id: u32, pos: Vec2, size: Vec2, kind: PlatformKind) -> Self {
        let bouncable = !matches!(kind, PlatformKind::Breakable { broken: true });
        Self {
            id,
            pos,
            size,
            bouncable,
            kind,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Register a bounce. Returns true when this bounce broke the platform.
    pub fn bounce(&mut self) -> bool {
        match &mut self.kind {
            PlatformKind::Breakable { broken } if !*broken => {
                *broken = true;
                self.bouncable = false;
                true
            }
            _ => false,
        }
    }

    /// Autonomous motion (moving platforms only)
    pub fn update(&mut self, dt: f32, screen_width: f32) {
        if let PlatformKind::Moving { speed, direction } = &mut self.kind {
            self.pos.x += *speed * *direction * dt;
            if self.pos.x <= 0.0 {
                self.pos.x = 0.0;
                *direction = 1.0;
            } else if self.pos.x + self.size.x >= screen_width {
                self.pos.x = screen_width - self.size.x;
                *direction = -1.0;
            }
        }
    }

    pub fn shift(&mut self, dy: f32) {
        self.pos.y += dy;
    }
}

/// Monster looks; they all behave the same
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonsterKind {
    Blue,
    Red,
    Purple,
    BlueFly,
}

impl MonsterKind {
    pub const ALL: [MonsterKind; 4] = [
        MonsterKind::Blue,
        MonsterKind::Red,
        MonsterKind::Purple,
        MonsterKind::BlueFly,
    ];
}

/// A monster sitting on a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Platform it was spawned on
    pub host: u32,
    pub kind: MonsterKind,
}

impl Monster {
    /// Centre a monster on top of `host`
    pub fn on_platform(id: u32, host: &Platform, size: Vec2, kind: MonsterKind) -> Self {
        let pos = Vec2::new(host.rect().center().x - size.x / 2.0, host.pos.y - size.y);
        Self {
            id,
            pos,
            size,
            host: host.id,
            kind,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn shift(&mut self, dy: f32) {
        self.pos.y += dy;
    }
}

/// A projectile flying in a straight line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Top-left of the ball sprite
    pub pos: Vec2,
    pub radius: f32,
    /// Unit direction, fixed at launch
    pub heading: Vec2,
    pub speed: f32,
}

impl Ball {
    /// Launch from `origin` (ball centre) toward `target`.
    ///
    /// A target on the origin fires straight up.
    pub fn launch(id: u32, origin: Vec2, target: Vec2, speed: f32, radius: f32) -> Self {
        let heading = (target - origin).normalize_or(Vec2::NEG_Y);
        Self {
            id,
            pos: origin - Vec2::splat(radius),
            radius,
            heading,
            speed,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.radius * 2.0))
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos += self.heading * self.speed * dt;
    }

    pub fn shift(&mut self, dy: f32) {
        self.pos.y += dy;
    }
}
