//! Procedural platform/monster spawning and off-screen culling

use glam::Vec2;
use rand::Rng;

use super::entities::{Monster, MonsterKind, Platform, PlatformKind};
use super::state::GameState;
use crate::tuning::PlatformWeights;

/// Platform kind without its per-instance state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformTag {
    Static,
    Moving,
    Breakable,
}

/// Weighted pick of the next platform kind
pub fn choose_tag<R: Rng>(rng: &mut R, weights: &PlatformWeights) -> PlatformTag {
    let total = weights.total();
    if total == 0 {
        return PlatformTag::Static;
    }
    let roll = rng.random_range(0..total);
    if roll < weights.r#static {
        PlatformTag::Static
    } else if roll < weights.r#static + weights.moving {
        PlatformTag::Moving
    } else {
        PlatformTag::Breakable
    }
}

/// Top edge of the highest live platform, or the screen bottom when empty
pub fn highest_platform_y(state: &GameState) -> f32 {
    state
        .platforms
        .iter()
        .map(|p| p.pos.y)
        .reduce(f32::min)
        .unwrap_or(state.tuning.screen.height)
}

/// Spawn one platform above the current highest, if below the cap.
///
/// Returns true if a platform was added.
pub fn spawn_platform(state: &mut GameState) -> bool {
    let tuning = &state.tuning.platform;
    if state.platforms.len() >= tuning.max_count {
        return false;
    }

    let size = Vec2::new(tuning.width, tuning.height);
    let max_x = (state.tuning.screen.width - tuning.width).max(0.0);
    let (min_gap, max_gap) = (tuning.min_gap, tuning.max_gap.max(tuning.min_gap));
    let (min_speed, max_speed) = (
        tuning.moving_speed_min,
        tuning.moving_speed_max.max(tuning.moving_speed_min),
    );
    let weights = tuning.weights;

    let base_y = highest_platform_y(state);
    let x = state.rng.random_range(0.0..=max_x);
    let y = base_y - state.rng.random_range(min_gap..=max_gap);

    let kind = match choose_tag(&mut state.rng, &weights) {
        PlatformTag::Static => PlatformKind::Static,
        PlatformTag::Moving => PlatformKind::Moving {
            speed: state.rng.random_range(min_speed..=max_speed),
            direction: if state.rng.random_bool(0.5) { 1.0 } else { -1.0 },
        },
        PlatformTag::Breakable => PlatformKind::Breakable { broken: false },
    };

    let id = state.next_entity_id();
    let platform = Platform::new(id, Vec2::new(x, y), size, kind);
    log::debug!("Spawned {:?} platform {} at ({:.0}, {:.0})", kind, id, x, y);

    if kind == PlatformKind::Static {
        maybe_spawn_monster(state, &platform);
    }
    state.platforms.push(platform);
    true
}

fn maybe_spawn_monster(state: &mut GameState, host: &Platform) {
    let chance = state.tuning.monster.spawn_chance.clamp(0.0, 1.0);
    if !state.rng.random_bool(chance) {
        return;
    }
    let kind = MonsterKind::ALL[state.rng.random_range(0..MonsterKind::ALL.len())];
    let size = Vec2::new(state.tuning.monster.width, state.tuning.monster.height);
    let id = state.next_entity_id();
    log::debug!("Spawned {:?} monster {} on platform {}", kind, id, host.id);
    state.monsters.push(Monster::on_platform(id, host, size, kind));
}

/// Spawn until the platform cap is reached (session start)
pub fn fill(state: &mut GameState) {
    while spawn_platform(state) {}
}

/// Drop everything whose top edge is below the screen.
///
/// Monsters follow the same rule as platforms, so a monster never outlives
/// its host by more than the frames it takes to sink below the edge. Balls
/// are dropped once fully outside the screen on any side.
pub fn prune(state: &mut GameState) -> usize {
    let bottom = state.tuning.screen.height;
    let width = state.tuning.screen.width;
    let before = state.platforms.len() + state.monsters.len() + state.balls.len();

    state.platforms.retain(|p| p.pos.y <= bottom);
    state.monsters.retain(|m| m.pos.y <= bottom);
    state.balls.retain(|b| {
        let r = b.rect();
        r.bottom() >= 0.0 && r.top() <= bottom && r.right() >= 0.0 && r.left() <= width
    });

    let removed = before - (state.platforms.len() + state.monsters.len() + state.balls.len());
    if removed > 0 {
        log::debug!("Pruned {} off-screen entities", removed);
    }
    removed
}
