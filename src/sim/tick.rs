//! Per-frame simulation step
//!
//! Order within a tick: generation, entity physics, collisions, viewport
//! scroll, game-over checks, score.

use std::time::Duration;

use glam::Vec2;

use super::collision::masks_collide;
use super::entities::Ball;
use super::generate;
use super::state::{DeathCause, GameEvent, GameState};

/// Input held or issued during a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Move-left key held
    pub left: bool,
    /// Move-right key held
    pub right: bool,
    /// Fire a ball toward this screen point
    pub shoot: Option<Vec2>,
}

impl TickInput {
    /// -1, 0 or 1
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// What the tick decided about the run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Running,
    GameOver { cause: DeathCause, score: f32 },
}

/// Advance the run by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickOutcome {
    state.time_ticks += 1;
    state.clock += Duration::from_secs_f32(dt.max(0.0));
    let screen_width = state.tuning.screen.width;

    generate::prune(state);
    generate::spawn_platform(state);

    // Movement
    state.jumper.steer(input.direction());
    state.jumper.move_horizontal(dt, screen_width);
    for platform in &mut state.platforms {
        platform.update(dt, screen_width);
    }
    state.jumper.step_jump(
        state.clock,
        dt,
        &state.tuning.jumper,
        &mut state.platforms,
        &state.masks,
        &mut state.events,
    );

    // Projectiles
    if let Some(target) = input.shoot {
        fire_ball(state, target);
    }
    for ball in &mut state.balls {
        ball.advance(dt);
    }
    resolve_ball_hits(state);

    scroll_viewport(state, dt);

    if let Some(cause) = check_death(state) {
        log::info!("Run over ({:?}) with score {:.1}", cause, state.score);
        state.events.push(GameEvent::Died(cause));
        return TickOutcome::GameOver {
            cause,
            score: state.score,
        };
    }

    update_score(state);
    TickOutcome::Running
}

fn fire_ball(state: &mut GameState, target: Vec2) {
    let id = state.next_entity_id();
    let origin = state.jumper.rect().center();
    let ball = Ball::launch(
        id,
        origin,
        target,
        state.tuning.ball.speed,
        state.tuning.ball.radius,
    );
    state.balls.push(ball);
    state.events.push(GameEvent::BallFired { id });
}

/// Remove every monster a ball touches, along with the ball
fn resolve_ball_hits(state: &mut GameState) {
    let masks = &state.masks;
    let mut spent = Vec::new();
    let mut killed = Vec::new();

    for ball in &state.balls {
        let hit = state.monsters.iter().find(|m| {
            !killed.contains(&m.id) && masks_collide(ball.pos, &masks.ball, m.pos, &masks.monster)
        });
        if let Some(monster) = hit {
            spent.push(ball.id);
            killed.push(monster.id);
        }
    }

    if killed.is_empty() {
        return;
    }
    state.balls.retain(|b| !spent.contains(&b.id));
    state.monsters.retain(|m| !killed.contains(&m.id));
    for id in killed {
        log::debug!("Monster {} shot down", id);
        state.events.push(GameEvent::MonsterKilled { id });
    }
}

/// Pull the world down while the jumper is above the scroll line
pub fn scroll_viewport(state: &mut GameState, dt: f32) -> f32 {
    if state.jumper.rect().top() >= state.tuning.viewport.scroll_threshold {
        return 0.0;
    }
    let dy = state.tuning.viewport.scroll_speed * dt;
    state.shift_all(dy);
    state.viewport_offset += dy;
    dy
}

fn check_death(state: &GameState) -> Option<DeathCause> {
    let masks = &state.masks;
    let touched = state
        .monsters
        .iter()
        .any(|m| masks_collide(state.jumper.pos, &masks.jumper, m.pos, &masks.monster));
    if touched {
        return Some(DeathCause::Monster);
    }
    if state.jumper.rect().top() > state.tuning.screen.height {
        return Some(DeathCause::Fell);
    }
    None
}

/// Running max of the per-frame score
pub fn update_score(state: &mut GameState) -> f32 {
    state.score = state.score.max(state.altitude_score());
    state.score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Monster, MonsterKind, PlatformKind};
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 60.0;

    fn quiet_tuning() -> Tuning {
        let mut tuning = Tuning::default();
        tuning.monster.spawn_chance = 0.0;
        tuning
    }

    #[test]
    fn direction_from_held_keys() {
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(both.direction(), 0.0);
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        assert_eq!(left.direction(), -1.0);
    }

    #[test]
    fn first_ticks_bounce_off_start_platform() {
        let mut state = GameState::new(1, quiet_tuning());
        let mut bounced = false;
        for _ in 0..30 {
            assert_eq!(tick(&mut state, &TickInput::default(), DT), TickOutcome::Running);
            if state.drain_events().contains(&GameEvent::Jumped) {
                bounced = true;
                break;
            }
        }
        assert!(bounced);
        assert!(state.jumper.jumping);
    }

    #[test]
    fn scroll_moves_world_and_accumulates_offset() {
        let mut state = GameState::new(2, quiet_tuning());
        state.jumper.pos.y = -10.0;
        let platform_y = state.platforms[0].pos.y;

        let dy = scroll_viewport(&mut state, 0.1);
        assert!((dy - 30.0).abs() < 1e-4);
        assert!((state.jumper.pos.y - 20.0).abs() < 1e-4);
        assert!((state.platforms[0].pos.y - platform_y - 30.0).abs() < 1e-4);
        assert!((state.viewport_offset - 30.0).abs() < 1e-4);

        // Below the line: no scroll
        assert_eq!(scroll_viewport(&mut state, 0.1), 0.0);
    }

    #[test]
    fn score_never_decreases() {
        let mut state = GameState::new(3, quiet_tuning());
        state.jumper.pos.y = 500.0;
        let high = update_score(&mut state);
        assert!((high - 54.0).abs() < 1e-4);
        state.jumper.pos.y = 100.0;
        assert_eq!(update_score(&mut state), high);
    }

    #[test]
    fn falling_off_screen_ends_run_with_last_score() {
        let mut state = GameState::new(4, quiet_tuning());
        state.platforms.clear();
        state.score = 42.5;
        state.jumper.jumping = false;
        state.jumper.pos.y = state.tuning.screen.height + 1.0;
        // Nothing to land on; spawn gate refills above, far from the jumper
        let outcome = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(
            outcome,
            TickOutcome::GameOver {
                cause: DeathCause::Fell,
                score: 42.5
            }
        );
        assert!(state.events.contains(&GameEvent::Died(DeathCause::Fell)));
    }

    #[test]
    fn touching_a_monster_ends_run() {
        let mut state = GameState::new(5, quiet_tuning());
        let host = state.platforms[0].clone();
        let id = state.next_entity_id();
        let mut monster = Monster::on_platform(id, &host, glam::Vec2::splat(36.0), MonsterKind::Purple);
        monster.pos = state.jumper.pos + glam::Vec2::splat(4.0);
        state.monsters.push(monster);

        let outcome = tick(&mut state, &TickInput::default(), DT);
        assert!(matches!(
            outcome,
            TickOutcome::GameOver {
                cause: DeathCause::Monster,
                ..
            }
        ));
    }

    #[test]
    fn ball_and_monster_both_removed_on_hit() {
        let mut state = GameState::new(6, quiet_tuning());
        let host = state.platforms[3].clone();
        let id = state.next_entity_id();
        let monster = Monster::on_platform(id, &host, glam::Vec2::splat(36.0), MonsterKind::Blue);
        let target = monster.rect().center();
        state.monsters.push(monster);

        // Fire straight at it from just next to it
        let ball_id = state.next_entity_id();
        let mut ball = Ball::launch(ball_id, target - glam::Vec2::new(0.0, 2.0), target, 10.0, 5.0);
        ball.speed = 0.0;
        state.balls.push(ball);

        resolve_ball_hits(&mut state);
        assert!(state.monsters.iter().all(|m| m.id != id));
        assert!(state.balls.is_empty());
        assert_eq!(state.events, vec![GameEvent::MonsterKilled { id }]);
    }

    #[test]
    fn shooting_spawns_a_ball_heading_at_target() {
        let mut state = GameState::new(7, quiet_tuning());
        let origin = state.jumper.rect().center();
        let input = TickInput {
            shoot: Some(origin + glam::Vec2::new(0.0, -100.0)),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].heading, glam::Vec2::NEG_Y);
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::BallFired { .. })));
    }

    #[test]
    fn breakable_platform_is_one_shot_through_ticks() {
        let mut state = GameState::new(9, quiet_tuning());
        state.platforms[0].kind = PlatformKind::Breakable { broken: false };

        let mut bounces = 0;
        for _ in 0..400 {
            if let TickOutcome::GameOver { .. } = tick(&mut state, &TickInput::default(), DT) {
                break;
            }
            bounces += state
                .drain_events()
                .iter()
                .filter(|e| **e == GameEvent::PlatformBroke { id: 1 })
                .count();
        }
        assert_eq!(bounces, 1);
        if let Some(p) = state.platforms.iter().find(|p| p.id == 1) {
            assert!(!p.bouncable);
        }
    }

    #[test]
    fn clock_advances_by_dt() {
        let mut state = GameState::new(10, quiet_tuning());
        tick(&mut state, &TickInput::default(), 0.5);
        tick(&mut state, &TickInput::default(), 0.25);
        assert_eq!(state.clock, Duration::from_millis(750));
        assert_eq!(state.time_ticks, 2);
    }
}
