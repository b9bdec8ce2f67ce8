//! Draw commands for sessions and menus

use glam::Vec2;

use crate::game::Button;
use crate::sim::{GameState, MonsterKind, Platform, PlatformKind};

/// Platform sprite variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformLook {
    Green,
    Blue,
    Brown,
    /// Brown after its one bounce
    BrownBroken,
}

impl PlatformLook {
    pub fn of(platform: &Platform) -> Self {
        match platform.kind {
            PlatformKind::Static => PlatformLook::Green,
            PlatformKind::Moving { .. } => PlatformLook::Blue,
            PlatformKind::Breakable { broken: false } => PlatformLook::Brown,
            PlatformKind::Breakable { broken: true } => PlatformLook::BrownBroken,
        }
    }
}

/// Which sprite to draw, with its visual state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sprite {
    Jumper { facing_left: bool, ascending: bool },
    Platform(PlatformLook),
    Monster(MonsterKind),
    Ball,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Sprite with its top-left corner at `pos`
    Entity { sprite: Sprite, pos: Vec2 },
    /// Running score (HUD)
    Score(f32),
    /// Best recorded score
    Best(f32),
    Title(&'static str),
    Button(Button),
}

/// Append the world of `state`: platforms, monsters, balls, then the jumper
pub fn draw_session(state: &GameState, out: &mut Vec<DrawCommand>) {
    for platform in &state.platforms {
        out.push(DrawCommand::Entity {
            sprite: Sprite::Platform(PlatformLook::of(platform)),
            pos: platform.pos,
        });
    }
    for monster in &state.monsters {
        out.push(DrawCommand::Entity {
            sprite: Sprite::Monster(monster.kind),
            pos: monster.pos,
        });
    }
    for ball in &state.balls {
        out.push(DrawCommand::Entity {
            sprite: Sprite::Ball,
            pos: ball.pos,
        });
    }
    out.push(DrawCommand::Entity {
        sprite: Sprite::Jumper {
            facing_left: state.jumper.facing < 0.0,
            ascending: state.jumper.jumping,
        },
        pos: state.jumper.pos,
    });
    out.push(DrawCommand::Score(state.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn jumper_is_drawn_last_among_entities() {
        let state = GameState::new(1, Tuning::default());
        let mut out = Vec::new();
        draw_session(&state, &mut out);
        let last_entity = out
            .iter()
            .rev()
            .find(|c| matches!(c, DrawCommand::Entity { .. }))
            .unwrap();
        assert!(matches!(
            last_entity,
            DrawCommand::Entity {
                sprite: Sprite::Jumper { .. },
                ..
            }
        ));
        assert_eq!(out.last(), Some(&DrawCommand::Score(0.0)));
    }

    #[test]
    fn broken_platform_swaps_look() {
        let mut p = Platform::new(
            1,
            Vec2::ZERO,
            Vec2::new(60.0, 12.0),
            PlatformKind::Breakable { broken: false },
        );
        assert_eq!(PlatformLook::of(&p), PlatformLook::Brown);
        p.bounce();
        assert_eq!(PlatformLook::of(&p), PlatformLook::BrownBroken);
    }

    #[test]
    fn one_command_per_platform() {
        let state = GameState::new(2, Tuning::default());
        let mut out = Vec::new();
        draw_session(&state, &mut out);
        let platforms = out
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCommand::Entity {
                        sprite: Sprite::Platform(_),
                        ..
                    }
                )
            })
            .count();
        assert_eq!(platforms, state.platforms.len());
    }
}
