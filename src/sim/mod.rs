//! Simulation module
//!
//! All gameplay logic lives here:
//! - Delta-time updates only, no wall-clock reads
//! - Seeded RNG only
//! - No rendering, audio or input dependencies

pub mod collision;
pub mod entities;
pub mod generate;
pub mod mask;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Rect, colliding_indices, masks_collide};
pub use entities::{Ball, Jumper, Monster, MonsterKind, Platform, PlatformKind};
pub use mask::Mask;
pub use state::{DeathCause, GameEvent, GameState, MaskSet, Snapshot};
pub use tick::{TickInput, TickOutcome, tick};
pub use timer::Timer;
