//! Draw pass
//!
//! The core does not rasterize anything. Each frame it produces a list of
//! [`DrawCommand`]s, back to front, and the host blits the matching sprites.

pub mod draw;

pub use draw::{DrawCommand, PlatformLook, Sprite, draw_session};
