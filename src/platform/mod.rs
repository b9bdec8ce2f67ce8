//! Platform abstraction layer
//!
//! Handles the host-facing edges of the core:
//! - Input actions (already decoded from raw events)
//! - Monotonic time and frame pacing

pub mod input;
pub mod time;

pub use input::Action;
pub use time::{Clock, FramePacer, ManualClock, SystemClock};
