//! Input actions consumed by the game state machine

use glam::Vec2;

/// A decoded input action.
///
/// Raw event polling belongs to the host; it translates keys and clicks
/// into these before handing them to [`crate::game::Game::handle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Left key pressed (`true`) or released (`false`)
    MoveLeft(bool),
    /// Right key pressed (`true`) or released (`false`)
    MoveRight(bool),
    /// Pause key: pauses a running game, resumes a paused one
    TogglePause,
    /// Fire a ball toward a screen point
    Shoot(Vec2),
    Start,
    Quit,
    Retry,
    Restart,
    Unpause,
    /// Mouse click in screen space, resolved against the active buttons
    Click(Vec2),
}
