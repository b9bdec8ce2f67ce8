//! Game state machine
//!
//! One [`Screen`] is active at a time. Screens own their data: the running
//! session lives inside `MainGame`, moves into `Pause` as-is, and only the
//! final score survives into `GameOver`. Transitions hand a new screen value
//! back to [`Game`], which owns it.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{AudioManager, AudioSink, SoundEffect};
use crate::highscores::{HighScoreStore, HighScores};
use crate::platform::Action;
use crate::renderer::{DrawCommand, draw_session};
use crate::sim::{DeathCause, GameState, Rect, TickInput, TickOutcome, tick};
use crate::tuning::Tuning;

/// Button layout
const BUTTON_SIZE: Vec2 = Vec2::new(160.0, 40.0);
const BUTTON_SPACING: f32 = 56.0;

/// Clickable menu affordances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Start,
    Resume,
    Restart,
    Retry,
    Quit,
}

impl ButtonKind {
    pub fn action(self) -> Action {
        match self {
            ButtonKind::Start => Action::Start,
            ButtonKind::Resume => Action::Unpause,
            ButtonKind::Restart => Action::Restart,
            ButtonKind::Retry => Action::Retry,
            ButtonKind::Quit => Action::Quit,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ButtonKind::Start => "Start",
            ButtonKind::Resume => "Resume",
            ButtonKind::Restart => "Restart",
            ButtonKind::Retry => "Retry",
            ButtonKind::Quit => "Quit",
        }
    }
}

/// A button as published by one screen instance.
///
/// `epoch` identifies that instance; a press carrying an older epoch is
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub kind: ButtonKind,
    pub rect: Rect,
    pub epoch: u64,
}

/// The active screen and the data it owns
#[derive(Debug)]
pub enum Screen {
    Start,
    MainGame(Box<GameState>),
    Pause {
        session: Box<GameState>,
        best: f32,
    },
    GameOver {
        score: f32,
        best: f32,
        cause: DeathCause,
    },
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Start => "start",
            Screen::MainGame(_) => "main game",
            Screen::Pause { .. } => "pause",
            Screen::GameOver { .. } => "game over",
        }
    }

    pub fn button_kinds(&self) -> &'static [ButtonKind] {
        match self {
            Screen::Start => &[ButtonKind::Start, ButtonKind::Quit],
            Screen::MainGame(_) => &[],
            Screen::Pause { .. } => &[ButtonKind::Resume, ButtonKind::Restart, ButtonKind::Quit],
            Screen::GameOver { .. } => &[ButtonKind::Retry, ButtonKind::Quit],
        }
    }
}

/// Result of dispatching an action
enum Flow {
    /// Same screen instance
    Stay(Screen),
    /// New screen instance; invalidates published buttons
    Go(Screen),
    Quit,
}

/// Owns the active screen and the services screens share
pub struct Game<S: AudioSink> {
    screen: Option<Screen>,
    epoch: u64,
    tuning: Tuning,
    store: HighScoreStore,
    board: HighScores,
    audio: AudioManager<S>,
    seeds: Pcg32,
    input: TickInput,
    save_warning: Option<String>,
}

impl<S: AudioSink> Game<S> {
    pub fn new(tuning: Tuning, store: HighScoreStore, sink: S, seed: u64) -> Self {
        let board = store.load();
        Self {
            screen: Some(Screen::Start),
            epoch: 0,
            tuning,
            store,
            board,
            audio: AudioManager::new(sink),
            seeds: Pcg32::seed_from_u64(seed),
            input: TickInput::default(),
            save_warning: None,
        }
    }

    /// False once a quit action has been handled
    pub fn is_running(&self) -> bool {
        self.screen.is_some()
    }

    pub fn screen(&self) -> Option<&Screen> {
        self.screen.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn highscores(&self) -> &HighScores {
        &self.board
    }

    pub fn audio(&self) -> &AudioManager<S> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager<S> {
        &mut self.audio
    }

    /// The current run, whether playing or paused
    pub fn session(&self) -> Option<&GameState> {
        match self.screen.as_ref()? {
            Screen::MainGame(session) | Screen::Pause { session, .. } => Some(&**session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut GameState> {
        match self.screen.as_mut()? {
            Screen::MainGame(session) | Screen::Pause { session, .. } => Some(&mut **session),
            _ => None,
        }
    }

    /// Last highscore write failure, if any, cleared on read
    pub fn take_save_warning(&mut self) -> Option<String> {
        self.save_warning.take()
    }

    /// Buttons of the active screen, stamped with the current epoch
    pub fn buttons(&self) -> Vec<Button> {
        let Some(screen) = &self.screen else {
            return Vec::new();
        };
        let kinds = screen.button_kinds();
        let x = (self.tuning.screen.width - BUTTON_SIZE.x) / 2.0;
        let y0 = self.tuning.screen.height / 2.0;
        kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| Button {
                kind,
                rect: Rect::new(Vec2::new(x, y0 + i as f32 * BUTTON_SPACING), BUTTON_SIZE),
                epoch: self.epoch,
            })
            .collect()
    }

    /// Fire a previously published button. Returns false when stale.
    pub fn press(&mut self, button: Button) -> bool {
        if !self.is_running() || button.epoch != self.epoch {
            log::debug!(
                "Ignoring stale {:?} button (epoch {} != {})",
                button.kind,
                button.epoch,
                self.epoch
            );
            return false;
        }
        self.audio.play(SoundEffect::Click);
        self.handle(button.kind.action());
        true
    }

    /// Dispatch one input action to the active screen
    pub fn handle(&mut self, action: Action) {
        match action {
            Action::MoveLeft(held) => {
                self.input.left = held;
                return;
            }
            Action::MoveRight(held) => {
                self.input.right = held;
                return;
            }
            Action::Click(point) => {
                if let Some(button) = self.buttons().into_iter().find(|b| b.rect.contains(point)) {
                    self.press(button);
                }
                return;
            }
            _ => {}
        }

        let Some(screen) = self.screen.take() else {
            return;
        };
        let flow = self.dispatch(screen, action);
        self.apply(flow);
    }

    fn dispatch(&mut self, screen: Screen, action: Action) -> Flow {
        match (screen, action) {
            (Screen::Start, Action::Start) => Flow::Go(self.new_session()),
            (Screen::Start, Action::Quit) => Flow::Quit,

            (Screen::MainGame(session), Action::TogglePause) => {
                self.input.shoot = None;
                let best = self.submit(session.score);
                Flow::Go(Screen::Pause { session, best })
            }
            (Screen::MainGame(session), Action::Shoot(target)) => {
                self.input.shoot = Some(target);
                Flow::Stay(Screen::MainGame(session))
            }

            (Screen::Pause { session, .. }, Action::Unpause | Action::TogglePause) => {
                Flow::Go(Screen::MainGame(session))
            }
            (Screen::Pause { .. }, Action::Restart) => Flow::Go(self.new_session()),
            (Screen::Pause { .. }, Action::Quit) => Flow::Quit,

            (Screen::GameOver { .. }, Action::Retry) => Flow::Go(self.new_session()),
            (Screen::GameOver { .. }, Action::Quit) => Flow::Quit,

            (screen, action) => {
                log::trace!("{:?} ignored on {} screen", action, screen.name());
                Flow::Stay(screen)
            }
        }
    }

    fn apply(&mut self, flow: Flow) {
        match flow {
            Flow::Stay(screen) => self.screen = Some(screen),
            Flow::Go(screen) => {
                self.epoch += 1;
                log::info!("Entering {} screen", screen.name());
                self.screen = Some(screen);
            }
            Flow::Quit => {
                self.epoch += 1;
                log::info!("Quit");
                self.screen = None;
            }
        }
    }

    fn new_session(&mut self) -> Screen {
        self.input = TickInput::default();
        let seed = self.seeds.next_u64();
        Screen::MainGame(Box::new(GameState::new(seed, self.tuning.clone())))
    }

    /// Record a score and persist the board; returns the best score.
    ///
    /// A failed write keeps the in-memory board and leaves a warning.
    fn submit(&mut self, score: f32) -> f32 {
        let (board, saved) = self.store.submit(score);
        self.board = board;
        if let Err(e) = saved {
            log::warn!("Could not save high scores to {}: {}", self.store.path().display(), e);
            self.save_warning = Some(e.to_string());
        }
        self.board.best()
    }

    /// Advance the active screen by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let Some(Screen::MainGame(session)) = self.screen.as_mut() else {
            return;
        };

        let outcome = tick(session, &self.input, dt);
        self.input.shoot = None;
        let events = session.drain_events();
        self.audio.play_events(&events);

        if let TickOutcome::GameOver { cause, score } = outcome {
            let best = self.submit(score);
            self.apply(Flow::Go(Screen::GameOver { score, best, cause }));
        }
    }

    /// Draw pass for the active screen, back to front
    pub fn draw(&self) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        match &self.screen {
            None => return out,
            Some(Screen::Start) => {
                out.push(DrawCommand::Title("Sky Hop"));
                out.push(DrawCommand::Best(self.board.best()));
            }
            Some(Screen::MainGame(session)) => draw_session(session, &mut out),
            Some(Screen::Pause { session, best }) => {
                draw_session(session, &mut out);
                out.push(DrawCommand::Title("Paused"));
                out.push(DrawCommand::Best(*best));
            }
            Some(Screen::GameOver { score, best, .. }) => {
                out.push(DrawCommand::Title("Game Over"));
                out.push(DrawCommand::Score(*score));
                out.push(DrawCommand::Best(*best));
            }
        }
        out.extend(self.buttons().into_iter().map(DrawCommand::Button));
        out
    }
}
