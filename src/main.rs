//! Sky Hop entry point
//!
//! Native builds have no window yet; this runs a headless attract mode that
//! plays one run with a simple autopilot at the configured frame rate.

use std::time::{SystemTime, UNIX_EPOCH};

use sky_hop::audio::LogAudio;
use sky_hop::platform::{Action, Clock, FramePacer, SystemClock};
use sky_hop::sim::GameState;
use sky_hop::{Game, HighScoreStore, Screen, Tuning, TuningStore};

/// Stop the demo after this many frames even if still alive
const MAX_FRAMES: u64 = 60 * 120;

fn main() {
    env_logger::init();
    log::info!("Sky Hop (headless) starting...");

    let dir = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let tuning = match TuningStore::in_dir(&dir).load() {
        Ok(tuning) => tuning,
        Err(e) => {
            log::warn!("Bad config, using defaults: {}", e);
            Tuning::default()
        }
    };

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
    log::info!("Seed {}", seed);

    let store = HighScoreStore::new(&tuning.highscores.file, tuning.highscores.max_entries);
    let fps = tuning.screen.fps;
    let mut game = Game::new(tuning, store, LogAudio, seed);
    game.handle(Action::Start);

    let clock = SystemClock::new();
    let mut pacer = FramePacer::new(fps, clock.now());
    let mut pilot = Autopilot::default();
    let mut frames = 0;

    while game.is_running() && frames < MAX_FRAMES {
        if let Some(session) = game.session() {
            for action in pilot.steer(session) {
                game.handle(action);
            }
        }

        let dt = pacer.wait(&clock);
        game.update(dt);
        let _frame = game.draw();
        frames += 1;

        if let Some(Screen::GameOver { score, best, cause }) = game.screen() {
            println!("Game over ({:?}) after {} frames: score {:.0}, best {:.0}", cause, frames, score, best);
            game.handle(Action::Quit);
        }
        if let Some(warning) = game.take_save_warning() {
            eprintln!("warning: high scores not saved: {}", warning);
        }
    }

    if let Some(session) = game.session() {
        println!("Demo ended still climbing: score {:.0}", session.score);
    }
}

/// Steers toward the platform the jumper should land on next and shoots
/// monsters above it.
#[derive(Default)]
struct Autopilot {
    direction: i8,
    cooldown: u32,
}

impl Autopilot {
    fn steer(&mut self, session: &GameState) -> Vec<Action> {
        let mut actions = Vec::new();
        let jumper = session.jumper.rect();
        let feet = jumper.bottom();

        let target = session
            .platforms
            .iter()
            .filter(|p| p.bouncable && p.pos.y >= feet - 1.0)
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        let want: i8 = match target {
            Some(p) => {
                let dx = p.rect().center().x - jumper.center().x;
                if dx.abs() < 6.0 {
                    0
                } else if dx > 0.0 {
                    1
                } else {
                    -1
                }
            }
            None => 0,
        };

        if want != self.direction {
            match self.direction {
                -1 => actions.push(Action::MoveLeft(false)),
                1 => actions.push(Action::MoveRight(false)),
                _ => {}
            }
            match want {
                -1 => actions.push(Action::MoveLeft(true)),
                1 => actions.push(Action::MoveRight(true)),
                _ => {}
            }
            self.direction = want;
        }

        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown == 0 {
            let threat = session
                .monsters
                .iter()
                .filter(|m| m.pos.y < jumper.top() && m.pos.y > 0.0)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
            if let Some(monster) = threat {
                actions.push(Action::Shoot(monster.rect().center()));
                self.cooldown = 20;
            }
        }

        actions
    }
}
