//! The controller that owns one play session: game state, spawn timers,
//! held keys and the RNG.  It is the only thing that mutates them.

use std::time::Duration;

use rand::Rng;

use crate::compute::{init_state, step};
use crate::entities::{GameState, GameStatus};
use crate::input::{HeldKeys, Key};
use crate::spawn::{spawn_enemy, spawn_item, Spawners};

pub struct Session<R: Rng> {
    state: GameState,
    spawners: Spawners,
    keys: HeldKeys,
    rng: R,
}

impl<R: Rng> Session<R> {
    /// Start a round on a `width × height` canvas.  `now` is the session
    /// clock, usually `Instant::elapsed` of the program start.
    pub fn new(width: f32, height: f32, reports_release: bool, rng: R, now: Duration) -> Self {
        log::info!("session started on a {}x{} canvas", width, height);
        Session {
            state: init_state(width, height),
            spawners: Spawners::new(now),
            keys: HeldKeys::new(reports_release),
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.status == GameStatus::GameOver
    }

    /// A key press.  Fire after game over restarts the round, but only when
    /// Space was not already held: classic terminals report auto-repeat as
    /// presses, and a Space held through the fatal frame must not restart.
    pub fn key_down(&mut self, key: Key, now: Duration) {
        if key == Key::Fire && self.is_game_over() && !self.keys.is_held(Key::Fire, now) {
            self.restart(now);
            return;
        }
        self.keys.press(key, now);
    }

    /// An auto-repeat of a key already down; keeps it held but never restarts.
    pub fn key_repeat(&mut self, key: Key, now: Duration) {
        self.keys.press(key, now);
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.release(key);
    }

    /// Throw the round away: new player, empty field, score 0, fresh timers.
    /// Held keys are cleared so the restarting press does not also shoot.
    pub fn restart(&mut self, now: Duration) {
        log::info!("restarting (previous score {})", self.state.score);
        self.state = init_state(self.state.width, self.state.height);
        self.spawners = Spawners::new(now);
        self.keys.clear();
    }

    /// Run everything due at `now`: the spawn timers, then one frame.
    pub fn advance(&mut self, now: Duration) {
        let due = self.spawners.poll(now);
        if self.is_game_over() {
            return;
        }
        if due.enemy {
            self.state = spawn_enemy(&self.state, &mut self.rng);
            log::debug!("enemy spawned ({} live)", self.state.enemies.len());
        }
        if due.item {
            self.state = spawn_item(&self.state, &mut self.rng);
            log::debug!("item spawned ({} live)", self.state.items.len());
        }

        let input = self.keys.frame_input(now);
        let last_shot = self.state.last_shot;
        self.state = step(&self.state, input, now, &mut self.rng);
        if self.state.last_shot != last_shot {
            log::debug!("shot fired ({} in flight)", self.state.projectiles.len());
        }

        if let Some(cause) = self.state.game_over_cause {
            log::info!(
                "game over after {} frames: {:?}, score {}",
                self.state.frame,
                cause,
                self.state.score
            );
        }
    }
}
