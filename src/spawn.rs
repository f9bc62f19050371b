//! Timed enemy and item spawning.
//!
//! The two spawners run on their own intervals, independent of the frame
//! rate.  Timers are plain values driven by the session clock; whoever owns
//! them (the session) drops and recreates them on restart.

use std::time::Duration;

use rand::Rng;

use crate::compute::{new_enemy, new_item, ITEM_SIZE};
use crate::entities::{EnemyVariant, GameState, GameStatus};

pub const ENEMY_SPAWN_INTERVAL: Duration = Duration::from_millis(1000);
pub const ITEM_SPAWN_INTERVAL: Duration = Duration::from_millis(10_000);

pub const SPECIAL_ENEMY_CHANCE: f64 = 0.3;
/// Enemies spawn across `[0, width - ENEMY_SPAWN_MARGIN)` whatever their size.
pub const ENEMY_SPAWN_MARGIN: f32 = 50.0;

// ── Timers ────────────────────────────────────────────────────────────────────

/// A repeating deadline.  First fires one full period after creation.
#[derive(Clone, Debug)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Duration,
}

impl IntervalTimer {
    pub fn new(period: Duration, now: Duration) -> Self {
        IntervalTimer {
            period,
            next_due: now + period,
        }
    }

    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    /// Returns `true` at most once per call when the deadline has passed.
    /// Periods missed during a stall are dropped, not replayed.
    pub fn poll(&mut self, now: Duration) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        true
    }
}

/// Which spawners fired on a given poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnTick {
    pub enemy: bool,
    pub item: bool,
}

/// The enemy and item timers of one round.
#[derive(Clone, Debug)]
pub struct Spawners {
    enemy: IntervalTimer,
    item: IntervalTimer,
}

impl Spawners {
    pub fn new(now: Duration) -> Self {
        Spawners {
            enemy: IntervalTimer::new(ENEMY_SPAWN_INTERVAL, now),
            item: IntervalTimer::new(ITEM_SPAWN_INTERVAL, now),
        }
    }

    pub fn poll(&mut self, now: Duration) -> SpawnTick {
        SpawnTick {
            enemy: self.enemy.poll(now),
            item: self.item.poll(now),
        }
    }
}

// ── Spawning (pure apart from the RNG) ───────────────────────────────────────

/// Uniform x in `[0, span)`, or 0 when the canvas is too narrow.
fn random_x(rng: &mut impl Rng, span: f32) -> f32 {
    if span > 0.0 {
        rng.gen_range(0.0..span)
    } else {
        0.0
    }
}

/// 30% of enemies are one of the five specials, chosen uniformly.
pub fn pick_enemy_variant(rng: &mut impl Rng) -> EnemyVariant {
    if rng.gen_bool(SPECIAL_ENEMY_CHANCE) {
        EnemyVariant::SPECIALS[rng.gen_range(0..EnemyVariant::SPECIALS.len())]
    } else {
        EnemyVariant::Default
    }
}

/// Append a new enemy at the top edge.  No-op once the round is over.
pub fn spawn_enemy(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let x = random_x(rng, state.width - ENEMY_SPAWN_MARGIN);
    let variant = pick_enemy_variant(rng);
    let mut enemies = state.enemies.clone();
    enemies.push(new_enemy(x, variant));
    GameState {
        enemies,
        ..state.clone()
    }
}

/// Append a new bonus item at the top edge.  No-op once the round is over.
pub fn spawn_item(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let x = random_x(rng, state.width - ITEM_SIZE);
    let mut items = state.items.clone();
    items.push(new_item(x));
    GameState {
        items,
        ..state.clone()
    }
}
