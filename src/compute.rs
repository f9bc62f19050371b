//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle and the session clock) and
//! returns a brand-new `GameState`.  Side effects are limited to the
//! injected RNG.

use std::time::Duration;

use rand::Rng;

use crate::entities::{
    EnemyVariant, GameOverCause, GameState, GameStatus, Player, Sprite, SpriteKind, Tint,
};
use crate::geometry::detect_collision;
use crate::input::FrameInput;

// ── Tuning ───────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 50.0;
pub const PLAYER_SPEED: f32 = 8.0;
/// Gap between the player's bottom edge and the canvas bottom.
pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

/// Minimum time between two shots while fire is held.
pub const FIRE_INTERVAL: Duration = Duration::from_millis(200);
pub const SPECIAL_SHOT_CHANCE: f64 = 0.1;

pub const ENEMY_KILL_SCORE: u32 = 10;
pub const ITEM_SCORE: u32 = 50;

pub const ITEM_SIZE: f32 = 30.0;
pub const ITEM_SPEED: f32 = 2.0;

// ── Stat tables ──────────────────────────────────────────────────────────────

/// (width, height, speed, tint) of a projectile.
fn projectile_stats(special: bool) -> (f32, f32, f32, Tint) {
    if special {
        (20.0, 60.0, 20.0, Tint::Yellow)
    } else {
        (10.0, 40.0, 15.0, Tint::Red)
    }
}

/// (size, speed, tint) of an enemy variant.  Every enemy is square.
pub fn enemy_stats(variant: EnemyVariant) -> (f32, f32, Tint) {
    match variant {
        EnemyVariant::Default => (50.0, 2.0, Tint::Green),
        EnemyVariant::Purple => (70.0, 1.0, Tint::Purple),
        EnemyVariant::Orange => (40.0, 4.0, Tint::Orange),
        EnemyVariant::Blue => (50.0, 3.0, Tint::Blue),
        EnemyVariant::Red => (100.0, 0.5, Tint::Red),
        EnemyVariant::Cyan => (60.0, 2.5, Tint::Cyan),
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn new_projectile(x: f32, y: f32, special: bool) -> Sprite {
    let (width, height, speed, tint) = projectile_stats(special);
    Sprite { kind: SpriteKind::Projectile, x, y, width, height, speed, tint }
}

/// A freshly spawned enemy always starts at the top edge.
pub fn new_enemy(x: f32, variant: EnemyVariant) -> Sprite {
    let (size, speed, tint) = enemy_stats(variant);
    Sprite {
        kind: SpriteKind::Enemy,
        x,
        y: 0.0,
        width: size,
        height: size,
        speed,
        tint,
    }
}

pub fn new_item(x: f32) -> Sprite {
    Sprite {
        kind: SpriteKind::Item,
        x,
        y: 0.0,
        width: ITEM_SIZE,
        height: ITEM_SIZE,
        speed: ITEM_SPEED,
        tint: Tint::Gold,
    }
}

/// Player centred horizontally, resting just above the bottom edge.
pub fn new_player(width: f32, height: f32) -> Player {
    Player {
        x: width / 2.0 - PLAYER_SIZE / 2.0,
        y: height - PLAYER_SIZE - PLAYER_BOTTOM_MARGIN,
        width: PLAYER_SIZE,
        height: PLAYER_SIZE,
        speed: PLAYER_SPEED,
    }
}

/// Build the initial game state for a canvas of `width × height` pixels.
pub fn init_state(width: f32, height: f32) -> GameState {
    GameState {
        player: new_player(width, height),
        projectiles: Vec::new(),
        enemies: Vec::new(),
        items: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        game_over_cause: None,
        last_shot: None,
        frame: 0,
        width,
        height,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameState) -> GameState {
    let new_x = (state.player.x - state.player.speed).max(0.0);
    GameState {
        player: Player {
            x: new_x,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

pub fn move_player_right(state: &GameState) -> GameState {
    let limit = (state.width - state.player.width).max(0.0);
    let new_x = (state.player.x + state.player.speed).min(limit);
    GameState {
        player: Player {
            x: new_x,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Whether the fire-rate limit allows a shot at `now`.
pub fn can_fire(state: &GameState, now: Duration) -> bool {
    match state.last_shot {
        None => true,
        Some(last) => now.saturating_sub(last) >= FIRE_INTERVAL,
    }
}

/// Fire a projectile from the player's centre, rate-limited to one shot per
/// `FIRE_INTERVAL`.  One in ten shots is special.
pub fn player_shoot(state: &GameState, now: Duration, rng: &mut impl Rng) -> GameState {
    if !can_fire(state, now) {
        return state.clone();
    }
    let special = rng.gen_bool(SPECIAL_SHOT_CHANCE);
    let (width, ..) = projectile_stats(special);
    let p = &state.player;
    let x = p.x + p.width / 2.0 - width / 2.0;
    let mut projectiles = state.projectiles.clone();
    projectiles.push(new_projectile(x, p.y, special));
    GameState {
        projectiles,
        last_shot: Some(now),
        ..state.clone()
    }
}

/// Apply one frame's worth of held keys: movement first, then fire.
pub fn apply_input(
    state: &GameState,
    input: FrameInput,
    now: Duration,
    rng: &mut impl Rng,
) -> GameState {
    let mut next = state.clone();
    if input.left {
        next = move_player_left(&next);
    }
    if input.right {
        next = move_player_right(&next);
    }
    if input.fire {
        next = player_shoot(&next, now, rng);
    }
    next
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Move a sprite by its speed: projectiles rise, everything else falls.
pub fn advance(sprite: &Sprite) -> Sprite {
    let y = match sprite.kind {
        SpriteKind::Projectile => sprite.y - sprite.speed,
        SpriteKind::Enemy | SpriteKind::Item => sprite.y + sprite.speed,
    };
    Sprite { y, ..sprite.clone() }
}

/// Input followed by the simulation tick.  A finished round is frozen: the
/// state comes back unchanged.
pub fn step(
    state: &GameState,
    input: FrameInput,
    now: Duration,
    rng: &mut impl Rng,
) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    tick(&apply_input(state, input, now, rng))
}

/// Advance the simulation by one frame: move everything, resolve
/// collisions, prune dead entities and detect the end of the round.
pub fn tick(state: &GameState) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let frame = state.frame + 1;
    let player_rect = state.player.rect();

    // ── 1. Projectiles: drop the ones above the top edge, move the rest ─────
    let projectiles: Vec<Sprite> = state
        .projectiles
        .iter()
        .filter(|p| p.y >= 0.0)
        .map(advance)
        .collect();

    // ── 2. Enemies: escape / player contact / projectile hits ───────────────
    // Hits are only marked here and compacted once the traversal is done.
    let mut cause: Option<GameOverCause> = None;
    let mut spent = vec![false; projectiles.len()];
    let mut killed = vec![false; state.enemies.len()];
    let mut enemies: Vec<Sprite> = Vec::with_capacity(state.enemies.len());

    for (ei, enemy) in state.enemies.iter().enumerate() {
        let enemy = if enemy.y > state.height {
            cause.get_or_insert(GameOverCause::EnemyEscaped);
            enemy.clone()
        } else {
            advance(enemy)
        };
        let enemy_rect = enemy.rect();

        if detect_collision(&enemy_rect, &player_rect) {
            cause.get_or_insert(GameOverCause::PlayerHit);
        }

        // Every overlapping projectile is spent, even one already spent on an
        // earlier enemy; the enemy itself dies once.
        for (pi, projectile) in projectiles.iter().enumerate() {
            if detect_collision(&projectile.rect(), &enemy_rect) {
                spent[pi] = true;
                killed[ei] = true;
            }
        }

        enemies.push(enemy);
    }

    let kills = killed.iter().filter(|&&k| k).count() as u32;

    let enemies: Vec<Sprite> = enemies
        .into_iter()
        .zip(killed)
        .filter(|(_, dead)| !dead)
        .map(|(e, _)| e)
        .collect();

    let projectiles: Vec<Sprite> = projectiles
        .into_iter()
        .zip(spent)
        .filter(|(_, used)| !used)
        .map(|(p, _)| p)
        .collect();

    // ── 3. Items: fall off silently or get collected ────────────────────────
    let mut collected: u32 = 0;
    let items: Vec<Sprite> = state
        .items
        .iter()
        .filter(|item| item.y <= state.height)
        .map(advance)
        .filter(|item| {
            if detect_collision(&item.rect(), &player_rect) {
                collected += 1;
                false
            } else {
                true
            }
        })
        .collect();

    // ── 4. Score & status ───────────────────────────────────────────────────
    let score_gain = kills * ENEMY_KILL_SCORE + collected * ITEM_SCORE;

    let status = if cause.is_some() {
        GameStatus::GameOver
    } else {
        GameStatus::Playing
    };

    GameState {
        projectiles,
        enemies,
        items,
        score: state.score + score_gain,
        status,
        game_over_cause: cause,
        frame,
        ..state.clone()
    }
}
