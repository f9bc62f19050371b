//! All game entity types — pure data, no logic.

use std::time::Duration;

use crate::geometry::Rect;

/// Closed palette of entity colours.  Text colours live in the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Blue,
    Red,
    Yellow,
    Green,
    Purple,
    Orange,
    Cyan,
    Gold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Why a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    /// An enemy fell past the bottom edge.
    EnemyEscaped,
    /// An enemy touched the player.
    PlayerHit,
}

// ── Moving sprites ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Projectile,
    Enemy,
    Item,
}

/// Enemy stat tables.  `Default` is the common green drone; the other five
/// are the special variants picked by the spawner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyVariant {
    Default,
    Purple,
    Orange,
    Blue,
    Red,
    Cyan,
}

impl EnemyVariant {
    /// Special variants in spawn-table order (index 0–4).
    pub const SPECIALS: [EnemyVariant; 5] = [
        EnemyVariant::Purple,
        EnemyVariant::Orange,
        EnemyVariant::Blue,
        EnemyVariant::Red,
        EnemyVariant::Cyan,
    ];
}

/// A projectile, enemy or item.  All three share the same shape: a
/// rectangle falling (or rising) at a fixed speed in one colour.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per frame.  Direction comes from `kind`.
    pub speed: f32,
    pub tint: Tint,
}

impl Sprite {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Live projectiles, oldest first.
    pub projectiles: Vec<Sprite>,
    /// Live enemies, oldest first.
    pub enemies: Vec<Sprite>,
    /// Live bonus items, oldest first.
    pub items: Vec<Sprite>,
    pub score: u32,
    pub status: GameStatus,
    /// Set together with `status` when the round ends.
    pub game_over_cause: Option<GameOverCause>,
    /// Session time of the last projectile fired.
    pub last_shot: Option<Duration>,
    pub frame: u64,
    /// Canvas size in virtual pixels.
    pub width: f32,
    pub height: f32,
}
