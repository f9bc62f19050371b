//! Held-key tracking.
//!
//! The game acts on which keys are *down* each frame rather than on
//! individual key events, so Space and an arrow can be held together.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
//!   `Press` / `Repeat` / `Release` events → keys are removed on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows as
//!   repeated `Press`).  Keys expire after `HOLD_WINDOW` of silence, which
//!   covers two periods of a 30 Hz OS key-repeat whatever the frame rate.

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::KeyCode;

/// A key counts as held on a classic terminal if its last press/repeat
/// arrived within this long.
pub const HOLD_WINDOW: Duration = Duration::from_millis(66);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Shoots while playing, restarts after game over.
    Fire,
}

impl Key {
    /// Map a terminal key to a game key.  `A`/`D` double as the arrows.
    pub fn from_code(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
            KeyCode::Char(' ') => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Snapshot of the held game keys for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Maps each held key to the session time it was last seen (press or repeat).
#[derive(Clone, Debug, Default)]
pub struct HeldKeys {
    last_seen: HashMap<Key, Duration>,
    /// The terminal sends `Release` events, so keys never expire on their own.
    reports_release: bool,
}

impl HeldKeys {
    pub fn new(reports_release: bool) -> Self {
        HeldKeys {
            last_seen: HashMap::new(),
            reports_release,
        }
    }

    /// Record a press or repeat of `key` at `now`.
    pub fn press(&mut self, key: Key, now: Duration) {
        self.last_seen.insert(key, now);
    }

    pub fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }

    pub fn is_held(&self, key: Key, now: Duration) -> bool {
        self.last_seen
            .get(&key)
            .map(|&last| self.reports_release || now.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn frame_input(&self, now: Duration) -> FrameInput {
        FrameInput {
            left: self.is_held(Key::Left, now),
            right: self.is_held(Key::Right, now),
            fire: self.is_held(Key::Fire, now),
        }
    }
}
