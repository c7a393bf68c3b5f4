/// All game entity types — pure data, no logic.
///
/// Coordinates are world units (the configured screen size), origin at the
/// top-left corner, y growing downward.

use crate::settings::Settings;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Strict overlap: rects that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Half-open containment, matching how a click lands on a button.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// The UFO at the bottom of the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub moving_left: bool,
    pub moving_right: bool,
}

/// A falling star.  Always owned by a `Fleet`.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub rect: Rect,
}

/// A player shot travelling straight up.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
}

/// Every live target, moving as one formation.
#[derive(Clone, Debug, PartialEq)]
pub struct Fleet {
    pub targets: Vec<Target>,
    /// +1.0 moves right, -1.0 moves left.
    pub direction: f32,
}

impl Fleet {
    pub fn empty() -> Self {
        Self { targets: Vec::new(), direction: 1.0 }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }
}

// ── Status & stats ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Waiting for a start action.
    Inactive,
    Active,
    /// Playing, but frozen for a few ticks after the player was hit.
    Stunned { ticks_remaining: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameStats {
    pub lives: u32,
    pub score: u32,
    pub level: u32,
    /// Survives new games for the lifetime of the process.
    pub high_score: u32,
    pub status: GameStatus,
}

impl GameStats {
    /// True while a game is running, stunned or not.
    pub fn is_active(&self) -> bool {
        !matches!(self.status, GameStatus::Inactive)
    }
}

/// Speed multiplier that grows with each cleared wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difficulty {
    pub multiplier: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self { multiplier: 1.0 }
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Start,
    Quit,
}

/// Discrete events delivered by the input source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Window closed / process asked to stop.
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer click in world coordinates.
    Click { x: f32, y: f32 },
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub fleet: Fleet,
    pub projectiles: Vec<Projectile>,
    pub stats: GameStats,
    pub difficulty: Difficulty,
    pub frame: u64,
    /// Read-only for the lifetime of the state.
    pub settings: Settings,
}
