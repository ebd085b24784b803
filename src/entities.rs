//! All game entity types — pure data, plus the constructors that build them.

use crate::config::GameConfig;
use crate::pool::Pool;

// ── Collision bounds (match the generated textures) ──────────────────────────

pub const SHIP_SIZE: (f32, f32) = (20.0, 30.0);
pub const BULLET_SIZE: (f32, f32) = (4.0, 8.0);
pub const ENEMY_SIZE: (f32, f32) = (20.0, 20.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Visual tint applied to the player sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Normal,
    /// Red flash after an enemy reaches the ship.
    Hit,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// One frame's worth of sampled controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Actors ────────────────────────────────────────────────────────────────────

/// Axis-aligned box centred on an actor's position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn centred(x: f32, y: f32, (w, h): (f32, f32)) -> Self {
        Self {
            left: x - w / 2.0,
            top: y - h / 2.0,
            right: x + w / 2.0,
            bottom: y + h / 2.0,
        }
    }

    /// Strict intersection: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/// A pooled projectile or enemy.  Only vertical motion exists for either.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub tint: Tint,
}

impl Player {
    pub fn bounds(&self) -> Bounds {
        Bounds::centred(self.x, self.y, SHIP_SIZE)
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Things the frontend reacts to.  The simulation pushes these onto
/// `RoundState::events`; the frame loop drains them after every tick.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    BulletFired { x: f32, y: f32 },
    EnemySpawned { x: f32 },
    /// An enemy was shot down here; the frontend plays an explosion.
    Explosion { x: f32, y: f32 },
    ScoreChanged(u32),
    GameOver { score: u32 },
    Restarted,
}

// ── Spawn timer ───────────────────────────────────────────────────────────────

/// Repeating timer that fires at most once per `advance`, carrying any
/// overshoot into the next period.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnTimer {
    pub interval_ms: f64,
    pub elapsed_ms: f64,
}

impl SpawnTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, elapsed_ms: 0.0 }
    }

    /// Add `dt_ms`; returns true when the timer fires.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.elapsed_ms += dt_ms.max(0.0);
        if self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            true
        } else {
            false
        }
    }
}

// ── Master round state ────────────────────────────────────────────────────────

/// Everything belonging to one round.  A restart replaces the whole value.
#[derive(Clone, Debug)]
pub struct RoundState {
    pub config: GameConfig,
    pub player: Player,
    pub bullets: Pool<Actor>,
    pub enemies: Pool<Actor>,
    pub score: u32,
    pub status: GameStatus,
    /// Next shot is allowed strictly after this timestamp (ms).  `None`
    /// until the first shot of the round.
    pub shoot_time: Option<f64>,
    pub spawn_timer: SpawnTimer,
    pub physics_paused: bool,
    /// Timestamp of the previous `frame` call, used to derive dt.
    pub last_frame_ms: Option<f64>,
    pub events: Vec<GameEvent>,
}

impl RoundState {
    pub fn new(config: GameConfig) -> Self {
        RoundState {
            player: Player {
                x: config.player_start_x,
                y: config.player_start_y,
                vx: 0.0,
                tint: Tint::Normal,
            },
            bullets: Pool::with_capacity(config.bullet_capacity),
            enemies: Pool::with_capacity(config.enemy_capacity),
            score: 0,
            status: GameStatus::Playing,
            shoot_time: None,
            spawn_timer: SpawnTimer::new(config.spawn_interval_ms),
            physics_paused: false,
            last_frame_ms: None,
            events: Vec::new(),
            config,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Text shown by the score overlay.
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

/// Two-line message centred on the screen after a game over.
pub const GAME_OVER_TEXT: &str = "GAME OVER\nClick to restart";
