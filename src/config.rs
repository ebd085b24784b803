//! Game tuning.
//!
//! Every number the simulation depends on lives in `GameConfig`.  Missing
//! fields in a JSON file fall back to the defaults below, so a config file
//! only has to name what it changes.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::entities::SHIP_SIZE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World ────────────────────────────────────────────────────────────────
    pub world_width: f32,
    pub world_height: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_start_x: f32,
    pub player_start_y: f32,
    /// Horizontal speed while a direction key is held (units/sec).
    pub player_speed: f32,

    // ── Bullets ──────────────────────────────────────────────────────────────
    /// Upward speed (units/sec, applied as a negative vy).
    pub bullet_speed: f32,
    /// Minimum gap between two shots (ms).
    pub fire_cooldown_ms: f64,
    /// Bullets spawn this far above the player.
    pub bullet_spawn_offset: f32,
    /// Bullets above this y are culled.
    pub bullet_cull_y: f32,
    pub bullet_capacity: usize,

    // ── Enemies ──────────────────────────────────────────────────────────────
    /// Downward speed (units/sec).
    pub enemy_speed: f32,
    /// Extra displacement applied once per simulation step.
    pub enemy_nudge_per_tick: f32,
    pub enemy_spawn_y: f32,
    pub enemy_spawn_min_x: i32,
    pub enemy_spawn_max_x: i32,
    /// Enemies below this y are culled.
    pub enemy_cull_y: f32,
    pub spawn_interval_ms: f64,
    pub enemy_capacity: usize,

    // ── Scoring ──────────────────────────────────────────────────────────────
    pub score_per_kill: u32,

    // ── Frame pacing ─────────────────────────────────────────────────────────
    pub frame_ms: u64,

    // ── Explosion particles ──────────────────────────────────────────────────
    pub particle_quantity: usize,
    pub particle_speed: f32,
    pub particle_lifespan_ms: f32,
    pub particle_start_scale: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,

            player_start_x: 400.0,
            player_start_y: 550.0,
            player_speed: 200.0,

            bullet_speed: 300.0,
            fire_cooldown_ms: 250.0,
            bullet_spawn_offset: 20.0,
            bullet_cull_y: -10.0,
            bullet_capacity: 32,

            enemy_speed: 100.0,
            enemy_nudge_per_tick: 2.0,
            enemy_spawn_y: -20.0,
            enemy_spawn_min_x: 20,
            enemy_spawn_max_x: 780,
            enemy_cull_y: 600.0,
            spawn_interval_ms: 1000.0,
            enemy_capacity: 64,

            score_per_kill: 10,

            frame_ms: 16, // ≈60 FPS

            particle_quantity: 10,
            particle_speed: 100.0,
            particle_lifespan_ms: 300.0,
            particle_start_scale: 0.5,
        }
    }
}

impl GameConfig {
    /// Parse a JSON config, filling gaps with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig =
            serde_json::from_str(json).context("Failed to parse game config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid config {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        // The ship is clamped inside the world, so the world has to fit it
        ensure!(
            self.world_width >= SHIP_SIZE.0 && self.world_height >= SHIP_SIZE.1,
            "world must be at least {}x{} to fit the ship",
            SHIP_SIZE.0,
            SHIP_SIZE.1
        );
        ensure!(
            self.enemy_spawn_min_x <= self.enemy_spawn_max_x,
            "enemy_spawn_min_x must not exceed enemy_spawn_max_x"
        );
        ensure!(self.spawn_interval_ms > 0.0, "spawn_interval_ms must be positive");
        ensure!(self.frame_ms > 0, "frame_ms must be positive");
        ensure!(self.particle_speed >= 0.0, "particle_speed must not be negative");
        ensure!(self.particle_lifespan_ms > 0.0, "particle_lifespan_ms must be positive");
        Ok(())
    }
}
