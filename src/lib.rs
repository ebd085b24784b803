//! Arcade shooter core.
//!
//! - `config`: tunable constants, loadable from JSON
//! - `textures`: procedural sprite masks built once at startup
//! - `pool`: fixed-capacity actor arena
//! - `entities`: pure game data
//! - `compute`: per-frame simulation, spawning, collisions, restart
//! - `particles`: one-shot explosion bursts
//!
//! Everything here is terminal-agnostic; the binary owns rendering and input.

pub mod compute;
pub mod config;
pub mod entities;
pub mod particles;
pub mod pool;
pub mod textures;

pub use config::GameConfig;
pub use entities::{GameEvent, GameStatus, InputState, RoundState};
