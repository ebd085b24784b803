//! Game-logic functions.
//!
//! Every public function advances a `RoundState` in place.  Randomness only
//! enters through an injected RNG, so a seeded RNG replays a round exactly.
//! Anything the frontend must react to is pushed onto `state.events`.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Actor, Bounds, GameEvent, GameStatus, InputState, RoundState, Tint, BULLET_SIZE, ENEMY_SIZE,
    SHIP_SIZE,
};
use crate::pool::SlotId;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state of a round.
pub fn init_round(config: GameConfig) -> RoundState {
    RoundState::new(config)
}

/// Throw the current round away and start a clean one with the same config.
pub fn restart(state: &mut RoundState) {
    let previous_score = state.score;
    *state = RoundState::new(state.config.clone());
    state.events.push(GameEvent::Restarted);
    log::info!("Round restarted (previous score {})", previous_score);
}

// ── Simulation step ─────────────────────────────────────────────────────────

fn can_fire(shoot_time: Option<f64>, now_ms: f64) -> bool {
    shoot_time.map_or(true, |ready| now_ms > ready)
}

/// Per-frame update driven by the sampled input at timestamp `now_ms`.
///
/// Steers the player, fires subject to the cooldown, culls bullets that
/// left the top, and nudges enemies down, culling those past the bottom.
/// Does nothing once the round is over.
pub fn simulation_step(state: &mut RoundState, input: &InputState, now_ms: f64) {
    if state.status == GameStatus::GameOver {
        return;
    }
    let cfg = &state.config;

    // ── 1. Movement ──────────────────────────────────────────────────────────
    state.player.vx = if input.left {
        -cfg.player_speed
    } else if input.right {
        cfg.player_speed
    } else {
        0.0
    };

    // ── 2. Firing ────────────────────────────────────────────────────────────
    if input.fire && can_fire(state.shoot_time, now_ms) {
        let bullet = Actor {
            x: state.player.x,
            y: state.player.y - cfg.bullet_spawn_offset,
            vy: -cfg.bullet_speed,
        };
        match state.bullets.acquire(bullet) {
            Some(_) => {
                state.shoot_time = Some(now_ms + cfg.fire_cooldown_ms);
                state.events.push(GameEvent::BulletFired {
                    x: bullet.x,
                    y: bullet.y,
                });
            }
            None => log::debug!("Bullet pool exhausted, shot skipped"),
        }
    }

    // ── 3. Bullet culling ────────────────────────────────────────────────────
    let bullet_cull_y = cfg.bullet_cull_y;
    state.bullets.destroy_where(|b| b.y < bullet_cull_y);

    // ── 4. Enemy advance + culling ───────────────────────────────────────────
    let nudge = cfg.enemy_nudge_per_tick;
    let enemy_cull_y = cfg.enemy_cull_y;
    for (_, enemy) in state.enemies.iter_mut() {
        enemy.y += nudge;
    }
    state.enemies.destroy_where(|e| e.y > enemy_cull_y);
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Drop one enemy in at a random column along the top edge.
pub fn spawn_enemy(state: &mut RoundState, rng: &mut impl Rng) -> Option<SlotId> {
    if state.status == GameStatus::GameOver {
        return None;
    }
    let cfg = &state.config;
    let x = rng.gen_range(cfg.enemy_spawn_min_x..=cfg.enemy_spawn_max_x) as f32;
    let enemy = Actor {
        x,
        y: cfg.enemy_spawn_y,
        vy: cfg.enemy_speed,
    };
    match state.enemies.acquire(enemy) {
        Some(id) => {
            log::debug!("Enemy spawned at x={}", x);
            state.events.push(GameEvent::EnemySpawned { x });
            Some(id)
        }
        None => {
            log::debug!("Enemy pool exhausted, spawn skipped");
            None
        }
    }
}

/// Run the repeating spawn timer forward by `dt_ms`.  Returns whether it
/// fired (even if the round is over and nothing spawned).
pub fn advance_spawn_timer(state: &mut RoundState, dt_ms: f64, rng: &mut impl Rng) -> bool {
    let fired = state.spawn_timer.advance(dt_ms);
    if fired {
        spawn_enemy(state, rng);
    }
    fired
}

// ── Physics ──────────────────────────────────────────────────────────────────

/// Integrate velocities over `dt` seconds and keep the ship inside the world.
pub fn integrate(state: &mut RoundState, dt: f32) {
    if state.physics_paused {
        return;
    }
    let (half_w, half_h) = (SHIP_SIZE.0 / 2.0, SHIP_SIZE.1 / 2.0);
    let (world_w, world_h) = (state.config.world_width, state.config.world_height);

    let player = &mut state.player;
    player.x = (player.x + player.vx * dt).clamp(half_w, world_w - half_w);
    player.y = player.y.clamp(half_h, world_h - half_h);

    for (_, bullet) in state.bullets.iter_mut() {
        bullet.y += bullet.vy * dt;
    }
    for (_, enemy) in state.enemies.iter_mut() {
        enemy.y += enemy.vy * dt;
    }
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// A colliding pair found by `detect_overlaps`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlap {
    BulletEnemy { bullet: SlotId, enemy: SlotId },
    EnemyPlayer { enemy: SlotId },
}

/// Collect every colliding pair without changing anything.
///
/// Each bullet claims at most one enemy and each enemy is claimed at most
/// once; an enemy claimed by a bullet cannot also reach the player.  At most
/// one enemy–player pair is reported.
pub fn detect_overlaps(state: &RoundState) -> Vec<Overlap> {
    let mut overlaps = Vec::new();
    if state.physics_paused {
        return overlaps;
    }

    let mut claimed: Vec<SlotId> = Vec::new();
    for (bullet_id, bullet) in state.bullets.iter() {
        let bullet_box = Bounds::centred(bullet.x, bullet.y, BULLET_SIZE);
        let hit = state.enemies.iter().find(|(enemy_id, enemy)| {
            !claimed.contains(enemy_id)
                && bullet_box.overlaps(&Bounds::centred(enemy.x, enemy.y, ENEMY_SIZE))
        });
        if let Some((enemy_id, _)) = hit {
            claimed.push(enemy_id);
            overlaps.push(Overlap::BulletEnemy {
                bullet: bullet_id,
                enemy: enemy_id,
            });
        }
    }

    if state.status == GameStatus::Playing {
        let ship_box = state.player.bounds();
        let rammer = state.enemies.iter().find(|(enemy_id, enemy)| {
            !claimed.contains(enemy_id)
                && ship_box.overlaps(&Bounds::centred(enemy.x, enemy.y, ENEMY_SIZE))
        });
        if let Some((enemy_id, _)) = rammer {
            overlaps.push(Overlap::EnemyPlayer { enemy: enemy_id });
        }
    }

    overlaps
}

/// Apply the collision rule for every collected pair, in order.
pub fn resolve_overlaps(state: &mut RoundState, overlaps: &[Overlap]) {
    for overlap in overlaps {
        match *overlap {
            Overlap::BulletEnemy { bullet, enemy } => {
                bullet_hit_enemy(state, bullet, enemy);
            }
            Overlap::EnemyPlayer { enemy } => {
                enemy_hit_player(state);
                state.enemies.destroy(enemy);
            }
        }
    }
}

/// A bullet reached an enemy: score it, queue an explosion where the enemy
/// was, and remove both.  Returns false if either is already gone.
pub fn bullet_hit_enemy(state: &mut RoundState, bullet: SlotId, enemy: SlotId) -> bool {
    if state.status == GameStatus::GameOver || !state.bullets.is_active(bullet) {
        return false;
    }
    let Some(&Actor { x, y, .. }) = state.enemies.get(enemy) else {
        return false;
    };

    state.score += state.config.score_per_kill;
    state.events.push(GameEvent::ScoreChanged(state.score));
    state.events.push(GameEvent::Explosion { x, y });

    state.bullets.destroy(bullet);
    state.enemies.destroy(enemy);
    true
}

/// An enemy reached the ship: freeze the world and end the round.
pub fn enemy_hit_player(state: &mut RoundState) {
    if state.status == GameStatus::GameOver {
        return;
    }
    state.physics_paused = true;
    state.player.tint = Tint::Hit;
    state.status = GameStatus::GameOver;
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!("Game over with score {}", state.score);
}

// ── Frame driver ─────────────────────────────────────────────────────────────

/// Advance one whole frame at timestamp `now_ms`: spawn timer, physics,
/// simulation step, then collisions.
pub fn frame(state: &mut RoundState, input: &InputState, now_ms: f64, rng: &mut impl Rng) {
    let dt_ms = state
        .last_frame_ms
        .map_or(0.0, |last| (now_ms - last).max(0.0));
    state.last_frame_ms = Some(now_ms);

    advance_spawn_timer(state, dt_ms, rng);
    integrate(state, (dt_ms / 1000.0) as f32);
    simulation_step(state, input, now_ms);

    let overlaps = detect_overlaps(state);
    resolve_overlaps(state, &overlaps);
}
