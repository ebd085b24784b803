use std::io::Write;

use arcade_shooter::compute::{init_round, integrate};
use arcade_shooter::particles::ParticleSystem;
use arcade_shooter::GameConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn defaults_match_the_classic_game() {
    let c = GameConfig::default();
    assert_eq!((c.world_width, c.world_height), (800.0, 600.0));
    assert_eq!((c.player_start_x, c.player_start_y), (400.0, 550.0));
    assert_eq!(c.player_speed, 200.0);
    assert_eq!(c.bullet_speed, 300.0);
    assert_eq!(c.fire_cooldown_ms, 250.0);
    assert_eq!(c.enemy_speed, 100.0);
    assert_eq!(c.enemy_nudge_per_tick, 2.0);
    assert_eq!((c.enemy_spawn_min_x, c.enemy_spawn_max_x), (20, 780));
    assert_eq!(c.spawn_interval_ms, 1000.0);
    assert_eq!(c.score_per_kill, 10);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let c = GameConfig::from_json(r#"{ "score_per_kill": 25, "fire_cooldown_ms": 100.0 }"#)
        .unwrap();
    assert_eq!(c.score_per_kill, 25);
    assert_eq!(c.fire_cooldown_ms, 100.0);
    assert_eq!(c.enemy_speed, 100.0);
}

#[test]
fn round_trips_through_json() {
    let c = GameConfig { enemy_capacity: 5, ..GameConfig::default() };
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(GameConfig::from_json(&json).unwrap(), c);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(GameConfig::from_json("{ not json").is_err());
}

#[test]
fn inverted_spawn_range_is_rejected() {
    let err = GameConfig::from_json(r#"{ "enemy_spawn_min_x": 500, "enemy_spawn_max_x": 100 }"#)
        .unwrap_err();
    assert!(format!("{err:#}").contains("enemy_spawn_min_x"));
}

#[test]
fn world_narrower_than_ship_is_rejected() {
    let err = GameConfig::from_json(r#"{ "world_width": 10.0 }"#).unwrap_err();
    assert!(format!("{err:#}").contains("to fit the ship"));
}

#[test]
fn world_shorter_than_ship_is_rejected() {
    let err = GameConfig::from_json(r#"{ "world_height": 20.0 }"#).unwrap_err();
    assert!(format!("{err:#}").contains("to fit the ship"));
}

#[test]
fn world_exactly_ship_sized_is_accepted() {
    let c = GameConfig::from_json(
        r#"{ "world_width": 20.0, "world_height": 30.0, "enemy_spawn_min_x": 10, "enemy_spawn_max_x": 10 }"#,
    )
    .unwrap();
    let mut s = init_round(c);
    integrate(&mut s, 0.016);
    assert_eq!((s.player.x, s.player.y), (10.0, 15.0));
}

#[test]
fn negative_particle_speed_is_rejected() {
    let err = GameConfig::from_json(r#"{ "particle_speed": -5.0 }"#).unwrap_err();
    assert!(format!("{err:#}").contains("particle_speed"));
}

#[test]
fn zero_particle_speed_still_emits() {
    let c = GameConfig::from_json(r#"{ "particle_speed": 0.0 }"#).unwrap();
    let mut ps = ParticleSystem::new(&c);
    ps.emit_at(100.0, 100.0, &mut StdRng::seed_from_u64(7));
    assert_eq!(ps.particles().len(), c.particle_quantity);
}

#[test]
fn zero_particle_lifespan_is_rejected() {
    let err = GameConfig::from_json(r#"{ "particle_lifespan_ms": 0.0 }"#).unwrap_err();
    assert!(format!("{err:#}").contains("particle_lifespan_ms"));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "player_speed": 350.0 }}"#).unwrap();
    let c = GameConfig::load(file.path()).unwrap();
    assert_eq!(c.player_speed, 350.0);
}

#[test]
fn load_reports_missing_file() {
    let err = GameConfig::load(std::path::Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read"));
}
