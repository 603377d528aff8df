//! Tests for the game engine: determinism, movement, combat,
//! bonuses, and terminal transitions.

use panzer_core::commands::Command;
use panzer_core::components::{BonusEffects, Enemy, Health};
use panzer_core::constants::{DT, PLAYER_HP, SCORE_ENEMY_DESTROYED, SCORE_LEVEL_CLEARED};
use panzer_core::enums::{AiBehavior, BonusKind, Direction, GamePhase, MoverKind, TankKind};
use panzer_core::events::GameEvent;
use panzer_core::types::Point;
use panzer_map::MapDescriptor;

use crate::difficulty::DifficultyParams;
use crate::engine::{GameEngine, SimConfig};

const TEST_MAP: &str = "\
9 7
XXXXXXXXX
XE.....EX
X.#.X.~.X
X...*...X
X.......X
X...P...X
XXXXXXXXX
";

fn test_map() -> MapDescriptor {
    MapDescriptor::parse(TEST_MAP).unwrap()
}

/// Params with nothing spontaneous: no spawns land (max_alive 0), no
/// enemy fire or turns, no bonus drops. The enemy budget stays
/// positive so the level does not complete on its own.
fn quiet_params() -> DifficultyParams {
    DifficultyParams {
        enemy_total: 1,
        max_alive: 0,
        enemy_fire_chance: 0.0,
        enemy_turn_chance: 0.0,
        bonus_spawn_chance: 0.0,
        ..DifficultyParams::for_level(1)
    }
}

fn quiet_engine() -> GameEngine {
    GameEngine::new(&test_map(), quiet_params(), SimConfig::default())
}

/// Pin an enemy in place so its policy cannot move it during the test.
fn pin_enemy(engine: &mut GameEngine, entity: hecs::Entity) {
    engine
        .world_mut()
        .get::<&mut Enemy>(entity)
        .unwrap()
        .move_cooldown = 1000;
}

fn set_player_hp(engine: &mut GameEngine, hp: i32) {
    let player = engine.player_entity();
    engine.world_mut().get::<&mut Health>(player).unwrap().hp = hp;
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let params = DifficultyParams::for_level(1);
    let config = SimConfig {
        seed: 12345,
        ..SimConfig::default()
    };
    let mut engine_a = GameEngine::new(&test_map(), params, config);
    let mut engine_b = GameEngine::new(&test_map(), params, config);

    for _ in 0..300 {
        let snap_a = engine_a.advance(DT, Command::None);
        let snap_b = engine_b.advance(DT, Command::None);
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let params = DifficultyParams::for_level(1);
    let mut engine_a = GameEngine::new(
        &test_map(),
        params,
        SimConfig {
            seed: 111,
            ..SimConfig::default()
        },
    );
    let mut engine_b = GameEngine::new(
        &test_map(),
        params,
        SimConfig {
            seed: 222,
            ..SimConfig::default()
        },
    );

    let mut diverged = false;
    for _ in 0..600 {
        let snap_a = engine_a.advance(DT, Command::None);
        let snap_b = engine_b.advance(DT, Command::None);
        if serde_json::to_string(&snap_a).unwrap() != serde_json::to_string(&snap_b).unwrap() {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "different seeds never diverged");
}

// ---- Player movement ----

#[test]
fn test_player_moves_and_respects_cooldown() {
    let mut engine = quiet_engine();

    let snap = engine.advance(DT, Command::MoveUp);
    let player = &snap.tanks[0];
    assert_eq!(player.position, Point::new(4, 4));
    assert_eq!(player.facing, Direction::Up);

    // Cooldown not yet expired: facing only.
    let snap = engine.advance(DT, Command::MoveUp);
    assert_eq!(snap.tanks[0].position, Point::new(4, 4));

    // Third tick moves again, into forest (tank-passable).
    let snap = engine.advance(DT, Command::MoveUp);
    assert_eq!(snap.tanks[0].position, Point::new(4, 3));
}

#[test]
fn test_blocked_move_turns_but_stays() {
    let mut engine = quiet_engine();

    // Steel border below the spawn.
    let snap = engine.advance(DT, Command::MoveDown);
    let player = &snap.tanks[0];
    assert_eq!(player.position, Point::new(4, 5));
    assert_eq!(player.facing, Direction::Down);
}

#[test]
fn test_speed_boost_moves_every_other_tick_faster() {
    let mut engine = quiet_engine();
    let player = engine.player_entity();
    engine
        .world_mut()
        .get::<&mut BonusEffects>(player)
        .unwrap()
        .speed_boost = 100;

    engine.advance(DT, Command::MoveUp);
    let snap = engine.advance(DT, Command::MoveUp);
    assert_eq!(snap.tanks[0].position, Point::new(4, 3));
}

// ---- Projectiles and obstacles ----

#[test]
fn test_steel_survives_projectile() {
    let mut engine = quiet_engine();
    engine.spawn_projectile_at(Point::new(3, 2), Direction::Right, Some(0));

    let snap = engine.advance(DT, Command::None);
    assert!(snap.projectiles.is_empty(), "shell should be swept");
    assert!(snap
        .obstacles
        .iter()
        .any(|o| o.position == Point::new(4, 2)));
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::ObstacleDestroyed { .. })));
}

#[test]
fn test_brick_destroyed_by_projectile() {
    let mut engine = quiet_engine();
    engine.spawn_projectile_at(Point::new(1, 2), Direction::Right, Some(0));

    let snap = engine.advance(DT, Command::None);
    assert!(snap.projectiles.is_empty());
    assert!(!snap
        .obstacles
        .iter()
        .any(|o| o.position == Point::new(2, 2)));
    assert!(snap
        .events
        .contains(&GameEvent::ObstacleDestroyed { at: Point::new(2, 2) }));
    assert!(snap
        .explosions
        .iter()
        .any(|e| e.position == Point::new(2, 2)));

    // The cell is open now: a second shell flies straight through.
    engine.spawn_projectile_at(Point::new(1, 2), Direction::Right, Some(0));
    let snap = engine.advance(DT, Command::None);
    assert!(snap
        .projectiles
        .iter()
        .any(|p| p.position == Point::new(2, 2)));
}

#[test]
fn test_projectile_passes_forest() {
    let mut engine = quiet_engine();
    engine.spawn_projectile_at(Point::new(3, 3), Direction::Right, Some(0));

    let snap = engine.advance(DT, Command::None);
    assert!(snap
        .projectiles
        .iter()
        .any(|p| p.position == Point::new(4, 3)));
}

#[test]
fn test_projectiles_annihilate_on_swap() {
    let mut engine = quiet_engine();
    engine.spawn_projectile_at(Point::new(2, 4), Direction::Right, Some(0));
    engine.spawn_projectile_at(Point::new(5, 4), Direction::Left, Some(42));

    engine.advance(DT, Command::None);
    let snap = engine.advance(DT, Command::None);
    assert!(snap.projectiles.is_empty(), "head-on shells must cancel");
}

// ---- Combat ----

#[test]
fn test_player_kill_is_credited() {
    let mut engine = quiet_engine();
    let enemy = engine.spawn_enemy_at(Point::new(1, 1), AiBehavior::Random);
    pin_enemy(&mut engine, enemy);
    engine.spawn_projectile_at(Point::new(2, 1), Direction::Left, Some(0));

    let snap = engine.advance(DT, Command::None);
    assert!(snap.events.contains(&GameEvent::EnemyDestroyed {
        at: Point::new(1, 1),
        points: SCORE_ENEMY_DESTROYED,
    }));
    assert!(!snap.tanks.iter().any(|t| t.kind == TankKind::Enemy));
    assert!(snap.explosions.iter().any(|e| e.position == Point::new(1, 1)));
    assert_eq!(engine.score().score, SCORE_ENEMY_DESTROYED + SCORE_LEVEL_CLEARED);
}

#[test]
fn test_crossfire_kill_scores_nothing() {
    let mut params = quiet_params();
    params.enemy_total = 2;
    let mut engine = GameEngine::new(&test_map(), params, SimConfig::default());
    let enemy = engine.spawn_enemy_at(Point::new(1, 1), AiBehavior::Random);
    pin_enemy(&mut engine, enemy);
    engine.spawn_projectile_at(Point::new(2, 1), Direction::Left, Some(42));

    let snap = engine.advance(DT, Command::None);
    assert!(snap.events.contains(&GameEvent::EnemyDestroyed {
        at: Point::new(1, 1),
        points: 0,
    }));
    assert_eq!(engine.score().score, 0);
    assert_eq!(engine.score().enemies_destroyed, 1);
}

#[test]
fn test_player_hit_loses_life_and_respawns_shielded() {
    let mut engine = quiet_engine();
    set_player_hp(&mut engine, 1);
    engine.spawn_projectile_at(Point::new(4, 4), Direction::Down, Some(42));

    let snap = engine.advance(DT, Command::None);
    assert!(snap.events.contains(&GameEvent::PlayerHit { lives_left: 2 }));
    assert_eq!(snap.lives, 2);
    assert!(snap.damage_flash);
    let player = &snap.tanks[0];
    assert_eq!(player.position, Point::new(4, 5));
    assert!(player.shielded, "respawn grants a grace shield");

    let hp = {
        let entity = engine.player_entity();
        engine.world().get::<&Health>(entity).unwrap().hp
    };
    assert_eq!(hp, PLAYER_HP);
}

#[test]
fn test_respawn_waits_for_blocked_spawn_cell() {
    let mut params = quiet_params();
    params.enemy_total = 2;
    let mut engine = GameEngine::new(&test_map(), params, SimConfig::default());

    // Walk the player off its spawn cell and park an enemy on it.
    engine.advance(DT, Command::MoveUp);
    let enemy = engine.spawn_enemy_at(Point::new(4, 5), AiBehavior::Random);
    pin_enemy(&mut engine, enemy);

    set_player_hp(&mut engine, 0);
    let snap = engine.advance(DT, Command::None);

    // The life is gone but the teleport waits: the spawn cell holds
    // exactly one tank, the enemy.
    assert_eq!(snap.lives, 2);
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(!snap.tanks.iter().any(|t| t.kind == TankKind::Player));
    assert_eq!(
        snap.tanks
            .iter()
            .filter(|t| t.position == Point::new(4, 5))
            .count(),
        1
    );

    // Still blocked a tick later; only the one life was consumed.
    let snap = engine.advance(DT, Command::None);
    assert_eq!(snap.lives, 2);
    assert!(!snap.tanks.iter().any(|t| t.kind == TankKind::Player));

    // Clear the spawn cell: the next sweep completes the respawn.
    *engine.world_mut().get::<&mut Point>(enemy).unwrap() = Point::new(1, 4);
    let snap = engine.advance(DT, Command::None);
    let player = snap
        .tanks
        .iter()
        .find(|t| t.kind == TankKind::Player)
        .expect("player respawns once the cell is free");
    assert_eq!(player.position, Point::new(4, 5));
    assert!(player.shielded);
    assert_eq!(snap.lives, 2);
}

#[test]
fn test_shield_absorbs_hit() {
    let mut engine = quiet_engine();
    let player = engine.player_entity();
    engine
        .world_mut()
        .get::<&mut BonusEffects>(player)
        .unwrap()
        .shield = 100;
    engine.spawn_projectile_at(Point::new(4, 4), Direction::Down, Some(42));

    let snap = engine.advance(DT, Command::None);
    assert!(snap.projectiles.is_empty(), "shell is consumed by the shield");
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::PlayerHit { .. })));
    let hp = engine.world().get::<&Health>(player).unwrap().hp;
    assert_eq!(hp, PLAYER_HP);
}

#[test]
fn test_own_shell_does_not_hit_firer() {
    let mut engine = quiet_engine();
    // Player is tank 0; a shell it owns spawns on an adjacent cell
    // moving into the player's cell.
    engine.spawn_projectile_at(Point::new(4, 4), Direction::Down, Some(0));

    let snap = engine.advance(DT, Command::None);
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::PlayerHit { .. })));
    // The shell keeps flying past.
    assert!(!snap.projectiles.is_empty());
}

// ---- Bonuses ----

#[test]
fn test_extra_life_bonus() {
    let mut engine = quiet_engine();
    engine.spawn_bonus_at(Point::new(4, 5), BonusKind::ExtraLife);

    let snap = engine.advance(DT, Command::None);
    assert_eq!(snap.lives, 4);
    assert!(snap.bonuses.is_empty());
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::BonusCollected {
            kind: BonusKind::ExtraLife,
            ..
        }
    )));
}

#[test]
fn test_unclaimed_bonus_expires() {
    let mut engine = quiet_engine();
    engine.spawn_bonus_at(Point::new(1, 4), BonusKind::Shield);

    let mut snap = engine.advance(DT, Command::None);
    assert!(!snap.bonuses.is_empty());

    for _ in 0..quiet_params().bonus_ttl_ticks {
        snap = engine.advance(DT, Command::None);
        assert!(!snap
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::BonusCollected { .. })));
    }
    assert!(snap.bonuses.is_empty(), "unclaimed bonus must time out");
}

#[test]
fn test_rapid_fire_halves_reload() {
    let mut engine = quiet_engine();
    engine.spawn_bonus_at(Point::new(4, 5), BonusKind::RapidFire);
    engine.advance(DT, Command::None);

    let mut fired = 0;
    for _ in 0..10 {
        let snap = engine.advance(DT, Command::Fire);
        fired += snap
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::ProjectileFired { by_player: true }))
            .count();
    }
    // Reload 3 instead of 6: four shots in ten ticks.
    assert_eq!(fired, 4);
}

// ---- Spawning ----

#[test]
fn test_enemies_spawn_over_time() {
    let params = DifficultyParams::for_level(1);
    let mut engine = GameEngine::new(&test_map(), params, SimConfig::default());

    let snap = engine.advance(DT, Command::None);
    assert!(
        snap.tanks.iter().any(|t| t.kind == TankKind::Enemy),
        "first enemy spawns immediately"
    );
}

// ---- Terminal transitions ----

#[test]
fn test_game_over_on_last_life() {
    let mut engine = quiet_engine();
    {
        let player = engine.player_entity();
        engine
            .world_mut()
            .get::<&mut panzer_core::components::Player>(player)
            .unwrap()
            .lives = 1;
    }
    set_player_hp(&mut engine, 1);
    engine.spawn_projectile_at(Point::new(4, 4), Direction::Down, Some(42));

    let snap = engine.advance(DT, Command::None);
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.lives, 0);
    assert!(snap.events.contains(&GameEvent::GameOver));
    assert!(!snap.tanks.iter().any(|t| t.kind == TankKind::Player));

    // Terminal phase freezes the world; commands are ignored.
    let tick = snap.time.tick;
    let snap = engine.advance(DT, Command::MoveUp);
    assert_eq!(snap.time.tick, tick);
    assert_eq!(snap.phase, GamePhase::GameOver);
}

#[test]
fn test_level_complete_when_field_and_queue_empty() {
    let mut engine = quiet_engine();
    engine.drain_spawn_queue();

    let snap = engine.advance(DT, Command::None);
    assert_eq!(snap.phase, GamePhase::LevelComplete);
    assert!(snap.events.contains(&GameEvent::LevelCleared {
        points: SCORE_LEVEL_CLEARED,
    }));
    assert_eq!(snap.score, SCORE_LEVEL_CLEARED);
}

#[test]
fn test_last_kill_completes_level() {
    let mut engine = quiet_engine();
    let enemy = engine.spawn_enemy_at(Point::new(1, 1), AiBehavior::Random);
    pin_enemy(&mut engine, enemy);
    engine
        .world_mut()
        .get::<&mut Health>(enemy)
        .unwrap()
        .hp = 0;

    let snap = engine.advance(DT, Command::None);
    assert_eq!(snap.phase, GamePhase::LevelComplete);
}

// ---- Sweep ----

#[test]
fn test_sweep_is_idempotent() {
    let mut params = quiet_params();
    params.enemy_total = 2;
    let mut engine = GameEngine::new(&test_map(), params, SimConfig::default());
    let enemy = engine.spawn_enemy_at(Point::new(1, 1), AiBehavior::Random);
    engine
        .world_mut()
        .get::<&mut Health>(enemy)
        .unwrap()
        .hp = 0;

    engine.run_sweep_once();
    engine.run_sweep_once();
    assert_eq!(engine.score().enemies_destroyed, 1);
    assert_eq!(engine.world().query::<&Enemy>().iter().count(), 0);
}

// ---- Accessibility queries ----

#[test]
fn test_accessibility_queries() {
    let engine = quiet_engine();

    assert!(engine.is_valid_position(Point::new(0, 0)));
    assert!(!engine.is_valid_position(Point::new(-1, 0)));
    assert!(!engine.is_valid_position(Point::new(9, 0)));

    // Steel blocks everything; water passes shells only; forest both.
    assert!(!engine.is_position_accessible(Point::new(4, 2), MoverKind::Tank));
    assert!(!engine.is_position_accessible(Point::new(4, 2), MoverKind::Projectile));
    assert!(!engine.is_position_accessible(Point::new(6, 2), MoverKind::Tank));
    assert!(engine.is_position_accessible(Point::new(6, 2), MoverKind::Projectile));
    assert!(engine.is_position_accessible(Point::new(4, 3), MoverKind::Tank));

    // An occupied cell blocks tanks.
    assert!(!engine.is_position_accessible(Point::new(4, 5), MoverKind::Tank));

    // Enemy spawns keep their distance from the player.
    assert!(engine.is_valid_enemy_position(Point::new(1, 1)));
    assert!(!engine.is_valid_enemy_position(Point::new(4, 4)));

    assert!(engine.is_valid_bonus_position(Point::new(2, 4)));
    assert!(!engine.is_valid_bonus_position(Point::new(4, 2)));
}

// ---- Invariants ----

#[test]
fn test_positions_stay_in_bounds() {
    let params = DifficultyParams::for_level(3);
    let mut engine = GameEngine::new(
        &test_map(),
        params,
        SimConfig {
            seed: 7,
            ..SimConfig::default()
        },
    );
    let commands = [
        Command::MoveUp,
        Command::MoveLeft,
        Command::Fire,
        Command::MoveDown,
        Command::MoveRight,
        Command::Fire,
    ];

    for i in 0..400 {
        let snap = engine.advance(DT, commands[i % commands.len()]);
        let in_bounds = |p: Point| p.x >= 0 && p.y >= 0 && p.x < 9 && p.y < 7;
        assert!(snap.tanks.iter().all(|t| in_bounds(t.position)));
        assert!(snap.projectiles.iter().all(|p| in_bounds(p.position)));
        assert!(snap.bonuses.iter().all(|b| in_bounds(b.position)));
        if snap.phase.is_terminal() {
            break;
        }
    }
}
