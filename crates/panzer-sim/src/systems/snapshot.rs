//! Snapshot system: builds the renderable state after each tick.
//!
//! Read-only over the world. Every view list is sorted so that equal
//! worlds serialize identically regardless of ECS iteration order.

use hecs::World;

use panzer_core::components::{
    Bonus, BonusEffects, Enemy, Explosion, Facing, Health, Obstacle, Player, Projectile, TankId,
};
use panzer_core::enums::{GamePhase, TankKind};
use panzer_core::events::GameEvent;
use panzer_core::state::{
    BonusView, ExplosionView, GameStateSnapshot, ObstacleView, ProjectileView, TankView,
};
use panzer_core::types::{Point, SimTime};

use crate::engine::ScoreState;

pub fn build(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    level: u32,
    score: &ScoreState,
    damage_flash: bool,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let mut tanks: Vec<TankView> = Vec::new();
    let mut lives = 0;

    for (_entity, (id, player, health, pos, facing, effects)) in world
        .query::<(&TankId, &Player, &Health, &Point, &Facing, &BonusEffects)>()
        .iter()
    {
        lives = player.lives;
        // A dead player tank awaiting game over is not drawn.
        if health.is_dead() {
            continue;
        }
        tanks.push(TankView {
            id: id.0,
            kind: TankKind::Player,
            position: *pos,
            facing: facing.0,
            shielded: effects.shielded(),
        });
    }

    for (_entity, (id, _enemy, pos, facing)) in
        world.query::<(&TankId, &Enemy, &Point, &Facing)>().iter()
    {
        tanks.push(TankView {
            id: id.0,
            kind: TankKind::Enemy,
            position: *pos,
            facing: facing.0,
            shielded: false,
        });
    }
    tanks.sort_by_key(|t| t.id);

    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Point)>()
        .iter()
        .filter(|(_, (proj, _))| !proj.spent)
        .map(|(_, (proj, pos))| ProjectileView {
            position: *pos,
            facing: proj.facing,
        })
        .collect();
    projectiles.sort_by_key(|p| p.position);

    let mut obstacles: Vec<ObstacleView> = world
        .query::<(&Obstacle, &Point)>()
        .iter()
        .map(|(_, (obstacle, pos))| ObstacleView {
            position: *pos,
            kind: obstacle.kind,
        })
        .collect();
    obstacles.sort_by_key(|o| o.position);

    let mut bonuses: Vec<BonusView> = world
        .query::<(&Bonus, &Point)>()
        .iter()
        .filter(|(_, (bonus, _))| bonus.active)
        .map(|(_, (bonus, pos))| BonusView {
            position: *pos,
            kind: bonus.kind,
        })
        .collect();
    bonuses.sort_by_key(|b| b.position);

    let mut explosions: Vec<ExplosionView> = world
        .query::<(&Explosion, &Point)>()
        .iter()
        .map(|(_, (_, pos))| ExplosionView { position: *pos })
        .collect();
    explosions.sort_by_key(|e| e.position);

    GameStateSnapshot {
        time: *time,
        phase,
        level,
        score: score.score,
        lives,
        damage_flash,
        tanks,
        projectiles,
        obstacles,
        bonuses,
        explosions,
        events,
    }
}
