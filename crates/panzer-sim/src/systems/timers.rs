//! Timer system: decrements every per-entity tick counter.
//!
//! Runs first so that a cooldown set this tick is not consumed until
//! the next one. A bonus whose TTL reaches zero is deactivated here
//! and removed by the sweep.

use hecs::World;

use panzer_core::components::{Bonus, BonusEffects, Enemy, Explosion, FireControl, Player};

pub fn run(world: &mut World) {
    for (_entity, fire) in world.query_mut::<&mut FireControl>() {
        fire.cooldown = fire.cooldown.saturating_sub(1);
    }

    for (_entity, player) in world.query_mut::<&mut Player>() {
        player.move_cooldown = player.move_cooldown.saturating_sub(1);
    }

    for (_entity, enemy) in world.query_mut::<&mut Enemy>() {
        enemy.move_cooldown = enemy.move_cooldown.saturating_sub(1);
    }

    for (_entity, effects) in world.query_mut::<&mut BonusEffects>() {
        effects.shield = effects.shield.saturating_sub(1);
        effects.rapid_fire = effects.rapid_fire.saturating_sub(1);
        effects.speed_boost = effects.speed_boost.saturating_sub(1);
    }

    for (_entity, bonus) in world.query_mut::<&mut Bonus>() {
        if bonus.active {
            bonus.ttl = bonus.ttl.saturating_sub(1);
            if bonus.ttl == 0 {
                bonus.active = false;
            }
        }
    }

    for (_entity, explosion) in world.query_mut::<&mut Explosion>() {
        explosion.remaining = explosion.remaining.saturating_sub(1);
    }
}
