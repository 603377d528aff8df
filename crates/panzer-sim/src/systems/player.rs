//! Player command system: applies the tick's command to the player
//! tank.
//!
//! Move commands always turn the tank; the one-cell advance only
//! happens when the move cooldown has expired and the target cell is
//! accessible. Blocked moves and fires during reload are dropped
//! silently.

use hecs::World;

use panzer_core::commands::Command;
use panzer_core::components::{BonusEffects, Facing, FireControl, Health, Player};
use panzer_core::constants::{
    PLAYER_MOVE_PERIOD, PLAYER_RELOAD_TICKS, RAPID_FIRE_RELOAD_TICKS, SPEED_BOOST_MOVE_PERIOD,
};
use panzer_core::enums::{Direction, MoverKind};
use panzer_core::events::GameEvent;
use panzer_core::types::Point;

use crate::access;
use crate::grid::ObstacleGrid;
use crate::world_setup;

pub fn run(
    world: &mut World,
    grid: &ObstacleGrid,
    command: Command,
    player_number: u32,
    events: &mut Vec<GameEvent>,
) {
    let direction = match command {
        Command::MoveUp => Some(Direction::Up),
        Command::MoveDown => Some(Direction::Down),
        Command::MoveLeft => Some(Direction::Left),
        Command::MoveRight => Some(Direction::Right),
        Command::Fire | Command::None => None,
    };

    let Some((entity, position, effects)) = world
        .query::<(&Player, &Point, &Health, &BonusEffects)>()
        .iter()
        .find(|(_, (_, _, health, _))| !health.is_dead())
        .map(|(entity, (_, pos, _, effects))| (entity, *pos, *effects))
    else {
        return;
    };

    if let Some(dir) = direction {
        if let Ok(mut facing) = world.get::<&mut Facing>(entity) {
            facing.0 = dir;
        }
        let can_move = world
            .get::<&Player>(entity)
            .map(|p| p.move_cooldown == 0)
            .unwrap_or(false);
        let target = position.translated(dir);
        if can_move && access::is_position_accessible(world, grid, target, MoverKind::Tank) {
            if let Ok(mut pos) = world.get::<&mut Point>(entity) {
                *pos = target;
            }
            let period = if effects.speed_boost > 0 {
                SPEED_BOOST_MOVE_PERIOD
            } else {
                PLAYER_MOVE_PERIOD
            };
            if let Ok(mut player) = world.get::<&mut Player>(entity) {
                player.move_cooldown = period;
            }
        }
        return;
    }

    if command == Command::Fire {
        let ready = world
            .get::<&FireControl>(entity)
            .map(|f| f.cooldown == 0)
            .unwrap_or(false);
        if !ready {
            return;
        }
        let facing = world.get::<&Facing>(entity).map(|f| f.0).unwrap_or_default();
        let reload = if effects.rapid_fire > 0 {
            RAPID_FIRE_RELOAD_TICKS
        } else {
            PLAYER_RELOAD_TICKS
        };
        if let Ok(mut fire) = world.get::<&mut FireControl>(entity) {
            fire.cooldown = reload;
        }
        world_setup::spawn_projectile(world, position, facing, Some(player_number));
        events.push(GameEvent::ProjectileFired { by_player: true });
    }
}
