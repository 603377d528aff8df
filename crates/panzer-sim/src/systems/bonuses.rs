//! Bonus pickup system.
//!
//! Only the player collects bonuses; enemies drive straight over them.
//! Pickup applies the effect immediately and deactivates the bonus,
//! which the sweep then removes.

use hecs::{Entity, World};

use panzer_core::components::{Bonus, BonusEffects, Health, Player};
use panzer_core::constants::{BONUS_EFFECT_TICKS, SCORE_BONUS_COLLECTED};
use panzer_core::enums::BonusKind;
use panzer_core::events::GameEvent;
use panzer_core::types::Point;

use crate::engine::ScoreState;

pub fn run(world: &mut World, score: &mut ScoreState, events: &mut Vec<GameEvent>) {
    let Some((player_entity, player_pos)) = world
        .query::<(&Player, &Health, &Point)>()
        .iter()
        .find(|(_, (_, health, _))| !health.is_dead())
        .map(|(entity, (_, _, pos))| (entity, *pos))
    else {
        return;
    };

    let collected: Vec<(Entity, BonusKind)> = world
        .query::<(&Bonus, &Point)>()
        .iter()
        .filter(|(_, (bonus, pos))| bonus.active && **pos == player_pos)
        .map(|(entity, (bonus, _))| (entity, bonus.kind))
        .collect();

    for (entity, kind) in collected {
        if let Ok(mut bonus) = world.get::<&mut Bonus>(entity) {
            bonus.active = false;
        }
        apply_effect(world, player_entity, kind);
        score.score += SCORE_BONUS_COLLECTED;
        score.bonuses_collected += 1;
        events.push(GameEvent::BonusCollected {
            kind,
            points: SCORE_BONUS_COLLECTED,
        });
    }
}

fn apply_effect(world: &World, player: Entity, kind: BonusKind) {
    match kind {
        BonusKind::ExtraLife => {
            if let Ok(mut p) = world.get::<&mut Player>(player) {
                p.lives += 1;
            }
        }
        BonusKind::Shield => {
            if let Ok(mut effects) = world.get::<&mut BonusEffects>(player) {
                effects.shield = BONUS_EFFECT_TICKS;
            }
        }
        BonusKind::RapidFire => {
            if let Ok(mut effects) = world.get::<&mut BonusEffects>(player) {
                effects.rapid_fire = BONUS_EFFECT_TICKS;
            }
        }
        BonusKind::SpeedBoost => {
            if let Ok(mut effects) = world.get::<&mut BonusEffects>(player) {
                effects.speed_boost = BONUS_EFFECT_TICKS;
            }
        }
    }
}
