//! Per-behavior decision logic.

use rand::Rng;

use panzer_core::enums::{AiBehavior, Direction};
use panzer_core::types::Point;

/// Distance at which a defensive tank starts backing off.
const DEFENSIVE_RETREAT_RANGE: i32 = 5;

/// Input to the policy for a single enemy tank.
#[derive(Debug, Clone, Copy)]
pub struct AiContext {
    pub behavior: AiBehavior,
    pub position: Point,
    pub facing: Direction,
    /// Player tank position, if one is alive.
    pub player: Option<Point>,
    /// Direction giving an axis-aligned, unobstructed shot at the
    /// player, computed by the simulation from the obstacle grid.
    pub clear_shot: Option<Direction>,
    /// Per-tick probability of an unaimed shot.
    pub fire_chance: f64,
    /// Per-tick probability of a spontaneous turn.
    pub turn_chance: f64,
}

/// Output of the policy. The simulation validates the move against
/// the same accessibility rules as player commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AiDecision {
    /// Face this direction before anything else.
    pub turn: Option<Direction>,
    /// Try to advance one cell in the (possibly new) facing.
    pub advance: bool,
    /// Fire this tick, cooldown permitting.
    pub fire: bool,
}

/// Compute this tick's action for one enemy tank.
pub fn decide(ctx: &AiContext, rng: &mut impl Rng) -> AiDecision {
    match ctx.behavior {
        AiBehavior::Random => decide_random(ctx, rng),
        AiBehavior::Aggressive => decide_aggressive(ctx, rng),
        AiBehavior::Defensive => decide_defensive(ctx, rng),
    }
}

fn decide_random(ctx: &AiContext, rng: &mut impl Rng) -> AiDecision {
    let turn = if rng.gen_bool(ctx.turn_chance) {
        Some(random_direction(rng))
    } else {
        None
    };
    AiDecision {
        turn,
        advance: true,
        fire: rng.gen_bool(ctx.fire_chance),
    }
}

fn decide_aggressive(ctx: &AiContext, rng: &mut impl Rng) -> AiDecision {
    // A clear shot beats everything: stop, aim, fire.
    if let Some(dir) = ctx.clear_shot {
        return AiDecision {
            turn: Some(dir),
            advance: false,
            fire: true,
        };
    }

    let Some(player) = ctx.player else {
        return decide_random(ctx, rng);
    };

    let toward = direction_toward(ctx.position, player);
    AiDecision {
        turn: Some(toward),
        advance: true,
        fire: rng.gen_bool(ctx.fire_chance),
    }
}

fn decide_defensive(ctx: &AiContext, rng: &mut impl Rng) -> AiDecision {
    let Some(player) = ctx.player else {
        return decide_random(ctx, rng);
    };

    // Fire from standoff range when a lane is open.
    if let Some(dir) = ctx.clear_shot {
        if ctx.position.manhattan_distance(player) >= DEFENSIVE_RETREAT_RANGE {
            return AiDecision {
                turn: Some(dir),
                advance: false,
                fire: true,
            };
        }
    }

    if ctx.position.manhattan_distance(player) < DEFENSIVE_RETREAT_RANGE {
        let away = direction_toward(ctx.position, player).opposite();
        return AiDecision {
            turn: Some(away),
            advance: true,
            fire: rng.gen_bool(ctx.fire_chance),
        };
    }

    decide_random(ctx, rng)
}

/// Direction that closes the larger axis gap toward `target`.
fn direction_toward(from: Point, target: Point) -> Direction {
    let dx = target.x - from.x;
    let dy = target.y - from.y;
    if dx.abs() >= dy.abs() {
        if dx >= 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy >= 0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

fn random_direction(rng: &mut impl Rng) -> Direction {
    Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
}
