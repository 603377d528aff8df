use rand::rngs::StdRng;
use rand::SeedableRng;

use panzer_core::enums::{AiBehavior, Direction};
use panzer_core::types::Point;

use crate::policy::{decide, AiContext};

fn ctx(behavior: AiBehavior) -> AiContext {
    AiContext {
        behavior,
        position: Point::new(10, 10),
        facing: Direction::Down,
        player: Some(Point::new(10, 20)),
        clear_shot: None,
        fire_chance: 0.0,
        turn_chance: 0.0,
    }
}

#[test]
fn test_aggressive_closes_on_player() {
    let mut rng = StdRng::seed_from_u64(1);
    let decision = decide(&ctx(AiBehavior::Aggressive), &mut rng);
    assert_eq!(decision.turn, Some(Direction::Down));
    assert!(decision.advance);

    let mut c = ctx(AiBehavior::Aggressive);
    c.player = Some(Point::new(2, 10));
    let decision = decide(&c, &mut rng);
    assert_eq!(decision.turn, Some(Direction::Left));
}

#[test]
fn test_aggressive_stops_and_fires_on_clear_shot() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut c = ctx(AiBehavior::Aggressive);
    c.clear_shot = Some(Direction::Down);
    let decision = decide(&c, &mut rng);
    assert_eq!(decision.turn, Some(Direction::Down));
    assert!(!decision.advance);
    assert!(decision.fire);
}

#[test]
fn test_defensive_retreats_when_player_close() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut c = ctx(AiBehavior::Defensive);
    c.player = Some(Point::new(10, 12));
    let decision = decide(&c, &mut rng);
    assert_eq!(decision.turn, Some(Direction::Up));
    assert!(decision.advance);
}

#[test]
fn test_defensive_fires_from_standoff_range() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut c = ctx(AiBehavior::Defensive);
    c.clear_shot = Some(Direction::Down);
    // Player is 10 cells away: far enough to hold ground and shoot.
    let decision = decide(&c, &mut rng);
    assert!(decision.fire);
    assert!(!decision.advance);
}

#[test]
fn test_defensive_close_clear_shot_still_retreats() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut c = ctx(AiBehavior::Defensive);
    c.player = Some(Point::new(10, 12));
    c.clear_shot = Some(Direction::Down);
    let decision = decide(&c, &mut rng);
    assert_eq!(decision.turn, Some(Direction::Up));
}

#[test]
fn test_random_is_deterministic_per_seed() {
    let mut c = ctx(AiBehavior::Random);
    c.fire_chance = 0.5;
    c.turn_chance = 0.5;

    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..32).map(|_| decide(&c, &mut rng)).collect::<Vec<_>>()
    };
    assert_eq!(run(7), run(7));
    assert_ne!(run(7), run(8));
}

#[test]
fn test_random_zero_chances_never_turns_or_fires() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..64 {
        let decision = decide(&ctx(AiBehavior::Random), &mut rng);
        assert_eq!(decision.turn, None);
        assert!(!decision.fire);
        assert!(decision.advance);
    }
}
