//! Per-level difficulty parameters.

/// Immutable tuning knobs for one level. Derived once at level load;
/// the engine never mutates them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyParams {
    pub level: u32,
    /// Total enemies this level will field.
    pub enemy_total: u32,
    /// Maximum enemies alive at once.
    pub max_alive: u32,
    /// Ticks between enemy spawns.
    pub spawn_interval_ticks: u64,
    /// Ticks between enemy moves.
    pub enemy_move_period: u32,
    /// Per-tick chance of an unaimed enemy shot.
    pub enemy_fire_chance: f64,
    /// Per-tick chance of a spontaneous enemy turn.
    pub enemy_turn_chance: f64,
    /// Share of spawns using the aggressive policy.
    pub aggressive_weight: f64,
    /// Share of spawns using the defensive policy.
    pub defensive_weight: f64,
    /// Per-tick chance of a bonus spawn attempt.
    pub bonus_spawn_chance: f64,
    /// Ticks a bonus waits before disappearing.
    pub bonus_ttl_ticks: u32,
}

impl DifficultyParams {
    /// Derive the knobs for a 1-based level number.
    pub fn for_level(level: u32) -> Self {
        let level = level.max(1);
        Self {
            level,
            enemy_total: 3 + level,
            max_alive: (2 + level / 2).min(4),
            spawn_interval_ticks: u64::from(60u32.saturating_sub(level * 5).max(20)),
            enemy_move_period: 5u32.saturating_sub(level / 2).max(2),
            enemy_fire_chance: (0.02 + 0.01 * f64::from(level)).min(0.10),
            enemy_turn_chance: 0.15,
            aggressive_weight: (0.2 + 0.1 * f64::from(level)).min(0.7),
            defensive_weight: 0.15,
            bonus_spawn_chance: 0.01,
            bonus_ttl_ticks: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_scales_with_level() {
        let easy = DifficultyParams::for_level(1);
        let hard = DifficultyParams::for_level(8);
        assert!(hard.enemy_total > easy.enemy_total);
        assert!(hard.spawn_interval_ticks < easy.spawn_interval_ticks);
        assert!(hard.enemy_move_period <= easy.enemy_move_period);
        assert!(hard.enemy_fire_chance > easy.enemy_fire_chance);
        assert!(hard.aggressive_weight > easy.aggressive_weight);
    }

    #[test]
    fn test_difficulty_knobs_are_clamped() {
        let extreme = DifficultyParams::for_level(100);
        assert!(extreme.max_alive <= 4);
        assert!(extreme.spawn_interval_ticks >= 20);
        assert!(extreme.enemy_move_period >= 2);
        assert!(extreme.enemy_fire_chance <= 0.10);
        assert!(extreme.aggressive_weight + extreme.defensive_weight < 1.0);
        // Level 0 is treated as level 1.
        assert_eq!(DifficultyParams::for_level(0), DifficultyParams::for_level(1));
    }
}
