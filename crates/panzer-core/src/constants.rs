//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz). The console loop runs one tick per frame.
pub const TICK_RATE: u32 = 10;

/// Seconds per tick at the default tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Player tank ---

/// Starting lives.
pub const PLAYER_LIVES: u32 = 3;

/// Hit points per life.
pub const PLAYER_HP: i32 = 3;

/// Ticks between player shots.
pub const PLAYER_RELOAD_TICKS: u32 = 6;

/// Ticks between player moves.
pub const PLAYER_MOVE_PERIOD: u32 = 2;

/// Grace shield duration after a respawn (ticks).
pub const RESPAWN_SHIELD_TICKS: u32 = 30;

// --- Enemy tanks ---

/// Enemy hit points.
pub const ENEMY_HP: i32 = 1;

/// Ticks between enemy shots.
pub const ENEMY_RELOAD_TICKS: u32 = 10;

/// Minimum manhattan distance from the player for an enemy spawn.
pub const ENEMY_SPAWN_MIN_PLAYER_DIST: i32 = 4;

// --- Bonuses ---

/// Duration of timed bonus effects (ticks).
pub const BONUS_EFFECT_TICKS: u32 = 150;

/// Reload period while rapid fire is active.
pub const RAPID_FIRE_RELOAD_TICKS: u32 = 3;

/// Move period while speed boost is active.
pub const SPEED_BOOST_MOVE_PERIOD: u32 = 1;

// --- Explosions ---

/// Ticks an explosion stays on screen.
pub const EXPLOSION_TICKS: u32 = 3;

// --- Spawning ---

/// Placement attempts per spawn before skipping to the next tick.
pub const SPAWN_ATTEMPT_BUDGET: u32 = 16;

// --- Scoring ---

/// Points for destroying an enemy tank.
pub const SCORE_ENEMY_DESTROYED: u32 = 100;

/// Points for collecting a bonus.
pub const SCORE_BONUS_COLLECTED: u32 = 50;

/// Points for clearing a level.
pub const SCORE_LEVEL_CLEARED: u32 = 250;

// --- Display ---

/// Ticks the damage flash stays active after the player is hit.
pub const DAMAGE_FLASH_TICKS: u32 = 3;
