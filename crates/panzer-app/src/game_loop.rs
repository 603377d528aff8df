//! Fixed-rate game loop: drains input, advances the engine one tick
//! per frame, and renders the snapshot.
//!
//! One engine instance per level; lives and score carry across levels
//! through `SimConfig`. Each level re-seeds from the session seed so a
//! fixed seed replays the whole session.

use std::io::Write;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEventKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use panzer_core::commands::Command;
use panzer_core::constants::PLAYER_LIVES;
use panzer_core::enums::GamePhase;
use panzer_map::MapDescriptor;
use panzer_procgen::LayoutParams;
use panzer_sim::{DifficultyParams, GameEngine, SimConfig};

use crate::input::{map_key, InputAction};
use crate::render;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Player quit mid-session.
    Quit,
    /// Ran out of lives.
    Finished { score: u32, level: u32 },
}

/// Where each level's map comes from.
pub enum Battlefield {
    /// The same hand-authored layout every level.
    Fixed(MapDescriptor),
    /// A fresh generated layout per level, seeded like the engine so a
    /// fixed session seed replays the same fields.
    Generated { width: i32, height: i32 },
}

impl Battlefield {
    fn descriptor_for_level(&self, level: u32, session_seed: u64) -> std::io::Result<MapDescriptor> {
        match self {
            Battlefield::Fixed(descriptor) => Ok(descriptor.clone()),
            Battlefield::Generated { width, height } => {
                let mut rng = ChaCha8Rng::seed_from_u64(session_seed.wrapping_add(u64::from(level)));
                panzer_procgen::generate(*width, *height, &LayoutParams::for_level(level), &mut rng)
                    .map_err(|err| {
                        std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string())
                    })
            }
        }
    }
}

/// Pause between a terminal phase being shown and the loop moving on.
const PHASE_HOLD: Duration = Duration::from_millis(1500);

/// Play levels on one battlefield until game over or quit.
pub fn run_session<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    battlefield: &Battlefield,
    start_level: u32,
    session_seed: u64,
    tick_duration: Duration,
) -> std::io::Result<SessionOutcome> {
    let mut level = start_level.max(1);
    let mut lives = PLAYER_LIVES;
    let mut score = 0;

    loop {
        let descriptor = battlefield.descriptor_for_level(level, session_seed)?;
        let params = DifficultyParams::for_level(level);
        let config = SimConfig {
            seed: session_seed.wrapping_add(u64::from(level)),
            level,
            lives,
            score,
        };
        let mut engine = GameEngine::new(&descriptor, params, config);
        log::info!("level {level} started (seed {})", config.seed);

        match run_level(out, rx, &mut engine, &descriptor, tick_duration)? {
            LevelResult::Quit => return Ok(SessionOutcome::Quit),
            LevelResult::Cleared => {
                lives = engine.lives();
                score = engine.score().score;
                level += 1;
            }
            LevelResult::GameOver => {
                let score = engine.score().score;
                log::info!("game over at level {level} with score {score}");
                return Ok(SessionOutcome::Finished { score, level });
            }
        }
    }
}

enum LevelResult {
    Quit,
    Cleared,
    GameOver,
}

fn run_level<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    engine: &mut GameEngine,
    descriptor: &MapDescriptor,
    tick_duration: Duration,
) -> std::io::Result<LevelResult> {
    let dt_secs = tick_duration.as_secs_f64();
    let mut paused = false;
    let mut last_snapshot = None;

    loop {
        let frame_start = Instant::now();

        // Drain pending input; the latest game command this frame wins.
        let mut command = Command::None;
        while let Ok(event) = rx.try_recv() {
            let Event::Key(key) = event else { continue };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match map_key(&key) {
                Some(InputAction::Quit) => return Ok(LevelResult::Quit),
                Some(InputAction::TogglePause) => paused = !paused,
                Some(InputAction::Game(cmd)) => command = cmd,
                None => {}
            }
        }

        // While paused the engine does not tick; the last frame stays
        // up with the pause overlay.
        if paused {
            if let Some(snapshot) = &last_snapshot {
                render::render(out, snapshot, descriptor.width, descriptor.height, true)?;
            }
            sleep_remainder(frame_start, tick_duration);
            continue;
        }

        let snapshot = engine.advance(dt_secs, command);
        for event in &snapshot.events {
            log::debug!("tick {}: {event:?}", snapshot.time.tick);
        }
        render::render(out, &snapshot, descriptor.width, descriptor.height, false)?;

        let phase = snapshot.phase;
        last_snapshot = Some(snapshot);

        match phase {
            GamePhase::Active => {}
            GamePhase::LevelComplete => {
                std::thread::sleep(PHASE_HOLD);
                return Ok(LevelResult::Cleared);
            }
            GamePhase::GameOver => {
                std::thread::sleep(PHASE_HOLD);
                return Ok(LevelResult::GameOver);
            }
        }

        sleep_remainder(frame_start, tick_duration);
    }
}

fn sleep_remainder(frame_start: Instant, tick_duration: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < tick_duration {
        std::thread::sleep(tick_duration - elapsed);
    }
}
