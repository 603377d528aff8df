//! Console tank battle — terminal entry point.
//!
//! Owns terminal setup/teardown and the menu; the per-level loop lives
//! in `game_loop`. A dedicated thread blocks on terminal events and
//! feeds them through a channel so the game loop never waits on I/O.

mod game_loop;
mod input;
mod render;
mod scores;
mod settings;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};

use panzer_map::{builtin_maps, MapDescriptor};

use game_loop::{Battlefield, SessionOutcome};
use scores::HighScores;
use settings::Settings;

// Generated battlefields share the built-in maps' dimensions.
const GENERATED_WIDTH: i32 = 24;
const GENERATED_HEIGHT: i32 = 14;

fn main() -> std::io::Result<()> {
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let settings = settings::load();
    let mut high_scores = scores::load();
    let maps = available_maps(&settings);
    let tick_duration = Duration::from_millis(settings.tick_millis.max(10));
    let mut start_level: u32 = 1;

    loop {
        let battlefield = match show_menu(out, rx, &maps, &high_scores, start_level)? {
            MenuResult::Quit => break,
            MenuResult::CycleLevel => {
                start_level = if start_level >= 5 { 1 } else { start_level + 1 };
                continue;
            }
            MenuResult::Start(index) => Battlefield::Fixed(maps[index].1.clone()),
            MenuResult::StartGenerated => Battlefield::Generated {
                width: GENERATED_WIDTH,
                height: GENERATED_HEIGHT,
            },
        };

        let seed = settings.seed.unwrap_or_else(rand::random);
        let outcome =
            game_loop::run_session(out, rx, &battlefield, start_level, seed, tick_duration)?;
        if let SessionOutcome::Finished { score, level } = outcome {
            high_scores.record(score, level);
            scores::save(&high_scores);
            if show_results(out, rx, score, &high_scores)? {
                break;
            }
        }
    }
    Ok(())
}

/// Built-in maps plus any valid `.map` files from the settings
/// directory. Invalid files are skipped with a warning.
fn available_maps(settings: &Settings) -> Vec<(String, MapDescriptor)> {
    let mut maps: Vec<(String, MapDescriptor)> = Vec::new();
    for builtin in builtin_maps() {
        match builtin.descriptor() {
            Ok(descriptor) => maps.push((builtin.name.to_string(), descriptor)),
            Err(err) => log::warn!("built-in map {} failed to parse: {err}", builtin.name),
        }
    }

    let Some(dir) = &settings.maps_dir else {
        return maps;
    };
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("cannot read maps directory {}: {err}", dir.display());
            return maps;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().map(|e| e != "map").unwrap_or(true) {
            continue;
        }
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());
        match std::fs::read_to_string(&path) {
            Ok(text) => match MapDescriptor::parse(&text) {
                Ok(descriptor) => maps.push((name, descriptor)),
                Err(err) => log::warn!("skipping {}: {err}", path.display()),
            },
            Err(err) => log::warn!("skipping {}: {err}", path.display()),
        }
    }
    maps
}

enum MenuResult {
    Start(usize),
    StartGenerated,
    CycleLevel,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    maps: &[(String, MapDescriptor)],
    high_scores: &HighScores,
    start_level: u32,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    out.queue(cursor::MoveTo(4, 1))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print("P A N Z E R"))?;

    if high_scores.best() > 0 {
        out.queue(cursor::MoveTo(4, 2))?;
        out.queue(style::SetForegroundColor(Color::DarkYellow))?;
        out.queue(Print(format!("best score: {}", high_scores.best())))?;
    }

    out.queue(cursor::MoveTo(4, 4))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Pick a battlefield:"))?;
    for (i, (name, descriptor)) in maps.iter().enumerate().take(9) {
        out.queue(cursor::MoveTo(6, 5 + i as u16))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", i + 1)))?;
        out.queue(style::SetForegroundColor(Color::Green))?;
        out.queue(Print(format!(
            "{name:<12} {}x{}",
            descriptor.width, descriptor.height
        )))?;
    }

    let below = 6 + maps.len().min(9) as u16;
    out.queue(cursor::MoveTo(6, below - 1))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("[R] "))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print("random       new layout every level"))?;
    out.queue(cursor::MoveTo(4, below + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(format!("[L] starting level: {start_level}")))?;
    out.queue(cursor::MoveTo(4, below + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("1-9 play   R random   L level   Q quit"))?;
    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        let event = match rx.recv() {
            Ok(event) => event,
            Err(_) => return Ok(MenuResult::Quit),
        };
        let Event::Key(KeyEvent { code, kind, .. }) = event else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }
        match code {
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                if index < maps.len() {
                    return Ok(MenuResult::Start(index));
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => return Ok(MenuResult::StartGenerated),
            KeyCode::Char('l') | KeyCode::Char('L') => return Ok(MenuResult::CycleLevel),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(MenuResult::Quit),
            _ => {}
        }
    }
}

/// Show the end-of-session score table. Returns `true` to quit the
/// program, `false` to go back to the menu.
fn show_results<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    score: u32,
    high_scores: &HighScores,
) -> std::io::Result<bool> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    out.queue(cursor::MoveTo(4, 1))?;
    out.queue(style::SetForegroundColor(Color::Red))?;
    out.queue(Print("GAME OVER"))?;
    out.queue(cursor::MoveTo(4, 3))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(format!("your score: {score}")))?;

    out.queue(cursor::MoveTo(4, 5))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("High scores:"))?;
    for (i, entry) in high_scores.entries.iter().enumerate() {
        out.queue(cursor::MoveTo(6, 6 + i as u16))?;
        out.queue(style::SetForegroundColor(Color::Green))?;
        out.queue(Print(format!(
            "{:>2}. {:>6}  level {}",
            i + 1,
            entry.score,
            entry.level
        )))?;
    }

    out.queue(cursor::MoveTo(4, 18))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("any key: menu   Q: quit"))?;
    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        let event = match rx.recv() {
            Ok(event) => event,
            Err(_) => return Ok(true),
        };
        let Event::Key(KeyEvent { code, kind, .. }) = event else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }
        return Ok(matches!(
            code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ));
    }
}
