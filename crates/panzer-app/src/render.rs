//! Rendering layer — all terminal drawing lives here.
//!
//! Each function receives a mutable writer and an immutable snapshot.
//! No game logic is performed; this module only translates snapshot
//! state into terminal commands. Forest cells are drawn after tanks so
//! tanks under cover stay hidden.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use panzer_core::enums::{BonusKind, Direction, GamePhase, ObstacleKind, TankKind};
use panzer_core::state::GameStateSnapshot;
use panzer_core::types::Point;

// Field offset inside the terminal: one border column/row plus a HUD line.
const FIELD_X: u16 = 1;
const FIELD_Y: u16 = 2;

const C_BORDER: Color = Color::DarkBlue;
const C_BORDER_FLASH: Color = Color::Red;
const C_HUD: Color = Color::Yellow;
const C_PLAYER: Color = Color::Cyan;
const C_PLAYER_SHIELDED: Color = Color::White;
const C_ENEMY: Color = Color::Red;
const C_BRICK: Color = Color::DarkYellow;
const C_STEEL: Color = Color::Grey;
const C_WATER: Color = Color::Blue;
const C_FOREST: Color = Color::Green;
const C_PROJECTILE: Color = Color::White;
const C_EXPLOSION: Color = Color::Yellow;
const C_BONUS: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    snapshot: &GameStateSnapshot,
    width: i32,
    height: i32,
    paused: bool,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height, snapshot.damage_flash)?;
    draw_hud(out, snapshot, width)?;

    for obstacle in &snapshot.obstacles {
        let (glyph, color) = match obstacle.kind {
            ObstacleKind::Brick => ('#', C_BRICK),
            ObstacleKind::Steel => ('X', C_STEEL),
            ObstacleKind::Water => ('~', C_WATER),
            // Drawn after tanks, as cover.
            ObstacleKind::Forest => continue,
        };
        draw_cell(out, obstacle.position, glyph, color)?;
    }

    for bonus in &snapshot.bonuses {
        let glyph = match bonus.kind {
            BonusKind::Shield => 'S',
            BonusKind::RapidFire => 'R',
            BonusKind::SpeedBoost => 'F',
            BonusKind::ExtraLife => 'L',
        };
        draw_cell(out, bonus.position, glyph, C_BONUS)?;
    }

    for explosion in &snapshot.explosions {
        draw_cell(out, explosion.position, 'O', C_EXPLOSION)?;
    }

    for projectile in &snapshot.projectiles {
        let glyph = match projectile.facing {
            Direction::Up | Direction::Down => '|',
            Direction::Left | Direction::Right => '-',
        };
        draw_cell(out, projectile.position, glyph, C_PROJECTILE)?;
    }

    for tank in &snapshot.tanks {
        let (glyph, color) = match tank.kind {
            TankKind::Player => (
                facing_glyph(tank.facing),
                if tank.shielded {
                    C_PLAYER_SHIELDED
                } else {
                    C_PLAYER
                },
            ),
            TankKind::Enemy => ('A', C_ENEMY),
        };
        draw_cell(out, tank.position, glyph, color)?;
    }

    // Forest goes on top: tanks underneath are hidden.
    for obstacle in &snapshot.obstacles {
        if obstacle.kind == ObstacleKind::Forest {
            draw_cell(out, obstacle.position, '*', C_FOREST)?;
        }
    }

    if paused {
        draw_centered(out, width, height, "P A U S E D", Color::Yellow)?;
    } else {
        match snapshot.phase {
            GamePhase::LevelComplete => {
                draw_centered(out, width, height, "LEVEL CLEARED", Color::Green)?
            }
            GamePhase::GameOver => draw_centered(out, width, height, "GAME OVER", Color::Red)?,
            GamePhase::Active => {}
        }
    }

    draw_hint(out, height)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, FIELD_Y + height as u16 + 2))?;
    out.flush()?;
    Ok(())
}

fn facing_glyph(facing: Direction) -> char {
    match facing {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

fn draw_cell<W: Write>(out: &mut W, p: Point, glyph: char, color: Color) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(FIELD_X + p.x as u16, FIELD_Y + p.y as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, width: i32, height: i32, flash: bool) -> std::io::Result<()> {
    let color = if flash { C_BORDER_FLASH } else { C_BORDER };
    out.queue(style::SetForegroundColor(color))?;

    let w = width as usize;
    out.queue(cursor::MoveTo(FIELD_X - 1, FIELD_Y - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;
    for y in 0..height as u16 {
        out.queue(cursor::MoveTo(FIELD_X - 1, FIELD_Y + y))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(FIELD_X + width as u16, FIELD_Y + y))?;
        out.queue(Print("│"))?;
    }
    out.queue(cursor::MoveTo(FIELD_X - 1, FIELD_Y + height as u16))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;
    Ok(())
}

fn draw_hud<W: Write>(
    out: &mut W,
    snapshot: &GameStateSnapshot,
    width: i32,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(FIELD_X - 1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    let hud = format!(
        "LEVEL {:<2}  SCORE {:<6}  LIVES {}",
        snapshot.level, snapshot.score, snapshot.lives
    );
    let w = width as usize + 2;
    out.queue(Print(format!("{hud:<w$}")))?;
    Ok(())
}

fn draw_centered<W: Write>(
    out: &mut W,
    width: i32,
    height: i32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let x = FIELD_X + (width as u16).saturating_sub(text.chars().count() as u16) / 2;
    let y = FIELD_Y + height as u16 / 2;
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_hint<W: Write>(out: &mut W, height: i32) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, FIELD_Y + height as u16 + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("arrows/WASD move   SPACE fire   P pause   Q quit"))?;
    Ok(())
}
