//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only scales world
//! coordinates to terminal cells and translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::entities::{AlienKind, GameState, GameStatus, Laser};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Green;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_SQUID: Color = Color::Magenta;
const C_OCTOPUS: Color = Color::Cyan;
const C_CRAB: Color = Color::Green;
const C_MYSTERY: Color = Color::Red;
const C_OBSTACLE: Color = Color::DarkYellow;
const C_LASER_PLAYER: Color = Color::Cyan;
const C_LASER_ALIEN: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

const HINT: &str = "← → / A D : Move   SPACE : Shoot   Q : Quit";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world units onto the cells inside the border.
///
/// Row 0 is the HUD, rows 1 and `rows - 2` the border, and the last row the
/// controls hint.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    cols: u16,
    rows: u16,
    world_width: f32,
    world_height: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, state: &GameState) -> Self {
        Self {
            cols,
            rows,
            world_width: state.width,
            world_height: state.height,
        }
    }

    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let inner_cols = self.cols.saturating_sub(2);
        let inner_rows = self.rows.saturating_sub(4);
        if inner_cols == 0 || inner_rows == 0 {
            return None;
        }
        let cx = x / self.world_width * f32::from(inner_cols);
        let cy = y / self.world_height * f32::from(inner_rows);
        if cx < 0.0 || cy < 0.0 || cx >= f32::from(inner_cols) || cy >= f32::from(inner_rows) {
            return None;
        }
        Some((1 + cx as u16, 2 + cy as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    out.queue(style::SetForegroundColor(C_OBSTACLE))?;
    for obstacle in &state.obstacles {
        for block in &obstacle.blocks {
            draw_at(out, view, block.position.x, block.position.y, "█")?;
        }
    }

    for alien in &state.aliens {
        let (sprite, color) = match alien.kind {
            AlienKind::Squid => ("{@}", C_SQUID),
            AlienKind::Octopus => ("<O>", C_OCTOPUS),
            AlienKind::Crab => ("/W\\", C_CRAB),
        };
        out.queue(style::SetForegroundColor(color))?;
        draw_at(out, view, alien.position.x, alien.position.y, sprite)?;
    }

    if state.mystery_ship.alive {
        out.queue(style::SetForegroundColor(C_MYSTERY))?;
        let p = state.mystery_ship.position;
        draw_at(out, view, p.x, p.y, "<=o=>")?;
    }

    for laser in &state.spaceship.lasers {
        draw_laser(out, view, laser, C_LASER_PLAYER, "║")?;
    }
    for laser in &state.alien_lasers {
        draw_laser(out, view, laser, C_LASER_ALIEN, "↓")?;
    }

    out.queue(style::SetForegroundColor(C_PLAYER))?;
    let p = state.spaceship.position;
    draw_at(out, view, p.x, p.y, "/▲\\")?;

    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(HINT))?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn draw_at<W: Write>(
    out: &mut W,
    view: &Viewport,
    x: f32,
    y: f32,
    sprite: &str,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(x, y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(sprite))?;
    }
    Ok(())
}

fn draw_laser<W: Write>(
    out: &mut W,
    view: &Viewport,
    laser: &Laser,
    color: Color,
    glyph: &str,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    draw_at(out, view, laser.position.x, laser.position.y, glyph)
}

// ── Border ────────────────────────────────────────────────────────────────────

/// Frame the playfield between the HUD row and the hint row.
fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let top = 1;
    let bottom = view.rows.saturating_sub(2);
    let right = view.cols.saturating_sub(1);
    let rule = "─".repeat(usize::from(right.saturating_sub(1)));

    out.queue(style::SetForegroundColor(C_BORDER))?;
    for row in top..=bottom {
        let line = match row {
            r if r == top => format!("┌{rule}┐"),
            r if r == bottom => format!("└{rule}┘"),
            _ => {
                out.queue(cursor::MoveTo(right, row))?;
                out.queue(Print("│"))?;
                "│".to_string()
            }
        };
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>6}  Hi:{:>6}",
        state.score, state.high_score
    )))?;

    let level_str = format!("LEVEL {:02}", state.level);
    let lx = (view.cols / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    let lives_str = format!("Lives:{}", "♥".repeat(state.lives as usize));
    let rx = view
        .cols
        .saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    let new_best = state.score >= state.high_score && state.score > 0;
    let score_line = format!("Final Score: {:>6}", state.score);
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", state.high_score)
    } else {
        format!("Best Score:  {:>6}", state.high_score)
    };

    let lines: [(&str, Color); 6] = [
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        (best_line.as_str(), if new_best { Color::Yellow } else { Color::DarkGrey }),
        ("ENTER - Play Again  Q - Quit", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
