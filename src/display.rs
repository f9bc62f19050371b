//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands, projecting virtual pixels onto cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use skyfall::entities::{GameState, GameStatus, Tint};
use skyfall::geometry::Rect;

const C_PLAYER: Tint = Tint::Blue;
const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// The terminal grid the canvas is drawn on.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub cols: u16,
    pub rows: u16,
    pub cell_width: f32,
    pub cell_height: f32,
}

fn color_of(tint: Tint) -> Color {
    match tint {
        Tint::Blue => Color::Blue,
        Tint::Red => Color::Red,
        Tint::Yellow => Color::Yellow,
        Tint::Green => Color::Green,
        Tint::Purple => Color::Magenta,
        Tint::Orange => Color::Rgb { r: 255, g: 165, b: 0 },
        Tint::Cyan => Color::Cyan,
        Tint::Gold => Color::Rgb { r: 255, g: 215, b: 0 },
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, screen: &Screen, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    fill_rect(out, screen, &state.player.rect(), C_PLAYER)?;
    for projectile in &state.projectiles {
        fill_rect(out, screen, &projectile.rect(), projectile.tint)?;
    }
    for enemy in &state.enemies {
        fill_rect(out, screen, &enemy.rect(), enemy.tint)?;
    }
    for item in &state.items {
        fill_rect(out, screen, &item.rect(), item.tint)?;
    }

    draw_score(out, state)?;
    draw_controls_hint(out, screen)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, screen)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill_rect<W: Write>(out: &mut W, screen: &Screen, rect: &Rect, tint: Tint) -> std::io::Result<()> {
    let Some(cells) = rect.to_cells(screen.cell_width, screen.cell_height, screen.cols, screen.rows)
    else {
        return Ok(());
    };
    let bar = "█".repeat(cells.cols as usize);
    out.queue(style::SetForegroundColor(color_of(tint)))?;
    for row in cells.row..cells.row + cells.rows {
        out.queue(cursor::MoveTo(cells.col, row))?;
        out.queue(Print(&bar))?;
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_score<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print(format!("Score: {}", state.score)))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, screen: &Screen) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, screen.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, screen: &Screen) -> std::io::Result<()> {
    let cx = screen.cols / 2;
    let cy = screen.rows / 2;
    let lines = [("Game Over", cy.saturating_sub(1)), ("Press Space to Restart", cy + 1)];

    out.queue(style::SetForegroundColor(C_TEXT))?;
    for (msg, row) in lines {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}
