//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! round.  No game logic is performed; this module only maps the 800×600
//! world onto terminal cells and translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use arcade_shooter::entities::{Actor, RoundState, Tint, GAME_OVER_TEXT};
use arcade_shooter::particles::ParticleSystem;
use arcade_shooter::textures::{Rgb, Texture, TextureSet};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::White;
const C_PLAYER_HIT: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_GAME_OVER: Color = Color::White;

fn rgb(color: Rgb) -> Color {
    Color::Rgb {
        r: (color >> 16) as u8,
        g: (color >> 8) as u8,
        b: color as u8,
    }
}

// ── World → terminal mapping ─────────────────────────────────────────────────

/// The play area inside the border, in terminal cells, and the world it shows.
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    world_w: f32,
    world_h: f32,
}

impl Viewport {
    /// Row 0 is the HUD, rows 1 and h-2 are the border, row h-1 the hint.
    pub fn new(term_w: u16, term_h: u16, state: &RoundState) -> Self {
        Self {
            cols: term_w.saturating_sub(2).max(1),
            rows: term_h.saturating_sub(4).max(1),
            world_w: state.config.world_width,
            world_h: state.config.world_height,
        }
    }

    fn scale(&self) -> (f32, f32) {
        (
            self.cols as f32 / self.world_w,
            self.rows as f32 / self.world_h,
        )
    }

    /// Terminal cell for a world point, or `None` when it is off-screen.
    pub fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let (sx, sy) = self.scale();
        let col = (x * sx).floor();
        let row = (y * sy).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        // +1 for the left wall, +2 for the HUD row and top border
        Some((col as u16 + 1, row as u16 + 2))
    }

    /// How many cells a texture covers, never less than one.
    fn footprint(&self, texture: &Texture) -> (usize, usize) {
        let (sx, sy) = self.scale();
        (
            ((texture.width as f32 * sx).round() as usize).max(1),
            ((texture.height as f32 * sy).round() as usize).max(1),
        )
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &RoundState,
    textures: &TextureSet,
    particles: &ParticleSystem,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(width, height, state);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, state)?;

    for (_, enemy) in state.enemies.iter() {
        draw_actor(out, &view, enemy, &textures.enemy)?;
    }
    for (_, bullet) in state.bullets.iter() {
        draw_actor(out, &view, bullet, &textures.bullet)?;
    }
    draw_particles(out, &view, particles, &textures.bullet)?;

    let tint = match state.player.tint {
        Tint::Normal => rgb(textures.ship.color),
        Tint::Hit => C_PLAYER_HIT,
    };
    draw_sprite(out, &view, state.player.x, state.player.y, &textures.ship, tint)?;
    draw_controls_hint(out, height)?;

    if state.is_game_over() {
        draw_game_over(out, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &RoundState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(state.score_text()))?;
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn draw_actor<W: Write>(
    out: &mut W,
    view: &Viewport,
    actor: &Actor,
    texture: &Texture,
) -> std::io::Result<()> {
    draw_sprite(out, view, actor.x, actor.y, texture, rgb(texture.color))
}

/// Stamp a texture, downsampled to its cell footprint, centred on (x, y).
fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    x: f32,
    y: f32,
    texture: &Texture,
    color: Color,
) -> std::io::Result<()> {
    let (cols, rows) = view.footprint(texture);
    let grid = texture.downsample(cols, rows);
    let (sx, sy) = view.scale();
    // World-space size of one cell, used to walk the footprint
    let (cell_w, cell_h) = (1.0 / sx, 1.0 / sy);
    let left = x - (cols as f32 - 1.0) * cell_w / 2.0;
    let top = y - (rows as f32 - 1.0) * cell_h / 2.0;

    out.queue(style::SetForegroundColor(color))?;
    for (r, line) in grid.iter().enumerate() {
        for (c, &set) in line.iter().enumerate() {
            if !set {
                continue;
            }
            let wx = left + c as f32 * cell_w;
            let wy = top + r as f32 * cell_h;
            if let Some((col, row)) = view.cell(wx, wy) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print("█"))?;
            }
        }
    }
    Ok(())
}

fn draw_particles<W: Write>(
    out: &mut W,
    view: &Viewport,
    particles: &ParticleSystem,
    texture: &Texture,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(rgb(texture.color)))?;
    for p in particles.particles() {
        if let Some((col, row)) = view.cell(p.x, p.y) {
            // Big sparks first, then embers as they shrink
            let glyph = if particles.scale_of(p) > 0.25 { "*" } else { "·" };
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let lines: Vec<&str> = GAME_OVER_TEXT.lines().collect();
    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetForegroundColor(C_GAME_OVER))?;
    for (i, msg) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
