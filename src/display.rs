/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// world coordinates into terminal cells and state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{GameState, GameStatus, Rect};
use crate::state::start_button_rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::DarkYellow;
const C_HUD_LEVEL: Color = Color::DarkGreen;
const C_HUD_LIVES: Color = Color::DarkRed;
const C_PLAYER: Color = Color::Black;
const C_TARGET: Color = Color::DarkYellow;
const C_PROJECTILE: Color = Color::DarkRed;
const C_BUTTON: Color = Color::DarkGreen;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the world rectangle onto the terminal's play area.
///
/// Layout: row 0 is the HUD, row 1 and row `rows-2` are the border, the last
/// row holds the controls hint.  Columns 0 and `cols-1` are the side walls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub world_width: f32,
    pub world_height: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, world_width: f32, world_height: f32) -> Self {
        Self { cols, rows, world_width, world_height }
    }

    fn play_cols(&self) -> u16 {
        self.cols.saturating_sub(2).max(1)
    }

    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(4).max(1)
    }

    /// Terminal cell `(col, row)` covering a world point, clamped to the play area.
    pub fn world_to_cell(&self, x: f32, y: f32) -> (u16, u16) {
        let pc = self.play_cols();
        let pr = self.play_rows();
        let cx = (x * pc as f32 / self.world_width).floor().clamp(0.0, (pc - 1) as f32) as u16;
        let cy = (y * pr as f32 / self.world_height).floor().clamp(0.0, (pr - 1) as f32) as u16;
        (1 + cx, 2 + cy)
    }

    /// World point at the centre of a terminal cell, or `None` outside the play area.
    pub fn cell_to_world(&self, col: u16, row: u16) -> Option<(f32, f32)> {
        let pc = self.play_cols();
        let pr = self.play_rows();
        if col < 1 || row < 2 || col > pc || row >= 2 + pr {
            return None;
        }
        let x = ((col - 1) as f32 + 0.5) * self.world_width / pc as f32;
        let y = ((row - 2) as f32 + 0.5) * self.world_height / pr as f32;
        Some((x, y))
    }

    /// Inclusive cell span `(col0, row0, col1, row1)` covered by a world rect.
    pub fn rect_cells(&self, rect: &Rect) -> (u16, u16, u16, u16) {
        let (c0, r0) = self.world_to_cell(rect.left(), rect.top());
        // Nudge the far edge inward so a rect ending on a cell boundary
        // does not spill into the next cell.
        let (c1, r1) = self.world_to_cell(rect.right() - 0.01, rect.bottom() - 0.01);
        (c0, r0, c1.max(c0), r1.max(r0))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  Called every tick, whatever the status.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let (r, g, b) = state.settings.bg_color;
    out.queue(style::SetBackgroundColor(Color::Rgb { r, g, b }))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    for target in &state.fleet.targets {
        draw_target(out, &target.rect, view)?;
    }
    for projectile in &state.projectiles {
        draw_projectile(out, &projectile.rect, view)?;
    }

    draw_player(out, state, view)?;
    draw_controls_hint(out, view)?;

    match state.stats.status {
        GameStatus::Inactive => draw_start_button(out, state, view)?,
        GameStatus::Stunned { .. } => draw_banner(out, view, "  HIT!  ", C_HUD_LIVES)?,
        GameStatus::Active => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let stats = &state.stats;

    // Score and high score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>7}  Hi:{:>7}",
        stats.score, stats.high_score
    )))?;

    // Level — centre
    let level_str = format!("[ LEVEL {} ]", stats.level);
    let lx = (view.cols / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    // Lives — right
    let hearts: String = "♥".repeat(stats.lives as usize);
    let lives_text = format!("Lives: {}", hearts);
    let rx = view
        .cols
        .saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Saucer, two rows when there is room:
    //   _/^\_
    //  (=====)
    let (c0, r0, c1, r1) = view.rect_cells(&state.player.rect);
    let width = (c1 - c0 + 1) as usize;
    out.queue(style::SetForegroundColor(C_PLAYER))?;

    if r1 > r0 {
        out.queue(cursor::MoveTo(c0, r1 - 1))?;
        out.queue(Print(centered("/^\\", width, '_')))?;
    }
    out.queue(cursor::MoveTo(c0, r1))?;
    out.queue(Print(if width >= 3 {
        format!("({})", "=".repeat(width - 2))
    } else {
        "=".repeat(width)
    }))?;
    Ok(())
}

fn draw_target<W: Write>(out: &mut W, rect: &Rect, view: &Viewport) -> std::io::Result<()> {
    let (c0, r0, c1, _) = view.rect_cells(rect);
    let width = (c1 - c0 + 1) as usize;
    out.queue(style::SetForegroundColor(C_TARGET))?;
    out.queue(cursor::MoveTo(c0, r0))?;
    out.queue(Print(centered("★", width, ' ')))?;
    Ok(())
}

fn draw_projectile<W: Write>(out: &mut W, rect: &Rect, view: &Viewport) -> std::io::Result<()> {
    let (col, row) = view.world_to_cell(rect.center_x(), rect.top());
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_PROJECTILE))?;
    out.queue(Print("║"))?;
    Ok(())
}

fn centered(glyph: &str, width: usize, fill: char) -> String {
    let len = glyph.chars().count();
    if width <= len {
        return glyph.chars().take(width.max(1)).collect();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!(
        "{}{}{}",
        fill.to_string().repeat(left),
        glyph,
        fill.to_string().repeat(right)
    )
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   ENTER : Start   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_start_button<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let (c0, r0, c1, r1) = view.rect_cells(&start_button_rect(&state.settings));
    let inner = (c1 - c0).saturating_sub(1).max(5) as usize;

    out.queue(style::SetForegroundColor(C_BUTTON))?;
    out.queue(cursor::MoveTo(c0, r0))?;
    out.queue(Print(format!("╔{}╗", "═".repeat(inner))))?;
    for row in r0 + 1..r1.max(r0 + 2) {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(format!("║{}║", centered("Start", inner, ' '))))?;
    }
    out.queue(cursor::MoveTo(c0, r1.max(r0 + 2)))?;
    out.queue(Print(format!("╚{}╝", "═".repeat(inner))))?;
    Ok(())
}

fn draw_banner<W: Write>(out: &mut W, view: &Viewport, text: &str, color: Color) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, view.rows / 2))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}
