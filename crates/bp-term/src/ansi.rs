// SPDX-License-Identifier: MIT
//
// Escape sequences and glyphs for the half-block renderer.
//
// Stateless writers over `impl Write`. Deciding when a color change is
// actually needed belongs to `GlyphWriter`; this file only spells out bytes.
//
// Positions are 0-based here and become 1-based on the wire.

use std::io::{self, Write};

use crate::color::Color;

// ─── Glyphs ──────────────────────────────────────────────────────────────────

/// U+2588 FULL BLOCK — both pixels of a cell share one color (drawn as fg).
pub const FULL_BLOCK: char = '\u{2588}';

/// U+2580 UPPER HALF BLOCK — fg paints the upper pixel, bg the lower one.
pub const UPPER_HALF: char = '\u{2580}';

/// U+2584 LOWER HALF BLOCK. Reserved: the renderer never needs it, since
/// swapping fg/bg on [`UPPER_HALF`] covers the same cell states.
pub const LOWER_HALF: char = '\u{2584}';

/// SGR code restoring the terminal's default foreground.
pub const DEFAULT_FG: u8 = 39;

/// SGR code restoring the terminal's default background.
pub const DEFAULT_BG: u8 = 49;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// CUP: put the cursor on column `x`, screen row `y` (both 0-based).
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Reset all SGR attributes to terminal defaults (SGR 0).
///
/// The stateful writer must invalidate its tracked colors after calling this.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Colors ──────────────────────────────────────────────────────────────────

/// Set the foreground color.
///
/// `None` never comes out of a well-formed framebuffer; it falls back to the
/// terminal default (SGR 39) instead of failing.
pub fn fg(w: &mut impl Write, color: Option<Color>) -> io::Result<()> {
    let code = color.map_or(DEFAULT_FG, Color::fg_code);
    write!(w, "\x1b[{code}m")
}

/// Set the background color. Same fallback as [`fg`], with SGR 49.
pub fn bg(w: &mut impl Write, color: Option<Color>) -> io::Result<()> {
    let code = color.map_or(DEFAULT_BG, Color::bg_code);
    write!(w, "\x1b[{code}m")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
