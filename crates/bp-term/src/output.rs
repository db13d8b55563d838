// SPDX-License-Identifier: MIT
//
// Frame assembly: where the bytes collect and which of them get written.
//
//   OutputBuffer — an in-memory sink for a whole frame, handed to the
//   terminal with one write() so a half-drawn picture is never visible.
//
//   GlyphWriter — tracks the foreground and background the terminal is
//   currently set to and skips redundant SGR sequences. A row of identical
//   pixels costs one color escape followed by nothing but glyph bytes.

use std::io::{self, Write};

use crate::ansi;
use crate::color::Color;

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// A byte buffer that accumulates ANSI output for a single `write()`.
///
/// Default capacity: 16 KB — enough for a typical 80×24 frame without
/// reallocation. The buffer keeps its capacity across frames.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

impl OutputBuffer {
    /// Empty buffer, pre-sized for a typical frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Bytes collected since the last clear or flush.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append a character as UTF-8.
    pub fn write_char(&mut self, ch: char) {
        let mut enc = [0u8; 4];
        self.buf.extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
    }

    /// Drop the collected bytes; capacity is kept for the next frame.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to `w` in one call and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to or flushing `w` fails. The buffer is
    /// left intact in that case so the caller may retry.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Intentionally a no-op. Real flushing via flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── GlyphWriter ─────────────────────────────────────────────────────────────

/// Stateful glyph renderer that tracks terminal colors to skip redundant
/// escapes.
///
/// `None` in a `last_` field means "unknown": nothing has been emitted since
/// the last SGR 0, so the next glyph must set its colors explicitly.
#[allow(clippy::struct_field_names)] // The `last_` prefix IS the semantic grouping.
pub struct GlyphWriter {
    last_fg: Option<Option<Color>>,
    last_bg: Option<Option<Color>>,
    color_sequences: usize,
}

impl GlyphWriter {
    /// Create a writer with no tracked state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
            color_sequences: 0,
        }
    }

    /// Forget the tracked colors. Call after emitting SGR 0.
    pub const fn reset_state(&mut self) {
        self.last_fg = None;
        self.last_bg = None;
    }

    /// Number of color-setting sequences emitted so far.
    #[inline]
    #[must_use]
    pub const fn color_sequences(&self) -> usize {
        self.color_sequences
    }

    /// Emit a full block: both pixels of the cell are `color`.
    ///
    /// Only the foreground matters for a full block, so the background is
    /// left as whatever it was.
    pub fn full(&mut self, out: &mut OutputBuffer, color: Option<Color>) {
        self.set_fg(out, color);
        out.write_char(ansi::FULL_BLOCK);
    }

    /// Emit an upper-half block: `upper` as foreground, `lower` as background.
    pub fn split(&mut self, out: &mut OutputBuffer, upper: Option<Color>, lower: Option<Color>) {
        self.set_fg(out, upper);
        self.set_bg(out, lower);
        out.write_char(ansi::UPPER_HALF);
    }

    /// End the current row: SGR 0, which invalidates all tracked state.
    pub fn end_row(&mut self, out: &mut OutputBuffer) {
        ansi::reset(out).ok();
        self.reset_state();
    }

    fn set_fg(&mut self, out: &mut OutputBuffer, color: Option<Color>) {
        if self.last_fg != Some(color) {
            ansi::fg(out, color).ok();
            self.last_fg = Some(color);
            self.color_sequences += 1;
        }
    }

    fn set_bg(&mut self, out: &mut OutputBuffer, color: Option<Color>) {
        if self.last_bg != Some(color) {
            ansi::bg(out, color).ok();
            self.last_bg = Some(color);
            self.color_sequences += 1;
        }
    }
}

impl Default for GlyphWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
