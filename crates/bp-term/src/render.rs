// SPDX-License-Identifier: MIT
//
// Half-block renderer — framebuffer pixels to terminal bytes.
//
// Each character cell shows two pixels: the upper one (higher y) and the
// lower one (lower y). A cell whose pixels agree is a full block in that
// color; a cell whose pixels differ is an upper-half block with the upper
// pixel as foreground and the lower pixel as background.
//
// The pipeline per frame:
//
//   1. Hide the cursor.
//   2. For each character row, top of the picture first (screen row 0 is
//      the top, pixel y = 0 is the bottom): move the cursor to column 0,
//      emit the row's glyphs through the GlyphWriter, end with SGR 0.
//   3. Show the cursor again.
//   4. flush_to() hands the whole frame to the terminal in one write.
//
// The GlyphWriter suppresses SGR codes that would not change anything, so
// the byte count scales with color changes, not with cells.

use std::io::{self, Write};

use tracing::trace;

use crate::ansi;
use crate::buffer::Framebuffer;
use crate::output::{GlyphWriter, OutputBuffer};

// ─── RenderStats ─────────────────────────────────────────────────────────────

/// Statistics from a render pass, for profiling and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Glyphs emitted (= character cells).
    pub glyphs: usize,
    /// Foreground/background SGR sequences emitted.
    pub color_sequences: usize,
    /// Total bytes of ANSI output generated.
    pub bytes: usize,
}

// ─── Renderer ────────────────────────────────────────────────────────────────

/// Full-frame half-block renderer.
///
/// # Usage
///
/// ```
/// use bp_term::buffer::Framebuffer;
/// use bp_term::color::Color;
/// use bp_term::render::Renderer;
///
/// let mut fb = Framebuffer::new(4, 4, Color::Black).unwrap();
/// fb.plot(0, 0, Color::Red);
///
/// let mut renderer = Renderer::new();
/// let stats = renderer.render(&fb);
/// assert_eq!(stats.glyphs, 8);
///
/// let mut terminal = Vec::new();
/// renderer.flush_to(&mut terminal).unwrap();
/// assert_eq!(terminal.len(), stats.bytes);
/// ```
pub struct Renderer {
    out: OutputBuffer,
}

impl Renderer {
    /// Create a renderer with an empty output buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: OutputBuffer::new(),
        }
    }

    /// Assemble a complete frame for `fb` into the output buffer.
    ///
    /// Any unflushed output from a previous call is discarded.
    pub fn render(&mut self, fb: &Framebuffer) -> RenderStats {
        self.out.clear();
        let mut writer = GlyphWriter::new();
        let mut glyphs = 0;

        ansi::cursor_hide(&mut self.out).ok();

        for screen_row in 0..fb.rows() {
            let upper_y = fb.height() - 1 - 2 * screen_row;
            let lower_y = upper_y - 1;

            let row = u16::try_from(screen_row).unwrap_or(u16::MAX);
            ansi::cursor_to(&mut self.out, 0, row).ok();

            for x in 0..fb.width() {
                let upper = fb.get(x, upper_y);
                let lower = fb.get(x, lower_y);
                if upper == lower {
                    writer.full(&mut self.out, upper);
                } else {
                    writer.split(&mut self.out, upper, lower);
                }
                glyphs += 1;
            }

            writer.end_row(&mut self.out);
        }

        ansi::cursor_show(&mut self.out).ok();

        let stats = RenderStats {
            glyphs,
            color_sequences: writer.color_sequences(),
            bytes: self.out.len(),
        };
        trace!(
            width = fb.width(),
            rows = fb.rows(),
            glyphs = stats.glyphs,
            color_sequences = stats.color_sequences,
            bytes = stats.bytes,
            "frame assembled"
        );
        stats
    }

    /// The assembled frame (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn output(&self) -> &[u8] {
        self.out.as_bytes()
    }

    /// Write the assembled frame to `w` in a single write.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.out.flush_to(w)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
