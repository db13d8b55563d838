// SPDX-License-Identifier: MIT
//
// Terminal geometry — how big is the canvas?
//
// Safety: `get_size` necessarily uses `unsafe` for ioctl (TIOCGWINSZ), the
// standard POSIX interface for querying the window size. There is no safe
// alternative. The unsafe block is minimal.
#![allow(unsafe_code)]
//
// The drawing core never asks the OS anything itself. It goes through the
// `Geometry` trait, so the host terminal, a fixed size from the command
// line, and a test fixture all look the same to it.

use tracing::debug;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    /// The classic VT100 screen, used when nothing better is known.
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };

    /// Create a size from columns and rows.
    #[inline]
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Framebuffer width in pixels: one pixel per column.
    #[inline]
    #[must_use]
    pub const fn pixel_width(self) -> i32 {
        self.cols as i32
    }

    /// Framebuffer height in pixels: two pixels per row.
    #[inline]
    #[must_use]
    pub const fn pixel_height(self) -> i32 {
        self.rows as i32 * 2
    }
}

// ─── Geometry ───────────────────────────────────────────────────────────────

/// Something that knows the current terminal size.
pub trait Geometry {
    /// Current size in character cells.
    fn size(&self) -> Size;
}

/// A fixed size is its own geometry.
impl Geometry for Size {
    fn size(&self) -> Size {
        *self
    }
}

/// The terminal attached to stdout, with a fallback for pipes and files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostTerminal {
    fallback: Size,
}

impl HostTerminal {
    /// Query the host terminal, falling back to [`Size::FALLBACK`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fallback: Size::FALLBACK,
        }
    }

    /// Query the host terminal, falling back to `fallback`.
    #[must_use]
    pub const fn with_fallback(fallback: Size) -> Self {
        Self { fallback }
    }
}

impl Default for HostTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry for HostTerminal {
    fn size(&self) -> Size {
        get_size().unwrap_or_else(|| {
            debug!(
                cols = self.fallback.cols,
                rows = self.fallback.rows,
                "terminal size unavailable, using fallback"
            );
            self.fallback
        })
    }
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

// ─── Tests ──────────────────────────────────────────────────────────────────
