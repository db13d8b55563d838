// SPDX-License-Identifier: MIT
//
// Framebuffer — the 2D pixel grid that everything paints to.
//
// Every character cell on screen holds two vertically stacked pixels, so a
// terminal of `cols × rows` characters is a framebuffer of `cols × 2·rows`
// pixels. The rasterizer and the fractal engine paint here; the renderer
// turns pairs of rows back into half-block glyphs.
//
// Design:
//
//   - Flat `Vec<Color>` with row-major indexing for cache efficiency.
//     Row 0 is the BOTTOM of the picture: y grows upward, like a plot.
//     The renderer is the only place that flips to screen order.
//
//   - Pixel coordinates are signed. Rasterizers routinely probe points
//     left of or below the canvas; those writes are silent no-ops that
//     report `false`, never errors and never wrap-around.
//
//   - Every stored pixel is a real color. "Don't paint" lives in the
//     drawing API as `Option<Color>`, never inside the buffer.

use tracing::debug;

use crate::color::Color;

// ─── FramebufferError ────────────────────────────────────────────────────────

/// Why a framebuffer could not be (re)allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FramebufferError {
    /// Width or height is zero or negative.
    #[error("invalid framebuffer dimensions {width}x{height}: both must be positive")]
    InvalidDimension { width: i32, height: i32 },

    /// Height is not a whole number of character rows.
    #[error("framebuffer height {0} must be even (two pixels per character row)")]
    OddHeight(i32),
}

// ─── Framebuffer ─────────────────────────────────────────────────────────────

/// A `width × height` grid of pixel colors, origin at the bottom-left.
///
/// # Examples
///
/// ```
/// use bp_term::buffer::Framebuffer;
/// use bp_term::color::Color;
///
/// let mut fb = Framebuffer::new(4, 4, Color::Black).unwrap();
/// assert!(fb.plot(1, 2, Color::Red));
/// assert_eq!(fb.get(1, 2), Some(Color::Red));
///
/// // Out of bounds: no write, reported as `false`.
/// assert!(!fb.plot(-1, 0, Color::Red));
/// assert_eq!(fb.get(4, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    // ─── Construction ────────────────────────────────────────────────────

    /// Allocate a framebuffer with every pixel set to `background`.
    ///
    /// # Errors
    ///
    /// [`FramebufferError::InvalidDimension`] if either dimension is not
    /// positive, [`FramebufferError::OddHeight`] if `height` is odd.
    pub fn new(width: i32, height: i32, background: Color) -> Result<Self, FramebufferError> {
        let len = checked_len(width, height)?;
        debug!(width, height, %background, "framebuffer allocated");
        Ok(Self {
            width,
            height,
            pixels: vec![background; len],
        })
    }

    /// Reinitialize to new dimensions, clearing every pixel to `background`.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new). On error the framebuffer is unchanged.
    pub fn reinit(
        &mut self,
        width: i32,
        height: i32,
        background: Color,
    ) -> Result<(), FramebufferError> {
        let len = checked_len(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(len, background);
        debug!(width, height, %background, "framebuffer reinitialized");
        Ok(())
    }

    /// Set every pixel to `background` without changing dimensions.
    pub fn clear(&mut self, background: Color) {
        self.pixels.fill(background);
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Width in pixels (= terminal columns).
    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height in pixels (= 2 × terminal rows). Always even.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Height in character rows.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.height / 2
    }

    /// Whether `(x, y)` is inside `[0, width) × [0, height)`.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Flat index of an in-bounds pixel.
    #[inline]
    #[allow(clippy::cast_sign_loss)] // in_bounds() guarantees x, y >= 0.
    const fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// The color at `(x, y)`, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    // ─── Painting ────────────────────────────────────────────────────────

    /// Overwrite one pixel. Returns `false` (and writes nothing) when
    /// `(x, y)` is outside the framebuffer.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    /// Paint the horizontal span `x0..=x1` on row `y`, clipped to bounds.
    ///
    /// Returns the number of pixels written.
    pub fn hline(&mut self, y: i32, x0: i32, x1: i32, color: Color) -> usize {
        if y < 0 || y >= self.height {
            return 0;
        }
        let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let lo = lo.max(0);
        let hi = hi.min(self.width - 1);
        if lo > hi {
            return 0;
        }
        let (Some(start), Some(end)) = (self.index(lo, y), self.index(hi, y)) else {
            return 0;
        };
        self.pixels[start..=end].fill(color);
        end - start + 1
    }

    // ─── Iteration ───────────────────────────────────────────────────────

    /// The pixels of row `y` (left to right), or `None` if out of bounds.
    #[must_use]
    pub fn row(&self, y: i32) -> Option<&[Color]> {
        let start = self.index(0, y)?;
        let end = self.index(self.width - 1, y)?;
        Some(&self.pixels[start..=end])
    }

    /// Every pixel as `(x, y, color)`, bottom row first.
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32, Color)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| (x, y, self.pixels[self.index_unchecked(x, y)]))
        })
    }

    #[inline]
    #[allow(clippy::cast_sign_loss)] // Only called with in-range loop indices.
    const fn index_unchecked(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Validate dimensions and return the pixel count.
#[allow(clippy::cast_sign_loss)] // Both dimensions are checked positive first.
const fn checked_len(width: i32, height: i32) -> Result<usize, FramebufferError> {
    if width <= 0 || height <= 0 {
        return Err(FramebufferError::InvalidDimension { width, height });
    }
    if height % 2 != 0 {
        return Err(FramebufferError::OddHeight(height));
    }
    Ok(width as usize * height as usize)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fb(w: i32, h: i32) -> Framebuffer {
        Framebuffer::new(w, h, Color::Black).unwrap()
    }

    // ── Construction ────────────────────────────────────────────────────

    #[test]
    fn new_fills_background() {
        let buf = Framebuffer::new(3, 2, Color::Blue).unwrap();
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.rows(), 1);
        assert!(buf.pixels().all(|(_, _, c)| c == Color::Blue));
        assert_eq!(buf.pixels().count(), 6);
    }

    #[test]
    fn new_rejects_non_positive_dimensions() {
        assert_eq!(
            Framebuffer::new(0, 4, Color::Black),
            Err(FramebufferError::InvalidDimension { width: 0, height: 4 })
        );
        assert_eq!(
            Framebuffer::new(4, -2, Color::Black),
            Err(FramebufferError::InvalidDimension { width: 4, height: -2 })
        );
    }

    #[test]
    fn new_rejects_odd_height() {
        assert_eq!(
            Framebuffer::new(4, 3, Color::Black),
            Err(FramebufferError::OddHeight(3))
        );
    }

    #[test]
    fn reinit_resizes_and_clears() {
        let mut buf = fb(2, 2);
        buf.plot(0, 0, Color::Red);
        buf.reinit(5, 4, Color::Green).unwrap();
        assert_eq!(buf.width(), 5);
        assert_eq!(buf.height(), 4);
        assert!(buf.pixels().all(|(_, _, c)| c == Color::Green));
    }

    #[test]
    fn reinit_failure_leaves_buffer_untouched() {
        let mut buf = fb(2, 2);
        buf.plot(1, 1, Color::Red);
        let before = buf.clone();
        assert!(buf.reinit(0, 0, Color::White).is_err());
        assert_eq!(buf, before);
    }

    #[test]
    fn clear_keeps_dimensions() {
        let mut buf = fb(3, 4);
        buf.plot(2, 3, Color::Red);
        buf.clear(Color::Yellow);
        assert_eq!(buf.width(), 3);
        assert!(buf.pixels().all(|(_, _, c)| c == Color::Yellow));
    }

    // ── Plot / Get ──────────────────────────────────────────────────────

    #[test]
    fn plot_then_get_every_in_bounds_pixel() {
        let mut buf = fb(5, 6);
        for y in 0..6 {
            for x in 0..5 {
                let color = Color::ALL[((x + y) % 16) as usize];
                assert!(buf.plot(x, y, color));
                assert_eq!(buf.get(x, y), Some(color));
            }
        }
    }

    #[test]
    fn plot_out_of_bounds_is_noop() {
        let mut buf = fb(4, 4);
        let before = buf.clone();
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MIN, i32::MAX)] {
            assert!(!buf.plot(x, y, Color::Red), "({x}, {y})");
        }
        assert_eq!(buf, before);
    }

    #[test]
    fn plot_touches_only_its_cell() {
        let mut buf = fb(4, 4);
        buf.plot(2, 1, Color::Magenta);
        let painted: Vec<_> = buf.pixels().filter(|&(_, _, c)| c != Color::Black).collect();
        assert_eq!(painted, vec![(2, 1, Color::Magenta)]);
    }

    // ── Spans and rows ──────────────────────────────────────────────────

    #[test]
    fn hline_clips_to_bounds() {
        let mut buf = fb(5, 2);
        assert_eq!(buf.hline(1, -3, 2, Color::Red), 3);
        assert_eq!(
            buf.row(1).unwrap(),
            &[Color::Red, Color::Red, Color::Red, Color::Black, Color::Black]
        );
    }

    #[test]
    fn hline_accepts_reversed_endpoints() {
        let mut buf = fb(5, 2);
        assert_eq!(buf.hline(0, 3, 1, Color::Cyan), 3);
        assert_eq!(buf.get(1, 0), Some(Color::Cyan));
        assert_eq!(buf.get(3, 0), Some(Color::Cyan));
    }

    #[test]
    fn hline_outside_is_noop() {
        let mut buf = fb(5, 2);
        assert_eq!(buf.hline(2, 0, 4, Color::Red), 0);
        assert_eq!(buf.hline(0, 5, 9, Color::Red), 0);
        assert_eq!(buf.hline(0, -9, -1, Color::Red), 0);
        assert!(buf.pixels().all(|(_, _, c)| c == Color::Black));
    }

    #[test]
    fn row_out_of_bounds_is_none() {
        let buf = fb(3, 2);
        assert!(buf.row(-1).is_none());
        assert!(buf.row(2).is_none());
        assert_eq!(buf.row(0).unwrap().len(), 3);
    }

    #[test]
    fn pixels_are_bottom_row_first() {
        let buf = fb(2, 2);
        let coords: Vec<_> = buf.pixels().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
