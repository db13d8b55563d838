// SPDX-License-Identifier: MIT
//
// Canvas — the drawing context handed to the front end.
//
// One value owns everything a drawing session needs: the framebuffer, the
// renderer and its output buffer, the fractal palette, a geometry provider
// that says how big the terminal is, and the sink the frames go to. Nothing
// is global. The front end creates a Canvas, calls the drawing operations,
// and asks it to render.
//
// The operations mirror what a menu or command line offers a user:
//
//   init_framebuffer   draw_line     draw_mandelbrot   render_framebuffer
//   plot_point         draw_circle   draw_julia        clear_screen
//                      draw_square
//
// Shape and plot operations cannot fail (off-canvas pixels are dropped).
// Anything that allocates, validates fractal parameters or writes to the
// terminal returns a `CanvasError`.

use std::io::{self, Write};

use bp_term::ansi;
use bp_term::buffer::{Framebuffer, FramebufferError};
use bp_term::color::Color;
use bp_term::render::{RenderStats, Renderer};
use bp_term::terminal::Geometry;
use tracing::debug;

use crate::fractal::{self, Complex, FractalError, FractalKind, FractalParams, RenderOutcome, RowObserver};
use crate::palette::Palette;
use crate::raster::{self, Point};

/// Background used when the caller does not pick one.
pub const DEFAULT_BACKGROUND: Color = Color::Black;

// ─── CanvasError ─────────────────────────────────────────────────────────────

/// Anything a canvas operation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error(transparent)]
    Framebuffer(#[from] FramebufferError),

    #[error(transparent)]
    Fractal(#[from] FractalError),

    #[error("terminal write failed: {0}")]
    Io(#[from] io::Error),
}

// ─── Canvas ──────────────────────────────────────────────────────────────────

/// A framebuffer sized to a terminal, plus everything needed to draw it.
///
/// # Examples
///
/// ```
/// use bp_draw::canvas::Canvas;
/// use bp_term::color::Color;
/// use bp_term::terminal::Size;
///
/// let mut canvas = Canvas::new(Size::new(10, 5), Vec::new(), Color::Black).unwrap();
/// canvas.draw_line(0, 0, 9, 9, Color::Yellow);
/// canvas.render_framebuffer().unwrap();
/// assert!(!canvas.output().is_empty());
/// ```
pub struct Canvas<G, W> {
    geometry: G,
    out: W,
    framebuffer: Framebuffer,
    renderer: Renderer,
    palette: Palette,
}

impl<G: Geometry, W: Write> Canvas<G, W> {
    /// Create a canvas sized to `geometry`, filled with `background`.
    ///
    /// # Errors
    ///
    /// [`CanvasError::Framebuffer`] if the geometry reports zero columns or
    /// rows.
    pub fn new(geometry: G, out: W, background: Color) -> Result<Self, CanvasError> {
        let size = geometry.size();
        let framebuffer = Framebuffer::new(size.pixel_width(), size.pixel_height(), background)?;
        Ok(Self {
            geometry,
            out,
            framebuffer,
            renderer: Renderer::new(),
            palette: Palette::default(),
        })
    }

    /// Replace the fractal palette.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    #[inline]
    pub const fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    #[inline]
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The output sink (a `Vec<u8>` in tests).
    #[inline]
    #[must_use]
    pub const fn output(&self) -> &W {
        &self.out
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    // ─── Framebuffer lifecycle ───────────────────────────────────────────

    /// Reallocate the framebuffer at the current terminal size, every pixel
    /// set to `background`.
    ///
    /// # Errors
    ///
    /// [`CanvasError::Framebuffer`] if the terminal reports a zero size; the
    /// old framebuffer is kept in that case.
    pub fn init_framebuffer(&mut self, background: Color) -> Result<(), CanvasError> {
        let size = self.geometry.size();
        self.framebuffer
            .reinit(size.pixel_width(), size.pixel_height(), background)?;
        Ok(())
    }

    /// Clear the terminal and reinitialize the framebuffer.
    ///
    /// # Errors
    ///
    /// [`CanvasError::Io`] if the terminal cannot be written,
    /// [`CanvasError::Framebuffer`] as for [`init_framebuffer`](Self::init_framebuffer).
    pub fn clear_screen(&mut self, background: Color) -> Result<(), CanvasError> {
        ansi::reset(&mut self.out)?;
        ansi::clear_screen(&mut self.out)?;
        ansi::cursor_to(&mut self.out, 0, 0)?;
        self.out.flush()?;
        self.init_framebuffer(background)
    }

    // ─── Shapes ──────────────────────────────────────────────────────────

    /// Set one pixel. Returns `false` if `(x, y)` is off the canvas.
    pub fn plot_point(&mut self, x: i32, y: i32, color: Color) -> bool {
        self.framebuffer.plot(x, y, color)
    }

    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        raster::line(&mut self.framebuffer, Point::new(x1, y1), Point::new(x2, y2), color);
    }

    /// Ellipse centred on `(cx, cy)`; `None` skips the outline or the fill.
    pub fn draw_circle(
        &mut self,
        cx: i32,
        cy: i32,
        width: i32,
        height: i32,
        line: Option<Color>,
        fill: Option<Color>,
    ) {
        raster::ellipse(&mut self.framebuffer, Point::new(cx, cy), width, height, line, fill);
    }

    /// Axis-aligned rectangle centred on `(cx, cy)`.
    pub fn draw_square(
        &mut self,
        cx: i32,
        cy: i32,
        width: i32,
        height: i32,
        line: Option<Color>,
        fill: Option<Color>,
    ) {
        raster::rectangle(&mut self.framebuffer, Point::new(cx, cy), width, height, line, fill);
    }

    // ─── Fractals ────────────────────────────────────────────────────────

    /// Fill the framebuffer with the Mandelbrot set.
    ///
    /// # Errors
    ///
    /// [`CanvasError::Fractal`] for invalid parameters.
    pub fn draw_mandelbrot(
        &mut self,
        params: &FractalParams,
        observer: &mut impl RowObserver,
    ) -> Result<RenderOutcome, CanvasError> {
        self.draw_fractal(&FractalKind::Mandelbrot, params, observer)
    }

    /// Fill the framebuffer with the Julia set for constant `c`.
    ///
    /// # Errors
    ///
    /// [`CanvasError::Fractal`] for invalid parameters or a non-finite `c`.
    pub fn draw_julia(
        &mut self,
        c: Complex,
        params: &FractalParams,
        observer: &mut impl RowObserver,
    ) -> Result<RenderOutcome, CanvasError> {
        self.draw_fractal(&FractalKind::Julia { c }, params, observer)
    }

    fn draw_fractal(
        &mut self,
        kind: &FractalKind,
        params: &FractalParams,
        observer: &mut impl RowObserver,
    ) -> Result<RenderOutcome, CanvasError> {
        let outcome = fractal::render(&mut self.framebuffer, kind, params, &self.palette, observer)?;
        Ok(outcome)
    }

    // ─── Output ──────────────────────────────────────────────────────────

    /// Render the framebuffer and write it to the terminal in one write.
    ///
    /// # Errors
    ///
    /// [`CanvasError::Io`] if the write fails.
    pub fn render_framebuffer(&mut self) -> Result<RenderStats, CanvasError> {
        let stats = self.renderer.render(&self.framebuffer);
        self.renderer.flush_to(&mut self.out)?;
        debug!(glyphs = stats.glyphs, bytes = stats.bytes, "frame written");
        Ok(stats)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
