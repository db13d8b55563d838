// SPDX-License-Identifier: MIT
//
// Fractal engine — escape-time Mandelbrot and Julia sets.
//
// Both sets iterate z ← z² + c and stop when |z|² > 4 (|z| > 2 without the
// square root). They differ only in what the pixel supplies:
//
//   Mandelbrot: z₀ = 0,       c = pixel
//   Julia:      z₀ = pixel,   c = fixed constant
//
// Pixel → plane mapping. The visible imaginary span is `base_range / zoom`
// (base 3.0 for Mandelbrot, 4.0 for Julia). The real span is widened by the
// framebuffer's width/height ratio, which makes per-pixel steps equal on
// both axes: half-block pixels are roughly square, so circles stay round.
//
// Work happens row by row, bottom to top. After each row the observer is
// told how far along we are and may stop the render; rows are independent,
// so a cancelled render leaves complete rows behind and nothing half-done.

use std::ops::ControlFlow;

use bp_term::buffer::Framebuffer;
use tracing::debug;

use crate::palette::Palette;

// ─── FractalError ────────────────────────────────────────────────────────────

/// Invalid fractal parameters.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum FractalError {
    #[error("zoom must be a finite number greater than zero, got {0}")]
    InvalidZoom(f64),

    #[error("iteration limit must be greater than zero")]
    InvalidIterations,

    #[error("complex coordinates must be finite")]
    NonFiniteCoordinate,

    #[error("palette needs at least one escape band besides the inside color")]
    EmptyPalette,
}

// ─── Complex ─────────────────────────────────────────────────────────────────

/// A point on the complex plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// `|z|²`.
    #[inline]
    #[must_use]
    pub fn norm_sqr(self) -> f64 {
        self.re.mul_add(self.re, self.im * self.im)
    }

    /// `z² + c`.
    #[inline]
    #[must_use]
    pub fn square_add(self, c: Self) -> Self {
        Self {
            re: self.re.mul_add(self.re, -self.im * self.im) + c.re,
            im: (2.0 * self.re).mul_add(self.im, c.im),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

// ─── Parameters ──────────────────────────────────────────────────────────────

/// The classic Julia constant: spiralling arms around the origin.
pub const DEFAULT_JULIA_C: Complex = Complex::new(-0.7, 0.270_15);

/// Which set to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FractalKind {
    Mandelbrot,
    Julia { c: Complex },
}

impl FractalKind {
    /// Imaginary-axis span at zoom 1.
    #[inline]
    #[must_use]
    pub const fn base_range(&self) -> f64 {
        match self {
            Self::Mandelbrot => 3.0,
            Self::Julia { .. } => 4.0,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mandelbrot => "mandelbrot",
            Self::Julia { .. } => "julia",
        }
    }
}

/// Where to look and how hard to iterate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalParams {
    /// Plane coordinate shown at the middle of the framebuffer.
    pub centre: Complex,
    /// Magnification; 1.0 shows the whole base range.
    pub zoom: f64,
    /// Iteration bound; points surviving this long count as inside.
    pub max_iter: u32,
}

impl FractalParams {
    /// The whole Mandelbrot set: centre −0.5, zoom 1, 50 iterations.
    #[must_use]
    pub const fn mandelbrot_default() -> Self {
        Self {
            centre: Complex::new(-0.5, 0.0),
            zoom: 1.0,
            max_iter: 50,
        }
    }

    /// A Julia set around the origin: zoom 1, 50 iterations.
    #[must_use]
    pub const fn julia_default() -> Self {
        Self {
            centre: Complex::ZERO,
            zoom: 1.0,
            max_iter: 50,
        }
    }

    /// Reject parameters that would make the mapping meaningless.
    ///
    /// # Errors
    ///
    /// [`FractalError::InvalidZoom`], [`FractalError::InvalidIterations`] or
    /// [`FractalError::NonFiniteCoordinate`].
    pub fn validate(&self) -> Result<(), FractalError> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(FractalError::InvalidZoom(self.zoom));
        }
        if self.max_iter == 0 {
            return Err(FractalError::InvalidIterations);
        }
        if !self.centre.is_finite() {
            return Err(FractalError::NonFiniteCoordinate);
        }
        Ok(())
    }
}

// ─── Viewport ────────────────────────────────────────────────────────────────

/// Affine map from pixel coordinates to the complex plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Plane coordinate of pixel (0, 0), the bottom-left corner.
    pub origin: Complex,
    /// Real-axis distance between horizontally adjacent pixels.
    pub step_re: f64,
    /// Imaginary-axis distance between vertically adjacent pixels.
    pub step_im: f64,
}

impl Viewport {
    /// Map a `width × height` framebuffer onto the plane around
    /// `params.centre`.
    #[must_use]
    pub fn new(kind: &FractalKind, params: &FractalParams, width: i32, height: i32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        let half_im = kind.base_range() / params.zoom / 2.0;
        let half_re = half_im * (w / h);
        Self {
            origin: Complex::new(params.centre.re - half_re, params.centre.im - half_im),
            step_re: 2.0 * half_re / w,
            step_im: 2.0 * half_im / h,
        }
    }

    /// Plane coordinate of pixel `(x, y)`.
    #[inline]
    #[must_use]
    pub fn point(&self, x: i32, y: i32) -> Complex {
        Complex::new(
            f64::from(x).mul_add(self.step_re, self.origin.re),
            f64::from(y).mul_add(self.step_im, self.origin.im),
        )
    }
}

// ─── Iteration ───────────────────────────────────────────────────────────────

/// Number of steps of `z ← z² + c` before `|z|² > 4`, or `max_iter` if the
/// orbit stays bounded that long.
#[inline]
#[must_use]
pub fn escape_time(z0: Complex, c: Complex, max_iter: u32) -> u32 {
    let mut z = z0;
    for iter in 0..max_iter {
        if z.norm_sqr() > 4.0 {
            return iter;
        }
        z = z.square_add(c);
    }
    max_iter
}

// ─── Progress ────────────────────────────────────────────────────────────────

/// How many framebuffer rows are finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub rows_done: u32,
    pub rows_total: u32,
}

impl Progress {
    /// Whole-number percentage, 0–100.
    #[must_use]
    pub fn percent(self) -> u8 {
        if self.rows_total == 0 {
            return 100;
        }
        let pct = u64::from(self.rows_done.min(self.rows_total)) * 100 / u64::from(self.rows_total);
        u8::try_from(pct).unwrap_or(100)
    }
}

/// Receives a [`Progress`] after every finished row.
///
/// Returning [`ControlFlow::Break`] stops the render before the next row.
pub trait RowObserver {
    fn row_finished(&mut self, progress: Progress) -> ControlFlow<()>;
}

impl<F> RowObserver for F
where
    F: FnMut(Progress) -> ControlFlow<()>,
{
    fn row_finished(&mut self, progress: Progress) -> ControlFlow<()> {
        self(progress)
    }
}

/// An observer that ignores progress and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unobserved;

impl RowObserver for Unobserved {
    fn row_finished(&mut self, _progress: Progress) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// How a render ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every row was computed.
    Completed,
    /// The observer stopped the render; rows `0..rows_done` are painted.
    Cancelled { rows_done: u32 },
}

// ─── Render ──────────────────────────────────────────────────────────────────

/// Compute `kind` over the whole framebuffer, one palette color per pixel.
///
/// # Errors
///
/// Fails before touching the framebuffer if `params` (or the Julia constant)
/// do not validate.
#[allow(clippy::cast_sign_loss)] // Framebuffer height is always positive.
pub fn render(
    fb: &mut Framebuffer,
    kind: &FractalKind,
    params: &FractalParams,
    palette: &Palette,
    observer: &mut impl RowObserver,
) -> Result<RenderOutcome, FractalError> {
    params.validate()?;
    if let FractalKind::Julia { c } = kind {
        if !c.is_finite() {
            return Err(FractalError::NonFiniteCoordinate);
        }
    }

    let view = Viewport::new(kind, params, fb.width(), fb.height());
    let rows_total = fb.height() as u32;
    debug!(
        fractal = kind.name(),
        width = fb.width(),
        height = fb.height(),
        centre_re = params.centre.re,
        centre_im = params.centre.im,
        zoom = params.zoom,
        max_iter = params.max_iter,
        "fractal render started"
    );

    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let point = view.point(x, y);
            let (z0, c) = match *kind {
                FractalKind::Mandelbrot => (Complex::ZERO, point),
                FractalKind::Julia { c } => (point, c),
            };
            let iter = escape_time(z0, c, params.max_iter);
            fb.plot(x, y, palette.color_for_iteration(iter, params.max_iter));
        }

        let progress = Progress {
            rows_done: y as u32 + 1,
            rows_total,
        };
        if observer.row_finished(progress).is_break() {
            debug!(rows_done = progress.rows_done, rows_total, "fractal render cancelled");
            return Ok(RenderOutcome::Cancelled {
                rows_done: progress.rows_done,
            });
        }
    }

    debug!(fractal = kind.name(), "fractal render finished");
    Ok(RenderOutcome::Completed)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
