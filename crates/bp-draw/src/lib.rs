// SPDX-License-Identifier: MIT
//
// bp-draw — what gets painted onto a bp-term framebuffer.
//
// Integer rasterization (lines, ellipses, rectangles), escape-time fractals
// with a cyclic palette, and the Canvas that ties a framebuffer, a renderer
// and a terminal together into the operations a front end calls.

pub mod canvas;
pub mod fractal;
pub mod isqrt;
pub mod palette;
pub mod raster;

pub use canvas::{Canvas, CanvasError, DEFAULT_BACKGROUND};
pub use fractal::{
    Complex, DEFAULT_JULIA_C, FractalError, FractalKind, FractalParams, Progress, RenderOutcome,
    RowObserver, Unobserved,
};
pub use palette::Palette;
pub use raster::Point;
