// SPDX-License-Identifier: MIT
//
// bp-term — the half-block pixel engine under blockpaint.
//
// A terminal character cell is twice as tall as it is wide, so splitting it
// into an upper and a lower half gives square-ish pixels. This crate owns
// that model: a pixel framebuffer with two pixels per character row, the
// sixteen ANSI colors, and a renderer that folds pixel pairs back into
// full-block and upper-half-block glyphs with as few SGR escapes as possible.
//
// No TUI framework underneath: the terminal is driven with raw ANSI
// sequences and an ioctl for the window size. Every byte of a frame is built
// in memory and leaves in a single write.

pub mod ansi;
pub mod buffer;
pub mod color;
pub mod output;
pub mod render;
pub mod terminal;

pub use buffer::{Framebuffer, FramebufferError};
pub use color::{Color, ParseColorError, parse_paint};
pub use render::{RenderStats, Renderer};
pub use terminal::{Geometry, HostTerminal, Size};
