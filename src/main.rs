// SPDX-License-Identifier: MIT
//
// blockpaint — paint shapes and fractals into the terminal with half blocks.
//
// This is the command-line front end over the two library crates:
//
//   bp-term → colors, framebuffer, half-block renderer, terminal size
//   bp-draw → lines, ellipses, rectangles, fractals, the Canvas
//
// One invocation draws one thing. The flow is always the same:
//
//   args → geometry (ioctl, overridable) → Canvas::new(background)
//        → draw_* on the framebuffer → render_framebuffer → stdout
//
// Fractal progress goes to stderr as a percentage so stdout carries nothing
// but the frame. `--time-limit-ms` stops a fractal at the next finished row;
// whatever was computed is still rendered.
//
// Examples:
//
//   blockpaint mandelbrot --re -0.743 --im 0.131 --zoom 40 --iterations 200
//   blockpaint julia --c-re -0.8 --c-im 0.156
//   blockpaint circle 40 24 30 30 --line bright_white --fill blue
//   blockpaint --background white square 20 20 10 6 --fill none
//   RUST_LOG=bp_draw=debug blockpaint line 0 0 79 47 --color red

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use bp_draw::canvas::{Canvas, DEFAULT_BACKGROUND};
use bp_draw::fractal::{Complex, DEFAULT_JULIA_C, FractalParams, Progress, RenderOutcome};
use bp_term::color::{Color, ParseColorError, parse_paint};
use bp_term::terminal::{Geometry, HostTerminal, Size};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{info, warn};

// ─── Command line ───────────────────────────────────────────────────────────

/// Paint shapes and fractals into the terminal with half-block pixels.
#[derive(Parser, Debug)]
#[command(name = "blockpaint")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Background color the framebuffer starts from
    #[arg(short = 'b', long, global = true, default_value_t = DEFAULT_BACKGROUND)]
    background: Color,

    /// Override the terminal width in columns
    #[arg(long, global = true, env = "BLOCKPAINT_COLS", value_name = "N")]
    cols: Option<u16>,

    /// Override the terminal height in character rows (two pixels each)
    #[arg(long, global = true, env = "BLOCKPAINT_ROWS", value_name = "N")]
    rows: Option<u16>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short = 'l', long, global = true, env = "BLOCKPAINT_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the Mandelbrot set
    Mandelbrot(FractalArgs),

    /// Render a Julia set
    Julia {
        /// Real part of the Julia constant
        #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_JULIA_C.re)]
        c_re: f64,

        /// Imaginary part of the Julia constant
        #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_JULIA_C.im)]
        c_im: f64,

        #[command(flatten)]
        view: FractalArgs,
    },

    /// Draw a straight line between two pixels
    Line {
        #[arg(allow_negative_numbers = true)]
        x1: i32,
        #[arg(allow_negative_numbers = true)]
        y1: i32,
        #[arg(allow_negative_numbers = true)]
        x2: i32,
        #[arg(allow_negative_numbers = true)]
        y2: i32,

        #[arg(short, long, default_value_t = Color::White)]
        color: Color,
    },

    /// Draw an ellipse centred on (cx, cy)
    Circle(ShapeArgs),

    /// Draw an axis-aligned rectangle centred on (cx, cy)
    Square(ShapeArgs),

    /// Set a single pixel
    Point {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,

        #[arg(short, long, default_value_t = Color::White)]
        color: Color,
    },

    /// Clear the terminal
    Clear,
}

/// View parameters shared by both fractals.
#[derive(ClapArgs, Debug, Clone, Copy)]
struct FractalArgs {
    /// Real coordinate of the view centre
    #[arg(long, allow_negative_numbers = true)]
    re: Option<f64>,

    /// Imaginary coordinate of the view centre
    #[arg(long, allow_negative_numbers = true)]
    im: Option<f64>,

    /// Magnification; 1.0 shows the whole set
    #[arg(short, long)]
    zoom: Option<f64>,

    /// Iteration limit before a point counts as inside the set
    #[arg(short, long)]
    iterations: Option<u32>,

    /// Stop computing after this many milliseconds (at a row boundary)
    #[arg(long, value_name = "MS")]
    time_limit_ms: Option<u64>,
}

impl FractalArgs {
    /// Fill unset fields from `defaults`.
    fn params(&self, defaults: FractalParams) -> FractalParams {
        FractalParams {
            centre: Complex::new(
                self.re.unwrap_or(defaults.centre.re),
                self.im.unwrap_or(defaults.centre.im),
            ),
            zoom: self.zoom.unwrap_or(defaults.zoom),
            max_iter: self.iterations.unwrap_or(defaults.max_iter),
        }
    }
}

#[derive(ClapArgs, Debug, Clone, Copy)]
struct ShapeArgs {
    #[arg(allow_negative_numbers = true)]
    cx: i32,
    #[arg(allow_negative_numbers = true)]
    cy: i32,
    width: i32,
    height: i32,

    /// Outline color, or `none`
    #[arg(long, default_value = "white")]
    line: Paint,

    /// Fill color, or `none`
    #[arg(long, default_value = "none")]
    fill: Paint,
}

/// A color for one drawing pass, or `none` to skip the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Paint(Option<Color>);

impl FromStr for Paint {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_paint(s).map(Self)
    }
}

// ─── Geometry ───────────────────────────────────────────────────────────────

/// The host terminal with optional per-axis overrides.
struct Screen {
    host: HostTerminal,
    cols: Option<u16>,
    rows: Option<u16>,
}

impl Geometry for Screen {
    fn size(&self) -> Size {
        match (self.cols, self.rows) {
            (Some(cols), Some(rows)) => Size::new(cols, rows),
            (cols, rows) => {
                let host = self.host.size();
                Size::new(cols.unwrap_or(host.cols), rows.unwrap_or(host.rows))
            }
        }
    }
}

// ─── Logging ────────────────────────────────────────────────────────────────

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "blockpaint={level},bp_term={level},bp_draw={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

// ─── Progress ───────────────────────────────────────────────────────────────

/// Row observer that prints a percentage to stderr and enforces the
/// optional time limit.
fn progress_reporter(time_limit: Option<Duration>) -> impl FnMut(Progress) -> ControlFlow<()> {
    let started = Instant::now();
    let mut last_percent = None;
    move |progress: Progress| {
        let percent = progress.percent();
        if last_percent != Some(percent) {
            last_percent = Some(percent);
            eprint!("\r{percent:3}%");
        }
        match time_limit {
            Some(limit) if started.elapsed() >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn draw_fractal<G: Geometry, W: Write>(
    canvas: &mut Canvas<G, W>,
    julia: Option<Complex>,
    view: &FractalArgs,
) -> Result<()> {
    let mut observer = progress_reporter(view.time_limit_ms.map(Duration::from_millis));
    let outcome = match julia {
        None => canvas.draw_mandelbrot(&view.params(FractalParams::mandelbrot_default()), &mut observer),
        Some(c) => canvas.draw_julia(c, &view.params(FractalParams::julia_default()), &mut observer),
    }
    .context("fractal rendering failed")?;
    eprint!("\r    \r");

    if let RenderOutcome::Cancelled { rows_done } = outcome {
        warn!(rows_done, "time limit reached; rendering partial image");
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let screen = Screen {
        host: HostTerminal::new(),
        cols: args.cols,
        rows: args.rows,
    };
    let size = screen.size();
    info!(cols = size.cols, rows = size.rows, "canvas size");

    let stdout = io::stdout().lock();
    let mut canvas = Canvas::new(screen, stdout, args.background)
        .with_context(|| format!("cannot paint on a {}x{} terminal", size.cols, size.rows))?;

    match &args.command {
        Command::Clear => {
            canvas.clear_screen(args.background)?;
            return Ok(());
        }
        Command::Mandelbrot(view) => draw_fractal(&mut canvas, None, view)?,
        Command::Julia { c_re, c_im, view } => {
            draw_fractal(&mut canvas, Some(Complex::new(*c_re, *c_im)), view)?;
        }
        Command::Line { x1, y1, x2, y2, color } => canvas.draw_line(*x1, *y1, *x2, *y2, *color),
        Command::Circle(s) => canvas.draw_circle(s.cx, s.cy, s.width, s.height, s.line.0, s.fill.0),
        Command::Square(s) => canvas.draw_square(s.cx, s.cy, s.width, s.height, s.line.0, s.fill.0),
        Command::Point { x, y, color } => {
            if !canvas.plot_point(*x, *y, *color) {
                warn!(x, y, "point is outside the canvas");
            }
        }
    }

    let stats = canvas.render_framebuffer().context("writing the frame failed")?;
    info!(glyphs = stats.glyphs, bytes = stats.bytes, "frame rendered");

    // Leave the prompt below the picture.
    let mut out = canvas.into_output();
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;
    run(&args)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
