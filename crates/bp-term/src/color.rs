// SPDX-License-Identifier: MIT
//
// bp-term color model — the sixteen named ANSI colors.
//
// The pixel engine deliberately stays inside the 16-color palette that every
// terminal understands. Each color carries its two SGR codes as associated
// data: foreground codes live in 30–37 / 90–97 and background codes in
// 40–47 / 100–107, so the two ranges never overlap.
//
// There is no "transparent" color. A drawing pass that should not paint is
// expressed as `Option<Color>::None`, and the only place the words "none" or
// "transparent" are understood is `parse_paint`, at the input boundary.

use std::fmt;
use std::str::FromStr;

// ─── Color ───────────────────────────────────────────────────────────────────

/// One of the sixteen named terminal colors.
///
/// # Examples
///
/// ```
/// use bp_term::color::Color;
///
/// assert_eq!(Color::Red.fg_code(), 31);
/// assert_eq!(Color::Red.bg_code(), 41);
/// assert_eq!(Color::BrightRed.fg_code(), 91);
/// assert_eq!("bright_red".parse::<Color>().unwrap(), Color::BrightRed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Every color, in SGR code order.
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::BrightBlack,
        Self::BrightRed,
        Self::BrightGreen,
        Self::BrightYellow,
        Self::BrightBlue,
        Self::BrightMagenta,
        Self::BrightCyan,
        Self::BrightWhite,
    ];

    /// Position in the ANSI 16-color table (0–7 normal, 8–15 bright).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Whether this is one of the `bright_` variants.
    #[inline]
    #[must_use]
    pub const fn is_bright(self) -> bool {
        self.index() >= 8
    }

    /// SGR foreground code: 30–37 for normal colors, 90–97 for bright ones.
    #[inline]
    #[must_use]
    pub const fn fg_code(self) -> u8 {
        let base = self.index() % 8;
        if self.is_bright() { 90 + base } else { 30 + base }
    }

    /// SGR background code: 40–47 for normal colors, 100–107 for bright ones.
    #[inline]
    #[must_use]
    pub const fn bg_code(self) -> u8 {
        self.fg_code() + 10
    }

    /// Canonical snake_case name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::BrightBlack => "bright_black",
            Self::BrightRed => "bright_red",
            Self::BrightGreen => "bright_green",
            Self::BrightYellow => "bright_yellow",
            Self::BrightBlue => "bright_blue",
            Self::BrightMagenta => "bright_magenta",
            Self::BrightCyan => "bright_cyan",
            Self::BrightWhite => "bright_white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// A color name that is not one of the sixteen known names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color name `{name}`")]
pub struct ParseColorError {
    /// The rejected input, as given.
    pub name: String,
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Case-insensitive. `bright_red`, `bright-red`, `brightred` and
    /// `BrightRed` all name the same color.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL
            .into_iter()
            .find(|color| color.name().replace('_', "") == normalized)
            .ok_or_else(|| ParseColorError { name: s.to_owned() })
    }
}

/// Parse a drawing color where `none` / `transparent` mean "skip this pass".
///
/// # Errors
///
/// Returns [`ParseColorError`] if `s` is neither a color name nor one of the
/// two skip words.
///
/// ```
/// use bp_term::color::{parse_paint, Color};
///
/// assert_eq!(parse_paint("cyan").unwrap(), Some(Color::Cyan));
/// assert_eq!(parse_paint("none").unwrap(), None);
/// assert_eq!(parse_paint("Transparent").unwrap(), None);
/// ```
pub fn parse_paint(s: &str) -> Result<Option<Color>, ParseColorError> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("none") || trimmed.eq_ignore_ascii_case("transparent") {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
