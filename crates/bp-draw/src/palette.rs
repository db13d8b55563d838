//! Escape-time coloring — iteration counts to colors.
//!
//! A palette is an ordered list whose first entry is reserved for points that
//! never escape (always black). The remaining entries are the bands: escape
//! counts cycle through them, producing the familiar stripes around the set.

use bp_term::color::Color;

use crate::fractal::FractalError;

/// An ordered fractal palette. Index 0 is the "inside the set" color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// The reserved color for points that never escape.
    pub const INSIDE: Color = Color::Black;

    /// Build a palette from its escape bands. Black is prepended as index 0.
    ///
    /// # Errors
    ///
    /// [`FractalError::EmptyPalette`] if `bands` is empty: with nothing to
    /// cycle through, escaping points would have no color.
    pub fn new(bands: impl IntoIterator<Item = Color>) -> Result<Self, FractalError> {
        let colors: Vec<Color> = std::iter::once(Self::INSIDE).chain(bands).collect();
        if colors.len() < 2 {
            return Err(FractalError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Color for points inside the set.
    #[inline]
    #[must_use]
    pub fn inside(&self) -> Color {
        self.colors[0]
    }

    /// Total entries, including the reserved inside color.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`: a palette holds at least the inside color and one band.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All entries, index 0 first.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }

    /// Map an escape count to a color.
    ///
    /// `iter >= max_iter` means the point never escaped and gets the inside
    /// color. Otherwise the bands (indices `1..len`) cycle:
    /// `palette[(iter mod (len − 1)) + 1]`.
    #[must_use]
    pub fn color_for_iteration(&self, iter: u32, max_iter: u32) -> Color {
        if iter >= max_iter {
            return self.inside();
        }
        let bands = self.colors.len() - 1;
        self.colors[iter as usize % bands + 1]
    }
}

impl Default for Palette {
    /// Sixteen entries: black inside, then cool to warm to white.
    fn default() -> Self {
        Self {
            colors: vec![
                Self::INSIDE,
                Color::Blue,
                Color::BrightBlue,
                Color::Cyan,
                Color::BrightCyan,
                Color::Green,
                Color::BrightGreen,
                Color::Yellow,
                Color::BrightYellow,
                Color::Red,
                Color::BrightRed,
                Color::Magenta,
                Color::BrightMagenta,
                Color::White,
                Color::BrightWhite,
                Color::BrightBlack,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_has_sixteen_entries_black_first() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 16);
        assert_eq!(palette.inside(), Color::Black);
        assert!(!palette.is_empty());
    }

    #[test]
    fn max_iter_is_inside() {
        let palette = Palette::default();
        assert_eq!(palette.color_for_iteration(50, 50), Color::Black);
        assert_eq!(palette.color_for_iteration(51, 50), Color::Black);
    }

    #[test]
    fn escaping_counts_cycle_over_bands() {
        let palette = Palette::default();
        let slice = palette.as_slice();
        for iter in 0..100 {
            let expected = slice[(iter as usize % 15) + 1];
            assert_eq!(palette.color_for_iteration(iter, 100), expected, "iter {iter}");
        }
    }

    #[test]
    fn zero_iterations_is_first_band() {
        let palette = Palette::new([Color::Red, Color::Green]).unwrap();
        assert_eq!(palette.color_for_iteration(0, 10), Color::Red);
        assert_eq!(palette.color_for_iteration(1, 10), Color::Green);
        assert_eq!(palette.color_for_iteration(2, 10), Color::Red);
    }

    #[test]
    fn escaping_never_uses_inside_slot() {
        let palette = Palette::new([Color::Black, Color::White]).unwrap();
        // A band may happen to be black, but slot 0 is never indexed.
        assert_eq!(palette.color_for_iteration(0, 5), Color::Black);
        assert_eq!(palette.color_for_iteration(1, 5), Color::White);
        assert_eq!(palette.len(), 3);
    }

    #[test]
    fn single_band_palette() {
        let palette = Palette::new([Color::Yellow]).unwrap();
        assert!((0..20).all(|i| palette.color_for_iteration(i, 20) == Color::Yellow));
    }

    #[test]
    fn empty_bands_rejected() {
        assert_eq!(Palette::new([]), Err(FractalError::EmptyPalette));
    }
}
