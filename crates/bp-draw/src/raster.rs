// SPDX-License-Identifier: MIT
//
// Rasterizer — lines, ellipses and rectangles on a Framebuffer.
//
// Everything here is integer arithmetic. Shapes are free to extend past
// the edges of the framebuffer: every write goes through bounds-checked
// `plot` / `hline`, and off-canvas points are silently dropped. Nothing is
// wrapped and nothing errors.
//
// Colors for the two passes of the closed shapes are `Option<Color>`:
// `None` skips the pass. The fill always runs first so the outline stays
// on top.
//
// Intermediate math runs in i64/i128 so that shapes centred near the i32
// limits cannot overflow; results are saturated back into i32 pixel space
// where they simply land out of bounds.

use bp_term::buffer::Framebuffer;
use bp_term::color::Color;

use crate::isqrt::isqrt;

// ─── Point ───────────────────────────────────────────────────────────────────

/// A pixel coordinate. Origin is bottom-left, `y` grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Clamp a wide coordinate back into i32 pixel space.
#[inline]
#[allow(clippy::cast_possible_truncation)] // Clamped to the i32 range first.
fn sat(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[inline]
#[allow(clippy::cast_possible_truncation)] // Clamped to the i64 range first.
fn sat_wide(v: i128) -> i32 {
    sat(v.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
}

// ─── Line ────────────────────────────────────────────────────────────────────

/// Draw a line from `a` to `b`, both endpoints inclusive (Bresenham).
///
/// The axis with the larger delta drives the loop; the other axis steps
/// whenever the accumulated error goes negative. Endpoints are put in a
/// canonical order along the driving axis first, so `line(a, b)` and
/// `line(b, a)` paint exactly the same pixels. `a == b` paints one pixel.
pub fn line(fb: &mut Framebuffer, a: Point, b: Point, color: Color) {
    let dx = (i64::from(b.x) - i64::from(a.x)).abs();
    let dy = (i64::from(b.y) - i64::from(a.y)).abs();

    if dx >= dy {
        let (start, end) = if a.x <= b.x { (a, b) } else { (b, a) };
        let step = if end.y >= start.y { 1 } else { -1 };
        let mut err = dx / 2;
        let mut y = i64::from(start.y);
        for x in start.x..=end.x {
            fb.plot(x, sat(y), color);
            err -= dy;
            if err < 0 {
                y += step;
                err += dx;
            }
        }
    } else {
        let (start, end) = if a.y <= b.y { (a, b) } else { (b, a) };
        let step = if end.x >= start.x { 1 } else { -1 };
        let mut err = dy / 2;
        let mut x = i64::from(start.x);
        for y in start.y..=end.y {
            fb.plot(sat(x), y, color);
            err -= dx;
            if err < 0 {
                x += step;
                err += dy;
            }
        }
    }
}

// ─── Ellipse ─────────────────────────────────────────────────────────────────

/// Draw an ellipse (a circle when `width == height`) centred on `centre`.
///
/// Radii are `width / 2` and `height / 2`, truncated. If either radius is
/// not positive the shape degenerates to the single centre pixel, painted
/// with `line` (nothing happens if `line` is `None`).
pub fn ellipse(
    fb: &mut Framebuffer,
    centre: Point,
    width: i32,
    height: i32,
    line: Option<Color>,
    fill: Option<Color>,
) {
    let rx = width / 2;
    let ry = height / 2;

    if rx <= 0 || ry <= 0 {
        if let Some(color) = line {
            fb.plot(centre.x, centre.y, color);
        }
        return;
    }

    if let Some(color) = fill {
        fill_ellipse(fb, centre, i64::from(rx), i64::from(ry), color);
    }
    if let Some(color) = line {
        outline_ellipse(fb, centre, i128::from(rx), i128::from(ry), color);
    }
}

/// One horizontal span per row: `x_bound = isqrt(rx²·(ry² − y²)) / ry`.
fn fill_ellipse(fb: &mut Framebuffer, centre: Point, rx: i64, ry: i64, color: Color) {
    let cx = i64::from(centre.x);
    let cy = i64::from(centre.y);

    // Rows outside the framebuffer would be dropped anyway.
    let lo = (-ry).max(-cy);
    let hi = ry.min(i64::from(fb.height()) - 1 - cy);

    let rx2 = i128::from(rx * rx);
    for dy in lo..=hi {
        // rx²·(ry² − dy²) only leaves the i64 range for radii far beyond any
        // terminal; saturating there just narrows the span.
        let radicand = (rx2 * i128::from(ry * ry - dy * dy)).max(0);
        let x_bound = isqrt(i64::try_from(radicand).unwrap_or(i64::MAX)) / ry;
        fb.hline(sat(cy + dy), sat(cx - x_bound), sat(cx + x_bound), color);
    }
}

/// Midpoint ellipse, two regions, four-way symmetric plotting.
///
/// Decision variables are scaled by 4 so the classic `¼` and `½` terms
/// stay integral.
fn outline_ellipse(fb: &mut Framebuffer, centre: Point, rx: i128, ry: i128, color: Color) {
    let cx = i128::from(centre.x);
    let cy = i128::from(centre.y);
    let mut plot4 = |x: i128, y: i128| {
        fb.plot(sat_wide(cx + x), sat_wide(cy + y), color);
        fb.plot(sat_wide(cx - x), sat_wide(cy + y), color);
        fb.plot(sat_wide(cx + x), sat_wide(cy - y), color);
        fb.plot(sat_wide(cx - x), sat_wide(cy - y), color);
    };

    let rx2 = rx * rx;
    let ry2 = ry * ry;

    let mut x = 0;
    let mut y = ry;
    let mut px = 0;
    let mut py = 2 * rx2 * y;
    plot4(x, y);

    // Region 1: |slope| < 1, x steps every iteration.
    let mut p = 4 * ry2 - 4 * rx2 * ry + rx2;
    while px < py {
        x += 1;
        px += 2 * ry2;
        if p < 0 {
            p += 4 * (ry2 + px);
        } else {
            y -= 1;
            py -= 2 * rx2;
            p += 4 * (ry2 + px - py);
        }
        plot4(x, y);
    }

    // Region 2: |slope| >= 1, y steps every iteration.
    let mut p = ry2 * (2 * x + 1) * (2 * x + 1) + 4 * rx2 * (y - 1) * (y - 1) - 4 * rx2 * ry2;
    while y > 0 {
        y -= 1;
        py -= 2 * rx2;
        if p > 0 {
            p += 4 * (rx2 - py);
        } else {
            x += 1;
            px += 2 * ry2;
            p += 4 * (rx2 - py + px);
        }
        plot4(x, y);
    }

    // Very flat ellipses can reach y = 0 in region 1 short of the tip.
    while x < rx {
        x += 1;
        plot4(x, 0);
    }
}

// ─── Rectangle ───────────────────────────────────────────────────────────────

/// Inclusive bounds `(left, bottom, right, top)` of a `width × height` box
/// centred on `centre`.
///
/// For even sizes there is no middle pixel; the right/top edge moves one
/// pixel inward so the box is exactly `width × height`.
fn rect_bounds(centre: Point, width: i32, height: i32) -> (i64, i64, i64, i64) {
    let (w, h) = (i64::from(width), i64::from(height));
    let (cx, cy) = (i64::from(centre.x), i64::from(centre.y));
    let left = cx - w / 2;
    let right = cx + w / 2 - i64::from(w % 2 == 0);
    let bottom = cy - h / 2;
    let top = cy + h / 2 - i64::from(h % 2 == 0);
    (left, bottom, right, top)
}

/// Draw an axis-aligned rectangle centred on `centre`.
///
/// The fill covers the whole box; the outline is the four 1-pixel edges,
/// drawn after the fill. Non-positive sizes draw nothing.
pub fn rectangle(
    fb: &mut Framebuffer,
    centre: Point,
    width: i32,
    height: i32,
    line: Option<Color>,
    fill: Option<Color>,
) {
    if width <= 0 || height <= 0 {
        return;
    }
    let (left, bottom, right, top) = rect_bounds(centre, width, height);
    let (l, r) = (sat(left), sat(right));

    // Clip the row range; columns are clipped by hline / plot.
    let row_lo = bottom.max(0);
    let row_hi = top.min(i64::from(fb.height()) - 1);

    if let Some(color) = fill {
        for y in row_lo..=row_hi {
            fb.hline(sat(y), l, r, color);
        }
    }

    if let Some(color) = line {
        fb.hline(sat(bottom), l, r, color);
        fb.hline(sat(top), l, r, color);
        for y in row_lo..=row_hi {
            fb.plot(l, sat(y), color);
            fb.plot(r, sat(y), color);
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn canvas(w: i32, h: i32) -> Framebuffer {
        Framebuffer::new(w, h, Color::Black).unwrap()
    }

    fn painted(fb: &Framebuffer, color: Color) -> BTreeSet<(i32, i32)> {
        fb.pixels()
            .filter(|&(_, _, c)| c == color)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    // ── Line ────────────────────────────────────────────────────────────

    #[test]
    fn horizontal_line() {
        let mut fb = canvas(10, 4);
        line(&mut fb, p(2, 1), p(6, 1), Color::Red);
        let expected: BTreeSet<_> = (2..=6).map(|x| (x, 1)).collect();
        assert_eq!(painted(&fb, Color::Red), expected);
    }

    #[test]
    fn vertical_line() {
        let mut fb = canvas(4, 10);
        line(&mut fb, p(1, 8), p(1, 3), Color::Red);
        let expected: BTreeSet<_> = (3..=8).map(|y| (1, y)).collect();
        assert_eq!(painted(&fb, Color::Red), expected);
    }

    #[test]
    fn diagonal_line() {
        let mut fb = canvas(6, 6);
        line(&mut fb, p(0, 0), p(5, 5), Color::Red);
        let expected: BTreeSet<_> = (0..=5).map(|i| (i, i)).collect();
        assert_eq!(painted(&fb, Color::Red), expected);
    }

    #[test]
    fn shallow_line_has_one_pixel_per_column() {
        let mut fb = canvas(20, 8);
        line(&mut fb, p(0, 0), p(19, 5), Color::Red);
        let px = painted(&fb, Color::Red);
        assert_eq!(px.len(), 20);
        assert!(px.contains(&(0, 0)));
        assert!(px.contains(&(19, 5)));
        for x in 0..20 {
            assert_eq!(px.iter().filter(|&&(px, _)| px == x).count(), 1, "column {x}");
        }
    }

    #[test]
    fn steep_line_has_one_pixel_per_row() {
        let mut fb = canvas(8, 20);
        line(&mut fb, p(6, 0), p(1, 19), Color::Red);
        let px = painted(&fb, Color::Red);
        assert_eq!(px.len(), 20);
        assert!(px.contains(&(6, 0)));
        assert!(px.contains(&(1, 19)));
    }

    #[test]
    fn line_is_symmetric_under_endpoint_swap() {
        let cases = [
            (p(0, 0), p(7, 3)),
            (p(0, 3), p(7, 0)),
            (p(2, 9), p(5, 0)),
            (p(1, 1), p(8, 8)),
            (p(0, 5), p(9, 4)),
        ];
        for (a, b) in cases {
            let mut fwd = canvas(10, 10);
            let mut rev = canvas(10, 10);
            line(&mut fwd, a, b, Color::Red);
            line(&mut rev, b, a, Color::Red);
            assert_eq!(fwd, rev, "{a:?} -> {b:?}");
        }
    }

    #[test]
    fn degenerate_line_is_one_pixel() {
        let mut fb = canvas(4, 4);
        line(&mut fb, p(2, 3), p(2, 3), Color::Red);
        assert_eq!(painted(&fb, Color::Red), BTreeSet::from([(2, 3)]));
    }

    #[test]
    fn line_clips_silently() {
        let mut fb = canvas(4, 4);
        line(&mut fb, p(-5, -5), p(10, 10), Color::Red);
        let expected: BTreeSet<_> = (0..4).map(|i| (i, i)).collect();
        assert_eq!(painted(&fb, Color::Red), expected);
    }

    #[test]
    fn line_at_i32_extremes_does_not_panic() {
        let mut fb = canvas(4, 4);
        line(&mut fb, p(i32::MIN, 0), p(i32::MIN + 3, 1), Color::Red);
        line(&mut fb, p(0, i32::MAX - 2), p(1, i32::MAX), Color::Red);
        assert!(painted(&fb, Color::Red).is_empty());
    }

    // ── Ellipse ─────────────────────────────────────────────────────────

    #[test]
    fn circle_outline_is_closed_and_symmetric() {
        let mut fb = canvas(21, 22);
        ellipse(&mut fb, p(10, 10), 16, 16, Some(Color::White), None);
        let px = painted(&fb, Color::White);

        // Extremes at radius 8.
        for point in [(18, 10), (2, 10), (10, 18), (10, 2)] {
            assert!(px.contains(&point), "missing {point:?}");
        }
        // Four-way symmetry.
        for &(x, y) in &px {
            assert!(px.contains(&(20 - x, y)));
            assert!(px.contains(&(x, 20 - y)));
        }
        // Centre stays clear.
        assert!(!px.contains(&(10, 10)));
    }

    #[test]
    fn outline_has_no_gaps() {
        let mut fb = canvas(41, 22);
        ellipse(&mut fb, p(20, 10), 36, 14, Some(Color::White), None);
        let px = painted(&fb, Color::White);
        // Every outline pixel has an 8-connected neighbour on each side of
        // the curve: at least two neighbours overall.
        for &(x, y) in &px {
            let neighbours = (-1..=1)
                .flat_map(|dx| (-1..=1).map(move |dy| (dx, dy)))
                .filter(|&(dx, dy)| (dx, dy) != (0, 0) && px.contains(&(x + dx, y + dy)))
                .count();
            assert!(neighbours >= 2, "isolated pixel at ({x}, {y})");
        }
    }

    #[test]
    fn flat_ellipse_reaches_its_tips() {
        let mut fb = canvas(80, 6);
        ellipse(&mut fb, p(40, 2), 72, 4, Some(Color::White), None);
        let px = painted(&fb, Color::White);
        assert!(px.contains(&(4, 2)));
        assert!(px.contains(&(76, 2)));
        assert_eq!(px.iter().map(|&(x, _)| x).min(), Some(4));
        assert_eq!(px.iter().map(|&(x, _)| x).max(), Some(76));
    }

    #[test]
    fn ellipse_respects_both_radii() {
        let mut fb = canvas(30, 12);
        ellipse(&mut fb, p(15, 5), 20, 8, Some(Color::White), None);
        let px = painted(&fb, Color::White);
        let xs = px.iter().map(|&(x, _)| x);
        let ys = px.iter().map(|&(_, y)| y);
        assert_eq!(xs.clone().min(), Some(5));
        assert_eq!(xs.max(), Some(25));
        assert_eq!(ys.clone().min(), Some(1));
        assert_eq!(ys.max(), Some(9));
    }

    #[test]
    fn fill_spans_match_boundary_equation() {
        let mut fb = canvas(21, 22);
        ellipse(&mut fb, p(10, 10), 12, 8, None, Some(Color::Blue));
        // rx = 6, ry = 4.
        for dy in -4_i64..=4 {
            let bound = isqrt(36 * (16 - dy * dy)) / 4;
            let y = 10 + i32::try_from(dy).unwrap();
            let b = i32::try_from(bound).unwrap();
            assert_eq!(fb.get(10 - b, y), Some(Color::Blue));
            assert_eq!(fb.get(10 + b, y), Some(Color::Blue));
            assert_eq!(fb.get(10 + b + 1, y), Some(Color::Black), "row {dy}");
            assert_eq!(fb.get(10 - b - 1, y), Some(Color::Black), "row {dy}");
        }
        // Nothing painted above or below the radii.
        assert_eq!(fb.row(15).unwrap().iter().filter(|&&c| c == Color::Blue).count(), 0);
        assert_eq!(fb.row(5).unwrap().iter().filter(|&&c| c == Color::Blue).count(), 0);
    }

    #[test]
    fn outline_wins_over_fill() {
        let mut outline_only = canvas(31, 24);
        ellipse(&mut outline_only, p(15, 11), 24, 18, Some(Color::Red), None);
        let outline = painted(&outline_only, Color::Red);

        let mut both = canvas(31, 24);
        ellipse(&mut both, p(15, 11), 24, 18, Some(Color::Red), Some(Color::Green));
        for &(x, y) in &outline {
            assert_eq!(both.get(x, y), Some(Color::Red), "({x}, {y})");
        }
        assert_eq!(both.get(15, 11), Some(Color::Green));
    }

    #[test]
    fn zero_radius_plots_centre_with_line_color() {
        let mut fb = canvas(5, 4);
        ellipse(&mut fb, p(2, 2), 1, 10, Some(Color::Red), Some(Color::Green));
        assert_eq!(painted(&fb, Color::Red), BTreeSet::from([(2, 2)]));
        assert!(painted(&fb, Color::Green).is_empty());
    }

    #[test]
    fn zero_radius_without_line_is_noop() {
        let mut fb = canvas(5, 4);
        let before = fb.clone();
        ellipse(&mut fb, p(2, 2), 0, 0, None, Some(Color::Green));
        ellipse(&mut fb, p(2, 2), -6, 4, None, Some(Color::Green));
        assert_eq!(fb, before);
    }

    #[test]
    fn both_passes_skipped_is_noop() {
        let mut fb = canvas(10, 10);
        let before = fb.clone();
        ellipse(&mut fb, p(5, 5), 6, 6, None, None);
        assert_eq!(fb, before);
    }

    #[test]
    fn ellipse_partly_off_canvas() {
        let mut fb = canvas(10, 10);
        ellipse(&mut fb, p(0, 0), 10, 10, Some(Color::Red), Some(Color::Blue));
        assert_eq!(fb.get(0, 0), Some(Color::Blue));
        assert_eq!(fb.get(5, 0), Some(Color::Red));
        assert_eq!(fb.get(0, 5), Some(Color::Red));
    }

    // ── Rectangle ───────────────────────────────────────────────────────

    fn bbox(px: &BTreeSet<(i32, i32)>) -> (i32, i32, i32, i32) {
        let xs: Vec<_> = px.iter().map(|&(x, _)| x).collect();
        let ys: Vec<_> = px.iter().map(|&(_, y)| y).collect();
        (
            *xs.iter().min().unwrap(),
            *ys.iter().min().unwrap(),
            *xs.iter().max().unwrap(),
            *ys.iter().max().unwrap(),
        )
    }

    #[test]
    fn odd_rectangle_is_centred() {
        let mut fb = canvas(12, 12);
        rectangle(&mut fb, p(5, 5), 5, 3, None, Some(Color::Blue));
        let px = painted(&fb, Color::Blue);
        assert_eq!(px.len(), 15);
        assert_eq!(bbox(&px), (3, 4, 7, 6));
    }

    #[test]
    fn even_rectangle_shifts_upper_right_inward() {
        let mut fb = canvas(12, 12);
        rectangle(&mut fb, p(5, 5), 4, 6, None, Some(Color::Blue));
        let px = painted(&fb, Color::Blue);
        assert_eq!(px.len(), 24);
        assert_eq!(bbox(&px), (3, 2, 6, 7));
    }

    #[test]
    fn rectangle_outline_is_border_only() {
        let mut fb = canvas(12, 12);
        rectangle(&mut fb, p(5, 5), 5, 5, Some(Color::Red), None);
        let px = painted(&fb, Color::Red);
        assert_eq!(px.len(), 16);
        assert_eq!(bbox(&px), (3, 3, 7, 7));
        assert!(!px.contains(&(5, 5)));
    }

    #[test]
    fn rectangle_outline_drawn_over_fill() {
        let mut fb = canvas(12, 12);
        rectangle(&mut fb, p(5, 5), 6, 4, Some(Color::Red), Some(Color::Blue));
        assert_eq!(painted(&fb, Color::Red).len(), 16);
        assert_eq!(painted(&fb, Color::Blue).len(), 8);
        assert_eq!(fb.get(2, 3), Some(Color::Red));
        assert_eq!(fb.get(4, 5), Some(Color::Blue));
    }

    #[test]
    fn one_pixel_rectangle() {
        let mut fb = canvas(4, 4);
        rectangle(&mut fb, p(1, 2), 1, 1, Some(Color::Red), None);
        assert_eq!(painted(&fb, Color::Red), BTreeSet::from([(1, 2)]));
    }

    #[test]
    fn non_positive_rectangle_is_noop() {
        let mut fb = canvas(4, 4);
        let before = fb.clone();
        rectangle(&mut fb, p(1, 1), 0, 3, Some(Color::Red), Some(Color::Red));
        rectangle(&mut fb, p(1, 1), 3, -1, Some(Color::Red), Some(Color::Red));
        assert_eq!(fb, before);
    }

    #[test]
    fn rectangle_clips_at_edges() {
        let mut fb = canvas(4, 4);
        rectangle(&mut fb, p(0, 0), 5, 5, None, Some(Color::Red));
        assert_eq!(painted(&fb, Color::Red).len(), 9);
    }
}
