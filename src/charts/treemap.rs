//! Squarified treemap layout.
//!
//! Implements the row-packing algorithm from Bruls, Huizing & van Wijk,
//! "Squarified Treemaps": items are laid out in rows along the shorter
//! side of the remaining rectangle, and a row is closed as soon as
//! adding the next item would worsen the row's worst aspect ratio.

/// An axis-aligned layout rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Rect {
    /// The rectangle's area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    fn shorter_side(&self) -> f64 {
        self.w.min(self.h)
    }
}

/// Lays out `sizes` inside `bounds`, one rectangle per size, in input order.
///
/// Sizes are treated as relative weights; each output rectangle's area is
/// proportional to its weight. Non-positive weights produce zero-area
/// rectangles at the origin (callers filter those out before labeling).
#[must_use]
pub fn squarify(sizes: &[f64], bounds: Rect) -> Vec<Rect> {
    let total: f64 = sizes.iter().filter(|s| **s > 0.0).sum();
    if total <= 0.0 || bounds.area() <= 0.0 {
        return sizes
            .iter()
            .map(|_| Rect {
                x: bounds.x,
                y: bounds.y,
                w: 0.0,
                h: 0.0,
            })
            .collect();
    }

    // Scale weights so they sum to the bounds area.
    let scale = bounds.area() / total;
    let mut out = vec![
        Rect {
            x: bounds.x,
            y: bounds.y,
            w: 0.0,
            h: 0.0
        };
        sizes.len()
    ];

    let mut remaining = bounds;
    let mut row: Vec<(usize, f64)> = Vec::new();

    for (i, &size) in sizes.iter().enumerate() {
        if size <= 0.0 {
            continue;
        }
        let area = size * scale;
        let side = remaining.shorter_side();

        if row.is_empty() || worst(&row, area, side) <= worst(&row, 0.0, side) {
            row.push((i, area));
        } else {
            lay_out_row(&row, &mut remaining, &mut out);
            row.clear();
            row.push((i, area));
        }
    }
    if !row.is_empty() {
        lay_out_row(&row, &mut remaining, &mut out);
    }

    out
}

/// Worst aspect ratio of the row if `extra` (0 to test the row as-is)
/// were added, for a row laid along a side of length `side`.
fn worst(row: &[(usize, f64)], extra: f64, side: f64) -> f64 {
    let mut sum = extra;
    let mut min = if extra > 0.0 { extra } else { f64::INFINITY };
    let mut max = extra;
    for &(_, area) in row {
        sum += area;
        min = min.min(area);
        max = max.max(area);
    }
    if sum <= 0.0 || side <= 0.0 {
        return f64::INFINITY;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    (side_sq * max / sum_sq).max(sum_sq / (side_sq * min))
}

/// Fixes the row into the remaining rectangle and shrinks it.
fn lay_out_row(row: &[(usize, f64)], remaining: &mut Rect, out: &mut [Rect]) {
    let row_area: f64 = row.iter().map(|(_, a)| a).sum();
    if row_area <= 0.0 {
        return;
    }

    if remaining.w >= remaining.h {
        // Row is a vertical strip on the left
        let strip_w = row_area / remaining.h;
        let mut y = remaining.y;
        for &(i, area) in row {
            let item_h = area / strip_w;
            out[i] = Rect {
                x: remaining.x,
                y,
                w: strip_w,
                h: item_h,
            };
            y += item_h;
        }
        remaining.x += strip_w;
        remaining.w -= strip_w;
    } else {
        // Row is a horizontal strip on top
        let strip_h = row_area / remaining.w;
        let mut x = remaining.x;
        for &(i, area) in row {
            let item_w = area / strip_h;
            out[i] = Rect {
                x,
                y: remaining.y,
                w: item_w,
                h: strip_h,
            };
            x += item_w;
        }
        remaining.y += strip_h;
        remaining.h -= strip_h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 100.0,
        h: 100.0,
    };

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn test_areas_proportional_to_weights() {
        let sizes = [6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0];
        let total: f64 = sizes.iter().sum();
        let rects = squarify(&sizes, UNIT);

        for (size, rect) in sizes.iter().zip(&rects) {
            assert_close(rect.area(), size / total * UNIT.area());
        }
    }

    #[test]
    fn test_rects_stay_in_bounds() {
        let sizes = [5.0, 3.0, 1.0, 1.0];
        for rect in squarify(&sizes, UNIT) {
            assert!(rect.x >= -1e-9 && rect.y >= -1e-9);
            assert!(rect.x + rect.w <= UNIT.w + 1e-9);
            assert!(rect.y + rect.h <= UNIT.h + 1e-9);
        }
    }

    #[test]
    fn test_single_item_fills_bounds() {
        let rects = squarify(&[42.0], UNIT);
        assert_close(rects[0].area(), UNIT.area());
    }

    #[test]
    fn test_zero_weights_collapse() {
        let rects = squarify(&[2.0, 0.0, 2.0], UNIT);
        assert_close(rects[1].area(), 0.0);
        assert_close(rects[0].area() + rects[2].area(), UNIT.area());
    }

    #[test]
    fn test_all_zero_weights() {
        let rects = squarify(&[0.0, 0.0], UNIT);
        assert_eq!(rects.len(), 2);
        assert_close(rects[0].area(), 0.0);
    }

    #[test]
    fn test_no_overlap() {
        let sizes = [6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0];
        let rects = squarify(&sizes, UNIT);
        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                let x_overlap = (a.x + a.w).min(b.x + b.w) - a.x.max(b.x);
                let y_overlap = (a.y + a.h).min(b.y + b.h) - a.y.max(b.y);
                if x_overlap > 1e-6 && y_overlap > 1e-6 {
                    assert!(
                        x_overlap * y_overlap < 1e-6,
                        "rects {a:?} and {b:?} overlap"
                    );
                }
            }
        }
    }
}
