//! Primitive rasterization
//!
//! Integer algorithms that turn shapes into pixel coordinates. They know
//! nothing about the panel: every coordinate is handed to a `plot` callback,
//! which reports whether the pixel landed ([`DrawStatus`]) or fails the whole
//! shape with an error. The status of every pixel is merged, so one clipped
//! pixel marks the shape as clipped.
//!
//! Coordinates are signed so shapes may hang off any edge.

use crate::error::DrawStatus;

/// Bresenham line from (`x0`, `y0`) to (`x1`, `y1`), both endpoints included
pub fn line<E, F>(x0: i32, y0: i32, x1: i32, y1: i32, plot: &mut F) -> Result<DrawStatus, E>
where
    F: FnMut(i32, i32) -> Result<DrawStatus, E> + ?Sized,
{
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);
    let mut status = DrawStatus::Drawn;

    loop {
        status = status.merge(plot(x, y)?);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    Ok(status)
}

/// Rectangle outline with corners (`x0`, `y0`) and (`x1`, `y1`)
pub fn rect<E, F>(x0: i32, y0: i32, x1: i32, y1: i32, plot: &mut F) -> Result<DrawStatus, E>
where
    F: FnMut(i32, i32) -> Result<DrawStatus, E> + ?Sized,
{
    Ok(line(x0, y0, x1, y0, plot)?
        .merge(line(x1, y0, x1, y1, plot)?)
        .merge(line(x1, y1, x0, y1, plot)?)
        .merge(line(x0, y1, x0, y0, plot)?))
}

/// Filled rectangle, swept as horizontal lines
///
/// The x pair and the y pair are each put in order on their own, so any two
/// opposite corners describe the same rectangle.
pub fn fill_rect<E, F>(x0: i32, y0: i32, x1: i32, y1: i32, plot: &mut F) -> Result<DrawStatus, E>
where
    F: FnMut(i32, i32) -> Result<DrawStatus, E> + ?Sized,
{
    let (left, right) = (x0.min(x1), x0.max(x1));
    let (top, bottom) = (y0.min(y1), y0.max(y1));
    let mut status = DrawStatus::Drawn;
    for y in top..=bottom {
        status = status.merge(line(left, y, right, y, plot)?);
    }
    Ok(status)
}

/// Midpoint circle outline
///
/// A radius of 0 plots the center only.
pub fn circle<E, F>(cx: i32, cy: i32, radius: i32, plot: &mut F) -> Result<DrawStatus, E>
where
    F: FnMut(i32, i32) -> Result<DrawStatus, E> + ?Sized,
{
    if radius <= 0 {
        return plot(cx, cy);
    }

    let mut f = 1 - radius;
    let mut ddf_x = 1;
    let mut ddf_y = -2 * radius;
    let mut x = 0;
    let mut y = radius;

    let mut status = plot(cx, cy + radius)?
        .merge(plot(cx, cy - radius)?)
        .merge(plot(cx + radius, cy)?)
        .merge(plot(cx - radius, cy)?);

    while x < y {
        if f >= 0 {
            y -= 1;
            ddf_y += 2;
            f += ddf_y;
        }
        x += 1;
        ddf_x += 2;
        f += ddf_x;

        for (px, py) in [
            (cx + x, cy + y),
            (cx - x, cy + y),
            (cx + x, cy - y),
            (cx - x, cy - y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx + y, cy - x),
            (cx - y, cy - x),
        ] {
            status = status.merge(plot(px, py)?);
        }
    }
    Ok(status)
}

/// Filled circle, drawn as concentric outlines of radius `0..=radius`
pub fn fill_circle<E, F>(cx: i32, cy: i32, radius: i32, plot: &mut F) -> Result<DrawStatus, E>
where
    F: FnMut(i32, i32) -> Result<DrawStatus, E> + ?Sized,
{
    let mut status = DrawStatus::Drawn;
    for r in 0..=radius.max(0) {
        status = status.merge(circle(cx, cy, r, plot)?);
    }
    Ok(status)
}

/// Bytes per row of a packed 1-bpp bitmap `width` pixels wide
pub fn bitmap_row_bytes(width: u8) -> usize {
    usize::from(width).div_ceil(8)
}

/// Packed 1-bpp bitmap with its top-left corner at (`x`, `y`)
///
/// Rows are `(width + 7) / 8` bytes, most significant bit leftmost. Every
/// pixel of the `width` x `height` area is plotted: `plot` receives whether
/// the source bit is set. Bytes missing from a short `data` read as clear.
pub fn bitmap<E, F>(
    x: i32,
    y: i32,
    data: &[u8],
    width: u8,
    height: u8,
    plot: &mut F,
) -> Result<DrawStatus, E>
where
    F: FnMut(i32, i32, bool) -> Result<DrawStatus, E> + ?Sized,
{
    let row_bytes = bitmap_row_bytes(width);
    let mut status = DrawStatus::Drawn;
    for row in 0..height {
        for col in 0..width {
            let index = usize::from(row) * row_bytes + usize::from(col / 8);
            let byte = data.get(index).copied().unwrap_or(0);
            let set = byte & (0x80 >> (col % 8)) != 0;
            status = status.merge(plot(x + i32::from(col), y + i32::from(row), set)?);
        }
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;
    use core::convert::Infallible;

    fn collect<S>(shape: S) -> (Vec<(i32, i32)>, DrawStatus)
    where
        S: FnOnce(
            &mut dyn FnMut(i32, i32) -> Result<DrawStatus, Infallible>,
        ) -> Result<DrawStatus, Infallible>,
    {
        let mut points = Vec::new();
        let status = shape(&mut |x, y| {
            points.push((x, y));
            Ok(DrawStatus::from_visible((0..128).contains(&x) && (0..64).contains(&y)))
        })
        .unwrap();
        (points, status)
    }

    fn set(points: &[(i32, i32)]) -> BTreeSet<(i32, i32)> {
        points.iter().copied().collect()
    }

    #[test]
    fn test_degenerate_line_is_one_pixel() {
        let (points, status) = collect(|plot| line(5, 7, 5, 7, plot));
        assert_eq!(points, [(5, 7)]);
        assert_eq!(status, DrawStatus::Drawn);
    }

    #[test]
    fn test_line_includes_both_endpoints() {
        let (points, _) = collect(|plot| line(0, 0, 4, 2, plot));
        assert_eq!(points.first(), Some(&(0, 0)));
        assert_eq!(points.last(), Some(&(4, 2)));
        assert_eq!(points.len(), 5);
    }

    #[test]
    fn test_line_every_octant() {
        let (cx, cy) = (30, 30);
        for (dx, dy) in [
            (9, 4),
            (4, 9),
            (-4, 9),
            (-9, 4),
            (-9, -4),
            (-4, -9),
            (4, -9),
            (9, -4),
        ] {
            let (points, _) = collect(|plot| line(cx, cy, cx + dx, cy + dy, plot));
            assert_eq!(points.first(), Some(&(cx, cy)));
            assert_eq!(points.last(), Some(&(cx + dx, cy + dy)));
            assert_eq!(points.len(), 10, "octant ({dx}, {dy})");
        }
    }

    #[test]
    fn test_steep_line_has_one_pixel_per_row() {
        let (points, _) = collect(|plot| line(3, 0, 5, 10, plot));
        assert_eq!(points.len(), 11);
        let rows: BTreeSet<i32> = points.iter().map(|&(_, y)| y).collect();
        assert_eq!(rows.len(), 11);
    }

    #[test]
    fn test_line_clip_is_not_lost_by_later_pixels() {
        // Starts off-panel, ends on it
        let (_, status) = collect(|plot| line(-3, 0, 3, 0, plot));
        assert_eq!(status, DrawStatus::Clipped);
    }

    #[test]
    fn test_rect_is_union_of_four_lines() {
        let (outline, _) = collect(|plot| rect(2, 3, 10, 8, plot));
        let mut edges = Vec::new();
        for (x0, y0, x1, y1) in [(2, 3, 10, 3), (10, 3, 10, 8), (10, 8, 2, 8), (2, 8, 2, 3)] {
            edges.extend(collect(|plot| line(x0, y0, x1, y1, plot)).0);
        }
        assert_eq!(set(&outline), set(&edges));
    }

    #[test]
    fn test_fill_rect_sorts_pairs_independently() {
        let (a, _) = collect(|plot| fill_rect(10, 2, 4, 6, plot));
        let (b, _) = collect(|plot| fill_rect(4, 2, 10, 6, plot));
        let filled = set(&a);
        assert_eq!(filled, set(&b));
        assert_eq!(filled.len(), 7 * 5);
    }

    #[test]
    fn test_circle_radius_zero_is_center() {
        let (points, _) = collect(|plot| circle(20, 20, 0, plot));
        assert_eq!(points, [(20, 20)]);
    }

    #[test]
    fn test_fill_circle_radius_zero_is_center() {
        let (points, _) = collect(|plot| fill_circle(20, 20, 0, plot));
        assert_eq!(set(&points), set(&[(20, 20)]));
    }

    #[test]
    fn test_circle_points_are_on_radius() {
        let (points, _) = collect(|plot| circle(30, 30, 10, plot));
        for (x, y) in points {
            let d2 = (x - 30) * (x - 30) + (y - 30) * (y - 30);
            assert!((81..=121).contains(&d2), "({x}, {y}) is off the ring");
        }
    }

    #[test]
    fn test_fill_circle_covers_inner_rings() {
        let (points, _) = collect(|plot| fill_circle(30, 30, 3, plot));
        let filled = set(&points);
        assert!(filled.contains(&(30, 30)));
        assert!(filled.contains(&(31, 30)));
        assert!(filled.contains(&(30, 33)));
        assert!(!filled.contains(&(30, 34)));
    }

    #[test]
    fn test_circle_off_edge_is_clipped() {
        let (_, status) = collect(|plot| circle(0, 0, 4, plot));
        assert_eq!(status, DrawStatus::Clipped);
    }

    #[test]
    fn test_bitmap_msb_first_rows() {
        // 10 pixels wide: two bytes per row
        let data = [0b1000_0000, 0b0100_0000, 0b0000_0001, 0b0000_0000];
        let mut on = Vec::new();
        let mut count = 0;
        bitmap::<Infallible, _>(1, 1, &data, 10, 2, &mut |x, y, set| {
            count += 1;
            if set {
                on.push((x, y));
            }
            Ok(DrawStatus::Drawn)
        })
        .unwrap();
        assert_eq!(count, 20);
        assert_eq!(on, [(1, 1), (10, 1), (8, 2)]);
    }

    #[test]
    fn test_bitmap_short_data_reads_clear() {
        let mut on = 0;
        bitmap::<Infallible, _>(0, 0, &[0xFF], 8, 2, &mut |_, _, set| {
            if set {
                on += 1;
            }
            Ok(DrawStatus::Drawn)
        })
        .unwrap();
        assert_eq!(on, 8);
    }
}
