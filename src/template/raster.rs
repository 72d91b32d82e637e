//! 1-px outline drawing on a `u8` canvas.

use crate::image::OwnedImage;

/// Coordinates are clamped to this magnitude before drawing so that the
/// integer stepping below cannot overflow.
const COORD_LIMIT: i64 = 1 << 30;

/// Draws a connected chain of segments with 8-connected Bresenham steps.
///
/// When `closed` is set the last vertex is joined back to the first.
/// Pixels outside the canvas are dropped.
pub fn draw_polyline(canvas: &mut OwnedImage, points: &[(i64, i64)], closed: bool, value: u8) {
    if points.len() < 2 {
        return;
    }
    for pair in points.windows(2) {
        draw_segment(canvas, pair[0], pair[1], value);
    }
    if closed {
        if let (Some(&last), Some(&first)) = (points.last(), points.first()) {
            draw_segment(canvas, last, first, value);
        }
    }
}

/// Draws one segment including both endpoints.
pub fn draw_segment(canvas: &mut OwnedImage, from: (i64, i64), to: (i64, i64), value: u8) {
    let width = canvas.width() as i64;
    let height = canvas.height() as i64;
    let (x0, y0) = clamp_coord(from);
    let (x1, y1) = clamp_coord(to);

    if x0.max(x1) < 0 || y0.max(y1) < 0 || x0.min(x1) >= width || y0.min(y1) >= height {
        return;
    }

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        if x >= 0 && y >= 0 && x < width && y < height {
            canvas.put(x as usize, y as usize, value);
        }
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
}

fn clamp_coord((x, y): (i64, i64)) -> (i64, i64) {
    (
        x.clamp(-COORD_LIMIT, COORD_LIMIT),
        y.clamp(-COORD_LIMIT, COORD_LIMIT),
    )
}
