use std::cmp::{max, min};

use kornia_imgproc::draw;

use crate::canvas::Canvas;

/// Clip a segment against an axis aligned box using the Liang-Barsky algorithm.
///
/// Returns the parameters `(t0, t1)` of the visible part along `p0 + t * (p1 - p0)`.
/// Computed in double precision since projected points can lie far outside the canvas.
fn clip_segment(
    p0: (f64, f64),
    p1: (f64, f64),
    min_corner: (f64, f64),
    max_corner: (f64, f64),
) -> Option<(f64, f64)> {
    let dx = p1.0 - p0.0;
    let dy = p1.1 - p0.1;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    let edges = [
        (-dx, p0.0 - min_corner.0),
        (dx, max_corner.0 - p0.0),
        (-dy, p0.1 - min_corner.1),
        (dy, max_corner.1 - p0.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    (t0 <= t1).then_some((t0, t1))
}

#[inline]
fn widen(p: (f32, f32)) -> (f64, f64) {
    (p.0 as f64, p.1 as f64)
}

#[inline]
fn lerp(p0: (f64, f64), p1: (f64, f64), t: f64) -> (f64, f64) {
    (p0.0 + (p1.0 - p0.0) * t, p0.1 + (p1.1 - p0.1) * t)
}

#[inline]
fn narrow(p: (f64, f64)) -> (f32, f32) {
    (p.0 as f32, p.1 as f32)
}

#[inline]
fn is_finite(p: (f32, f32)) -> bool {
    p.0.is_finite() && p.1.is_finite()
}

/// Pixel bounds of a box grown by `margin`, clamped to the canvas.
///
/// Clamped in floating point before the conversion, a box far outside the canvas
/// yields an empty range.
fn pixel_bounds(
    canvas: &Canvas,
    min_corner: (f32, f32),
    max_corner: (f32, f32),
    margin: f32,
) -> (i64, i64, i64, i64) {
    let clamp = |v: f32, hi: usize| v.clamp(0.0, hi as f32) as i64;
    let (cols, rows) = (canvas.cols(), canvas.rows());
    let x0 = clamp((min_corner.0 - margin).floor(), cols);
    let y0 = clamp((min_corner.1 - margin).floor(), rows);
    let x1 = clamp((max_corner.0 + margin).ceil() + 1.0, cols);
    let y1 = clamp((max_corner.1 + margin).ceil() + 1.0, rows);
    (x0, y0, x1, y1)
}

/// Fills the pixels whose centers lie within `half_width` of a segment, with flat caps.
///
/// Every pixel is blended at most once so translucent strokes stay uniform.
fn stroke_segment(
    canvas: &mut Canvas,
    p0: (f32, f32),
    p1: (f32, f32),
    color: [u8; 4],
    half_width: f32,
) {
    let dx = p1.0 - p0.0;
    let dy = p1.1 - p0.1;
    let len2 = dx * dx + dy * dy;
    if len2 <= f32::EPSILON {
        return;
    }
    let len = len2.sqrt();

    let (x0, y0, x1, y1) = pixel_bounds(
        canvas,
        (p0.0.min(p1.0), p0.1.min(p1.1)),
        (p0.0.max(p1.0), p0.1.max(p1.1)),
        half_width,
    );
    for y in y0..y1 {
        let py = y as f32 + 0.5 - p0.1;
        for x in x0..x1 {
            let px = x as f32 + 0.5 - p0.0;
            let t = (px * dx + py * dy) / len2;
            if !(0.0..=1.0).contains(&t) {
                continue;
            }
            if (px * dy - py * dx).abs() / len <= half_width {
                canvas.blend_pixel(x, y, color);
            }
        }
    }
}

/// Draws a segment that lies on or next to the canvas.
fn draw_span(
    canvas: &mut Canvas,
    a: (f64, f64),
    b: (f64, f64),
    color: [u8; 4],
    thickness: f32,
) {
    let (a, b) = (narrow(a), narrow(b));
    match (thickness <= 1.0, color[3]) {
        (true, 255) => draw::draw_line(
            canvas.as_image_mut(),
            (a.0.floor() as i64, a.1.floor() as i64),
            (b.0.floor() as i64, b.1.floor() as i64),
            color,
            1,
        ),
        (true, _) => stroke_segment(canvas, a, b, color, 0.5),
        (false, _) => stroke_segment(canvas, a, b, color, thickness / 2.0),
    }
}

/// The part of a stroke that can touch the canvas.
struct VisibleSpan {
    start: (f64, f64),
    end: (f64, f64),
    /// Distance from the original start point to `start`.
    offset: f64,
}

/// Clips a stroke to the canvas grown by its width.
///
/// Each clipped end is interpolated from the nearer original end point, so a segment
/// reaching far outside the canvas keeps its visible part exact.
fn visible_span(
    canvas: &Canvas,
    p0: (f32, f32),
    p1: (f32, f32),
    thickness: f32,
) -> Option<VisibleSpan> {
    if !is_finite(p0) || !is_finite(p1) || !(thickness > 0.0) {
        return None;
    }
    let margin = thickness.max(1.0) as f64;
    let min_corner = (-margin, -margin);
    let max_corner = (canvas.cols() as f64 + margin, canvas.rows() as f64 + margin);

    let (p0, p1) = (widen(p0), widen(p1));
    let (t0, t1) = clip_segment(p0, p1, min_corner, max_corner)?;
    let (s0, s1) = clip_segment(p1, p0, min_corner, max_corner)?;

    let start = if t0 <= 0.5 {
        lerp(p0, p1, t0)
    } else {
        lerp(p1, p0, s1)
    };
    let end = if s0 <= 0.5 {
        lerp(p1, p0, s0)
    } else {
        lerp(p0, p1, t1)
    };
    let length = ((p1.0 - p0.0).powi(2) + (p1.1 - p0.1).powi(2)).sqrt();
    Some(VisibleSpan {
        start,
        end,
        offset: t0 * length,
    })
}

/// Draws a line on a canvas inplace.
///
/// Opaque lines up to one pixel wide use Bresenham's algorithm, other lines are filled
/// as a rectangle around the segment. The segment is clipped to the canvas first, so end
/// points far outside the canvas are cheap.
///
/// # Arguments
///
/// * `canvas` - The canvas to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - The RGBA color of the line.
/// * `thickness` - The width of the line in pixels.
pub fn draw_line(
    canvas: &mut Canvas,
    p0: (f32, f32),
    p1: (f32, f32),
    color: [u8; 4],
    thickness: f32,
) {
    if let Some(span) = visible_span(canvas, p0, p1, thickness) {
        draw_span(canvas, span.start, span.end, color, thickness);
    }
}

/// Draws a dashed line on a canvas inplace.
///
/// The dash phase starts at `p0` and is kept when the segment is clipped. A pattern
/// with a period shorter than a pixel is drawn solid.
///
/// # Arguments
///
/// * `canvas` - The canvas to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - The RGBA color of the line.
/// * `thickness` - The width of the line in pixels.
/// * `on` - The length of a dash in pixels.
/// * `off` - The length of a gap in pixels.
pub fn draw_dashed_line(
    canvas: &mut Canvas,
    p0: (f32, f32),
    p1: (f32, f32),
    color: [u8; 4],
    thickness: f32,
    on: f32,
    off: f32,
) {
    let period = on + off;
    if !(on > 0.0) || !(off > 0.0) || !(period >= 1.0) {
        draw_line(canvas, p0, p1, color, thickness);
        return;
    }
    let Some(span) = visible_span(canvas, p0, p1, thickness) else {
        return;
    };

    let (a, b) = (span.start, span.end);
    let length = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
    if length <= f64::EPSILON {
        return;
    }
    let (on, period) = (on as f64, period as f64);

    // dashes are walked in the coordinates of the visible span
    let mut dash = -span.offset.rem_euclid(period);
    while dash < length {
        let from = dash.max(0.0);
        let to = (dash + on).min(length);
        if to > from {
            draw_span(
                canvas,
                lerp(a, b, from / length),
                lerp(a, b, to / length),
                color,
                thickness,
            );
        }
        dash += period;
    }
}

/// Draws a filled circle on a canvas inplace.
///
/// # Arguments
///
/// * `canvas` - The canvas to draw on.
/// * `center` - The center of the circle as a tuple of (x, y).
/// * `radius` - The radius of the circle in pixels.
/// * `color` - The RGBA fill color.
pub fn draw_filled_circle(canvas: &mut Canvas, center: (f32, f32), radius: f32, color: [u8; 4]) {
    if !is_finite(center) || !(radius > 0.0) {
        return;
    }
    let r2 = radius * radius;
    let (x0, y0, x1, y1) = pixel_bounds(canvas, center, center, radius);
    for y in y0..y1 {
        let dy = y as f32 + 0.5 - center.1;
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - center.0;
            if dx * dx + dy * dy <= r2 {
                canvas.blend_pixel(x, y, color);
            }
        }
    }
}

/// Draws a circle outline on a canvas inplace.
///
/// The stroke is centered on the radius.
///
/// # Arguments
///
/// * `canvas` - The canvas to draw on.
/// * `center` - The center of the circle as a tuple of (x, y).
/// * `radius` - The radius of the circle in pixels.
/// * `color` - The RGBA stroke color.
/// * `thickness` - The stroke width in pixels.
pub fn draw_circle(
    canvas: &mut Canvas,
    center: (f32, f32),
    radius: f32,
    color: [u8; 4],
    thickness: f32,
) {
    if !is_finite(center) || !(radius > 0.0) || !(thickness > 0.0) {
        return;
    }
    let half = thickness.max(1.0) / 2.0;
    let inner = (radius - half).max(0.0);
    let outer = radius + half;
    let (x0, y0, x1, y1) = pixel_bounds(canvas, center, center, outer);
    for y in y0..y1 {
        let dy = y as f32 + 0.5 - center.1;
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - center.0;
            let d2 = dx * dx + dy * dy;
            if d2 >= inner * inner && d2 <= outer * outer {
                canvas.blend_pixel(x, y, color);
            }
        }
    }
}

/// Draws a filled rectangle on a canvas inplace.
///
/// # Arguments
///
/// * `canvas` - The canvas to draw on.
/// * `top_left` - The top-left corner coordinates (x, y).
/// * `bottom_right` - The bottom-right corner coordinates (x, y), exclusive.
/// * `color` - The RGBA fill color.
pub fn draw_filled_rect(
    canvas: &mut Canvas,
    top_left: (i64, i64),
    bottom_right: (i64, i64),
    color: [u8; 4],
) {
    let (x_start, y_start) = top_left;
    let (x_end, y_end) = bottom_right;

    let x_min = max(0, min(x_start, x_end));
    let y_min = max(0, min(y_start, y_end));
    let x_max = min(canvas.cols() as i64, max(x_start, x_end));
    let y_max = min(canvas.rows() as i64, max(y_start, y_end));

    for y in y_min..y_max {
        for x in x_min..x_max {
            canvas.blend_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CanvasError;
    use kornia_image::ImageSize;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn canvas(width: usize, height: usize) -> Result<Canvas, CanvasError> {
        Canvas::from_size_val(ImageSize { width, height }, BLACK)
    }

    /// Marks lit pixels of the red channel as 1.
    fn mask(canvas: &Canvas) -> Vec<u8> {
        canvas
            .as_slice()
            .chunks_exact(4)
            .map(|px| (px[0] > 0) as u8)
            .collect()
    }

    #[test]
    fn test_clip_segment() -> Result<(), &'static str> {
        let range = clip_segment((-10.0, 5.0), (20.0, 5.0), (0.0, 0.0), (10.0, 10.0));
        let (t0, t1) = range.ok_or("segment should be visible")?;
        assert!((t0 - 1.0 / 3.0).abs() < 1e-9);
        assert!((t1 - 2.0 / 3.0).abs() < 1e-9);
        assert!(clip_segment((-10.0, 20.0), (20.0, 20.0), (0.0, 0.0), (10.0, 10.0)).is_none());
        Ok(())
    }

    #[test]
    fn test_draw_hairline() -> Result<(), CanvasError> {
        let mut img = canvas(5, 5)?;
        draw_line(&mut img, (0.0, 0.0), (4.0, 4.0), WHITE, 1.0);
        #[rustfmt::skip]
        assert_eq!(
            mask(&img),
            vec![
                1, 0, 0, 0, 0,
                0, 1, 0, 0, 0,
                0, 0, 1, 0, 0,
                0, 0, 0, 1, 0,
                0, 0, 0, 0, 1,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_draw_thick_line() -> Result<(), CanvasError> {
        let mut img = canvas(6, 5)?;
        draw_line(&mut img, (1.0, 2.5), (5.0, 2.5), WHITE, 3.0);
        #[rustfmt::skip]
        assert_eq!(
            mask(&img),
            vec![
                0, 0, 0, 0, 0, 0,
                0, 1, 1, 1, 1, 0,
                0, 1, 1, 1, 1, 0,
                0, 1, 1, 1, 1, 0,
                0, 0, 0, 0, 0, 0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_draw_line_far_outside() -> Result<(), CanvasError> {
        let mut img = canvas(8, 8)?;
        draw_line(&mut img, (-1.0e9, 4.5), (1.0e9, 4.5), WHITE, 2.0);
        assert_eq!(img.get_pixel(0, 4)?, WHITE);
        assert_eq!(img.get_pixel(7, 4)?, WHITE);
        assert_eq!(img.get_pixel(3, 0)?, BLACK);

        draw_line(&mut img, (f32::NAN, 0.0), (4.0, 4.0), WHITE, 2.0);
        assert_eq!(img.get_pixel(1, 1)?, BLACK);
        Ok(())
    }

    #[test]
    fn test_translucent_hairline() -> Result<(), CanvasError> {
        let mut img = canvas(6, 3)?;
        draw_line(&mut img, (0.0, 1.5), (6.0, 1.5), [255, 255, 255, 51], 1.0);
        assert_eq!(img.get_pixel(3, 1)?, [51, 51, 51, 255]);
        assert_eq!(img.get_pixel(3, 0)?, BLACK);
        assert_eq!(img.get_pixel(3, 2)?, BLACK);
        Ok(())
    }

    #[test]
    fn test_circles_far_outside() -> Result<(), CanvasError> {
        let mut img = canvas(8, 8)?;
        draw_filled_circle(&mut img, (3.46e20, 4.0), 16.0, WHITE);
        draw_filled_circle(&mut img, (-3.46e20, -1.0e20), 16.0, WHITE);
        draw_circle(&mut img, (4.0, 3.46e20), 22.0, WHITE, 6.0);
        draw_circle(&mut img, (f32::MAX, f32::MAX), 22.0, WHITE, 6.0);
        assert!(mask(&img).iter().all(|&lit| lit == 0));

        // a large radius still covers the canvas from outside
        draw_filled_circle(&mut img, (-10.0, 4.0), 30.0, WHITE);
        assert_eq!(img.get_pixel(7, 7)?, WHITE);
        Ok(())
    }

    #[test]
    fn test_draw_dashed_line() -> Result<(), CanvasError> {
        let mut img = canvas(12, 3)?;
        draw_dashed_line(&mut img, (0.0, 1.5), (12.0, 1.5), WHITE, 2.0, 3.0, 3.0);
        let row: Vec<u8> = mask(&img)[12..24].to_vec();
        assert_eq!(row, vec![1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_dashed_line_keeps_phase_when_clipped() -> Result<(), CanvasError> {
        let mut img = canvas(12, 3)?;
        // starts 30 px to the left, a whole number of periods
        draw_dashed_line(&mut img, (-30.0, 1.5), (12.0, 1.5), WHITE, 2.0, 3.0, 3.0);
        let row: Vec<u8> = mask(&img)[12..24].to_vec();
        assert_eq!(row, vec![1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_draw_circles() -> Result<(), CanvasError> {
        let mut img = canvas(21, 21)?;
        draw_filled_circle(&mut img, (10.5, 10.5), 3.0, WHITE);
        assert_eq!(img.get_pixel(10, 10)?, WHITE);
        assert_eq!(img.get_pixel(10, 15)?, BLACK);

        let mut img = canvas(21, 21)?;
        draw_circle(&mut img, (10.5, 10.5), 8.0, WHITE, 2.0);
        assert_eq!(img.get_pixel(10, 10)?, BLACK);
        assert_eq!(img.get_pixel(18, 10)?, WHITE);
        assert_eq!(img.get_pixel(10, 2)?, WHITE);
        Ok(())
    }

    #[test]
    fn test_translucent_stroke_blends_once() -> Result<(), CanvasError> {
        let mut img = canvas(10, 10)?;
        draw_line(&mut img, (0.0, 5.0), (10.0, 5.0), [255, 255, 255, 51], 4.0);
        assert_eq!(img.get_pixel(5, 5)?, [51, 51, 51, 255]);
        assert_eq!(img.get_pixel(5, 4)?, [51, 51, 51, 255]);
        Ok(())
    }

    #[test]
    fn test_draw_filled_rect() -> Result<(), CanvasError> {
        let mut img = canvas(5, 5)?;
        draw_filled_rect(&mut img, (3, 3), (1, 1), WHITE);
        #[rustfmt::skip]
        assert_eq!(
            mask(&img),
            vec![
                0, 0, 0, 0, 0,
                0, 1, 1, 0, 0,
                0, 1, 1, 0, 0,
                0, 0, 0, 0, 0,
                0, 0, 0, 0, 0,
            ]
        );
        Ok(())
    }
}
