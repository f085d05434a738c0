use armeasure_geometry::ScreenPoint;
use armeasure_overlay::{CircleStyle, Color, DrawCommand, Shadow, TextAlign};

use kornia_image::ImageSize;

use crate::{canvas::Canvas, draw, error::CanvasError};

/// Approximate advance of a glyph relative to the font size.
const GLYPH_ASPECT: f32 = 0.55;
/// Font size of the status line in pixels.
const STATUS_FONT_SIZE: f32 = 40.0;
/// Distance of the status line from the top edge in pixels.
const STATUS_MARGIN: f32 = 48.0;
/// Padding around the status line in pixels.
const STATUS_PADDING: f32 = 12.0;

/// Rasterize the draw commands in order onto a canvas.
///
/// Later commands are composited over earlier ones. Text is drawn as the box it would
/// occupy, so the output shows layout but not glyphs.
///
/// # Arguments
///
/// * `canvas` - The canvas to draw on.
/// * `commands` - The commands produced by the overlay renderer.
pub fn rasterize(canvas: &mut Canvas, commands: &[DrawCommand]) {
    for command in commands {
        match command {
            DrawCommand::Line {
                start,
                end,
                color,
                width,
                dash,
            } => match dash {
                Some(dash) => draw::draw_dashed_line(
                    canvas,
                    point(start),
                    point(end),
                    color.to_array(),
                    *width,
                    dash.on,
                    dash.off,
                ),
                None => draw::draw_line(canvas, point(start), point(end), color.to_array(), *width),
            },
            DrawCommand::Circle {
                center,
                radius,
                color,
                style,
            } => match style {
                CircleStyle::Fill => {
                    draw::draw_filled_circle(canvas, point(center), *radius, color.to_array())
                }
                CircleStyle::Stroke { width } => {
                    draw::draw_circle(canvas, point(center), *radius, color.to_array(), *width)
                }
            },
            DrawCommand::Text {
                position,
                text,
                color,
                size,
                shadow,
                align,
                ..
            } => draw_text_box(canvas, position, text, *color, *size, *shadow, *align),
            DrawCommand::StatusText { text } => draw_status(canvas, text),
        }
    }
    log::debug!(
        "rasterized {} commands on a {} canvas",
        commands.len(),
        canvas.size()
    );
}

/// Create a canvas of the given size, filled with `background`, and rasterize onto it.
pub fn rasterize_to_canvas(
    size: ImageSize,
    background: Color,
    commands: &[DrawCommand],
) -> Result<Canvas, CanvasError> {
    let mut canvas = Canvas::from_size_val(size, background.to_array())?;
    rasterize(&mut canvas, commands);
    Ok(canvas)
}

#[inline]
fn point(p: &ScreenPoint) -> (f32, f32) {
    (p.x, p.y)
}

/// Horizontal extent and vertical extent of a text placed at `position`.
fn text_bounds(
    position: &ScreenPoint,
    text: &str,
    size: f32,
    align: TextAlign,
) -> ((f32, f32), (f32, f32)) {
    let width = text.chars().count() as f32 * size * GLYPH_ASPECT;
    let left = match align {
        TextAlign::Left => position.x,
        TextAlign::Center => position.x - width / 2.0,
        TextAlign::Right => position.x - width,
    };
    // position is the baseline, most of a glyph sits above it
    let top = position.y - size * 0.8;
    ((left, top), (left + width, top + size))
}

fn fill_box(canvas: &mut Canvas, min: (f32, f32), max: (f32, f32), color: [u8; 4]) {
    if !(min.0.is_finite() && min.1.is_finite() && max.0.is_finite() && max.1.is_finite()) {
        return;
    }
    draw::draw_filled_rect(
        canvas,
        (min.0.round() as i64, min.1.round() as i64),
        (max.0.round() as i64, max.1.round() as i64),
        color,
    );
}

fn draw_text_box(
    canvas: &mut Canvas,
    position: &ScreenPoint,
    text: &str,
    color: Color,
    size: f32,
    shadow: Option<Shadow>,
    align: TextAlign,
) {
    let (min, max) = text_bounds(position, text, size, align);
    if let Some(shadow) = shadow {
        let grow = shadow.radius / 2.0;
        let color = Color {
            a: shadow.color.a / 2,
            ..shadow.color
        };
        fill_box(
            canvas,
            (min.0 - grow, min.1 - grow),
            (max.0 + grow, max.1 + grow),
            color.to_array(),
        );
    }
    fill_box(canvas, min, max, color.to_array());
}

fn draw_status(canvas: &mut Canvas, text: &str) {
    let position = ScreenPoint::new(
        canvas.cols() as f32 / 2.0,
        STATUS_MARGIN + STATUS_FONT_SIZE,
    );
    let (min, max) = text_bounds(&position, text, STATUS_FONT_SIZE, TextAlign::Center);
    fill_box(
        canvas,
        (min.0 - STATUS_PADDING, min.1 - STATUS_PADDING),
        (max.0 + STATUS_PADDING, max.1 + STATUS_PADDING),
        Color::BLACK.with_alpha(0.5).to_array(),
    );
    fill_box(canvas, min, max, Color::WHITE.to_array());
}
