use std::f32::consts::TAU;

use armeasure_anchor::Anchor;
use armeasure_geometry::{
    distance, format_distance_cm, CameraFrame, HitResult, PointCloud, Pose, ScreenPoint,
};

use crate::{
    command::{CircleStyle, DrawCommand, TextAlign},
    error::ConfigError,
    style::{LineStyle, OverlayStyle},
};

/// Builds the overlay of a frame from the current tracking state.
///
/// The renderer is stateless apart from its style, so it can be called once per display
/// frame from any thread.
#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer {
    style: OverlayStyle,
}

impl OverlayRenderer {
    /// Create a renderer with the given style.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStyle`] if the style does not validate.
    pub fn new(style: OverlayStyle) -> Result<Self, ConfigError> {
        style.validate()?;
        Ok(Self { style })
    }

    /// The style used by the renderer.
    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Produce the draw commands of a frame, back to front.
    ///
    /// # Arguments
    ///
    /// * `frame` - The camera frame to draw over.
    /// * `hit` - The hit at the screen center, if any.
    /// * `anchors` - Every anchor in insertion order; only tracking ones are drawn.
    /// * `point_cloud` - The feature points of the frame, if any.
    ///
    /// When the camera is not tracking only the status line is emitted. Elements whose
    /// projection fails are left out, they never abort the pass.
    pub fn render(
        &self,
        frame: &CameraFrame,
        hit: Option<&HitResult>,
        anchors: &[Anchor],
        point_cloud: Option<&PointCloud>,
    ) -> Vec<DrawCommand> {
        let mut commands = Vec::new();

        if !frame.is_tracking() {
            commands.push(DrawCommand::StatusText {
                text: self.style.status.initializing.clone(),
            });
            return commands;
        }

        if let Some(hit) = hit.filter(|h| h.is_plane()) {
            self.draw_plane_outline(frame, &hit.pose, &mut commands);
        }

        if let Some(cloud) = point_cloud {
            self.draw_point_cloud(frame, cloud, &mut commands);
        }

        let active: Vec<&Anchor> = anchors.iter().filter(|a| a.is_active()).collect();
        self.draw_measurements(frame, &active, &mut commands);

        if let (Some(last), Some(hit)) = (active.last(), hit) {
            self.draw_live_measurement(frame, last, hit, &mut commands);
        }

        self.draw_markers(frame, &active, &mut commands);
        self.draw_crosshair(frame, hit, &mut commands);

        commands.push(DrawCommand::StatusText {
            text: status_message(&self.style, frame, hit).to_string(),
        });

        log::debug!(
            "overlay: {} commands, {} active anchors of {}",
            commands.len(),
            active.len(),
            anchors.len()
        );
        commands
    }

    fn draw_plane_outline(&self, frame: &CameraFrame, center: &Pose, out: &mut Vec<DrawCommand>) {
        let outline = &self.style.plane_outline;
        let step = TAU / outline.segments as f32;

        // sample segments + 1 points so the last one closes the loop
        let points: Vec<Option<ScreenPoint>> = (0..=outline.segments)
            .map(|i| {
                let angle = i as f32 * step;
                let offset = Pose::from_xyz(
                    angle.cos() * outline.radius,
                    0.0,
                    angle.sin() * outline.radius,
                );
                frame.project(&center.compose(&offset))
            })
            .collect();

        if points.iter().flatten().count() < outline.min_points {
            return;
        }

        // a failed projection breaks the polyline, neighbours are not re-joined
        for pair in points.windows(2) {
            if let [Some(start), Some(end)] = pair {
                out.push(DrawCommand::Line {
                    start: *start,
                    end: *end,
                    color: outline.color,
                    width: outline.width,
                    dash: Some(outline.dash),
                });
            }
        }
    }

    fn draw_point_cloud(
        &self,
        frame: &CameraFrame,
        cloud: &PointCloud,
        out: &mut Vec<DrawCommand>,
    ) {
        let style = &self.style.point_cloud;
        out.extend(
            cloud
                .strided(style.stride)
                .filter_map(|sample| frame.project_point(sample.position))
                .map(|center| DrawCommand::Circle {
                    center,
                    radius: style.radius,
                    color: style.color,
                    style: CircleStyle::Fill,
                }),
        );
    }

    fn draw_measurements(
        &self,
        frame: &CameraFrame,
        active: &[&Anchor],
        out: &mut Vec<DrawCommand>,
    ) {
        for pair in active.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (Some(start), Some(end)) = (frame.project(&a.pose), frame.project(&b.pose)) else {
                continue;
            };
            out.push(line(start, end, &self.style.measurement_line));
            out.push(self.distance_label(start, end, distance(&a.pose, &b.pose)));
        }
    }

    fn draw_live_measurement(
        &self,
        frame: &CameraFrame,
        last: &Anchor,
        hit: &HitResult,
        out: &mut Vec<DrawCommand>,
    ) {
        let Some(start) = frame.project(&last.pose) else {
            return;
        };
        let end = frame.screen_center();
        out.push(line(start, end, &self.style.live_line));
        out.push(self.distance_label(start, end, distance(&last.pose, &hit.pose)));
    }

    fn draw_markers(&self, frame: &CameraFrame, active: &[&Anchor], out: &mut Vec<DrawCommand>) {
        let marker = &self.style.marker;
        for center in active.iter().filter_map(|a| frame.project(&a.pose)) {
            out.push(DrawCommand::Circle {
                center,
                radius: marker.fill_radius,
                color: marker.color,
                style: CircleStyle::Fill,
            });
            out.push(DrawCommand::Circle {
                center,
                radius: marker.ring_radius,
                color: marker.color,
                style: CircleStyle::Stroke {
                    width: marker.ring_width,
                },
            });
        }
    }

    fn draw_crosshair(
        &self,
        frame: &CameraFrame,
        hit: Option<&HitResult>,
        out: &mut Vec<DrawCommand>,
    ) {
        let crosshair = &self.style.crosshair;
        let center = frame.screen_center();
        let color = if hit.is_some() {
            crosshair.locked
        } else {
            crosshair.searching
        };

        if !hit.is_some_and(|h| h.is_plane()) {
            out.push(DrawCommand::Circle {
                center,
                radius: crosshair.ring_radius,
                color,
                style: CircleStyle::Stroke {
                    width: crosshair.ring_width,
                },
            });
        }
        out.push(DrawCommand::Circle {
            center,
            radius: crosshair.dot_radius,
            color,
            style: CircleStyle::Fill,
        });
    }

    fn distance_label(&self, start: ScreenPoint, end: ScreenPoint, meters: f32) -> DrawCommand {
        let label = &self.style.label;
        DrawCommand::Text {
            position: start.midpoint(&end).offset(0.0, -label.vertical_offset),
            text: format_distance_cm(meters),
            color: label.color,
            size: label.size,
            bold: label.bold,
            shadow: label.shadow,
            align: TextAlign::Center,
        }
    }
}

fn line(start: ScreenPoint, end: ScreenPoint, style: &LineStyle) -> DrawCommand {
    DrawCommand::Line {
        start,
        end,
        color: style.color,
        width: style.width,
        dash: style.dash,
    }
}

/// The status line for a frame: initializing, locked on a surface, or searching.
pub fn status_message<'a>(
    style: &'a OverlayStyle,
    frame: &CameraFrame,
    hit: Option<&HitResult>,
) -> &'a str {
    match (frame.is_tracking(), hit) {
        (false, _) => &style.status.initializing,
        (true, Some(_)) => &style.status.locked,
        (true, None) => &style.status.searching,
    }
}

/// Render a frame with the default style, see [`OverlayRenderer::render`].
pub fn render(
    frame: &CameraFrame,
    hit: Option<&HitResult>,
    anchors: &[Anchor],
    point_cloud: Option<&PointCloud>,
) -> Vec<DrawCommand> {
    OverlayRenderer::default().render(frame, hit, anchors, point_cloud)
}
