use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    command::{DashPattern, Shadow},
    error::ConfigError,
};

/// Appearance of the dashed circle drawn around a plane hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneOutlineStyle {
    /// Circle radius in meters.
    pub radius: f32,
    /// Number of segments; `segments + 1` points are sampled to close the loop.
    pub segments: usize,
    /// Minimum number of projected points required to draw the outline.
    pub min_points: usize,
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    /// Dash pattern.
    pub dash: DashPattern,
}

impl Default for PlaneOutlineStyle {
    fn default() -> Self {
        Self {
            radius: 0.05,
            segments: 24,
            min_points: 3,
            color: Color::GREEN,
            width: 6.0,
            dash: DashPattern::new(12.0, 12.0),
        }
    }
}

/// Appearance of the feature point cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointCloudStyle {
    /// Only every `stride`-th point is drawn.
    pub stride: usize,
    /// Dot radius in pixels.
    pub radius: f32,
    /// Dot color.
    pub color: Color,
}

impl Default for PointCloudStyle {
    fn default() -> Self {
        Self {
            stride: 15,
            radius: 3.0,
            color: Color::CYAN.with_alpha(0.2),
        }
    }
}

/// Appearance of a measurement line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    /// Dash pattern, solid when `None`.
    pub dash: Option<DashPattern>,
}

/// Appearance of the distance labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Whether the label is bold.
    pub bold: bool,
    /// Drop shadow.
    pub shadow: Option<Shadow>,
    /// Distance in pixels the label is raised above the segment midpoint.
    pub vertical_offset: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            size: 52.0,
            bold: true,
            shadow: Some(Shadow {
                color: Color::BLACK,
                radius: 10.0,
            }),
            vertical_offset: 20.0,
        }
    }
}

/// Appearance of the anchor markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Marker color.
    pub color: Color,
    /// Radius of the filled disk in pixels.
    pub fill_radius: f32,
    /// Radius of the outline ring in pixels.
    pub ring_radius: f32,
    /// Stroke width of the ring in pixels.
    pub ring_width: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            fill_radius: 16.0,
            ring_radius: 22.0,
            ring_width: 6.0,
        }
    }
}

/// Appearance of the screen center crosshair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosshairStyle {
    /// Color when a hit is available.
    pub locked: Color,
    /// Color while searching for a surface.
    pub searching: Color,
    /// Radius of the ring in pixels.
    pub ring_radius: f32,
    /// Stroke width of the ring in pixels.
    pub ring_width: f32,
    /// Radius of the center dot in pixels.
    pub dot_radius: f32,
}

impl Default for CrosshairStyle {
    fn default() -> Self {
        Self {
            locked: Color::GREEN,
            searching: Color::RED,
            ring_radius: 48.0,
            ring_width: 6.0,
            dot_radius: 6.0,
        }
    }
}

/// Status line messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusMessages {
    /// Shown while the camera is not tracking.
    pub initializing: String,
    /// Shown while tracking with a hit at the screen center.
    pub locked: String,
    /// Shown while tracking without a hit.
    pub searching: String,
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self {
            initializing: "Initializing AR...".to_string(),
            locked: "Locked".to_string(),
            searching: "Move to find a surface".to_string(),
        }
    }
}

/// Complete overlay appearance.
///
/// Missing fields fall back to their defaults when deserializing.
///
/// # Example
///
/// ```
/// use armeasure_overlay::OverlayStyle;
///
/// let style = OverlayStyle::from_json_str(r#"{ "point_cloud": { "stride": 5 } }"#)?;
/// assert_eq!(style.point_cloud.stride, 5);
/// assert_eq!(style.plane_outline.segments, 24);
/// # Ok::<(), armeasure_overlay::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Dashed circle around a plane hit.
    pub plane_outline: PlaneOutlineStyle,
    /// Feature points.
    pub point_cloud: PointCloudStyle,
    /// Lines between consecutive anchors.
    pub measurement_line: LineStyle,
    /// Line from the last anchor to the screen center.
    pub live_line: LineStyle,
    /// Distance labels.
    pub label: LabelStyle,
    /// Anchor markers.
    pub marker: MarkerStyle,
    /// Screen center crosshair.
    pub crosshair: CrosshairStyle,
    /// Status line messages.
    pub status: StatusMessages,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            plane_outline: PlaneOutlineStyle::default(),
            point_cloud: PointCloudStyle::default(),
            measurement_line: LineStyle {
                color: Color::WHITE,
                width: 12.0,
                dash: None,
            },
            live_line: LineStyle {
                color: Color::WHITE.with_alpha(0.7),
                width: 6.0,
                dash: Some(DashPattern::new(24.0, 12.0)),
            },
            label: LabelStyle::default(),
            marker: MarkerStyle::default(),
            crosshair: CrosshairStyle::default(),
            status: StatusMessages::default(),
        }
    }
}

impl OverlayStyle {
    /// Parse a style from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let style: Self = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let outline = &self.plane_outline;
        if outline.segments == 0 {
            return Err(ConfigError::InvalidStyle(
                "plane outline needs at least one segment".to_string(),
            ));
        }
        if self.point_cloud.stride == 0 {
            return Err(ConfigError::InvalidStyle(
                "point cloud stride must be at least 1".to_string(),
            ));
        }

        let lengths = [
            ("plane_outline.radius", outline.radius),
            ("plane_outline.width", outline.width),
            ("point_cloud.radius", self.point_cloud.radius),
            ("measurement_line.width", self.measurement_line.width),
            ("live_line.width", self.live_line.width),
            ("label.size", self.label.size),
            ("marker.fill_radius", self.marker.fill_radius),
            ("marker.ring_radius", self.marker.ring_radius),
            ("marker.ring_width", self.marker.ring_width),
            ("crosshair.ring_radius", self.crosshair.ring_radius),
            ("crosshair.ring_width", self.crosshair.ring_width),
            ("crosshair.dot_radius", self.crosshair.dot_radius),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidStyle(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if let Some(shadow) = &self.label.shadow {
            if !(shadow.radius.is_finite() && shadow.radius >= 0.0) {
                return Err(ConfigError::InvalidStyle(format!(
                    "label.shadow.radius must not be negative, got {}",
                    shadow.radius
                )));
            }
        }
        if !self.label.vertical_offset.is_finite() {
            return Err(ConfigError::InvalidStyle(
                "label.vertical_offset must be finite".to_string(),
            ));
        }

        let dashes = [
            Some(outline.dash),
            self.measurement_line.dash,
            self.live_line.dash,
        ];
        for dash in dashes.into_iter().flatten() {
            if !(dash.on > 0.0 && dash.off >= 0.0) {
                return Err(ConfigError::InvalidStyle(format!(
                    "invalid dash pattern {dash:?}"
                )));
            }
        }
        Ok(())
    }
}
