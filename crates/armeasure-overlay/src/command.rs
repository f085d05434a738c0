use armeasure_geometry::ScreenPoint;
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// On/off lengths of a dashed stroke, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    /// Length of a drawn dash.
    pub on: f32,
    /// Length of the gap between dashes.
    pub off: f32,
}

impl DashPattern {
    /// Create a new dash pattern.
    pub const fn new(on: f32, off: f32) -> Self {
        Self { on, off }
    }
}

/// How a circle is painted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleStyle {
    /// Filled disk.
    Fill,
    /// Outline of the given stroke width.
    Stroke {
        /// Stroke width in pixels.
        width: f32,
    },
}

/// Blurred drop shadow behind text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// Shadow color.
    pub color: Color,
    /// Blur radius in pixels.
    pub radius: f32,
}

/// Horizontal anchoring of a text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Text starts at the position.
    Left,
    /// Text is centered on the position.
    Center,
    /// Text ends at the position.
    Right,
}

/// A single 2D drawing primitive in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// A straight segment, solid when `dash` is `None`.
    Line {
        /// Start of the segment.
        start: ScreenPoint,
        /// End of the segment.
        end: ScreenPoint,
        /// Stroke color.
        color: Color,
        /// Stroke width in pixels.
        width: f32,
        /// Dash pattern of the stroke.
        dash: Option<DashPattern>,
    },
    /// A circle or disk.
    Circle {
        /// Center of the circle.
        center: ScreenPoint,
        /// Radius in pixels.
        radius: f32,
        /// Paint color.
        color: Color,
        /// Fill or outline.
        style: CircleStyle,
    },
    /// A text label in the scene, such as a distance.
    Text {
        /// Baseline anchor of the text.
        position: ScreenPoint,
        /// Content of the label.
        text: String,
        /// Text color.
        color: Color,
        /// Font size in pixels.
        size: f32,
        /// Whether the text is bold.
        bold: bool,
        /// Optional drop shadow.
        shadow: Option<Shadow>,
        /// Horizontal anchoring.
        align: TextAlign,
    },
    /// The tracking status line, laid out by the host.
    StatusText {
        /// Status message.
        text: String,
    },
}

impl DrawCommand {
    /// Whether the command draws scene geometry, i.e. anything but the status line.
    pub fn is_geometry(&self) -> bool {
        !matches!(self, DrawCommand::StatusText { .. })
    }

    /// Whether the command is a line.
    pub fn is_line(&self) -> bool {
        matches!(self, DrawCommand::Line { .. })
    }

    /// The text of a label or status command.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { text, .. } | DrawCommand::StatusText { text } => Some(text),
            _ => None,
        }
    }
}
