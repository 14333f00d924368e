//! Resize and rotate handles.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which edges a resize handle drags. Names follow the `"bottom-right"`
/// convention used by hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Right,
    Bottom,
    Left,
}

impl ResizeHandle {
    /// The four corner handles, in the order they are offered.
    pub const CORNERS: [ResizeHandle; 4] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
    ];

    /// Handles offered for circles: only vertical drags change the radius.
    pub const CIRCLE_EDGES: [ResizeHandle; 2] = [ResizeHandle::Top, ResizeHandle::Bottom];

    pub fn touches_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::Top)
    }

    pub fn touches_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight | Self::Bottom)
    }

    pub fn touches_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft | Self::Left)
    }

    pub fn touches_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight | Self::Right)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }

    /// Where the handle sits on a bounding box.
    pub fn anchor(self, bounds: Rect) -> Point {
        let x = if self.touches_left() {
            bounds.x0
        } else if self.touches_right() {
            bounds.x1
        } else {
            bounds.center().x
        };
        let y = if self.touches_top() {
            bounds.y0
        } else if self.touches_bottom() {
            bounds.y1
        } else {
            bounds.center().y
        };
        Point::new(x, y)
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unknown handle name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown resize handle: {0}")]
pub struct ParseHandleError(pub String);

impl FromStr for ResizeHandle {
    type Err = ParseHandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let handle = match s {
            "top-left" => Self::TopLeft,
            "top-right" => Self::TopRight,
            "bottom-left" => Self::BottomLeft,
            "bottom-right" => Self::BottomRight,
            "top" => Self::Top,
            "right" => Self::Right,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            other => return Err(ParseHandleError(other.to_string())),
        };
        Ok(handle)
    }
}

/// Type of manipulation handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Resize(ResizeHandle),
    Rotate,
}

/// A handle with its canvas-space position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point hits this handle. `tolerance` is in canvas units.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Handles for a selected layer's bounding box: four corners (top and
/// bottom edge handles for circles) and a rotate handle `rotate_offset`
/// canvas units above the top centre.
pub fn layer_handles(bounds: Rect, is_circle: bool, rotate_offset: f64) -> Vec<Handle> {
    let resize: &[ResizeHandle] = if is_circle {
        &ResizeHandle::CIRCLE_EDGES
    } else {
        &ResizeHandle::CORNERS
    };
    let mut handles = Vec::with_capacity(resize.len() + 1);
    for &handle in resize {
        handles.push(Handle::new(handle.anchor(bounds), HandleKind::Resize(handle)));
    }
    handles.push(Handle::new(
        Point::new(bounds.center().x, bounds.y0 - rotate_offset),
        HandleKind::Rotate,
    ));
    handles
}

/// First handle hit at `point`.
pub fn hit_test_handles(handles: &[Handle], point: Point, tolerance: f64) -> Option<HandleKind> {
    handles
        .iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}
