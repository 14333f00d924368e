//! Layer definitions for the design canvas.
//!
//! A layer is one freeform visual element. Every variant shares position,
//! rotation, visibility and lock state; size and content depend on the variant.
//! Groups own their children directly, and child positions are relative to the
//! group origin. There are no parent back-pointers: parents are found by
//! searching the tree (see [`crate::tree`]).

use crate::color::Color;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a layer, unique across the whole tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text layer payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_weight")]
    pub font_weight: String,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub fill: Color,
}

fn default_font_size() -> f64 {
    24.0
}

fn default_font_family() -> String {
    "Inter".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            text_align: TextAlign::default(),
            fill: Color::black(),
        }
    }
}

/// Image layer payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub border_radius: f64,
}

/// Rectangle layer payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectContent {
    #[serde(default = "default_shape_fill")]
    pub fill: Color,
    #[serde(default)]
    pub border_radius: f64,
    /// CSS box-shadow passed through to the renderer untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
}

impl Default for RectContent {
    fn default() -> Self {
        Self {
            fill: default_shape_fill(),
            border_radius: 0.0,
            box_shadow: None,
        }
    }
}

/// Circle layer payload. The bounding box is `2 * radius` square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleContent {
    pub radius: f64,
    #[serde(default = "default_shape_fill")]
    pub fill: Color,
}

fn default_shape_fill() -> Color {
    Color::rgb(0xcc, 0xcc, 0xcc)
}

/// Group payload: ordered children (back to front).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupContent {
    #[serde(default)]
    pub layers: Vec<Layer>,
}

/// Variant-specific part of a layer, tagged by `"type"` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerKind {
    Text(TextContent),
    Image(ImageContent),
    Rect(RectContent),
    Circle(CircleContent),
    Group(GroupContent),
}

/// A visual element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,
    /// Display label.
    #[serde(default)]
    pub name: String,
    /// Left edge, pre-rotation. Parent-relative inside a group.
    pub x: f64,
    /// Top edge, pre-rotation. Parent-relative inside a group.
    pub y: f64,
    /// Explicit width (rectangular variants). See [`crate::geometry::effective_size`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Explicit height (rectangular variants).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Rotation in degrees around the bounding-box center.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(flatten)]
    pub kind: LayerKind,
}

fn default_true() -> bool {
    true
}

impl Layer {
    fn with_kind(id: impl Into<LayerId>, x: f64, y: f64, kind: LayerKind) -> Self {
        let name = match &kind {
            LayerKind::Text(_) => "Text",
            LayerKind::Image(_) => "Image",
            LayerKind::Rect(_) => "Rectangle",
            LayerKind::Circle(_) => "Circle",
            LayerKind::Group(_) => "Group",
        };
        Self {
            id: id.into(),
            name: name.to_string(),
            x,
            y,
            width: None,
            height: None,
            rotation: 0.0,
            is_visible: true,
            is_locked: false,
            kind,
        }
    }

    /// Create a rectangle layer.
    pub fn rect(id: impl Into<LayerId>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::with_kind(id, x, y, LayerKind::Rect(RectContent::default())).with_size(width, height)
    }

    /// Create a circle layer whose bounding box starts at `(x, y)`.
    pub fn circle(id: impl Into<LayerId>, x: f64, y: f64, radius: f64) -> Self {
        Self::with_kind(
            id,
            x,
            y,
            LayerKind::Circle(CircleContent {
                radius,
                fill: default_shape_fill(),
            }),
        )
    }

    /// Create a text layer without an explicit size.
    pub fn text(id: impl Into<LayerId>, x: f64, y: f64, text: impl Into<String>) -> Self {
        Self::with_kind(
            id,
            x,
            y,
            LayerKind::Text(TextContent {
                text: text.into(),
                ..TextContent::default()
            }),
        )
    }

    /// Create an image layer.
    pub fn image(
        id: impl Into<LayerId>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        src: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            id,
            x,
            y,
            LayerKind::Image(ImageContent {
                src: src.into(),
                border_radius: 0.0,
            }),
        )
        .with_size(width, height)
    }

    /// Create a group. Children positions must already be group-relative.
    pub fn group(
        id: impl Into<LayerId>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        layers: Vec<Layer>,
    ) -> Self {
        Self::with_kind(id, x, y, LayerKind::Group(GroupContent { layers })).with_size(width, height)
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }

    /// Top-left position.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, LayerKind::Group(_))
    }

    pub fn is_circle(&self) -> bool {
        matches!(self.kind, LayerKind::Circle(_))
    }

    /// Radius of a circle layer.
    pub fn radius(&self) -> Option<f64> {
        match &self.kind {
            LayerKind::Circle(circle) => Some(circle.radius),
            _ => None,
        }
    }

    /// Lowercase variant name, as used by the `"type"` tag.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            LayerKind::Text(_) => "text",
            LayerKind::Image(_) => "image",
            LayerKind::Rect(_) => "rect",
            LayerKind::Circle(_) => "circle",
            LayerKind::Group(_) => "group",
        }
    }

    /// Children of a group layer.
    pub fn children(&self) -> Option<&[Layer]> {
        match &self.kind {
            LayerKind::Group(group) => Some(&group.layers),
            _ => None,
        }
    }

    /// Mutable children of a group layer.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Layer>> {
        match &mut self.kind {
            LayerKind::Group(group) => Some(&mut group.layers),
            _ => None,
        }
    }

    /// Ids of this layer and all its descendants.
    pub fn all_ids(&self) -> Vec<LayerId> {
        let mut ids = vec![self.id.clone()];
        if let Some(children) = self.children() {
            for child in children {
                ids.extend(child.all_ids());
            }
        }
        ids
    }

    /// Give this layer and every descendant a fresh id.
    pub fn regenerate_ids(&mut self) {
        self.id = LayerId::generate();
        if let Some(children) = self.children_mut() {
            for child in children {
                child.regenerate_ids();
            }
        }
    }
}

/// Sparse update for a layer. Only present fields are applied; fields that
/// do not exist on the layer's variant are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
}

impl LayerPatch {
    /// Patch that only moves a layer.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Shallow-merge the present fields into `layer`.
    pub fn apply(&self, layer: &mut Layer) {
        if let Some(name) = &self.name {
            layer.name = name.clone();
        }
        if let Some(x) = self.x {
            layer.x = x;
        }
        if let Some(y) = self.y {
            layer.y = y;
        }
        if let Some(rotation) = self.rotation {
            layer.rotation = rotation;
        }
        if let Some(visible) = self.is_visible {
            layer.is_visible = visible;
        }
        if let Some(locked) = self.is_locked {
            layer.is_locked = locked;
        }

        match &mut layer.kind {
            LayerKind::Circle(circle) => {
                if let Some(radius) = self.radius {
                    circle.radius = radius;
                }
                if let Some(fill) = &self.fill {
                    circle.fill = fill.clone();
                }
            }
            LayerKind::Text(text) => {
                if let Some(content) = &self.text {
                    text.text = content.clone();
                }
                if let Some(size) = self.font_size {
                    text.font_size = size;
                }
                if let Some(family) = &self.font_family {
                    text.font_family = family.clone();
                }
                if let Some(weight) = &self.font_weight {
                    text.font_weight = weight.clone();
                }
                if let Some(align) = self.text_align {
                    text.text_align = align;
                }
                if let Some(fill) = &self.fill {
                    text.fill = fill.clone();
                }
            }
            LayerKind::Image(image) => {
                if let Some(src) = &self.src {
                    image.src = src.clone();
                }
                if let Some(radius) = self.border_radius {
                    image.border_radius = radius;
                }
            }
            LayerKind::Rect(rect) => {
                if let Some(fill) = &self.fill {
                    rect.fill = fill.clone();
                }
                if let Some(radius) = self.border_radius {
                    rect.border_radius = radius;
                }
                if let Some(shadow) = &self.box_shadow {
                    rect.box_shadow = Some(shadow.clone());
                }
            }
            LayerKind::Group(_) => {}
        }

        // Circles are sized by radius only.
        if !layer.is_circle() {
            if let Some(width) = self.width {
                layer.width = Some(width);
            }
            if let Some(height) = self.height {
                layer.height = Some(height);
            }
        }
    }
}
