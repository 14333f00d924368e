//! The design document: frame settings plus the root layer list.

use crate::color::Color;
use crate::geometry::{effective_bounds, rect_contains, rects_intersect, union_bounds};
use crate::layer::{Layer, LayerId};
use crate::tree;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Canvas frame (artboard) settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    #[serde(default = "Color::white")]
    pub background: Color,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            width: 1080.0,
            height: 1080.0,
            background: Color::white(),
        }
    }
}

impl Frame {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A complete design: what history snapshots and what persistence stores.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDocument {
    #[serde(default)]
    pub frame: Frame,
    /// Root layers, back to front.
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl DesignDocument {
    /// Create an empty document with the given frame.
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            layers: Vec::new(),
        }
    }

    /// Builder-style layer append.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of root layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Find a layer anywhere in the tree.
    pub fn find(&self, id: &LayerId) -> Option<&Layer> {
        tree::find_by_id(&self.layers, id)
    }

    /// Find a root layer.
    pub fn top_level(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| &layer.id == id)
    }

    /// Bounding box of all root layers.
    pub fn content_bounds(&self) -> Option<Rect> {
        union_bounds(self.layers.iter().map(effective_bounds))
    }

    /// Visible root layers containing `point`, front to back.
    pub fn layers_at_point(&self, point: Point) -> Vec<LayerId> {
        self.layers
            .iter()
            .rev()
            .filter(|layer| layer.is_visible && rect_contains(effective_bounds(layer), point))
            .map(|layer| layer.id.clone())
            .collect()
    }

    /// Visible root layers whose bounding box overlaps `rect`, back to
    /// front. Locked layers are included.
    pub fn layers_in_rect(&self, rect: Rect) -> Vec<LayerId> {
        self.layers
            .iter()
            .filter(|layer| layer.is_visible && rects_intersect(effective_bounds(layer), rect))
            .map(|layer| layer.id.clone())
            .collect()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
