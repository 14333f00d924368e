//! Gesture state for pointer interaction.
//!
//! A gesture lives from pointer-down to pointer-up (or pointer-leave). Its
//! state is ephemeral UI state and never reaches the history.

use crate::geometry::rect_from_points;
use crate::handles::ResizeHandle;
use crate::layer::{Layer, LayerId};
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// What a pointer-down landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    RotateHandle(LayerId),
    ResizeHandle(LayerId, ResizeHandle),
    Layer(LayerId),
    Canvas,
}

/// State of a selection drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// Layers that move, in selection order.
    pub ids: Vec<LayerId>,
    /// Position of every moving layer at drag start.
    pub start_positions: HashMap<LayerId, Point>,
    pub start_mouse: Point,
    /// Combined bounding box of the moving layers at drag start.
    pub start_bounds: Rect,
    /// Bounding boxes of the layers this drag may snap to, in z-order.
    pub snap_targets: Vec<Rect>,
}

/// State of a resize gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub layer_id: LayerId,
    pub handle: ResizeHandle,
    pub start_mouse: Point,
    /// The layer as it was when the gesture began.
    pub start_layer: Layer,
}

/// State of a rotate gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct RotateState {
    pub layer_id: LayerId,
    pub start_mouse: Point,
    /// Bounding-box centre at gesture start, in canvas space.
    pub center: Point,
}

/// State of a marquee selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarqueeState {
    pub start: Point,
    pub rect: Rect,
    /// Shift was held: hits toggle instead of replacing the selection.
    pub additive: bool,
}

impl MarqueeState {
    pub fn new(start: Point, additive: bool) -> Self {
        Self {
            start,
            rect: Rect::from_origin_size(start, (0.0, 0.0)),
            additive,
        }
    }

    pub fn update(&mut self, point: Point) {
        self.rect = rect_from_points(self.start, point);
    }
}

/// The active gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
    Rotating(RotateState),
    Marqueeing(MarqueeState),
}

impl Gesture {
    pub fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }

    /// Whether finishing this gesture can change the document.
    pub fn mutates_document(&self) -> bool {
        matches!(self, Gesture::Dragging(_) | Gesture::Resizing(_) | Gesture::Rotating(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::Dragging(_) => "dragging",
            Gesture::Resizing(_) => "resizing",
            Gesture::Rotating(_) => "rotating",
            Gesture::Marqueeing(_) => "marqueeing",
        }
    }

    /// Current marquee rectangle, if marquee-selecting.
    pub fn marquee(&self) -> Option<Rect> {
        match self {
            Gesture::Marqueeing(state) => Some(state.rect),
            _ => None,
        }
    }
}
