//! Alignment snapping for drags.
//!
//! While a selection is dragged, its combined bounding box is compared with
//! every snap target. On each axis five alignments are tried in a fixed order
//! (start/start, end/end, centre/centre, start/end, end/start); the first one
//! within the threshold wins and overrides the delta on that axis.

use crate::geometry::Edges;
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideAxis {
    /// Vertical line at a fixed x (horizontal alignment).
    Vertical,
    /// Horizontal line at a fixed y (vertical alignment).
    Horizontal,
}

/// Which edges were aligned. On the vertical axis "start" is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignKind {
    Start,
    End,
    Center,
    StartToEnd,
    EndToStart,
}

/// Priority order in which alignments are tried.
const ALIGN_ORDER: [AlignKind; 5] = [
    AlignKind::Start,
    AlignKind::End,
    AlignKind::Center,
    AlignKind::StartToEnd,
    AlignKind::EndToStart,
];

/// A guide line to draw while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub axis: GuideAxis,
    /// x for vertical guides, y for horizontal guides.
    pub position: f64,
    /// Extent along the line, covering both boxes.
    pub from: f64,
    pub to: f64,
    pub kind: AlignKind,
}

/// Result of a snap computation.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    /// The delta to apply (raw delta with snapped axes overridden).
    pub delta: Vec2,
    pub guides: Vec<Guide>,
    pub snapped_x: bool,
    pub snapped_y: bool,
}

impl SnapResult {
    /// A result that leaves the delta untouched.
    pub fn none(delta: Vec2) -> Self {
        Self {
            delta,
            guides: Vec::new(),
            snapped_x: false,
            snapped_y: false,
        }
    }

    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Start, centre and end of a box along one axis.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: f64,
    center: f64,
    end: f64,
}

impl Span {
    fn horizontal(edges: &Edges) -> Self {
        Self {
            start: edges.left,
            center: edges.h_center,
            end: edges.right,
        }
    }

    fn vertical(edges: &Edges) -> Self {
        Self {
            start: edges.top,
            center: edges.v_center,
            end: edges.bottom,
        }
    }

    fn shifted(self, offset: f64) -> Self {
        Self {
            start: self.start + offset,
            center: self.center + offset,
            end: self.end + offset,
        }
    }

    /// (dragged value, target value) compared by an alignment.
    fn pair(self, target: Span, kind: AlignKind) -> (f64, f64) {
        match kind {
            AlignKind::Start => (self.start, target.start),
            AlignKind::End => (self.end, target.end),
            AlignKind::Center => (self.center, target.center),
            AlignKind::StartToEnd => (self.start, target.end),
            AlignKind::EndToStart => (self.end, target.start),
        }
    }
}

/// First alignment within `threshold` on one axis.
/// Returns (correction, guide position, kind, target index).
fn snap_axis(
    dragged: Span,
    targets: impl Iterator<Item = Span>,
    threshold: f64,
) -> Option<(f64, f64, AlignKind, usize)> {
    for (index, target) in targets.enumerate() {
        for kind in ALIGN_ORDER {
            let (from, to) = dragged.pair(target, kind);
            if (from - to).abs() < threshold {
                return Some((to - from, to, kind, index));
            }
        }
    }
    None
}

/// Snap a drag of `dragged` (bounding box at drag start) by `delta` against
/// `targets`. `threshold` is in canvas units.
pub fn snap_drag(dragged: Rect, delta: Vec2, targets: &[Rect], threshold: f64) -> SnapResult {
    if targets.is_empty() || threshold <= 0.0 {
        return SnapResult::none(delta);
    }

    let dragged_edges = Edges::of(dragged);
    let target_edges: Vec<Edges> = targets.iter().map(|t| Edges::of(*t)).collect();

    let x_hit = snap_axis(
        Span::horizontal(&dragged_edges).shifted(delta.x),
        target_edges.iter().map(Span::horizontal),
        threshold,
    );
    let y_hit = snap_axis(
        Span::vertical(&dragged_edges).shifted(delta.y),
        target_edges.iter().map(Span::vertical),
        threshold,
    );

    let mut result = SnapResult::none(delta);
    if let Some((correction, ..)) = x_hit {
        result.delta.x += correction;
        result.snapped_x = true;
    }
    if let Some((correction, ..)) = y_hit {
        result.delta.y += correction;
        result.snapped_y = true;
    }

    let moved = dragged + result.delta;
    if let Some((_, position, kind, index)) = x_hit {
        let target = targets[index];
        result.guides.push(Guide {
            axis: GuideAxis::Vertical,
            position,
            from: moved.y0.min(target.y0),
            to: moved.y1.max(target.y1),
            kind,
        });
    }
    if let Some((_, position, kind, index)) = y_hit {
        let target = targets[index];
        result.guides.push(Guide {
            axis: GuideAxis::Horizontal,
            position,
            from: moved.x0.min(target.x0),
            to: moved.x1.max(target.x1),
            kind,
        });
    }
    result
}
