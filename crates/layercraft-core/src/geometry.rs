//! Bounding boxes and hit tests.
//!
//! Every place that needs a layer's extent goes through [`effective_size`]:
//! explicit width/height first, then the circle diameter, then the defaults.

use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::layer::Layer;
use kurbo::{Point, Rect, Size};

/// Width and height of a layer's bounding box.
pub fn effective_size(layer: &Layer) -> Size {
    let diameter = layer.radius().map(|r| r * 2.0);
    Size::new(
        layer.width.or(diameter).unwrap_or(DEFAULT_WIDTH),
        layer.height.or(diameter).unwrap_or(DEFAULT_HEIGHT),
    )
}

/// Bounding box of a layer in its parent's coordinate space (pre-rotation).
pub fn effective_bounds(layer: &Layer) -> Rect {
    Rect::from_origin_size(layer.position(), effective_size(layer))
}

/// Bounding box of a layer shifted by its parent's absolute origin.
pub fn absolute_bounds(layer: &Layer, parent_origin: Point) -> Rect {
    effective_bounds(layer) + parent_origin.to_vec2()
}

/// Union of several boxes, or `None` when empty.
pub fn union_bounds(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().reduce(|acc, rect| acc.union(rect))
}

/// Combined bounding box of a set of layers.
pub fn layers_bounds<'a>(layers: impl IntoIterator<Item = &'a Layer>) -> Option<Rect> {
    union_bounds(layers.into_iter().map(effective_bounds))
}

/// Point-in-rect test, inclusive on every edge.
pub fn rect_contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Strict overlap test used by marquee selection. Boxes that only touch
/// along an edge do not intersect.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// Normalised rectangle spanned by two corner points.
pub fn rect_from_points(a: Point, b: Point) -> Rect {
    Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
}

/// Alignment lines of a box: three vertical lines and three horizontal lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edges {
    pub left: f64,
    pub h_center: f64,
    pub right: f64,
    pub top: f64,
    pub v_center: f64,
    pub bottom: f64,
}

impl Edges {
    pub fn of(rect: Rect) -> Self {
        Self {
            left: rect.x0,
            h_center: (rect.x0 + rect.x1) / 2.0,
            right: rect.x1,
            top: rect.y0,
            v_center: (rect.y0 + rect.y1) / 2.0,
            bottom: rect.y1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_size_rules() {
        let rect = Layer::rect("r", 0.0, 0.0, 30.0, 40.0);
        assert_eq!(effective_size(&rect), Size::new(30.0, 40.0));

        let circle = Layer::circle("c", 0.0, 0.0, 15.0);
        assert_eq!(effective_size(&circle), Size::new(30.0, 30.0));

        let text = Layer::text("t", 0.0, 0.0, "hi");
        assert_eq!(effective_size(&text), Size::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }

    #[test]
    fn test_partial_size_falls_back_per_axis() {
        let mut text = Layer::text("t", 0.0, 0.0, "hi");
        text.width = Some(220.0);
        assert_eq!(effective_size(&text), Size::new(220.0, DEFAULT_HEIGHT));
    }

    #[test]
    fn test_effective_bounds() {
        let circle = Layer::circle("c", 10.0, 20.0, 5.0);
        assert_eq!(effective_bounds(&circle), Rect::new(10.0, 20.0, 20.0, 30.0));
    }

    #[test]
    fn test_absolute_bounds() {
        let child = Layer::rect("r", 5.0, 5.0, 10.0, 10.0);
        let rect = absolute_bounds(&child, Point::new(100.0, 200.0));
        assert_eq!(rect, Rect::new(105.0, 205.0, 115.0, 215.0));
    }

    #[test]
    fn test_union_bounds() {
        assert_eq!(union_bounds(Vec::new()), None);
        let union = union_bounds([
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(50.0, -5.0, 60.0, 5.0),
        ]);
        assert_eq!(union, Some(Rect::new(0.0, -5.0, 60.0, 10.0)));
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect_contains(rect, Point::new(10.0, 10.0)));
        assert!(rect_contains(rect, Point::new(0.0, 5.0)));
        assert!(!rect_contains(rect, Point::new(10.1, 5.0)));
    }

    #[test]
    fn test_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(100.0, 100.0, 150.0, 150.0);
        assert!(rects_intersect(a, Rect::new(0.0, 0.0, 60.0, 60.0)));
        assert!(!rects_intersect(b, Rect::new(0.0, 0.0, 60.0, 60.0)));
        // Touching edges do not count.
        assert!(!rects_intersect(a, Rect::new(50.0, 0.0, 70.0, 50.0)));
    }

    #[test]
    fn test_rect_from_points_normalises() {
        let rect = rect_from_points(Point::new(60.0, 10.0), Point::new(0.0, 70.0));
        assert_eq!(rect, Rect::new(0.0, 10.0, 60.0, 70.0));
    }

    #[test]
    fn test_edges() {
        let edges = Edges::of(Rect::new(10.0, 20.0, 30.0, 60.0));
        assert_eq!(edges.h_center, 20.0);
        assert_eq!(edges.v_center, 40.0);
        assert_eq!(edges.right, 30.0);
        assert_eq!(edges.bottom, 60.0);
    }
}
