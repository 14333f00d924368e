//! Single-layer clipboard.
//!
//! Only one layer is held at a time. Copying with several layers selected
//! keeps the first one.

use crate::geometry::effective_size;
use crate::layer::Layer;
use kurbo::Point;

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    layer: Option<Layer>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the clipboard contents with a deep copy of `layer`.
    pub fn copy(&mut self, layer: &Layer) {
        self.layer = Some(layer.clone());
    }

    pub fn contents(&self) -> Option<&Layer> {
        self.layer.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.layer.is_none()
    }

    pub fn clear(&mut self) {
        self.layer = None;
    }

    /// A fresh copy of the clipboard layer centred on `position`.
    /// The copy and all its descendants get new ids.
    pub fn paste_at(&self, position: Point) -> Option<Layer> {
        let mut layer = self.layer.clone()?;
        layer.regenerate_ids();
        let size = effective_size(&layer);
        layer.x = position.x - size.width / 2.0;
        layer.y = position.y - size.height / 2.0;
        Some(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_paste() {
        let clipboard = Clipboard::new();
        assert!(clipboard.is_empty());
        assert!(clipboard.paste_at(Point::ZERO).is_none());
    }

    #[test]
    fn test_paste_centres_rect() {
        let mut clipboard = Clipboard::new();
        clipboard.copy(&Layer::rect("r1", 10.0, 10.0, 100.0, 50.0));
        let pasted = clipboard.paste_at(Point::new(200.0, 200.0)).unwrap();
        assert_ne!(pasted.id.as_str(), "r1");
        assert_eq!((pasted.x, pasted.y), (150.0, 175.0));
        assert_eq!((pasted.width, pasted.height), (Some(100.0), Some(50.0)));
    }

    #[test]
    fn test_paste_centres_circle_by_radius() {
        let mut clipboard = Clipboard::new();
        clipboard.copy(&Layer::circle("c", 0.0, 0.0, 30.0));
        let pasted = clipboard.paste_at(Point::new(100.0, 100.0)).unwrap();
        assert_eq!((pasted.x, pasted.y), (70.0, 70.0));
    }

    #[test]
    fn test_paste_group_renews_child_ids() {
        let mut clipboard = Clipboard::new();
        clipboard.copy(&Layer::group(
            "g",
            0.0,
            0.0,
            20.0,
            20.0,
            vec![Layer::rect("child", 0.0, 0.0, 5.0, 5.0)],
        ));
        let first = clipboard.paste_at(Point::ZERO).unwrap();
        let second = clipboard.paste_at(Point::ZERO).unwrap();
        let child = &first.children().unwrap()[0];
        assert_ne!(child.id.as_str(), "child");
        assert_ne!(first.all_ids(), second.all_ids());
    }

    #[test]
    fn test_copy_replaces() {
        let mut clipboard = Clipboard::new();
        clipboard.copy(&Layer::rect("a", 0.0, 0.0, 1.0, 1.0));
        clipboard.copy(&Layer::rect("b", 0.0, 0.0, 1.0, 1.0));
        assert_eq!(clipboard.contents().unwrap().id.as_str(), "b");
        clipboard.clear();
        assert!(clipboard.is_empty());
    }
}
