//! Content merges that leave geometry alone: generated copy and brand kits.

use crate::color::Color;
use crate::document::DesignDocument;
use crate::layer::{Layer, LayerKind, LayerPatch};
use serde::{Deserialize, Serialize};

/// New content for one layer. Only content fields exist here, so a merge can
/// never move or resize anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentPatch {
    /// Replacement text for text layers.
    pub text: Option<String>,
    /// Replacement source for image layers.
    pub src: Option<String>,
}

impl ContentPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            src: None,
        }
    }

    pub fn src(src: impl Into<String>) -> Self {
        Self {
            text: None,
            src: Some(src.into()),
        }
    }

    pub fn to_layer_patch(&self) -> LayerPatch {
        LayerPatch {
            text: self.text.clone(),
            src: self.src.clone(),
            ..LayerPatch::default()
        }
    }
}

/// Brand colors and typography reapplied across a whole design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrandKit {
    pub primary_color: Option<Color>,
    pub secondary_color: Option<Color>,
    pub text_color: Option<Color>,
    pub font_family: Option<String>,
    pub background_color: Option<Color>,
}

impl BrandKit {
    /// Restyle one layer and its descendants.
    ///
    /// Text takes the text color and font, rectangles the primary color and
    /// circles the secondary color (or the primary one when no secondary is
    /// set). Images are left untouched.
    pub fn apply_to_layer(&self, layer: &mut Layer) {
        match &mut layer.kind {
            LayerKind::Text(text) => {
                if let Some(color) = &self.text_color {
                    text.fill = color.clone();
                }
                if let Some(family) = &self.font_family {
                    text.font_family = family.clone();
                }
            }
            LayerKind::Rect(rect) => {
                if let Some(color) = &self.primary_color {
                    rect.fill = color.clone();
                }
            }
            LayerKind::Circle(circle) => {
                if let Some(color) = self.secondary_color.as_ref().or(self.primary_color.as_ref()) {
                    circle.fill = color.clone();
                }
            }
            LayerKind::Image(_) => {}
            LayerKind::Group(group) => {
                for child in &mut group.layers {
                    self.apply_to_layer(child);
                }
            }
        }
    }

    /// Restyle the frame background and every layer.
    pub fn apply(&self, document: &mut DesignDocument) {
        if let Some(background) = &self.background_color {
            document.frame.background = background.clone();
        }
        for layer in &mut document.layers {
            self.apply_to_layer(layer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Frame;

    fn kit() -> BrandKit {
        BrandKit {
            primary_color: Color::parse("#ff0000"),
            secondary_color: None,
            text_color: Color::parse("#00ff00"),
            font_family: Some("Roboto".to_string()),
            background_color: Color::parse("#000000"),
        }
    }

    #[test]
    fn test_content_patch_keeps_geometry() {
        let mut layer = Layer::text("t", 10.0, 20.0, "old").with_size(200.0, 40.0);
        ContentPatch::text("new").to_layer_patch().apply(&mut layer);
        assert_eq!((layer.x, layer.y), (10.0, 20.0));
        assert_eq!(layer.width, Some(200.0));
        match &layer.kind {
            LayerKind::Text(text) => assert_eq!(text.text, "new"),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_brand_kit_restyles_layers() {
        let mut document = DesignDocument::new(Frame::new(500.0, 500.0))
            .with_layer(Layer::text("t", 0.0, 0.0, "hi"))
            .with_layer(Layer::rect("r", 0.0, 0.0, 10.0, 10.0))
            .with_layer(Layer::group(
                "g",
                0.0,
                0.0,
                50.0,
                50.0,
                vec![Layer::circle("c", 0.0, 0.0, 5.0)],
            ));
        kit().apply(&mut document);

        assert_eq!(document.frame.background, Color::black());
        match &document.layers[0].kind {
            LayerKind::Text(text) => {
                assert_eq!(text.fill, Color::rgb(0, 255, 0));
                assert_eq!(text.font_family, "Roboto");
            }
            other => panic!("unexpected kind {other:?}"),
        }
        match &document.layers[1].kind {
            LayerKind::Rect(rect) => assert_eq!(rect.fill, Color::rgb(255, 0, 0)),
            other => panic!("unexpected kind {other:?}"),
        }
        match &document.layers[2].children().unwrap()[0].kind {
            LayerKind::Circle(circle) => assert_eq!(circle.fill, Color::rgb(255, 0, 0)),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_empty_kit_changes_nothing() {
        let mut document = DesignDocument::default().with_layer(Layer::rect("r", 0.0, 0.0, 10.0, 10.0));
        let before = document.clone();
        BrandKit::default().apply(&mut document);
        assert_eq!(document, before);
    }
}
