//! Client-to-canvas coordinate mapping.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest zoom level a host may set.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest zoom level a host may set.
pub const MAX_ZOOM: f64 = 10.0;

/// Where the canvas container sits on screen and how far it is zoomed.
///
/// Pointer positions arrive in client (screen) coordinates; all editing math
/// happens in canvas space, so gestures behave the same at every zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Top-left corner of the canvas container in client coordinates.
    pub origin: Point,
    /// Zoom level (1.0 = 100%).
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// A non-finite `zoom` falls back to 1.0.
    pub fn new(origin: Point, zoom: f64) -> Self {
        let mut viewport = Self {
            origin,
            ..Self::default()
        };
        viewport.set_zoom(zoom);
        viewport
    }

    /// Canvas-to-client transform, for renderers.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin.to_vec2()) * Affine::scale(self.zoom)
    }

    /// `(client - origin) / zoom`.
    pub fn client_to_canvas(&self, client: Point) -> Point {
        ((client - self.origin) / self.zoom).to_point()
    }

    pub fn canvas_to_client(&self, canvas: Point) -> Point {
        self.transform() * canvas
    }

    /// Convert a screen-pixel distance into canvas units.
    pub fn to_canvas_units(&self, pixels: f64) -> f64 {
        pixels / self.zoom
    }

    /// Clamp and apply `zoom`. NaN and infinities are rejected, leaving the
    /// current zoom in place; returns whether the zoom was accepted.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if !zoom.is_finite() {
            return false;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        true
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Scroll the container by a client-space offset.
    pub fn pan(&mut self, delta: Vec2) {
        self.origin += delta;
    }
}
