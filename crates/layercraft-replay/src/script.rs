//! Recorded input scripts.
//!
//! A script is a JSON object with an optional starting viewport and a list of
//! steps. Each step is either a raw input event (tagged by `"type"`) or a
//! host action (tagged by `"action"`):
//!
//! ```json
//! {
//!   "viewport": { "origin": { "x": 0, "y": 0 }, "zoom": 1.0 },
//!   "steps": [
//!     { "type": "pointerDown", "position": { "x": 60, "y": 40 } },
//!     { "type": "pointerMove", "position": { "x": 160, "y": 40 } },
//!     { "type": "pointerUp", "position": { "x": 160, "y": 40 } },
//!     { "type": "key", "key": "z", "modifiers": { "ctrl": true } },
//!     { "action": "setZoom", "zoom": 2.0 }
//!   ]
//! }
//! ```

use kurbo::{Point, Vec2};
use layercraft_core::{BrandKit, Command, ContentPatch, InputEvent, LayerId, Viewport};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::runner::ReplayError;

/// Something the host does besides forwarding raw input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum HostAction {
    SetZoom { zoom: f64 },
    SetOrigin { origin: Point },
    /// Scroll the container, as a wheel or trackpad pan would.
    Pan { delta: Vec2 },
    /// Run an editor command directly, as a menu item would.
    Run { command: Command },
    ApplyBrandKit { kit: BrandKit },
    ApplyContent { patches: BTreeMap<LayerId, ContentPatch> },
    /// Save the committed document as a named version.
    SaveVersion { title: String },
}

/// One script step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Input(InputEvent),
    Host(HostAction),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Script {
    pub viewport: Option<Viewport>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_json(&json)?)
    }
}
