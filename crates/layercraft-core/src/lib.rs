//! Layercraft Core Library
//!
//! Direct-manipulation canvas engine for layered designs: layer tree,
//! selection and gestures, alignment snapping, transforms, undo/redo history,
//! z-order and clipboard, plus persisted version storage.

pub mod clipboard;
pub mod color;
pub mod config;
pub mod content;
pub mod document;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod handles;
pub mod history;
pub mod input;
pub mod interaction;
pub mod keymap;
pub mod layer;
pub mod selection;
pub mod snap;
pub mod storage;
pub mod transform;
pub mod tree;
pub mod viewport;
pub mod zorder;

pub use clipboard::Clipboard;
pub use color::Color;
pub use config::{ConfigError, EditorConfig};
pub use content::{BrandKit, ContentPatch};
pub use document::{DesignDocument, Frame};
pub use editor::{Editor, Projection};
pub use error::{EditError, EditResult};
pub use geometry::{effective_bounds, effective_size};
pub use handles::{Handle, HandleKind, ResizeHandle};
pub use history::History;
pub use input::{InputEvent, Modifiers, MouseButton};
pub use interaction::{Gesture, HitTarget};
pub use keymap::{Command, KeyInput, ShortcutRegistry};
pub use layer::{Layer, LayerId, LayerKind, LayerPatch};
pub use selection::Selection;
pub use snap::{Guide, GuideAxis, SnapResult};
pub use storage::{AutoVersioner, FileVersionStore, MemoryVersionStore, StoreError, VersionStore};
pub use viewport::Viewport;
pub use zorder::Direction;
