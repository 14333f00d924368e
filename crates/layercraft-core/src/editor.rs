//! The editing session.
//!
//! [`Editor`] owns the committed history, a working copy of the current
//! document, the selection, the clipboard and the active gesture. Pointer
//! moves during a gesture only touch the working copy; the gesture's
//! pointer-up commits it as a single history entry. Every discrete operation
//! (delete, group, paste, ...) runs against a clone of the committed document
//! and either commits the full result or leaves everything as it was.

use crate::clipboard::Clipboard;
use crate::config::{EditorConfig, ROTATION_SNAP_DEGREES};
use crate::content::{BrandKit, ContentPatch};
use crate::document::{DesignDocument, Frame};
use crate::error::{EditError, EditResult};
use crate::geometry::{absolute_bounds, effective_bounds, layers_bounds, union_bounds};
use crate::handles::{Handle, HandleKind, ResizeHandle, hit_test_handles, layer_handles};
use crate::history::History;
use crate::input::{InputEvent, Modifiers, MouseButton};
use crate::interaction::{DragState, Gesture, HitTarget, MarqueeState, ResizeState, RotateState};
use crate::keymap::{self, Command, KeyInput};
use crate::layer::{Layer, LayerId, LayerPatch};
use crate::selection::Selection;
use crate::snap::{Guide, SnapResult, snap_drag};
use crate::transform::{ResizeLimits, group_layers, resize_layer, rotation_angle, ungroup_layer};
use crate::tree::{find_by_id, find_by_id_mut, find_with_parent, ids_are_unique, locate, mutate_layer, remove_layers};
use crate::viewport::Viewport;
use crate::zorder::{self, Direction};
use kurbo::{Point, Rect, Vec2};
use std::collections::HashSet;
use std::fmt;

/// Callback invoked with every newly committed document.
pub type CommitListener = Box<dyn FnMut(&DesignDocument)>;

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<'a> {
    /// The live document (the working copy while a gesture runs).
    pub document: &'a DesignDocument,
    pub selection: &'a [LayerId],
    /// Combined bounding box of the selected layers, in canvas space.
    pub selection_bounds: Option<Rect>,
    /// Handles of a single selected, unlocked layer.
    pub handles: Vec<Handle>,
    pub guides: &'a [Guide],
    pub marquee: Option<Rect>,
}

/// A canvas editing session.
pub struct Editor {
    history: History,
    /// Live document. Equal to the committed snapshot whenever no gesture
    /// is active.
    working: DesignDocument,
    selection: Selection,
    gesture: Gesture,
    guides: Vec<Guide>,
    clipboard: Clipboard,
    viewport: Viewport,
    config: EditorConfig,
    listeners: Vec<CommitListener>,
    /// Last pointer position in canvas space.
    last_pointer: Option<Point>,
    /// Modifiers of the last pointer event.
    modifiers: Modifiers,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(DesignDocument::default())
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("history", &self.history)
            .field("selection", &self.selection)
            .field("gesture", &self.gesture)
            .field("viewport", &self.viewport)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Create an editor whose history is seeded with `document`.
    pub fn new(document: DesignDocument) -> Self {
        Self::with_config(document, EditorConfig::default())
    }

    pub fn with_config(document: DesignDocument, config: EditorConfig) -> Self {
        Self {
            history: History::new(document.clone()).with_limit(config.history_limit),
            working: document,
            selection: Selection::new(),
            gesture: Gesture::Idle,
            guides: Vec::new(),
            clipboard: Clipboard::new(),
            viewport: Viewport::default(),
            config,
            listeners: Vec::new(),
            last_pointer: None,
            modifiers: Modifiers::NONE,
        }
    }

    // --- Accessors ---

    /// The live document: the working copy during a gesture, otherwise the
    /// committed one.
    pub fn document(&self) -> &DesignDocument {
        &self.working
    }

    /// The current history snapshot.
    pub fn committed_document(&self) -> &DesignDocument {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_ids(&self) -> &[LayerId] {
        self.selection.ids()
    }

    /// Snap guides of the running drag.
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Whether a gesture is running. Hosts attach their global move/up
    /// listeners only while this is true.
    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_active()
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        if !self.viewport.set_zoom(zoom) {
            log::warn!("Ignoring invalid zoom {zoom}");
        }
    }

    /// Scroll the canvas container by a client-space offset.
    pub fn pan(&mut self, delta: Vec2) {
        self.viewport.pan(delta);
    }

    /// Set where the canvas container sits in client coordinates.
    pub fn set_container_origin(&mut self, origin: Point) {
        self.viewport.set_origin(origin);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Register a callback for every new committed state, including undo,
    /// redo and restore.
    pub fn on_commit(&mut self, listener: impl FnMut(&DesignDocument) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // --- Commit plumbing ---

    fn notify(&mut self) {
        let document = self.history.current();
        for listener in &mut self.listeners {
            listener(document);
        }
    }

    /// Push the working copy if it differs from the current snapshot.
    fn commit_working(&mut self, action: &str) -> bool {
        if self.working == *self.history.current() {
            log::debug!("{action}: document unchanged, nothing committed");
            return false;
        }
        self.history.commit(self.working.clone());
        log::info!(
            "Committed {action} ({}/{})",
            self.history.index() + 1,
            self.history.len()
        );
        self.notify();
        true
    }

    /// Run `op` on a clone of the committed document and commit the result.
    /// A failing `op` leaves the editor untouched.
    fn edit<T>(&mut self, action: &str, op: impl FnOnce(&mut DesignDocument) -> EditResult<T>) -> Option<T> {
        self.finish_gesture();
        let mut document = self.history.current().clone();
        match op(&mut document) {
            Ok(value) => {
                self.working = document;
                self.commit_working(action);
                Some(value)
            }
            Err(err) => {
                log::debug!("{action} skipped: {err}");
                None
            }
        }
    }

    fn after_history_move(&mut self, action: &str) {
        self.working = self.history.current().clone();
        self.selection.clear();
        log::info!("{action} ({}/{})", self.history.index() + 1, self.history.len());
        self.notify();
    }

    // --- Pointer input ---

    /// Resolve what lies under a canvas-space point.
    pub fn hit_test(&self, point: Point) -> HitTarget {
        if let Some((id, handles)) = self.selection_handles() {
            let tolerance = self.viewport.to_canvas_units(self.config.handle_hit_tolerance_px);
            match hit_test_handles(&handles, point, tolerance) {
                Some(HandleKind::Rotate) => return HitTarget::RotateHandle(id),
                Some(HandleKind::Resize(handle)) => return HitTarget::ResizeHandle(id, handle),
                None => {}
            }
        }
        match self.working.layers_at_point(point).into_iter().next() {
            Some(id) => HitTarget::Layer(id),
            None => HitTarget::Canvas,
        }
    }

    /// Handles for the single selected layer, when it is visible and
    /// unlocked.
    fn selection_handles(&self) -> Option<(LayerId, Vec<Handle>)> {
        let id = self.selection.single()?;
        let found = find_with_parent(&self.working.layers, id).ok()?;
        if found.layer.is_locked || !found.layer.is_visible {
            return None;
        }
        let bounds = absolute_bounds(found.layer, found.origin);
        let offset = self.viewport.to_canvas_units(self.config.rotate_handle_offset_px);
        Some((id.clone(), layer_handles(bounds, found.layer.is_circle(), offset)))
    }

    /// Pointer pressed at a client position.
    pub fn pointer_down(&mut self, client: Point, modifiers: Modifiers) {
        let point = self.viewport.client_to_canvas(client);
        let target = self.hit_test(point);
        self.pointer_down_on(target, client, modifiers);
    }

    /// Pointer pressed on a target the host already resolved.
    pub fn pointer_down_on(&mut self, target: HitTarget, client: Point, modifiers: Modifiers) {
        if self.gesture.is_active() {
            log::warn!("Pointer down during {} gesture, finishing it first", self.gesture.name());
            self.finish_gesture();
        }
        let point = self.viewport.client_to_canvas(client);
        self.last_pointer = Some(point);
        self.modifiers = modifiers;

        match target {
            HitTarget::RotateHandle(id) => self.begin_rotate(&id, point),
            HitTarget::ResizeHandle(id, handle) => self.begin_resize(&id, handle, point),
            HitTarget::Layer(id) => self.press_layer(id, point, modifiers.shift),
            HitTarget::Canvas => {
                if !modifiers.shift {
                    self.selection.clear();
                }
                self.gesture = Gesture::Marqueeing(MarqueeState::new(point, modifiers.shift));
            }
        }
    }

    fn press_layer(&mut self, id: LayerId, point: Point, shift: bool) {
        let Some(layer) = self.working.find(&id) else {
            log::debug!("Pointer down on missing layer {id}");
            return;
        };
        let locked = layer.is_locked;

        // A plain press inside the current selection keeps it so the whole
        // set can be dragged.
        if shift || !self.selection.contains(&id) {
            self.selection.click(id.clone(), shift);
        }
        if !self.selection.contains(&id) {
            return;
        }

        if locked {
            log::debug!("Layer {id} is locked, not dragging");
            return;
        }
        self.begin_drag(point);
    }

    /// Start dragging every unlocked, top-level selected layer from `point`
    /// (canvas space).
    pub fn begin_drag(&mut self, point: Point) {
        let moving: Vec<&Layer> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| self.working.top_level(id))
            .filter(|layer| !layer.is_locked)
            .collect();
        let Some(start_bounds) = layers_bounds(moving.iter().copied()) else {
            log::debug!("Nothing draggable in the selection");
            return;
        };

        let ids: Vec<LayerId> = moving.iter().map(|layer| layer.id.clone()).collect();
        let start_positions = moving.iter().map(|layer| (layer.id.clone(), layer.position())).collect();
        let snap_targets = self
            .working
            .layers
            .iter()
            .filter(|layer| layer.is_visible && !layer.is_locked && !self.selection.contains(&layer.id))
            .map(effective_bounds)
            .collect();

        self.gesture = Gesture::Dragging(DragState {
            ids,
            start_positions,
            start_mouse: point,
            start_bounds,
            snap_targets,
        });
    }

    /// Start resizing a layer from `point` (canvas space). Locked or missing
    /// layers are ignored.
    pub fn begin_resize(&mut self, id: &LayerId, handle: ResizeHandle, point: Point) {
        let Some(layer) = find_by_id(&self.working.layers, id) else {
            log::debug!("Resize of missing layer {id}");
            return;
        };
        if layer.is_locked {
            log::debug!("Layer {id} is locked, not resizing");
            return;
        }
        let start_layer = layer.clone();
        if !self.selection.contains(id) {
            self.selection.select(id.clone());
        }
        self.gesture = Gesture::Resizing(ResizeState {
            layer_id: id.clone(),
            handle,
            start_mouse: point,
            start_layer,
        });
    }

    /// Start rotating a layer around its current centre. Locked or missing
    /// layers are ignored.
    pub fn begin_rotate(&mut self, id: &LayerId, point: Point) {
        let Ok(found) = find_with_parent(&self.working.layers, id) else {
            log::debug!("Rotate of missing layer {id}");
            return;
        };
        if found.layer.is_locked {
            log::debug!("Layer {id} is locked, not rotating");
            return;
        }
        let center = absolute_bounds(found.layer, found.origin).center();
        if !self.selection.contains(id) {
            self.selection.select(id.clone());
        }
        self.gesture = Gesture::Rotating(RotateState {
            layer_id: id.clone(),
            start_mouse: point,
            center,
        });
    }

    /// Pointer moved to a client position.
    pub fn pointer_move(&mut self, client: Point, modifiers: Modifiers) {
        let point = self.viewport.client_to_canvas(client);
        self.last_pointer = Some(point);
        self.modifiers = modifiers;
        self.update_gesture(point);
    }

    fn update_gesture(&mut self, point: Point) {
        let threshold = self.viewport.to_canvas_units(self.config.snap_threshold_px);
        let limits = ResizeLimits {
            min_size: self.config.min_size,
            min_radius: self.config.min_radius,
        };

        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Dragging(drag) => {
                let raw = point - drag.start_mouse;
                let snap = if self.config.snapping_enabled {
                    snap_drag(drag.start_bounds, raw, &drag.snap_targets, threshold)
                } else {
                    SnapResult::none(raw)
                };
                for id in &drag.ids {
                    let Some(start) = drag.start_positions.get(id) else {
                        continue;
                    };
                    if let Some(layer) = self.working.layers.iter_mut().find(|layer| &layer.id == id) {
                        layer.set_position(*start + snap.delta);
                    }
                }
                self.guides = snap.guides;
            }
            Gesture::Resizing(resize) => {
                let resized = resize_layer(&resize.start_layer, resize.handle, point - resize.start_mouse, limits);
                if let Some(layer) = find_by_id_mut(&mut self.working.layers, &resize.layer_id) {
                    *layer = resized;
                }
            }
            Gesture::Rotating(rotate) => {
                let step = self.modifiers.shift.then_some(ROTATION_SNAP_DEGREES);
                let angle = rotation_angle(rotate.center, point, step);
                if let Some(layer) = find_by_id_mut(&mut self.working.layers, &rotate.layer_id) {
                    layer.rotation = angle;
                }
            }
            Gesture::Marqueeing(marquee) => marquee.update(point),
        }
    }

    /// Pointer released at a client position: the gesture's final state is
    /// committed.
    pub fn pointer_up(&mut self, client: Point) {
        let point = self.viewport.client_to_canvas(client);
        self.last_pointer = Some(point);
        if !self.gesture.is_active() {
            log::debug!("Pointer up without an active gesture");
            return;
        }
        self.update_gesture(point);
        self.finish_gesture();
    }

    /// Pointer left the canvas: ends the gesture like a pointer-up at the
    /// last known position.
    pub fn pointer_leave(&mut self) {
        if self.gesture.is_active() {
            log::debug!("Pointer left during {} gesture", self.gesture.name());
        }
        self.finish_gesture();
    }

    fn finish_gesture(&mut self) {
        let gesture = std::mem::take(&mut self.gesture);
        self.guides.clear();
        match gesture {
            Gesture::Marqueeing(marquee) => {
                let hits = self.working.layers_in_rect(marquee.rect);
                self.selection.apply_marquee(hits, marquee.additive);
            }
            other if other.mutates_document() => {
                self.commit_working(other.name());
            }
            _ => {}
        }
    }

    // --- History ---

    /// Step back one committed state. Clears the selection.
    pub fn undo(&mut self) -> bool {
        self.finish_gesture();
        if !self.history.undo() {
            return false;
        }
        self.after_history_move("Undo");
        true
    }

    /// Step forward one committed state. Clears the selection.
    pub fn redo(&mut self) -> bool {
        self.finish_gesture();
        if !self.history.redo() {
            return false;
        }
        self.after_history_move("Redo");
        true
    }

    /// Replace the whole history with `document`, e.g. a persisted version.
    pub fn restore(&mut self, document: DesignDocument) {
        self.gesture = Gesture::Idle;
        self.guides.clear();
        self.history.restore(document);
        self.after_history_move("Restore");
    }

    // --- Discrete edits ---

    /// Delete every selected layer, at any depth.
    pub fn delete_selected(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let ids: HashSet<LayerId> = self.selection.ids().iter().cloned().collect();
        let deleted = self.edit("delete", |document| {
            let removed = remove_layers(&mut document.layers, &ids);
            if removed.is_empty() {
                Err(EditError::InvalidOperation("no selected layer exists".to_string()))
            } else {
                Ok(removed.len())
            }
        });
        if deleted.is_some() {
            self.selection.clear();
        }
        deleted.is_some()
    }

    /// Group the selected top-level layers. The group becomes the selection.
    pub fn group_selected(&mut self) -> Option<LayerId> {
        let ids = self.selection.ids().to_vec();
        let group_id = self.edit("group", |document| group_layers(&mut document.layers, &ids))?;
        self.selection.select(group_id.clone());
        Some(group_id)
    }

    /// Dissolve the first selected group. Its children become the selection.
    pub fn ungroup_selected(&mut self) -> Option<Vec<LayerId>> {
        let group_id = self
            .selection
            .ids()
            .iter()
            .find(|id| self.working.find(id).is_some_and(Layer::is_group))
            .cloned();
        let Some(group_id) = group_id else {
            log::debug!("ungroup skipped: no group selected");
            return None;
        };
        let children = self.edit("ungroup", |document| ungroup_layer(&mut document.layers, &group_id))?;
        self.selection.set(children.iter().cloned());
        Some(children)
    }

    /// Move one layer in the stacking order.
    pub fn reorder(&mut self, id: &LayerId, direction: Direction) -> bool {
        self.edit("reorder", |document| zorder::reorder(&mut document.layers, id, direction))
            .is_some()
    }

    /// Move every selected layer in the stacking order, keeping their
    /// relative order.
    pub fn reorder_selected(&mut self, direction: Direction) -> bool {
        self.finish_gesture();
        let mut targets: Vec<(Vec<usize>, LayerId)> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| locate(&self.working.layers, id).map(|path| (path, id.clone())))
            .collect();
        if targets.is_empty() {
            return false;
        }
        targets.sort();
        if matches!(direction, Direction::Back | Direction::Forward) {
            targets.reverse();
        }
        self.edit("reorder", |document| {
            for (_, id) in &targets {
                zorder::reorder(&mut document.layers, id, direction)?;
            }
            Ok(())
        })
        .is_some()
    }

    /// Copy the first selected layer.
    pub fn copy(&mut self) -> bool {
        let Some(layer) = self.selection.first().and_then(|id| self.working.find(id)) else {
            log::debug!("copy skipped: nothing selected");
            return false;
        };
        self.clipboard.copy(layer);
        true
    }

    /// Paste the clipboard layer centred on `position` (canvas space).
    pub fn paste(&mut self, position: Point) -> Option<LayerId> {
        let Some(layer) = self.clipboard.paste_at(position) else {
            log::debug!("paste skipped: clipboard is empty");
            return None;
        };
        let id = layer.id.clone();
        self.edit("paste", |document| {
            document.layers.push(layer);
            Ok(())
        })?;
        self.selection.select(id.clone());
        Some(id)
    }

    /// Where a keyboard paste lands: the last pointer position, or the frame
    /// centre before any pointer input.
    pub fn paste_position(&self) -> Point {
        self.last_pointer.unwrap_or_else(|| self.working.frame.center())
    }

    /// Apply a property edit to one layer.
    pub fn update_layer(&mut self, id: &LayerId, patch: &LayerPatch) -> bool {
        self.edit("update", |document| mutate_layer(&mut document.layers, id, patch))
            .is_some()
    }

    /// Append a layer on top and select it. Rejected when any of its ids is
    /// already in use.
    pub fn add_layer(&mut self, layer: Layer) -> Option<LayerId> {
        let id = layer.id.clone();
        self.edit("add layer", |document| {
            document.layers.push(layer);
            if ids_are_unique(&document.layers) {
                Ok(())
            } else {
                Err(EditError::InvalidOperation(format!("duplicate layer id {id}")))
            }
        })?;
        self.selection.select(id.clone());
        Some(id)
    }

    pub fn set_frame(&mut self, frame: Frame) -> bool {
        self.edit("frame", |document| {
            document.frame = frame;
            Ok(())
        })
        .is_some()
    }

    /// Nudge the unlocked selected layers.
    pub fn move_selection_by(&mut self, delta: Vec2) -> bool {
        let ids = self.selection.ids().to_vec();
        self.edit("nudge", |document| {
            let mut moved = 0;
            for id in &ids {
                if let Some(layer) = find_by_id_mut(&mut document.layers, id) {
                    if !layer.is_locked {
                        layer.x += delta.x;
                        layer.y += delta.y;
                        moved += 1;
                    }
                }
            }
            if moved == 0 {
                Err(EditError::InvalidOperation("no unlocked layer selected".to_string()))
            } else {
                Ok(())
            }
        })
        .is_some()
    }

    /// Select every top-level layer.
    pub fn select_all(&mut self) {
        let ids: Vec<LayerId> = self.working.layers.iter().map(|layer| layer.id.clone()).collect();
        self.selection.set(ids);
    }

    /// Replace the selection, dropping ids that do not exist.
    pub fn select(&mut self, ids: impl IntoIterator<Item = LayerId>) {
        self.selection.set(ids);
        let document = &self.working;
        self.selection.retain(|id| document.find(id).is_some());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Merge generated content into existing layers. Unknown ids are
    /// skipped. Returns how many layers were updated.
    pub fn apply_content(&mut self, patches: impl IntoIterator<Item = (LayerId, ContentPatch)>) -> usize {
        let patches: Vec<(LayerId, ContentPatch)> = patches.into_iter().collect();
        self.edit("content", |document| {
            let mut applied = 0;
            for (id, patch) in &patches {
                match mutate_layer(&mut document.layers, id, &patch.to_layer_patch()) {
                    Ok(()) => applied += 1,
                    Err(err) => log::debug!("Skipping content for {id}: {err}"),
                }
            }
            Ok(applied)
        })
        .unwrap_or(0)
    }

    /// Reapply brand colors and fonts across the document.
    pub fn apply_brand_kit(&mut self, kit: &BrandKit) -> bool {
        self.edit("brand kit", |document| {
            kit.apply(document);
            Ok(())
        })
        .is_some()
    }

    // --- Keyboard and events ---

    /// Run a keyboard command.
    pub fn execute(&mut self, command: Command) {
        log::debug!("Executing {command:?}");
        match command {
            Command::DeleteSelection => {
                self.delete_selected();
            }
            Command::Undo => {
                self.undo();
            }
            Command::Redo => {
                self.redo();
            }
            Command::Group => {
                self.group_selected();
            }
            Command::Ungroup => {
                self.ungroup_selected();
            }
            Command::Reorder(direction) => {
                self.reorder_selected(direction);
            }
            Command::Copy => {
                self.copy();
            }
            Command::Paste => {
                let position = self.paste_position();
                self.paste(position);
            }
            Command::SelectAll => self.select_all(),
        }
    }

    /// Resolve and run a key press. Returns the command that ran.
    pub fn handle_key(&mut self, input: &KeyInput) -> Option<Command> {
        let command = keymap::resolve(input)?;
        self.execute(command);
        Some(command)
    }

    /// Dispatch one raw input event. Only the primary button starts
    /// gestures.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown {
                position,
                button,
                modifiers,
            } => {
                if *button == MouseButton::Left {
                    self.pointer_down(*position, *modifiers);
                }
            }
            InputEvent::PointerMove { position, modifiers } => self.pointer_move(*position, *modifiers),
            InputEvent::PointerUp { position } => self.pointer_up(*position),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::Key(input) => {
                self.handle_key(input);
            }
        }
    }

    // --- Projection ---

    /// Combined absolute bounding box of the selected layers.
    pub fn selection_bounds(&self) -> Option<Rect> {
        union_bounds(self.selection.ids().iter().filter_map(|id| {
            find_with_parent(&self.working.layers, id)
                .ok()
                .map(|found| absolute_bounds(found.layer, found.origin))
        }))
    }

    /// Render data for the current frame.
    pub fn projection(&self) -> Projection<'_> {
        Projection {
            document: &self.working,
            selection: self.selection.ids(),
            selection_bounds: self.selection_bounds(),
            handles: self.selection_handles().map(|(_, handles)| handles).unwrap_or_default(),
            guides: &self.guides,
            marquee: self.gesture.marquee(),
        }
    }
}
