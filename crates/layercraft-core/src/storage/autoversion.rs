//! Automatic version snapshots.
//!
//! An [`AutoVersioner`] watches an editor's commits and periodically saves the
//! committed document as a new version of its campaign.

use super::{StoreResult, VersionStore};
use crate::document::DesignDocument;
use crate::editor::Editor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Default auto-version interval in seconds.
pub const DEFAULT_AUTOVERSION_INTERVAL_SECS: u64 = 60;

/// Title given to automatic snapshots.
const AUTO_TITLE: &str = "Auto-save";

/// Saves a campaign's committed document whenever it changed and the
/// interval has elapsed.
pub struct AutoVersioner<S: VersionStore> {
    store: Arc<S>,
    campaign_id: String,
    interval: Duration,
    last_save: Option<Instant>,
    /// Set by the editor's commit listener.
    dirty: Arc<AtomicBool>,
}

impl<S: VersionStore> AutoVersioner<S> {
    pub fn new(store: Arc<S>, campaign_id: impl Into<String>) -> Self {
        Self {
            store,
            campaign_id: campaign_id.into(),
            interval: Duration::from_secs(DEFAULT_AUTOVERSION_INTERVAL_SECS),
            last_save: None,
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn campaign_id(&self) -> &str {
        &self.campaign_id
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Mark the campaign dirty on every commit of `editor`.
    pub fn watch(&self, editor: &mut Editor) {
        let dirty = Arc::clone(&self.dirty);
        editor.on_commit(move |_| dirty.store(true, Ordering::Relaxed));
    }

    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Relaxed);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Relaxed)
    }

    /// Check if a snapshot is due.
    pub fn should_save(&self) -> bool {
        if !self.is_dirty() {
            return false;
        }
        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Save a snapshot if one is due. Returns the new version number.
    pub async fn maybe_save(&mut self, document: &DesignDocument) -> StoreResult<Option<u32>> {
        if !self.should_save() {
            return Ok(None);
        }
        self.save(document, AUTO_TITLE).await.map(Some)
    }

    /// Save a snapshot now.
    pub async fn save(&mut self, document: &DesignDocument, title: &str) -> StoreResult<u32> {
        let version = self.store.save_version(&self.campaign_id, title, document).await?;
        self.last_save = Some(Instant::now());
        self.dirty.store(false, Ordering::Relaxed);
        Ok(version)
    }

    /// Load the latest version into `editor`, replacing its history.
    /// On failure the editor is left untouched.
    pub async fn restore_latest(&mut self, editor: &mut Editor) -> StoreResult<u32> {
        let latest = self.store.latest_version(&self.campaign_id).await?;
        editor.restore(latest.document);
        self.last_save = Some(Instant::now());
        self.dirty.store(false, Ordering::Relaxed);
        log::info!("Restored {} v{}", self.campaign_id, latest.info.version);
        Ok(latest.info.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;
    use crate::storage::{MemoryVersionStore, StoreError};
    use kurbo::Vec2;
    use pollster::block_on;

    fn editor() -> Editor {
        Editor::new(DesignDocument::default().with_layer(Layer::rect("r", 0.0, 0.0, 10.0, 10.0)))
    }

    #[test]
    fn test_saves_only_when_dirty() {
        let store = Arc::new(MemoryVersionStore::new());
        let mut versioner = AutoVersioner::new(Arc::clone(&store), "camp").with_interval(Duration::ZERO);
        let mut editor = editor();
        versioner.watch(&mut editor);

        assert_eq!(block_on(versioner.maybe_save(editor.committed_document())).unwrap(), None);

        editor.select_all();
        editor.move_selection_by(Vec2::new(5.0, 0.0));
        assert!(versioner.is_dirty());
        assert_eq!(block_on(versioner.maybe_save(editor.committed_document())).unwrap(), Some(1));
        assert!(!versioner.is_dirty());
        assert_eq!(block_on(versioner.maybe_save(editor.committed_document())).unwrap(), None);
    }

    #[test]
    fn test_interval_delays_save() {
        let store = Arc::new(MemoryVersionStore::new());
        let mut versioner = AutoVersioner::new(store, "camp").with_interval(Duration::from_secs(3600));
        block_on(versioner.save(&DesignDocument::default(), "manual")).unwrap();
        versioner.mark_dirty();
        assert!(!versioner.should_save());
    }

    #[test]
    fn test_restore_latest() {
        let store = Arc::new(MemoryVersionStore::new());
        let saved = DesignDocument::default().with_layer(Layer::circle("c", 1.0, 2.0, 3.0));
        block_on(store.save_version("camp", "v1", &saved)).unwrap();

        let mut versioner = AutoVersioner::new(Arc::clone(&store), "camp");
        let mut editor = editor();
        versioner.watch(&mut editor);

        assert_eq!(block_on(versioner.restore_latest(&mut editor)).unwrap(), 1);
        assert_eq!(editor.document(), &saved);
        assert!(!editor.can_undo());
        assert!(!versioner.is_dirty());
    }

    #[test]
    fn test_restore_failure_leaves_editor() {
        let store = Arc::new(MemoryVersionStore::new());
        let mut versioner = AutoVersioner::new(store, "missing");
        let mut editor = editor();
        let before = editor.document().clone();

        let result = block_on(versioner.restore_latest(&mut editor));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert_eq!(editor.document(), &before);
    }
}
