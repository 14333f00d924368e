//! Drives an editor through a script the way a UI host would.

use crate::script::{HostAction, Script, Step};
use layercraft_core::config::ConfigError;
use layercraft_core::{AutoVersioner, DesignDocument, Editor, EditorConfig, StoreError, VersionStore};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Replay failures.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Version store failed: {0}")]
    Store(#[from] StoreError),
}

/// Counters reported after a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub steps: usize,
    pub commits: usize,
    pub versions_saved: usize,
}

/// An editor plus the persistence a host would attach to it.
pub struct Runner<S: VersionStore> {
    editor: Editor,
    versioner: Option<AutoVersioner<S>>,
    commits: Rc<Cell<usize>>,
}

impl<S: VersionStore> Runner<S> {
    pub fn new(document: DesignDocument, config: EditorConfig) -> Self {
        let mut editor = Editor::with_config(document, config);
        let commits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&commits);
        editor.on_commit(move |_| counter.set(counter.get() + 1));
        Self {
            editor,
            versioner: None,
            commits,
        }
    }

    /// Save every committed state as a new version of `campaign_id`.
    pub fn persist_to(&mut self, store: Arc<S>, campaign_id: &str) {
        let versioner = AutoVersioner::new(store, campaign_id).with_interval(Duration::ZERO);
        versioner.watch(&mut self.editor);
        self.versioner = Some(versioner);
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Start from the campaign's latest stored version.
    pub fn restore_latest(&mut self) -> Result<u32, ReplayError> {
        let Some(versioner) = self.versioner.as_mut() else {
            return Err(ReplayError::Store(StoreError::Other("no version store attached".to_string())));
        };
        Ok(pollster::block_on(versioner.restore_latest(&mut self.editor))?)
    }

    pub fn run(&mut self, script: &Script) -> Result<Summary, ReplayError> {
        let commits_before = self.commits.get();
        let mut summary = Summary::default();

        if let Some(viewport) = script.viewport {
            self.editor.set_zoom(viewport.zoom);
            self.editor.set_container_origin(viewport.origin);
        }

        for step in &script.steps {
            match step {
                Step::Input(event) => self.editor.handle_event(event),
                Step::Host(action) => {
                    if self.apply_host_action(action)? {
                        summary.versions_saved += 1;
                    }
                }
            }
            summary.steps += 1;

            if let Some(versioner) = self.versioner.as_mut() {
                if pollster::block_on(versioner.maybe_save(self.editor.committed_document()))?.is_some() {
                    summary.versions_saved += 1;
                }
            }
        }

        if self.editor.is_gesture_active() {
            log::warn!("Script ended mid-gesture, ending it");
            self.editor.pointer_leave();
        }

        summary.commits = self.commits.get() - commits_before;
        Ok(summary)
    }

    /// Returns true when the action saved a version.
    fn apply_host_action(&mut self, action: &HostAction) -> Result<bool, ReplayError> {
        match action {
            HostAction::SetZoom { zoom } => self.editor.set_zoom(*zoom),
            HostAction::SetOrigin { origin } => self.editor.set_container_origin(*origin),
            HostAction::Pan { delta } => self.editor.pan(*delta),
            HostAction::Run { command } => self.editor.execute(*command),
            HostAction::ApplyBrandKit { kit } => {
                self.editor.apply_brand_kit(kit);
            }
            HostAction::ApplyContent { patches } => {
                let applied = self
                    .editor
                    .apply_content(patches.iter().map(|(id, patch)| (id.clone(), patch.clone())));
                log::info!("Applied content to {applied} of {} layers", patches.len());
            }
            HostAction::SaveVersion { title } => {
                let Some(versioner) = self.versioner.as_mut() else {
                    log::warn!("saveVersion ignored: no version store attached");
                    return Ok(false);
                };
                let version = pollster::block_on(versioner.save(self.editor.committed_document(), title))?;
                log::info!("Saved version {version} \"{title}\"");
                return Ok(true);
            }
        }
        Ok(false)
    }
}
