//! Selected-layer set.
//!
//! Selection is UI state: it is never part of a history snapshot. Ids keep
//! the order they were added in so "the first selected layer" is well defined.

use crate::layer::LayerId;

/// Set of selected layer ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<LayerId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[LayerId] {
        &self.ids
    }

    pub fn contains(&self, id: &LayerId) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// First id added, if any.
    pub fn first(&self) -> Option<&LayerId> {
        self.ids.first()
    }

    /// The selected id when exactly one layer is selected.
    pub fn single(&self) -> Option<&LayerId> {
        match self.ids.as_slice() {
            [id] => Some(id),
            _ => None,
        }
    }

    /// Replace the selection with one layer.
    pub fn select(&mut self, id: LayerId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Replace the selection with the given layers.
    pub fn set(&mut self, ids: impl IntoIterator<Item = LayerId>) {
        self.ids.clear();
        for id in ids {
            self.add(id);
        }
    }

    pub fn add(&mut self, id: LayerId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn remove(&mut self, id: &LayerId) {
        self.ids.retain(|selected| selected != id);
    }

    /// Flip membership of one layer.
    pub fn toggle(&mut self, id: LayerId) {
        if self.contains(&id) {
            self.remove(&id);
        } else {
            self.ids.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Keep only ids matching `keep`.
    pub fn retain(&mut self, keep: impl FnMut(&LayerId) -> bool) {
        self.ids.retain(keep);
    }

    /// Click semantics: shift toggles, otherwise replace.
    pub fn click(&mut self, id: LayerId, additive: bool) {
        if additive {
            self.toggle(id);
        } else {
            self.select(id);
        }
    }

    /// Marquee semantics: shift toggles every hit, otherwise the hits become
    /// the selection.
    pub fn apply_marquee(&mut self, hits: Vec<LayerId>, additive: bool) {
        if additive {
            for id in hits {
                self.toggle(id);
            }
        } else {
            self.set(hits);
        }
    }
}
