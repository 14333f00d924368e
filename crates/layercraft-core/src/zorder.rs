//! Stacking order changes.
//!
//! Later entries in a layer array paint on top of earlier ones, so "front"
//! means the end of the array.

use crate::error::EditResult;
use crate::layer::{Layer, LayerId};
use crate::tree::find_with_parent_mut;
use serde::{Deserialize, Serialize};

/// Where to move a layer within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// To the top of the stack.
    Front,
    /// To the bottom of the stack.
    Back,
    /// One step up.
    Forward,
    /// One step down.
    Backward,
}

/// Move a layer within its parent array, at any depth.
/// Returns the layer's new index.
pub fn reorder(layers: &mut Vec<Layer>, id: &LayerId, direction: Direction) -> EditResult<usize> {
    let slot = find_with_parent_mut(layers, id)?;
    let index = slot.index;
    let parent = slot.parent;
    let layer = parent.remove(index);

    let target = match direction {
        Direction::Front => parent.len(),
        Direction::Back => 0,
        Direction::Forward => (index + 1).min(parent.len()),
        Direction::Backward => index.saturating_sub(1),
    };
    parent.insert(target, layer);
    Ok(target)
}
