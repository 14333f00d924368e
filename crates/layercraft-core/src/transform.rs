//! Geometric transforms: resize, rotate, group and ungroup.

use crate::error::{EditError, EditResult};
use crate::geometry::{effective_bounds, effective_size, union_bounds};
use crate::handles::ResizeHandle;
use crate::layer::{Layer, LayerId, LayerKind};
use crate::tree::find_with_parent_mut;
use kurbo::{Point, Vec2};

/// Limits applied by [`resize_layer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeLimits {
    pub min_size: f64,
    pub min_radius: f64,
}

impl Default for ResizeLimits {
    fn default() -> Self {
        Self {
            min_size: crate::config::MIN_SIZE,
            min_radius: crate::config::MIN_RADIUS,
        }
    }
}

/// Resize `start` (the layer as it was when the gesture began) by the mouse
/// delta accumulated since then.
///
/// Rectangular layers change width/height per touched edge; a left or top
/// edge also moves x/y by the delta. Circles only react to vertical edges:
/// the radius follows half the vertical delta and a top edge shifts y by the
/// same half delta.
pub fn resize_layer(start: &Layer, handle: ResizeHandle, delta: Vec2, limits: ResizeLimits) -> Layer {
    let mut layer = start.clone();

    if let LayerKind::Circle(circle) = &mut layer.kind {
        let half = delta.y / 2.0;
        if handle.touches_bottom() {
            circle.radius = (circle.radius + half).max(limits.min_radius);
        } else if handle.touches_top() {
            circle.radius = (circle.radius - half).max(limits.min_radius);
            layer.y = start.y + half;
        }
        return layer;
    }

    let size = effective_size(start);
    if handle.touches_right() {
        layer.width = Some((size.width + delta.x).max(limits.min_size));
    } else if handle.touches_left() {
        layer.width = Some((size.width - delta.x).max(limits.min_size));
        layer.x = start.x + delta.x;
    }
    if handle.touches_bottom() {
        layer.height = Some((size.height + delta.y).max(limits.min_size));
    } else if handle.touches_top() {
        layer.height = Some((size.height - delta.y).max(limits.min_size));
        layer.y = start.y + delta.y;
    }
    layer
}

/// Rotation in degrees for a pointer at `pointer` rotating around `center`.
/// Zero points straight up. With `step` the angle is rounded to multiples of
/// `step` degrees.
pub fn rotation_angle(center: Point, pointer: Point, step: Option<f64>) -> f64 {
    let angle = (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees() + 90.0;
    match step {
        Some(step) if step > 0.0 => (angle / step).round() * step,
        _ => angle,
    }
}

/// Group the top-level layers named by `ids` into a new group layer.
///
/// Members keep their relative stacking order. The group takes the union
/// bounding box of its members and is inserted where the frontmost member
/// was. Returns the new group's id.
pub fn group_layers(layers: &mut Vec<Layer>, ids: &[LayerId]) -> EditResult<LayerId> {
    let indices: Vec<usize> = layers
        .iter()
        .enumerate()
        .filter(|(_, layer)| ids.contains(&layer.id))
        .map(|(index, _)| index)
        .collect();
    if indices.len() < 2 {
        return Err(EditError::InvalidOperation(format!(
            "grouping needs at least 2 top-level layers, found {}",
            indices.len()
        )));
    }

    let bounds = union_bounds(indices.iter().map(|&i| effective_bounds(&layers[i])))
        .ok_or_else(|| EditError::InvalidOperation("empty group".to_string()))?;

    let frontmost = indices[indices.len() - 1];
    let insert_at = frontmost + 1 - indices.len();

    let mut members = Vec::with_capacity(indices.len());
    for &index in indices.iter().rev() {
        members.push(layers.remove(index));
    }
    members.reverse();

    let origin = bounds.origin();
    for member in &mut members {
        member.x -= origin.x;
        member.y -= origin.y;
    }

    let group = Layer::group(
        LayerId::generate(),
        origin.x,
        origin.y,
        bounds.width(),
        bounds.height(),
        members,
    );
    let group_id = group.id.clone();
    layers.insert(insert_at, group);
    log::debug!("Grouped {} layers into {}", indices.len(), group_id);
    Ok(group_id)
}

/// Dissolve a group, at any depth. Its children move back into the group's
/// parent at the group's former index with their positions made relative to
/// that parent again. Returns the children's ids in stacking order.
pub fn ungroup_layer(layers: &mut Vec<Layer>, id: &LayerId) -> EditResult<Vec<LayerId>> {
    let slot = find_with_parent_mut(layers, id)?;
    if !slot.layer().is_group() {
        return Err(EditError::InvalidOperation(format!("{id} is not a group")));
    }

    let index = slot.index;
    let parent = slot.parent;
    let mut group = parent.remove(index);
    let offset = Vec2::new(group.x, group.y);
    let mut children = group.children_mut().map(std::mem::take).unwrap_or_default();
    for child in &mut children {
        child.x += offset.x;
        child.y += offset.y;
    }

    let child_ids: Vec<LayerId> = children.iter().map(|c| c.id.clone()).collect();
    parent.splice(index..index, children);
    log::debug!("Ungrouped {} into {} layers", id, child_ids.len());
    Ok(child_ids)
}
