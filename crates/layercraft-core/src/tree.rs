//! Layer tree queries and mutations.
//!
//! The tree is a `Vec<Layer>` whose group layers own nested vectors. Lookups
//! are depth-first and descend into groups; parents are rediscovered by
//! search instead of being stored on the children.

use crate::error::{EditError, EditResult};
use crate::layer::{Layer, LayerId, LayerPatch};
use kurbo::Point;
use std::collections::HashSet;

/// A layer found by [`find_with_parent`].
#[derive(Debug, Clone, Copy)]
pub struct LayerRef<'a> {
    pub layer: &'a Layer,
    /// The array holding `layer`.
    pub parent: &'a [Layer],
    /// Position of `layer` in `parent`.
    pub index: usize,
    /// Absolute canvas position of the parent's origin.
    pub origin: Point,
}

/// Mutable access to the array that holds a layer.
#[derive(Debug)]
pub struct ParentSlot<'a> {
    pub parent: &'a mut Vec<Layer>,
    pub index: usize,
}

impl ParentSlot<'_> {
    pub fn layer(&self) -> &Layer {
        &self.parent[self.index]
    }

    pub fn layer_mut(&mut self) -> &mut Layer {
        &mut self.parent[self.index]
    }

    /// Take the layer out of its parent.
    pub fn remove(self) -> Layer {
        self.parent.remove(self.index)
    }
}

/// Depth-first search for a layer, descending into groups.
pub fn find_by_id<'a>(layers: &'a [Layer], id: &LayerId) -> Option<&'a Layer> {
    for layer in layers {
        if &layer.id == id {
            return Some(layer);
        }
        if let Some(children) = layer.children() {
            if let Some(found) = find_by_id(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Mutable depth-first search for a layer.
pub fn find_by_id_mut<'a>(layers: &'a mut [Layer], id: &LayerId) -> Option<&'a mut Layer> {
    for layer in layers.iter_mut() {
        if &layer.id == id {
            return Some(layer);
        }
        if let Some(children) = layer.children_mut() {
            if let Some(found) = find_by_id_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Index path from the root array to a layer (last element is the index in
/// its own parent).
pub fn locate(layers: &[Layer], id: &LayerId) -> Option<Vec<usize>> {
    for (index, layer) in layers.iter().enumerate() {
        if &layer.id == id {
            return Some(vec![index]);
        }
        if let Some(children) = layer.children() {
            if let Some(mut path) = locate(children, id) {
                path.insert(0, index);
                return Some(path);
            }
        }
    }
    None
}

/// Find a layer together with its parent array and index.
pub fn find_with_parent<'a>(layers: &'a [Layer], id: &LayerId) -> EditResult<LayerRef<'a>> {
    find_with_parent_at(layers, id, Point::ZERO).ok_or_else(|| EditError::NotFound(id.clone()))
}

fn find_with_parent_at<'a>(layers: &'a [Layer], id: &LayerId, origin: Point) -> Option<LayerRef<'a>> {
    for (index, layer) in layers.iter().enumerate() {
        if &layer.id == id {
            return Some(LayerRef {
                layer,
                parent: layers,
                index,
                origin,
            });
        }
        if let Some(children) = layer.children() {
            let child_origin = Point::new(origin.x + layer.x, origin.y + layer.y);
            if let Some(found) = find_with_parent_at(children, id, child_origin) {
                return Some(found);
            }
        }
    }
    None
}

/// Find the mutable parent array holding a layer.
pub fn find_with_parent_mut<'a>(
    layers: &'a mut Vec<Layer>,
    id: &LayerId,
) -> EditResult<ParentSlot<'a>> {
    let path = locate(layers, id).ok_or_else(|| EditError::NotFound(id.clone()))?;
    let Some((&index, ancestors)) = path.split_last() else {
        return Err(EditError::NotFound(id.clone()));
    };

    let mut parent = layers;
    for &ancestor in ancestors {
        parent = parent[ancestor]
            .children_mut()
            .ok_or_else(|| EditError::NotFound(id.clone()))?;
    }
    Ok(ParentSlot { parent, index })
}

/// Shallow-merge `patch` into the layer with the given id.
pub fn mutate_layer(layers: &mut [Layer], id: &LayerId, patch: &LayerPatch) -> EditResult<()> {
    let layer = find_by_id_mut(layers, id).ok_or_else(|| EditError::NotFound(id.clone()))?;
    patch.apply(layer);
    Ok(())
}

/// Remove every layer whose id is in `ids`, at any depth.
/// Returns the removed layers.
pub fn remove_layers(layers: &mut Vec<Layer>, ids: &HashSet<LayerId>) -> Vec<Layer> {
    let mut removed = Vec::new();
    // Walk backwards so removals never shift indices still to be visited.
    for index in (0..layers.len()).rev() {
        if ids.contains(&layers[index].id) {
            removed.push(layers.remove(index));
        } else if let Some(children) = layers[index].children_mut() {
            let mut nested = remove_layers(children, ids);
            nested.reverse();
            removed.extend(nested);
        }
    }
    removed.reverse();
    removed
}

/// Insert a layer at `at` (clamped), or append when `None`.
/// Returns the index the layer landed at.
pub fn insert_layer(layers: &mut Vec<Layer>, layer: Layer, at: Option<usize>) -> usize {
    let index = at.map_or(layers.len(), |i| i.min(layers.len()));
    layers.insert(index, layer);
    index
}

/// Every id in the tree, depth-first.
pub fn collect_ids(layers: &[Layer]) -> Vec<LayerId> {
    layers.iter().flat_map(Layer::all_ids).collect()
}

/// Whether every id in the tree is distinct.
pub fn ids_are_unique(layers: &[Layer]) -> bool {
    let ids = collect_ids(layers);
    let unique: HashSet<&LayerId> = ids.iter().collect();
    unique.len() == ids.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Layer> {
        vec![
            Layer::rect("a", 0.0, 0.0, 10.0, 10.0),
            Layer::group(
                "g",
                100.0,
                50.0,
                60.0,
                60.0,
                vec![
                    Layer::rect("b", 0.0, 0.0, 10.0, 10.0),
                    Layer::circle("c", 20.0, 20.0, 5.0),
                ],
            ),
            Layer::text("d", 5.0, 5.0, "hi"),
        ]
    }

    fn id(s: &str) -> LayerId {
        LayerId::from(s)
    }

    #[test]
    fn test_find_by_id_descends_into_groups() {
        let layers = sample();
        assert_eq!(find_by_id(&layers, &id("c")).map(|l| l.type_name()), Some("circle"));
        assert!(find_by_id(&layers, &id("missing")).is_none());
    }

    #[test]
    fn test_find_with_parent() {
        let layers = sample();
        let found = find_with_parent(&layers, &id("c")).unwrap();
        assert_eq!(found.index, 1);
        assert_eq!(found.parent.len(), 2);
        assert_eq!(found.origin, Point::new(100.0, 50.0));

        let top = find_with_parent(&layers, &id("d")).unwrap();
        assert_eq!(top.index, 2);
        assert_eq!(top.origin, Point::ZERO);
    }

    #[test]
    fn test_find_with_parent_not_found() {
        let layers = sample();
        let result = find_with_parent(&layers, &id("zzz"));
        assert_eq!(result.err(), Some(EditError::NotFound(id("zzz"))));
    }

    #[test]
    fn test_find_with_parent_mut_removes_nested() {
        let mut layers = sample();
        let slot = find_with_parent_mut(&mut layers, &id("b")).unwrap();
        assert_eq!(slot.index, 0);
        let removed = slot.remove();
        assert_eq!(removed.id, id("b"));
        assert_eq!(layers[1].children().map(<[Layer]>::len), Some(1));
    }

    #[test]
    fn test_locate() {
        let layers = sample();
        assert_eq!(locate(&layers, &id("c")), Some(vec![1, 1]));
        assert_eq!(locate(&layers, &id("a")), Some(vec![0]));
        assert_eq!(locate(&layers, &id("x")), None);
    }

    #[test]
    fn test_mutate_layer() {
        let mut layers = sample();
        mutate_layer(&mut layers, &id("c"), &LayerPatch::position(1.0, 2.0)).unwrap();
        let c = find_by_id(&layers, &id("c")).unwrap();
        assert_eq!((c.x, c.y), (1.0, 2.0));

        let before = layers.clone();
        let result = mutate_layer(&mut layers, &id("nope"), &LayerPatch::position(1.0, 2.0));
        assert!(matches!(result, Err(EditError::NotFound(_))));
        assert_eq!(layers, before);
    }

    #[test]
    fn test_remove_layers_at_any_depth() {
        let mut layers = sample();
        let ids: HashSet<LayerId> = [id("a"), id("c"), id("d")].into_iter().collect();
        let removed = remove_layers(&mut layers, &ids);

        assert_eq!(removed.len(), 3);
        assert_eq!(layers.len(), 1);
        assert_eq!(collect_ids(&layers), vec![id("g"), id("b")]);
    }

    #[test]
    fn test_remove_adjacent_layers() {
        let mut layers = vec![
            Layer::rect("1", 0.0, 0.0, 1.0, 1.0),
            Layer::rect("2", 0.0, 0.0, 1.0, 1.0),
            Layer::rect("3", 0.0, 0.0, 1.0, 1.0),
        ];
        let ids: HashSet<LayerId> = [id("1"), id("2")].into_iter().collect();
        let removed = remove_layers(&mut layers, &ids);
        assert_eq!(removed.iter().map(|l| l.id.clone()).collect::<Vec<_>>(), vec![id("1"), id("2")]);
        assert_eq!(collect_ids(&layers), vec![id("3")]);
    }

    #[test]
    fn test_insert_layer() {
        let mut layers = sample();
        let at = insert_layer(&mut layers, Layer::rect("e", 0.0, 0.0, 1.0, 1.0), None);
        assert_eq!(at, 3);
        let at = insert_layer(&mut layers, Layer::rect("f", 0.0, 0.0, 1.0, 1.0), Some(0));
        assert_eq!(at, 0);
        let at = insert_layer(&mut layers, Layer::rect("h", 0.0, 0.0, 1.0, 1.0), Some(99));
        assert_eq!(at, layers.len() - 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut layers = sample();
        assert!(ids_are_unique(&layers));
        layers.push(Layer::rect("c", 0.0, 0.0, 1.0, 1.0));
        assert!(!ids_are_unique(&layers));
    }
}
