// hierarchy/edit.rs
//
// Bulk structural edits: clear, move and copy ranges of children.
//
// Ranges are half-open sibling-index ranges `[from, to)` and are validated
// before any mutation. The affected children are snapshotted up front, so
// sibling indices shifting mid-operation never skip a node.

use log::debug;

use crate::api::error::{HierarchyError, Result};
use crate::api::types::{NodeId, Placement};
use crate::hierarchy::traits::{Hierarchy, HierarchyMut, PositionAccess};

/// Destroy every direct child of `parent`. Returns `parent`.
pub fn clear_children<H: HierarchyMut + ?Sized>(host: &mut H, parent: NodeId) -> Result<NodeId> {
    require(&*host, parent)?;
    let children = host.children(parent).to_vec();
    for &child in &children {
        host.destroy(child)?;
    }
    debug!("cleared {} children of {:?}", children.len(), parent);
    Ok(parent)
}

/// Reparent children `[from, to)` of `parent` under `new_parent`.
/// They are appended in their original relative order and returned in that order.
pub fn move_children<H: HierarchyMut + ?Sized>(
    host: &mut H,
    parent: NodeId,
    new_parent: NodeId,
    from: usize,
    to: usize,
) -> Result<Vec<NodeId>> {
    let moved = snapshot_range(&*host, parent, new_parent, from, to)?;
    for &child in &moved {
        if is_in_subtree(&*host, child, new_parent) {
            return Err(HierarchyError::InvalidArgument(format!(
                "{new_parent:?} lies inside the subtree of moved child {child:?}"
            )));
        }
    }
    for &child in &moved {
        host.reparent(child, Some(new_parent))?;
    }
    debug!("moved {} children from {:?} to {:?}", moved.len(), parent, new_parent);
    Ok(moved)
}

/// Move every child of `parent` under `new_parent`.
pub fn move_all_children<H: HierarchyMut + ?Sized>(
    host: &mut H,
    parent: NodeId,
    new_parent: NodeId,
) -> Result<Vec<NodeId>> {
    let count = host.child_count(parent);
    move_children(host, parent, new_parent, 0, count)
}

/// Deep-clone children `[from, to)` of `parent` and attach the clones under
/// `new_parent`. Returns the clones in source order.
pub fn copy_children<H: HierarchyMut + ?Sized>(
    host: &mut H,
    parent: NodeId,
    new_parent: NodeId,
    from: usize,
    to: usize,
) -> Result<Vec<NodeId>> {
    let sources = snapshot_range(&*host, parent, new_parent, from, to)?;
    let mut clones = Vec::with_capacity(sources.len());
    for source in sources {
        let clone = host.instantiate(source)?;
        host.reparent(clone, Some(new_parent))?;
        clones.push(clone);
    }
    debug!("copied {} children of {:?} to {:?}", clones.len(), parent, new_parent);
    Ok(clones)
}

/// Like [`copy_children`], then move each clone to `placement` after it is attached.
pub fn copy_children_to<H>(
    host: &mut H,
    parent: NodeId,
    new_parent: NodeId,
    from: usize,
    to: usize,
    placement: Placement,
) -> Result<Vec<NodeId>>
where
    H: HierarchyMut + PositionAccess + ?Sized,
{
    let clones = copy_children(host, parent, new_parent, from, to)?;
    for &clone in &clones {
        if !host.set_position(clone, placement.space, placement.position) {
            return Err(HierarchyError::UnknownNode(clone));
        }
    }
    Ok(clones)
}

/// Copy every child of `parent` under `new_parent`.
pub fn copy_all_children<H: HierarchyMut + ?Sized>(
    host: &mut H,
    parent: NodeId,
    new_parent: NodeId,
) -> Result<Vec<NodeId>> {
    let count = host.child_count(parent);
    copy_children(host, parent, new_parent, 0, count)
}

/// Copy every child of `parent` under `new_parent`, placing each clone at `placement`.
pub fn copy_all_children_to<H>(
    host: &mut H,
    parent: NodeId,
    new_parent: NodeId,
    placement: Placement,
) -> Result<Vec<NodeId>>
where
    H: HierarchyMut + PositionAccess + ?Sized,
{
    let count = host.child_count(parent);
    copy_children_to(host, parent, new_parent, 0, count, placement)
}

fn require<H: Hierarchy + ?Sized>(host: &H, node: NodeId) -> Result<()> {
    if host.contains(node) {
        Ok(())
    } else {
        Err(HierarchyError::UnknownNode(node))
    }
}

/// Validate both endpoints and the range, then copy out the affected ids.
fn snapshot_range<H: Hierarchy + ?Sized>(
    host: &H,
    parent: NodeId,
    new_parent: NodeId,
    from: usize,
    to: usize,
) -> Result<Vec<NodeId>> {
    require(host, parent)?;
    require(host, new_parent)?;
    let children = host.children(parent);
    if from > to || to > children.len() {
        return Err(HierarchyError::Range { from, to, count: children.len() });
    }
    Ok(children[from..to].to_vec())
}

/// Whether `node` is `root` or one of its descendants.
fn is_in_subtree<H: Hierarchy + ?Sized>(host: &H, root: NodeId, node: NodeId) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if id == root {
            return true;
        }
        current = host.parent(id);
    }
    false
}
