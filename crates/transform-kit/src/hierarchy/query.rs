// hierarchy/query.rs
//
// Read-only searches over a host hierarchy.
//
// BFS and DFS are separate entry points on purpose: when names or tags repeat,
// callers rely on getting the first match in that particular order.

use std::collections::VecDeque;

use crate::api::types::NodeId;
use crate::hierarchy::traits::Hierarchy;

/// Breadth-first search for a descendant of `root` by name.
///
/// Each visited parent is asked for a direct match through
/// [`Hierarchy::find`], so path-qualified names (`"arm/hand"`) resolve
/// relative to that parent. `root` itself is never returned.
pub fn find_by_name_bfs<H: Hierarchy + ?Sized>(host: &H, root: NodeId, name: &str) -> Option<NodeId> {
    let mut queue = VecDeque::from([root]);
    while let Some(parent) = queue.pop_front() {
        if let Some(found) = host.find(parent, name) {
            return Some(found);
        }
        queue.extend(host.children(parent).iter().copied());
    }
    None
}

/// Depth-first (pre-order) search for a descendant of `root` by name.
pub fn find_by_name_dfs<H: Hierarchy + ?Sized>(host: &H, root: NodeId, name: &str) -> Option<NodeId> {
    find_dfs(host, root, |id| host.name(id) == Some(name))
}

/// Breadth-first search for a descendant of `root` by tag.
pub fn find_by_tag_bfs<H: Hierarchy + ?Sized>(host: &H, root: NodeId, tag: &str) -> Option<NodeId> {
    find_bfs(host, root, |id| host.tag(id) == Some(tag))
}

/// Depth-first (pre-order) search for a descendant of `root` by tag.
pub fn find_by_tag_dfs<H: Hierarchy + ?Sized>(host: &H, root: NodeId, tag: &str) -> Option<NodeId> {
    find_dfs(host, root, |id| host.tag(id) == Some(tag))
}

/// First direct child of `parent` carrying `tag`. No recursion.
pub fn find_first_child_by_tag<H: Hierarchy + ?Sized>(host: &H, parent: NodeId, tag: &str) -> Option<NodeId> {
    host.children(parent)
        .iter()
        .copied()
        .find(|&c| host.tag(c) == Some(tag))
}

/// Every descendant of `root` carrying `tag`, in breadth order.
pub fn find_all_by_tag<H: Hierarchy + ?Sized>(host: &H, root: NodeId, tag: &str) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut queue: VecDeque<NodeId> = host.children(root).iter().copied().collect();
    while let Some(id) = queue.pop_front() {
        if host.tag(id) == Some(tag) {
            found.push(id);
        }
        queue.extend(host.children(id).iter().copied());
    }
    found
}

/// Nearest ancestor of `node` named `name`. `node` itself is excluded.
pub fn find_ancestor_by_name<H: Hierarchy + ?Sized>(host: &H, node: NodeId, name: &str) -> Option<NodeId> {
    find_ancestor(host, node, |id| host.name(id) == Some(name))
}

/// Nearest ancestor of `node` tagged `tag`. `node` itself is excluded.
pub fn find_ancestor_by_tag<H: Hierarchy + ?Sized>(host: &H, node: NodeId, tag: &str) -> Option<NodeId> {
    find_ancestor(host, node, |id| host.tag(id) == Some(tag))
}

/// Level-order scan of the descendants of `root`.
fn find_bfs<H, F>(host: &H, root: NodeId, matches: F) -> Option<NodeId>
where
    H: Hierarchy + ?Sized,
    F: Fn(NodeId) -> bool,
{
    let mut queue: VecDeque<NodeId> = host.children(root).iter().copied().collect();
    while let Some(id) = queue.pop_front() {
        if matches(id) {
            return Some(id);
        }
        queue.extend(host.children(id).iter().copied());
    }
    None
}

/// Pre-order scan of the descendants of `root`.
fn find_dfs<H, F>(host: &H, root: NodeId, matches: F) -> Option<NodeId>
where
    H: Hierarchy + ?Sized,
    F: Fn(NodeId) -> bool,
{
    // Children pushed in reverse so the leftmost sibling pops first.
    let mut stack: Vec<NodeId> = host.children(root).iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        if matches(id) {
            return Some(id);
        }
        stack.extend(host.children(id).iter().rev().copied());
    }
    None
}

fn find_ancestor<H, F>(host: &H, node: NodeId, matches: F) -> Option<NodeId>
where
    H: Hierarchy + ?Sized,
    F: Fn(NodeId) -> bool,
{
    let mut current = host.parent(node);
    while let Some(id) = current {
        if matches(id) {
            return Some(id);
        }
        current = host.parent(id);
    }
    None
}
