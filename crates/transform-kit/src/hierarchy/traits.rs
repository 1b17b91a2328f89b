use glam::{Vec2, Vec3};

use crate::api::error::Result;
use crate::api::types::{NodeId, Space};

/// Read-only view of a host-owned node hierarchy.
///
/// Children are ordered by sibling index. Parent links are back references;
/// the child lists are the only ownership path.
pub trait Hierarchy {
    /// Whether the node exists in this host.
    fn contains(&self, node: NodeId) -> bool;

    fn name(&self, node: NodeId) -> Option<&str>;

    fn tag(&self, node: NodeId) -> Option<&str>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Direct children in sibling order. Empty for unknown nodes.
    fn children(&self, node: NodeId) -> &[NodeId];

    fn child_count(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    fn child(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.children(node).get(index).copied()
    }

    /// Position of the node among its parent's children. `None` for roots.
    fn sibling_index(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&c| c == node)
    }

    /// Direct lookup below `parent`: an exact child name, or a `/`-separated
    /// path of names descending from `parent`.
    fn find(&self, parent: NodeId, path: &str) -> Option<NodeId> {
        let mut current = parent;
        for segment in path.split('/') {
            current = self
                .children(current)
                .iter()
                .copied()
                .find(|&c| self.name(c) == Some(segment))?;
        }
        Some(current)
    }
}

/// Structural mutations a host delegates to its own primitives.
pub trait HierarchyMut: Hierarchy {
    /// Deep-clone `node` and its subtree. The clone gets a new identity and
    /// starts as a root at the source's world position.
    fn instantiate(&mut self, node: NodeId) -> Result<NodeId>;

    /// Tear down `node` together with its subtree.
    fn destroy(&mut self, node: NodeId) -> Result<()>;

    /// Detach `node` from its current parent and append it to `new_parent`
    /// (or make it a root) in one step. World position is kept.
    fn reparent(&mut self, node: NodeId, new_parent: Option<NodeId>) -> Result<()>;
}

/// Position channels of a node.
pub trait PositionAccess {
    fn position(&self, node: NodeId, space: Space) -> Option<Vec3>;

    /// Returns `false` when the node does not exist.
    fn set_position(&mut self, node: NodeId, space: Space, pos: Vec3) -> bool;

    /// Whether the node is a UI rectangle node driven through its anchored position.
    fn is_rect(&self, node: NodeId) -> bool;

    fn anchored_position(&self, node: NodeId) -> Option<Vec2>;

    /// Returns `false` when the node does not exist or is not a rectangle node.
    fn set_anchored_position(&mut self, node: NodeId, pos: Vec2) -> bool;

    /// Whether a suspendable task may be started on behalf of this node.
    fn can_host_tasks(&self, node: NodeId) -> bool;
}
