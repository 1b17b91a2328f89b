// core/scene.rs
//
// In-memory hierarchy host: owns nodes and their parent-child links.
// Implements the host traits so the query/edit/animation helpers can run
// without an engine behind them.
//
// Usage:
//   let mut tree = SceneTree::new();
//   let root = tree.spawn(Node::new("root"));
//   let child = tree.spawn_child(root, Node::new("child"))?;

use std::collections::{HashMap, VecDeque};

use glam::{Vec2, Vec3};

use crate::api::error::{HierarchyError, Result};
use crate::api::types::{NodeId, Space};
use crate::components::node::Node;
use crate::hierarchy::traits::{Hierarchy, HierarchyMut, PositionAccess};

/// Storage slot: node data plus its links.
#[derive(Debug, Clone)]
struct Slot {
    node: Node,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Translation-only node hierarchy.
///
/// World position of a node is the sum of the local positions along its
/// parent chain.
#[derive(Debug, Default)]
pub struct SceneTree {
    slots: HashMap<NodeId, Slot>,
    /// Nodes with no parent, in spawn order.
    roots: Vec<NodeId>,
    next_id: u32,
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node as a new root. Returns its id.
    pub fn spawn(&mut self, node: Node) -> NodeId {
        let id = self.alloc_id();
        self.slots.insert(id, Slot { node, parent: None, children: Vec::new() });
        self.roots.push(id);
        id
    }

    /// Add a node as the last child of `parent`.
    pub fn spawn_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId> {
        if !self.slots.contains_key(&parent) {
            return Err(HierarchyError::UnknownNode(parent));
        }
        let id = self.alloc_id();
        self.slots.insert(id, Slot { node, parent: Some(parent), children: Vec::new() });
        if let Some(slot) = self.slots.get_mut(&parent) {
            slot.children.push(id);
        }
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(&id).map(|s| &s.node)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(&id).map(|s| &mut s.node)
    }

    /// Top-level nodes in spawn order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Absolute position: local positions summed up the parent chain.
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        let mut slot = self.slots.get(&id)?;
        let mut pos = slot.node.local_pos;
        while let Some(parent) = slot.parent {
            slot = self.slots.get(&parent)?;
            pos += slot.node.local_pos;
        }
        Some(pos)
    }

    /// Whether `ancestor` is `node` or lies on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.slots.get(&id).and_then(|s| s.parent);
        }
        false
    }

    /// `node` followed by all its descendants in breadth order.
    fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut queue = VecDeque::from([node]);
        while let Some(id) = queue.pop_front() {
            out.push(id);
            if let Some(slot) = self.slots.get(&id) {
                queue.extend(slot.children.iter().copied());
            }
        }
        out
    }

    /// Unlink `node` from its parent's child list (or the root list).
    fn detach(&mut self, node: NodeId) {
        let old_parent = self.slots.get(&node).and_then(|s| s.parent);
        match old_parent {
            Some(p) => {
                if let Some(parent_slot) = self.slots.get_mut(&p) {
                    parent_slot.children.retain(|&c| c != node);
                }
            }
            None => self.roots.retain(|&r| r != node),
        }
        if let Some(slot) = self.slots.get_mut(&node) {
            slot.parent = None;
        }
    }

    fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.roots.clear();
    }
}

impl Hierarchy for SceneTree {
    fn contains(&self, node: NodeId) -> bool {
        self.slots.contains_key(&node)
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        self.slots.get(&node).map(|s| s.node.name.as_str())
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        self.slots.get(&node).map(|s| s.node.tag.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slots.get(&node).and_then(|s| s.parent)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.slots.get(&node).map(|s| s.children.as_slice()).unwrap_or(&[])
    }
}

impl HierarchyMut for SceneTree {
    fn instantiate(&mut self, node: NodeId) -> Result<NodeId> {
        let origin = self.world_position(node).ok_or(HierarchyError::UnknownNode(node))?;
        let source = self.subtree(node);

        let mut remap = HashMap::with_capacity(source.len());
        for &old in &source {
            let id = self.alloc_id();
            remap.insert(old, id);
        }

        for &old in &source {
            let Some(slot) = self.slots.get(&old) else { continue };
            let mut copy = slot.clone();
            copy.children = slot.children.iter().filter_map(|c| remap.get(c).copied()).collect();
            copy.parent = slot.parent.and_then(|p| remap.get(&p).copied());
            let id = remap[&old];
            self.slots.insert(id, copy);
        }

        let clone = remap[&node];
        if let Some(slot) = self.slots.get_mut(&clone) {
            slot.node.local_pos = origin;
        }
        self.roots.push(clone);
        Ok(clone)
    }

    fn destroy(&mut self, node: NodeId) -> Result<()> {
        if !self.slots.contains_key(&node) {
            return Err(HierarchyError::UnknownNode(node));
        }
        self.detach(node);
        for id in self.subtree(node) {
            self.slots.remove(&id);
        }
        Ok(())
    }

    fn reparent(&mut self, node: NodeId, new_parent: Option<NodeId>) -> Result<()> {
        let world = self.world_position(node).ok_or(HierarchyError::UnknownNode(node))?;
        let parent_world = match new_parent {
            Some(p) => {
                let pos = self.world_position(p).ok_or(HierarchyError::UnknownNode(p))?;
                if self.is_ancestor_or_self(node, p) {
                    return Err(HierarchyError::InvalidArgument(format!(
                        "cannot parent {node:?} under its own subtree node {p:?}"
                    )));
                }
                pos
            }
            None => Vec3::ZERO,
        };

        self.detach(node);
        match new_parent {
            Some(p) => {
                if let Some(parent_slot) = self.slots.get_mut(&p) {
                    parent_slot.children.push(node);
                }
            }
            None => self.roots.push(node),
        }
        if let Some(slot) = self.slots.get_mut(&node) {
            slot.parent = new_parent;
            slot.node.local_pos = world - parent_world;
        }
        Ok(())
    }
}

impl PositionAccess for SceneTree {
    fn position(&self, node: NodeId, space: Space) -> Option<Vec3> {
        match space {
            Space::World => self.world_position(node),
            Space::Local => self.get(node).map(|n| n.local_pos),
        }
    }

    fn set_position(&mut self, node: NodeId, space: Space, pos: Vec3) -> bool {
        let local = match space {
            Space::Local => pos,
            Space::World => {
                let parent_world = match self.parent(node) {
                    Some(p) => self.world_position(p).unwrap_or(Vec3::ZERO),
                    None => Vec3::ZERO,
                };
                pos - parent_world
            }
        };
        match self.get_mut(node) {
            Some(n) => {
                n.local_pos = local;
                true
            }
            None => false,
        }
    }

    fn is_rect(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(Node::is_rect)
    }

    fn anchored_position(&self, node: NodeId) -> Option<Vec2> {
        self.get(node)?.rect.map(|r| r.anchored_position)
    }

    fn set_anchored_position(&mut self, node: NodeId, pos: Vec2) -> bool {
        match self.get_mut(node).and_then(|n| n.rect.as_mut()) {
            Some(rect) => {
                rect.anchored_position = pos;
                true
            }
            None => false,
        }
    }

    fn can_host_tasks(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|n| n.task_host)
    }
}
