use glam::Vec3;

use crate::components::rect::RectLayout;

/// Data carried by one node of a `SceneTree`.
/// Parent and children links live in the tree, not here.
#[derive(Debug, Clone)]
pub struct Node {
    /// Display name; not required to be unique.
    pub name: String,
    /// Free-form tag; not required to be unique.
    pub tag: String,
    /// Position relative to the parent (or the world for roots).
    pub local_pos: Vec3,
    /// Layout rectangle; present only on UI rectangle nodes.
    pub rect: Option<RectLayout>,
    /// Whether the node has a context able to run suspendable tasks.
    pub task_host: bool,
}

impl Node {
    /// Create a named node at the origin.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: String::new(),
            local_pos: Vec3::ZERO,
            rect: None,
            task_host: true,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.local_pos = pos;
        self
    }

    pub fn with_rect(mut self, rect: RectLayout) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Mark the node as unable to host tasks.
    pub fn without_task_host(mut self) -> Self {
        self.task_host = false;
        self
    }

    pub fn is_rect(&self) -> bool {
        self.rect.is_some()
    }
}
