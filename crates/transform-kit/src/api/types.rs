use serde::{Deserialize, Serialize};

/// Unique identifier for a node inside one hierarchy host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Coordinate space a position is read or written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Space {
    /// Absolute position in the scene.
    #[default]
    World,
    /// Position relative to the node's parent.
    Local,
}

/// Fixed point a copied node is moved to after it is attached.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub position: glam::Vec3,
    #[serde(default)]
    pub space: Space,
}

impl Placement {
    pub fn world(position: glam::Vec3) -> Self {
        Self { position, space: Space::World }
    }

    pub fn local(position: glam::Vec3) -> Self {
        Self { position, space: Space::Local }
    }
}
