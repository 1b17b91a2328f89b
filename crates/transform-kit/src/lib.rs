pub mod api;
pub mod core;
pub mod components;
pub mod hierarchy;
pub mod animation;

// Re-export key types at crate root for convenience
pub use api::config::AnimatorConfig;
pub use api::error::{HierarchyError, Result};
pub use api::types::{NodeId, Placement, Space};
pub use components::node::Node;
pub use components::rect::RectLayout;
pub use core::scene::SceneTree;
pub use core::time::FixedTimestep;

pub use hierarchy::{
    Hierarchy, HierarchyMut, PositionAccess,
    find_by_name_bfs, find_by_name_dfs, find_by_tag_bfs, find_by_tag_dfs,
    find_first_child_by_tag, find_all_by_tag, find_ancestor_by_name, find_ancestor_by_tag,
    clear_children, move_children, move_all_children,
    copy_children, copy_children_to, copy_all_children, copy_all_children_to,
};
pub use animation::{MoveRequest, Mover, MoverPhase, MoveId, MoveScheduler};
