// hierarchy/mod.rs
//
// Helpers over a host-owned node hierarchy. The host is reached only through
// the traits below, so any engine binding can provide it.

pub mod edit;
pub mod query;
pub mod traits;

pub use edit::{
    clear_children, copy_all_children, copy_all_children_to, copy_children, copy_children_to,
    move_all_children, move_children,
};
pub use query::{
    find_all_by_tag, find_ancestor_by_name, find_ancestor_by_tag, find_by_name_bfs, find_by_name_dfs,
    find_by_tag_bfs, find_by_tag_dfs, find_first_child_by_tag,
};
pub use traits::{Hierarchy, HierarchyMut, PositionAccess};
