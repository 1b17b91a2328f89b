pub mod node;
pub mod rect;
