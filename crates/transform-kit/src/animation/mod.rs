// animation/mod.rs
//
// Tick-driven node movement. A Mover is one suspendable movement; the
// MoveScheduler hosts many of them on a fixed-interval clock.

pub mod mover;
pub mod scheduler;

pub use mover::{MoveRequest, Mover, MoverPhase};
pub use scheduler::{MoveId, MoveScheduler};
