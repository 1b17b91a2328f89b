// animation/scheduler.rs
//
// Hosts movers as cooperative tasks on a fixed-interval clock.
// Each mover is resumed once per fixed tick and dropped when it finishes.
//
// Usage:
//   let mut moves = MoveScheduler::new(AnimatorConfig::default())?;
//   let id = moves.start(&tree, MoveRequest::new(node, from, to, 3.0))?;
//   moves.advance(&mut tree, frame_dt);  // runs as many fixed ticks as elapsed

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::api::config::AnimatorConfig;
use crate::api::error::{HierarchyError, Result};
use crate::api::types::{NodeId, Space};
use crate::core::time::FixedTimestep;
use crate::hierarchy::traits::PositionAccess;
use super::mover::{MoveRequest, Mover, MoverPhase};

/// A hosted mover and whether its completion is queued for polling.
#[derive(Debug)]
struct Task {
    mover: Mover,
    notify: bool,
}

/// Handle to a running move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveId(pub u32);

/// Owns all running movers and the clock that drives them.
///
/// Movers are resumed in start order. Two movers on the same node are not
/// coordinated; the later one wins each tick.
#[derive(Debug)]
pub struct MoveScheduler {
    movers: BTreeMap<MoveId, Task>,
    next_id: u32,
    clock: FixedTimestep,
    /// Finished moves started with `start_notify`, to be polled.
    completed: Vec<MoveId>,
}

impl Default for MoveScheduler {
    fn default() -> Self {
        let config = AnimatorConfig::default();
        Self::with_clock(FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps_per_frame))
    }
}

impl MoveScheduler {
    pub fn new(config: AnimatorConfig) -> Result<Self> {
        if !config.fixed_dt.is_finite() || config.fixed_dt <= 0.0 {
            return Err(HierarchyError::InvalidArgument(format!(
                "fixed_dt must be positive, got {}",
                config.fixed_dt
            )));
        }
        Ok(Self::with_clock(FixedTimestep::with_max_steps(
            config.fixed_dt,
            config.max_steps_per_frame,
        )))
    }

    fn with_clock(clock: FixedTimestep) -> Self {
        Self {
            movers: BTreeMap::new(),
            next_id: 0,
            clock,
            completed: Vec::new(),
        }
    }

    /// Start moving a node. Nothing is written until the first tick.
    ///
    /// Fails with `UnknownNode` when the host has no such node, and with
    /// `UnsupportedContext` when the node cannot own a suspendable task; the
    /// move is never run synchronously instead. Completion is not queued.
    pub fn start<H: PositionAccess + ?Sized>(&mut self, host: &H, request: MoveRequest) -> Result<MoveId> {
        self.spawn(host, request, false)
    }

    /// Like [`start`](Self::start), but the handle is queued for
    /// [`drain_completed`](Self::drain_completed) when the move finishes.
    /// Callers using this must drain the queue.
    pub fn start_notify<H: PositionAccess + ?Sized>(&mut self, host: &H, request: MoveRequest) -> Result<MoveId> {
        self.spawn(host, request, true)
    }

    fn spawn<H: PositionAccess + ?Sized>(&mut self, host: &H, request: MoveRequest, notify: bool) -> Result<MoveId> {
        if host.position(request.node, Space::Local).is_none() {
            return Err(HierarchyError::UnknownNode(request.node));
        }
        if !host.can_host_tasks(request.node) {
            warn!("{:?} cannot host a move task; request dropped", request.node);
            return Err(HierarchyError::UnsupportedContext(request.node));
        }
        let mover = Mover::new(request, self.clock.dt())?;
        let id = MoveId(self.next_id);
        self.next_id += 1;
        self.movers.insert(id, Task { mover, notify });
        Ok(id)
    }

    /// Feed variable frame time; runs every fixed tick that elapsed.
    /// Returns the number of moves that finished.
    pub fn advance<H: PositionAccess + ?Sized>(&mut self, host: &mut H, frame_dt: f32) -> usize {
        let steps = self.clock.accumulate(frame_dt);
        (0..steps).map(|_| self.tick(host)).sum()
    }

    /// Run exactly one fixed tick on every mover.
    /// Returns the number of moves that finished on this tick.
    pub fn tick<H: PositionAccess + ?Sized>(&mut self, host: &mut H) -> usize {
        let mut finished = Vec::new();
        for (&id, task) in self.movers.iter_mut() {
            if task.mover.tick(host) == MoverPhase::Done {
                finished.push((id, task.notify));
            }
        }

        for (id, _) in &finished {
            self.movers.remove(id);
        }
        if !finished.is_empty() {
            debug!("{} moves finished, {} still running", finished.len(), self.movers.len());
        }
        let count = finished.len();
        self.completed
            .extend(finished.into_iter().filter(|&(_, notify)| notify).map(|(id, _)| id));
        count
    }

    /// Stop a move where it is. Returns whether it was running.
    pub fn stop(&mut self, id: MoveId) -> bool {
        self.movers.remove(&id).is_some()
    }

    /// Stop every move targeting `node`. Returns how many were stopped.
    pub fn stop_node(&mut self, node: NodeId) -> usize {
        let before = self.movers.len();
        self.movers.retain(|_, t| t.mover.request().node != node);
        before - self.movers.len()
    }

    pub fn is_running(&self, id: MoveId) -> bool {
        self.movers.contains_key(&id)
    }

    pub fn get(&self, id: MoveId) -> Option<&Mover> {
        self.movers.get(&id).map(|t| &t.mover)
    }

    /// Drain handles of finished `start_notify` moves in completion order.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = MoveId> + '_ {
        self.completed.drain(..)
    }

    /// The fixed tick interval in seconds.
    pub fn fixed_dt(&self) -> f32 {
        self.clock.dt()
    }

    /// Number of running moves.
    pub fn len(&self) -> usize {
        self.movers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movers.is_empty()
    }

    /// Stop all moves and forget pending completions.
    pub fn clear(&mut self) {
        self.movers.clear();
        self.completed.clear();
        self.clock.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    use crate::components::node::Node;
    use crate::core::scene::SceneTree;

    fn scheduler(dt: f32) -> MoveScheduler {
        MoveScheduler::new(AnimatorConfig::default().with_fixed_dt(dt)).unwrap()
    }

    #[test]
    fn runs_move_to_completion() {
        let mut tree = SceneTree::new();
        let id = tree.spawn(Node::new("n"));
        let mut moves = scheduler(0.25);
        let to = Vec3::new(0.0, 0.0, 10.0);

        let handle = moves.start_notify(&tree, MoveRequest::new(id, Vec3::ZERO, to, 10.0)).unwrap();
        assert!(moves.is_running(handle));
        // Nothing written before the first tick.
        assert_eq!(tree.position(id, Space::World), Some(Vec3::ZERO));

        assert_eq!(moves.tick(&mut tree), 0);
        assert_eq!(tree.position(id, Space::World), Some(Vec3::new(0.0, 0.0, 2.5)));
        assert_eq!(moves.tick(&mut tree), 0);
        assert_eq!(moves.tick(&mut tree), 0);
        assert_eq!(moves.tick(&mut tree), 1);

        assert_eq!(tree.position(id, Space::World), Some(to));
        assert!(moves.is_empty());
        assert_eq!(moves.drain_completed().collect::<Vec<_>>(), vec![handle]);
    }

    #[test]
    fn advance_converts_frame_time_to_ticks() {
        let mut tree = SceneTree::new();
        let id = tree.spawn(Node::new("n"));
        let mut moves = scheduler(0.25);
        moves.start(&tree, MoveRequest::new(id, Vec3::ZERO, Vec3::X * 8.0, 8.0)).unwrap();

        assert_eq!(moves.advance(&mut tree, 0.1), 0);
        assert_eq!(tree.position(id, Space::World), Some(Vec3::ZERO));
        moves.advance(&mut tree, 0.4); // 0.5s total: two ticks
        assert_eq!(tree.position(id, Space::World), Some(Vec3::new(4.0, 0.0, 0.0)));
        assert_eq!(moves.advance(&mut tree, 0.5), 1);
        assert_eq!(tree.position(id, Space::World), Some(Vec3::new(8.0, 0.0, 0.0)));
    }

    #[test]
    fn node_without_task_host_is_rejected() {
        let mut tree = SceneTree::new();
        let start = Vec3::new(2.0, 0.0, 0.0);
        let id = tree.spawn(Node::new("static").with_pos(start).without_task_host());
        let mut moves = scheduler(0.1);

        let err = moves.start(&tree, MoveRequest::new(id, start, Vec3::ZERO, 1.0)).unwrap_err();
        assert!(matches!(err, HierarchyError::UnsupportedContext(n) if n == id));
        assert!(moves.is_empty());
        moves.tick(&mut tree);
        assert_eq!(tree.position(id, Space::World), Some(start));
    }

    #[test]
    fn zero_length_move_is_rejected() {
        let mut tree = SceneTree::new();
        let id = tree.spawn(Node::new("n").with_pos(Vec3::ONE));
        let mut moves = scheduler(0.1);

        let err = moves.start(&tree, MoveRequest::new(id, Vec3::ONE, Vec3::ONE, 1.0)).unwrap_err();
        assert!(matches!(err, HierarchyError::InvalidArgument(_)));
        assert!(moves.is_empty());
        assert_eq!(tree.position(id, Space::World), Some(Vec3::ONE));
    }

    #[test]
    fn independent_moves_on_different_nodes() {
        let mut tree = SceneTree::new();
        let a = tree.spawn(Node::new("a"));
        let b = tree.spawn(Node::new("b"));
        let mut moves = scheduler(0.5);

        let fast = moves.start(&tree, MoveRequest::new(a, Vec3::ZERO, Vec3::X, 2.0)).unwrap();
        let slow = moves.start(&tree, MoveRequest::new(b, Vec3::ZERO, Vec3::Y, 0.5)).unwrap();

        assert_eq!(moves.tick(&mut tree), 1);
        assert!(!moves.is_running(fast));
        assert!(moves.is_running(slow));
        assert_eq!(tree.position(a, Space::World), Some(Vec3::X));
        assert_eq!(tree.position(b, Space::World), Some(Vec3::new(0.0, 0.25, 0.0)));
    }

    #[test]
    fn stop_leaves_node_in_place() {
        let mut tree = SceneTree::new();
        let id = tree.spawn(Node::new("n"));
        let mut moves = scheduler(0.25);
        let handle = moves.start(&tree, MoveRequest::new(id, Vec3::ZERO, Vec3::X * 4.0, 4.0)).unwrap();

        moves.tick(&mut tree);
        assert!(moves.stop(handle));
        assert!(!moves.stop(handle));
        moves.tick(&mut tree);
        assert_eq!(tree.position(id, Space::World), Some(Vec3::X));
        assert_eq!(moves.drain_completed().count(), 0);
    }

    #[test]
    fn stop_node_removes_all_its_moves() {
        let mut tree = SceneTree::new();
        let a = tree.spawn(Node::new("a"));
        let b = tree.spawn(Node::new("b"));
        let mut moves = scheduler(0.1);
        moves.start(&tree, MoveRequest::new(a, Vec3::ZERO, Vec3::X, 1.0)).unwrap();
        moves.start(&tree, MoveRequest::new(a, Vec3::ZERO, Vec3::Y, 1.0)).unwrap();
        moves.start(&tree, MoveRequest::new(b, Vec3::ZERO, Vec3::Z, 1.0)).unwrap();

        assert_eq!(moves.stop_node(a), 2);
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn completions_are_queued_only_on_request() {
        let mut tree = SceneTree::new();
        let id = tree.spawn(Node::new("n"));
        let mut moves = scheduler(0.5);

        for _ in 0..1000 {
            moves.start(&tree, MoveRequest::new(id, Vec3::ZERO, Vec3::X, 2.0)).unwrap();
            assert_eq!(moves.advance(&mut tree, 0.5), 1);
        }
        assert!(moves.is_empty());
        assert_eq!(moves.drain_completed().count(), 0);

        let watched = moves.start_notify(&tree, MoveRequest::new(id, Vec3::ZERO, Vec3::Y, 2.0)).unwrap();
        moves.start(&tree, MoveRequest::new(id, Vec3::ZERO, Vec3::Z, 2.0)).unwrap();
        assert_eq!(moves.tick(&mut tree), 2);
        assert_eq!(moves.drain_completed().collect::<Vec<_>>(), vec![watched]);
    }

    #[test]
    fn missing_node_is_unknown_not_unsupported() {
        let tree = SceneTree::new();
        let mut moves = scheduler(0.1);

        let err = moves.start(&tree, MoveRequest::new(NodeId(42), Vec3::ZERO, Vec3::X, 1.0)).unwrap_err();
        assert!(matches!(err, HierarchyError::UnknownNode(NodeId(42))));
        assert!(moves.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AnimatorConfig::default().with_fixed_dt(0.0);
        assert!(MoveScheduler::new(config).is_err());
        assert_eq!(MoveScheduler::default().fixed_dt(), 1.0 / 60.0);
    }
}
