// animation/mover.rs
//
// Moves one node from a start point to an end point at a fixed speed.
// Progress advances once per tick; the caller (or MoveScheduler) drives it.
//
// Usage:
//   let mut mover = Mover::new(MoveRequest::new(id, from, to, 5.0), 1.0 / 60.0)?;
//   while mover.tick(&mut tree) != MoverPhase::Done {}

use glam::Vec3;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::api::error::{HierarchyError, Result};
use crate::api::types::{NodeId, Space};
use crate::hierarchy::traits::PositionAccess;

/// Parameters of a single movement. Speed is distance per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub node: NodeId,
    pub from: Vec3,
    pub to: Vec3,
    pub speed: f32,
    #[serde(default)]
    pub space: Space,
}

impl MoveRequest {
    /// Create a world-space move request.
    pub fn new(node: NodeId, from: Vec3, to: Vec3, speed: f32) -> Self {
        Self { node, from, to, speed, space: Space::World }
    }

    pub fn in_space(mut self, space: Space) -> Self {
        self.space = space;
        self
    }

    /// Euclidean length of the path.
    pub fn distance(&self) -> f32 {
        self.from.distance(self.to)
    }
}

/// Lifecycle of a mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoverPhase {
    /// Created, no tick consumed yet.
    #[default]
    Idle,
    /// At least one tick consumed, target not reached.
    Animating,
    /// Snapped to the target; further ticks do nothing.
    Done,
}

/// Tick-driven linear movement of one node.
#[derive(Debug, Clone)]
pub struct Mover {
    request: MoveRequest,
    /// Progress added per tick.
    step: f32,
    /// Tick on which the node is snapped to the target.
    total_ticks: u32,
    phase: MoverPhase,
    ticks: u32,
}

impl Mover {
    /// Validate the request and prepare a mover ticking every `tick_interval` seconds.
    ///
    /// Coincident endpoints, a non-positive or non-finite speed, and a
    /// non-positive tick interval are rejected before anything is written.
    pub fn new(request: MoveRequest, tick_interval: f32) -> Result<Self> {
        let distance = request.distance();
        if !distance.is_finite() {
            return Err(HierarchyError::InvalidArgument(format!(
                "move endpoints must be finite, got {} -> {}",
                request.from, request.to
            )));
        }
        if distance == 0.0 {
            return Err(HierarchyError::InvalidArgument(format!(
                "zero-length move for {:?}: start and end are both {}",
                request.node, request.from
            )));
        }
        if !request.speed.is_finite() || request.speed <= 0.0 {
            return Err(HierarchyError::InvalidArgument(format!(
                "move speed must be positive, got {}",
                request.speed
            )));
        }
        if !tick_interval.is_finite() || tick_interval <= 0.0 {
            return Err(HierarchyError::InvalidArgument(format!(
                "tick interval must be positive, got {tick_interval}"
            )));
        }

        let total_ticks = (distance / request.speed / tick_interval).ceil().max(1.0) as u32;

        Ok(Self {
            request,
            step: request.speed / distance * tick_interval,
            total_ticks,
            phase: MoverPhase::Idle,
            ticks: 0,
        })
    }

    /// Consume one tick: advance progress and write the new position.
    ///
    /// On tick `k` the node goes to `lerp(from, to, k * step)`. Progress is
    /// derived from the tick count, never accumulated. On the last tick,
    /// `ceil(distance / speed / tick_interval)`, it is snapped exactly to
    /// `to` and the mover is done.
    pub fn tick<H: PositionAccess + ?Sized>(&mut self, host: &mut H) -> MoverPhase {
        if self.phase == MoverPhase::Done {
            return MoverPhase::Done;
        }
        self.phase = MoverPhase::Animating;
        self.ticks += 1;

        let MoveRequest { node, from, to, .. } = self.request;
        if self.ticks < self.total_ticks {
            let t = self.ticks as f32 * self.step;
            if self.write(host, from.lerp(to, t)) {
                trace!("{:?} move progress {:.3} after {} ticks", node, t, self.ticks);
            } else {
                warn!("{:?} vanished mid-move; stopping", node);
                self.phase = MoverPhase::Done;
            }
        } else {
            if !self.write(host, to) {
                warn!("{:?} vanished before reaching its target", node);
            }
            debug!("{:?} reached {} after {} ticks", node, to, self.ticks);
            self.phase = MoverPhase::Done;
        }
        self.phase
    }

    /// Route a position through the anchored channel for rect nodes,
    /// otherwise through the requested space.
    fn write<H: PositionAccess + ?Sized>(&self, host: &mut H, pos: Vec3) -> bool {
        let node = self.request.node;
        if host.is_rect(node) {
            host.set_anchored_position(node, pos.truncate())
        } else {
            host.set_position(node, self.request.space, pos)
        }
    }

    pub fn request(&self) -> &MoveRequest {
        &self.request
    }

    pub fn phase(&self) -> MoverPhase {
        self.phase
    }

    /// Progress added per tick.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.is_done() {
            1.0
        } else {
            (self.ticks as f32 * self.step).min(1.0)
        }
    }

    /// Ticks needed to reach the target.
    pub fn total_ticks(&self) -> u32 {
        self.total_ticks
    }

    /// Ticks consumed so far.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn is_done(&self) -> bool {
        self.phase == MoverPhase::Done
    }
}
