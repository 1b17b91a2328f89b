use glam::Vec2;

/// Layout data of a UI rectangle node.
///
/// Anchors are normalized against the parent rectangle (0,0 = bottom-left,
/// 1,1 = top-right). `anchored_position` is the offset of the pivot from the
/// anchor reference point, and `size_delta` is the size added on top of the
/// span between the anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectLayout {
    pub anchored_position: Vec2,
    pub size_delta: Vec2,
    pub anchor_min: Vec2,
    pub anchor_max: Vec2,
    pub pivot: Vec2,
}

impl Default for RectLayout {
    fn default() -> Self {
        Self {
            anchored_position: Vec2::ZERO,
            size_delta: Vec2::new(100.0, 100.0),
            anchor_min: Vec2::splat(0.5),
            anchor_max: Vec2::splat(0.5),
            pivot: Vec2::splat(0.5),
        }
    }
}

impl RectLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchored_position(mut self, pos: Vec2) -> Self {
        self.anchored_position = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size_delta = size;
        self
    }

    pub fn with_anchors(mut self, min: Vec2, max: Vec2) -> Self {
        self.anchor_min = min;
        self.anchor_max = max;
        self
    }

    pub fn with_pivot(mut self, pivot: Vec2) -> Self {
        self.pivot = pivot;
        self
    }

    /// Width of the rectangle when its anchors coincide horizontally.
    /// With stretched anchors this is only the width delta.
    pub fn width(&self) -> f32 {
        self.size_delta.x
    }

    pub fn height(&self) -> f32 {
        self.size_delta.y
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size_delta = size;
    }

    pub fn set_anchors(&mut self, min: Vec2, max: Vec2) {
        self.anchor_min = min;
        self.anchor_max = max;
    }

    /// Anchor to all four edges of the parent, filling it exactly.
    pub fn stretch(&mut self) {
        self.anchor_min = Vec2::ZERO;
        self.anchor_max = Vec2::ONE;
        self.anchored_position = Vec2::ZERO;
        self.size_delta = Vec2::ZERO;
    }

    /// Whether the anchors span a non-zero area of the parent on either axis.
    pub fn is_stretched(&self) -> bool {
        self.anchor_min.x != self.anchor_max.x || self.anchor_min.y != self.anchor_max.y
    }

    /// Rectangle corners `(min, max)` in parent space, measured from the
    /// parent's bottom-left corner.
    pub fn local_rect(&self, parent_size: Vec2) -> (Vec2, Vec2) {
        let anchor_lo = parent_size * self.anchor_min;
        let anchor_hi = parent_size * self.anchor_max;
        let size = (anchor_hi - anchor_lo) + self.size_delta;
        let reference = anchor_lo + (anchor_hi - anchor_lo) * self.pivot;
        let pivot_pos = reference + self.anchored_position;
        let min = pivot_pos - size * self.pivot;
        (min, min + size)
    }
}
