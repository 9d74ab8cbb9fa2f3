use glam::Vec2;

/// One recorded pointer transition (a down or an up).
///
/// `fresh` is set on the tick the transition arrived and stripped at end of
/// tick; scroll claiming keys off it to distinguish "just pressed" from "still
/// held".
#[derive(Debug, Clone, Copy)]
pub struct PointerSample {
    pub pos: Vec2,
    pub fresh: bool,
}

impl PointerSample {
    fn new(pos: Vec2) -> Self {
        Self { pos, fresh: true }
    }
}

/// Transient per-frame pointer snapshot.
///
/// A down survives until the cycle is consumed or gobbled; scroll deltas
/// accumulate across the events of a single tick and are zeroed at its end.
#[derive(Debug, Default)]
pub struct PointerState {
    /// Current pointer position, pressed or not.
    pub hover: Vec2,
    pub down: Option<PointerSample>,
    pub up: Option<PointerSample>,
    /// Scroll accumulated this frame (positive scrolls content up/left).
    pub scroll_vertical: f32,
    pub scroll_horizontal: f32,
    /// Whether this frame's deltas came from a wheel device. Wheel scrolling
    /// carries no inertia.
    pub wheel_source: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new press resets the previous cycle entirely.
    pub fn apply_down(&mut self, pos: Vec2) {
        self.up = None;
        self.down = Some(PointerSample::new(pos));
        self.hover = pos;
    }

    /// Movement updates hover, and past the jitter radius a touch drag feeds
    /// the scroll accumulators. Deltas are negated: dragging down moves the
    /// content up.
    pub fn apply_move(&mut self, pos: Vec2, delta: Vec2, touch: bool, jitter: f32) {
        self.hover = pos;

        if let Some(down) = self.down {
            if pos.distance(down.pos) <= jitter {
                return;
            }
        }

        if touch {
            self.scroll_vertical -= delta.y;
            self.scroll_horizontal -= delta.x;
            self.wheel_source = false;
        }
    }

    pub fn apply_wheel(&mut self, dx: f32, dy: f32) {
        self.scroll_vertical += dy;
        self.scroll_horizontal += dx;
        self.wheel_source = true;
    }

    /// An up completes the cycle but keeps the down for tap classification.
    pub fn apply_up(&mut self, pos: Vec2) {
        self.up = Some(PointerSample::new(pos));
    }

    /// Distance covered between down and up, when both exist.
    pub fn displacement(&self) -> Option<f32> {
        match (self.down, self.up) {
            (Some(down), Some(up)) => Some(down.pos.distance(up.pos)),
            _ => None,
        }
    }

    pub fn clear_scroll(&mut self) {
        self.scroll_vertical = 0.0;
        self.scroll_horizontal = 0.0;
        self.wheel_source = false;
    }
}
