use glam::Vec2;

use crate::core::metrics::Metrics;
use crate::input::pointer::PointerState;
use crate::input::queue::InputEvent;

/// Interaction facts a shape can ask about, resolved against the current
/// pointer cycle and a caller-supplied hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// A pointer down occurred and its down-position is inside the shape.
    Down,
    /// A pointer is currently down, anywhere.
    AnyDown,
    /// The current pointer position is inside the shape (not necessarily
    /// pressed).
    Hover,
    /// Down-then-up completed under the tap slop, with the down inside the
    /// shape.
    Up,
    /// Down-then-up completed under the tap slop, anywhere.
    AnyUp,
}

/// Which axis a two-axis drag has been locked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAxis {
    Vertical,
    Horizontal,
}

/// Dominance margin (logical px) one axis needs over the other before a drag
/// locks to it.
pub const AXIS_LOCK_MARGIN: f32 = 2.0;

/// Classifies the pointer cycle into interaction facts and enforces the
/// one-consumer-per-gesture rule.
///
/// Callers evaluate shapes in UI z-order, topmost first; whichever consumes
/// the gesture calls [`GestureRouter::interacted`], which clears the cycle so
/// no later shape can also claim it.
#[derive(Debug, Default)]
pub struct GestureRouter {
    pub pointer: PointerState,
    tap_slop: f32,
    move_jitter: f32,
    axis_lock: Option<ScrollAxis>,
}

impl GestureRouter {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            pointer: PointerState::new(),
            tap_slop: metrics.small(),
            move_jitter: metrics.tiny(),
            axis_lock: None,
        }
    }

    /// Refresh the gesture thresholds after a resize.
    pub fn set_metrics(&mut self, metrics: Metrics) {
        self.tap_slop = metrics.small();
        self.move_jitter = metrics.tiny();
    }

    /// Route one pointer/wheel event into the pointer snapshot. A fresh down
    /// opens a new cycle and drops any axis lock from the previous drag.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.axis_lock = None;
                self.pointer.apply_down(Vec2::new(x, y));
            }
            InputEvent::PointerUp { x, y } => {
                self.pointer.apply_up(Vec2::new(x, y));
            }
            InputEvent::PointerMove { x, y, dx, dy, touch } => {
                self.pointer
                    .apply_move(Vec2::new(x, y), Vec2::new(dx, dy), touch, self.move_jitter);
            }
            InputEvent::Wheel { dx, dy } => {
                self.pointer.apply_wheel(dx, dy);
            }
            InputEvent::Key(_) | InputEvent::Resize { .. } => {}
        }
    }

    /// Answer whether the current pointer cycle constitutes `interaction` for
    /// the shape described by `hit`.
    pub fn interacting(&self, interaction: Interaction, hit: impl Fn(Vec2) -> bool) -> bool {
        if interaction == Interaction::Hover {
            return hit(self.pointer.hover);
        }

        // Once an up exists the cycle can only resolve as a tap (or nothing):
        // Down/AnyDown facts no longer fire for it.
        if self.pointer.up.is_some()
            || interaction == Interaction::Up
            || interaction == Interaction::AnyUp
        {
            let Some(down) = self.pointer.down else {
                // The down was consumed or gobbled, i.e. the user ended up
                // scrolling.
                return false;
            };
            let Some(up) = self.pointer.up else {
                return false;
            };
            // Displacement at or past the slop means a drag, never a tap.
            if up.pos.distance(down.pos) < self.tap_slop {
                return match interaction {
                    Interaction::Up => hit(down.pos),
                    Interaction::AnyUp => true,
                    _ => false,
                };
            }
            return false;
        }

        match interaction {
            Interaction::Down => self
                .pointer
                .down
                .map_or(false, |down| hit(down.pos)),
            Interaction::AnyDown => self.pointer.down.is_some(),
            _ => false,
        }
    }

    /// Mark the current gesture as consumed: no other shape may claim the
    /// same physical down/up cycle, and this frame's scroll no longer
    /// belongs to anyone.
    pub fn interacted(&mut self) {
        self.pointer.down = None;
        self.pointer.up = None;
        self.pointer.clear_scroll();
    }

    /// Whether the user is drag- or wheel-scrolling the shape described by
    /// `hit`. Three-valued: `Some(true)` claims the scroll, `Some(false)`
    /// releases it, `None` keeps whatever claim already exists.
    pub fn user_scrolling(&self, hit: impl Fn(Vec2) -> bool) -> Option<bool> {
        let p = &self.pointer;
        if p.down.map_or(false, |d| d.fresh && hit(d.pos)) {
            // Pointer newly down inside the shape: a drag starts here.
            Some(true)
        } else if p.wheel_source && hit(p.hover) {
            Some(true)
        } else if p.up.map_or(false, |u| u.fresh) || p.down.is_none() || p.wheel_source {
            Some(false)
        } else {
            None
        }
    }

    /// Resolve which axis an in-progress drag belongs to, locking on the
    /// first movement sample whose dominance exceeds the margin. The lock
    /// persists for the remainder of the drag.
    pub fn lock_axis(&mut self) -> Option<ScrollAxis> {
        if self.axis_lock.is_none() {
            let vertical = self.pointer.scroll_vertical.abs();
            let horizontal = self.pointer.scroll_horizontal.abs();
            if vertical - horizontal > AXIS_LOCK_MARGIN {
                self.axis_lock = Some(ScrollAxis::Vertical);
            } else if horizontal - vertical > AXIS_LOCK_MARGIN {
                self.axis_lock = Some(ScrollAxis::Horizontal);
            }
        }
        self.axis_lock
    }

    pub fn axis_lock(&self) -> Option<ScrollAxis> {
        self.axis_lock
    }

    /// End-of-tick cleanup: a down/up cycle nobody consumed is dropped so it
    /// cannot leak into the next frame, `fresh` flags are stripped, and the
    /// per-frame scroll accumulators reset (scroll is always "missed").
    pub fn gobble_missed_interactions(&mut self) {
        if self.pointer.down.is_some() && self.pointer.up.is_some() {
            self.pointer.down = None;
            self.pointer.up = None;
        }

        if let Some(down) = self.pointer.down.as_mut() {
            down.fresh = false;
        }
        if let Some(up) = self.pointer.up.as_mut() {
            up.fresh = false;
        }

        // The lock belongs to the drag in progress; without a held press
        // (wheel scrolling) it ends with the frame's accumulators.
        if self.pointer.down.is_none() {
            self.axis_lock = None;
        }

        self.pointer.clear_scroll();
    }
}
