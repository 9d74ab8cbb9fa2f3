//! Scroll physics for one scrollable axis.
//!
//! Each scrollable panel (word list, hints page, hints table) owns one
//! `ScrollPane`. While the user drags, the offset tracks the pointer 1:1 and
//! the per-frame delta becomes the velocity; when the drag ends the velocity
//! keeps coasting with geometric decay until it falls under the cutoff or the
//! pane hits a bound.

/// Geometric decay applied to the velocity on every coasting frame.
pub const INERTIA_DECAY: f32 = 0.97;

/// Coasting slower than this snaps to a dead stop.
pub const MIN_COAST_SPEED: f32 = 0.1;

#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollPane {
    /// Scroll offset, always within `[0, max_offset]`.
    pub offset: f32,
    pub velocity: f32,
    /// Whether a drag (or wheel) currently claims this pane.
    pub user_is_dragging: bool,
}

impl ScrollPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the top, killing any motion. Called when the owning panel
    /// closes.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Kill inertia without moving.
    pub fn stop(&mut self) {
        self.velocity = 0.0;
    }

    /// Advance one frame. `delta` is the scroll input accumulated this frame
    /// and `wheel_source` marks it as wheel input, which carries no inertia.
    ///
    /// Returns true while inertial coasting is still active; the caller must
    /// schedule another frame in that case, which is the only path by which
    /// scrolling continues without new input.
    pub fn advance(&mut self, delta: f32, wheel_source: bool, max_offset: f32) -> bool {
        if self.user_is_dragging {
            if wheel_source {
                // Wheel scrolling moves directly and never coasts.
                self.velocity = 0.0;
                self.offset += delta;
            } else {
                self.velocity = delta;
                self.offset += self.velocity;
            }
        } else if self.velocity != 0.0 {
            self.offset += self.velocity;
            self.velocity *= INERTIA_DECAY;
            if self.velocity.abs() < MIN_COAST_SPEED {
                self.velocity = 0.0;
            }
        }

        // Hitting a bound kills inertia, it does not bounce.
        if self.offset < 0.0 {
            self.offset = 0.0;
            self.velocity = 0.0;
        } else if self.offset > max_offset {
            self.offset = max_offset;
            self.velocity = 0.0;
        }

        !self.user_is_dragging && self.velocity != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_tracks_one_to_one() {
        let mut pane = ScrollPane::new();
        pane.user_is_dragging = true;
        pane.advance(12.5, false, 1000.0);
        assert_eq!(pane.offset, 12.5);
        assert_eq!(pane.velocity, 12.5);
    }

    #[test]
    fn wheel_has_no_inertia() {
        let mut pane = ScrollPane::new();
        pane.user_is_dragging = true;
        pane.advance(30.0, true, 1000.0);
        assert_eq!(pane.offset, 30.0);
        assert_eq!(pane.velocity, 0.0);
        // Release: no coasting happens
        pane.user_is_dragging = false;
        let needs_frame = pane.advance(0.0, false, 1000.0);
        assert!(!needs_frame);
        assert_eq!(pane.offset, 30.0);
    }

    #[test]
    fn clamp_at_max_kills_velocity() {
        let mut pane = ScrollPane {
            offset: 150.0,
            velocity: 5.0,
            user_is_dragging: false,
        };
        let needs_frame = pane.advance(0.0, false, 100.0);
        assert_eq!(pane.offset, 100.0);
        assert_eq!(pane.velocity, 0.0);
        assert!(!needs_frame);
    }

    #[test]
    fn clamp_at_zero_kills_velocity() {
        let mut pane = ScrollPane {
            offset: 3.0,
            velocity: -10.0,
            user_is_dragging: false,
        };
        pane.advance(0.0, false, 100.0);
        assert_eq!(pane.offset, 0.0);
        assert_eq!(pane.velocity, 0.0);
    }

    #[test]
    fn inertia_decays_to_rest_in_bounded_steps() {
        let mut pane = ScrollPane {
            offset: 0.0,
            velocity: 40.0,
            user_is_dragging: false,
        };
        let mut steps = 0;
        while pane.advance(0.0, false, 1.0e6) {
            steps += 1;
            assert!(steps < 1000, "coasting never terminated");
        }
        assert_eq!(pane.velocity, 0.0);
        // 0.97^n * 40 < 0.1 needs n >= 197
        assert!(steps >= 100);
    }

    #[test]
    fn holding_still_mid_drag_kills_inertia() {
        let mut pane = ScrollPane {
            offset: 50.0,
            velocity: 20.0,
            user_is_dragging: true,
        };
        pane.advance(0.0, false, 1000.0);
        assert_eq!(pane.velocity, 0.0);
        assert_eq!(pane.offset, 50.0);
    }
}
