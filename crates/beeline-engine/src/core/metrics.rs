/// Size units derived from the viewport.
///
/// The render layer scales every shape off the same divisions, so the gesture
/// thresholds must come from the identical table or taps and drags would
/// classify differently at different window sizes.
#[derive(Debug, Clone, Copy)]
pub struct Metrics {
    pub width: f32,
    pub height: f32,
}

impl Metrics {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Reference dimension for all size units. Very tall viewports are
    /// clamped by aspect so phone layouts don't blow up the units.
    fn smallest_dimension(&self) -> f32 {
        if self.height / self.width <= 1.75 {
            self.height / 1.75
        } else {
            self.width.min(self.height)
        }
    }

    /// Tap slop: a down/up pair closer than this is a tap, not a drag.
    pub fn small(&self) -> f32 {
        self.smallest_dimension() / 15.0
    }

    /// Move jitter: pointer movement under this radius accumulates no scroll.
    pub fn tiny(&self) -> f32 {
        self.smallest_dimension() / 25.0
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
