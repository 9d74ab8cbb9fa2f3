use glam::Vec2;

/// Named UI regions the engine resolves interactions against. The render
/// layer owns their shapes; the engine only ever asks "is this point inside".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// One hexagon of the letter wheel; index 0 is the center letter.
    WheelHex(usize),
    EnterButton,
    DeleteButton,
    ShuffleButton,
    /// The word-list box; a tap toggles it open.
    WordlistBox,
    /// The "?" toggle on the menu bar.
    HintsToggle,
    /// The vertically scrolling hints page.
    HintsPage,
    /// The horizontally scrolling length table inside the hints page.
    HintsTable,
    MenuButton,
    MenuRestart,
    MenuReveal,
}

/// One-shot rank milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Genius,
    QueenBee,
}

/// What one tick asks of its caller: whether to schedule another frame,
/// whether to flush a save, and which milestones just fired.
#[derive(Debug, Default)]
pub struct TickOutcome {
    /// True while something is still animating (inertial scroll, click
    /// feedback, the loading spinner). The scheduler re-ticks until false.
    pub needs_frame: bool,
    /// True when the session changed in a way worth persisting. The caller
    /// flushes `Engine::save` without blocking further ticks.
    pub save_requested: bool,
    pub notifications: Vec<Notification>,
}

/// Hit-testing answers flowing back from the render step. This is the only
/// channel by which the render layer influences the engine.
pub trait HitTester {
    fn contains(&self, region: Region, point: Vec2) -> bool;
}

/// Hit tester for headless callers: nothing is ever hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHit;

/// Closure adapter, mainly for tests and simple shells.
pub struct HitFn<F>(pub F);

impl<F> HitTester for HitFn<F>
where
    F: Fn(Region, Vec2) -> bool,
{
    fn contains(&self, region: Region, point: Vec2) -> bool {
        (self.0)(region, point)
    }
}

impl HitTester for NoHit {
    fn contains(&self, _region: Region, _point: Vec2) -> bool {
        false
    }
}
