//! The owned application state and its single tick reducer.
//!
//! All mutation happens inside `Engine::tick` (or the explicit async
//! load/save entry points); the render step reads snapshots between ticks
//! and reports back nothing but hit-test answers. Frame scheduling is a
//! return value: components never reach for a global scheduler.

use std::time::SystemTime;

use glam::Vec2;

use crate::api::types::{HitTester, Notification, Region, TickOutcome};
use crate::core::metrics::Metrics;
use crate::core::scroll::ScrollPane;
use crate::input::queue::{InputEvent, InputQueue, KeyInput};
use crate::input::router::{GestureRouter, Interaction, ScrollAxis};
use crate::puzzle::machine::{PuzzleMachine, PuzzleStatus, WordFeedback};
use crate::puzzle::source::{epoch_day, resolve_day, PuzzleSource};
use crate::store::backend::{Storage, StorageError};
use crate::store::gateway::PersistenceGateway;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Viewport size in logical px.
    pub width: f32,
    pub height: f32,
    /// Seed for the letter-shuffle RNG.
    pub rng_seed: u64,
    /// How long the wheel click feedback animates.
    pub click_flash_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            rng_seed: 42,
            click_flash_ms: 200.0,
        }
    }
}

/// Transient click feedback on one wheel hex.
#[derive(Debug, Clone, Copy)]
pub struct ClickFlash {
    pub hex: usize,
    pub started_ms: f64,
}

/// Presentation-side state the engine owns because gestures mutate it:
/// which panels are open, their scroll panes, and transient overlays.
#[derive(Debug, Default)]
pub struct UiState {
    pub wordlist_open: bool,
    pub hints_open: bool,
    pub menu_open: bool,
    pub reveal_answers: bool,
    /// A milestone splash currently covering the board, if any.
    pub splash: Option<Notification>,
    pub click_flash: Option<ClickFlash>,
    pub wordlist_pane: ScrollPane,
    pub hints_pane: ScrollPane,
    pub hints_table_pane: ScrollPane,
    /// Max scroll offsets, reported by the render step from content layout.
    pub wordlist_extent: f32,
    pub hints_extent: f32,
    pub hints_table_extent: f32,
    /// Advances every tick spent loading; drives the spinner.
    pub loading_ticks: u32,
}

pub struct Engine<S: Storage> {
    config: EngineConfig,
    metrics: Metrics,
    queue: InputQueue,
    router: GestureRouter,
    machine: PuzzleMachine,
    gateway: PersistenceGateway<S>,
    ui: UiState,
}

impl<S: Storage> Engine<S> {
    pub fn new(storage: S, config: EngineConfig) -> Self {
        let metrics = Metrics::new(config.width, config.height);
        Self {
            metrics,
            queue: InputQueue::new(),
            router: GestureRouter::new(metrics),
            machine: PuzzleMachine::new(config.rng_seed),
            gateway: PersistenceGateway::new(storage),
            ui: UiState::default(),
            config,
        }
    }

    // ---- snapshot accessors for the render step ----

    pub fn session(&self) -> &crate::puzzle::session::PuzzleSession {
        &self.machine.session
    }

    pub fn status(&self) -> &PuzzleStatus {
        &self.machine.status
    }

    pub fn feedback(&self) -> Option<WordFeedback> {
        self.machine.feedback
    }

    pub fn hints_puzzle(&self) -> &crate::puzzle::hints::HintsData {
        &self.machine.hints_puzzle
    }

    pub fn hints_found(&self) -> &crate::puzzle::hints::HintsData {
        &self.machine.hints_found
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Hand the storage back, e.g. to reopen the same backend later.
    pub fn into_storage(self) -> S {
        self.gateway.into_storage()
    }

    // ---- platform entry points ----

    pub fn push_input(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// The render step reports a panel's content extent (max scroll offset)
    /// whenever it lays the panel out.
    pub fn set_extent(&mut self, region: Region, max_offset: f32) {
        let extent = max_offset.max(0.0);
        match region {
            Region::WordlistBox => self.ui.wordlist_extent = extent,
            Region::HintsPage => self.ui.hints_extent = extent,
            Region::HintsTable => self.ui.hints_table_extent = extent,
            _ => {}
        }
    }

    /// Load the requested day: saved copy first, generation on a miss.
    /// Generation failure leaves the session in `Failed` and interaction
    /// halts until a later attempt succeeds.
    pub async fn load_day(&mut self, requested: Option<i64>, source: &impl PuzzleSource) {
        let today = epoch_day(SystemTime::now());
        let day = resolve_day(requested, today);
        log::info!("getting puzzle for day {day} (today is {today})");

        if let Some(saved) = self.gateway.load(day).await {
            self.machine.resume(saved);
            self.reset_panels();
            return;
        }

        log::info!("no saved puzzle for day {day}, generating");
        self.machine.begin_loading();
        match source.generate(day).await {
            Ok(data) => {
                self.machine.install(data);
                self.reset_panels();
                if let Err(err) = self.save().await {
                    log::warn!("initial save failed: {err}");
                }
            }
            Err(err) => self.machine.fail(err.to_string()),
        }
    }

    /// Re-zero the current puzzle's progress and persist the blank slate.
    pub async fn restart(&mut self) {
        self.machine.restart();
        self.reset_panels();
        if let Err(err) = self.save().await {
            log::warn!("save after restart failed: {err}");
        }
    }

    /// Flush the session to storage. Callers run this off the tick path;
    /// overlapping saves are last-write-wins.
    pub async fn save(&mut self) -> Result<(), StorageError> {
        self.gateway
            .save(
                &self.machine.session,
                &self.machine.hints_puzzle,
                &self.machine.hints_found,
            )
            .await
    }

    fn reset_panels(&mut self) {
        self.ui.wordlist_open = false;
        self.ui.hints_open = false;
        self.ui.menu_open = false;
        self.ui.splash = None;
        self.ui.click_flash = None;
        self.ui.wordlist_pane.reset();
        self.ui.hints_pane.reset();
        self.ui.hints_table_pane.reset();
    }

    // ---- the tick reducer ----

    /// Run one tick: drain the input queue, walk the UI regions in z-order
    /// (at most one interaction is serviced per gesture), advance the scroll
    /// panes and transient animations, and evaluate rank milestones.
    pub fn tick(&mut self, now_ms: f64, hit: &impl HitTester) -> TickOutcome {
        let mut out = TickOutcome::default();

        for event in self.queue.drain() {
            match event {
                InputEvent::Resize { width, height } => {
                    self.metrics = Metrics::new(width, height);
                    self.router.set_metrics(self.metrics);
                }
                InputEvent::Key(key) => self.handle_key(key, &mut out),
                InputEvent::PointerDown { .. } => {
                    // Any press clears the transient word message.
                    self.machine.clear_feedback();
                    self.router.apply(&event);
                }
                _ => self.router.apply(&event),
            }
        }

        match &self.machine.status {
            PuzzleStatus::Failed(_) => {
                // Error screen: nothing to interact with.
                self.router.gobble_missed_interactions();
                return out;
            }
            PuzzleStatus::NoPuzzle | PuzzleStatus::Loading => {
                self.ui.loading_ticks = self.ui.loading_ticks.wrapping_add(1);
                out.needs_frame = self.machine.status == PuzzleStatus::Loading;
                self.router.gobble_missed_interactions();
                return out;
            }
            PuzzleStatus::Ready => {}
        }

        // A milestone splash covers the whole board; any tap dismisses it
        // and nothing underneath may consume the same gesture.
        if self.ui.splash.is_some() {
            if self.router.interacting(Interaction::AnyDown, |_| true) {
                self.router.interacted();
                self.ui.splash = None;
            }
            self.router.gobble_missed_interactions();
            return out;
        }

        if self.ui.menu_open {
            self.tick_menu(&mut out, hit);
            return self.finish_tick(out);
        }
        if self
            .router
            .interacting(Interaction::Down, |p| hit.contains(Region::MenuButton, p))
        {
            self.router.interacted();
            self.ui.menu_open = true;
        }

        // The hints toggle sits on the menu bar, reachable whenever the bar is.
        if self
            .router
            .interacting(Interaction::Down, |p| hit.contains(Region::HintsToggle, p))
        {
            self.router.interacted();
            self.ui.hints_open = !self.ui.hints_open;
            if !self.ui.hints_open {
                self.ui.hints_pane.reset();
                self.ui.hints_table_pane.reset();
            }
        }

        if self.ui.hints_open {
            self.tick_hints(&mut out, hit);
            return self.finish_tick(out);
        }

        if self
            .router
            .interacting(Interaction::Up, |p| hit.contains(Region::WordlistBox, p))
        {
            self.router.interacted();
            self.ui.wordlist_open = !self.ui.wordlist_open;
            if !self.ui.wordlist_open {
                self.ui.wordlist_pane.reset();
            }
        }
        if self.ui.wordlist_open {
            // The open word list covers the wheel and controls.
            self.tick_wordlist(&mut out, hit);
            return self.finish_tick(out);
        }
        self.ui.wordlist_pane.stop();

        self.tick_wheel(&mut out, now_ms, hit);
        self.tick_controls(&mut out, hit);

        self.finish_tick(out)
    }

    fn handle_key(&mut self, key: KeyInput, out: &mut TickOutcome) {
        if !self.machine.is_ready() {
            return;
        }
        self.machine.clear_feedback();
        match key {
            KeyInput::Letter(ch) => self.machine.append_letter(ch),
            KeyInput::Enter => out.save_requested |= self.machine.submit_word(),
            KeyInput::Backspace => self.machine.delete_last_letter(),
            KeyInput::Space => self.machine.shuffle(),
        }
    }

    fn tick_menu(&mut self, out: &mut TickOutcome, hit: &impl HitTester) {
        if self
            .router
            .interacting(Interaction::Down, |p| hit.contains(Region::MenuRestart, p))
        {
            self.router.interacted();
            self.machine.restart();
            out.save_requested = true;
            self.ui.menu_open = false;
        } else if self
            .router
            .interacting(Interaction::Down, |p| hit.contains(Region::MenuReveal, p))
        {
            self.router.interacted();
            self.ui.reveal_answers = !self.ui.reveal_answers;
            self.ui.menu_open = false;
        } else if self.router.interacting(Interaction::AnyDown, |_| true) {
            // A press anywhere else dismisses the menu.
            self.router.interacted();
            self.ui.menu_open = false;
        }
    }

    fn tick_hints(&mut self, out: &mut TickOutcome, hit: &impl HitTester) {
        let router = &mut self.router;
        let ui = &mut self.ui;

        // A press landing outside the table drops the table's drag claim
        // before any new claims are evaluated.
        if router.pointer.down.is_some() && ui.hints_table_pane.user_is_dragging {
            let over_table =
                router.interacting(Interaction::Hover, |p| hit.contains(Region::HintsTable, p));
            if !over_table {
                ui.hints_table_pane.user_is_dragging = false;
            }
        }

        if let Some(claim) = router.user_scrolling(|p| hit.contains(Region::HintsPage, p)) {
            ui.hints_pane.user_is_dragging = claim;
        }
        if let Some(claim) = router.user_scrolling(|p| hit.contains(Region::HintsTable, p)) {
            ui.hints_table_pane.user_is_dragging = claim;
        }

        // A drag over the table is ambiguous between the page's vertical
        // axis and the table's horizontal one: the first decisive movement
        // sample locks the gesture to one of them.
        if ui.hints_pane.user_is_dragging && ui.hints_table_pane.user_is_dragging {
            match router.lock_axis() {
                Some(ScrollAxis::Vertical) => ui.hints_table_pane.user_is_dragging = false,
                Some(ScrollAxis::Horizontal) => ui.hints_pane.user_is_dragging = false,
                None => {}
            }
        }

        let vertical = router.pointer.scroll_vertical;
        let horizontal = router.pointer.scroll_horizontal;
        let wheel = router.pointer.wheel_source;
        out.needs_frame |= ui.hints_pane.advance(vertical, wheel, ui.hints_extent);
        out.needs_frame |= ui
            .hints_table_pane
            .advance(horizontal, wheel, ui.hints_table_extent);
    }

    fn tick_wordlist(&mut self, out: &mut TickOutcome, hit: &impl HitTester) {
        if let Some(claim) = self
            .router
            .user_scrolling(|p| hit.contains(Region::WordlistBox, p))
        {
            self.ui.wordlist_pane.user_is_dragging = claim;
        }
        let delta = self.router.pointer.scroll_vertical;
        let wheel = self.router.pointer.wheel_source;
        out.needs_frame |= self
            .ui
            .wordlist_pane
            .advance(delta, wheel, self.ui.wordlist_extent);
    }

    fn tick_wheel(&mut self, out: &mut TickOutcome, now_ms: f64, hit: &impl HitTester) {
        let letter_count = self.machine.session.letters.len();
        for i in 0..letter_count {
            if self
                .router
                .interacting(Interaction::Down, |p| hit.contains(Region::WheelHex(i), p))
            {
                self.router.interacted();
                let ch = self.machine.session.letters[i];
                self.machine.append_letter(ch);
                self.ui.click_flash = Some(ClickFlash {
                    hex: i,
                    started_ms: now_ms,
                });
                out.needs_frame = true;
                break;
            }
        }

        if let Some(flash) = self.ui.click_flash {
            if now_ms - flash.started_ms >= self.config.click_flash_ms {
                self.ui.click_flash = None;
            } else {
                out.needs_frame = true;
            }
        }
    }

    fn tick_controls(&mut self, out: &mut TickOutcome, hit: &impl HitTester) {
        if self
            .router
            .interacting(Interaction::Up, |p| hit.contains(Region::DeleteButton, p))
        {
            self.router.interacted();
            self.machine.delete_last_letter();
        } else if self
            .router
            .interacting(Interaction::Up, |p| hit.contains(Region::ShuffleButton, p))
        {
            self.router.interacted();
            self.machine.shuffle();
        } else if self
            .router
            .interacting(Interaction::Up, |p| hit.contains(Region::EnterButton, p))
        {
            self.router.interacted();
            out.save_requested |= self.machine.submit_word();
        }
    }

    fn finish_tick(&mut self, mut out: TickOutcome) -> TickOutcome {
        let fired = self.machine.poll_rank();
        if let Some(last) = fired.last() {
            self.ui.splash = Some(*last);
        }
        out.notifications.extend(fired);
        self.router.gobble_missed_interactions();
        out
    }
}
