//! Carousel engine — slide selection, observers, and autoplay clock.
//!
//! DESIGN
//! ======
//! `CarouselEngine` is an explicit state object owned by whichever view
//! created it. It has two states: EMPTY (no slides, no selection) and ACTIVE
//! (`selected` always indexes into `slides`). Every selection change is
//! forwarded to a `ScrollSnap` and then announced to registered listeners,
//! synchronously and exactly once.
//!
//! Autoplay is a pure clock: `advance(elapsed)` fires `select_next` once per
//! whole delay interval. The engine never spawns anything itself; the
//! `autoplay` module drives it from a tokio task, so tests can step time by
//! hand.
//!
//! TRADE-OFFS
//! ==========
//! Listeners are plain `FnMut(usize)` closures invoked while the caller holds
//! `&mut self`. A listener therefore cannot re-enter the engine; views that
//! need to react post a message or record the index instead.

pub mod autoplay;
pub mod scroll;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::schema::Slide;

pub use autoplay::{AutoplayDriver, SharedCarousel};
pub use scroll::{ScrollSnap, SnapTrack};

// =============================================================================
// OPTIONS
// =============================================================================

/// Where the selected slide snaps within the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselOptions {
    /// Wrap navigation at both ends.
    #[serde(rename = "loop")]
    pub wrap: bool,
    pub align: Align,
    /// Autoplay interval. `None` or `Some(0)` disables autoplay.
    pub autoplay_delay_ms: Option<u64>,
    pub show_pagination: bool,
    pub show_navigation: bool,
}

// =============================================================================
// LISTENERS
// =============================================================================

/// Handle returned by [`CarouselEngine::on_selection_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn FnMut(usize) + Send>;

// =============================================================================
// SNAPSHOT
// =============================================================================

/// One pagination indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageDot {
    pub index: usize,
    pub selected: bool,
}

/// Serializable view of the engine for page rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselSnapshot {
    pub slides: Vec<Slide>,
    pub selected_index: Option<usize>,
    pub align: Align,
    pub autoplay_delay_ms: Option<u64>,
    pub pagination: Vec<PageDot>,
    pub can_scroll_previous: bool,
    pub can_scroll_next: bool,
    pub scroll_position: f64,
}

// =============================================================================
// ENGINE
// =============================================================================

struct AutoplayClock {
    delay: Duration,
    elapsed: Duration,
}

pub struct CarouselEngine {
    slides: Vec<Slide>,
    selected: Option<usize>,
    options: CarouselOptions,
    autoplay: Option<AutoplayClock>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
    scroller: Box<dyn ScrollSnap>,
}

impl Default for CarouselEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CarouselEngine {
    /// An EMPTY engine snapping a default [`SnapTrack`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_scroller(Box::new(SnapTrack::default()))
    }

    #[must_use]
    pub fn with_scroller(scroller: Box<dyn ScrollSnap>) -> Self {
        Self {
            slides: Vec::new(),
            selected: None,
            options: CarouselOptions::default(),
            autoplay: None,
            listeners: Vec::new(),
            next_listener_id: 0,
            scroller,
        }
    }

    /// Replace the slide sequence and options, selecting the first slide.
    ///
    /// An empty sequence puts the engine in EMPTY. Listeners hear about the
    /// new selection only if it differs from the previous one.
    pub fn initialize(&mut self, slides: Vec<Slide>, options: CarouselOptions) {
        let previous = self.selected;
        self.slides = slides;
        self.set_autoplay(options.autoplay_delay_ms);
        self.options = CarouselOptions { autoplay_delay_ms: self.options.autoplay_delay_ms, ..options };
        self.scroller.reset(self.slides.len());

        if self.slides.is_empty() {
            self.selected = None;
            return;
        }

        self.selected = Some(0);
        self.scroller.scroll_to(0, self.options.align);
        if previous != Some(0) {
            self.notify(0);
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[must_use]
    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    // --- Navigation ---

    /// Advance by one slide. Returns `true` if the selection changed.
    pub fn select_next(&mut self) -> bool {
        let Some(current) = self.selected else {
            return false;
        };
        let target = if current + 1 < self.slides.len() {
            current + 1
        } else if self.options.wrap {
            0
        } else {
            return false;
        };
        self.select(target)
    }

    /// Retreat by one slide. Returns `true` if the selection changed.
    pub fn select_previous(&mut self) -> bool {
        let Some(current) = self.selected else {
            return false;
        };
        let target = if current > 0 {
            current - 1
        } else if self.options.wrap {
            self.slides.len() - 1
        } else {
            return false;
        };
        self.select(target)
    }

    /// Jump to `index`. Out-of-range indices are ignored.
    pub fn select_index(&mut self, index: usize) -> bool {
        if self.selected.is_none() || index >= self.slides.len() {
            return false;
        }
        self.select(index)
    }

    fn select(&mut self, index: usize) -> bool {
        if self.selected == Some(index) {
            return false;
        }
        self.selected = Some(index);
        self.scroller.scroll_to(index, self.options.align);
        self.notify(index);
        true
    }

    // --- Listeners ---

    /// Register a selection-changed listener.
    pub fn on_selection_changed(&mut self, listener: impl FnMut(usize) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns `false` if `id` was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, index: usize) {
        for (_, listener) in &mut self.listeners {
            listener(index);
        }
    }

    // --- Autoplay ---

    /// Set or clear the autoplay interval. Restarts the clock.
    pub fn set_autoplay(&mut self, delay_ms: Option<u64>) {
        let delay_ms = delay_ms.filter(|&ms| ms > 0);
        self.options.autoplay_delay_ms = delay_ms;
        self.autoplay = delay_ms.map(|ms| AutoplayClock { delay: Duration::from_millis(ms), elapsed: Duration::ZERO });
    }

    #[must_use]
    pub fn autoplay_delay(&self) -> Option<Duration> {
        self.autoplay.as_ref().map(|clock| clock.delay)
    }

    /// Feed elapsed time to the autoplay clock, calling `select_next` once
    /// per whole interval. Returns how many intervals fired. EMPTY engines
    /// and engines without autoplay do not accumulate time.
    ///
    /// A long catch-up is collapsed: with `loop` only the final partial lap
    /// is stepped through, without it at most enough steps to reach the end.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        if self.selected.is_none() {
            return 0;
        }
        let Some(clock) = self.autoplay.as_mut() else {
            return 0;
        };
        let total = clock.elapsed.saturating_add(elapsed);
        let delay = clock.delay.as_nanos();
        let ticks = total.as_nanos() / delay;
        let remainder = total.as_nanos() % delay;
        clock.elapsed = duration_from_nanos(remainder);

        // Whole laps land back on the same slide; only the tail matters.
        let len = self.slides.len() as u128;
        let steps = if self.options.wrap { ticks % len } else { ticks.min(len) };
        for _ in 0..steps {
            self.select_next();
        }
        usize::try_from(ticks).unwrap_or(usize::MAX)
    }

    /// Stop autoplay and drop every listener.
    pub fn teardown(&mut self) {
        self.set_autoplay(None);
        self.listeners.clear();
    }

    // --- Rendering ---

    /// Pagination dots, empty unless `show_pagination` is set.
    #[must_use]
    pub fn pagination(&self) -> Vec<PageDot> {
        if !self.options.show_pagination {
            return Vec::new();
        }
        (0..self.slides.len())
            .map(|index| PageDot { index, selected: self.selected == Some(index) })
            .collect()
    }

    #[must_use]
    pub fn can_scroll_previous(&self) -> bool {
        self.options.show_navigation
            && self
                .selected
                .is_some_and(|i| i > 0 || (self.options.wrap && self.slides.len() > 1))
    }

    #[must_use]
    pub fn can_scroll_next(&self) -> bool {
        self.options.show_navigation
            && self
                .selected
                .is_some_and(|i| i + 1 < self.slides.len() || (self.options.wrap && self.slides.len() > 1))
    }

    #[must_use]
    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            slides: self.slides.clone(),
            selected_index: self.selected,
            align: self.options.align,
            autoplay_delay_ms: self.options.autoplay_delay_ms,
            pagination: self.pagination(),
            can_scroll_previous: self.can_scroll_previous(),
            can_scroll_next: self.can_scroll_next(),
            scroll_position: self.scroller.position(),
        }
    }
}

fn duration_from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    // Always < 1e9, fits in u32.
    let subsec = u32::try_from(nanos % NANOS_PER_SEC).unwrap_or(0);
    Duration::new(secs, subsec)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
