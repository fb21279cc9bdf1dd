//! Scroll-snap primitive the carousel forwards navigation to.
//!
//! The engine only decides *which* slide is selected; where the track sits
//! is owned by a `ScrollSnap`. `SnapTrack` is the default: a one-dimensional
//! track of equal-width slides inside a viewport, snapping by alignment.

use super::Align;

/// Receiver of carousel navigation commands.
pub trait ScrollSnap: Send {
    /// Resize the track for a new slide sequence and rewind to the start.
    fn reset(&mut self, slide_count: usize);

    /// Snap the track so slide `index` sits at `align`.
    fn scroll_to(&mut self, index: usize, align: Align);

    /// Current track offset, in the same unit as the slide width.
    fn position(&self) -> f64;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapTrack {
    slide_width: f64,
    viewport_width: f64,
    slide_count: usize,
    offset: f64,
}

impl Default for SnapTrack {
    /// One full-width slide per viewport; offsets read as slide indices.
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl SnapTrack {
    #[must_use]
    pub fn new(slide_width: f64, viewport_width: f64) -> Self {
        Self { slide_width, viewport_width, slide_count: 0, offset: 0.0 }
    }

    #[allow(clippy::cast_precision_loss)]
    fn max_offset(&self) -> f64 {
        (self.slide_count as f64 * self.slide_width - self.viewport_width).max(0.0)
    }
}

impl ScrollSnap for SnapTrack {
    fn reset(&mut self, slide_count: usize) {
        self.slide_count = slide_count;
        self.offset = 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    fn scroll_to(&mut self, index: usize, align: Align) {
        self.slide_count = self.slide_count.max(index + 1);
        let start = index as f64 * self.slide_width;
        let gap = self.viewport_width - self.slide_width;
        let raw = match align {
            Align::Start => start,
            Align::Center => start - gap / 2.0,
            Align::End => start - gap,
        };
        self.offset = raw.clamp(0.0, self.max_offset());
    }

    fn position(&self) -> f64 {
        self.offset
    }
}
