//! Active-section tracking.
//!
//! A section is "current" when the scroll position has reached its top minus
//! a fixed lookahead; the last qualifying section in document order wins.
//! The same rule runs in the browser (see `src/assets/cardapio.js`) against
//! pixel offsets, and in the TUI view against rendered line offsets.

/// Fixed lookahead threshold in page pixels, matching the embedded script.
pub const NAV_LOOKAHEAD: i64 = 60;

/// A section's top offset relative to the start of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOffset {
    pub id: String,
    pub top: i64,
}

impl SectionOffset {
    pub fn new(id: impl Into<String>, top: i64) -> Self {
        Self {
            id: id.into(),
            top,
        }
    }
}

/// The last section (in document order) whose adjusted top is at or above
/// `scroll`, i.e. `scroll >= top - lookahead`. `None` when nothing qualifies
/// (scroll at the very top, first section still below the threshold).
pub fn active_section(sections: &[SectionOffset], scroll: i64, lookahead: i64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|s| scroll >= s.top - lookahead)
        .map(|s| s.id.as_str())
}

/// A scroll-position subscriber: holds the section offsets and recomputes the
/// single derived value (the currently active section id) on every
/// notification. Runs once at construction to reflect the initial position.
pub struct ScrollSpy {
    sections: Vec<SectionOffset>,
    lookahead: i64,
    active: Option<String>,
}

impl ScrollSpy {
    pub fn new(sections: Vec<SectionOffset>, lookahead: i64, initial_scroll: i64) -> Self {
        let mut spy = Self {
            sections,
            lookahead,
            active: None,
        };
        spy.observe(initial_scroll);
        spy
    }

    /// Recompute the active section for a new scroll position. Returns true
    /// when the active section changed.
    pub fn observe(&mut self, scroll: i64) -> bool {
        let next =
            active_section(&self.sections, scroll, self.lookahead).map(|id| id.to_owned());
        if next == self.active {
            false
        } else {
            self.active = next;
            true
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }
}
