//! View state for the introductions page.
//!
//! All mutable page state lives in [`ViewState`]: the loaded records, the
//! search query, section toggles, and slideshow mode + index. Every user
//! action maps to one transition method, and the filtered sequence is
//! re-derived whenever the query or records change.
//!
//! # Slideshow invariants
//!
//! - The stored index is always read modulo the filtered count, so
//!   [`ViewState::current_index`] stays in `[0, count)` even if the filtered
//!   sequence shrinks.
//! - Next/previous wrap in both directions.
//! - Turning slideshow off, or changing the query or records, resets the
//!   index to 0.

use serde_json::Value;

use crate::card::{Section, Toggles};
use crate::resolve::Record;
use crate::search;

/// What the page should currently display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visible {
    /// Every filtered record, by position in the full sequence.
    All(Vec<usize>),
    /// Slideshow mode: exactly one record.
    Single(usize),
    /// Nothing matched (or nothing loaded).
    NoRecords,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    records: Vec<Value>,
    query: String,
    toggles: Toggles,
    slideshow: bool,
    slide: usize,
    filtered: Vec<usize>,
}

impl ViewState {
    pub fn new(records: Vec<Value>) -> Self {
        let mut state = Self::default();
        state.set_records(records);
        state
    }

    pub fn with_toggles(mut self, toggles: Toggles) -> Self {
        self.toggles = toggles;
        self
    }

    pub fn with_slideshow(mut self, on: bool) -> Self {
        self.set_slideshow(on);
        self
    }

    // -- readers ------------------------------------------------------------

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn record(&self, position: usize) -> Option<Record<'_>> {
        self.records.get(position).map(|raw| Record::new(raw, position))
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn toggles(&self) -> &Toggles {
        &self.toggles
    }

    pub fn is_slideshow(&self) -> bool {
        self.slideshow
    }

    /// Positions of the records matching the current query.
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    /// Index into [`filtered`](Self::filtered) of the current slide, if any.
    pub fn current_index(&self) -> Option<usize> {
        match self.filtered.len() {
            0 => None,
            n => Some(self.slide % n),
        }
    }

    pub fn visible(&self) -> Visible {
        if self.filtered.is_empty() {
            return Visible::NoRecords;
        }
        match self.current_index() {
            Some(i) if self.slideshow => Visible::Single(self.filtered[i]),
            _ => Visible::All(self.filtered.clone()),
        }
    }

    // -- transitions --------------------------------------------------------

    pub fn set_records(&mut self, records: Vec<Value>) {
        self.records = records;
        self.refilter();
        self.slide = 0;
        tracing::debug!(
            records = self.records.len(),
            filtered = self.filtered.len(),
            "view: records replaced"
        );
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.refilter();
        self.slide = 0;
        tracing::debug!(query = %self.query, filtered = self.filtered.len(), "view: query changed");
    }

    pub fn set_section(&mut self, section: Section, visible: bool) {
        self.toggles.set(section, visible);
    }

    /// Flip one section; returns its new visibility.
    pub fn toggle_section(&mut self, section: Section) -> bool {
        let visible = self.toggles.toggle(section);
        tracing::debug!(%section, visible, "view: section toggled");
        visible
    }

    pub fn set_slideshow(&mut self, on: bool) {
        self.slideshow = on;
        if !on {
            self.slide = 0;
        }
    }

    pub fn toggle_slideshow(&mut self) -> bool {
        self.set_slideshow(!self.slideshow);
        tracing::debug!(slideshow = self.slideshow, "view: slideshow toggled");
        self.slideshow
    }

    pub fn next(&mut self) {
        if let (true, Some(i)) = (self.slideshow, self.current_index()) {
            self.slide = (i + 1) % self.filtered.len();
        }
    }

    pub fn prev(&mut self) {
        if let (true, Some(i)) = (self.slideshow, self.current_index()) {
            let n = self.filtered.len();
            self.slide = (i + n - 1) % n;
        }
    }

    /// Jump straight to slide `n` (0-based), wrapping over the filtered set.
    pub fn go_to(&mut self, n: usize) {
        if let (true, Some(_)) = (self.slideshow, self.current_index()) {
            self.slide = n % self.filtered.len();
        }
    }

    fn refilter(&mut self) {
        self.filtered = search::filter_indices(&self.records, &self.query);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
