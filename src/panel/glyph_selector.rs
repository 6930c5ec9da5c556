//! Glyph dropdown state machine
//!
//! Tracks the set of unique glyphs referenced by the current tab (or only by
//! its selected text) and keeps the combo input's selection consistent with
//! that set. Free-text input of a name outside the set clamps the selection
//! to none instead of rejecting the input; the raw text stays visible in the
//! UI input buffer.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::core::state::{EditTab, Font, GlyphName, LayerRef};

/// The outcome of a selection callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// The selection changed (possibly to none); the caller owns the side
    /// effects: one layer-list refresh and one persistence write.
    Applied { glyph: Option<GlyphName> },
    /// Selection events were disabled; nothing happened and no side effects
    /// may run.
    Suppressed,
}

/// State of the glyph combo input
#[derive(Resource, Debug)]
pub struct GlyphSelector {
    /// Unique glyphs currently in view, in the font's master glyph order.
    /// This is the membership list every selection is checked against.
    items: Vec<GlyphName>,
    /// The currently chosen glyph, if any
    current: Option<GlyphName>,
    /// Reentrancy guard: while false, `select` reports `Suppressed` so list
    /// repopulation can not fire selection side effects.
    events_enabled: bool,
}

impl Default for GlyphSelector {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            events_enabled: true,
        }
    }
}

impl GlyphSelector {
    pub fn items(&self) -> &[GlyphName] {
        &self.items
    }

    pub fn current(&self) -> Option<&GlyphName> {
        self.current.as_ref()
    }

    /// Recomputes the unique-glyph list from the tab and remembers it for
    /// membership checks. Scans only the selected text when `use_selected`.
    pub fn refresh(
        &mut self,
        font: &Font,
        tab: Option<&EditTab>,
        use_selected: bool,
    ) -> &[GlyphName] {
        self.items = match tab {
            None => Vec::new(),
            Some(tab) => {
                let scanned = if use_selected {
                    tab.selected_layers()
                } else {
                    tab.layers()
                };
                unique_glyphs_in(scanned, font)
            }
        };
        &self.items
    }

    /// Selection callback for raw combo input.
    ///
    /// A name not present in the item list (e.g. typed by the user) clamps
    /// the selection to none; the caller keeps the raw text visible.
    pub fn select(&mut self, raw: &str) -> SelectionChange {
        if !self.events_enabled {
            return SelectionChange::Suppressed;
        }
        let chosen = self
            .items
            .iter()
            .find(|name| name.as_str() == raw)
            .cloned();
        self.current = chosen.clone();
        SelectionChange::Applied { glyph: chosen }
    }

    /// Two-phase dropdown update: recompute the list with selection events
    /// disabled, drop the current selection if it vanished, then invoke the
    /// selection callback exactly once.
    ///
    /// Used by the reset button, the pre-change freshness pass and startup
    /// restore, so repopulating the list never cascades into duplicate
    /// persistence writes.
    pub fn repopulate(
        &mut self,
        font: &Font,
        tab: Option<&EditTab>,
        use_selected: bool,
    ) -> SelectionChange {
        self.events_enabled = false;
        self.refresh(font, tab, use_selected);
        if let Some(current) = &self.current {
            if !self.items.contains(current) {
                self.current = None;
            }
        }
        self.events_enabled = true;

        let raw = self
            .current
            .as_ref()
            .map(|name| name.to_string())
            .unwrap_or_default();
        self.select(&raw)
    }
}

/// Unique parent-glyph names of `refs`, in the font's master glyph ordering.
///
/// Entries whose glyph is missing from the font are dropped. The order is
/// the font's, not the first occurrence in the tab, so the dropdown is
/// stable across edits.
pub fn unique_glyphs_in(refs: &[LayerRef], font: &Font) -> Vec<GlyphName> {
    let mut seen = HashSet::new();
    let mut names: Vec<GlyphName> = Vec::new();
    for layer_ref in refs {
        if seen.insert(layer_ref.glyph.clone())
            && font.glyph(&layer_ref.glyph).is_some()
        {
            names.push(layer_ref.glyph.clone());
        }
    }
    names.sort_by_key(|name| font.glyph_order(name).unwrap_or(usize::MAX));
    names
}
