//! Edit tab model: the panel's primary write target
//!
//! A tab holds one layer reference per character position of its text. The
//! layer sequence is the only thing the panel mutates, and it is always
//! replaced wholesale so the host observes either the old sequence or the
//! new one, never a partial rewrite.

use crate::core::state::font::{GlyphName, LayerId};

/// A non-owning reference to one layer of one glyph
///
/// The glyph name is the Layer -> Glyph back-reference, resolved against the
/// `Font` index when the actual glyph is needed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerRef {
    pub glyph: GlyphName,
    pub layer: LayerId,
}

impl LayerRef {
    pub fn new(glyph: impl Into<GlyphName>, layer: impl Into<LayerId>) -> Self {
        Self {
            glyph: glyph.into(),
            layer: layer.into(),
        }
    }
}

/// An editing view: an ordered run of layer references plus the text and
/// selection state they correspond to
#[derive(Clone, Debug, Default)]
pub struct EditTab {
    layers: Vec<LayerRef>,
    text: String,
    cursor: usize,
    range: usize,
}

impl EditTab {
    pub fn new(text: impl Into<String>, layers: Vec<LayerRef>) -> Self {
        Self {
            layers,
            text: text.into(),
            cursor: 0,
            range: 0,
        }
    }

    pub fn layers(&self) -> &[LayerRef] {
        &self.layers
    }

    /// Replaces the whole layer sequence in one step
    pub fn set_layers(&mut self, layers: Vec<LayerRef>) {
        self.layers = layers;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Host-side text edit. Only used by tests and the demo host; the panel
    /// itself never writes text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn range(&self) -> usize {
        self.range
    }

    pub fn set_selection(&mut self, cursor: usize, range: usize) {
        self.cursor = cursor;
        self.range = range;
    }

    /// The sub-sequence within `[cursor, cursor + range)`, clamped to the
    /// sequence bounds.
    ///
    /// This view and the absolute-position selection test used by the
    /// substitution engine read the same cursor/range pair off the same tab,
    /// so the two selection notions coincide by construction.
    pub fn selected_layers(&self) -> &[LayerRef] {
        let start = self.cursor.min(self.layers.len());
        let end = self.cursor.saturating_add(self.range).min(self.layers.len());
        &self.layers[start..end]
    }
}
