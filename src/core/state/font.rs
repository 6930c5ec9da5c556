//! Read-only font model consumed by the panel
//!
//! This is the minimal view of the host editor's font: an ordered collection
//! of glyphs keyed by name, where each glyph owns an ordered list of layers.
//! Layer display names may collide within a glyph; layer ids are the stable
//! identity key.

use smol_str::SmolStr;

/// A glyph name, unique within a font
pub type GlyphName = SmolStr;

/// An opaque, stable layer identifier
pub type LayerId = SmolStr;

/// One concrete variant of a glyph (a master design, a color layer, ...)
#[derive(Clone, Debug)]
pub struct Layer {
    /// Stable identity of this layer within its glyph
    pub id: LayerId,
    /// Display name, not guaranteed unique
    pub name: String,
}

impl Layer {
    pub fn new(id: impl Into<LayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A named character/symbol definition containing one or more layers
#[derive(Clone, Debug)]
pub struct Glyph {
    pub name: GlyphName,
    /// Layers in their native order
    pub layers: Vec<Layer>,
}

impl Glyph {
    pub fn new(name: impl Into<GlyphName>, layers: Vec<Layer>) -> Self {
        Self {
            name: name.into(),
            layers,
        }
    }

    /// The ordered layer ids, matching `layers`
    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(|layer| layer.id.clone()).collect()
    }

    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == *id)
    }
}

/// The host font: an ordered glyph collection keyed by name
///
/// The glyph order is the font's master glyph ordering and is what the glyph
/// dropdown sorts by.
#[derive(Clone, Debug, Default)]
pub struct Font {
    glyphs: Vec<Glyph>,
}

impl Font {
    pub fn new(glyphs: Vec<Glyph>) -> Self {
        Self { glyphs }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn glyph(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.iter().find(|glyph| glyph.name == name)
    }

    /// Position of a glyph in the master glyph ordering
    pub fn glyph_order(&self, name: &str) -> Option<usize> {
        self.glyphs.iter().position(|glyph| glyph.name == name)
    }
}
