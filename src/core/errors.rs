//!    Error handling
//!
//! The four guard failures of the substitution/reversion engines are a typed
//! enum so the UI can surface one descriptive notification per failure.
//! App-level plumbing (preference file I/O, config dir resolution) uses
//! anyhow, converted to log lines at the boundary.

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, Context, Error};
use thiserror::Error;

use crate::core::state::{GlyphName, LayerId};

/// Result type alias for fallible app plumbing
pub type AppResult<T> = anyhow::Result<T>;

/// A failed preview change or reversion. Every variant aborts its operation
/// with zero mutation; none of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError {
    /// The target glyph vanished from the freshly recomputed glyph list.
    #[error("glyph \"{glyph}\" is not in the current {}", scope(.selected_only))]
    GlyphNotFound {
        glyph: GlyphName,
        /// Whether only the selected text was scanned
        selected_only: bool,
    },

    /// The target layer id vanished from the glyph's freshly recomputed
    /// layer list.
    #[error("glyph \"{glyph}\" no longer has a layer with id \"{layer}\"")]
    LayerNotFound { glyph: GlyphName, layer: LayerId },

    /// The tab text changed between the substitution and the revert.
    #[error("the text in the current tab has changed since the last change")]
    RevertTextChanged,

    /// The substituted glyph's layer set changed between the substitution
    /// and the revert.
    #[error("the layers of glyph \"{glyph}\" have changed since the last change")]
    RevertLayersChanged { glyph: GlyphName },
}

fn scope(selected_only: &bool) -> &'static str {
    if *selected_only {
        "selected text"
    } else {
        "tab"
    }
}
