//! Core application state structures
//!
//! The `AppState` resource is the panel's window onto the host editor: the
//! loaded font plus the current editing tab. The demo binary fills it with a
//! small built-in font so the panel is runnable without a real host.

use bevy::prelude::*;

use crate::core::state::font::{Font, Glyph, Layer};
use crate::core::state::tab::{EditTab, LayerRef};

/// The main application state - the host surface consumed by the panel
#[derive(Resource, Default, Clone)]
pub struct AppState {
    /// The current font
    pub font: Font,
    /// The current editing tab, if one is open
    pub tab: Option<EditTab>,
}

impl AppState {
    /// Builds a demo host state: one glyph per unique character of `text`,
    /// each with three layers, and a tab showing `text` on the first layer.
    pub fn demo(text: &str) -> Self {
        let mut names: Vec<char> = text.chars().collect();
        names.sort_unstable();
        names.dedup();

        let glyphs = names
            .iter()
            .map(|ch| {
                let layers = ["Regular", "Bold", "Display"]
                    .iter()
                    .map(|style| {
                        Layer::new(
                            format!("{ch}-{}", style.to_lowercase()),
                            *style,
                        )
                    })
                    .collect();
                Glyph::new(ch.to_string(), layers)
            })
            .collect();

        let layers = text
            .chars()
            .map(|ch| LayerRef::new(ch.to_string(), format!("{ch}-regular")))
            .collect();

        let mut tab = EditTab::new(text, layers);
        // A starting selection so the "Replace selected text" toggle has
        // something to act on in the demo.
        tab.set_selection(0, text.chars().count().min(4));

        Self {
            font: Font::new(glyphs),
            tab: Some(tab),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_state_has_one_glyph_per_unique_char() {
        let state = AppState::demo("abba");
        assert_eq!(state.font.glyphs().len(), 2);
        let tab = state.tab.expect("Demo state should open a tab");
        assert_eq!(tab.layers().len(), 4);
        assert_eq!(tab.text(), "abba");
    }

    #[test]
    fn demo_tab_layers_resolve_against_the_font() {
        let state = AppState::demo("ok");
        let tab = state.tab.as_ref().unwrap();
        for layer_ref in tab.layers() {
            let glyph = state
                .font
                .glyph(&layer_ref.glyph)
                .expect("Tab layer should reference a known glyph");
            assert!(
                glyph.layer(&layer_ref.layer).is_some(),
                "Tab layer id should exist on its glyph"
            );
        }
    }
}
