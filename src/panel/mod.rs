//! The preview-layer panel core
//!
//! The two dropdown state machines, the substitution/reversion engine and
//! the glue between them. Everything in here is plain state manipulation;
//! the widgets in `crate::ui` are a thin shell over these types.

pub mod glyph_selector;
pub mod layer_selector;
pub mod substitute;

use bevy::prelude::*;

use crate::core::prefs::{
    Preferences, PREF_GLYPH, PREF_LAYER, PREF_USE_SELECTED,
};
use crate::core::state::{AppState, Font, LayerId};
use glyph_selector::{GlyphSelector, SelectionChange};
use layer_selector::{LayerChange, LayerSelector};
use substitute::PreviewSnapshot;

/// Whether substitutions are restricted to the tab's selected text
#[derive(Resource, Debug, Default)]
pub struct ReplaceSelectedOnly(pub bool);

/// The undo snapshot of the last successful preview change, if any. The
/// Revert button is enabled exactly while this holds a value.
#[derive(Resource, Debug, Default)]
pub struct PendingRevert(pub Option<PreviewSnapshot>);

/// Runs the side effects of one glyph selection event: refresh the layer
/// list against the newly selected glyph and persist both choices.
///
/// A `Suppressed` change runs nothing, which is what keeps dropdown
/// repopulation from cascading into duplicate writes.
pub fn commit_glyph_change(
    change: &SelectionChange,
    font: &Font,
    layers: &mut LayerSelector,
    prefs: &mut Preferences,
) {
    let SelectionChange::Applied { glyph } = change else {
        return;
    };
    let resolved = glyph.as_ref().and_then(|name| font.glyph(name));
    let layer_change = layers.refresh(resolved);
    prefs.set_string(PREF_GLYPH, glyph.as_deref());
    commit_layer_change(&layer_change, prefs);
}

/// Persists the layer choice resulting from one layer selection event.
pub fn commit_layer_change(change: &LayerChange, prefs: &mut Preferences) {
    prefs.set_string(PREF_LAYER, change.layer.as_deref());
}

/// Restores the panel state saved by the previous session.
///
/// Order matters: the use-selected flag first (it decides which layers the
/// glyph scan sees), then the glyph list, then the glyph choice, then the
/// layer list, then the layer choice by remembered id if it still exists.
pub fn restore_preferences(
    mut prefs: ResMut<Preferences>,
    mut glyphs: ResMut<GlyphSelector>,
    mut layers: ResMut<LayerSelector>,
    mut use_selected: ResMut<ReplaceSelectedOnly>,
    app_state: Res<AppState>,
) {
    let saved_glyph = prefs.get_string(PREF_GLYPH);
    let saved_layer = prefs.get_string(PREF_LAYER);

    use_selected.0 = prefs.get_bool(PREF_USE_SELECTED).unwrap_or(false);

    let change = glyphs.repopulate(
        &app_state.font,
        app_state.tab.as_ref(),
        use_selected.0,
    );
    commit_glyph_change(&change, &app_state.font, &mut layers, &mut prefs);

    if let Some(name) = saved_glyph {
        let change = glyphs.select(&name);
        commit_glyph_change(&change, &app_state.font, &mut layers, &mut prefs);
    }

    if glyphs.current().is_some() {
        if let Some(id) = saved_layer {
            let id = LayerId::from(id);
            if let Some(change) = layers.select_id(&id) {
                commit_layer_change(&change, &mut prefs);
            }
        }
    }

    info!(
        "Restored panel state: glyph {:?}, layer {:?}, selected-only {}",
        glyphs.current(),
        layers.current(),
        use_selected.0
    );
}

/// Registers the panel's state resources and the startup restore pass
pub struct PreviewPanelPlugin;

impl Plugin for PreviewPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GlyphSelector>()
            .init_resource::<LayerSelector>()
            .init_resource::<ReplaceSelectedOnly>()
            .init_resource::<PendingRevert>()
            .add_systems(Startup, restore_preferences);
    }
}
