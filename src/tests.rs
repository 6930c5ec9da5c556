//! Crate-level scenario tests
//!
//! Cross-module behavior that the per-module tests can not see: the startup
//! restore pass, the no-duplicate-write property of list repopulation, and
//! the full round trip through the pending-revert resource.

#[cfg(test)]
mod restore_tests {
    use bevy::prelude::*;

    use crate::core::prefs::{
        Preferences, PREF_GLYPH, PREF_LAYER, PREF_USE_SELECTED,
    };
    use crate::core::state::{
        AppState, EditTab, Font, Glyph, GlyphName, Layer, LayerId, LayerRef,
    };
    use crate::panel::glyph_selector::GlyphSelector;
    use crate::panel::layer_selector::LayerSelector;
    use crate::panel::{PreviewPanelPlugin, ReplaceSelectedOnly};

    /// Builds an app around the panel plugin and runs its startup pass.
    fn app_after_startup(prefs: Preferences, state: AppState) -> App {
        let mut app = App::new();
        app.insert_resource(prefs)
            .insert_resource(state)
            .add_plugins(PreviewPanelPlugin);
        app.update();
        app
    }

    fn seeded_prefs(
        dir: &std::path::Path,
        glyph: Option<&str>,
        layer: Option<&str>,
        use_selected: bool,
    ) -> Preferences {
        let path = dir.join("preferences.json");
        {
            let mut seed = Preferences::load(Some(path.clone()));
            seed.set_string(PREF_GLYPH, glyph);
            seed.set_string(PREF_LAYER, layer);
            seed.set_bool(PREF_USE_SELECTED, use_selected);
        }
        Preferences::load(Some(path))
    }

    #[test]
    fn startup_restores_glyph_layer_and_flag() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let prefs =
            seeded_prefs(dir.path(), Some("m"), Some("m-bold"), false);

        let app = app_after_startup(prefs, AppState::demo("ham"));

        let glyphs = app.world().resource::<GlyphSelector>();
        assert_eq!(
            glyphs.current(),
            Some(&GlyphName::from("m")),
            "The remembered glyph should be selected"
        );
        let layers = app.world().resource::<LayerSelector>();
        assert_eq!(
            layers.current(),
            Some(&LayerId::from("m-bold")),
            "The remembered layer id should be selected"
        );
        assert!(!app.world().resource::<ReplaceSelectedOnly>().0);
    }

    #[test]
    fn missing_remembered_layer_falls_back_to_the_first() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let prefs =
            seeded_prefs(dir.path(), Some("m"), Some("m-gone"), false);

        let app = app_after_startup(prefs, AppState::demo("ham"));

        let layers = app.world().resource::<LayerSelector>();
        assert_eq!(
            layers.current(),
            Some(&LayerId::from("m-regular")),
            "A vanished layer id should fall back to the first layer"
        );
    }

    #[test]
    fn unknown_remembered_glyph_clears_the_selection() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let prefs = seeded_prefs(dir.path(), Some("z"), None, false);

        let app = app_after_startup(prefs, AppState::demo("ham"));

        let glyphs = app.world().resource::<GlyphSelector>();
        assert_eq!(glyphs.current(), None);
        let layers = app.world().resource::<LayerSelector>();
        assert_eq!(layers.current(), None);
    }

    #[test]
    fn use_selected_is_restored_before_the_glyph_scan() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        // "b" is in the tab but outside the selected range, so with the
        // flag restored first the remembered glyph must not resolve.
        let prefs = seeded_prefs(dir.path(), Some("b"), None, true);

        let font = Font::new(vec![
            Glyph::new("a", vec![Layer::new("a-regular", "Regular")]),
            Glyph::new("b", vec![Layer::new("b-regular", "Regular")]),
        ]);
        let mut tab = EditTab::new(
            "ab",
            vec![
                LayerRef::new("a", "a-regular"),
                LayerRef::new("b", "b-regular"),
            ],
        );
        tab.set_selection(0, 1);
        let state = AppState {
            font,
            tab: Some(tab),
        };

        let app = app_after_startup(prefs, state);

        assert!(app.world().resource::<ReplaceSelectedOnly>().0);
        let glyphs = app.world().resource::<GlyphSelector>();
        assert_eq!(
            glyphs.current(),
            None,
            "A glyph outside the selection should not resolve when the \
             selected-only flag is on"
        );
    }
}

#[cfg(test)]
mod effect_tests {
    use crate::core::prefs::{Preferences, PREF_GLYPH, PREF_LAYER};
    use crate::core::state::{EditTab, Font, Glyph, Layer, LayerRef};
    use crate::panel::glyph_selector::{GlyphSelector, SelectionChange};
    use crate::panel::layer_selector::LayerSelector;
    use crate::panel::commit_glyph_change;

    fn font_ab() -> Font {
        Font::new(vec![
            Glyph::new("a", vec![Layer::new("a-regular", "Regular")]),
            Glyph::new("b", vec![Layer::new("b-regular", "Regular")]),
        ])
    }

    fn tab(refs: &[&str]) -> EditTab {
        EditTab::new(
            "x".repeat(refs.len()),
            refs.iter()
                .map(|g| LayerRef::new(*g, format!("{g}-regular")))
                .collect(),
        )
    }

    #[test]
    fn list_refresh_alone_does_not_touch_preferences() {
        let font = font_ab();
        let mut prefs = Preferences::load(None);
        let mut glyphs = GlyphSelector::default();
        let mut layers = LayerSelector::default();

        // One user-visible selection event: one glyph write, one layer
        // write.
        glyphs.refresh(&font, Some(&tab(&["a", "b"])), false);
        let change = glyphs.select("b");
        commit_glyph_change(&change, &font, &mut layers, &mut prefs);
        assert_eq!(prefs.get_string(PREF_GLYPH).as_deref(), Some("b"));
        assert_eq!(prefs.get_string(PREF_LAYER).as_deref(), Some("b-regular"));

        // Repopulating the list without its explicit callback is pure
        // bookkeeping and must not write anything, even though "b" just
        // vanished from the list.
        glyphs.refresh(&font, Some(&tab(&["a"])), false);
        assert_eq!(
            prefs.get_string(PREF_GLYPH).as_deref(),
            Some("b"),
            "List repopulation alone should not cascade into writes"
        );

        // The full two-phase update fires the callback exactly once and
        // clears the stale choice.
        let change = glyphs.repopulate(&font, Some(&tab(&["a"])), false);
        commit_glyph_change(&change, &font, &mut layers, &mut prefs);
        assert_eq!(prefs.get_string(PREF_GLYPH), None);
    }

    #[test]
    fn suppressed_changes_commit_nothing() {
        let font = font_ab();
        let mut prefs = Preferences::load(None);
        prefs.set_string(PREF_GLYPH, Some("a"));
        let mut layers = LayerSelector::default();
        layers.refresh(font.glyph("a"));

        commit_glyph_change(
            &SelectionChange::Suppressed,
            &font,
            &mut layers,
            &mut prefs,
        );

        assert_eq!(prefs.get_string(PREF_GLYPH).as_deref(), Some("a"));
        assert_eq!(
            layers.current().map(|id| id.as_str()),
            Some("a-regular"),
            "A suppressed change should not refresh the layer list"
        );
    }
}

#[cfg(test)]
mod round_trip_tests {
    use crate::core::state::{AppState, GlyphName, LayerId};
    use crate::panel::substitute::{apply_preview, revert_preview};
    use crate::panel::PendingRevert;

    #[test]
    fn demo_round_trip_through_the_pending_revert_resource() {
        let mut state = AppState::demo("abab");
        let before = state.tab.as_ref().unwrap().layers().to_vec();

        let AppState { font, tab } = &mut state;
        let tab = tab.as_mut().unwrap();

        let snapshot = apply_preview(
            font,
            tab,
            &GlyphName::from("a"),
            &LayerId::from("a-display"),
            false,
        )
        .expect("Substitution should succeed");
        assert_ne!(tab.layers(), before.as_slice());

        let mut pending = PendingRevert(Some(snapshot));
        let snapshot = pending.0.take().expect("Revert should be enabled");
        revert_preview(font, tab, snapshot).expect("Revert should succeed");

        assert_eq!(tab.layers(), before.as_slice());
        assert!(
            pending.0.is_none(),
            "The revert capability should be disabled after use"
        );
    }
}
