//! Preview substitution and reversion
//!
//! `apply_preview` rewrites a tab's layer sequence so every occurrence of
//! the target glyph (optionally only inside the recorded selection range)
//! shows the target layer, and records what was overwritten.
//! `revert_preview` plays that record back. Both revalidate the host state
//! immediately before mutating: the host owns the data and may have changed
//! it since the dropdowns were last refreshed.

use std::collections::{HashSet, VecDeque};

use crate::core::errors::SwapError;
use crate::core::state::{EditTab, Font, GlyphName, LayerId, LayerRef};
use crate::panel::glyph_selector::unique_glyphs_in;

/// Everything needed to undo the last preview change.
///
/// Exists from the moment a substitution succeeds until a revert or the next
/// substitution discards it.
#[derive(Debug, Clone)]
pub struct PreviewSnapshot {
    /// The glyph whose occurrences were rewritten
    glyph: GlyphName,
    /// The overwritten layer refs, in tab order
    replaced: VecDeque<LayerRef>,
    /// The glyph's layer ids at substitution time
    glyph_layer_ids: Vec<LayerId>,
    /// The full tab text at substitution time
    text: String,
    /// Whether only the selected text was rewritten
    use_selected: bool,
    /// Selection bounds at substitution time
    cursor: usize,
    range: usize,
}

impl PreviewSnapshot {
    pub fn glyph(&self) -> &GlyphName {
        &self.glyph
    }

    pub fn replaced_count(&self) -> usize {
        self.replaced.len()
    }

    /// Whether a tab position falls inside the recorded selection range
    fn in_recorded_selection(&self, index: usize) -> bool {
        index >= self.cursor && index < self.cursor.saturating_add(self.range)
    }
}

/// Sets the preview layer for every occurrence of `glyph` in the tab.
///
/// Preconditions run against freshly recomputed data, not whatever the
/// dropdowns last saw: the glyph must still be in view and the layer must
/// still be on the glyph. On success the whole layer sequence is replaced in
/// one step and the returned snapshot enables reversion. On failure the tab
/// is untouched.
pub fn apply_preview(
    font: &Font,
    tab: &mut EditTab,
    glyph: &GlyphName,
    layer: &LayerId,
    use_selected: bool,
) -> Result<PreviewSnapshot, SwapError> {
    let scanned = if use_selected {
        tab.selected_layers()
    } else {
        tab.layers()
    };
    let in_view = unique_glyphs_in(scanned, font);
    if !in_view.contains(glyph) {
        return Err(SwapError::GlyphNotFound {
            glyph: glyph.clone(),
            selected_only: use_selected,
        });
    }

    let glyph_layer_ids = match font.glyph(glyph) {
        Some(target) => target.layer_ids(),
        None => Vec::new(),
    };
    if !glyph_layer_ids.contains(layer) {
        return Err(SwapError::LayerNotFound {
            glyph: glyph.clone(),
            layer: layer.clone(),
        });
    }

    let cursor = tab.cursor();
    let range = tab.range();
    let mut snapshot = PreviewSnapshot {
        glyph: glyph.clone(),
        replaced: VecDeque::new(),
        glyph_layer_ids,
        text: tab.text().to_string(),
        use_selected,
        cursor,
        range,
    };

    let new_layers = tab
        .layers()
        .iter()
        .enumerate()
        .map(|(index, layer_ref)| {
            if layer_ref.glyph == *glyph
                && (!use_selected || snapshot.in_recorded_selection(index))
            {
                snapshot.replaced.push_back(layer_ref.clone());
                LayerRef::new(glyph.clone(), layer.clone())
            } else {
                layer_ref.clone()
            }
        })
        .collect();

    tab.set_layers(new_layers);
    Ok(snapshot)
}

/// Replays the recorded substitutions back into the tab.
///
/// Guard 1: the tab text must be exactly what it was at substitution time.
/// Guard 2: the glyph's current layer-id set must equal the recorded set.
/// Either failure aborts without mutating; the snapshot is consumed by the
/// call, so it is discarded regardless of outcome.
///
/// Positions to restore are recomputed from the current sequence with the
/// same (glyph, recorded-range) predicate the substitution used; the guards
/// are what make that sound.
pub fn revert_preview(
    font: &Font,
    tab: &mut EditTab,
    snapshot: PreviewSnapshot,
) -> Result<(), SwapError> {
    if tab.text() != snapshot.text {
        return Err(SwapError::RevertTextChanged);
    }

    let current_ids: HashSet<&LayerId> = font
        .glyph(&snapshot.glyph)
        .map(|glyph| glyph.layers.iter().map(|layer| &layer.id).collect())
        .unwrap_or_default();
    let recorded_ids: HashSet<&LayerId> =
        snapshot.glyph_layer_ids.iter().collect();
    if current_ids != recorded_ids {
        return Err(SwapError::RevertLayersChanged {
            glyph: snapshot.glyph.clone(),
        });
    }

    let mut replaced = snapshot.replaced.clone();
    let new_layers = tab
        .layers()
        .iter()
        .enumerate()
        .map(|(index, layer_ref)| {
            if layer_ref.glyph == snapshot.glyph
                && (!snapshot.use_selected
                    || snapshot.in_recorded_selection(index))
            {
                replaced.pop_front().unwrap_or_else(|| layer_ref.clone())
            } else {
                layer_ref.clone()
            }
        })
        .collect();

    tab.set_layers(new_layers);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{Glyph, Layer};

    /// Two glyphs: A with variants A1/A2/A3/Ax, B with B1/B2.
    fn font_ab() -> Font {
        Font::new(vec![
            Glyph::new(
                "A",
                vec![
                    Layer::new("A1", "Regular"),
                    Layer::new("A2", "Bold"),
                    Layer::new("A3", "Display"),
                    Layer::new("Ax", "Preview"),
                ],
            ),
            Glyph::new("B", vec![Layer::new("B1", "Regular"), Layer::new("B2", "Bold")]),
        ])
    }

    /// The tab from the worked example: [A1, B1, A2, A3, B2].
    fn tab_ab() -> EditTab {
        EditTab::new(
            "ababa",
            vec![
                LayerRef::new("A", "A1"),
                LayerRef::new("B", "B1"),
                LayerRef::new("A", "A2"),
                LayerRef::new("A", "A3"),
                LayerRef::new("B", "B2"),
            ],
        )
    }

    fn layer_ids(tab: &EditTab) -> Vec<&str> {
        tab.layers().iter().map(|r| r.layer.as_str()).collect()
    }

    #[test]
    fn whole_tab_substitution_replaces_every_occurrence() {
        let font = font_ab();
        let mut tab = tab_ab();

        let snapshot = apply_preview(
            &font,
            &mut tab,
            &GlyphName::from("A"),
            &LayerId::from("Ax"),
            false,
        )
        .expect("Substitution should succeed");

        assert_eq!(layer_ids(&tab), vec!["Ax", "B1", "Ax", "Ax", "B2"]);
        assert_eq!(snapshot.replaced_count(), 3);
    }

    #[test]
    fn selected_only_substitution_respects_the_range() {
        let font = font_ab();
        let mut tab = tab_ab();
        tab.set_selection(2, 2);

        apply_preview(
            &font,
            &mut tab,
            &GlyphName::from("A"),
            &LayerId::from("Ax"),
            true,
        )
        .expect("Substitution should succeed");

        // Only index 2 (A2) is both glyph A and inside [2, 4).
        assert_eq!(layer_ids(&tab), vec!["A1", "B1", "Ax", "A3", "B2"]);
    }

    #[test]
    fn round_trip_restores_the_sequence_exactly() {
        let font = font_ab();
        let mut tab = tab_ab();
        let before = tab.layers().to_vec();

        let snapshot = apply_preview(
            &font,
            &mut tab,
            &GlyphName::from("A"),
            &LayerId::from("Ax"),
            false,
        )
        .unwrap();
        assert_ne!(tab.layers(), before.as_slice());

        revert_preview(&font, &mut tab, snapshot)
            .expect("Revert should succeed");
        assert_eq!(tab.layers(), before.as_slice());
    }

    #[test]
    fn selected_only_round_trip_restores_the_sequence_exactly() {
        let font = font_ab();
        let mut tab = tab_ab();
        tab.set_selection(1, 3);
        let before = tab.layers().to_vec();

        let snapshot = apply_preview(
            &font,
            &mut tab,
            &GlyphName::from("A"),
            &LayerId::from("Ax"),
            true,
        )
        .unwrap();
        revert_preview(&font, &mut tab, snapshot).unwrap();
        assert_eq!(tab.layers(), before.as_slice());
    }

    #[test]
    fn glyph_missing_from_view_fails_without_mutation() {
        let font = font_ab();
        let mut tab = tab_ab();
        let before = tab.layers().to_vec();

        let err = apply_preview(
            &font,
            &mut tab,
            &GlyphName::from("Z"),
            &LayerId::from("Ax"),
            false,
        )
        .unwrap_err();

        assert!(matches!(err, SwapError::GlyphNotFound { .. }));
        assert_eq!(tab.layers(), before.as_slice());
    }

    #[test]
    fn glyph_outside_the_selection_fails_in_selected_mode() {
        let font = font_ab();
        let mut tab = tab_ab();
        // Selection covers only B1.
        tab.set_selection(1, 1);

        let err = apply_preview(
            &font,
            &mut tab,
            &GlyphName::from("A"),
            &LayerId::from("Ax"),
            true,
        )
        .unwrap_err();

        assert_eq!(
            err,
            SwapError::GlyphNotFound {
                glyph: GlyphName::from("A"),
                selected_only: true,
            }
        );
    }

    #[test]
    fn stale_layer_id_fails_without_mutation() {
        let font = font_ab();
        let mut tab = tab_ab();
        let before = tab.layers().to_vec();

        let err = apply_preview(
            &font,
            &mut tab,
            &GlyphName::from("A"),
            &LayerId::from("deleted-layer"),
            false,
        )
        .unwrap_err();

        assert!(matches!(err, SwapError::LayerNotFound { .. }));
        assert_eq!(tab.layers(), before.as_slice());
    }

    #[test]
    fn text_change_aborts_the_revert_without_mutation() {
        let font = font_ab();
        let mut tab = tab_ab();

        let snapshot = apply_preview(
            &font,
            &mut tab,
            &GlyphName::from("A"),
            &LayerId::from("Ax"),
            false,
        )
        .unwrap();

        tab.set_text("abaxa");
        let after_edit = tab.layers().to_vec();

        let err = revert_preview(&font, &mut tab, snapshot).unwrap_err();
        assert_eq!(err, SwapError::RevertTextChanged);
        assert_eq!(tab.layers(), after_edit.as_slice());
    }

    #[test]
    fn layer_set_change_aborts_the_revert_without_mutation() {
        let font = font_ab();
        let mut tab = tab_ab();

        let snapshot = apply_preview(
            &font,
            &mut tab,
            &GlyphName::from("A"),
            &LayerId::from("Ax"),
            false,
        )
        .unwrap();
        let after_apply = tab.layers().to_vec();

        // A layer was added to glyph A since the substitution.
        let changed_font = Font::new(vec![
            Glyph::new(
                "A",
                vec![
                    Layer::new("A1", "Regular"),
                    Layer::new("A2", "Bold"),
                    Layer::new("A3", "Display"),
                    Layer::new("Ax", "Preview"),
                    Layer::new("A-new", "Added"),
                ],
            ),
            font.glyphs()[1].clone(),
        ]);

        let err = revert_preview(&changed_font, &mut tab, snapshot).unwrap_err();
        assert_eq!(
            err,
            SwapError::RevertLayersChanged {
                glyph: GlyphName::from("A")
            }
        );
        assert_eq!(tab.layers(), after_apply.as_slice());
    }

    #[test]
    fn deleted_glyph_reads_as_a_layer_set_change() {
        let font = font_ab();
        let mut tab = tab_ab();

        let snapshot = apply_preview(
            &font,
            &mut tab,
            &GlyphName::from("A"),
            &LayerId::from("Ax"),
            false,
        )
        .unwrap();

        let gutted = Font::new(vec![font.glyphs()[1].clone()]);
        let err = revert_preview(&gutted, &mut tab, snapshot).unwrap_err();
        assert!(matches!(err, SwapError::RevertLayersChanged { .. }));
    }

    #[test]
    fn layer_id_order_does_not_matter_for_the_revert_guard() {
        let font = font_ab();
        let mut tab = tab_ab();

        let snapshot = apply_preview(
            &font,
            &mut tab,
            &GlyphName::from("A"),
            &LayerId::from("Ax"),
            false,
        )
        .unwrap();

        // Same layer ids, different order: still the same set.
        let reordered = Font::new(vec![
            Glyph::new(
                "A",
                vec![
                    Layer::new("Ax", "Preview"),
                    Layer::new("A3", "Display"),
                    Layer::new("A2", "Bold"),
                    Layer::new("A1", "Regular"),
                ],
            ),
            font.glyphs()[1].clone(),
        ]);

        revert_preview(&reordered, &mut tab, snapshot)
            .expect("A reordered layer list should still pass the set guard");
    }

    #[test]
    fn mixed_original_layers_are_restored_in_tab_order() {
        let font = font_ab();
        let mut tab = EditTab::new(
            "aaa",
            vec![
                LayerRef::new("A", "A3"),
                LayerRef::new("A", "A1"),
                LayerRef::new("A", "A2"),
            ],
        );

        let snapshot = apply_preview(
            &font,
            &mut tab,
            &GlyphName::from("A"),
            &LayerId::from("Ax"),
            false,
        )
        .unwrap();
        assert_eq!(layer_ids(&tab), vec!["Ax", "Ax", "Ax"]);

        revert_preview(&font, &mut tab, snapshot).unwrap();
        assert_eq!(
            layer_ids(&tab),
            vec!["A3", "A1", "A2"],
            "Originals should come back in their original positions"
        );
    }
}
