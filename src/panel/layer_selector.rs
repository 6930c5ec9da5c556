//! Layer dropdown state machine
//!
//! Lists the selected glyph's layers in their native order. Layer names may
//! collide, so the previously chosen layer is preserved across refreshes by
//! id, not by index or name; when it is gone the first layer is selected.

use bevy::prelude::*;

use crate::core::state::{Glyph, LayerId};

/// The outcome of a layer selection callback. The caller persists the
/// resulting layer id (or none) on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerChange {
    pub layer: Option<LayerId>,
}

/// State of the layer choice input
#[derive(Resource, Debug, Default)]
pub struct LayerSelector {
    /// Display names in the glyph's native layer order
    names: Vec<String>,
    /// Layer ids, parallel to `names`. Stored separately because the
    /// membership checks at substitution time key on ids.
    ids: Vec<LayerId>,
    /// The currently chosen layer id, if any
    current: Option<LayerId>,
}

impl LayerSelector {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn ids(&self) -> &[LayerId] {
        &self.ids
    }

    pub fn current(&self) -> Option<&LayerId> {
        self.current.as_ref()
    }

    /// Display name of the current layer, for the combo input
    pub fn current_name(&self) -> Option<&str> {
        let current = self.current.as_ref()?;
        let index = self.ids.iter().position(|id| id == current)?;
        self.names.get(index).map(String::as_str)
    }

    /// Repopulates the list from the glyph's layers (empty when none),
    /// preserving the previous selection by id when it still exists and
    /// falling back to the first layer otherwise. Ends by running the
    /// selection callback once.
    pub fn refresh(&mut self, glyph: Option<&Glyph>) -> LayerChange {
        let previous = self.current.take();

        match glyph {
            Some(glyph) => {
                self.names =
                    glyph.layers.iter().map(|layer| layer.name.clone()).collect();
                self.ids = glyph.layer_ids();
            }
            None => {
                self.names.clear();
                self.ids.clear();
            }
        }

        let index = previous
            .and_then(|id| self.ids.iter().position(|other| *other == id))
            .unwrap_or(0);
        self.select(Some(index))
    }

    /// Selection callback for a raw dropdown index.
    ///
    /// `None` is the no-selection sentinel; it and out-of-range indices
    /// clamp to 0 since the index can be stale. An empty list yields no
    /// selection.
    pub fn select(&mut self, index: Option<usize>) -> LayerChange {
        let index = match index {
            Some(index) if index < self.ids.len() => index,
            _ => 0,
        };
        self.current = self.ids.get(index).cloned();
        LayerChange {
            layer: self.current.clone(),
        }
    }

    /// Selects the layer with `id` if it is in the current list
    pub fn select_id(&mut self, id: &LayerId) -> Option<LayerChange> {
        let index = self.ids.iter().position(|other| other == id)?;
        Some(self.select(Some(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Layer;

    fn glyph(layers: &[(&str, &str)]) -> Glyph {
        Glyph::new(
            "a",
            layers
                .iter()
                .map(|(id, name)| Layer::new(*id, *name))
                .collect(),
        )
    }

    #[test]
    fn refresh_defaults_to_the_first_layer() {
        let glyph = glyph(&[("one", "Regular"), ("two", "Bold")]);
        let mut selector = LayerSelector::default();
        let change = selector.refresh(Some(&glyph));
        assert_eq!(change.layer, Some(LayerId::from("one")));
        assert_eq!(selector.current_name(), Some("Regular"));
    }

    #[test]
    fn refresh_preserves_the_selection_by_id_across_reorders() {
        let mut selector = LayerSelector::default();
        selector.refresh(Some(&glyph(&[("one", "Regular"), ("two", "Bold")])));
        selector.select(Some(1));
        assert_eq!(selector.current(), Some(&LayerId::from("two")));

        // Same layers, shifted positions and a colliding display name.
        let reordered = glyph(&[
            ("three", "Bold"),
            ("two", "Bold"),
            ("one", "Regular"),
        ]);
        let change = selector.refresh(Some(&reordered));
        assert_eq!(
            change.layer,
            Some(LayerId::from("two")),
            "Selection should follow the id, not the index or name"
        );
    }

    #[test]
    fn refresh_falls_back_to_first_when_the_id_is_gone() {
        let mut selector = LayerSelector::default();
        selector.refresh(Some(&glyph(&[("one", "Regular"), ("two", "Bold")])));
        selector.select(Some(1));

        let change = selector.refresh(Some(&glyph(&[("one", "Regular")])));
        assert_eq!(change.layer, Some(LayerId::from("one")));
    }

    #[test]
    fn refresh_with_no_glyph_clears_the_selection() {
        let mut selector = LayerSelector::default();
        selector.refresh(Some(&glyph(&[("one", "Regular")])));

        let change = selector.refresh(None);
        assert_eq!(change.layer, None);
        assert!(selector.names().is_empty());
        assert_eq!(selector.current_name(), None);
    }

    #[test]
    fn stale_indices_clamp_to_the_first_layer() {
        let mut selector = LayerSelector::default();
        selector.refresh(Some(&glyph(&[("one", "Regular"), ("two", "Bold")])));

        assert_eq!(
            selector.select(Some(9)).layer,
            Some(LayerId::from("one")),
            "Out-of-range index should clamp to 0"
        );
        assert_eq!(
            selector.select(None).layer,
            Some(LayerId::from("one")),
            "The no-selection sentinel should clamp to 0"
        );
    }

    #[test]
    fn select_id_misses_leave_the_selection_alone() {
        let mut selector = LayerSelector::default();
        selector.refresh(Some(&glyph(&[("one", "Regular")])));

        assert!(selector.select_id(&LayerId::from("ghost")).is_none());
        assert_eq!(selector.current(), Some(&LayerId::from("one")));
    }
}
