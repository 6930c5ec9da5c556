//! layerswap: a preview-layer switching pane for a Bevy-based font editor
//!
//! Pick a glyph present in the current editing tab, pick one of its layers,
//! and every occurrence of that glyph in the tab is switched to show that
//! layer, with a one-step revert. The interesting parts are in
//! [`panel`]; [`ui`] is the widget shell and [`core`] holds the host state
//! model, errors and preferences.

pub mod core;
pub mod logger;
pub mod panel;
pub mod ui;

#[cfg(test)]
mod tests;

pub use panel::PreviewPanelPlugin;
pub use ui::notifications::NotificationPlugin;
pub use ui::panes::preview_pane::PreviewPanePlugin;
