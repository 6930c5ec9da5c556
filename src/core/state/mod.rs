//! Host editor state consumed by the panel
//!
//! The panel never owns the real data: fonts, glyphs, layers and tabs belong
//! to the host editor. These modules model the minimal read/write contract
//! the panel needs, with the `AppState` resource standing in for the host.

// Sub-modules
pub mod app_state;
pub mod font;
pub mod tab;

// Re-export the public surface
pub use app_state::*;
pub use font::*;
pub use tab::*;
