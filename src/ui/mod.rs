//! The panel's widget shell: theme constants, the pane itself and the
//! notification toast.

pub mod notifications;
pub mod panes;
pub mod theme;
