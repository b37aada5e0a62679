//! Terminal user interface.
//!
//! Rendering only: the editors' state lives in the document, and the views
//! here read it back to draw chips, fields and the active border.

mod components;
pub mod theme;

pub use components::{
    chip_views, layout_chips, render_help, required_height, ChipPlacement, ChipView,
    EditorLayout, TagEditorView,
};
pub use theme::Theme;
