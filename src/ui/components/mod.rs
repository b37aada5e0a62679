//! Reusable UI components.

mod help_bar;
mod tag_editor;

pub use help_bar::render_help;
pub use tag_editor::{
    chip_views, layout_chips, required_height, ChipPlacement, ChipView, EditorLayout,
    TagEditorView,
};
