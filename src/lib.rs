//! Tagfield - chip-based tag editing for text inputs.
//!
//! The [`editor`] module turns an `<input>` element into a tag editor: text
//! committed with Enter becomes a removable chip backed by a hidden
//! `name[]` input, so the tags submit with the form as a repeated field.
//! Editors operate on any [`dom::Host`]; [`dom::Document`] is the in-memory
//! implementation used by the terminal front end in [`app`].

pub mod app;
pub mod bootstrap;
pub mod config;
pub mod dom;
pub mod editor;
pub mod error;
pub mod events;
pub mod form;
pub mod logging;
pub mod ui;

pub use bootstrap::{init_all, init_all_with, DEFAULT_SELECTOR};
pub use editor::{EditorConfig, EditorEvent, TagAction, TagEditor};
