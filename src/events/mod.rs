//! Event handling for the application.
//!
//! Terminal input is polled from crossterm and converted into [`Event`]s
//! that the application routes to its tag editors.

mod handler;

pub use handler::EventHandler;

use crossterm::event::{KeyEvent, MouseEvent};

/// Application events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// Pointer movement or a button press.
    Mouse(MouseEvent),
    /// The terminal window gained focus.
    FocusGained,
    /// The terminal window lost focus.
    FocusLost,
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input arrived within the tick rate.
    Tick,
}
