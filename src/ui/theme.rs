//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the terminal front end.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Border color of an editor in the active state.
    pub active_border: Color,
    /// Border color of an inactive editor.
    pub inactive_border: Color,
    /// Chip background.
    pub chip_bg: Color,
    /// Chip foreground.
    pub chip_fg: Color,
    /// Color of a chip's remove control.
    pub remove: Color,
    /// Placeholder text color.
    pub placeholder: Color,
}

impl Theme {
    pub fn border(&self, active: bool) -> Style {
        if active {
            Style::default().fg(self.active_border)
        } else {
            Style::default().fg(self.inactive_border)
        }
    }

    /// Style of typed text.
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn chip(&self) -> Style {
        Style::default().fg(self.chip_fg).bg(self.chip_bg)
    }

    pub fn remove_control(&self) -> Style {
        self.chip().fg(self.remove).add_modifier(Modifier::BOLD)
    }

    pub fn placeholder(&self) -> Style {
        Style::default().fg(self.placeholder)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            active_border: Color::Yellow,
            inactive_border: Color::DarkGray,
            chip_bg: Color::Blue,
            chip_fg: Color::White,
            remove: Color::LightRed,
            placeholder: Color::DarkGray,
        }
    }
}
